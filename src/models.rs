//! Data models for credibility analysis results.
//!
//! This module defines the core data structures used throughout the
//! application:
//! - [`AnalysisResult`]: a completed credibility report with its citations
//! - [`GroundingSource`]: a single web citation backing part of a report
//! - [`AnalysisStatus`]: the state of the current analysis session
//!
//! An `AnalysisResult` is only ever constructed by the response parser in
//! [`crate::api`] and is never mutated afterwards; the session holds at most
//! one at a time and replaces it wholesale on each new analysis.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A web citation the analysis service claims supports part of its report.
///
/// Within one [`AnalysisResult`] no two sources share the same `uri`; when
/// the service repeats a URI, the title of the first occurrence wins.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GroundingSource {
    /// Human-readable title of the cited page.
    pub title: String,
    /// The cited page's URI.
    pub uri: String,
}

/// A completed credibility report.
///
/// `report_text` is the free-text report produced by the analysis service,
/// structured with the line-oriented markup that [`crate::render`]
/// interprets. `sources` preserves first-seen order.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisResult {
    /// The report body as returned by the analysis service.
    pub report_text: String,
    /// De-duplicated citations, in order of first occurrence.
    pub sources: Vec<GroundingSource>,
    /// When the result was parsed.
    pub created_at: DateTime<Utc>,
}

/// State of an analysis session.
///
/// Transitions: `Idle` to `Analyzing` on submit, `Analyzing` to `Completed`
/// on success, `Analyzing` to `Error` on failure, and any state back to
/// `Idle` on clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisStatus {
    Idle,
    Analyzing,
    Completed,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_grounding_source_serialization() {
        let source = GroundingSource {
            title: "Example Coverage".to_string(),
            uri: "https://example.com/coverage".to_string(),
        };

        let json = serde_json::to_string(&source).unwrap();
        let deserialized: GroundingSource = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, source);
    }

    #[test]
    fn test_analysis_result_serialization() {
        let result = AnalysisResult {
            report_text: "**Conclusion**\nVerified".to_string(),
            sources: vec![GroundingSource {
                title: "Reference Source".to_string(),
                uri: "https://example.org/a".to_string(),
            }],
            created_at: Utc.with_ymd_and_hms(2025, 5, 6, 20, 30, 0).unwrap(),
        };

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("Verified"));
        assert!(json.contains("https://example.org/a"));

        let deserialized: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.report_text, result.report_text);
        assert_eq!(deserialized.sources.len(), 1);
        assert_eq!(deserialized.created_at, result.created_at);
    }

    #[test]
    fn test_status_transitions_are_distinct() {
        assert_ne!(AnalysisStatus::Idle, AnalysisStatus::Analyzing);
        assert_ne!(AnalysisStatus::Completed, AnalysisStatus::Error);
    }
}
