//! Analysis service interaction.
//!
//! This module owns the request/response contract with the Gemini
//! `generateContent` REST API: it sends the composed instruction prompt with
//! web-grounded retrieval enabled and parses the free-text report plus
//! grounding citations out of the response.
//!
//! # Error Policy
//!
//! Everything that goes wrong on this boundary (transport failure, error
//! status, malformed payload) collapses into a single user-facing
//! [`ScanError::Analysis`] with a stable message; the underlying cause is
//! logged at error level and never surfaced verbatim. No retry: a failed
//! call is reported, not repeated.

use crate::error::ScanError;
use crate::models::{AnalysisResult, GroundingSource};
use crate::prompt::build_prompt;
use crate::utils::truncate_for_log;
use chrono::Utc;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{error, info, instrument};

/// Base URL of the analysis service.
pub const DEFAULT_API_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used when no override is configured.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Substituted report body when the service returns no text at all.
const NO_ANALYSIS_FALLBACK: &str = "No analysis provided.";

/// Title given to citations the service returns without one.
const UNTITLED_SOURCE: &str = "Reference Source";

/// Stable user-facing message for any analysis failure.
const ANALYSIS_FAILED: &str = "could not analyze the article; check your API key and try again";

// ---- Request wire types ----

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    tools: Vec<RequestTool>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

/// Enables web-grounded retrieval for the request.
#[derive(Debug, Serialize)]
struct RequestTool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

// ---- Response wire types ----
//
// Every field is optional or defaulted: the structured report format is
// requested in natural language only, so partial and non-conforming
// payloads must deserialize cleanly.

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    web: Option<WebReference>,
}

#[derive(Debug, Deserialize)]
struct WebReference {
    uri: Option<String>,
    title: Option<String>,
}

/// Client for the credibility analysis service.
///
/// Constructed once at session start and injected into the session that
/// issues analysis requests. An absent API key is not validated here; it
/// surfaces as an eventual call failure.
#[derive(Debug, Clone)]
pub struct GeminiAnalyst {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl GeminiAnalyst {
    /// Create an analyst against the production endpoint.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_endpoint(DEFAULT_API_ENDPOINT, api_key, model)
    }

    /// Create an analyst against a specific endpoint (used by tests and
    /// self-hosted gateways).
    pub fn with_endpoint(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Send `text` for credibility analysis and parse the result.
    ///
    /// # Arguments
    ///
    /// * `text` - The article text to analyze
    ///
    /// # Returns
    ///
    /// A fully parsed [`AnalysisResult`], or [`ScanError::Analysis`] when
    /// the call fails or the payload is unusable.
    #[instrument(level = "info", skip_all, fields(model = %self.model))]
    pub async fn analyze(&self, text: &str) -> Result<AnalysisResult, ScanError> {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: build_prompt(text),
                }],
            }],
            tools: vec![RequestTool {
                google_search: GoogleSearch {},
            }],
        };

        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);
        let t0 = Instant::now();

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(elapsed_ms = t0.elapsed().as_millis() as u128, error = %e, "Analysis request failed");
                ScanError::Analysis(ANALYSIS_FAILED.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                %status,
                body = %truncate_for_log(&body, 300),
                "Analysis service returned an error status"
            );
            return Err(ScanError::Analysis(ANALYSIS_FAILED.to_string()));
        }

        let payload: GenerateContentResponse = response.json().await.map_err(|e| {
            error!(error = %e, "Analysis response was not the expected payload");
            ScanError::Analysis(ANALYSIS_FAILED.to_string())
        })?;

        let result = parse_response(payload);
        info!(
            elapsed_ms = t0.elapsed().as_millis() as u128,
            report_chars = result.report_text.chars().count(),
            sources = result.sources.len(),
            "Analysis completed"
        );
        Ok(result)
    }
}

/// Turn a service response into an [`AnalysisResult`].
///
/// A missing report body becomes a fallback sentence, missing grounding
/// metadata becomes an empty source list, and citations without a title get
/// a placeholder. Sources are de-duplicated by URI,
/// first occurrence's title winning, insertion order preserved.
pub(crate) fn parse_response(response: GenerateContentResponse) -> AnalysisResult {
    let (content, grounding) = match response.candidates.into_iter().next() {
        Some(candidate) => (candidate.content, candidate.grounding_metadata),
        None => (None, None),
    };

    let report_text = content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect::<String>())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NO_ANALYSIS_FALLBACK.to_string());

    let sources: Vec<GroundingSource> = grounding
        .map(|g| g.grounding_chunks)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|chunk| chunk.web)
        .filter_map(|web| {
            web.uri.map(|uri| GroundingSource {
                title: web.title.unwrap_or_else(|| UNTITLED_SOURCE.to_string()),
                uri,
            })
        })
        .unique_by(|source| source.uri.clone())
        .collect();

    AnalysisResult {
        report_text,
        sources,
        created_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn response_from(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).expect("valid wire payload")
    }

    #[test]
    fn test_parse_extracts_report_text() {
        let result = parse_response(response_from(serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "**Conclusion**\n" }, { "text": "Verified" }] }
            }]
        })));
        assert_eq!(result.report_text, "**Conclusion**\nVerified");
        assert!(result.sources.is_empty());
    }

    #[test]
    fn test_parse_substitutes_fallback_for_missing_text() {
        let result = parse_response(response_from(serde_json::json!({ "candidates": [] })));
        assert_eq!(result.report_text, "No analysis provided.");

        let result = parse_response(response_from(serde_json::json!({
            "candidates": [{ "content": { "parts": [] } }]
        })));
        assert_eq!(result.report_text, "No analysis provided.");
    }

    #[test]
    fn test_parse_deduplicates_sources_by_uri() {
        let result = parse_response(response_from(serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "report" }] },
                "groundingMetadata": {
                    "groundingChunks": [
                        { "web": { "uri": "https://a.example/1", "title": "First Title" } },
                        { "web": { "uri": "https://b.example/2", "title": "Other" } },
                        { "web": { "uri": "https://a.example/1", "title": "Second Title" } }
                    ]
                }
            }]
        })));

        assert_eq!(result.sources.len(), 2);
        assert_eq!(result.sources[0].uri, "https://a.example/1");
        assert_eq!(result.sources[0].title, "First Title");
        assert_eq!(result.sources[1].uri, "https://b.example/2");
    }

    #[test]
    fn test_parse_defaults_missing_titles_and_skips_missing_uris() {
        let result = parse_response(response_from(serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "report" }] },
                "groundingMetadata": {
                    "groundingChunks": [
                        { "web": { "uri": "https://a.example/1" } },
                        { "web": { "title": "No URI Here" } },
                        {}
                    ]
                }
            }]
        })));

        assert_eq!(result.sources.len(), 1);
        assert_eq!(result.sources[0].title, "Reference Source");
    }

    #[tokio::test]
    async fn test_analyze_round_trip_against_mock_service() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/test-model:generateContent"))
            .and(header("x-goog-api-key", "k-123"))
            .and(body_partial_json(serde_json::json!({
                "tools": [{ "google_search": {} }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "**Credibility Score**: 87" }] },
                    "groundingMetadata": {
                        "groundingChunks": [
                            { "web": { "uri": "https://a.example/1", "title": "Coverage" } }
                        ]
                    }
                }]
            })))
            .mount(&server)
            .await;

        let analyst = GeminiAnalyst::with_endpoint(server.uri(), "k-123", "test-model");
        let result = analyst.analyze("some article text").await.expect("analysis ok");
        assert_eq!(result.report_text, "**Credibility Score**: 87");
        assert_eq!(result.sources.len(), 1);
    }

    #[tokio::test]
    async fn test_analyze_masks_service_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/test-model:generateContent"))
            .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
            .mount(&server)
            .await;

        let analyst = GeminiAnalyst::with_endpoint(server.uri(), "bad-key", "test-model");
        let err = analyst.analyze("some article text").await.unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, ScanError::Analysis(_)));
        // The raw service body must not leak into the user-facing message.
        assert!(!message.contains("API key not valid"));
        assert!(message.contains("check your API key"));
    }
}
