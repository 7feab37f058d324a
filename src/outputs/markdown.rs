//! Markdown report generation.
//!
//! Re-expresses the rendered block sequence as a Markdown document: headers
//! become `##` sections, list items become `-` bullets, emphasis is
//! re-wrapped, and the de-duplicated sources close the document as a link
//! list.

use crate::models::AnalysisResult;
use crate::render::{render, Block, Span};
use std::error::Error;
use std::fmt::Write as _;
use tokio::fs;
use tracing::{info, instrument};

/// Convert a completed analysis into a Markdown document.
pub fn report_to_markdown(result: &AnalysisResult) -> String {
    let mut md = String::new();
    md.push_str("# Credibility Report\n\n");
    let _ = writeln!(md, "Generated: {}\n", result.created_at.to_rfc3339());

    for block in render(&result.report_text) {
        match block {
            Block::Header(text) => {
                let _ = writeln!(md, "## {text}\n");
            }
            Block::ListItem(text) => {
                let _ = writeln!(md, "- {text}");
            }
            Block::Spacer => md.push('\n'),
            Block::Paragraph(spans) => {
                for span in spans {
                    match span {
                        Span::Text(text) => md.push_str(&text),
                        Span::Emphasis(text) => {
                            let _ = write!(md, "**{text}**");
                        }
                    }
                }
                md.push_str("\n\n");
            }
        }
    }

    if !result.sources.is_empty() {
        md.push_str("\n## Sources\n\n");
        for source in &result.sources {
            let _ = writeln!(md, "- [{}]({})", source.title, source.uri);
        }
    }

    md
}

/// Write the Markdown report into `output_dir`, creating it if needed.
///
/// # Returns
///
/// The path of the written file.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir))]
pub async fn write_report(
    result: &AnalysisResult,
    output_dir: &str,
) -> Result<String, Box<dyn Error>> {
    fs::create_dir_all(output_dir).await?;
    let path = format!(
        "{}/report_{}.md",
        output_dir.trim_end_matches('/'),
        result.created_at.format("%Y-%m-%d_%H%M%S")
    );
    fs::write(&path, report_to_markdown(result)).await?;
    info!(path = %path, "Wrote Markdown report");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GroundingSource;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            report_text: "**Key Findings**\n* the claim is **disputed**\n\nPlain closing line."
                .to_string(),
            sources: vec![GroundingSource {
                title: "Wire Coverage".to_string(),
                uri: "https://example.org/wire".to_string(),
            }],
            created_at: Utc.with_ymd_and_hms(2025, 5, 6, 20, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_report_to_markdown_shape() {
        let md = report_to_markdown(&sample_result());
        assert!(md.starts_with("# Credibility Report\n\n"));
        assert!(md.contains("## Key Findings\n"));
        assert!(md.contains("- the claim is **disputed**\n"));
        assert!(md.contains("Plain closing line.\n"));
        assert!(md.contains("## Sources\n\n- [Wire Coverage](https://example.org/wire)\n"));
    }

    #[test]
    fn test_sources_section_omitted_when_empty() {
        let mut result = sample_result();
        result.sources.clear();
        assert!(!report_to_markdown(&result).contains("## Sources"));
    }

    #[tokio::test]
    async fn test_write_report_creates_dir_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let nested = format!("{}/reports", dir.path().display());

        let path = write_report(&sample_result(), &nested).await.unwrap();
        assert_eq!(
            path,
            format!("{nested}/report_2025-05-06_203000.md")
        );
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("# Credibility Report"));
    }
}
