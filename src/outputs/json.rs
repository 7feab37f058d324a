//! JSON report output.
//!
//! Serializes the [`AnalysisResult`] as-is so other tooling can consume the
//! report text, source list, and timestamp without re-parsing Markdown.

use crate::models::AnalysisResult;
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

/// Write the result as JSON into `output_dir`, creating it if needed.
///
/// # Returns
///
/// The path of the written file.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir))]
pub async fn write_report(
    result: &AnalysisResult,
    output_dir: &str,
) -> Result<String, Box<dyn Error>> {
    let json = serde_json::to_string(result)?;
    fs::create_dir_all(output_dir).await?;
    let path = format!(
        "{}/report_{}.json",
        output_dir.trim_end_matches('/'),
        result.created_at.format("%Y-%m-%d_%H%M%S")
    );
    fs::write(&path, json).await?;
    info!(path = %path, "Wrote JSON report");
    Ok(path)
}
