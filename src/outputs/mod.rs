//! Report output modules.
//!
//! A completed analysis can be persisted in two formats, both named after
//! the moment the result was created:
//!
//! ```text
//! output_dir/
//! ├── report_2025-05-06_203000.md    # rendered report + source links
//! └── report_2025-05-06_203000.json  # the AnalysisResult, serialized
//! ```
//!
//! - [`markdown`]: renders the report's display blocks to a Markdown file
//! - [`json`]: writes the raw [`crate::models::AnalysisResult`] as JSON

pub mod json;
pub mod markdown;
