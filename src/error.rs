//! Pipeline error taxonomy.
//!
//! Three failure classes cover the whole pipeline:
//!
//! - [`ScanError::Network`]: the proxy transport call failed or returned a
//!   non-success status
//! - [`ScanError::Content`]: the proxy payload was unusable, or the page
//!   yielded too little readable text
//! - [`ScanError::Analysis`]: the analysis service call failed or returned
//!   unusable data
//!
//! None of these are fatal to the process. Each carries a message that is
//! safe to show the user; underlying causes (raw transport errors, malformed
//! payloads) are logged at the site where they occur and never surfaced
//! verbatim, except transport error text which is safe to include.

use thiserror::Error;

/// A user-facing pipeline failure.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The proxy was unreachable or answered with a non-success status.
    #[error("network bridge failed: {0}")]
    Network(String),

    /// The fetched page produced no usable text, or the proxy response was
    /// not the expected envelope.
    #[error("unusable content: {0}")]
    Content(String),

    /// The analysis service call failed. The message is a stable,
    /// user-readable summary; the cause is logged, not surfaced.
    #[error("analysis failed: {0}")]
    Analysis(String),
}
