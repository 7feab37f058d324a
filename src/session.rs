//! Analysis session state and pipeline coordination.
//!
//! One session owns the mutable state of the whole flow: the current
//! status, the single live result slot, and the last user-facing error
//! message. At most one operation is in flight at a time; the URL flow is
//! strictly sequential (fetch, extract, length check, analyze) and a new
//! completed analysis always replaces the previous result wholesale.
//!
//! The analyst and fetcher are injected at construction; the session never
//! reaches for globals.

use crate::api::GeminiAnalyst;
use crate::error::ScanError;
use crate::extract::extract_text;
use crate::fetch::ProxyFetcher;
use crate::models::{AnalysisResult, AnalysisStatus};
use tracing::{info, instrument, warn};

/// Extracted content shorter than this is rejected before analysis.
pub const MIN_CONTENT_CHARS: usize = 100;

/// Coordinates the fetch/extract/analyze pipeline and owns its state.
#[derive(Debug)]
pub struct AnalysisSession {
    analyst: GeminiAnalyst,
    fetcher: ProxyFetcher,
    status: AnalysisStatus,
    result: Option<AnalysisResult>,
    error: Option<String>,
}

impl AnalysisSession {
    /// Create an idle session with its collaborators injected.
    pub fn new(analyst: GeminiAnalyst, fetcher: ProxyFetcher) -> Self {
        Self {
            analyst,
            fetcher,
            status: AnalysisStatus::Idle,
            result: None,
            error: None,
        }
    }

    pub fn status(&self) -> AnalysisStatus {
        self.status
    }

    /// The current result, if the last analysis completed.
    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    /// The last user-facing error message, if the last analysis failed.
    pub fn last_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Reset to idle, discarding any result or error.
    pub fn clear(&mut self) {
        self.status = AnalysisStatus::Idle;
        self.result = None;
        self.error = None;
    }

    /// Analyze caller-supplied text directly.
    #[instrument(level = "info", skip_all)]
    pub async fn analyze_text(&mut self, text: &str) -> Result<&AnalysisResult, ScanError> {
        self.begin();
        match self.analyst.analyze(text).await {
            Ok(result) => Ok(self.complete(result)),
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Fetch `url` through the proxy, extract its readable text, and
    /// analyze it.
    ///
    /// The steps run strictly in order; extraction must produce at least
    /// [`MIN_CONTENT_CHARS`] characters before the analysis request is
    /// issued.
    #[instrument(level = "info", skip_all, fields(%url))]
    pub async fn analyze_url(&mut self, url: &str) -> Result<&AnalysisResult, ScanError> {
        self.begin();

        let html = match self.fetcher.fetch_page(url).await {
            Ok(html) => html,
            Err(e) => return Err(self.fail(e)),
        };

        let content = extract_text(&html);
        let chars = content.chars().count();
        if chars < MIN_CONTENT_CHARS {
            let e = ScanError::Content(format!(
                "insufficient readable content detected at target URL ({chars} chars, {MIN_CONTENT_CHARS} required)"
            ));
            return Err(self.fail(e));
        }

        info!(chars, "Extracted readable content; starting analysis");
        match self.analyst.analyze(&content).await {
            Ok(result) => Ok(self.complete(result)),
            Err(e) => Err(self.fail(e)),
        }
    }

    fn begin(&mut self) {
        self.status = AnalysisStatus::Analyzing;
        self.result = None;
        self.error = None;
    }

    fn complete(&mut self, result: AnalysisResult) -> &AnalysisResult {
        self.status = AnalysisStatus::Completed;
        self.result.insert(result)
    }

    fn fail(&mut self, e: ScanError) -> ScanError {
        warn!(error = %e, "Analysis pipeline failed");
        self.status = AnalysisStatus::Error;
        self.result = None;
        self.error = Some(e.to_string());
        e
    }
}
