//! # Credlens
//!
//! A credibility analysis pipeline for news articles: feed it text, a file,
//! or a URL and it produces an AI-generated credibility report with
//! supporting source links.
//!
//! ## Pipeline
//!
//! The flow is strictly sequential, one operation in flight at a time:
//!
//! 1. **Ingestion**: inline text, a file, or a URL fetched through a
//!    CORS-bypass proxy ([`fetch`])
//! 2. **Extraction**: boilerplate removal and line filtering over the raw
//!    HTML ([`extract`])
//! 3. **Analysis**: one web-grounded LLM request, no retry ([`prompt`],
//!    [`api`])
//! 4. **Rendering**: the report's micro-markup interpreted into display
//!    blocks ([`render`]), written out by [`outputs`]
//!
//! [`session::AnalysisSession`] owns the state of the flow: the status
//! machine, the single live result slot, and the last user-facing error.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod models;
pub mod outputs;
pub mod prompt;
pub mod render;
pub mod session;
pub mod utils;
