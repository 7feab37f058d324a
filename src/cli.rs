//! Command-line interface definitions for credlens.
//!
//! This module defines the CLI arguments and options using the `clap`
//! crate. Exactly one input mode is required per run: inline text, a text
//! file, or a URL to fetch and extract.

use clap::{ArgGroup, Parser};

/// Command-line arguments for the credlens application.
///
/// # Examples
///
/// ```sh
/// # Analyze pasted text
/// credlens --text "Scientists announced today that..."
///
/// # Analyze a file
/// credlens --file ./suspicious_article.txt
///
/// # Fetch a URL, extract its readable text, analyze it,
/// # and keep a Markdown copy of the report
/// credlens --url https://example.com/story -m ./reports
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
#[command(group(ArgGroup::new("input").required(true).args(["text", "file", "url"])))]
pub struct Cli {
    /// Article text to analyze directly
    #[arg(short, long)]
    pub text: Option<String>,

    /// Read the article text from a file
    #[arg(short, long)]
    pub file: Option<String>,

    /// Fetch the article at this URL, extract its readable text, then analyze it
    #[arg(short, long)]
    pub url: Option<String>,

    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Analysis service API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Analysis model name
    #[arg(long)]
    pub model: Option<String>,

    /// Bridging proxy endpoint used for URL ingestion
    #[arg(long)]
    pub proxy: Option<String>,

    /// Output directory for the Markdown report (optional)
    #[arg(short = 'm', long)]
    pub markdown_output_dir: Option<String>,

    /// Output directory for the JSON report (optional)
    #[arg(short = 'j', long)]
    pub json_output_dir: Option<String>,
}
