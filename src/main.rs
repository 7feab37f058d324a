//! Binary entry point: logging init, CLI parsing, one pipeline run,
//! terminal rendering and optional report files.
//!
//! ```sh
//! credlens --url https://example.com/story -m ./markdown -j ./json
//! ```

use clap::Parser;
use credlens::api::GeminiAnalyst;
use credlens::cli::Cli;
use credlens::config::AppConfig;
use credlens::fetch::ProxyFetcher;
use credlens::models::AnalysisResult;
use credlens::outputs;
use credlens::render::{render, Block, Span};
use credlens::session::AnalysisSession;
use credlens::utils::ensure_writable_dir;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let start_time = std::time::Instant::now();
    info!("credlens starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.url, ?args.markdown_output_dir, ?args.json_output_dir, "Parsed CLI arguments");

    let config = AppConfig::resolve(&args)?;

    // Early check: ensure requested output dirs are writable
    for dir in [&args.markdown_output_dir, &args.json_output_dir]
        .into_iter()
        .flatten()
    {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(
                path = %dir,
                error = %e,
                "Output directory is not writable (fix perms or choose a different path)"
            );
            return Err(e);
        }
    }

    // ---- Build the session ----
    let analyst = GeminiAnalyst::new(&config.api_key, &config.model);
    let fetcher = ProxyFetcher::new(&config.proxy_endpoint);
    let mut session = AnalysisSession::new(analyst, fetcher);

    // ---- Run the pipeline ----
    let outcome = if let Some(url) = args.url.as_deref() {
        session.analyze_url(url).await
    } else {
        let text = read_input_text(&args)?;
        session.analyze_text(&text).await
    };

    let result = match outcome {
        Ok(result) => result.clone(),
        Err(e) => {
            error!(error = %e, "Analysis did not complete");
            return Err(e.to_string().into());
        }
    };

    print_report(&result);

    // ---- Optional report files ----
    if let Some(ref dir) = args.markdown_output_dir {
        if let Err(e) = outputs::markdown::write_report(&result, dir).await {
            error!(error = %e, "Failed to write Markdown report");
        }
    }
    if let Some(ref dir) = args.json_output_dir {
        if let Err(e) = outputs::json::write_report(&result, dir).await {
            error!(error = %e, "Failed to write JSON report");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        sources = result.sources.len(),
        "Execution complete"
    );

    Ok(())
}

/// Resolve the article text for the non-URL input modes.
fn read_input_text(args: &Cli) -> Result<String, Box<dyn Error>> {
    if let Some(ref text) = args.text {
        return Ok(text.clone());
    }
    if let Some(ref path) = args.file {
        return Ok(std::fs::read_to_string(path)?);
    }
    // clap's input group guarantees one mode is present; url is handled by
    // the caller.
    Err("no input provided".into())
}

/// Print the rendered report and its sources to stdout.
fn print_report(result: &AnalysisResult) {
    for block in render(&result.report_text) {
        match block {
            Block::Header(text) => {
                println!();
                println!("{text}");
                println!("{}", "-".repeat(text.chars().count().max(3)));
            }
            Block::ListItem(text) => println!("  * {text}"),
            Block::Spacer => println!(),
            Block::Paragraph(spans) => {
                let mut line = String::new();
                for span in spans {
                    match span {
                        Span::Text(text) => line.push_str(&text),
                        Span::Emphasis(text) => {
                            line.push_str("\x1b[1m");
                            line.push_str(&text);
                            line.push_str("\x1b[0m");
                        }
                    }
                }
                println!("{line}");
            }
        }
    }

    if !result.sources.is_empty() {
        println!();
        println!("Sources:");
        for source in &result.sources {
            println!("  {} <{}>", source.title, source.uri);
        }
    }
}
