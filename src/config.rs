//! Runtime configuration resolution.
//!
//! Settings come from three places, highest precedence first: command-line
//! flags (which also read their documented environment variables), an
//! optional YAML configuration file passed with `--config`, and built-in
//! defaults. An absent API key is deliberately NOT an error here; it
//! surfaces later as an analysis call failure.

use crate::api::DEFAULT_MODEL;
use crate::cli::Cli;
use crate::fetch::DEFAULT_PROXY_ENDPOINT;
use serde::Deserialize;
use std::error::Error;
use tracing::{info, warn};

/// Shape of the optional YAML configuration file. All fields optional.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub proxy_endpoint: Option<String>,
}

/// Fully resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Analysis service credential. May be empty; validated only by use.
    pub api_key: String,
    /// Analysis model name.
    pub model: String,
    /// Bridging endpoint for URL ingestion.
    pub proxy_endpoint: String,
}

impl AppConfig {
    /// Merge CLI flags, the optional config file, and defaults.
    pub fn resolve(cli: &Cli) -> Result<Self, Box<dyn Error>> {
        let file = match cli.config.as_deref() {
            Some(config_path) => {
                let raw = std::fs::read_to_string(config_path)?;
                let parsed = serde_yaml::from_str::<FileConfig>(&raw)?;
                info!(config_path, "Loaded configuration");
                parsed
            }
            None => FileConfig::default(),
        };

        let api_key = cli.api_key.clone().or(file.api_key).unwrap_or_default();
        if api_key.is_empty() {
            warn!("No API key configured; analysis requests will fail");
        }

        Ok(Self {
            api_key,
            model: cli
                .model
                .clone()
                .or(file.model)
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            proxy_endpoint: cli
                .proxy
                .clone()
                .or(file.proxy_endpoint)
                .unwrap_or_else(|| DEFAULT_PROXY_ENDPOINT.to_string()),
        })
    }
}
