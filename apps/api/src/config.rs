use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

use crate::wizard::store::DEFAULT_IDLE_TIMEOUT;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Font files (TTF/OTF) handed to the PDF compiler.
    pub font_paths: Vec<PathBuf>,
    /// Sessions untouched for longer than this are evicted.
    pub session_idle_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Config {
            gemini_api_key: require(&lookup, "GEMINI_API_KEY")?,
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            font_paths: lookup("FONT_PATHS")
                .map(|v| parse_font_paths(&v))
                .unwrap_or_default(),
            session_idle_timeout: match lookup("SESSION_IDLE_TIMEOUT_SECS") {
                Some(secs) => Duration::from_secs(
                    secs.trim()
                        .parse::<u64>()
                        .context("SESSION_IDLE_TIMEOUT_SECS must be a whole number of seconds")?,
                ),
                None => DEFAULT_IDLE_TIMEOUT,
            },
        })
    }

    /// Reads every configured font file. A missing file is a startup error.
    pub fn load_fonts(&self) -> Result<Vec<Vec<u8>>> {
        self.font_paths
            .iter()
            .map(|path| {
                std::fs::read(path)
                    .with_context(|| format!("Failed to read font file '{}'", path.display()))
            })
            .collect()
    }
}

fn require<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_font_paths(value: &str) -> Vec<PathBuf> {
    value
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .collect()
}
