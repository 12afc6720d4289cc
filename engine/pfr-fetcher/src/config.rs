//! Fetcher configuration

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use stat_pipeline::PipelineConfig;

/// Default root of the team pages
pub const DEFAULT_BASE_URL: &str = "https://www.pro-football-reference.com/teams";

/// Configuration for a fetch run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Root URL; pages live at `<base_url>/<site_key>/<year>.htm`
    pub base_url: String,

    /// Directory holding `fetched_pages/`, `parsed_tables/` and `final/`
    pub output_dir: PathBuf,

    /// User agent sent with every request
    pub user_agent: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Lower bound of the pause between fetches
    pub min_delay_ms: u64,

    /// Upper bound of the pause between fetches
    pub max_delay_ms: u64,

    /// Log level used when `RUST_LOG` is unset
    pub log_level: String,

    /// Extraction and scoring settings
    pub pipeline: PipelineConfig,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: PathBuf::from("."),
            user_agent: concat!("fffetch/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 30,
            min_delay_ms: 2000,
            max_delay_ms: 2500,
            log_level: "info".to_string(),
            pipeline: PipelineConfig::default(),
        }
    }
}

impl FetcherConfig {
    /// Load defaults, then the optional TOML file, then environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Read a TOML file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Apply `FFFETCH_*` overrides from `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup("FFFETCH_BASE_URL") {
            self.base_url = base_url;
        }

        if let Some(output_dir) = lookup("FFFETCH_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(output_dir);
        }

        if let Some(level) = lookup("FFFETCH_LOG_LEVEL") {
            self.log_level = level;
        }

        if let Some(ms) = lookup("FFFETCH_MIN_DELAY_MS") {
            self.min_delay_ms = ms.parse().context("FFFETCH_MIN_DELAY_MS must be an integer")?;
        }

        if let Some(ms) = lookup("FFFETCH_MAX_DELAY_MS") {
            self.max_delay_ms = ms.parse().context("FFFETCH_MAX_DELAY_MS must be an integer")?;
        }

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.min_delay_ms > self.max_delay_ms {
            return Err(format!(
                "min_delay_ms ({}) must not exceed max_delay_ms ({})",
                self.min_delay_ms, self.max_delay_ms
            ));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => return Err(format!("Invalid log level: {other}")),
        }

        self.pipeline.validate()
    }

    /// Raw page cache directory
    pub fn pages_dir(&self) -> PathBuf {
        self.output_dir.join("fetched_pages")
    }

    /// Cached page of one team season
    pub fn page_path(&self, team: &str, year: u16) -> PathBuf {
        self.pages_dir().join(format!("{team}_{year}.html"))
    }
}
