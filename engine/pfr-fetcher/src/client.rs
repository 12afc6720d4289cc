//! Team page fetching

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, info};

use crate::config::FetcherConfig;
use crate::error::FetchError;
use crate::teams::Team;

/// Anything that can produce the raw page of a team season
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the page HTML for `team` in `year`
    async fn fetch_page(&self, team: &Team, year: u16) -> Result<String, FetchError>;
}

/// Page URL of a team season
pub fn page_url(base_url: &str, site_key: &str, year: u16) -> String {
    format!("{}/{site_key}/{year}.htm", base_url.trim_end_matches('/'))
}

/// Pro Football Reference HTTP client
pub struct PfrClient {
    client: Client,
    base_url: String,
}

impl PfrClient {
    /// Create a new client from the fetch configuration
    pub fn new(config: &FetcherConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, base_url: config.base_url.clone() })
    }
}

/// Map a response status to a fetch outcome
pub fn check_status(
    status: StatusCode,
    team: &Team,
    year: u16,
    url: &str,
) -> Result<(), FetchError> {
    match status {
        StatusCode::OK => Ok(()),
        StatusCode::TOO_MANY_REQUESTS => Err(FetchError::RateLimited { url: url.to_string() }),
        StatusCode::NOT_FOUND => Err(FetchError::NotFound { team: team.code.to_string(), year }),
        other => Err(FetchError::UnexpectedStatus { status: other.as_u16(), url: url.to_string() }),
    }
}

#[async_trait]
impl PageSource for PfrClient {
    async fn fetch_page(&self, team: &Team, year: u16) -> Result<String, FetchError> {
        let url = page_url(&self.base_url, team.site_key, year);
        info!(team = team.code, year, %url, "fetching page");

        let response = self.client.get(&url).send().await?;
        check_status(response.status(), team, year, &url)?;

        let html = response.text().await?;
        debug!(team = team.code, year, bytes = html.len(), "fetched page");
        Ok(html)
    }
}
