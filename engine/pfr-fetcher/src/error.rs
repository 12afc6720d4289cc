//! Error types for page fetching

use thiserror::Error;

/// Errors returned by a page source
#[derive(Error, Debug)]
pub enum FetchError {
    /// The site asked us to slow down
    #[error("Rate limited while fetching {url}")]
    RateLimited { url: String },

    /// No page exists for the team and season
    #[error("No page for {team} {year}")]
    NotFound { team: String, year: u16 },

    /// Any other non-success status
    #[error("Unexpected status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// Transport failures from the HTTP client
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl FetchError {
    /// True when waiting before the next request could help
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}
