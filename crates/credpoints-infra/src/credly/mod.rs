//! Credly badge fetcher.
//!
//! GETs `{base_url}/badges/{id}` with a bounded timeout and parses the page
//! markup. Nothing is cached; every call hits the network.

pub mod parse;

use std::time::Duration;

use credpoints_core::badge::{BadgeFetcher, extract_badge_id};
use credpoints_types::badge::BadgeSnapshot;
use credpoints_types::config::FetcherConfig;
use credpoints_types::error::FetchError;
use tracing::debug;

pub use parse::{parse_badge_date, parse_badge_html};

pub struct CredlyBadgeFetcher {
    http: reqwest::Client,
    base_url: String,
    timeout_secs: u64,
}

impl CredlyBadgeFetcher {
    pub fn new(config: &FetcherConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| FetchError::Unreachable(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_secs: config.timeout_secs,
        })
    }

    /// Canonical page URL for a badge identifier.
    pub fn badge_url(&self, badge_id: &str) -> String {
        format!("{}/badges/{}", self.base_url, badge_id)
    }

    fn map_request_error(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout(self.timeout_secs)
        } else {
            FetchError::Unreachable(e.to_string())
        }
    }
}

impl BadgeFetcher for CredlyBadgeFetcher {
    #[tracing::instrument(name = "badge.fetch", skip(self))]
    async fn fetch(&self, badge_url_or_id: &str) -> Result<BadgeSnapshot, FetchError> {
        let badge_id = extract_badge_id(badge_url_or_id)?;
        let url = self.badge_url(&badge_id);
        debug!(%url, "fetching badge page");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let html = response.text().await.map_err(|e| self.map_request_error(e))?;
        let snapshot = parse_badge_html(&badge_id, &html)?;
        debug!(
            cert_name = %snapshot.cert_name,
            expires_on = ?snapshot.expires_on,
            "badge page parsed"
        );
        Ok(snapshot)
    }
}
