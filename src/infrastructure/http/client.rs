//! reqwest-backed payload fetcher.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, header};
use serde_json::{Value, json};
use tracing::debug;

use crate::config::Config;
use crate::domain::gateways::PayloadFetcher;
use crate::error::{AppError, map_reqwest_error};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                          AppleWebKit/537.36 (KHTML, like Gecko) \
                          Chrome/124.0.0.0 Safari/537.36";

/// Builds the shared client used by every fetcher of a run.
///
/// # Errors
///
/// Returns [`AppError::Transport`] if the TLS backend cannot be initialized.
pub fn build_client(timeout: Duration) -> Result<Client, AppError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| AppError::transport("Failed to build HTTP client", json!({ "reason": e.to_string() })))
}

/// GETs one JSON document from a fixed URL and query string.
///
/// No retries: a failed request fails the source for this run.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    url: String,
    query: Vec<(String, String)>,
}

impl HttpFetcher {
    pub fn new(client: Client, url: impl Into<String>, query: Vec<(String, String)>) -> Self {
        Self {
            client,
            url: url.into(),
            query,
        }
    }

    /// Fetcher for the catalog promotions endpoint.
    pub fn catalog(client: Client, config: &Config) -> Self {
        Self::new(
            client,
            &config.catalog_api_url,
            vec![
                ("locale".to_string(), config.locale.clone()),
                ("country".to_string(), config.country.clone()),
                ("allowCountries".to_string(), config.country.clone()),
            ],
        )
    }

    /// Fetcher for the mobile discover endpoint of one platform.
    pub fn discover(client: Client, config: &Config, platform: &str) -> Self {
        Self::new(
            client,
            &config.discover_api_url,
            vec![
                ("count".to_string(), config.discover_count.to_string()),
                ("country".to_string(), config.country.clone()),
                ("locale".to_string(), config.language().to_string()),
                ("platform".to_string(), platform.to_string()),
                ("start".to_string(), "0".to_string()),
                ("store".to_string(), "EGS".to_string()),
            ],
        )
    }

    /// Fetcher for the archive list.
    pub fn archive(client: Client, config: &Config) -> Self {
        Self::new(client, &config.archive_list_url, Vec::new())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }
}

#[async_trait]
impl PayloadFetcher for HttpFetcher {
    async fn fetch(&self) -> Result<Value, AppError> {
        debug!(url = %self.url, "Fetching payload");

        let response = self
            .client
            .get(&self.url)
            .query(&self.query)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?
            .error_for_status()
            .map_err(map_reqwest_error)?;

        response.json::<Value>().await.map_err(map_reqwest_error)
    }

    fn endpoint(&self) -> String {
        self.url.clone()
    }
}
