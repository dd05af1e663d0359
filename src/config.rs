//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before any source
//! is queried. Every variable is optional.
//!
//! ## Endpoints
//!
//! ```bash
//! export STOREFRONT="epicgames"
//! export CATALOG_API_URL="https://store-site-backend-static.ak.epicgames.com/freeGamesPromotions"
//! export DISCOVER_API_URL="https://egs-platform-service.store.epicgames.com/api/v2/public/discover/home"
//! export DISCOVER_PLATFORMS="android,ios"
//! export ARCHIVE_LIST_URL="https://raw.githubusercontent.com/.../epic_free_games.json"
//! ```
//!
//! ## Optional Variables
//!
//! - `LOCALE` / `COUNTRY` - Request locale and country (default: `en-US` / `US`)
//! - `DISCOVER_COUNT` - Modules requested per discover call (default: 10)
//! - `HTTP_TIMEOUT_SECONDS` - Per-request timeout (default: 15)
//! - `FEED_TITLE` - Channel title (default: `Epic Free Games`)
//! - `FEED_OUTPUT_PATH` / `FEED_MAX_ITEMS` - Promotion feed file and size (default: 30)
//! - `ARCHIVE_OUTPUT_PATH` / `ARCHIVE_WINDOW_DAYS` - Archive feed file and window (default: 30)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;
use url::Url;

use crate::application::services::archive_feed::DEFAULT_WINDOW_DAYS;
use crate::application::services::feed_grouper::DEFAULT_MAX_ITEMS;
use crate::domain::entities::Storefront;

const DEFAULT_CATALOG_API_URL: &str =
    "https://store-site-backend-static.ak.epicgames.com/freeGamesPromotions";
const DEFAULT_DISCOVER_API_URL: &str =
    "https://egs-platform-service.store.epicgames.com/api/v2/public/discover/home";
const DEFAULT_ARCHIVE_LIST_URL: &str = "https://raw.githubusercontent.com/josephmate/EpicFreeGamesList/refs/heads/main/epic_free_games.json";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Storefront name used to build public URLs (`https://store.<name>.com`).
    pub storefront: String,
    pub catalog_api_url: String,
    pub discover_api_url: String,
    /// One discover source is queried per platform.
    pub discover_platforms: Vec<String>,
    pub discover_count: u32,
    pub locale: String,
    pub country: String,
    pub http_timeout_seconds: u64,
    pub feed_title: String,
    pub feed_output_path: String,
    pub feed_max_items: usize,
    pub archive_list_url: String,
    /// Listings older than this many days are left out of the archive feed.
    pub archive_window_days: u32,
    pub archive_output_path: String,
    pub log_level: String,
    pub log_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storefront: "epicgames".to_string(),
            catalog_api_url: DEFAULT_CATALOG_API_URL.to_string(),
            discover_api_url: DEFAULT_DISCOVER_API_URL.to_string(),
            discover_platforms: vec!["android".to_string(), "ios".to_string()],
            discover_count: 10,
            locale: "en-US".to_string(),
            country: "US".to_string(),
            http_timeout_seconds: 15,
            feed_title: "Epic Free Games".to_string(),
            feed_output_path: "epicFreeGames.xml".to_string(),
            feed_max_items: DEFAULT_MAX_ITEMS,
            archive_list_url: DEFAULT_ARCHIVE_LIST_URL.to_string(),
            archive_window_days: DEFAULT_WINDOW_DAYS,
            archive_output_path: "epic_free_games.xml".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}

fn parsed_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Config {
    /// Loads configuration from environment variables, falling back to
    /// [`Config::default`] for anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let discover_platforms = env::var("DISCOVER_PLATFORMS")
            .map(|v| parse_list(&v))
            .unwrap_or(defaults.discover_platforms);

        Self {
            storefront: env::var("STOREFRONT").unwrap_or(defaults.storefront),
            catalog_api_url: env::var("CATALOG_API_URL").unwrap_or(defaults.catalog_api_url),
            discover_api_url: env::var("DISCOVER_API_URL").unwrap_or(defaults.discover_api_url),
            discover_platforms,
            discover_count: parsed_var("DISCOVER_COUNT").unwrap_or(defaults.discover_count),
            locale: env::var("LOCALE").unwrap_or(defaults.locale),
            country: env::var("COUNTRY").unwrap_or(defaults.country),
            http_timeout_seconds: parsed_var("HTTP_TIMEOUT_SECONDS")
                .unwrap_or(defaults.http_timeout_seconds),
            feed_title: env::var("FEED_TITLE").unwrap_or(defaults.feed_title),
            feed_output_path: env::var("FEED_OUTPUT_PATH").unwrap_or(defaults.feed_output_path),
            feed_max_items: parsed_var("FEED_MAX_ITEMS").unwrap_or(defaults.feed_max_items),
            archive_list_url: env::var("ARCHIVE_LIST_URL").unwrap_or(defaults.archive_list_url),
            archive_window_days: parsed_var("ARCHIVE_WINDOW_DAYS")
                .unwrap_or(defaults.archive_window_days),
            archive_output_path: env::var("ARCHIVE_OUTPUT_PATH")
                .unwrap_or(defaults.archive_output_path),
            log_level: env::var("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: env::var("LOG_FORMAT").unwrap_or(defaults.log_format),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - any endpoint is not an absolute `http(s)` URL
    /// - `storefront` or the platform list is empty
    /// - `http_timeout_seconds` is outside 1..=300
    /// - `feed_max_items`, `discover_count` or `archive_window_days` is zero
    /// - `log_format` is not `text` or `json`
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("CATALOG_API_URL", &self.catalog_api_url),
            ("DISCOVER_API_URL", &self.discover_api_url),
            ("ARCHIVE_LIST_URL", &self.archive_list_url),
        ] {
            validate_endpoint(value).with_context(|| format!("{name} is invalid"))?;
        }

        if self.storefront.trim().is_empty()
            || !self
                .storefront
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            anyhow::bail!(
                "STOREFRONT must be a non-empty host label, got '{}'",
                self.storefront
            );
        }

        if self.discover_platforms.is_empty() {
            anyhow::bail!("DISCOVER_PLATFORMS must list at least one platform");
        }

        if self.discover_count == 0 {
            anyhow::bail!("DISCOVER_COUNT must be greater than 0");
        }

        if self.http_timeout_seconds == 0 || self.http_timeout_seconds > 300 {
            anyhow::bail!(
                "HTTP_TIMEOUT_SECONDS must be between 1 and 300, got {}",
                self.http_timeout_seconds
            );
        }

        if self.feed_max_items == 0 {
            anyhow::bail!("FEED_MAX_ITEMS must be at least 1");
        }

        if self.archive_window_days == 0 {
            anyhow::bail!("ARCHIVE_WINDOW_DAYS must be at least 1");
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        Ok(())
    }

    pub fn storefront(&self) -> Storefront {
        Storefront::new(self.storefront.clone())
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_seconds)
    }

    /// Language part of the locale (`en-US` → `en`), as the discover API expects.
    pub fn language(&self) -> &str {
        self.locale.split(['-', '_']).next().unwrap_or(&self.locale)
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Storefront: {}", self.storefront);
        tracing::info!("  Catalog API: {}", self.catalog_api_url);
        tracing::info!(
            "  Discover API: {} ({})",
            self.discover_api_url,
            self.discover_platforms.join(", ")
        );
        tracing::info!("  Locale/country: {}/{}", self.locale, self.country);
        tracing::info!("  HTTP timeout: {}s", self.http_timeout_seconds);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Splits a comma-separated list, dropping blanks.
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn validate_endpoint(raw: &str) -> Result<()> {
    let url = Url::parse(raw).with_context(|| format!("'{raw}' is not a valid URL"))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => anyhow::bail!("unsupported scheme '{scheme}' in '{raw}'"),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env();
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_list("android, ios,,"), vec!["android", "ios"]);
        assert!(parse_list(" , ").is_empty());
    }

    #[test]
    fn test_language() {
        let mut config = Config::default();
        assert_eq!(config.language(), "en");

        config.locale = "pt_BR".to_string();
        assert_eq!(config.language(), "pt");

        config.locale = "de".to_string();
        assert_eq!(config.language(), "de");
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        assert!(config.validate().is_ok());

        config.http_timeout_seconds = 0;
        assert!(config.validate().is_err());

        config.http_timeout_seconds = 15;

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.catalog_api_url = "ftp://example.com/promotions".to_string();
        assert!(config.validate().is_err());

        config.catalog_api_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.catalog_api_url = DEFAULT_CATALOG_API_URL.to_string();

        config.storefront = "epic games".to_string();
        assert!(config.validate().is_err());

        config.storefront = "epicgames".to_string();

        config.discover_platforms.clear();
        assert!(config.validate().is_err());

        config.discover_platforms = vec!["android".to_string()];

        config.feed_max_items = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("STOREFRONT", "example");
            env::set_var("DISCOVER_PLATFORMS", "ios");
            env::set_var("FEED_MAX_ITEMS", "5");
            env::set_var("ARCHIVE_WINDOW_DAYS", "7");
        }

        let config = Config::from_env();

        assert_eq!(config.storefront, "example");
        assert_eq!(config.discover_platforms, vec!["ios"]);
        assert_eq!(config.feed_max_items, 5);
        assert_eq!(config.archive_window_days, 7);
        assert_eq!(config.storefront().home_url(), "https://store.example.com/");

        // Cleanup
        unsafe {
            env::remove_var("STOREFRONT");
            env::remove_var("DISCOVER_PLATFORMS");
            env::remove_var("FEED_MAX_ITEMS");
            env::remove_var("ARCHIVE_WINDOW_DAYS");
        }
    }

    #[test]
    #[serial]
    fn test_unparseable_numbers_fall_back_to_defaults() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("FEED_MAX_ITEMS", "lots");
            env::set_var("HTTP_TIMEOUT_SECONDS", "-1");
        }

        let config = Config::from_env();

        assert_eq!(config.feed_max_items, DEFAULT_MAX_ITEMS);
        assert_eq!(config.http_timeout_seconds, 15);

        // Cleanup
        unsafe {
            env::remove_var("FEED_MAX_ITEMS");
            env::remove_var("HTTP_TIMEOUT_SECONDS");
        }
    }

    #[test]
    #[serial]
    fn test_load_from_env_rejects_bad_endpoint() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("DISCOVER_API_URL", "mailto:someone@example.com");
        }

        assert!(load_from_env().is_err());

        // Cleanup
        unsafe {
            env::remove_var("DISCOVER_API_URL");
        }
    }
}
