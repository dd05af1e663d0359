//! Feed generation: fetch a payload, build entries, render, publish.

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::application::services::archive_feed::ArchiveFeedBuilder;
use crate::application::services::catalog_extractor::catalog_records;
use crate::application::services::feed_grouper::FeedGrouper;
use crate::domain::entities::{FeedChannel, FeedEntry, Storefront};
use crate::domain::gateways::{FeedRenderer, PayloadFetcher};
use crate::error::{AppError, map_io_error};

/// Which entry builder a feed uses.
#[derive(Debug, Clone)]
pub enum EntryBuilder {
    /// Promotion feed from the catalog payload.
    Catalog(FeedGrouper),
    /// Trailing-window feed from the archive list.
    Archive(ArchiveFeedBuilder),
}

impl EntryBuilder {
    /// # Errors
    ///
    /// Returns [`AppError::Malformed`] if the payload lacks the expected
    /// top-level shape.
    pub fn entries(&self, payload: &Value) -> Result<Vec<FeedEntry>, AppError> {
        match self {
            EntryBuilder::Catalog(grouper) => Ok(grouper.build_entries(&catalog_records(payload)?)),
            EntryBuilder::Archive(builder) => builder.build_entries(payload),
        }
    }
}

/// A rendered feed document.
#[derive(Debug, Clone)]
pub struct FeedDocument {
    pub entries: usize,
    pub body: String,
}

/// Channel metadata for the promotion feed.
pub fn catalog_channel(storefront: &Storefront, title: &str) -> FeedChannel {
    FeedChannel {
        title: title.to_string(),
        link: storefront.page_base(),
        description: format!("Automatically generated feed of {title}"),
        language: "en".to_string(),
    }
}

/// Channel metadata for the archive feed.
pub fn archive_channel(storefront: &Storefront, title: &str, window_days: u32) -> FeedChannel {
    FeedChannel {
        title: format!("{title} ({window_days} days)"),
        link: storefront.home_url(),
        description: format!("{title} grouped by free date (last {window_days} days)"),
        language: "en".to_string(),
    }
}

/// Orchestrates one feed run.
pub struct FeedService {
    fetcher: Arc<dyn PayloadFetcher>,
    renderer: Arc<dyn FeedRenderer>,
    builder: EntryBuilder,
    channel: FeedChannel,
}

impl FeedService {
    pub fn new(
        fetcher: Arc<dyn PayloadFetcher>,
        renderer: Arc<dyn FeedRenderer>,
        builder: EntryBuilder,
        channel: FeedChannel,
    ) -> Self {
        Self {
            fetcher,
            renderer,
            builder,
            channel,
        }
    }

    /// Fetches the source payload and renders the feed.
    ///
    /// # Errors
    ///
    /// Propagates fetch, shape and render errors. There is only one source,
    /// so a failure here has nothing to fall back to.
    pub async fn build(&self) -> Result<FeedDocument, AppError> {
        let payload = self.fetcher.fetch().await?;
        let entries = self.builder.entries(&payload)?;

        info!(
            endpoint = %self.fetcher.endpoint(),
            entries = entries.len(),
            "Feed entries built"
        );

        let body = self.renderer.render(&self.channel, &entries)?;

        Ok(FeedDocument {
            entries: entries.len(),
            body,
        })
    }

    /// Builds the feed and writes it to `path`.
    ///
    /// # Errors
    ///
    /// See [`Self::build`]; returns [`AppError::Io`] if the write fails.
    pub async fn publish(&self, path: &str) -> Result<FeedDocument, AppError> {
        let document = self.build().await?;
        tokio::fs::write(path, &document.body)
            .await
            .map_err(|e| map_io_error(e, path))?;
        info!(path, entries = document.entries, "Feed written");
        Ok(document)
    }
}
