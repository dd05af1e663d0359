//! Business logic services for the application layer.
//!
//! - [`offer_scanner`] - shape-agnostic discover payload scanning
//! - [`catalog_extractor`] - catalog payload decoding and free-offer extraction
//! - [`offer_collector`] - multi-source collection and offer set union
//! - [`checkout`] - combined checkout link construction
//! - [`feed_grouper`] - date-grouped promotion feed entries
//! - [`archive_feed`] - trailing-window archive feed entries
//! - [`feed_service`] - fetch, build, render and publish a feed

pub mod archive_feed;
pub mod catalog_extractor;
pub mod checkout;
pub mod feed_grouper;
pub mod feed_service;
pub mod offer_collector;
pub mod offer_scanner;

pub use checkout::{CheckoutLink, CheckoutUrlBuilder};
pub use feed_grouper::FeedGrouper;
pub use feed_service::{EntryBuilder, FeedDocument, FeedService};
pub use offer_collector::{CollectionReport, OfferCollector, OfferSource, PayloadKind, SourceOutcome};
