//! # Free Offers
//!
//! Discovers the offers a storefront is currently giving away, across the
//! desktop catalog API and the mobile discover APIs, and turns them into
//! two artifacts:
//!
//! - a single deterministic checkout link covering every discovered offer
//! - an RSS feed grouping offers by promotion start date, with entry GUIDs
//!   that stay stable across runs
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Entities and gateway traits
//! - **Application Layer** ([`application`]) - Extraction, deduplication,
//!   checkout links and feed grouping
//! - **Infrastructure Layer** ([`infrastructure`]) - HTTP fetching and RSS rendering
//!
//! ## Quick Start
//!
//! ```bash
//! # Combined checkout link
//! cargo run -- checkout
//!
//! # Promotion feed
//! cargo run -- feed --output epicFreeGames.xml
//! ```
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub mod config;

pub use error::AppError;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        CheckoutLink, CheckoutUrlBuilder, CollectionReport, EntryBuilder, FeedGrouper,
        FeedService, OfferCollector, OfferSource, PayloadKind,
    };
    pub use crate::domain::entities::{
        CatalogRecord, FeedChannel, FeedEntry, OfferIdentity, OfferSet, Storefront,
    };
    pub use crate::domain::gateways::{FeedRenderer, PayloadFetcher};
    pub use crate::error::AppError;
}
