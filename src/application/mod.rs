//! Application layer services implementing the offer pipeline.
//!
//! Services consume the domain gateway traits and never touch HTTP or XML
//! directly, so every stage can be exercised with in-memory payloads.
//!
//! # Available Services
//!
//! - [`services::offer_collector::OfferCollector`] - Multi-source offer collection
//! - [`services::checkout::CheckoutUrlBuilder`] - Combined checkout links
//! - [`services::feed_grouper::FeedGrouper`] - Date-grouped feed entries
//! - [`services::feed_service::FeedService`] - Feed fetch/render/publish runs

pub mod services;
