//! Core domain entities.
//!
//! - [`OfferIdentity`] / [`OfferSet`] - checkout-link path
//! - [`CatalogRecord`] - decoded catalog payload element
//! - [`NormalizedOffer`], [`FeedGroup`], [`FeedEntry`], [`FeedChannel`] - feed path
//! - [`Storefront`] - public URL layout
//!
//! The two paths share the `(namespace, id)` key but are never merged into
//! one structure.

pub mod catalog;
pub mod feed;
pub mod offer;
pub mod storefront;

pub use catalog::CatalogRecord;
pub use feed::{FeedChannel, FeedEntry, FeedGroup, NormalizedOffer};
pub use offer::{OfferIdentity, OfferSet};
pub use storefront::Storefront;
