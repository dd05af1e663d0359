//! Feed-side entities: normalized offers, date groups, and rendered entries.

use chrono::{DateTime, Utc};

use super::offer::OfferIdentity;

/// A free catalog record paired with one of its promotion start dates.
///
/// A record with several promotional offers yields one `NormalizedOffer`
/// per start date.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedOffer {
    pub title: String,
    pub page_link: String,
    /// Namespace after falling back to the first sub-item.
    pub namespace: Option<String>,
    /// Id after falling back to the first sub-item.
    pub id: Option<String>,
    /// The record's own identity, without sub-item fallback.
    pub checkout: Option<OfferIdentity>,
    /// Literal start-date string as supplied by the source.
    pub start_date: String,
}

impl NormalizedOffer {
    /// True when both namespace and id could be resolved.
    pub fn has_identity(&self) -> bool {
        self.namespace.is_some() && self.id.is_some()
    }
}

/// Offers sharing an identical literal start-date string, in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedGroup {
    pub start_date: String,
    pub members: Vec<NormalizedOffer>,
}

/// One syndication item, ready for a renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEntry {
    pub guid: String,
    pub title: String,
    pub link: String,
    /// HTML fragment.
    pub description: String,
    pub published_at: DateTime<Utc>,
}

/// Channel-level metadata for a rendered feed document.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedChannel {
    pub title: String,
    pub link: String,
    pub description: String,
    pub language: String,
}
