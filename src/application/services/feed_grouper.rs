//! Groups free catalog records by promotion start date into feed entries.
//!
//! # Pipeline
//!
//! 1. Keep `ACTIVE` records whose total-price discount is zero
//! 2. Emit one [`NormalizedOffer`] per promotional offer carrying a start date
//! 3. Drop records without a resolvable page slug
//! 4. Group by the *literal* start-date string
//! 5. Render each group, sort newest first by the *parsed* start date,
//!    truncate to the configured maximum
//!
//! Grouping and sorting deliberately use different keys: two strings naming
//! the same instant in different formats form two groups.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use quick_xml::escape::escape;
use tracing::warn;

use crate::application::services::checkout::CheckoutUrlBuilder;
use crate::domain::entities::{
    CatalogRecord, FeedEntry, FeedGroup, NormalizedOffer, Storefront,
};

pub const DEFAULT_MAX_ITEMS: usize = 30;

const UNKNOWN_TITLE: &str = "Unknown Game";
const CHECKOUT_LABEL: &str = "Checkout all free games";

/// Escapes text for an HTML description body.
///
/// Apostrophes become `&#x27;` since `&apos;` is not an HTML 4 entity.
pub fn escape_html(raw: &str) -> String {
    escape(raw).replace("&apos;", "&#x27;")
}

/// Turns free, active catalog records into one offer per promotion start date.
pub fn normalize_records(records: &[CatalogRecord], storefront: &Storefront) -> Vec<NormalizedOffer> {
    let mut offers = Vec::new();

    for record in records {
        if !record.is_active() || !record.is_free() {
            continue;
        }

        for start_date in record.promotion_start_dates() {
            let Some(slug) = record.page_slug() else {
                continue;
            };

            offers.push(NormalizedOffer {
                title: record
                    .title
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
                page_link: storefront.page_url(slug),
                namespace: record.resolved_namespace().map(str::to_string),
                id: record.resolved_id().map(str::to_string),
                checkout: record.own_identity(),
                start_date: start_date.to_string(),
            });
        }
    }

    offers
}

/// Partitions offers by literal start date, keeping first-seen order for
/// both groups and members.
pub fn group_by_start_date(offers: Vec<NormalizedOffer>) -> Vec<FeedGroup> {
    let mut groups: Vec<FeedGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for offer in offers {
        match index.get(&offer.start_date) {
            Some(&slot) => groups[slot].members.push(offer),
            None => {
                index.insert(offer.start_date.clone(), groups.len());
                groups.push(FeedGroup {
                    start_date: offer.start_date.clone(),
                    members: vec![offer],
                });
            }
        }
    }

    groups
}

/// `"A"`, `"A, B"` or `"A, B and more"` from the group's distinct titles.
pub fn group_title(group: &FeedGroup) -> String {
    let mut titles: Vec<&str> = Vec::new();
    for member in &group.members {
        if !titles.contains(&member.title.as_str()) {
            titles.push(&member.title);
        }
    }

    let mut title = titles.iter().take(2).copied().collect::<Vec<_>>().join(", ");
    if titles.len() > 2 {
        title.push_str(" and more");
    }
    title
}

/// Parses a promotion start date into a UTC instant.
///
/// Accepts RFC 3339 (`2024-01-01T16:00:00.000Z`) and, as a fallback, an
/// offset-less timestamp which is taken to be UTC.
pub fn parse_start_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Builds ordered feed entries from catalog records.
#[derive(Debug, Clone)]
pub struct FeedGrouper {
    storefront: Storefront,
    checkout: CheckoutUrlBuilder,
    max_items: usize,
}

impl FeedGrouper {
    pub fn new(storefront: Storefront, max_items: usize) -> Self {
        Self {
            checkout: CheckoutUrlBuilder::new(storefront.clone()),
            storefront,
            max_items,
        }
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }

    /// Runs the full pipeline: filter, group, render, sort, truncate.
    ///
    /// Groups whose start date cannot be parsed are dropped with a warning.
    pub fn build_entries(&self, records: &[CatalogRecord]) -> Vec<FeedEntry> {
        let groups = group_by_start_date(normalize_records(records, &self.storefront));

        let mut entries: Vec<FeedEntry> = groups
            .iter()
            .filter_map(|group| self.entry_for(group))
            .collect();

        entries.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        entries.truncate(self.max_items);
        entries
    }

    /// Renders one group, or `None` if its start date does not parse.
    pub fn entry_for(&self, group: &FeedGroup) -> Option<FeedEntry> {
        let Some(published_at) = parse_start_date(&group.start_date) else {
            warn!(start_date = %group.start_date, "Dropping feed group with unparseable start date");
            return None;
        };

        let mut lines = Vec::new();
        let mut links: Vec<&str> = Vec::new();

        for member in group.members.iter().filter(|m| m.has_identity()) {
            lines.push(format!(
                "{}: <a href=\"{}\">Link</a>",
                escape_html(&member.title),
                member.page_link
            ));
            links.push(&member.page_link);
        }

        if !links.is_empty() {
            let checkout = self
                .checkout
                .build_in_order(group.members.iter().filter_map(|m| m.checkout.as_ref()));

            if let Some(url) = checkout.url() {
                lines.push(format!("<br><a href=\"{url}\">{CHECKOUT_LABEL}</a>"));
            }
        }

        let link = links
            .first()
            .map(|l| l.to_string())
            .unwrap_or_else(|| self.storefront.page_base());

        Some(FeedEntry {
            guid: format!("{}|{}", links.join("|"), group.start_date),
            title: group_title(group),
            link,
            description: lines.join("<br>"),
            published_at,
        })
    }
}
