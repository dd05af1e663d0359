//! Trailing-window feed over a community-maintained list of past giveaways.
//!
//! The list is a flat JSON array of
//! `{ gameTitle, freeDate: "YYYY-MM-DD", epicStoreLink, platform }` objects.
//! Only dates inside the trailing window are kept; nothing is persisted.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::application::services::feed_grouper::escape_html;
use crate::domain::entities::FeedEntry;
use crate::error::AppError;

pub const DEFAULT_WINDOW_DAYS: u32 = 30;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ArchiveListing {
    pub game_title: Option<String>,
    pub free_date: Option<String>,
    pub epic_store_link: Option<String>,
    pub platform: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
struct ArchiveItem {
    title: String,
    platform: String,
    link: String,
}

/// Builds date-grouped entries for the last `window_days` days.
#[derive(Debug, Clone)]
pub struct ArchiveFeedBuilder {
    window_days: u32,
}

impl ArchiveFeedBuilder {
    pub fn new(window_days: u32) -> Self {
        Self { window_days }
    }

    pub fn window_days(&self) -> u32 {
        self.window_days
    }

    /// Builds entries relative to today's UTC date.
    ///
    /// # Errors
    ///
    /// See [`Self::build_entries_at`].
    pub fn build_entries(&self, payload: &Value) -> Result<Vec<FeedEntry>, AppError> {
        self.build_entries_at(payload, Utc::now().date_naive())
    }

    /// Builds entries relative to `today`.
    ///
    /// Listings missing a title, date or link, or carrying an unparseable
    /// date, are skipped. Dates before `today - window_days` are dropped.
    /// Groups are ordered newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Malformed`] if the payload is not an array.
    pub fn build_entries_at(
        &self,
        payload: &Value,
        today: NaiveDate,
    ) -> Result<Vec<FeedEntry>, AppError> {
        let listings = payload.as_array().ok_or_else(|| {
            AppError::malformed("Archive list is not an array", json!({}))
        })?;

        let cutoff = today - Duration::days(i64::from(self.window_days));

        // ISO dates order lexically, so the map iterates oldest first.
        let mut grouped: BTreeMap<String, (NaiveDate, Vec<ArchiveItem>)> = BTreeMap::new();

        for listing in listings {
            let Ok(listing) = ArchiveListing::deserialize(listing) else {
                debug!("Skipping undecodable archive listing");
                continue;
            };

            let (Some(title), Some(free_date), Some(link)) = (
                listing.game_title.filter(|s| !s.is_empty()),
                listing.free_date.filter(|s| !s.is_empty()),
                listing.epic_store_link.filter(|s| !s.is_empty()),
            ) else {
                continue;
            };

            let Ok(date) = NaiveDate::parse_from_str(&free_date, "%Y-%m-%d") else {
                debug!(free_date = %free_date, "Skipping archive listing with bad date");
                continue;
            };

            if date < cutoff {
                continue;
            }

            grouped
                .entry(free_date)
                .or_insert_with(|| (date, Vec::new()))
                .1
                .push(ArchiveItem {
                    title,
                    platform: listing.platform.unwrap_or_default().to_lowercase(),
                    link,
                });
        }

        Ok(grouped
            .into_iter()
            .rev()
            .map(|(free_date, (date, items))| archive_entry(&free_date, date, &items))
            .collect())
    }
}

impl Default for ArchiveFeedBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_DAYS)
    }
}

fn archive_entry(free_date: &str, date: NaiveDate, items: &[ArchiveItem]) -> FeedEntry {
    let mut titles: Vec<&str> = Vec::new();
    for item in items {
        if !titles.contains(&item.title.as_str()) {
            titles.push(&item.title);
        }
    }

    let lines: Vec<String> = items
        .iter()
        .map(|item| {
            format!(
                "{} - {}: <a href=\"{}\">Link</a>",
                escape_html(&item.title),
                item.platform,
                item.link
            )
        })
        .collect();

    let links: Vec<&str> = items.iter().map(|item| item.link.as_str()).collect();

    FeedEntry {
        guid: format!("{}|{}", links.join("|"), free_date),
        title: titles
            .iter()
            .map(|t| format!("\"{t}\""))
            .collect::<Vec<_>>()
            .join(", "),
        link: links.first().map(|l| l.to_string()).unwrap_or_default(),
        description: lines.join("<br>"),
        published_at: date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()
    }

    fn listing(title: &str, date: &str, link: &str, platform: &str) -> Value {
        json!({ "gameTitle": title, "freeDate": date, "epicStoreLink": link, "platform": platform })
    }

    #[test]
    fn test_groups_by_date_newest_first() {
        let payload = json!([
            listing("A", "2024-03-01", "https://x/a", "PC"),
            listing("B", "2024-03-20", "https://x/b", "Android"),
            listing("C", "2024-03-01", "https://x/c", "iOS"),
        ]);

        let entries = ArchiveFeedBuilder::default()
            .build_entries_at(&payload, today())
            .unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "\"B\"");
        assert_eq!(entries[1].title, "\"A\", \"C\"");
        assert_eq!(entries[1].guid, "https://x/a|https://x/c|2024-03-01");
        assert_eq!(entries[1].link, "https://x/a");
        assert_eq!(
            entries[1].description,
            "A - pc: <a href=\"https://x/a\">Link</a><br>C - ios: <a href=\"https://x/c\">Link</a>"
        );
        assert_eq!(
            entries[0].published_at,
            NaiveDate::from_ymd_opt(2024, 3, 20)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
                .and_utc()
        );
    }

    #[test]
    fn test_window_excludes_old_dates() {
        let payload = json!([
            listing("Old", "2024-02-29", "https://x/old", "pc"),
            listing("Edge", "2024-03-01", "https://x/edge", "pc"),
        ]);

        let entries = ArchiveFeedBuilder::new(30)
            .build_entries_at(&payload, today())
            .unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "\"Edge\"");
    }

    #[test]
    fn test_skips_incomplete_and_bad_listings() {
        let payload = json!([
            { "gameTitle": "NoDate", "epicStoreLink": "https://x/1" },
            { "freeDate": "2024-03-10", "epicStoreLink": "https://x/2" },
            { "gameTitle": "NoLink", "freeDate": "2024-03-10" },
            listing("BadDate", "10/03/2024", "https://x/3", "pc"),
            "garbage",
            { "gameTitle": "NoPlatform", "freeDate": "2024-03-10", "epicStoreLink": "https://x/4" }
        ]);

        let entries = ArchiveFeedBuilder::default()
            .build_entries_at(&payload, today())
            .unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].description,
            "NoPlatform - : <a href=\"https://x/4\">Link</a>"
        );
    }

    #[test]
    fn test_duplicate_titles_collapse_in_title_only() {
        let payload = json!([
            listing("Same", "2024-03-10", "https://x/android", "android"),
            listing("Same", "2024-03-10", "https://x/ios", "ios"),
        ]);

        let entries = ArchiveFeedBuilder::default()
            .build_entries_at(&payload, today())
            .unwrap();

        assert_eq!(entries[0].title, "\"Same\"");
        assert_eq!(entries[0].description.matches("Link</a>").count(), 2);
    }

    #[test]
    fn test_description_escapes_titles_as_html() {
        let payload = json!([listing("Baldur's Gate", "2024-03-10", "https://x/bg", "pc")]);

        let entries = ArchiveFeedBuilder::default()
            .build_entries_at(&payload, today())
            .unwrap();

        assert_eq!(
            entries[0].description,
            "Baldur&#x27;s Gate - pc: <a href=\"https://x/bg\">Link</a>"
        );
    }

    #[test]
    fn test_non_array_payload_is_malformed() {
        let result = ArchiveFeedBuilder::default().build_entries_at(&json!({}), today());

        assert!(matches!(result.unwrap_err(), AppError::Malformed { .. }));
    }
}
