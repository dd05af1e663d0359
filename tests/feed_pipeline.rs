mod common;

use common::{StubFetcher, catalog_payload, free_element, paid_element};
use free_offers::application::services::archive_feed::ArchiveFeedBuilder;
use free_offers::application::services::feed_service::{archive_channel, catalog_channel};
use free_offers::infrastructure::render::RssRenderer;
use free_offers::prelude::*;
use serde_json::json;
use std::sync::Arc;

fn catalog_service(fetcher: Arc<StubFetcher>, max_items: usize) -> FeedService {
    let storefront = Storefront::default();
    FeedService::new(
        fetcher,
        Arc::new(RssRenderer::new()),
        EntryBuilder::Catalog(FeedGrouper::new(storefront.clone(), max_items)),
        catalog_channel(&storefront, "Epic Free Games"),
    )
}

#[tokio::test]
async fn test_catalog_feed_groups_and_renders() {
    let payload = catalog_payload(vec![
        free_element("Alpha", "alpha", "ns-a", "id-a", "2024-01-01T16:00:00.000Z"),
        free_element("Beta", "beta", "ns-b", "id-b", "2024-01-01T16:00:00.000Z"),
        free_element("Gamma", "gamma", "ns-g", "id-g", "2024-01-08T16:00:00.000Z"),
        paid_element("Paid", "ns-p", "id-p"),
    ]);

    let document = catalog_service(Arc::new(StubFetcher::ok(payload)), 30)
        .build()
        .await
        .unwrap();

    assert_eq!(document.entries, 2);

    let xml = &document.body;
    let gamma = xml.find("<title>Gamma</title>").unwrap();
    let alpha_beta = xml.find("<title>Alpha, Beta</title>").unwrap();
    assert!(gamma < alpha_beta, "newest group first");

    assert!(xml.contains(
        "https://store.epicgames.com/p/alpha|https://store.epicgames.com/p/beta|2024-01-01T16:00:00.000Z"
    ));
    assert!(!xml.contains("Paid"));
}

#[tokio::test]
async fn test_guids_are_stable_across_runs() {
    let payload = catalog_payload(vec![
        free_element("Alpha", "alpha", "ns-a", "id-a", "2024-01-01T16:00:00.000Z"),
        free_element("Beta", "beta", "ns-b", "id-b", "2024-01-08T16:00:00.000Z"),
    ]);

    let first = catalog_service(Arc::new(StubFetcher::ok(payload.clone())), 30)
        .build()
        .await
        .unwrap();
    let second = catalog_service(Arc::new(StubFetcher::ok(payload)), 30)
        .build()
        .await
        .unwrap();

    assert_eq!(first.body, second.body);
}

#[tokio::test]
async fn test_max_items_truncates_oldest() {
    let payload = catalog_payload(
        (1..=4)
            .map(|day| {
                free_element(
                    &format!("Game {day}"),
                    &format!("game-{day}"),
                    "ns",
                    &format!("id-{day}"),
                    &format!("2024-02-0{day}T16:00:00.000Z"),
                )
            })
            .collect(),
    );

    let document = catalog_service(Arc::new(StubFetcher::ok(payload)), 2)
        .build()
        .await
        .unwrap();

    assert_eq!(document.entries, 2);
    assert!(document.body.contains("<title>Game 4</title>"));
    assert!(document.body.contains("<title>Game 3</title>"));
    assert!(!document.body.contains("<title>Game 1</title>"));
}

#[tokio::test]
async fn test_feed_fetch_failure_propagates() {
    let result = catalog_service(Arc::new(StubFetcher::failing("down")), 30)
        .build()
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Transport { .. }));
}

#[tokio::test]
async fn test_archive_feed_renders_recent_dates() {
    let today = chrono::Utc::now().date_naive();
    let recent = today.format("%Y-%m-%d").to_string();
    let ancient = "2001-01-01";

    let payload = json!([
        { "gameTitle": "Recent", "freeDate": recent, "epicStoreLink": "https://x/recent", "platform": "PC" },
        { "gameTitle": "Ancient", "freeDate": ancient, "epicStoreLink": "https://x/ancient", "platform": "PC" }
    ]);

    let storefront = Storefront::default();
    let service = FeedService::new(
        Arc::new(StubFetcher::ok(payload)),
        Arc::new(RssRenderer::new()),
        EntryBuilder::Archive(ArchiveFeedBuilder::new(30)),
        archive_channel(&storefront, "Epic Free Games", 30),
    );

    let document = service.build().await.unwrap();

    assert_eq!(document.entries, 1);
    assert!(document.body.contains("<title>Epic Free Games (30 days)</title>"));
    assert!(document.body.contains("&quot;Recent&quot;") || document.body.contains("\"Recent\""));
    assert!(!document.body.contains("Ancient"));
}
