#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};
use free_offers::prelude::*;

/// Fetcher returning a canned payload or error, counting calls.
pub struct StubFetcher {
    response: Result<Value, String>,
    calls: AtomicUsize,
}

impl StubFetcher {
    pub fn ok(payload: Value) -> Self {
        Self {
            response: Ok(payload),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            response: Err(reason.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PayloadFetcher for StubFetcher {
    async fn fetch(&self) -> Result<Value, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            Ok(payload) => Ok(payload.clone()),
            Err(reason) => Err(AppError::transport(
                reason.clone(),
                json!({ "stub": true }),
            )),
        }
    }

    fn endpoint(&self) -> String {
        "stub://payload".to_string()
    }
}

pub fn purchase_entry(display: &str, sandbox: &str, offer: &str) -> Value {
    json!({
        "discount": { "discountAmountDisplay": display },
        "purchasePayload": { "sandboxId": sandbox, "offerId": offer }
    })
}

/// Discover payload shaped like the mobile home response.
pub fn discover_payload(entries: Vec<Value>) -> Value {
    json!({
        "data": [{
            "type": "curatedRow",
            "topicId": "free-games",
            "offers": [{
                "content": {
                    "title": "Mobile game",
                    "purchase": entries
                }
            }]
        }],
        "paging": { "count": 10, "start": 0 }
    })
}

pub fn catalog_payload(elements: Vec<Value>) -> Value {
    let total = elements.len();
    json!({ "data": { "Catalog": { "searchStore": {
        "elements": elements,
        "paging": { "count": 1000, "total": total }
    } } } })
}

/// Free, active catalog element with one promotion.
pub fn free_element(title: &str, slug: &str, namespace: &str, id: &str, start: &str) -> Value {
    json!({
        "title": title,
        "id": id,
        "namespace": namespace,
        "status": "ACTIVE",
        "urlSlug": "ignored-when-mapped",
        "catalogNs": { "mappings": [{ "pageSlug": slug, "pageType": "productHome" }] },
        "items": [{ "id": "item", "namespace": namespace }],
        "price": { "totalPrice": { "discountPrice": 0, "originalPrice": 1999 } },
        "promotions": {
            "promotionalOffers": [{ "promotionalOffers": [{
                "startDate": start,
                "endDate": "2099-01-01T16:00:00.000Z",
                "discountSetting": { "discountType": "PERCENTAGE", "discountPercentage": 0 }
            }] }],
            "upcomingPromotionalOffers": []
        }
    })
}

/// Element that is not currently free.
pub fn paid_element(title: &str, namespace: &str, id: &str) -> Value {
    json!({
        "title": title,
        "id": id,
        "namespace": namespace,
        "status": "ACTIVE",
        "urlSlug": "paid",
        "price": { "totalPrice": { "discountPrice": 1999, "originalPrice": 1999 } },
        "promotions": null
    })
}
