//! Shape-agnostic scanner for the mobile "discover" payloads.
//!
//! The discover endpoints return deeply nested module trees whose layout
//! differs between platforms and changes without notice. Rather than model
//! them, the scanner walks the whole [`Value`] tree and picks out purchase
//! entries wherever they appear.

use serde_json::Value;

use crate::domain::entities::{OfferIdentity, OfferSet};

/// Key whose array value holds purchase entries.
pub const PURCHASE_KEY: &str = "purchase";

/// Discount display marking a fully discounted (free) offer.
pub const FREE_DISCOUNT_DISPLAY: &str = "-100%";

/// Collects every free offer reachable anywhere in `payload`.
///
/// An offer is recognized when an object has a [`PURCHASE_KEY`] array whose
/// object elements carry `discount.discountAmountDisplay == "-100%"` and a
/// non-empty `purchasePayload.sandboxId` / `purchasePayload.offerId` pair.
/// Anything else (missing keys, wrong types, non-object elements) is skipped.
///
/// Recursion depth equals the nesting depth of the payload.
pub fn scan_discover_payload(payload: &Value) -> OfferSet {
    let mut found = OfferSet::new();
    visit(payload, &mut found);
    found
}

fn visit(node: &Value, found: &mut OfferSet) {
    match node {
        Value::Object(map) => {
            if let Some(Value::Array(entries)) = map.get(PURCHASE_KEY) {
                found.extend(entries.iter().filter_map(free_purchase_offer));
            }

            for child in map.values() {
                visit(child, found);
            }
        }
        Value::Array(items) => {
            for item in items {
                visit(item, found);
            }
        }
        _ => {}
    }
}

fn free_purchase_offer(entry: &Value) -> Option<OfferIdentity> {
    let display = entry
        .get("discount")?
        .get("discountAmountDisplay")?
        .as_str()?;

    if display != FREE_DISCOUNT_DISPLAY {
        return None;
    }

    let payload = entry.get("purchasePayload")?;
    OfferIdentity::new(
        payload.get("sandboxId")?.as_str()?,
        payload.get("offerId")?.as_str()?,
    )
}
