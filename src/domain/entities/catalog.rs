//! Typed view over a single element of the catalog promotions payload.
//!
//! Every field is optional: the upstream payload is loosely shaped and a
//! record missing any part of it is filtered out by the consumers rather
//! than rejected at decode time. A field holding a value of the wrong type
//! decodes as absent, so it never takes the rest of the record down with it.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::offer::OfferIdentity;

/// Decodes a field as `None` when its value has an unexpected shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CatalogRecord {
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub namespace: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub url_slug: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub catalog_ns: Option<CatalogNamespace>,
    #[serde(deserialize_with = "lenient")]
    pub items: Option<Vec<CatalogItem>>,
    #[serde(deserialize_with = "lenient")]
    pub price: Option<Price>,
    #[serde(deserialize_with = "lenient")]
    pub promotions: Option<Promotions>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CatalogNamespace {
    #[serde(deserialize_with = "lenient")]
    pub mappings: Option<Vec<PageMapping>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageMapping {
    #[serde(deserialize_with = "lenient")]
    pub page_slug: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CatalogItem {
    #[serde(deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub namespace: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Price {
    #[serde(deserialize_with = "lenient")]
    pub total_price: Option<TotalPrice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TotalPrice {
    #[serde(deserialize_with = "lenient")]
    pub discount_price: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Promotions {
    #[serde(deserialize_with = "lenient")]
    pub promotional_offers: Option<Vec<PromotionGroup>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PromotionGroup {
    #[serde(deserialize_with = "lenient")]
    pub promotional_offers: Option<Vec<PromotionalOffer>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PromotionalOffer {
    #[serde(deserialize_with = "lenient")]
    pub start_date: Option<String>,
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

impl CatalogRecord {
    pub fn is_active(&self) -> bool {
        self.status.as_deref() == Some("ACTIVE")
    }

    pub fn discount_price(&self) -> Option<f64> {
        self.price
            .as_ref()?
            .total_price
            .as_ref()?
            .discount_price
    }

    /// True when the total-price discount is exactly zero.
    pub fn is_free(&self) -> bool {
        self.discount_price() == Some(0.0)
    }

    /// Identity from the record's own `namespace` and `id`, if both are present.
    pub fn own_identity(&self) -> Option<OfferIdentity> {
        OfferIdentity::new(
            non_empty(self.namespace.as_ref())?,
            non_empty(self.id.as_ref())?,
        )
    }

    fn first_item(&self) -> Option<&CatalogItem> {
        self.items.as_ref()?.first()
    }

    /// Namespace, falling back to the first sub-item's namespace.
    pub fn resolved_namespace(&self) -> Option<&str> {
        non_empty(self.namespace.as_ref())
            .or_else(|| non_empty(self.first_item()?.namespace.as_ref()))
    }

    /// Id, falling back to the first sub-item's id.
    pub fn resolved_id(&self) -> Option<&str> {
        non_empty(self.id.as_ref()).or_else(|| non_empty(self.first_item()?.id.as_ref()))
    }

    /// Page slug of the first mapping when any mapping exists, otherwise the
    /// generic URL slug.
    pub fn page_slug(&self) -> Option<&str> {
        let mappings = self
            .catalog_ns
            .as_ref()
            .and_then(|ns| ns.mappings.as_deref())
            .unwrap_or_default();

        match mappings.first() {
            Some(mapping) => non_empty(mapping.page_slug.as_ref()),
            None => non_empty(self.url_slug.as_ref()),
        }
    }

    /// Start dates of every promotional offer, in payload order, skipping
    /// offers without one.
    pub fn promotion_start_dates(&self) -> impl Iterator<Item = &str> {
        self.promotions
            .iter()
            .flat_map(|p| p.promotional_offers.iter().flatten())
            .flat_map(|group| group.promotional_offers.iter().flatten())
            .filter_map(|offer| non_empty(offer.start_date.as_ref()))
    }
}
