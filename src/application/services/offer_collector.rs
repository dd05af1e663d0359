//! Multi-source offer collection with per-source failure isolation.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use crate::application::services::catalog_extractor::extract_catalog_offers;
use crate::application::services::offer_scanner::scan_discover_payload;
use crate::domain::entities::OfferSet;
use crate::domain::gateways::PayloadFetcher;
use crate::error::AppError;

/// How a source's payload is turned into offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// Mobile discover payload, scanned without a fixed shape.
    Discover,
    /// Catalog promotions payload with a fixed record list.
    Catalog,
}

impl PayloadKind {
    /// # Errors
    ///
    /// Returns [`AppError::Malformed`] for a catalog payload without a
    /// record list. Discover payloads never fail.
    pub fn extract(self, payload: &Value) -> Result<OfferSet, AppError> {
        match self {
            PayloadKind::Discover => Ok(scan_discover_payload(payload)),
            PayloadKind::Catalog => extract_catalog_offers(payload),
        }
    }
}

/// A named fetcher paired with the extractor for its payload.
#[derive(Clone)]
pub struct OfferSource {
    name: String,
    kind: PayloadKind,
    fetcher: Arc<dyn PayloadFetcher>,
}

impl OfferSource {
    pub fn new(name: impl Into<String>, kind: PayloadKind, fetcher: Arc<dyn PayloadFetcher>) -> Self {
        Self {
            name: name.into(),
            kind,
            fetcher,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PayloadKind {
        self.kind
    }

    async fn collect(&self) -> Result<OfferSet, AppError> {
        let payload = self.fetcher.fetch().await?;
        self.kind.extract(&payload)
    }
}

/// What happened to one source during a run.
#[derive(Debug)]
pub struct SourceOutcome {
    pub source: String,
    /// Number of distinct offers the source contributed, or why it failed.
    pub result: Result<usize, AppError>,
}

impl SourceOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Combined offers plus the per-source outcomes that produced them.
#[derive(Debug, Default)]
pub struct CollectionReport {
    pub offers: OfferSet,
    pub outcomes: Vec<SourceOutcome>,
}

impl CollectionReport {
    pub fn failures(&self) -> impl Iterator<Item = &SourceOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// True when sources were configured and none of them succeeded.
    pub fn all_failed(&self) -> bool {
        !self.outcomes.is_empty() && self.succeeded() == 0
    }
}

/// Unions per-source offer sets.
///
/// The result does not depend on the order of `sets`.
pub fn merge_offer_sets<I>(sets: I) -> OfferSet
where
    I: IntoIterator<Item = OfferSet>,
{
    sets.into_iter().fold(OfferSet::new(), |mut combined, set| {
        combined.absorb(set);
        combined
    })
}

/// Queries every configured source in turn and unions what succeeded.
pub struct OfferCollector {
    sources: Vec<OfferSource>,
}

impl OfferCollector {
    pub fn new(sources: Vec<OfferSource>) -> Self {
        Self { sources }
    }

    pub fn sources(&self) -> &[OfferSource] {
        &self.sources
    }

    /// Runs every source sequentially.
    ///
    /// A failing source is recorded in the report and skipped; it never
    /// aborts the run. If every source fails the report carries an empty
    /// offer set.
    pub async fn collect(&self) -> CollectionReport {
        let mut slots = Vec::with_capacity(self.sources.len());
        let mut outcomes = Vec::with_capacity(self.sources.len());

        for source in &self.sources {
            match source.collect().await {
                Ok(offers) => {
                    info!(source = %source.name, offers = offers.len(), "Source collected");
                    outcomes.push(SourceOutcome {
                        source: source.name.clone(),
                        result: Ok(offers.len()),
                    });
                    slots.push(offers);
                }
                Err(e) => {
                    warn!(
                        source = %source.name,
                        endpoint = %source.fetcher.endpoint(),
                        code = e.code(),
                        "Source failed: {}", e
                    );
                    outcomes.push(SourceOutcome {
                        source: source.name.clone(),
                        result: Err(e),
                    });
                }
            }
        }

        CollectionReport {
            offers: merge_offer_sets(slots),
            outcomes,
        }
    }
}
