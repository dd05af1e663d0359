//! Extraction from the fixed-shape catalog promotions payload.

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::domain::entities::{CatalogRecord, OfferSet};
use crate::error::AppError;

/// JSON pointer to the record list inside the catalog payload.
pub const ELEMENTS_POINTER: &str = "/data/Catalog/searchStore/elements";

/// Decodes the catalog record list.
///
/// Fields of the wrong type read as absent. Elements that are not objects at
/// all are skipped; only a payload that lacks the record list altogether is
/// an error.
///
/// # Errors
///
/// Returns [`AppError::Malformed`] if [`ELEMENTS_POINTER`] does not resolve
/// to an array.
pub fn catalog_records(payload: &Value) -> Result<Vec<CatalogRecord>, AppError> {
    let elements = payload
        .pointer(ELEMENTS_POINTER)
        .and_then(Value::as_array)
        .ok_or_else(|| {
            AppError::malformed(
                "Catalog payload has no record list",
                json!({ "pointer": ELEMENTS_POINTER }),
            )
        })?;

    let records = elements
        .iter()
        .enumerate()
        .filter_map(|(index, element)| match CatalogRecord::deserialize(element) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!(index, error = %e, "Skipping undecodable catalog record");
                None
            }
        })
        .collect();

    Ok(records)
}

/// Returns the identities of every record whose discount price is zero.
///
/// Records without a numeric discount price or without both `namespace`
/// and `id` are skipped.
///
/// # Errors
///
/// See [`catalog_records`].
pub fn extract_catalog_offers(payload: &Value) -> Result<OfferSet, AppError> {
    Ok(catalog_records(payload)?
        .iter()
        .filter(|record| record.is_free())
        .filter_map(CatalogRecord::own_identity)
        .collect())
}
