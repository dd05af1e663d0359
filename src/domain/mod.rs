//! Domain layer containing entities and gateway traits.
//!
//! # Architecture
//!
//! - [`entities`] - Offer identities, catalog records and feed structures
//! - [`gateways`] - Fetcher and renderer trait definitions
//!
//! The domain layer has no dependency on HTTP or XML; those concerns are
//! implemented in `crate::infrastructure`.

pub mod entities;
pub mod gateways;
