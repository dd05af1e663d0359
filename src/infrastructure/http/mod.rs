//! HTTP access to the storefront endpoints.
//!
//! Provides [`HttpFetcher`], a single-endpoint [`crate::domain::gateways::PayloadFetcher`].

mod client;

pub use client::{HttpFetcher, build_client};
