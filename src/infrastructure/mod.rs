//! Infrastructure layer for external integrations.
//!
//! Implements the gateway traits defined by the domain layer.
//!
//! # Modules
//!
//! - [`http`] - reqwest-backed payload fetching
//! - [`render`] - RSS 2.0 document rendering

pub mod http;
pub mod render;
