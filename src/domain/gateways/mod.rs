//! Gateway trait definitions for the domain layer.
//!
//! The core never performs I/O itself. Raw payloads come in through
//! [`PayloadFetcher`] and finished feeds go out through [`FeedRenderer`];
//! concrete implementations live in `crate::infrastructure`.
//!
//! Mock implementations are auto-generated via `mockall` for unit tests.

pub mod feed_renderer;
pub mod payload_fetcher;

pub use feed_renderer::FeedRenderer;
pub use payload_fetcher::PayloadFetcher;

#[cfg(test)]
pub use feed_renderer::MockFeedRenderer;
#[cfg(test)]
pub use payload_fetcher::MockPayloadFetcher;
