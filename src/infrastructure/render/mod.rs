//! Feed document rendering.

mod rss;

pub use rss::RssRenderer;
