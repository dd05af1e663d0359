//! Gateway trait for serializing feed entries into a document.

use crate::domain::entities::{FeedChannel, FeedEntry};
use crate::error::AppError;

/// Serializes channel metadata plus ordered entries into a feed document.
#[cfg_attr(test, mockall::automock)]
pub trait FeedRenderer: Send + Sync {
    /// # Errors
    ///
    /// Returns [`AppError::Render`] if the document cannot be produced.
    fn render(&self, channel: &FeedChannel, entries: &[FeedEntry]) -> Result<String, AppError>;
}
