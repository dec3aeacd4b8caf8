//! Common trait definitions
//!
//! Seams for dependency injection, so code that consumes records can be
//! tested against a mock instead of a live endpoint.

use async_trait::async_trait;

use crate::repository::Record;

/// A source of employee records ordered by `id`
///
/// Implemented by [`crate::RecordRepository`]. Implementations report any
/// failure as `None`, without saying why.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch all records sorted ascending by `id`
    async fn fetch_sorted(&self) -> Option<Vec<Record>>;
}
