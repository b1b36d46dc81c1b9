//! Storage adapter boundary
//!
//! Durable storage of books, click events, similarity edges and cached
//! rank scores lives outside this workspace. The core reaches it only
//! through the [`LibraryStore`] trait; any read or write failure surfaces
//! as `StorageUnavailable` and is propagated to the caller unmodified.

mod memory;

pub use memory::MemoryStore;

use crate::errors::Result;
use crate::models::{Book, BookId, ClickAggregate, SimilarNeighbor};
use std::collections::HashMap;

/// Read/write interface to the library's storage collaborator
#[async_trait::async_trait]
pub trait LibraryStore: Send + Sync {
    /// Fetch up to `n` books with the highest aggregated click counts,
    /// descending by count
    async fn fetch_top_clicked(&self, n: usize) -> Result<Vec<ClickAggregate>>;

    /// Fetch up to `n` similarity neighbors of a book, descending by
    /// similarity
    ///
    /// The lookup is symmetric: it works regardless of which side of a
    /// stored pair `book_id` occupies. A book with no similarity edges
    /// yields an empty list, not an error.
    async fn fetch_similar_neighbors(&self, book_id: BookId, n: usize)
        -> Result<Vec<SimilarNeighbor>>;

    /// Fetch metadata for a book; `None` means the row is missing
    /// (stale or deleted id), which callers treat as data sparsity
    async fn fetch_metadata(&self, book_id: BookId) -> Result<Option<Book>>;

    /// Fetch up to `n` books with the highest persisted rank scores,
    /// descending by score with ties broken by book id ascending
    ///
    /// Books without a persisted score are excluded.
    async fn fetch_top_by_persisted_rank(&self, n: usize) -> Result<Vec<(BookId, f64)>>;

    /// Replace the persisted rank score set with the given mapping
    ///
    /// Readers observe either the prior complete score set or the new
    /// one; the swap is the adapter's responsibility.
    async fn persist_rank_scores(&self, scores: HashMap<BookId, f64>) -> Result<()>;
}
