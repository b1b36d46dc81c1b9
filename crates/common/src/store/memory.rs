//! In-memory reference implementation of the storage adapter
//!
//! Backs tests and embedding consumers that do not need durable storage.
//! Orderings are deterministic: counts, similarities and scores sort
//! descending with ties broken by book id ascending.

use super::LibraryStore;
use crate::errors::{AppError, Result};
use crate::models::{Book, BookId, ClickAggregate, SimilarNeighbor, SimilarityEdge};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
struct Inner {
    books: HashMap<BookId, Book>,
    clicks: HashMap<BookId, u64>,
    edges: Vec<SimilarityEdge>,
    ranks: HashMap<BookId, f64>,
}

/// In-memory library store
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn read_guard(&self) -> Result<RwLockReadGuard<'_, Inner>> {
        self.inner.read().map_err(|_| AppError::Internal {
            message: "memory store lock poisoned".into(),
        })
    }

    fn write_guard(&self) -> Result<RwLockWriteGuard<'_, Inner>> {
        self.inner.write().map_err(|_| AppError::Internal {
            message: "memory store lock poisoned".into(),
        })
    }

    /// Insert or replace a book's metadata
    pub fn insert_book(&self, book: Book) -> Result<()> {
        self.write_guard()?.books.insert(book.id, book);
        Ok(())
    }

    /// Add `count` click events to a book's aggregate
    pub fn record_clicks(&self, book_id: BookId, count: u64) -> Result<()> {
        *self.write_guard()?.clicks.entry(book_id).or_insert(0) += count;
        Ok(())
    }

    /// Store a validated similarity edge between two books
    pub fn add_similarity(&self, book_a: BookId, book_b: BookId, similarity: f64) -> Result<()> {
        let edge = SimilarityEdge::new(book_a, book_b, similarity)?;
        self.write_guard()?.edges.push(edge);
        Ok(())
    }
}

#[async_trait::async_trait]
impl LibraryStore for MemoryStore {
    async fn fetch_top_clicked(&self, n: usize) -> Result<Vec<ClickAggregate>> {
        let inner = self.read_guard()?;
        let mut aggregates: Vec<ClickAggregate> = inner
            .clicks
            .iter()
            .map(|(&book_id, &clicks)| ClickAggregate { book_id, clicks })
            .collect();
        aggregates.sort_by(|a, b| b.clicks.cmp(&a.clicks).then(a.book_id.cmp(&b.book_id)));
        aggregates.truncate(n);
        Ok(aggregates)
    }

    async fn fetch_similar_neighbors(
        &self,
        book_id: BookId,
        n: usize,
    ) -> Result<Vec<SimilarNeighbor>> {
        let inner = self.read_guard()?;
        let mut neighbors: Vec<SimilarNeighbor> = inner
            .edges
            .iter()
            .filter_map(|edge| {
                edge.other_side(book_id).map(|neighbor| SimilarNeighbor {
                    book_id: neighbor,
                    similarity: edge.similarity,
                })
            })
            .collect();
        neighbors.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.book_id.cmp(&b.book_id))
        });
        neighbors.truncate(n);
        Ok(neighbors)
    }

    async fn fetch_metadata(&self, book_id: BookId) -> Result<Option<Book>> {
        Ok(self.read_guard()?.books.get(&book_id).cloned())
    }

    async fn fetch_top_by_persisted_rank(&self, n: usize) -> Result<Vec<(BookId, f64)>> {
        let inner = self.read_guard()?;
        let mut ranked: Vec<(BookId, f64)> = inner
            .ranks
            .iter()
            .map(|(&book_id, &score)| (book_id, score))
            .collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        ranked.truncate(n);
        Ok(ranked)
    }

    async fn persist_rank_scores(&self, scores: HashMap<BookId, f64>) -> Result<()> {
        // Whole-set replacement under one write guard; readers see the
        // prior complete set or the new one, never a mix.
        self.write_guard()?.ranks = scores;
        Ok(())
    }
}
