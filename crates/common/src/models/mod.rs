//! Typed domain records for the ShelfRank core
//!
//! Storage rows are converted into these records at the adapter boundary;
//! the core never inspects untyped rows.

use crate::errors::{AppError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque integer identifier for one book, unique within a library
pub type BookId = i64;

/// Book metadata as surfaced in suggestion lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Book ID
    pub id: BookId,

    /// Title
    pub title: String,

    /// Author, when known
    pub author: Option<String>,

    /// ISBN, when known
    pub isbn: Option<String>,

    /// When the book entered the library
    pub added_at: DateTime<Utc>,
}

impl Book {
    /// Create a book with the given id and title and no optional metadata
    pub fn new(id: BookId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            author: None,
            isbn: None,
            added_at: Utc::now(),
        }
    }

    /// Set the author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}

/// Aggregated click count for one book over the whole corpus (no time decay)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickAggregate {
    /// Book ID
    pub book_id: BookId,

    /// Number of click events observed
    pub clicks: u64,
}

/// Undirected similarity edge between two books
///
/// Queried bidirectionally: either endpoint may be the lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityEdge {
    /// One endpoint
    pub book_a: BookId,

    /// The other endpoint
    pub book_b: BookId,

    /// Similarity value in [0, 1]
    pub similarity: f64,
}

impl SimilarityEdge {
    /// Create a validated similarity edge
    ///
    /// Rejects self-pairs and similarity values outside [0, 1].
    pub fn new(book_a: BookId, book_b: BookId, similarity: f64) -> Result<Self> {
        if book_a == book_b {
            return Err(AppError::Validation {
                message: format!("similarity edge may not pair book {} with itself", book_a),
                field: Some("book_b".into()),
            });
        }
        if !(0.0..=1.0).contains(&similarity) {
            return Err(AppError::Validation {
                message: format!("similarity {} outside [0, 1]", similarity),
                field: Some("similarity".into()),
            });
        }
        Ok(Self {
            book_a,
            book_b,
            similarity,
        })
    }

    /// Whether this edge has the given book as an endpoint
    pub fn touches(&self, book_id: BookId) -> bool {
        self.book_a == book_id || self.book_b == book_id
    }

    /// The endpoint opposite the given book, if the edge touches it
    pub fn other_side(&self, book_id: BookId) -> Option<BookId> {
        if self.book_a == book_id {
            Some(self.book_b)
        } else if self.book_b == book_id {
            Some(self.book_a)
        } else {
            None
        }
    }
}

/// One neighbor of a lookup key in the similarity graph
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarNeighbor {
    /// Neighboring book
    pub book_id: BookId,

    /// Similarity carried from the originating edge
    pub similarity: f64,
}
