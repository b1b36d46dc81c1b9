//! ShelfRank Common Library
//!
//! Shared code for the ShelfRank ranking workspace including:
//! - Typed domain records (books, clicks, similarity edges)
//! - Storage adapter trait and in-memory reference adapter
//! - Error types and handling
//! - Configuration management
//! - Observability utilities

pub mod config;
pub mod errors;
pub mod models;
pub mod observability;
pub mod store;

// Re-export commonly used types
pub use config::AppConfig;
pub use errors::{AppError, Result};
pub use models::{Book, BookId, ClickAggregate, SimilarNeighbor, SimilarityEdge};
pub use store::{LibraryStore, MemoryStore};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
