//! Request-time recommendation scoring
//!
//! Provides three suggestion sources:
//! - Hybrid (click-history seeds expanded through similarity edges)
//! - Jaccard (direct similarity neighbors of one book)
//! - PageRank (persisted importance scores)

mod scorer;

pub use scorer::Recommender;

use serde::{Deserialize, Serialize};
use shelfrank_common::config::RecommendSettings;
use shelfrank_common::models::Book;

/// Which signal produced a suggestion
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecommendReason {
    /// Click-history seeds blended with similarity edges
    Hybrid,
    /// Direct similarity neighbor of the queried book
    Jaccard,
    /// Persisted PageRank importance
    Pagerank,
}

impl RecommendReason {
    /// Stable label used in serialized output and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendReason::Hybrid => "hybrid",
            RecommendReason::Jaccard => "jaccard",
            RecommendReason::Pagerank => "pagerank",
        }
    }
}

/// One recommended book
///
/// The score scale varies by reason (aggregated contributions for hybrid,
/// raw similarity for jaccard, rank mass for pagerank); scores are not
/// normalized across sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    /// Full book metadata
    pub book: Book,

    /// Numeric score within the reason's own scale
    pub score: f64,

    /// Which signal produced this suggestion
    pub reason: RecommendReason,

    /// Highest similarity seen on an originating edge, for display
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
}

/// Scorer configuration
#[derive(Debug, Clone)]
pub struct RecommendConfig {
    /// Number of top-clicked books used as seeds
    pub seed_count: usize,

    /// Similarity neighbors fetched per seed
    pub neighbors_per_seed: usize,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            seed_count: 5,
            neighbors_per_seed: 10,
        }
    }
}

impl From<RecommendSettings> for RecommendConfig {
    fn from(settings: RecommendSettings) -> Self {
        Self {
            seed_count: settings.seed_count,
            neighbors_per_seed: settings.neighbors_per_seed,
        }
    }
}
