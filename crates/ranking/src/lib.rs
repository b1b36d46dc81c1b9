//! ShelfRank Ranking Core
//!
//! Ranking and recommendation engine for the ShelfRank library:
//! - In-memory book graph with PageRank importance scoring
//! - Offline rank batch that persists scores through the storage adapter
//! - Request-time hybrid scorer blending click history with similarity edges

pub mod rank;
pub mod recommend;

pub use rank::{BookGraph, PageRankConfig, PageRankEngine, RankJob, RankVector};
pub use recommend::{RecommendConfig, RecommendReason, Recommender, Suggestion};
