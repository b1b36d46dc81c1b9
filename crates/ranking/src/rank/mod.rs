//! Offline importance ranking
//!
//! Computes a steady-state importance distribution over books via power
//! iteration over a directed graph, and persists it for request-time use

mod graph;
mod job;
mod pagerank;

pub use graph::BookGraph;
pub use job::RankJob;
pub use pagerank::{PageRankConfig, PageRankEngine, RankVector};
