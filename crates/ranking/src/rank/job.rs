//! Offline rank batch
//!
//! Runs the engine over an injected graph and persists the resulting
//! score set through the storage adapter. The graph's source (similarity
//! edges, citations, anything else) is the caller's decision.

use super::{BookGraph, PageRankConfig, PageRankEngine, RankVector};
use shelfrank_common::errors::Result;
use shelfrank_common::observability;
use shelfrank_common::store::LibraryStore;
use std::time::Instant;
use tracing::info;

/// Batch job computing and persisting rank scores
#[derive(Debug, Clone, Default)]
pub struct RankJob {
    engine: PageRankEngine,
}

impl RankJob {
    /// Create a job with the given configuration
    pub fn new(config: PageRankConfig) -> Self {
        Self {
            engine: PageRankEngine::new(config),
        }
    }

    /// Compute ranks for the graph and persist the complete score set
    ///
    /// The write happens only after the computation finishes, so readers
    /// never observe a partial score set. No retries; a failed write
    /// surfaces to the caller.
    pub async fn run(&self, graph: &BookGraph, store: &dyn LibraryStore) -> Result<RankVector> {
        let started = Instant::now();

        let ranks = self.engine.compute(graph)?;
        store.persist_rank_scores(ranks.score_map(graph)).await?;

        let duration = started.elapsed().as_secs_f64();
        observability::record_rank_run(duration, ranks.iterations, ranks.converged);
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            iterations = ranks.iterations,
            converged = ranks.converged,
            "rank batch persisted"
        );

        Ok(ranks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelfrank_common::store::MemoryStore;

    #[tokio::test]
    async fn test_run_persists_complete_score_set() {
        // 1 and 3 both point at 2
        let graph = BookGraph::from_parts(vec![1, 2, 3], vec![(1, 2), (3, 2)]).unwrap();
        let store = MemoryStore::new();

        let job = RankJob::default();
        let ranks = job.run(&graph, &store).await.unwrap();
        assert!(ranks.converged);

        let persisted = store.fetch_top_by_persisted_rank(10).await.unwrap();
        assert_eq!(persisted.len(), 3);
        assert_eq!(persisted[0].0, 2);

        let total: f64 = persisted.iter().map(|(_, score)| score).sum();
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_run_rejects_empty_graph_before_writing() {
        let store = MemoryStore::new();

        let job = RankJob::default();
        assert!(job.run(&BookGraph::new(), &store).await.is_err());

        let persisted = store.fetch_top_by_persisted_rank(10).await.unwrap();
        assert!(persisted.is_empty());
    }
}
