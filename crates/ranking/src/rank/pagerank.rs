//! PageRank scoring over the book graph
//!
//! Power iteration with damping and dangling-mass redistribution. Rank
//! mass of nodes without outgoing edges is spread uniformly across the
//! graph each iteration, so the returned vector keeps summing to 1 even
//! when the graph contains sinks. No post-hoc normalization is applied.

use super::BookGraph;
use shelfrank_common::config::PageRankSettings;
use shelfrank_common::errors::{AppError, Result};
use shelfrank_common::models::BookId;
use std::collections::HashMap;
use tracing::debug;

/// PageRank configuration
#[derive(Debug, Clone)]
pub struct PageRankConfig {
    /// Damping factor, must lie in the open interval (0, 1)
    pub damping: f64,

    /// Maximum iterations, must be at least 1
    pub max_iterations: usize,

    /// Convergence tolerance on the maximum per-node rank change
    pub tolerance: f64,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            tolerance: 1e-6,
        }
    }
}

impl From<PageRankSettings> for PageRankConfig {
    fn from(settings: PageRankSettings) -> Self {
        Self {
            damping: settings.damping,
            max_iterations: settings.max_iterations,
            tolerance: settings.tolerance,
        }
    }
}

/// Completed rank computation
#[derive(Debug, Clone)]
pub struct RankVector {
    /// Scores aligned with the graph's node order
    pub scores: Vec<f64>,

    /// Iterations actually performed
    pub iterations: usize,

    /// Maximum per-node change in the final iteration
    pub delta: f64,

    /// Whether the loop settled below tolerance before the iteration cap
    pub converged: bool,
}

impl RankVector {
    /// Pair each score with its book id, in graph node order
    pub fn scored_books<'a>(
        &'a self,
        graph: &'a BookGraph,
    ) -> impl Iterator<Item = (BookId, f64)> + 'a {
        graph.nodes().iter().copied().zip(self.scores.iter().copied())
    }

    /// Build the mapping handed to the storage adapter
    pub fn score_map(&self, graph: &BookGraph) -> HashMap<BookId, f64> {
        self.scored_books(graph).collect()
    }
}

/// PageRank engine for book graphs
#[derive(Debug, Clone, Default)]
pub struct PageRankEngine {
    config: PageRankConfig,
}

impl PageRankEngine {
    /// Create a new engine
    pub fn new(config: PageRankConfig) -> Self {
        Self { config }
    }

    /// Compute rank scores for all nodes in the graph
    ///
    /// Fails fast on invalid parameters or an empty graph. Hitting the
    /// iteration cap without settling is not an error; the best-effort
    /// vector at that point is returned with `converged = false`.
    pub fn compute(&self, graph: &BookGraph) -> Result<RankVector> {
        let damping = self.config.damping;
        if !(damping > 0.0 && damping < 1.0) {
            return Err(AppError::InvalidParameter {
                message: format!("damping must lie in (0, 1), got {}", damping),
            });
        }
        if self.config.max_iterations < 1 {
            return Err(AppError::InvalidParameter {
                message: "max_iterations must be at least 1".into(),
            });
        }
        if graph.is_empty() {
            return Err(AppError::EmptyGraph);
        }

        let n = graph.node_count();
        let n_f64 = n as f64;
        let teleport = (1.0 - damping) / n_f64;

        let mut ranks = vec![1.0 / n_f64; n];
        let mut new_ranks = vec![0.0; n];

        let dangling = graph.dangling_positions();

        let mut iterations = 0;
        let mut delta = f64::MAX;
        let mut converged = false;

        while iterations < self.config.max_iterations {
            iterations += 1;

            let dangling_mass: f64 = dangling.iter().map(|&pos| ranks[pos]).sum();
            let base = teleport + damping * dangling_mass / n_f64;

            delta = 0.0;
            for pos in 0..n {
                let inbound: f64 = graph
                    .in_neighbors(pos)
                    .iter()
                    .map(|&source| ranks[source] / graph.out_degree(source) as f64)
                    .sum();

                let new_rank = base + damping * inbound;
                delta = delta.max((new_rank - ranks[pos]).abs());
                new_ranks[pos] = new_rank;
            }

            std::mem::swap(&mut ranks, &mut new_ranks);

            if delta <= self.config.tolerance {
                converged = true;
                break;
            }
        }

        debug!(
            nodes = n,
            iterations,
            delta,
            converged,
            "pagerank computation finished"
        );

        Ok(RankVector {
            scores: ranks,
            iterations,
            delta,
            converged,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_graph() -> BookGraph {
        // 0 -> 1 -> 2, node 2 is a sink
        BookGraph::from_parts(vec![0, 1, 2], vec![(0, 1), (1, 2)]).unwrap()
    }

    fn assert_sums_to_one(scores: &[f64]) {
        let sum: f64 = scores.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6, "scores sum to {}", sum);
    }

    #[test]
    fn test_scores_sum_to_one_with_dangling_node() {
        let engine = PageRankEngine::default();
        let result = engine.compute(&chain_graph()).unwrap();

        assert!(result.converged);
        assert_sums_to_one(&result.scores);
    }

    #[test]
    fn test_all_scores_strictly_positive() {
        let engine = PageRankEngine::default();
        let result = engine.compute(&chain_graph()).unwrap();

        for &score in &result.scores {
            assert!(score > 0.0);
        }
    }

    #[test]
    fn test_chain_sink_ranks_highest() {
        let engine = PageRankEngine::default();
        let result = engine.compute(&chain_graph()).unwrap();

        assert!(result.scores[2] > result.scores[0]);
        assert!(result.scores[2] > result.scores[1]);
    }

    #[test]
    fn test_self_loops_never_influence_ranking() {
        let plain = BookGraph::from_parts(vec![1, 2, 3], vec![(1, 2), (2, 3), (3, 1)]).unwrap();
        let looped = BookGraph::from_parts(
            vec![1, 2, 3],
            vec![(1, 2), (2, 3), (3, 1), (1, 1), (2, 2), (3, 3)],
        )
        .unwrap();

        let engine = PageRankEngine::default();
        let plain_scores = engine.compute(&plain).unwrap().scores;
        let looped_scores = engine.compute(&looped).unwrap().scores;

        assert_eq!(plain_scores, looped_scores);
    }

    #[test]
    fn test_duplicate_edges_never_influence_ranking() {
        let plain = BookGraph::from_parts(vec![1, 2, 3], vec![(1, 2), (1, 3)]).unwrap();
        let doubled =
            BookGraph::from_parts(vec![1, 2, 3], vec![(1, 2), (1, 2), (1, 2), (1, 3)]).unwrap();

        let engine = PageRankEngine::default();
        let plain_scores = engine.compute(&plain).unwrap().scores;
        let doubled_scores = engine.compute(&doubled).unwrap().scores;

        assert_eq!(plain_scores, doubled_scores);
    }

    #[test]
    fn test_pure_cycle_yields_equal_ranks() {
        let graph =
            BookGraph::from_parts(vec![1, 2, 3, 4], vec![(1, 2), (2, 3), (3, 4), (4, 1)]).unwrap();

        let engine = PageRankEngine::default();
        let result = engine.compute(&graph).unwrap();

        for &score in &result.scores {
            assert!((score - 0.25).abs() < 1e-9);
        }
    }

    #[test]
    fn test_single_isolated_node_ranks_one() {
        let graph = BookGraph::from_parts(vec![7], vec![]).unwrap();

        let engine = PageRankEngine::default();
        let result = engine.compute(&graph).unwrap();

        assert!((result.scores[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_two_disconnected_nodes_split_evenly() {
        let graph = BookGraph::from_parts(vec![1, 2], vec![]).unwrap();

        let engine = PageRankEngine::default();
        let result = engine.compute(&graph).unwrap();

        assert!((result.scores[0] - 0.5).abs() < 1e-9);
        assert!((result.scores[1] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_damping_changes_asymmetric_graph_ranks() {
        let graph = chain_graph();

        let low = PageRankEngine::new(PageRankConfig {
            damping: 0.5,
            ..PageRankConfig::default()
        });
        let high = PageRankEngine::new(PageRankConfig {
            damping: 0.95,
            ..PageRankConfig::default()
        });

        let low_scores = low.compute(&graph).unwrap().scores;
        let high_scores = high.compute(&graph).unwrap().scores;

        let moved = low_scores
            .iter()
            .zip(&high_scores)
            .any(|(a, b)| (a - b).abs() > 1e-9);
        assert!(moved, "damping had no effect on rank distribution");
    }

    #[test]
    fn test_invalid_damping_rejected() {
        let graph = chain_graph();

        for damping in [0.0, 1.0, -0.2, 1.7] {
            let engine = PageRankEngine::new(PageRankConfig {
                damping,
                ..PageRankConfig::default()
            });
            assert!(matches!(
                engine.compute(&graph),
                Err(AppError::InvalidParameter { .. })
            ));
        }
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let engine = PageRankEngine::new(PageRankConfig {
            max_iterations: 0,
            ..PageRankConfig::default()
        });
        assert!(matches!(
            engine.compute(&chain_graph()),
            Err(AppError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_empty_graph_rejected() {
        let engine = PageRankEngine::default();
        assert!(matches!(
            engine.compute(&BookGraph::new()),
            Err(AppError::EmptyGraph)
        ));
    }

    #[test]
    fn test_iteration_cap_returns_best_effort() {
        let engine = PageRankEngine::new(PageRankConfig {
            max_iterations: 1,
            tolerance: 0.0,
            ..PageRankConfig::default()
        });

        let result = engine.compute(&chain_graph()).unwrap();

        assert_eq!(result.iterations, 1);
        assert!(!result.converged);
        assert_sums_to_one(&result.scores);
    }

    #[test]
    fn test_random_graph_preserves_probability_mass() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(42);
        let mut graph = BookGraph::new();
        for id in 0..50 {
            graph.add_node(id);
        }
        for _ in 0..200 {
            graph.add_edge(rng.gen_range(0..50), rng.gen_range(0..50));
        }

        let engine = PageRankEngine::default();
        let result = engine.compute(&graph).unwrap();

        assert_sums_to_one(&result.scores);
        for &score in &result.scores {
            assert!(score > 0.0);
        }
    }

    #[test]
    fn test_score_map_aligns_with_node_order() {
        let graph = BookGraph::from_parts(vec![10, 20, 30], vec![(10, 20)]).unwrap();

        let engine = PageRankEngine::default();
        let result = engine.compute(&graph).unwrap();

        let map = result.score_map(&graph);
        assert_eq!(map.len(), 3);
        assert_eq!(map[&20], result.scores[1]);
    }
}
