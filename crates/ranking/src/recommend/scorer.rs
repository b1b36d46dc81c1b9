//! Hybrid recommendation scorer
//!
//! Blends click-history seeds with similarity edges: the most-clicked
//! books anchor the request, their neighborhoods are expanded through
//! the storage adapter, and overlapping neighbors accumulate weighted
//! contributions. With no usable click history the scorer falls back to
//! persisted rank ordering.

use super::{RecommendConfig, RecommendReason, Suggestion};
use futures::future;
use shelfrank_common::errors::Result;
use shelfrank_common::models::{BookId, ClickAggregate};
use shelfrank_common::observability;
use shelfrank_common::store::LibraryStore;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Seed decision, resolved once at the start of a history request
enum SeedSelection {
    /// At least one seed carries a positive click count
    HasSeeds(Vec<ClickAggregate>),
    /// No click history worth weighting; use rank ordering instead
    NoSeeds,
}

fn select_seeds(seeds: Vec<ClickAggregate>) -> SeedSelection {
    if seeds.iter().any(|seed| seed.clicks > 0) {
        SeedSelection::HasSeeds(seeds)
    } else {
        SeedSelection::NoSeeds
    }
}

/// Aggregated neighbor candidate, request-scoped
struct Candidate {
    book_id: BookId,
    /// Sum of similarity * seed-weight contributions across seeds
    score: f64,
    /// Maximum similarity seen on any originating edge
    similarity: f64,
}

/// Recommendation scorer over a library store
pub struct Recommender {
    store: Arc<dyn LibraryStore>,
    config: RecommendConfig,
}

impl Recommender {
    /// Create a scorer with default configuration
    pub fn new(store: Arc<dyn LibraryStore>) -> Self {
        Self {
            store,
            config: RecommendConfig::default(),
        }
    }

    /// Create with custom seed and neighbor limits
    pub fn with_config(store: Arc<dyn LibraryStore>, config: RecommendConfig) -> Self {
        Self { store, config }
    }

    /// Recommend from the library's click history
    ///
    /// Seeds are the most-clicked books, weighted relative to the top
    /// seed; each seed's similarity neighborhood contributes
    /// `similarity * weight` per edge, summed per distinct neighbor.
    /// Storage failures propagate; candidates whose metadata is missing
    /// are silently dropped.
    pub async fn recommend_from_history(&self, limit: usize) -> Result<Vec<Suggestion>> {
        let started = Instant::now();

        let fetched = self.store.fetch_top_clicked(self.config.seed_count).await?;
        let seeds = match select_seeds(fetched) {
            SeedSelection::NoSeeds => {
                debug!("no usable click history, falling back to rank ordering");
                return self.top_by_rank(limit).await;
            }
            SeedSelection::HasSeeds(seeds) => seeds,
        };

        let candidates = self.score_neighborhoods(&seeds).await?;
        let suggestions = self.resolve_and_order(candidates, limit).await?;

        observability::record_recommendation(
            started.elapsed().as_secs_f64(),
            RecommendReason::Hybrid.as_str(),
            suggestions.len(),
        );
        Ok(suggestions)
    }

    /// Recommend the direct similarity neighbors of one book
    ///
    /// A book with no similarity edges yields an empty list, not an error.
    pub async fn recommend_by_similarity(
        &self,
        book_id: BookId,
        limit: usize,
    ) -> Result<Vec<Suggestion>> {
        let started = Instant::now();

        let neighbors = self.store.fetch_similar_neighbors(book_id, limit).await?;
        let books = future::try_join_all(
            neighbors
                .iter()
                .map(|neighbor| self.store.fetch_metadata(neighbor.book_id)),
        )
        .await?;

        let suggestions: Vec<Suggestion> = neighbors
            .into_iter()
            .zip(books)
            .filter_map(|(neighbor, book)| {
                book.map(|book| Suggestion {
                    book,
                    score: neighbor.similarity,
                    reason: RecommendReason::Jaccard,
                    similarity: Some(neighbor.similarity),
                })
            })
            .collect();

        observability::record_recommendation(
            started.elapsed().as_secs_f64(),
            RecommendReason::Jaccard.as_str(),
            suggestions.len(),
        );
        Ok(suggestions)
    }

    /// Recommend the books with the highest persisted rank scores
    pub async fn top_by_rank(&self, limit: usize) -> Result<Vec<Suggestion>> {
        let started = Instant::now();

        let ranked = self.store.fetch_top_by_persisted_rank(limit).await?;
        let books = future::try_join_all(
            ranked
                .iter()
                .map(|&(book_id, _)| self.store.fetch_metadata(book_id)),
        )
        .await?;

        let suggestions: Vec<Suggestion> = ranked
            .into_iter()
            .zip(books)
            .filter_map(|((_, score), book)| {
                book.map(|book| Suggestion {
                    book,
                    score,
                    reason: RecommendReason::Pagerank,
                    similarity: None,
                })
            })
            .collect();

        observability::record_recommendation(
            started.elapsed().as_secs_f64(),
            RecommendReason::Pagerank.as_str(),
            suggestions.len(),
        );
        Ok(suggestions)
    }

    /// Expand seed neighborhoods and aggregate per distinct neighbor
    ///
    /// Candidates come back in first-seen order: seed order (click count
    /// descending), then neighbor order within a seed (similarity
    /// descending). Seeds appearing in each other's neighborhoods pass
    /// through like any other neighbor.
    async fn score_neighborhoods(&self, seeds: &[ClickAggregate]) -> Result<Vec<Candidate>> {
        let c_max = seeds.iter().map(|seed| seed.clicks).max().unwrap_or(1) as f64;

        // Neighbor fetches run concurrently; results come back in seed order
        let neighborhoods = future::try_join_all(seeds.iter().map(|seed| {
            self.store
                .fetch_similar_neighbors(seed.book_id, self.config.neighbors_per_seed)
        }))
        .await?;

        let mut candidates: Vec<Candidate> = Vec::new();
        let mut positions: HashMap<BookId, usize> = HashMap::new();

        for (seed, neighbors) in seeds.iter().zip(neighborhoods) {
            let weight = seed.clicks as f64 / c_max;
            for neighbor in neighbors {
                let contribution = neighbor.similarity * weight;
                match positions.entry(neighbor.book_id) {
                    Entry::Occupied(entry) => {
                        let candidate = &mut candidates[*entry.get()];
                        candidate.score += contribution;
                        candidate.similarity = candidate.similarity.max(neighbor.similarity);
                    }
                    Entry::Vacant(entry) => {
                        entry.insert(candidates.len());
                        candidates.push(Candidate {
                            book_id: neighbor.book_id,
                            score: contribution,
                            similarity: neighbor.similarity,
                        });
                    }
                }
            }
        }

        debug!(
            seeds = seeds.len(),
            candidates = candidates.len(),
            "seed neighborhoods aggregated"
        );
        Ok(candidates)
    }

    /// Resolve candidate metadata, order by score, and truncate
    async fn resolve_and_order(
        &self,
        candidates: Vec<Candidate>,
        limit: usize,
    ) -> Result<Vec<Suggestion>> {
        let books = future::try_join_all(
            candidates
                .iter()
                .map(|candidate| self.store.fetch_metadata(candidate.book_id)),
        )
        .await?;

        // Stale or deleted candidates drop out here
        let mut resolved: Vec<(Candidate, shelfrank_common::models::Book)> = candidates
            .into_iter()
            .zip(books)
            .filter_map(|(candidate, book)| book.map(|book| (candidate, book)))
            .collect();

        // Stable sort: equal scores keep first-seen aggregation order
        resolved.sort_by(|a, b| {
            b.0.score
                .partial_cmp(&a.0.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        resolved.truncate(limit);

        Ok(resolved
            .into_iter()
            .map(|(candidate, book)| Suggestion {
                book,
                score: candidate.score,
                reason: RecommendReason::Hybrid,
                similarity: Some(candidate.similarity),
            })
            .collect())
    }
}
