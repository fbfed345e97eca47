//! Engagement-based trending score.

use curio_core::{CatalogItem, CommunityContext};

use super::{Score, Scorer};
use crate::weights::PopularityWeights;

/// Trending score from comment volume and community score (V1 weights).
///
/// Only meaningful as a relative key within one ranking call.
pub fn score_popularity(item: &CatalogItem, comment_count: usize) -> f64 {
    popularity_with(item, comment_count, &PopularityWeights::V1)
}

fn popularity_with(item: &CatalogItem, comment_count: usize, weights: &PopularityWeights) -> f64 {
    let comments = comment_count as f64;
    comments * weights.comment + item.numeric_score() * weights.rating + comments * weights.watch_proxy
}

/// Popularity scorer reading comment counts from a community snapshot.
#[derive(Debug, Clone)]
pub struct PopularityScorer<'a> {
    community: &'a CommunityContext,
    weights: PopularityWeights,
}

impl<'a> PopularityScorer<'a> {
    pub fn new(community: &'a CommunityContext) -> Self {
        Self {
            community,
            weights: PopularityWeights::V1,
        }
    }

    pub fn with_weights(mut self, weights: PopularityWeights) -> Self {
        self.weights = weights;
        self
    }
}

impl Scorer for PopularityScorer<'_> {
    fn name(&self) -> &'static str {
        "popularity"
    }

    fn score(&self, item: &CatalogItem) -> Score {
        let comments = self.community.comment_count(&item.title);
        Score::new(popularity_with(item, comments, &self.weights))
    }

    fn drops_non_positive(&self) -> bool {
        false
    }
}
