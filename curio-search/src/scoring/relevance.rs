//! Free-text relevance for the search box and catalog search.

use curio_core::CatalogItem;

use super::{Score, Scorer};
use crate::normalize::normalize_compact;
use crate::weights::RelevanceWeights;

/// Score an item against an already normalized query with the V1 weights.
///
/// Zero means "not a match"; an empty query matches nothing.
pub fn score_relevance(item: &CatalogItem, normalized_query: &str) -> f64 {
    relevance_with(item, normalized_query, &RelevanceWeights::V1)
}

fn relevance_with(item: &CatalogItem, query: &str, weights: &RelevanceWeights) -> f64 {
    if query.is_empty() {
        return 0.0;
    }

    let words: Vec<&str> = query.split_whitespace().collect();
    let title = normalize_compact(&item.title);
    let mut score = 0.0;

    if title == query {
        score += weights.exact_title;
    }
    if title.starts_with(query) {
        score += weights.title_prefix;
    }
    if title.contains(query) {
        score += weights.title_contains;
    }
    let title_words = words
        .iter()
        .filter(|word| word.chars().count() > 1 && title.contains(*word))
        .count();
    score += title_words as f64 * weights.title_word;

    for alternative in &item.alternative_titles {
        let alternative = normalize_compact(&alternative.title);
        if alternative.contains(query) {
            score += weights.alternative_contains;
        }
        let alternative_words = words.iter().filter(|word| alternative.contains(*word)).count();
        score += alternative_words as f64 * weights.alternative_word;
    }

    if item
        .genres
        .iter()
        .any(|genre| normalize_compact(genre).contains(query))
    {
        score += weights.genre_contains;
    }

    score
}

/// Relevance scorer bound to one normalized query.
#[derive(Debug, Clone)]
pub struct RelevanceScorer {
    query: String,
    weights: RelevanceWeights,
}

impl RelevanceScorer {
    /// Creates a scorer; the raw query is normalized here.
    pub fn new(raw_query: &str) -> Self {
        Self {
            query: normalize_compact(raw_query),
            weights: RelevanceWeights::V1,
        }
    }

    pub fn with_weights(mut self, weights: RelevanceWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

impl Scorer for RelevanceScorer {
    fn name(&self) -> &'static str {
        "relevance"
    }

    fn score(&self, item: &CatalogItem) -> Score {
        Score::new(relevance_with(item, &self.query, &self.weights))
    }

    fn drops_non_positive(&self) -> bool {
        true
    }
}
