//! Scorers plugged into the ranking pipeline.
//!
//! Each scorer is bound to its context (query, target item, community
//! snapshot or user profile) at construction, then scores items one by one.

use std::collections::HashSet;

use curio_core::CatalogItem;
use serde::Serialize;

use crate::normalize::normalize_compact;

pub mod popularity;
pub mod preference;
pub mod relevance;
pub mod similarity;

pub use popularity::{PopularityScorer, score_popularity};
pub use preference::{PreferenceScorer, score_preference};
pub use relevance::{RelevanceScorer, score_relevance};
pub use similarity::{RelatedScorer, SimilarityScorer, WatchedSimilarityScorer, score_similarity};

/// Sub-scores behind a personalized match score, shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub genre: f64,
    pub history: f64,
    pub rating: f64,
}

/// Ranking key for one item, with its breakdown when the scorer has one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    pub value: f64,
    pub breakdown: Option<ScoreBreakdown>,
}

impl Score {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            breakdown: None,
        }
    }
}

/// Strategy interface for the ranking pipeline.
pub trait Scorer {
    /// Scorer name, used in traces.
    fn name(&self) -> &'static str;

    fn score(&self, item: &CatalogItem) -> Score;

    /// Whether a zero or negative score means "not a match".
    fn drops_non_positive(&self) -> bool;

    /// Items removed before scoring, e.g. already watched titles.
    fn excludes(&self, _item: &CatalogItem) -> bool {
        false
    }
}

/// Distinct normalized genre tags of an item, blanks dropped.
pub(crate) fn genre_keys(genres: &[String]) -> HashSet<String> {
    genres
        .iter()
        .map(|genre| normalize_compact(genre))
        .filter(|genre| !genre.is_empty())
        .collect()
}
