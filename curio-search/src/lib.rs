//! Curio Search - Relevance and recommendation ranking
//!
//! Turns a free-text query, a filter selection or a user's history into a
//! ranked, length-bounded list of catalog items. Every list follows the same
//! shape: normalize, filter, score, sort, truncate.
//!
//! All entry points are synchronous and pure. They scan the snapshot they
//! are given on every call and never mutate it.

pub mod discovery;
pub mod errors;
pub mod filters;
pub mod normalize;
pub mod ranking;
pub mod scoring;
pub mod weights;

// Re-export main types
pub use discovery::{DiscoveryService, QuerySpec, Recommendations};
pub use errors::SearchError;
pub use filters::{FilterPipeline, FilterSelection, ReleaseWindow};
pub use normalize::{normalize, normalize_compact};
pub use ranking::{RankingPipeline, ScoredResult};
pub use scoring::{
    PopularityScorer, PreferenceScorer, RelatedScorer, RelevanceScorer, Score, ScoreBreakdown,
    Scorer, SimilarityScorer, WatchedSimilarityScorer, score_popularity, score_preference,
    score_relevance, score_similarity,
};
