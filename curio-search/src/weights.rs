//! Named, versioned weight tables for every scorer.
//!
//! Existing result orderings depend on these exact values. A changed
//! formula gets a new table version instead of edited constants.

/// Sub-score used when there is not enough data for a real signal.
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Upper bound for every preference sub-score.
pub const SUB_SCORE_CAP: f64 = 100.0;

/// Free-text relevance weights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelevanceWeights {
    pub exact_title: f64,
    pub title_prefix: f64,
    pub title_contains: f64,
    /// Per query word (longer than one character) found in the title
    pub title_word: f64,
    /// Per alternative title containing the whole query
    pub alternative_contains: f64,
    /// Per query word per alternative title
    pub alternative_word: f64,
    /// Flat bonus when any genre contains the query
    pub genre_contains: f64,
}

impl RelevanceWeights {
    pub const V1: Self = Self {
        exact_title: 100.0,
        title_prefix: 50.0,
        title_contains: 30.0,
        title_word: 15.0,
        alternative_contains: 20.0,
        alternative_word: 10.0,
        genre_contains: 5.0,
    };
}

impl Default for RelevanceWeights {
    fn default() -> Self {
        Self::V1
    }
}

/// Shared-attribute weights for related items.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityWeights {
    pub shared_genre: f64,
    pub same_studio: f64,
    pub same_source: f64,
    pub adjacent_season: f64,
    /// Largest year difference still counted as the same season
    pub max_season_year_gap: u32,
}

impl SimilarityWeights {
    pub const V1: Self = Self {
        shared_genre: 2.0,
        same_studio: 1.0,
        same_source: 1.0,
        adjacent_season: 1.0,
        max_season_year_gap: 1,
    };
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self::V1
    }
}

/// Engagement weights for trending.
///
/// Comment volume is counted twice, once directly and once as a watch
/// proxy. Kept as observed; see DESIGN.md open questions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopularityWeights {
    pub comment: f64,
    pub rating: f64,
    pub watch_proxy: f64,
}

impl PopularityWeights {
    pub const V1: Self = Self {
        comment: 10.0,
        rating: 10.0,
        watch_proxy: 5.0,
    };
}

impl Default for PopularityWeights {
    fn default() -> Self {
        Self::V1
    }
}

/// Personalized recommendation weights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreferenceWeights {
    pub genre: f64,
    pub history: f64,
    pub rating: f64,
    /// Scale for the watched-genre frequency term
    pub history_genre: f64,
    /// Scale for the watched-studio frequency term
    pub history_studio: f64,
    /// Scale for the recent activity bonus (bonus itself is 0-1)
    pub recent_activity: f64,
    pub recent_comment: f64,
    pub recent_favorite: f64,
    /// Divisor turning a user rating into a genre weight
    pub user_rating_divisor: f64,
    /// Divisor turning a community average into a 0-1 fraction.
    ///
    /// Ratings are stored on a 0-10 scale yet this divides by 5; kept
    /// as observed, see DESIGN.md open questions.
    pub community_rating_divisor: f64,
}

impl PreferenceWeights {
    pub const V1: Self = Self {
        genre: 0.5,
        history: 0.3,
        rating: 0.2,
        history_genre: 40.0,
        history_studio: 30.0,
        recent_activity: 30.0,
        recent_comment: 0.3,
        recent_favorite: 0.4,
        user_rating_divisor: 5.0,
        community_rating_divisor: 5.0,
    };
}

impl Default for PreferenceWeights {
    fn default() -> Self {
        Self::V1
    }
}
