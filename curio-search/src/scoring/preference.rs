//! Personalized match score for the recommendation page.
//!
//! Three sub-scores, each on a 0-100 scale, are blended into the total:
//!
//! - genre affinity: overlap between the item and the user's favorite genres
//! - watch history: how often the item's genres and studio appear in what
//!   the user watched (weighted by the user's own ratings), plus a bonus
//!   for genres the user commented on or favorited recently
//! - community rating: the average rating recorded against the item
//!
//! Any sub-score without data falls back to [`NEUTRAL_SCORE`] so missing
//! information never pushes an item down.

use std::collections::{HashMap, HashSet};

use curio_core::{CatalogItem, CommunityContext, RecentActivity, UserProfile};

use super::{Score, ScoreBreakdown, Scorer, genre_keys};
use crate::normalize::normalize_compact;
use crate::weights::{NEUTRAL_SCORE, PreferenceWeights, SUB_SCORE_CAP};

/// Score one item for a user with the V1 weights.
///
/// The returned score always carries its breakdown.
pub fn score_preference(
    item: &CatalogItem,
    profile: &UserProfile,
    catalog: &[CatalogItem],
    community: &CommunityContext,
) -> Score {
    PreferenceScorer::new(profile, catalog, community).score(item)
}

/// Genre and studio frequencies over the user's watched items.
#[derive(Debug, Clone)]
struct WatchHistory {
    watched_count: f64,
    genre_weights: HashMap<String, f64>,
    studio_counts: HashMap<String, f64>,
}

impl WatchHistory {
    /// `None` when no watched title resolves to a catalog item.
    fn build(
        profile: &UserProfile,
        catalog: &[CatalogItem],
        community: &CommunityContext,
        weights: &PreferenceWeights,
    ) -> Option<Self> {
        let mut seen = HashSet::new();
        let watched: Vec<&CatalogItem> = profile
            .watched
            .iter()
            .filter(|title| seen.insert(title.as_str()))
            .filter_map(|title| catalog.iter().find(|item| &item.title == title))
            .collect();

        if watched.is_empty() {
            return None;
        }

        let mut genre_weights: HashMap<String, f64> = HashMap::new();
        let mut studio_counts: HashMap<String, f64> = HashMap::new();

        for item in &watched {
            let weight = community
                .user_rating(&profile.username, &item.title)
                .map(|rating| rating / weights.user_rating_divisor)
                .unwrap_or(1.0);

            for genre in genre_keys(&item.genres) {
                *genre_weights.entry(genre).or_default() += weight;
            }
            if let Some(studio) = item.studio_name() {
                *studio_counts.entry(normalize_compact(studio)).or_default() += 1.0;
            }
        }

        Some(Self {
            watched_count: watched.len() as f64,
            genre_weights,
            studio_counts,
        })
    }
}

/// Preference scorer bound to one user, catalog and community snapshot.
///
/// Watched items are excluded before scoring.
#[derive(Debug, Clone)]
pub struct PreferenceScorer<'a> {
    profile: &'a UserProfile,
    community: &'a CommunityContext,
    favorite_genres: HashSet<String>,
    history: Option<WatchHistory>,
    weights: PreferenceWeights,
}

impl<'a> PreferenceScorer<'a> {
    pub fn new(
        profile: &'a UserProfile,
        catalog: &[CatalogItem],
        community: &'a CommunityContext,
    ) -> Self {
        Self::with_weights(profile, catalog, community, PreferenceWeights::V1)
    }

    pub fn with_weights(
        profile: &'a UserProfile,
        catalog: &[CatalogItem],
        community: &'a CommunityContext,
        weights: PreferenceWeights,
    ) -> Self {
        let history = if profile.watched.is_empty() {
            None
        } else {
            WatchHistory::build(profile, catalog, community, &weights)
        };

        Self {
            profile,
            community,
            favorite_genres: genre_keys(&profile.favorite_genres),
            history,
            weights,
        }
    }

    /// Genre affinity sub-score.
    pub fn genre_affinity(&self, item: &CatalogItem) -> f64 {
        let item_genres = genre_keys(&item.genres);
        if self.favorite_genres.is_empty() || item_genres.is_empty() {
            return NEUTRAL_SCORE;
        }

        let shared = item_genres.intersection(&self.favorite_genres).count();
        (SUB_SCORE_CAP * shared as f64 / self.favorite_genres.len() as f64).min(SUB_SCORE_CAP)
    }

    /// Watch history sub-score, including the recent activity bonus.
    pub fn history_affinity(&self, item: &CatalogItem) -> f64 {
        let Some(history) = &self.history else {
            return NEUTRAL_SCORE;
        };
        let item_genres = genre_keys(&item.genres);

        let genre_term: f64 = item_genres
            .iter()
            .filter_map(|genre| history.genre_weights.get(genre))
            .map(|weight| weight / history.watched_count * self.weights.history_genre)
            .sum();

        let studio_term = item
            .studio_name()
            .and_then(|studio| history.studio_counts.get(&normalize_compact(studio)))
            .map(|count| count / history.watched_count * self.weights.history_studio)
            .unwrap_or(0.0);

        let recent_term = self.recent_activity_bonus(&item_genres) * self.weights.recent_activity;

        (genre_term + studio_term + recent_term).min(SUB_SCORE_CAP)
    }

    /// Community rating sub-score.
    pub fn rating_affinity(&self, item: &CatalogItem) -> f64 {
        match self.community.average_rating(&item.title) {
            Some(average) => {
                (average / self.weights.community_rating_divisor * SUB_SCORE_CAP).min(SUB_SCORE_CAP)
            }
            None => NEUTRAL_SCORE,
        }
    }

    /// Fraction of the item's genres shared with each recent comment or
    /// favorite, weighted and summed, capped at 1.
    fn recent_activity_bonus(&self, item_genres: &HashSet<String>) -> f64 {
        if item_genres.is_empty() {
            return 0.0;
        }

        let overlap = |activity: &RecentActivity| {
            let shared = genre_keys(&activity.genres)
                .intersection(item_genres)
                .count();
            shared as f64 / item_genres.len() as f64
        };

        let comments: f64 = self
            .community
            .recent_comments
            .iter()
            .map(|activity| overlap(activity) * self.weights.recent_comment)
            .sum();
        let favorites: f64 = self
            .community
            .recent_favorites
            .iter()
            .map(|activity| overlap(activity) * self.weights.recent_favorite)
            .sum();

        (comments + favorites).min(1.0)
    }
}

impl Scorer for PreferenceScorer<'_> {
    fn name(&self) -> &'static str {
        "preference"
    }

    fn score(&self, item: &CatalogItem) -> Score {
        let breakdown = ScoreBreakdown {
            genre: self.genre_affinity(item),
            history: self.history_affinity(item),
            rating: self.rating_affinity(item),
        };
        let total = breakdown.genre * self.weights.genre
            + breakdown.history * self.weights.history
            + breakdown.rating * self.weights.rating;

        Score {
            value: total,
            breakdown: Some(breakdown),
        }
    }

    fn drops_non_positive(&self) -> bool {
        false
    }

    fn excludes(&self, item: &CatalogItem) -> bool {
        self.profile.has_watched(&item.title)
    }
}
