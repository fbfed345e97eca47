//! Community engagement: comments, ratings and recent activity views.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{CatalogItem, UserProfile};

/// A comment left on a catalog item, optionally carrying a rating (0-10).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentRecord {
    pub username: String,
    #[serde(default)]
    pub rating: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

impl CommentRecord {
    pub fn new(username: impl Into<String>, rating: Option<f64>, timestamp: DateTime<Utc>) -> Self {
        Self {
            username: username.into(),
            rating,
            timestamp,
        }
    }
}

/// A recent comment or favorite, reduced to the item's title and genres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentActivity {
    pub title: String,
    pub genres: Vec<String>,
}

/// Community snapshot consumed by the popularity and preference scorers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommunityContext {
    /// Comment records keyed by catalog item title
    #[serde(default)]
    pub comments: HashMap<String, Vec<CommentRecord>>,
    /// The profile's comments inside the recent-activity window
    #[serde(default)]
    pub recent_comments: Vec<RecentActivity>,
    /// The profile's favorites inside the recent-activity window
    #[serde(default)]
    pub recent_favorites: Vec<RecentActivity>,
}

impl CommunityContext {
    pub fn new(comments: HashMap<String, Vec<CommentRecord>>) -> Self {
        Self {
            comments,
            ..Default::default()
        }
    }

    pub fn comments_for(&self, title: &str) -> &[CommentRecord] {
        self.comments.get(title).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn comment_count(&self, title: &str) -> usize {
        self.comments_for(title).len()
    }

    /// Mean of every rating recorded against the title, `None` without ratings.
    pub fn average_rating(&self, title: &str) -> Option<f64> {
        let ratings: Vec<f64> = self
            .comments_for(title)
            .iter()
            .filter_map(|comment| comment.rating)
            .collect();

        if ratings.is_empty() {
            None
        } else {
            Some(ratings.iter().sum::<f64>() / ratings.len() as f64)
        }
    }

    /// The user's most recent rating for the title.
    pub fn user_rating(&self, username: &str, title: &str) -> Option<f64> {
        self.comments_for(title)
            .iter()
            .filter(|comment| comment.username == username && comment.rating.is_some())
            .max_by_key(|comment| comment.timestamp)
            .and_then(|comment| comment.rating)
    }

    /// Extracts the profile's recent comments and favorites.
    ///
    /// Activity older than `window_days` before `now`, or on titles missing
    /// from the catalog, is left out. A window reaching past the earliest
    /// representable time counts every activity as recent.
    pub fn with_recent_activity(
        mut self,
        profile: &UserProfile,
        catalog: &[CatalogItem],
        now: DateTime<Utc>,
        window_days: i64,
    ) -> Self {
        let cutoff = Duration::try_days(window_days)
            .and_then(|window| now.checked_sub_signed(window))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let genres_of = |title: &str| {
            catalog
                .iter()
                .find(|item| item.title == title)
                .map(|item| RecentActivity {
                    title: item.title.clone(),
                    genres: item.genres.clone(),
                })
        };

        let mut recent_comments = Vec::new();
        for (title, comments) in &self.comments {
            let recent = comments
                .iter()
                .filter(|c| c.username == profile.username && c.timestamp >= cutoff)
                .count();
            if recent == 0 {
                continue;
            }
            match genres_of(title) {
                Some(activity) => {
                    recent_comments.extend(std::iter::repeat_n(activity, recent));
                }
                None => tracing::debug!("Skipping recent comments on unknown title '{}'", title),
            }
        }
        // HashMap iteration order is unspecified
        recent_comments.sort_by(|a, b| a.title.cmp(&b.title));

        let recent_favorites = profile
            .favorites
            .iter()
            .filter(|title| {
                profile
                    .favorited_at
                    .get(title.as_str())
                    .is_some_and(|at| *at >= cutoff)
            })
            .filter_map(|title| genres_of(title))
            .collect();

        self.recent_comments = recent_comments;
        self.recent_favorites = recent_favorites;
        self
    }
}
