//! User preference and history state.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's preferences and viewing history, consumed read-only by scorers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    /// Favorite genre tags, most preferred first
    #[serde(default)]
    pub favorite_genres: Vec<String>,
    /// Titles the user has watched
    #[serde(default)]
    pub watched: Vec<String>,
    /// Titles the user marked as favorite
    #[serde(default)]
    pub favorites: Vec<String>,
    /// When each favorite title was favorited
    #[serde(default)]
    pub favorited_at: HashMap<String, DateTime<Utc>>,
}

impl UserProfile {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Default::default()
        }
    }

    /// Whether the title is in the watched set. Titles compare exactly.
    pub fn has_watched(&self, title: &str) -> bool {
        self.watched.iter().any(|watched| watched == title)
    }

    pub fn with_favorite_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.favorite_genres = genres.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_watched<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.watched = titles.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a favorite title along with the moment it was favorited.
    pub fn with_favorite(mut self, title: impl Into<String>, at: DateTime<Utc>) -> Self {
        let title = title.into();
        self.favorited_at.insert(title.clone(), at);
        self.favorites.push(title);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_watched() {
        let profile = UserProfile::new("kai").with_watched(["Monster", "Mushishi"]);
        assert!(profile.has_watched("Monster"));
        assert!(!profile.has_watched("monster"));
        assert!(!profile.has_watched("Trigun"));
    }

    #[test]
    fn test_favorite_records_timestamp() {
        let at = Utc::now();
        let profile = UserProfile::new("kai").with_favorite("Trigun", at);
        assert_eq!(profile.favorites, vec!["Trigun".to_string()]);
        assert_eq!(profile.favorited_at.get("Trigun"), Some(&at));
    }
}
