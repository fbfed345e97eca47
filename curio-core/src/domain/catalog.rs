//! Catalog item records and their descriptive attributes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Alternative title of a catalog item (synonym, native title, English title).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeTitle {
    pub title: String,
    /// Type tag such as "English", "Japanese" or "Synonym"
    #[serde(default)]
    pub kind: String,
}

impl AlternativeTitle {
    /// Creates an alternative title with the given type tag.
    pub fn new(title: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kind: kind.into(),
        }
    }
}

/// Broadcast season descriptor, e.g. "Fall 2023".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Season {
    /// Period name ("Winter", "Spring", "Summer", "Fall")
    pub period: String,
    pub year: i32,
}

impl Season {
    pub fn new(period: impl Into<String>, year: i32) -> Self {
        Self {
            period: period.into(),
            year,
        }
    }

    /// Case-insensitive comparison of the period name, ignoring the year.
    pub fn has_period(&self, period: &str) -> bool {
        self.period.trim().eq_ignore_ascii_case(period.trim())
    }
}

/// One entry of the browsable catalog.
///
/// Every attribute except `id` and `title` may be missing in a snapshot;
/// scorers treat missing data as a neutral signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub alternative_titles: Vec<AlternativeTitle>,
    #[serde(default)]
    pub genres: Vec<String>,
    /// Community score on a 0-10 scale
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub episodes: Option<u32>,
    #[serde(default)]
    pub studio: Option<String>,
    /// Adaptation origin ("Manga", "Light novel", "Original", ...)
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub season: Option<Season>,
    /// Airing status tag ("Airing", "Completed", "Announced")
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub favorites: u64,
    #[serde(default)]
    pub synopsis: Option<String>,
}

impl CatalogItem {
    /// Creates an item with only identifier and title populated.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            alternative_titles: Vec::new(),
            genres: Vec::new(),
            score: None,
            episodes: None,
            studio: None,
            source: None,
            release_date: None,
            season: None,
            status: None,
            favorites: 0,
            synopsis: None,
        }
    }

    /// Community score with absence treated as zero.
    pub fn numeric_score(&self) -> f64 {
        self.score.unwrap_or(0.0)
    }

    /// Studio name, `None` when missing or blank.
    pub fn studio_name(&self) -> Option<&str> {
        non_blank(self.studio.as_deref())
    }

    /// Source medium, `None` when missing or blank.
    pub fn source_medium(&self) -> Option<&str> {
        non_blank(self.source.as_deref())
    }

    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_alternative_title(mut self, title: AlternativeTitle) -> Self {
        self.alternative_titles.push(title);
        self
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn with_studio(mut self, studio: impl Into<String>) -> Self {
        self.studio = Some(studio.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_release_date(mut self, date: NaiveDate) -> Self {
        self.release_date = Some(date);
        self
    }

    pub fn with_season(mut self, season: Season) -> Self {
        self.season = Some(season);
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
