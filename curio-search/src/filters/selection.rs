//! Caller-facing filter selection and its string boundary.

use std::str::FromStr;

use chrono::NaiveDate;

use crate::errors::SearchError;

/// Release window relative to "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseWindow {
    /// Released in the current calendar quarter
    ThisSeason,
    ThisYear,
    LastYear,
    /// Released two or more calendar years ago
    TwoPlusYearsAgo,
    /// Released on or after the given date
    Since(NaiveDate),
}

impl FromStr for ReleaseWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "this-season" => Ok(ReleaseWindow::ThisSeason),
            "this-year" => Ok(ReleaseWindow::ThisYear),
            "last-year" => Ok(ReleaseWindow::LastYear),
            "older" => Ok(ReleaseWindow::TwoPlusYearsAgo),
            other => NaiveDate::parse_from_str(other, "%Y-%m-%d")
                .map(ReleaseWindow::Since)
                .map_err(|_| {
                    "expected this-season, this-year, last-year, older or YYYY-MM-DD".to_string()
                }),
        }
    }
}

/// One value per filterable attribute; `None` leaves the attribute unconstrained.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSelection {
    pub genre: Option<String>,
    pub release: Option<ReleaseWindow>,
    pub status: Option<String>,
    pub season: Option<String>,
    pub min_rating: Option<f64>,
    pub source: Option<String>,
}

impl FilterSelection {
    /// Recognized filter keys.
    pub const KEYS: [&'static str; 6] = ["genre", "release", "status", "season", "min_rating", "source"];

    /// Builds a selection from `key=value` style pairs.
    ///
    /// Empty values leave the filter unset. Later pairs override earlier ones.
    ///
    /// # Errors
    /// - `SearchError::UnknownFilterKey` - Key is not in [`Self::KEYS`]
    /// - `SearchError::InvalidFilterValue` - Release or rating value does not parse
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, SearchError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut selection = Self::default();

        for (key, value) in pairs {
            let key = key.as_ref().trim();
            let value = value.as_ref().trim();
            let text = (!value.is_empty()).then(|| value.to_string());

            match key {
                "genre" => selection.genre = text,
                "status" => selection.status = text,
                "season" => selection.season = text,
                "source" => selection.source = text,
                "release" => {
                    selection.release = text
                        .map(|v| v.parse::<ReleaseWindow>())
                        .transpose()
                        .map_err(|reason| invalid(key, value, reason))?;
                }
                "min_rating" => {
                    selection.min_rating = text
                        .map(|v| match v.parse::<f64>() {
                            Ok(rating) if rating.is_finite() => Ok(rating),
                            _ => Err("expected a number".to_string()),
                        })
                        .transpose()
                        .map_err(|reason| invalid(key, value, reason))?;
                }
                _ => {
                    return Err(SearchError::UnknownFilterKey {
                        key: key.to_string(),
                    });
                }
            }
        }

        Ok(selection)
    }

    /// Whether no attribute is constrained.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn invalid(key: &str, value: &str, reason: String) -> SearchError {
    SearchError::InvalidFilterValue {
        key: key.to_string(),
        value: value.to_string(),
        reason,
    }
}
