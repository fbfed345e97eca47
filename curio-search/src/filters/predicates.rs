//! Independent boolean predicates, one per filterable attribute.

use chrono::{Datelike, NaiveDate};
use curio_core::CatalogItem;

use super::selection::{FilterSelection, ReleaseWindow};
use crate::normalize::normalize_compact;

/// A single constraint over one catalog attribute.
///
/// Unset filters never become predicates, so every variant constrains.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterPredicate {
    Genre(String),
    Release(ReleaseWindow),
    Status(String),
    Season(String),
    MinRating(f64),
    Source(String),
}

impl FilterPredicate {
    /// Turns the set values of a selection into predicates.
    pub fn from_selection(selection: &FilterSelection) -> Vec<FilterPredicate> {
        let mut predicates = Vec::new();

        if let Some(genre) = &selection.genre {
            predicates.push(FilterPredicate::Genre(normalize_compact(genre)));
        }
        if let Some(window) = selection.release {
            predicates.push(FilterPredicate::Release(window));
        }
        if let Some(status) = &selection.status {
            predicates.push(FilterPredicate::Status(normalize_compact(status)));
        }
        if let Some(season) = &selection.season {
            predicates.push(FilterPredicate::Season(season.clone()));
        }
        if let Some(rating) = selection.min_rating {
            debug_assert!(rating.is_finite(), "rating threshold must be finite");
            predicates.push(FilterPredicate::MinRating(rating));
        }
        if let Some(source) = &selection.source {
            predicates.push(FilterPredicate::Source(normalize_compact(source)));
        }

        predicates
    }

    /// Short attribute name, used in traces.
    pub fn attribute(&self) -> &'static str {
        match self {
            FilterPredicate::Genre(_) => "genre",
            FilterPredicate::Release(_) => "release",
            FilterPredicate::Status(_) => "status",
            FilterPredicate::Season(_) => "season",
            FilterPredicate::MinRating(_) => "min_rating",
            FilterPredicate::Source(_) => "source",
        }
    }

    /// Evaluates the predicate. Text values are already normalized.
    pub fn matches(&self, item: &CatalogItem, today: NaiveDate) -> bool {
        match self {
            FilterPredicate::Genre(genre) => item
                .genres
                .iter()
                .any(|g| normalize_compact(g) == *genre),
            FilterPredicate::Release(window) => item
                .release_date
                .is_some_and(|released| in_release_window(released, *window, today)),
            FilterPredicate::Status(status) => item
                .status
                .as_deref()
                .is_some_and(|s| normalize_compact(s) == *status),
            FilterPredicate::Season(period) => item
                .season
                .as_ref()
                .is_some_and(|season| season.has_period(period)),
            FilterPredicate::MinRating(threshold) => item.numeric_score() >= *threshold,
            FilterPredicate::Source(source) => item
                .source
                .as_deref()
                .is_some_and(|s| normalize_compact(s) == *source),
        }
    }
}

/// Calendar bucket check for a release date.
pub fn in_release_window(released: NaiveDate, window: ReleaseWindow, today: NaiveDate) -> bool {
    match window {
        ReleaseWindow::ThisSeason => {
            released.year() == today.year() && quarter(released) == quarter(today)
        }
        ReleaseWindow::ThisYear => released.year() == today.year(),
        ReleaseWindow::LastYear => released.year() == today.year() - 1,
        ReleaseWindow::TwoPlusYearsAgo => released.year() <= today.year() - 2,
        ReleaseWindow::Since(cutoff) => released >= cutoff,
    }
}

fn quarter(date: NaiveDate) -> u32 {
    date.month0() / 3
}

#[cfg(test)]
mod tests {
    use curio_core::Season;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_release_buckets() {
        let today = date(2026, 10, 18);

        assert!(in_release_window(date(2026, 10, 1), ReleaseWindow::ThisSeason, today));
        assert!(in_release_window(date(2026, 12, 31), ReleaseWindow::ThisSeason, today));
        assert!(!in_release_window(date(2026, 9, 30), ReleaseWindow::ThisSeason, today));
        assert!(!in_release_window(date(2025, 10, 18), ReleaseWindow::ThisSeason, today));

        assert!(in_release_window(date(2026, 1, 1), ReleaseWindow::ThisYear, today));
        assert!(in_release_window(date(2025, 6, 1), ReleaseWindow::LastYear, today));
        assert!(!in_release_window(date(2024, 6, 1), ReleaseWindow::LastYear, today));
        assert!(in_release_window(date(2024, 12, 31), ReleaseWindow::TwoPlusYearsAgo, today));
        assert!(!in_release_window(date(2025, 1, 1), ReleaseWindow::TwoPlusYearsAgo, today));

        let cutoff = ReleaseWindow::Since(date(2020, 3, 1));
        assert!(in_release_window(date(2020, 3, 1), cutoff, today));
        assert!(!in_release_window(date(2020, 2, 29), cutoff, today));
    }

    #[test]
    fn test_missing_release_date_never_matches() {
        let today = date(2026, 10, 18);
        let item = CatalogItem::new("1", "Undated");

        for window in [
            ReleaseWindow::ThisSeason,
            ReleaseWindow::ThisYear,
            ReleaseWindow::LastYear,
            ReleaseWindow::TwoPlusYearsAgo,
            ReleaseWindow::Since(date(1900, 1, 1)),
        ] {
            assert!(!FilterPredicate::Release(window).matches(&item, today));
        }
    }

    #[test]
    fn test_text_predicates_normalize() {
        let today = date(2026, 10, 18);
        let item = CatalogItem::new("1", "Mob Psycho 100")
            .with_genres(["Action", "Slice of Life"])
            .with_status("Completed")
            .with_source("Web manga")
            .with_season(Season::new("Summer", 2016));

        let selection = FilterSelection {
            genre: Some("slice of life".to_string()),
            status: Some("COMPLETED".to_string()),
            source: Some("WEB Manga".to_string()),
            season: Some("summer".to_string()),
            ..Default::default()
        };

        for predicate in FilterPredicate::from_selection(&selection) {
            assert!(predicate.matches(&item, today), "{} should match", predicate.attribute());
        }
    }

    #[test]
    fn test_season_ignores_year() {
        let today = date(2026, 10, 18);
        let item = CatalogItem::new("1", "Old Summer Show").with_season(Season::new("Summer", 1999));
        assert!(FilterPredicate::Season("Summer".to_string()).matches(&item, today));
        assert!(!FilterPredicate::Season("Winter".to_string()).matches(&item, today));
    }

    #[test]
    fn test_min_rating_treats_missing_score_as_zero() {
        let today = date(2026, 10, 18);
        let unrated = CatalogItem::new("1", "Unrated");
        let rated = CatalogItem::new("2", "Rated").with_score(7.0);

        assert!(FilterPredicate::MinRating(0.0).matches(&unrated, today));
        assert!(!FilterPredicate::MinRating(0.1).matches(&unrated, today));
        assert!(FilterPredicate::MinRating(7.0).matches(&rated, today));
        assert!(!FilterPredicate::MinRating(7.01).matches(&rated, today));
    }

    #[test]
    fn test_unset_selection_has_no_predicates() {
        assert!(FilterPredicate::from_selection(&FilterSelection::default()).is_empty());
    }
}
