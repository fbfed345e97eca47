//! Composable catalog filters.
//!
//! A [`FilterSelection`] holds what the caller picked; [`FilterPipeline`]
//! turns it into predicates and ANDs them over each item.

use chrono::NaiveDate;
use curio_core::CatalogItem;

pub mod predicates;
pub mod selection;

pub use predicates::{FilterPredicate, in_release_window};
pub use selection::{FilterSelection, ReleaseWindow};

/// AND-combination of the predicates for one filter selection.
///
/// "Today" is fixed at construction so release buckets are stable
/// for the lifetime of one ranking call.
#[derive(Debug, Clone)]
pub struct FilterPipeline {
    predicates: Vec<FilterPredicate>,
    today: NaiveDate,
}

impl FilterPipeline {
    /// Create a pipeline for the given selection.
    pub fn new(selection: &FilterSelection, today: NaiveDate) -> Self {
        Self {
            predicates: FilterPredicate::from_selection(selection),
            today,
        }
    }

    /// Pipeline that accepts every item.
    pub fn unfiltered(today: NaiveDate) -> Self {
        Self {
            predicates: Vec::new(),
            today,
        }
    }

    /// Whether the item passes every predicate. Stops at the first failure.
    pub fn apply(&self, item: &CatalogItem) -> bool {
        self.predicates
            .iter()
            .all(|predicate| predicate.matches(item, self.today))
    }

    /// Number of constraining predicates.
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }
}
