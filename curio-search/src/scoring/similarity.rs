//! Pairwise item affinity for related items and "similar to watched".

use curio_core::{CatalogItem, UserProfile};

use super::{Score, Scorer, genre_keys};
use crate::normalize::normalize_compact;
use crate::weights::SimilarityWeights;

/// Score how related `b` is to `a` with the V1 weights.
///
/// Symmetry is not part of the contract, even though the current rules
/// happen to be symmetric.
pub fn score_similarity(a: &CatalogItem, b: &CatalogItem) -> f64 {
    similarity_with(a, b, &SimilarityWeights::V1)
}

fn similarity_with(a: &CatalogItem, b: &CatalogItem, weights: &SimilarityWeights) -> f64 {
    let a_genres = genre_keys(&a.genres);
    let b_genres = genre_keys(&b.genres);
    let shared = a_genres.intersection(&b_genres).count();
    let mut score = shared as f64 * weights.shared_genre;

    if same_text(a.studio_name(), b.studio_name()) {
        score += weights.same_studio;
    }
    if same_text(a.source_medium(), b.source_medium()) {
        score += weights.same_source;
    }
    if let (Some(sa), Some(sb)) = (&a.season, &b.season)
        && sa.has_period(&sb.period)
        && sa.year.abs_diff(sb.year) <= weights.max_season_year_gap
    {
        score += weights.adjacent_season;
    }

    score
}

fn same_text(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => normalize_compact(a) == normalize_compact(b),
        _ => false,
    }
}

/// Similarity to one fixed item.
#[derive(Debug, Clone)]
pub struct SimilarityScorer<'a> {
    target: &'a CatalogItem,
    weights: SimilarityWeights,
}

impl<'a> SimilarityScorer<'a> {
    pub fn new(target: &'a CatalogItem) -> Self {
        Self {
            target,
            weights: SimilarityWeights::V1,
        }
    }

    pub fn with_weights(mut self, weights: SimilarityWeights) -> Self {
        self.weights = weights;
        self
    }
}

impl Scorer for SimilarityScorer<'_> {
    fn name(&self) -> &'static str {
        "similarity"
    }

    fn score(&self, item: &CatalogItem) -> Score {
        Score::new(similarity_with(self.target, item, &self.weights))
    }

    fn drops_non_positive(&self) -> bool {
        true
    }
}

/// Related items carousel: similarity to a target, the target left out.
#[derive(Debug, Clone)]
pub struct RelatedScorer<'a> {
    inner: SimilarityScorer<'a>,
}

impl<'a> RelatedScorer<'a> {
    pub fn new(target: &'a CatalogItem) -> Self {
        Self {
            inner: SimilarityScorer::new(target),
        }
    }
}

impl Scorer for RelatedScorer<'_> {
    fn name(&self) -> &'static str {
        "related"
    }

    fn score(&self, item: &CatalogItem) -> Score {
        self.inner.score(item)
    }

    fn drops_non_positive(&self) -> bool {
        true
    }

    fn excludes(&self, item: &CatalogItem) -> bool {
        item.id == self.inner.target.id
    }
}

/// Similarity averaged over every watched item that exists in the catalog.
///
/// Watched items themselves are excluded before scoring.
#[derive(Debug, Clone)]
pub struct WatchedSimilarityScorer<'a> {
    profile: &'a UserProfile,
    watched: Vec<&'a CatalogItem>,
    weights: SimilarityWeights,
}

impl<'a> WatchedSimilarityScorer<'a> {
    pub fn new(profile: &'a UserProfile, catalog: &'a [CatalogItem]) -> Self {
        let watched: Vec<&CatalogItem> = catalog
            .iter()
            .filter(|item| profile.has_watched(&item.title))
            .collect();
        if watched.len() < profile.watched.len() {
            tracing::debug!(
                "{} of {} watched titles for '{}' are not in the catalog",
                profile.watched.len() - watched.len(),
                profile.watched.len(),
                profile.username
            );
        }

        Self {
            profile,
            watched,
            weights: SimilarityWeights::V1,
        }
    }
}

impl Scorer for WatchedSimilarityScorer<'_> {
    fn name(&self) -> &'static str {
        "similar-to-watched"
    }

    fn score(&self, item: &CatalogItem) -> Score {
        if self.watched.is_empty() {
            return Score::new(0.0);
        }
        let total: f64 = self
            .watched
            .iter()
            .map(|watched| similarity_with(watched, item, &self.weights))
            .sum();
        Score::new(total / self.watched.len() as f64)
    }

    fn drops_non_positive(&self) -> bool {
        true
    }

    fn excludes(&self, item: &CatalogItem) -> bool {
        self.profile.has_watched(&item.title)
    }
}

#[cfg(test)]
mod tests {
    use curio_core::Season;

    use super::*;

    fn fully_related_pair() -> (CatalogItem, CatalogItem) {
        let a = CatalogItem::new("1", "Mob Psycho 100")
            .with_genres(["Action", "Comedy", "Supernatural"])
            .with_studio("Bones")
            .with_source("Web manga")
            .with_season(Season::new("Summer", 2016));
        let b = CatalogItem::new("2", "Mob Psycho 100 II")
            .with_genres(["Supernatural", "Action", "Comedy", "Drama"])
            .with_studio("Bones")
            .with_source("Web manga")
            .with_season(Season::new("summer", 2017));
        (a, b)
    }

    #[test]
    fn test_all_rules_add_up() {
        let (a, b) = fully_related_pair();
        assert_eq!(score_similarity(&a, &b), 3.0 * 2.0 + 1.0 + 1.0 + 1.0);
    }

    #[test]
    fn test_season_gap_and_period() {
        let a = CatalogItem::new("1", "A").with_season(Season::new("Fall", 2020));
        let near = CatalogItem::new("2", "B").with_season(Season::new("Fall", 2019));
        let far = CatalogItem::new("3", "C").with_season(Season::new("Fall", 2018));
        let other = CatalogItem::new("4", "D").with_season(Season::new("Spring", 2020));

        assert_eq!(score_similarity(&a, &near), 1.0);
        assert_eq!(score_similarity(&a, &far), 0.0);
        assert_eq!(score_similarity(&a, &other), 0.0);
    }

    #[test]
    fn test_extreme_season_years_do_not_overflow() {
        let ancient = CatalogItem::new("1", "A").with_season(Season::new("Fall", i32::MIN));
        let modern = CatalogItem::new("2", "B").with_season(Season::new("Fall", 1));
        let future = CatalogItem::new("3", "C").with_season(Season::new("Fall", i32::MAX));

        assert_eq!(score_similarity(&ancient, &modern), 0.0);
        assert_eq!(score_similarity(&ancient, &future), 0.0);
        assert_eq!(score_similarity(&future, &ancient), 0.0);
    }

    #[test]
    fn test_blank_studio_and_source_do_not_match() {
        let a = CatalogItem::new("1", "A").with_studio("").with_source(" ");
        let b = CatalogItem::new("2", "B").with_studio("").with_source(" ");
        assert_eq!(score_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_related_excludes_target() {
        let (a, b) = fully_related_pair();
        let scorer = RelatedScorer::new(&a);
        assert!(scorer.excludes(&a));
        assert!(!scorer.excludes(&b));
        assert_eq!(scorer.score(&b).value, 9.0);
    }

    #[test]
    fn test_watched_similarity_averages() {
        let (a, b) = fully_related_pair();
        let unrelated = CatalogItem::new("3", "Aria").with_genres(["Slice of Life"]);
        let catalog = vec![a, b, unrelated];
        let candidate = CatalogItem::new("4", "Mob Psycho 100 III")
            .with_genres(["Action"])
            .with_studio("Bones");

        let profile = UserProfile::new("kai").with_watched(["Mob Psycho 100", "Aria"]);
        let scorer = WatchedSimilarityScorer::new(&profile, &catalog);

        // (2 + 1) against Mob Psycho 100, 0 against Aria
        assert_eq!(scorer.score(&candidate).value, 1.5);
        assert!(scorer.excludes(&catalog[0]));
        assert!(!scorer.excludes(&catalog[1]));
    }

    #[test]
    fn test_no_watched_history_scores_zero() {
        let catalog = vec![CatalogItem::new("1", "Aria")];
        let profile = UserProfile::new("kai");
        let scorer = WatchedSimilarityScorer::new(&profile, &catalog);
        assert_eq!(scorer.score(&catalog[0]).value, 0.0);
    }
}
