//! Ranking pipeline: filter, exclude, score, sort, truncate.

use curio_core::CatalogItem;
use serde::Serialize;

use crate::filters::FilterPipeline;
use crate::scoring::{ScoreBreakdown, Scorer};

/// A catalog item with the score that ranked it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredResult<'a> {
    pub item: &'a CatalogItem,
    pub score: f64,
    /// Present for personalized scores; the UI displays it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<ScoreBreakdown>,
}

/// Single entry point shared by search, browse, related items and
/// recommendations.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankingPipeline;

impl RankingPipeline {
    /// Rank `items` with `scorer`, keeping at most `limit` results.
    ///
    /// Steps, in order:
    /// 1. Keep items passing every filter
    /// 2. Drop items the scorer excludes (before they are scored)
    /// 3. Score, dropping non-positive scores when the scorer treats them as non-matches
    /// 4. Sort by descending score, ties kept in input order
    /// 5. Truncate to `limit`
    pub fn rank<'a>(
        items: &'a [CatalogItem],
        filters: &FilterPipeline,
        scorer: &dyn Scorer,
        limit: usize,
    ) -> Vec<ScoredResult<'a>> {
        let survivors: Vec<&CatalogItem> = items.iter().filter(|item| filters.apply(item)).collect();
        tracing::debug!(
            scorer = scorer.name(),
            "Filtered {} of {} items with {} predicates",
            survivors.len(),
            items.len(),
            filters.len()
        );

        let drops_non_positive = scorer.drops_non_positive();
        let mut results: Vec<ScoredResult<'a>> = survivors
            .into_iter()
            .filter(|item| !scorer.excludes(item))
            .filter_map(|item| {
                let score = scorer.score(item);
                if drops_non_positive && (score.value <= 0.0 || score.value.is_nan()) {
                    return None;
                }
                Some(ScoredResult {
                    item,
                    score: score.value,
                    breakdown: score.breakdown,
                })
            })
            .collect();

        // Stable sort keeps input order for equal scores
        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(limit);

        tracing::debug!(
            scorer = scorer.name(),
            "Ranked {} results (limit {})",
            results.len(),
            limit
        );
        results
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::filters::FilterSelection;
    use crate::scoring::{RelevanceScorer, Score};

    /// Scores items by a fixed table keyed on id.
    struct TableScorer {
        scores: Vec<(&'static str, f64)>,
        drops: bool,
    }

    impl Scorer for TableScorer {
        fn name(&self) -> &'static str {
            "table"
        }

        fn score(&self, item: &CatalogItem) -> Score {
            let value = self
                .scores
                .iter()
                .find(|(id, _)| *id == item.id)
                .map(|(_, score)| *score)
                .unwrap_or(0.0);
            Score::new(value)
        }

        fn drops_non_positive(&self) -> bool {
            self.drops
        }

        fn excludes(&self, item: &CatalogItem) -> bool {
            item.id == "excluded"
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn catalog() -> Vec<CatalogItem> {
        ["a", "b", "c", "d", "excluded"]
            .into_iter()
            .map(|id| CatalogItem::new(id, id.to_uppercase()))
            .collect()
    }

    #[test]
    fn test_sorts_descending_with_stable_ties() {
        let items = catalog();
        let scorer = TableScorer {
            scores: vec![("a", 1.0), ("b", 5.0), ("c", 1.0), ("d", 5.0), ("excluded", 99.0)],
            drops: false,
        };

        let ranked = RankingPipeline::rank(&items, &FilterPipeline::unfiltered(today()), &scorer, 10);
        let ids: Vec<&str> = ranked.iter().map(|r| r.item.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_drops_non_positive_only_when_asked() {
        let items = catalog();
        let keep = TableScorer {
            scores: vec![("a", 2.0), ("b", -1.0)],
            drops: false,
        };
        let drop = TableScorer {
            scores: vec![("a", 2.0), ("b", -1.0)],
            drops: true,
        };
        let filters = FilterPipeline::unfiltered(today());

        assert_eq!(RankingPipeline::rank(&items, &filters, &keep, 10).len(), 4);
        let dropped = RankingPipeline::rank(&items, &filters, &drop, 10);
        assert_eq!(dropped.len(), 1);
        assert_eq!(dropped[0].item.id, "a");
    }

    #[test]
    fn test_truncates_to_limit() {
        let items = catalog();
        let scorer = TableScorer {
            scores: vec![("a", 4.0), ("b", 3.0), ("c", 2.0), ("d", 1.0)],
            drops: true,
        };
        let filters = FilterPipeline::unfiltered(today());

        assert_eq!(RankingPipeline::rank(&items, &filters, &scorer, 2).len(), 2);
        assert!(RankingPipeline::rank(&items, &filters, &scorer, 0).is_empty());
    }

    #[test]
    fn test_empty_filtered_set_is_empty_result() {
        let items = vec![CatalogItem::new("1", "Naruto").with_genres(["Action"])];
        let selection = FilterSelection {
            genre: Some("Romance".to_string()),
            ..Default::default()
        };
        let filters = FilterPipeline::new(&selection, today());

        assert!(RankingPipeline::rank(&items, &filters, &RelevanceScorer::new("naruto"), 10).is_empty());
        assert!(RankingPipeline::rank(&[], &filters, &RelevanceScorer::new("naruto"), 10).is_empty());
    }

    #[test]
    fn test_serialized_result_keeps_breakdown() {
        let item = CatalogItem::new("1", "Monster");
        let personalized = ScoredResult {
            item: &item,
            score: 65.0,
            breakdown: Some(ScoreBreakdown {
                genre: 100.0,
                history: 50.0,
                rating: 25.0,
            }),
        };
        let plain = ScoredResult {
            item: &item,
            score: 45.0,
            breakdown: None,
        };

        let json = serde_json::to_value(&personalized).unwrap();
        assert_eq!(json["score"], 65.0);
        assert_eq!(json["item"]["title"], "Monster");
        assert_eq!(json["breakdown"]["genre"], 100.0);
        assert_eq!(json["breakdown"]["history"], 50.0);
        assert_eq!(json["breakdown"]["rating"], 25.0);

        let json = serde_json::to_value(&plain).unwrap();
        assert!(json.get("breakdown").is_none());
    }
}
