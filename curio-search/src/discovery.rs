//! Discovery service used by the application's pages.
//!
//! Every page picks a scorer and filters here instead of carrying its own
//! copy of a formula: the search box and catalog page use relevance (or
//! popularity without a query), the item page uses related items, and the
//! recommendation page combines preference, watched similarity and trending.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use curio_core::config::RankingConfig;
use curio_core::{CatalogItem, CommentRecord, CommunityContext, UserProfile};
use serde::Serialize;

use crate::filters::{FilterPipeline, FilterSelection};
use crate::normalize::normalize_compact;
use crate::ranking::{RankingPipeline, ScoredResult};
use crate::scoring::{
    PopularityScorer, PreferenceScorer, RelatedScorer, RelevanceScorer, WatchedSimilarityScorer,
};

/// Free-text query, filter selection and result bound for one search.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySpec {
    pub query: String,
    pub filters: FilterSelection,
    pub limit: usize,
}

impl QuerySpec {
    pub fn new(query: impl Into<String>, limit: usize) -> Self {
        Self {
            query: query.into(),
            filters: FilterSelection::default(),
            limit,
        }
    }

    pub fn with_filters(mut self, filters: FilterSelection) -> Self {
        self.filters = filters;
        self
    }
}

/// Every list on the recommendation page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendations<'a> {
    pub by_genre: Vec<ScoredResult<'a>>,
    pub similar_to_watched: Vec<ScoredResult<'a>>,
    pub trending: Vec<ScoredResult<'a>>,
}

/// Ranking entry points configured per page.
///
/// Holds no catalog state; every call ranks the snapshot it is given.
#[derive(Debug, Clone)]
pub struct DiscoveryService {
    config: RankingConfig,
    now: DateTime<Utc>,
}

impl DiscoveryService {
    /// Create a service whose release buckets and activity windows are
    /// relative to `now`.
    pub fn new(config: RankingConfig, now: DateTime<Utc>) -> Self {
        Self { config, now }
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    /// Search box: relevance-ranked matches. An empty query matches nothing.
    pub fn search<'a>(
        &self,
        catalog: &'a [CatalogItem],
        request: &QuerySpec,
    ) -> Vec<ScoredResult<'a>> {
        let filters = FilterPipeline::new(&request.filters, self.today());
        let scorer = RelevanceScorer::new(&request.query);
        tracing::debug!("Searching {} items for '{}'", catalog.len(), scorer.query());
        RankingPipeline::rank(catalog, &filters, &scorer, request.limit)
    }

    /// Catalog page: relevance when a query is typed, otherwise every
    /// filtered item ordered by popularity.
    pub fn browse<'a>(
        &self,
        catalog: &'a [CatalogItem],
        request: &QuerySpec,
        community: &CommunityContext,
    ) -> Vec<ScoredResult<'a>> {
        if !normalize_compact(&request.query).is_empty() {
            return self.search(catalog, request);
        }
        let filters = FilterPipeline::new(&request.filters, self.today());
        RankingPipeline::rank(catalog, &filters, &PopularityScorer::new(community), request.limit)
    }

    /// Related items carousel for `target`.
    pub fn related<'a>(
        &self,
        catalog: &'a [CatalogItem],
        target: &CatalogItem,
    ) -> Vec<ScoredResult<'a>> {
        RankingPipeline::rank(
            catalog,
            &FilterPipeline::unfiltered(self.today()),
            &RelatedScorer::new(target),
            self.config.related_limit,
        )
    }

    /// Trending list by community engagement.
    pub fn trending<'a>(
        &self,
        catalog: &'a [CatalogItem],
        community: &CommunityContext,
    ) -> Vec<ScoredResult<'a>> {
        RankingPipeline::rank(
            catalog,
            &FilterPipeline::unfiltered(self.today()),
            &PopularityScorer::new(community),
            self.config.trending_limit,
        )
    }

    /// Genre-based recommendations; watched items never appear.
    pub fn recommend_by_genre<'a>(
        &self,
        catalog: &'a [CatalogItem],
        profile: &UserProfile,
        community: &CommunityContext,
    ) -> Vec<ScoredResult<'a>> {
        let scorer = PreferenceScorer::new(profile, catalog, community);
        RankingPipeline::rank(
            catalog,
            &FilterPipeline::unfiltered(self.today()),
            &scorer,
            self.config.default_limit,
        )
    }

    /// Items similar to everything the user watched; watched items never appear.
    pub fn recommend_similar_to_watched<'a>(
        &self,
        catalog: &'a [CatalogItem],
        profile: &UserProfile,
    ) -> Vec<ScoredResult<'a>> {
        let scorer = WatchedSimilarityScorer::new(profile, catalog);
        RankingPipeline::rank(
            catalog,
            &FilterPipeline::unfiltered(self.today()),
            &scorer,
            self.config.default_limit,
        )
    }

    /// Builds the community snapshot for a profile, extracting its recent
    /// comments and favorites within the configured window.
    pub fn community_for(
        &self,
        profile: &UserProfile,
        catalog: &[CatalogItem],
        comments: HashMap<String, Vec<CommentRecord>>,
    ) -> CommunityContext {
        CommunityContext::new(comments).with_recent_activity(
            profile,
            catalog,
            self.now,
            self.config.recent_window_days,
        )
    }

    /// The whole recommendation page.
    pub fn recommendations<'a>(
        &self,
        catalog: &'a [CatalogItem],
        profile: &UserProfile,
        community: &CommunityContext,
    ) -> Recommendations<'a> {
        let recommendations = Recommendations {
            by_genre: self.recommend_by_genre(catalog, profile, community),
            similar_to_watched: self.recommend_similar_to_watched(catalog, profile),
            trending: self.trending(catalog, community),
        };
        tracing::info!(
            "Built recommendations for '{}': {} by genre, {} similar, {} trending",
            profile.username,
            recommendations.by_genre.len(),
            recommendations.similar_to_watched.len(),
            recommendations.trending.len()
        );
        recommendations
    }
}
