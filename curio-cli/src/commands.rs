//! CLI command implementations

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Subcommand;
use curio_core::{
    CatalogItem, CommunityContext, CurioConfig, CurioError, DemoSnapshotSource, JsonSnapshotSource,
    SnapshotSource,
};
use curio_search::{DiscoveryService, FilterSelection, QuerySpec, ScoredResult, normalize_compact};

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Relevance-ranked search over titles, alternative titles and genres
    Search {
        /// Free-text query
        query: String,
        /// Filter as key=value (genre, release, status, season, min_rating, source)
        #[arg(short, long = "filter", value_parser = parse_filter)]
        filters: Vec<(String, String)>,
        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Browse the catalog by popularity, optionally narrowed by a query
    Browse {
        /// Optional free-text query
        #[arg(short, long, default_value = "")]
        query: String,
        /// Filter as key=value
        #[arg(short, long = "filter", value_parser = parse_filter)]
        filters: Vec<(String, String)>,
        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Items related to a title
    Related {
        /// Title of the item to find relations for
        title: String,
    },
    /// Items with the most community engagement
    Trending,
    /// Full recommendation page for a user
    Recommend {
        /// Username whose profile drives the recommendations
        username: String,
    },
}

/// Handle the CLI command
///
/// # Errors
/// - `CurioError::Snapshot` - Catalog data could not be loaded
/// - `CurioError::NotFound` - Unknown title
/// - `CurioError::ProfileNotFound` - Unknown username
/// - `SearchError` - Malformed filter selection
pub async fn handle_command(command: Commands, config: &CurioConfig, demo: bool) -> Result<()> {
    let source = snapshot_source(config, demo);
    let service = DiscoveryService::new(config.ranking.clone(), Utc::now());

    match command {
        Commands::Search {
            query,
            filters,
            limit,
        } => {
            let catalog = source.load_catalog().await?;
            let request = build_query(query, filters, limit.unwrap_or(config.ranking.default_limit))?;
            print_results("Search results", &service.search(&catalog, &request));
            Ok(())
        }
        Commands::Browse {
            query,
            filters,
            limit,
        } => {
            let catalog = source.load_catalog().await?;
            let comments = source.load_comments().await?;
            let community = CommunityContext::new(comments);
            let request = build_query(query, filters, limit.unwrap_or(config.ranking.default_limit))?;
            print_results("Catalog", &service.browse(&catalog, &request, &community));
            Ok(())
        }
        Commands::Related { title } => {
            let catalog = source.load_catalog().await?;
            let target = find_by_title(&catalog, &title)?;
            print_results(
                &format!("Related to {}", target.title),
                &service.related(&catalog, target),
            );
            Ok(())
        }
        Commands::Trending => {
            let catalog = source.load_catalog().await?;
            let comments = source.load_comments().await?;
            let community = CommunityContext::new(comments);
            print_results("Trending", &service.trending(&catalog, &community));
            Ok(())
        }
        Commands::Recommend { username } => {
            let catalog = source.load_catalog().await?;
            let profile = source.load_profile(&username).await?;
            let comments = source.load_comments().await?;
            let community = service.community_for(&profile, &catalog, comments);

            let page = service.recommendations(&catalog, &profile, &community);
            print_results("Based on your genres", &page.by_genre);
            print_results("Similar to what you watched", &page.similar_to_watched);
            print_results("Trending", &page.trending);
            Ok(())
        }
    }
}

fn snapshot_source(config: &CurioConfig, demo: bool) -> Box<dyn SnapshotSource> {
    if demo {
        tracing::info!("Using built-in demo catalog");
        Box::new(DemoSnapshotSource::new())
    } else {
        tracing::info!("Loading snapshot from {}", config.snapshot.data_dir.display());
        Box::new(JsonSnapshotSource::new(config.snapshot.data_dir.clone()))
    }
}

fn build_query(query: String, filters: Vec<(String, String)>, limit: usize) -> Result<QuerySpec> {
    let selection = FilterSelection::from_pairs(filters).context("Invalid filter")?;
    Ok(QuerySpec::new(query, limit).with_filters(selection))
}

/// Finds an item by title, ignoring case and punctuation.
fn find_by_title<'a>(catalog: &'a [CatalogItem], title: &str) -> Result<&'a CatalogItem> {
    let wanted = normalize_compact(title);
    catalog
        .iter()
        .find(|item| normalize_compact(&item.title) == wanted)
        .ok_or_else(|| {
            CurioError::NotFound {
                title: title.to_string(),
            }
            .into()
        })
}

/// Parses a `key=value` filter argument.
fn parse_filter(arg: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{arg}'"))?;
    Ok((key.trim().to_string(), value.trim().to_string()))
}

fn print_results(heading: &str, results: &[ScoredResult<'_>]) {
    println!("{heading}");
    println!("{:-<60}", "");

    if results.is_empty() {
        println!("No results.");
        println!();
        return;
    }

    for (rank, result) in results.iter().enumerate() {
        match &result.breakdown {
            Some(breakdown) => println!(
                "{:>2}. {:<36} {:>7.2}  (genre {:.0}, history {:.0}, rating {:.0})",
                rank + 1,
                result.item.title,
                result.score,
                breakdown.genre,
                breakdown.history,
                breakdown.rating
            ),
            None => println!(
                "{:>2}. {:<36} {:>7.2}",
                rank + 1,
                result.item.title,
                result.score
            ),
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter() {
        assert_eq!(
            parse_filter("genre=Action").unwrap(),
            ("genre".to_string(), "Action".to_string())
        );
        assert_eq!(
            parse_filter(" status = Completed ").unwrap(),
            ("status".to_string(), "Completed".to_string())
        );
        assert!(parse_filter("genre").is_err());
    }

    #[test]
    fn test_find_by_title_ignores_case_and_punctuation() {
        let catalog = vec![
            CatalogItem::new("1", "Fullmetal Alchemist: Brotherhood"),
            CatalogItem::new("2", "Monster"),
        ];

        let found = find_by_title(&catalog, "fullmetal alchemist brotherhood").unwrap();
        assert_eq!(found.id, "1");
        assert!(find_by_title(&catalog, "Bleach").is_err());
    }

    #[test]
    fn test_build_query_rejects_unknown_filter() {
        let filters = vec![("mood".to_string(), "happy".to_string())];
        assert!(build_query("naruto".to_string(), filters, 10).is_err());
    }

    #[tokio::test]
    async fn test_demo_commands_run() {
        let config = CurioConfig::for_testing();
        let commands = vec![
            Commands::Search {
                query: "naruto".to_string(),
                filters: vec![("genre".to_string(), "Action".to_string())],
                limit: None,
            },
            Commands::Browse {
                query: String::new(),
                filters: Vec::new(),
                limit: Some(3),
            },
            Commands::Related {
                title: "Naruto".to_string(),
            },
            Commands::Trending,
            Commands::Recommend {
                username: "demo".to_string(),
            },
        ];

        for command in commands {
            handle_command(command, &config, true).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_unknown_user_is_reported_as_missing_profile() {
        let config = CurioConfig::for_testing();
        let err = handle_command(
            Commands::Recommend {
                username: "nobody".to_string(),
            },
            &config,
            true,
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<CurioError>(),
            Some(CurioError::ProfileNotFound { .. })
        ));
    }
}
