//! Centralized configuration for Curio.
//!
//! Result sizes, activity windows and data locations are defined here
//! instead of being repeated at every call site.

use std::path::PathBuf;

/// Longest accepted recent-activity window, roughly a century.
pub const MAX_RECENT_WINDOW_DAYS: i64 = 36_500;

/// Central configuration for all Curio components.
///
/// Supports environment variable overrides for runtime customization.
#[derive(Debug, Clone, Default)]
pub struct CurioConfig {
    pub ranking: RankingConfig,
    pub snapshot: SnapshotConfig,
}

/// Result-size bounds and activity windows used when ranking.
#[derive(Debug, Clone)]
pub struct RankingConfig {
    /// Result bound for search, browse and recommendation lists
    pub default_limit: usize,
    /// Result bound for the related items carousel
    pub related_limit: usize,
    /// Result bound for the trending list
    pub trending_limit: usize,
    /// How far back comments and favorites count as recent activity
    pub recent_window_days: i64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            related_limit: 8,
            trending_limit: 10,
            recent_window_days: 30,
        }
    }
}

/// Location of the catalog snapshot files.
#[derive(Debug, Clone)]
pub struct SnapshotConfig {
    /// Directory holding catalog.json, profiles.json and comments.json
    pub data_dir: PathBuf,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
        }
    }
}

impl CurioConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Unparsable values are ignored and the default is kept.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(limit) = std::env::var("CURIO_DEFAULT_LIMIT")
            && let Ok(value) = limit.parse::<usize>()
        {
            config.ranking.default_limit = value;
        }

        if let Ok(limit) = std::env::var("CURIO_RELATED_LIMIT")
            && let Ok(value) = limit.parse::<usize>()
        {
            config.ranking.related_limit = value;
        }

        if let Ok(limit) = std::env::var("CURIO_TRENDING_LIMIT")
            && let Ok(value) = limit.parse::<usize>()
        {
            config.ranking.trending_limit = value;
        }

        if let Ok(days) = std::env::var("CURIO_RECENT_WINDOW_DAYS") {
            match parse_window_days(&days) {
                Some(value) => config.ranking.recent_window_days = value,
                None => tracing::warn!(
                    "Ignoring CURIO_RECENT_WINDOW_DAYS={}, expected 0..={}",
                    days,
                    MAX_RECENT_WINDOW_DAYS
                ),
            }
        }

        if let Ok(dir) = std::env::var("CURIO_SNAPSHOT_DIR") {
            config.snapshot.data_dir = PathBuf::from(dir);
        }

        config
    }

    /// Creates a configuration for tests with small, predictable bounds.
    pub fn for_testing() -> Self {
        Self {
            ranking: RankingConfig {
                default_limit: 5,
                related_limit: 3,
                trending_limit: 5,
                recent_window_days: 30,
            },
            ..Default::default()
        }
    }
}

/// Parses a window length, rejecting negative and out-of-range values.
fn parse_window_days(raw: &str) -> Option<i64> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|days| (0..=MAX_RECENT_WINDOW_DAYS).contains(days))
}
