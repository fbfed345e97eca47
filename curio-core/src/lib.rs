//! Curio Core - Catalog domain types and application plumbing
//!
//! This crate provides the data shapes consumed by the ranking engine
//! (catalog items, user profiles, community activity), configuration,
//! tracing setup and loading of catalog snapshots from disk.

pub mod config;
pub mod domain;
pub mod snapshot;
pub mod tracing_setup;

// Re-export main types for convenient access
pub use config::CurioConfig;
pub use domain::{
    AlternativeTitle, CatalogItem, CommentRecord, CommunityContext, RecentActivity, Season,
    UserProfile,
};
pub use snapshot::{DemoSnapshotSource, JsonSnapshotSource, SnapshotSource};

/// Errors that can bubble up from the Curio application layer.
///
/// The ranking engine itself never fails; these cover loading snapshots
/// and configuring the surrounding application.
#[derive(Debug, thiserror::Error)]
pub enum CurioError {
    #[error("Snapshot error at {path}: {reason}")]
    Snapshot { path: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    #[error("Not found: {title}")]
    NotFound { title: String },

    #[error("Profile not found: {username}")]
    ProfileNotFound { username: String },
}

impl CurioError {
    /// Returns a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            CurioError::Snapshot { path, .. } => format!("Could not read catalog data from {path}"),
            CurioError::Io(_) => "File system error occurred".to_string(),
            CurioError::Json(_) => "Catalog data is malformed".to_string(),
            CurioError::Configuration { reason } => format!("Configuration error: {reason}"),
            CurioError::NotFound { title } => format!("No catalog entry named '{title}'"),
            CurioError::ProfileNotFound { username } => format!("No user named '{username}'"),
        }
    }

    /// Checks if this error is due to user input.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            CurioError::Configuration { .. }
                | CurioError::NotFound { .. }
                | CurioError::ProfileNotFound { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CurioError>;
