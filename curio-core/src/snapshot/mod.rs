//! Catalog snapshot sources.
//!
//! The ranking engine works on whatever snapshot it is handed. Sources
//! decide where that snapshot comes from (JSON files on disk, built-in
//! demo data) and how stale it may be.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::Result;
use crate::domain::{CatalogItem, CommentRecord, UserProfile};

pub mod demo;
pub mod json;

pub use demo::DemoSnapshotSource;
pub use json::JsonSnapshotSource;

/// Trait for catalog snapshot providers.
///
/// Implementations load the collections the ranking engine consumes.
#[async_trait]
pub trait SnapshotSource: Send + Sync + std::fmt::Debug {
    /// Loads every catalog item.
    ///
    /// # Errors
    /// - `CurioError::Snapshot` - Data could not be read or parsed
    async fn load_catalog(&self) -> Result<Vec<CatalogItem>>;

    /// Loads one user's profile.
    ///
    /// # Errors
    /// - `CurioError::ProfileNotFound` - No profile with that username
    /// - `CurioError::Snapshot` - Data could not be read or parsed
    async fn load_profile(&self, username: &str) -> Result<UserProfile>;

    /// Loads comment records keyed by item title.
    ///
    /// # Errors
    /// - `CurioError::Snapshot` - Data could not be read or parsed
    async fn load_comments(&self) -> Result<HashMap<String, Vec<CommentRecord>>>;
}
