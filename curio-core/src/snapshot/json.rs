//! JSON file snapshot source.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::SnapshotSource;
use crate::domain::{CatalogItem, CommentRecord, UserProfile};
use crate::{CurioError, Result};

const CATALOG_FILE: &str = "catalog.json";
const PROFILES_FILE: &str = "profiles.json";
const COMMENTS_FILE: &str = "comments.json";

/// Reads snapshots from `catalog.json`, `profiles.json` and `comments.json`
/// inside one data directory.
#[derive(Debug, Clone)]
pub struct JsonSnapshotSource {
    data_dir: PathBuf,
}

impl JsonSnapshotSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    async fn read_json<T: DeserializeOwned>(&self, file_name: &str) -> Result<T> {
        let path = self.data_dir.join(file_name);
        let contents = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| CurioError::Snapshot {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        serde_json::from_str(&contents).map_err(|e| CurioError::Snapshot {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl SnapshotSource for JsonSnapshotSource {
    async fn load_catalog(&self) -> Result<Vec<CatalogItem>> {
        let catalog: Vec<CatalogItem> = self.read_json(CATALOG_FILE).await?;
        tracing::info!("Loaded {} catalog items from {}", catalog.len(), self.data_dir.display());
        Ok(catalog)
    }

    async fn load_profile(&self, username: &str) -> Result<UserProfile> {
        let profiles: Vec<UserProfile> = self.read_json(PROFILES_FILE).await?;
        profiles
            .into_iter()
            .find(|profile| profile.username == username)
            .ok_or_else(|| CurioError::ProfileNotFound {
                username: username.to_string(),
            })
    }

    async fn load_comments(&self) -> Result<HashMap<String, Vec<CommentRecord>>> {
        // Missing comment data is a normal state for a fresh catalog
        if !tokio::fs::try_exists(self.data_dir.join(COMMENTS_FILE)).await? {
            tracing::warn!(
                "No {} in {}, continuing without community data",
                COMMENTS_FILE,
                self.data_dir.display()
            );
            return Ok(HashMap::new());
        }

        let comments: HashMap<String, Vec<CommentRecord>> = self.read_json(COMMENTS_FILE).await?;
        tracing::info!("Loaded comments for {} titles", comments.len());
        Ok(comments)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    async fn write(dir: &TempDir, name: &str, contents: &str) {
        tokio::fs::write(dir.path().join(name), contents).await.unwrap();
    }

    #[tokio::test]
    async fn test_load_catalog_and_profile() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            CATALOG_FILE,
            r#"[
                {"id": "1", "title": "Monster", "genres": ["Mystery"], "score": 8.8},
                {"id": "2", "title": "Trigun"}
            ]"#,
        )
        .await;
        write(
            &dir,
            PROFILES_FILE,
            r#"[{"username": "kai", "favorite_genres": ["Mystery"], "watched": ["Trigun"]}]"#,
        )
        .await;

        let source = JsonSnapshotSource::new(dir.path());
        let catalog = source.load_catalog().await.unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].score, Some(8.8));
        assert_eq!(catalog[1].score, None);

        let profile = source.load_profile("kai").await.unwrap();
        assert!(profile.has_watched("Trigun"));

        let missing = source.load_profile("nobody").await;
        assert!(matches!(missing, Err(CurioError::ProfileNotFound { .. })));
    }

    #[tokio::test]
    async fn test_missing_comments_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let source = JsonSnapshotSource::new(dir.path());
        assert!(source.load_comments().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_catalog_reports_path() {
        let dir = TempDir::new().unwrap();
        write(&dir, CATALOG_FILE, "{ not json").await;

        let source = JsonSnapshotSource::new(dir.path());
        match source.load_catalog().await {
            Err(CurioError::Snapshot { path, .. }) => assert!(path.ends_with(CATALOG_FILE)),
            other => panic!("expected snapshot error, got {other:?}"),
        }
    }
}
