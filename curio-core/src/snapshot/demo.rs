//! Built-in demo snapshot for development.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use super::SnapshotSource;
use crate::domain::{AlternativeTitle, CatalogItem, CommentRecord, Season, UserProfile};
use crate::{CurioError, Result};

/// Demo source serving a small, fixed catalog without touching the disk.
#[derive(Debug, Default)]
pub struct DemoSnapshotSource;

impl DemoSnapshotSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SnapshotSource for DemoSnapshotSource {
    async fn load_catalog(&self) -> Result<Vec<CatalogItem>> {
        Ok(demo_catalog())
    }

    async fn load_profile(&self, username: &str) -> Result<UserProfile> {
        if username != "demo" {
            return Err(CurioError::ProfileNotFound {
                username: username.to_string(),
            });
        }

        let mut profile = UserProfile::new("demo")
            .with_favorite_genres(["Action", "Adventure", "Fantasy"])
            .with_watched(["Naruto", "Fullmetal Alchemist: Brotherhood"]);
        if let Some(at) = timestamp(1_717_200_000) {
            profile = profile.with_favorite("Fullmetal Alchemist: Brotherhood", at);
        }
        Ok(profile)
    }

    async fn load_comments(&self) -> Result<HashMap<String, Vec<CommentRecord>>> {
        let records = [
            ("Naruto", "demo", Some(8.0), 1_717_000_000),
            ("Naruto", "sakura", Some(7.0), 1_717_100_000),
            ("Fullmetal Alchemist: Brotherhood", "demo", Some(10.0), 1_717_200_000),
            ("Fullmetal Alchemist: Brotherhood", "ed", Some(9.0), 1_717_300_000),
            ("Fullmetal Alchemist: Brotherhood", "al", None, 1_717_400_000),
            ("Frieren: Beyond Journey's End", "himmel", Some(9.5), 1_717_500_000),
            ("Monster", "tenma", Some(9.0), 1_717_600_000),
        ];

        let mut comments: HashMap<String, Vec<CommentRecord>> = HashMap::new();
        for (title, username, rating, secs) in records {
            if let Some(at) = timestamp(secs) {
                comments
                    .entry(title.to_string())
                    .or_default()
                    .push(CommentRecord::new(username, rating, at));
            }
        }
        Ok(comments)
    }
}

fn demo_catalog() -> Vec<CatalogItem> {
    let mut naruto = CatalogItem::new("20", "Naruto")
        .with_genres(["Action", "Adventure", "Fantasy"])
        .with_score(8.0)
        .with_studio("Pierrot")
        .with_source("Manga")
        .with_season(Season::new("Fall", 2002))
        .with_status("Completed")
        .with_alternative_title(AlternativeTitle::new("ナルト", "Japanese"));
    naruto.release_date = date(2002, 10, 3);
    naruto.episodes = Some(220);

    let mut shippuden = CatalogItem::new("1735", "Naruto Shippuden")
        .with_genres(["Action", "Adventure", "Fantasy"])
        .with_score(8.3)
        .with_studio("Pierrot")
        .with_source("Manga")
        .with_season(Season::new("Winter", 2007))
        .with_status("Completed")
        .with_alternative_title(AlternativeTitle::new("Naruto: Hurricane Chronicles", "English"));
    shippuden.release_date = date(2007, 2, 15);
    shippuden.episodes = Some(500);

    let mut boruto = CatalogItem::new("34566", "Boruto: Naruto Next Generations")
        .with_genres(["Action", "Adventure", "Fantasy"])
        .with_score(6.0)
        .with_studio("Pierrot")
        .with_source("Manga")
        .with_season(Season::new("Spring", 2017))
        .with_status("Completed");
    boruto.release_date = date(2017, 4, 5);

    let mut fmab = CatalogItem::new("5114", "Fullmetal Alchemist: Brotherhood")
        .with_genres(["Action", "Adventure", "Drama", "Fantasy"])
        .with_score(9.1)
        .with_studio("Bones")
        .with_source("Manga")
        .with_season(Season::new("Spring", 2009))
        .with_status("Completed")
        .with_alternative_title(AlternativeTitle::new("Hagane no Renkinjutsushi", "Synonym"));
    fmab.release_date = date(2009, 4, 5);
    fmab.favorites = 230_000;

    let mut frieren = CatalogItem::new("52991", "Frieren: Beyond Journey's End")
        .with_genres(["Adventure", "Drama", "Fantasy"])
        .with_score(9.3)
        .with_studio("Madhouse")
        .with_source("Manga")
        .with_season(Season::new("Fall", 2023))
        .with_status("Completed")
        .with_alternative_title(AlternativeTitle::new("Sousou no Frieren", "Synonym"));
    frieren.release_date = date(2023, 9, 29);

    let mut monster = CatalogItem::new("19", "Monster")
        .with_genres(["Drama", "Mystery", "Suspense"])
        .with_score(8.9)
        .with_studio("Madhouse")
        .with_source("Manga")
        .with_season(Season::new("Spring", 2004))
        .with_status("Completed");
    monster.release_date = date(2004, 4, 7);

    let mut bebop = CatalogItem::new("1", "Cowboy Bebop")
        .with_genres(["Action", "Award Winning", "Sci-Fi"])
        .with_score(8.8)
        .with_studio("Sunrise")
        .with_source("Original")
        .with_season(Season::new("Spring", 1998))
        .with_status("Completed");
    bebop.release_date = date(1998, 4, 3);

    let announced = CatalogItem::new("60000", "Untitled Sequel Project")
        .with_genres(["Action"])
        .with_status("Announced");

    vec![naruto, shippuden, boruto, fmab, frieren, monster, bebop, announced]
}

fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

fn timestamp(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_profile_watched_items_exist() {
        let source = DemoSnapshotSource::new();
        let catalog = source.load_catalog().await.unwrap();
        let profile = source.load_profile("demo").await.unwrap();

        for title in &profile.watched {
            assert!(catalog.iter().any(|item| &item.title == title));
        }
        assert!(matches!(
            source.load_profile("someone").await,
            Err(CurioError::ProfileNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_demo_comments_are_keyed_by_title() {
        let comments = DemoSnapshotSource::new().load_comments().await.unwrap();
        assert_eq!(comments["Fullmetal Alchemist: Brotherhood"].len(), 3);
    }
}
