//! Catalog domain models.
//!
//! Read-only snapshots of the catalog, user profiles and community
//! activity as consumed by the ranking engine.

pub mod catalog;
pub mod community;
pub mod profile;

pub use catalog::{AlternativeTitle, CatalogItem, Season};
pub use community::{CommentRecord, CommunityContext, RecentActivity};
pub use profile::UserProfile;
