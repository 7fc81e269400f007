use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Author, Browse, ContentResource, Read, ResourceKind, Tag};
use crate::GhostClient;

/// A static page. Pages share the post shape but live outside the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub plaintext: Option<String>,
    #[serde(default)]
    pub feature_image: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub visibility: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub custom_excerpt: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub reading_time: Option<u32>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub canonical_url: Option<String>,
    #[serde(default)]
    pub custom_template: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<Tag>>,
    #[serde(default)]
    pub authors: Option<Vec<Author>>,
    #[serde(default)]
    pub primary_tag: Option<Tag>,
    #[serde(default)]
    pub primary_author: Option<Author>,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
}

impl ContentResource for Page {
    const COLLECTION: &'static str = "pages";
    const KIND: ResourceKind = ResourceKind::Page;
}

impl GhostClient {
    /// Browse published pages.
    pub fn pages(&self) -> Browse<Page> {
        Browse::new(self)
    }

    /// Read a single page by id.
    pub fn page(&self, id: impl Into<String>) -> Read<Page> {
        Read::by_id(self, id)
    }

    /// Read a single page by slug.
    pub fn page_by_slug(&self, slug: impl Into<String>) -> Read<Page> {
        Read::by_slug(self, slug)
    }
}
