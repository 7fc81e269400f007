use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Author, Browse, ContentResource, Read, ResourceKind, Tag};
use crate::GhostClient;

/// A published post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    /// Rendered HTML (requested with `formats=html`, the server default).
    #[serde(default)]
    pub html: Option<String>,
    /// Plain-text body (requested with `formats=plaintext`).
    #[serde(default)]
    pub plaintext: Option<String>,
    #[serde(default)]
    pub comment_id: Option<String>,
    #[serde(default)]
    pub feature_image: Option<String>,
    #[serde(default)]
    pub feature_image_alt: Option<String>,
    #[serde(default)]
    pub feature_image_caption: Option<String>,
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
    /// Estimated reading time in minutes.
    #[serde(default)]
    pub reading_time: Option<u32>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub canonical_url: Option<String>,
    #[serde(default)]
    pub codeinjection_head: Option<String>,
    #[serde(default)]
    pub codeinjection_foot: Option<String>,
    #[serde(default)]
    pub custom_template: Option<String>,
    /// Present with `include=tags`.
    #[serde(default)]
    pub tags: Option<Vec<Tag>>,
    /// Present with `include=authors`.
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
    #[serde(default)]
    pub og_image: Option<String>,
    #[serde(default)]
    pub og_title: Option<String>,
    #[serde(default)]
    pub og_description: Option<String>,
    #[serde(default)]
    pub twitter_image: Option<String>,
    #[serde(default)]
    pub twitter_title: Option<String>,
    #[serde(default)]
    pub twitter_description: Option<String>,
    #[serde(default)]
    pub email_subject: Option<String>,
}

impl ContentResource for Post {
    const COLLECTION: &'static str = "posts";
    const KIND: ResourceKind = ResourceKind::Post;
}

impl GhostClient {
    /// Browse published posts.
    pub fn posts(&self) -> Browse<Post> {
        Browse::new(self)
    }

    /// Read a single post by id.
    pub fn post(&self, id: impl Into<String>) -> Read<Post> {
        Read::by_id(self, id)
    }

    /// Read a single post by slug.
    pub fn post_by_slug(&self, slug: impl Into<String>) -> Read<Post> {
        Read::by_slug(self, slug)
    }
}
