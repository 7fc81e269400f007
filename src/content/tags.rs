use serde::{Deserialize, Serialize};

use super::{Browse, ContentResource, PostCount, Read, ResourceKind};
use crate::GhostClient;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub feature_image: Option<String>,
    /// `public` or `internal` (tags starting with `#`).
    #[serde(default)]
    pub visibility: Option<String>,
    #[serde(default)]
    pub accent_color: Option<String>,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub og_image: Option<String>,
    #[serde(default)]
    pub twitter_image: Option<String>,
    #[serde(default)]
    pub canonical_url: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// Present with `include=count.posts`.
    #[serde(default)]
    pub count: Option<PostCount>,
}

impl ContentResource for Tag {
    const COLLECTION: &'static str = "tags";
    const KIND: ResourceKind = ResourceKind::Tag;
}

impl GhostClient {
    pub fn tags(&self) -> Browse<Tag> {
        Browse::new(self)
    }

    pub fn tag(&self, id: impl Into<String>) -> Read<Tag> {
        Read::by_id(self, id)
    }

    pub fn tag_by_slug(&self, slug: impl Into<String>) -> Read<Tag> {
        Read::by_slug(self, slug)
    }
}
