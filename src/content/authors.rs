use serde::{Deserialize, Serialize};

use super::{Browse, ContentResource, PostCount, Read, ResourceKind};
use crate::GhostClient;

/// A staff user with at least one published post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub facebook: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub count: Option<PostCount>,
}

impl ContentResource for Author {
    const COLLECTION: &'static str = "authors";
    const KIND: ResourceKind = ResourceKind::Author;
}

impl GhostClient {
    pub fn authors(&self) -> Browse<Author> {
        Browse::new(self)
    }

    pub fn author(&self, id: impl Into<String>) -> Read<Author> {
        Read::by_id(self, id)
    }

    pub fn author_by_slug(&self, slug: impl Into<String>) -> Read<Author> {
        Read::by_slug(self, slug)
    }
}
