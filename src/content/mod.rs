//! Typed access to the Content API resources.
//!
//! Every collection (posts, pages, tags, authors, tiers) is browsed with a
//! [`Browse`] builder and read one item at a time with a [`Read`] builder.
//! Site settings are a single object fetched with
//! [`GhostClient::settings`](crate::GhostClient::settings).

mod authors;
mod pages;
mod posts;
mod request;
mod settings;
mod tags;
mod tiers;

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::Pagination;

pub use authors::Author;
pub use pages::Page;
pub use posts::Post;
pub use request::{Browse, Read};
pub use settings::{Navigation, Settings};
pub use tags::Tag;
pub use tiers::Tier;

/// The content types that can be read by id or slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Post,
    Page,
    Tag,
    Author,
    Tier,
}

impl ResourceKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Post => "post",
            ResourceKind::Page => "page",
            ResourceKind::Tag => "tag",
            ResourceKind::Author => "author",
            ResourceKind::Tier => "tier",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resource that is served as a collection.
///
/// `COLLECTION` is both the endpoint path and the key of the array in the
/// response body.
pub trait ContentResource: DeserializeOwned + Clone + Send + 'static {
    const COLLECTION: &'static str;
    const KIND: ResourceKind;
}

/// One page of a browse response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paginated<R> {
    /// The items on this page.
    pub items: Vec<R>,
    /// Pagination metadata, when the server sent it.
    pub meta: Option<Pagination>,
}

impl<R> Paginated<R> {
    pub fn next_page(&self) -> Option<u32> {
        self.meta.as_ref().and_then(Pagination::next_page)
    }

    pub fn previous_page(&self) -> Option<u32> {
        self.meta.as_ref().and_then(Pagination::previous_page)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Count block attached to tags and authors with `include=count.posts`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, serde::Deserialize)]
pub struct PostCount {
    #[serde(default)]
    pub posts: Option<u64>,
}
