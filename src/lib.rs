//! ghost-content-rs: ergonomic async client for the Ghost Content API.
//!
//! Fetch posts, pages, tags, authors, tiers and site settings from a Ghost
//! site. Every request goes through one pipeline: an in-memory LRU cache with
//! per-entry TTL, a retry loop with fixed or exponential backoff, typed
//! decoding, and cooperative cancellation.
//!
//! ```no_run
//! use ghost_content_rs::GhostClient;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), ghost_content_rs::GhostError> {
//! let client = GhostClient::new("demo.ghost.io", "22444f78447824223cefc48062")?;
//!
//! let posts = client.posts().limit(5).include(["tags"]).fetch().await?;
//! for post in &posts.items {
//!     println!("{}", post.title.as_deref().unwrap_or("(untitled)"));
//! }
//!
//! let settings = client.settings().await?;
//! println!("site: {:?}", settings.title);
//! # Ok(())
//! # }
//! ```

pub mod cancel;
pub mod content;
pub mod core;

pub use cancel::CancellableRequest;
pub use content::{
    Author, Browse, ContentResource, Navigation, Page, Paginated, Post, PostCount, Read,
    ResourceKind, Settings, Tag, Tier,
};
pub use crate::core::{
    CacheConfig, CacheMode, GhostClient, GhostClientBuilder, GhostConfig, GhostError, Limit,
    Pagination, RetryConfig, TaskId,
};
