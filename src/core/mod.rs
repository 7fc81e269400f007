//! Core components of the `ghost-content-rs` client.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The main [`GhostClient`] and its builder.
//! - The primary [`GhostError`] type.
//! - The request executor (cache, retry, cancellation).
//! - Response decoding and pagination metadata.

/// The main client (`GhostClient`), builder, cache, retry and task registry.
pub mod client;
/// Client settings loaded from the environment or a JSON file.
pub mod config;
/// The primary error type (`GhostError`) for the crate.
pub mod error;
/// Pagination metadata returned by browse endpoints.
pub mod pagination;

pub(crate) mod net;
pub(crate) mod wire;

// convenient re-exports so most code can just `use crate::core::GhostClient`
pub use client::{CacheConfig, CacheMode, GhostClient, GhostClientBuilder, RetryConfig, TaskId};
pub use config::GhostConfig;
pub use error::GhostError;
pub use pagination::{Limit, Pagination};
