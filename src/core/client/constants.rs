//! Centralized constants for default endpoints, headers and UA.

use std::time::Duration;

/// Identifies this library to the server.
pub(crate) const USER_AGENT: &str = concat!("ghost-content-rs/", env!("CARGO_PKG_VERSION"));

/// Content API path on every Ghost site (endpoint is appended).
pub(crate) const CONTENT_API_PATH: &str = "/ghost/api/content/";

/// Version pinned through the `Accept-Version` header.
pub(crate) const DEFAULT_API_VERSION: &str = "v5.0";

/// Header used by Ghost to select the API version.
pub(crate) const ACCEPT_VERSION: &str = "Accept-Version";

/// Query parameter carrying the Content API key.
pub(crate) const KEY_PARAM: &str = "key";

pub(crate) const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

pub(crate) const DEFAULT_CACHE_MAX_ITEMS: usize = 100;
