//! Public client surface + builder.
//! Internals are split into `cache` (LRU + TTL store), `retry` (policy),
//! `tasks` (in-flight registry) and `constants` (UA + defaults).

mod cache;
mod constants;
mod retry;
mod tasks;

pub use cache::CacheConfig;
pub use retry::{CacheMode, MIN_BASE_DELAY, RetryConfig};
pub use tasks::TaskId;

pub(crate) use cache::ResponseCache;
pub(crate) use constants::{ACCEPT_VERSION, KEY_PARAM};
pub(crate) use retry::Step;
pub(crate) use tasks::{TaskRegistry, TaskScope, current_scope, run_in_scope};

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use constants::{CONTENT_API_PATH, DEFAULT_API_VERSION, USER_AGENT};
use reqwest::Client;
use url::Url;

use crate::cancel::CancellableRequest;
use crate::core::{GhostConfig, GhostError};

/// Client for one Ghost site's Content API.
///
/// Cloning is cheap: clones share the HTTP connection pool, the response
/// cache and the in-flight task registry. That state lives until the last
/// clone is dropped.
#[derive(Clone)]
pub struct GhostClient {
    http: Client,
    base_url: Url,
    api_key: Arc<str>,
    api_version: Arc<str>,
    retry: Arc<RetryConfig>,
    cache: Arc<ResponseCache>,
    tasks: Arc<TaskRegistry>,
}

impl fmt::Debug for GhostClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GhostClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_version", &self.api_version)
            .field("retry", &self.retry)
            .field("cache", self.cache.config())
            .finish_non_exhaustive()
    }
}

impl GhostClient {
    /// Create a new builder.
    pub fn builder() -> GhostClientBuilder {
        GhostClientBuilder::default()
    }

    /// Create a client with default settings.
    ///
    /// # Errors
    ///
    /// Fails with [`GhostError::InvalidAdminDomain`] or
    /// [`GhostError::InvalidApiKey`] if either argument is empty.
    pub fn new(admin_domain: impl Into<String>, api_key: impl Into<String>) -> Result<Self, GhostError> {
        Self::builder()
            .admin_domain(admin_domain)
            .api_key(api_key)
            .build()
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }
    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }
    pub(crate) fn retry(&self) -> &RetryConfig {
        &self.retry
    }
    pub(crate) fn cache(&self) -> &ResponseCache {
        &self.cache
    }
    pub(crate) fn tasks(&self) -> &Arc<TaskRegistry> {
        &self.tasks
    }

    /* -------- public accessors -------- */

    /// The URL every endpoint is appended to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The value sent in the `Accept-Version` header.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    pub fn cache_config(&self) -> &CacheConfig {
        self.cache.config()
    }

    /* -------- cache maintenance -------- */

    /// Drops every cached response.
    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }

    /// Drops cached responses whose TTL has elapsed.
    pub async fn purge_expired_cache(&self) {
        self.cache.purge_expired().await;
    }

    /// Number of responses currently held in the cache.
    pub async fn cached_responses(&self) -> usize {
        self.cache.len().await
    }

    /* -------- cancellation -------- */

    /// Spawns `call` as a cancellable request. See [`CancellableRequest`].
    pub fn spawn_cancellable<T, F>(&self, call: F) -> CancellableRequest<T>
    where
        T: Send + 'static,
        F: Future<Output = Result<T, GhostError>> + Send + 'static,
    {
        CancellableRequest::start(self, call)
    }

    /// Cancels the in-flight request registered under `id`.
    ///
    /// Returns `false` if no such request is in flight (it already completed
    /// or was cancelled before).
    pub fn cancel(&self, id: TaskId) -> bool {
        let cancelled = self.tasks.cancel(id);
        #[cfg(feature = "tracing")]
        tracing::debug!(task = %id, cancelled, "cancel requested");
        cancelled
    }

    /// Cancels every in-flight request and clears the registry.
    pub fn cancel_all(&self) {
        let _count = self.tasks.cancel_all();
        #[cfg(feature = "tracing")]
        tracing::debug!(count = _count, "cancelled all in-flight requests");
    }

    /// Number of requests currently registered as in flight.
    pub fn in_flight_count(&self) -> usize {
        self.tasks.len()
    }

    /// True if `id` is still registered as in flight.
    pub fn is_in_flight(&self, id: TaskId) -> bool {
        self.tasks.contains(id)
    }
}

fn normalize_domain(raw: &str) -> Result<String, GhostError> {
    let trimmed = raw.trim();
    let host = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed)
        .trim_end_matches('/');

    if host.is_empty() || host.contains(char::is_whitespace) || host.contains('/') {
        return Err(GhostError::InvalidAdminDomain(raw.to_string()));
    }
    Ok(host.to_string())
}

fn normalize_version(raw: &str) -> String {
    let v = raw.trim();
    if v.starts_with('v') {
        v.to_string()
    } else {
        format!("v{v}")
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct GhostClientBuilder {
    admin_domain: Option<String>,
    api_key: Option<String>,
    api_version: Option<String>,
    base_url: Option<Url>,
    user_agent: Option<String>,

    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    cache: CacheConfig,
    retry: RetryConfig,
}

impl GhostClientBuilder {
    /// Start from a loaded [`GhostConfig`].
    pub fn from_config(config: GhostConfig) -> Self {
        let mut builder = Self::default()
            .admin_domain(config.admin_domain)
            .api_key(config.api_key)
            .cache_config(config.cache.into())
            .retry_config(config.retry.into());
        if let Some(v) = config.api_version {
            builder = builder.api_version(v);
        }
        builder
    }

    /// The site's admin domain, e.g. `demo.ghost.io`.
    pub fn admin_domain(mut self, domain: impl Into<String>) -> Self {
        self.admin_domain = Some(domain.into());
        self
    }

    /// The Content API key from Ghost Admin > Integrations.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// API version for the `Accept-Version` header. Default: `v5.0`.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    /// Override the API base (e.g., `https://demo.ghost.io/ghost/api/content/`).
    /// Mostly useful for tests against a local server.
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Override the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Set a per-request timeout (overall). Default: none.
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Replace the whole cache configuration.
    pub fn cache_config(mut self, cfg: CacheConfig) -> Self {
        self.cache = cfg;
        self
    }

    /// How long cached responses stay fresh. Default: 5 minutes.
    pub fn cache_ttl(mut self, dur: Duration) -> Self {
        self.cache.ttl = dur;
        self
    }

    /// How many responses the cache holds before evicting. Default: 100.
    pub fn cache_max_items(mut self, n: usize) -> Self {
        self.cache.max_items = n;
        self
    }

    /// Enable or disable the response cache. Default: enabled.
    pub fn cache_enabled(mut self, enabled: bool) -> Self {
        self.cache.enabled = enabled;
        self
    }

    /// Replace the retry policy.
    pub fn retry_config(mut self, cfg: RetryConfig) -> Self {
        self.retry = cfg;
        self
    }

    /// Turn retries off (a single attempt per request) or back on with the
    /// default policy.
    pub fn retry_enabled(mut self, enabled: bool) -> Self {
        self.retry = if enabled {
            RetryConfig::default()
        } else {
            RetryConfig::disabled()
        };
        self
    }

    /// Validates the settings and builds the client. No network access
    /// happens here.
    ///
    /// # Errors
    ///
    /// - [`GhostError::InvalidAdminDomain`] for an empty or malformed domain.
    /// - [`GhostError::InvalidApiKey`] for an empty key.
    /// - [`GhostError::InvalidUrl`] if the base URL cannot carry endpoint paths.
    /// - [`GhostError::Network`] if the HTTP client cannot be initialised.
    pub fn build(self) -> Result<GhostClient, GhostError> {
        let domain = normalize_domain(self.admin_domain.as_deref().unwrap_or_default())?;
        let api_key = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(GhostError::InvalidApiKey)?;

        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(&format!("https://{domain}{CONTENT_API_PATH}"))
                .map_err(|_| GhostError::InvalidAdminDomain(domain.clone()))?,
        };
        if base_url.cannot_be_a_base() {
            return Err(GhostError::InvalidUrl(base_url.to_string()));
        }

        let mut httpb = reqwest::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT));

        if let Some(t) = self.timeout {
            httpb = httpb.timeout(t);
        }
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        let http = httpb.build()?;

        Ok(GhostClient {
            http,
            base_url,
            api_key: api_key.into(),
            api_version: normalize_version(
                self.api_version.as_deref().unwrap_or(DEFAULT_API_VERSION),
            )
            .into(),
            retry: Arc::new(self.retry.normalized()),
            cache: Arc::new(ResponseCache::new(self.cache)),
            tasks: Arc::new(TaskRegistry::default()),
        })
    }
}
