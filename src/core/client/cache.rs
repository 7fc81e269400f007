//! In-memory response cache with per-entry TTL and LRU eviction.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use super::constants::{DEFAULT_CACHE_MAX_ITEMS, DEFAULT_CACHE_TTL};

const FAR_FUTURE: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// Tuning knobs for the response cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheConfig {
    /// How long a stored response stays fresh.
    pub ttl: Duration,
    /// Maximum number of responses kept at once.
    pub max_items: usize,
    /// When false, nothing is stored and every lookup misses.
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_CACHE_TTL,
            max_items: DEFAULT_CACHE_MAX_ITEMS,
            enabled: true,
        }
    }
}

impl CacheConfig {
    /// A configuration with caching turned off.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct CacheKey {
    endpoint: String,
    params: BTreeMap<String, String>,
}

impl CacheKey {
    fn new(endpoint: &str, params: &BTreeMap<String, String>) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            params: params.clone(),
        }
    }
}

#[derive(Debug)]
struct CacheEntry {
    body: Vec<u8>,
    expires_at: Instant,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<CacheKey, CacheEntry>,
    // Front = least recently used, back = most recently used.
    order: VecDeque<CacheKey>,
}

impl CacheState {
    fn forget(&mut self, key: &CacheKey) {
        self.entries.remove(key);
        self.order.retain(|k| k != key);
    }

    fn touch(&mut self, key: &CacheKey) {
        self.order.retain(|k| k != key);
        self.order.push_back(key.clone());
    }
}

/// Response bodies keyed by endpoint + query parameters.
#[derive(Debug)]
pub(crate) struct ResponseCache {
    config: CacheConfig,
    state: Mutex<CacheState>,
}

impl ResponseCache {
    pub(crate) fn new(config: CacheConfig) -> Self {
        Self {
            config,
            state: Mutex::new(CacheState::default()),
        }
    }

    pub(crate) fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub(crate) async fn get(
        &self,
        endpoint: &str,
        params: &BTreeMap<String, String>,
    ) -> Option<Vec<u8>> {
        if !self.config.enabled {
            return None;
        }
        let key = CacheKey::new(endpoint, params);
        let mut state = self.state.lock().await;
        let expires_at = state.entries.get(&key)?.expires_at;

        if Instant::now() > expires_at {
            state.forget(&key);
            return None;
        }
        state.touch(&key);
        state.entries.get(&key).map(|e| e.body.clone())
    }

    pub(crate) async fn set(
        &self,
        endpoint: &str,
        params: &BTreeMap<String, String>,
        body: Vec<u8>,
    ) {
        if !self.config.enabled {
            return;
        }
        let key = CacheKey::new(endpoint, params);
        let now = Instant::now();
        let entry = CacheEntry {
            body,
            // An effectively unbounded TTL never expires.
            expires_at: now.checked_add(self.config.ttl).unwrap_or(now + FAR_FUTURE),
        };

        let mut state = self.state.lock().await;
        state.forget(&key);
        state.entries.insert(key.clone(), entry);
        state.order.push_back(key);

        while state.entries.len() > self.config.max_items {
            let Some(oldest) = state.order.pop_front() else {
                break;
            };
            state.entries.remove(&oldest);
        }
    }

    pub(crate) async fn clear(&self) {
        let mut state = self.state.lock().await;
        state.entries.clear();
        state.order.clear();
    }

    pub(crate) async fn purge_expired(&self) {
        let now = Instant::now();
        let mut state = self.state.lock().await;
        let CacheState { entries, order } = &mut *state;
        entries.retain(|_, e| e.expires_at >= now);
        order.retain(|k| entries.contains_key(k));
    }

    pub(crate) async fn len(&self) -> usize {
        self.state.lock().await.entries.len()
    }
}
