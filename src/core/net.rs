//! Request execution: cache lookup, HTTP call, retry loop, cache store.

use std::collections::BTreeMap;
use std::fmt;

use tokio_util::sync::CancellationToken;
use url::Url;

use crate::core::client::{
    ACCEPT_VERSION, KEY_PARAM, Step, TaskId, current_scope,
};
use crate::core::{CacheMode, GhostClient, GhostError};

/// Caller-supplied query parameters. Ordered, so two maps with the same
/// pairs always compare (and cache) equal.
pub(crate) type QueryParams = BTreeMap<String, String>;

impl GhostClient {
    /// Build `base_url/{segments…}/?key=…&params…`. Every segment is pushed
    /// as exactly one path segment, so a `/` inside an id or slug is
    /// percent-encoded instead of starting a new segment.
    pub(crate) fn endpoint_url(&self, segments: &[&str], params: &QueryParams) -> Result<Url, GhostError> {
        if let Some(bad) = segments
            .iter()
            .find(|s| s.is_empty() || **s == "." || **s == "..")
        {
            return Err(GhostError::InvalidUrl(format!(
                "{bad:?} is not a valid path segment"
            )));
        }

        let mut url = self.base_url().clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| GhostError::InvalidUrl(self.base_url().to_string()))?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
            // Ghost routes end with a slash.
            path.push("");
        }
        {
            let mut query = url.query_pairs_mut();
            query.append_pair(KEY_PARAM, self.api_key());
            for (name, value) in params {
                query.append_pair(name, value);
            }
        }
        Ok(url)
    }

    /// Fetch the raw body for the endpoint made of `segments`, going through
    /// the cache and the retry policy.
    pub(crate) async fn execute(
        &self,
        segments: &[&str],
        params: &QueryParams,
        cache_mode: CacheMode,
    ) -> Result<Vec<u8>, GhostError> {
        let url = self.endpoint_url(segments, params)?;
        // The encoded path keeps `posts/a%2Fb` and `posts/a/b` apart.
        let endpoint = url.path();

        if cache_mode == CacheMode::Use
            && let Some(body) = self.cache().get(endpoint, params).await
        {
            #[cfg(feature = "tracing")]
            tracing::debug!(endpoint, "cache hit");
            return Ok(body);
        }

        // Inside a CancellableRequest started on this client the task is
        // already registered. A scope from another client still cancels this
        // request, through a child token registered here.
        let (task, token, _registration) = match current_scope() {
            Some(scope) if scope.belongs_to(self.tasks()) => (scope.id, scope.token, None),
            outer => {
                let id = TaskId::new();
                let token = outer.map_or_else(CancellationToken::new, |s| s.token.child_token());
                let guard = self.tasks().register(id, token.clone());
                (id, token, Some(guard))
            }
        };

        let body = self.run_attempts(&url, task, &token).await?;

        if cache_mode != CacheMode::Bypass {
            self.cache().set(endpoint, params, body.clone()).await;
        }
        Ok(body)
    }

    async fn run_attempts(
        &self,
        url: &Url,
        _task: TaskId,
        token: &CancellationToken,
    ) -> Result<Vec<u8>, GhostError> {
        let policy = self.retry();
        let mut last_error = None;

        for attempt in 1..=policy.max_attempts {
            if token.is_cancelled() {
                return Err(GhostError::Cancelled);
            }

            #[cfg(feature = "tracing")]
            tracing::debug!(task = %_task, attempt, path = url.path(), "sending request");

            let result = tokio::select! {
                biased;
                () = token.cancelled() => Err(GhostError::Cancelled),
                r = self.attempt(url) => r,
            };

            match policy.next_step(attempt, result) {
                Step::Done(body) => return Ok(body),
                Step::Fail(err) => return Err(err),
                Step::Retry { delay, error } => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(task = %_task, attempt, ?delay, error = %error, "retrying after failure");
                    last_error = Some(error);

                    tokio::select! {
                        biased;
                        () = token.cancelled() => return Err(GhostError::Cancelled),
                        () = tokio::time::sleep(delay) => {}
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| GhostError::network("request failed without a recorded error")))
    }

    /// One GET. Transport errors are classified by `From<reqwest::Error>`.
    async fn attempt(&self, url: &Url) -> Result<Vec<u8>, GhostError> {
        let resp = self
            .http()
            .get(url.clone())
            .header(ACCEPT_VERSION, self.api_version())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(status_error(status.as_u16(), resp.text().await));
        }

        Ok(resp.bytes().await?.to_vec())
    }
}

/// The error for a non-2xx response. A body that cannot be read still yields
/// the status, with the read failure as the message.
fn status_error<E: fmt::Display>(status: u16, body: Result<String, E>) -> GhostError {
    let message = body.unwrap_or_else(|e| format!("<unreadable body: {e}>"));
    GhostError::Http { status, message }
}
