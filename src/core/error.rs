use thiserror::Error;

use crate::content::ResourceKind;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum GhostError {
    /// A request URL could not be built from the base URL and endpoint.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The admin domain given to the client builder is empty or malformed.
    #[error("invalid admin domain: {0:?}")]
    InvalidAdminDomain(String),

    /// The Content API key given to the client builder is empty.
    #[error("invalid Content API key: the key must not be empty")]
    InvalidApiKey,

    /// The server answered with a non-2xx status code.
    #[error("HTTP {status}: {message}")]
    Http {
        /// The HTTP status code.
        status: u16,
        /// The response body, as text.
        message: String,
    },

    /// A transport-level failure other than a timeout or a cancellation
    /// (DNS resolution, refused connection, broken body stream, ...).
    #[error("network error: {message}")]
    Network {
        /// A human-readable description of the failure.
        message: String,
        /// The underlying transport error, if there was one.
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The transport gave up waiting for the server.
    #[error("request timed out")]
    Timeout,

    /// The request was cancelled by the caller.
    #[error("request was cancelled")]
    Cancelled,

    /// The response body did not match the expected schema.
    #[error("failed to decode response: {0}")]
    Decoding(#[from] serde_json::Error),

    /// A single-item fetch returned an empty collection.
    #[error("{kind} not found: {identifier}")]
    ResourceNotFound {
        /// The kind of resource that was requested.
        kind: ResourceKind,
        /// The id or slug the caller asked for.
        identifier: String,
    },

    /// Client configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),
}

impl GhostError {
    pub(crate) fn network(message: impl Into<String>) -> Self {
        GhostError::Network {
            message: message.into(),
            source: None,
        }
    }

    /// Returns the HTTP status code carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            GhostError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True if this error was produced by a caller-requested cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, GhostError::Cancelled)
    }
}

impl From<url::ParseError> for GhostError {
    fn from(e: url::ParseError) -> Self {
        GhostError::InvalidUrl(e.to_string())
    }
}

impl From<reqwest::Error> for GhostError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GhostError::Timeout
        } else {
            GhostError::Network {
                message: e.to_string(),
                source: Some(e),
            }
        }
    }
}
