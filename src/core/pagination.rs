use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Page size as reported (or requested) by the Content API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    /// A fixed number of items per page.
    Count(u32),
    /// Every item on a single page (`limit=all`).
    All,
}

impl Serialize for Limit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Limit::Count(n) => serializer.serialize_u32(*n),
            Limit::All => serializer.serialize_str("all"),
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Count(n) => write!(f, "{n}"),
            Limit::All => f.write_str("all"),
        }
    }
}

impl<'de> Deserialize<'de> for Limit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawLimit {
            Number(u32),
            Text(String),
        }

        match RawLimit::deserialize(deserializer)? {
            RawLimit::Number(n) => Ok(Limit::Count(n)),
            RawLimit::Text(s) if s == "all" => Ok(Limit::All),
            RawLimit::Text(s) => s.parse().map(Limit::Count).map_err(|_| {
                serde::de::Error::custom(format!("invalid pagination limit {s:?}"))
            }),
        }
    }
}

/// The `meta.pagination` block returned by browse endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// The 1-based page that was returned.
    pub page: u32,
    /// Items per page.
    pub limit: Limit,
    /// Total number of pages.
    pub pages: u32,
    /// Total number of items across all pages.
    pub total: u32,
    /// The next page as reported by the server.
    #[serde(default)]
    pub next: Option<u32>,
    /// The previous page as reported by the server.
    #[serde(default)]
    pub prev: Option<u32>,
}

impl Pagination {
    pub fn has_next_page(&self) -> bool {
        self.page < self.pages
    }

    pub fn has_previous_page(&self) -> bool {
        self.page > 1
    }

    /// The page after this one, or `None` on the last page.
    pub fn next_page(&self) -> Option<u32> {
        self.has_next_page().then(|| self.page + 1)
    }

    /// The page before this one, or `None` on the first page.
    pub fn previous_page(&self) -> Option<u32> {
        self.has_previous_page().then(|| self.page - 1)
    }
}
