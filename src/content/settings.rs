use serde::{Deserialize, Serialize};

use crate::core::{CacheMode, GhostError, wire};
use crate::GhostClient;

/// One entry of the primary or secondary navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Navigation {
    pub label: String,
    pub url: String,
}

/// Public site settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub accent_color: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub facebook: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub codeinjection_head: Option<String>,
    #[serde(default)]
    pub codeinjection_foot: Option<String>,
    #[serde(default)]
    pub navigation: Vec<Navigation>,
    #[serde(default)]
    pub secondary_navigation: Vec<Navigation>,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub og_image: Option<String>,
    #[serde(default)]
    pub twitter_image: Option<String>,
    #[serde(default)]
    pub members_support_address: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl GhostClient {
    /// Fetches the public site settings.
    ///
    /// # Errors
    ///
    /// Returns a `GhostError` if the request fails after all retries or the
    /// body is not a settings object.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    pub async fn settings(&self) -> Result<Settings, GhostError> {
        let body = self
            .execute(&["settings"], &Default::default(), CacheMode::Use)
            .await?;
        wire::decode_settings(&body)
    }
}
