use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Browse, ContentResource, Read, ResourceKind};
use crate::GhostClient;

/// A membership tier.
///
/// Prices and benefits are only sent with
/// `include=monthly_price,yearly_price,benefits`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub active: bool,
    /// `free` or `paid`.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub visibility: Option<String>,
    #[serde(default)]
    pub welcome_page_url: Option<String>,
    /// Price in the smallest currency unit.
    #[serde(default)]
    pub monthly_price: Option<u64>,
    #[serde(default)]
    pub yearly_price: Option<u64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub benefits: Option<Vec<String>>,
    #[serde(default)]
    pub trial_days: Option<u32>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ContentResource for Tier {
    const COLLECTION: &'static str = "tiers";
    const KIND: ResourceKind = ResourceKind::Tier;
}

impl GhostClient {
    pub fn tiers(&self) -> Browse<Tier> {
        Browse::new(self)
    }

    pub fn tier(&self, id: impl Into<String>) -> Read<Tier> {
        Read::by_id(self, id)
    }
}
