//! Response envelopes and byte-to-model decoding.

use serde::Deserialize;
use serde::de::{DeserializeOwned, Error as _};
use serde_json::{Map, Value};

use crate::content::{ContentResource, Paginated, Settings};
use crate::core::{GhostError, Pagination};

#[derive(Deserialize)]
struct Meta {
    pagination: Option<Pagination>,
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    meta: Option<Meta>,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

#[derive(Deserialize)]
struct SettingsEnvelope {
    settings: Settings,
}

/// Decode a body into any deserializable shape, mapping every failure to
/// [`GhostError::Decoding`].
pub(crate) fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, GhostError> {
    Ok(serde_json::from_slice(body)?)
}

pub(crate) fn decode_list<R: ContentResource>(body: &[u8]) -> Result<Paginated<R>, GhostError> {
    let mut env: Envelope = decode(body)?;
    let raw = env
        .rest
        .remove(R::COLLECTION)
        .ok_or_else(|| serde_json::Error::missing_field(R::COLLECTION))?;
    let items: Vec<R> = serde_json::from_value(raw)?;

    Ok(Paginated {
        items,
        meta: env.meta.and_then(|m| m.pagination),
    })
}

/// Decode a read-by-id / read-by-slug response, which wraps one item in a list.
pub(crate) fn decode_single<R: ContentResource>(
    body: &[u8],
    identifier: &str,
) -> Result<R, GhostError> {
    decode_list::<R>(body)?
        .items
        .into_iter()
        .next()
        .ok_or_else(|| GhostError::ResourceNotFound {
            kind: R::KIND,
            identifier: identifier.to_string(),
        })
}

pub(crate) fn decode_settings(body: &[u8]) -> Result<Settings, GhostError> {
    decode::<SettingsEnvelope>(body).map(|env| env.settings)
}
