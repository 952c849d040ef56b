//! Typed views over upstream responses.
//!
//! The client hands back the raw JSON body; these structs are read out of it
//! leniently. Missing or `null` fields become empty values, and list items are
//! read one by one so a single malformed item is dropped on its own. A body
//! whose top level does not fit the view at all is a decode error.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::SearchError;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct WebResult {
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(deserialize_with = "lenient_items")]
    pub sources: Vec<Source>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Source {
    #[serde(deserialize_with = "null_as_default")]
    pub page_content: String,
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: SourceMetadata,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SourceMetadata {
    pub title: Option<String>,
    pub url: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ImagesResult {
    #[serde(deserialize_with = "lenient_items")]
    pub images: Vec<ImageItem>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ImageItem {
    #[serde(deserialize_with = "null_as_default")]
    pub img_src: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct VideosResult {
    #[serde(deserialize_with = "lenient_items")]
    pub videos: Vec<VideoItem>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct VideoItem {
    #[serde(deserialize_with = "null_as_default")]
    pub img_src: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iframe_src: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Reads a list item by item, skipping the items that do not fit `T`.
fn lenient_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match T::deserialize(&item) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!(index = i, error = %e, "skipping malformed upstream item");
                None
            }
        })
        .collect())
}

/// Reads a typed view out of a raw upstream body.
pub fn read_view<T>(body: &Value) -> Result<T, SearchError>
where
    T: DeserializeOwned,
{
    T::deserialize(body).map_err(|e| {
        tracing::warn!(error = %e, "upstream body does not match the expected shape");
        SearchError::DecodeError(e.to_string())
    })
}
