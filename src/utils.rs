// Utility functions
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::model::RawStoreOffer;

/// Reads a field as `Some(T)` when it has the expected shape and `None` otherwise.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoresField {
    Map(IndexMap<String, Value>),
    #[allow(dead_code)]
    Other(Value),
}

/// Reads the store mapping in document order. A non-object mapping reads as empty,
/// a non-object entry reads as an entry with every field absent.
pub fn lenient_stores<'de, D>(deserializer: D) -> Result<IndexMap<String, RawStoreOffer>, D::Error>
where
    D: Deserializer<'de>,
{
    let stores = match StoresField::deserialize(deserializer)? {
        StoresField::Map(map) => map
            .into_iter()
            .map(|(key, value)| (key, RawStoreOffer::deserialize(value).unwrap_or_default()))
            .collect(),
        StoresField::Other(_) => IndexMap::new(),
    };
    Ok(stores)
}

/// Treats an empty string the same as a missing one.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Lowercases text for case-insensitive comparisons.
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}
