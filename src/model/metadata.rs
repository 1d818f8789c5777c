//! Metadata — the free-form key-value map carried by trees and adapters.

/// User metadata attached to a catalog entry. Absent metadata is an empty map.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Convenience constructor for literal metadata.
pub fn metadata<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Metadata
where
    K: Into<String>,
    V: Into<serde_json::Value>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
