//! Free-form annotations and the layered merge policy.
//!
//! Metadata is opaque to the type algebra: it never takes part in
//! structural equality and never blocks resolution. Interpreting keys
//! (REST routes, import modules, validation hints) is left to emitters.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A metadata value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<MetaValue>),
    Table(IndexMap<String, MetaValue>),
}

impl MetaValue {
    /// Borrow the value as a string, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetaValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the value as a table, if it is one.
    pub fn as_table(&self) -> Option<&IndexMap<String, MetaValue>> {
        match self {
            MetaValue::Table(table) => Some(table),
            _ => None,
        }
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        MetaValue::String(value.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        MetaValue::String(value)
    }
}

impl From<bool> for MetaValue {
    fn from(value: bool) -> Self {
        MetaValue::Bool(value)
    }
}

impl From<i64> for MetaValue {
    fn from(value: i64) -> Self {
        MetaValue::Integer(value)
    }
}

impl From<f64> for MetaValue {
    fn from(value: f64) -> Self {
        MetaValue::Float(value)
    }
}

/// An ordered key/value annotation set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(IndexMap<String, MetaValue>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key, keeping the position of an existing entry.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MetaValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder-style [`Metadata::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<MetaValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.0.get(key)
    }

    /// Get a string value by key.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(MetaValue::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<(String, MetaValue)> for Metadata {
    fn from_iter<T: IntoIterator<Item = (String, MetaValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<IndexMap<String, MetaValue>> for Metadata {
    fn from(map: IndexMap<String, MetaValue>) -> Self {
        Self(map)
    }
}

/// Merges metadata layers from least to most specific.
///
/// On key collision the later layer wins and replaces the whole value.
/// Keys keep the position of their first appearance, so the merged
/// order is stable for a given set of layers.
///
/// # Example
///
/// ```
/// use hgen_ir::{Metadata, MetadataMerger};
///
/// let defaults = Metadata::new().with("cache", false).with("auth", "user");
/// let own = Metadata::new().with("auth", "admin");
///
/// let merged = MetadataMerger::new().layer(&defaults).layer(&own).finish();
/// assert_eq!(merged.get_str("auth"), Some("admin"));
/// assert_eq!(merged.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct MetadataMerger {
    merged: Metadata,
}

impl MetadataMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a more specific layer on top of the current result.
    pub fn layer(mut self, layer: &Metadata) -> Self {
        for (key, value) in layer.iter() {
            self.merged.insert(key, value.clone());
        }
        self
    }

    pub fn finish(self) -> Metadata {
        self.merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_later_layer_overrides_on_collision() {
        let defaults = Metadata::new().with("method", "POST").with("auth", true);
        let own = Metadata::new().with("method", "GET");

        let merged = MetadataMerger::new().layer(&defaults).layer(&own).finish();

        assert_eq!(merged.get_str("method"), Some("GET"));
        assert_eq!(merged.get("auth"), Some(&MetaValue::Bool(true)));
    }

    #[test]
    fn test_merge_keeps_first_position() {
        let defaults = Metadata::new().with("a", 1i64).with("b", 2i64);
        let own = Metadata::new().with("c", 3i64).with("a", 10i64);

        let merged = MetadataMerger::new().layer(&defaults).layer(&own).finish();
        let keys: Vec<_> = merged.iter().map(|(k, _)| k).collect();

        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(merged.get("a"), Some(&MetaValue::Integer(10)));
    }

    #[test]
    fn test_tables_are_replaced_not_merged() {
        let mut route = IndexMap::new();
        route.insert("method".to_string(), MetaValue::from("GET"));
        route.insert("url".to_string(), MetaValue::from("/posts"));
        let defaults = Metadata::new().with("rest", MetaValue::Table(route));

        let mut override_route = IndexMap::new();
        override_route.insert("url".to_string(), MetaValue::from("/posts/{slug}"));
        let own = Metadata::new().with("rest", MetaValue::Table(override_route));

        let merged = MetadataMerger::new().layer(&defaults).layer(&own).finish();
        let rest = merged.get("rest").and_then(MetaValue::as_table).unwrap();

        assert_eq!(rest.len(), 1);
        assert_eq!(rest["url"], MetaValue::from("/posts/{slug}"));
    }

    #[test]
    fn test_empty_layers_produce_empty_metadata() {
        let merged = MetadataMerger::new()
            .layer(&Metadata::new())
            .layer(&Metadata::new())
            .finish();
        assert!(merged.is_empty());
    }

    #[test]
    fn test_untagged_values_deserialize_from_json() {
        let metadata: Metadata =
            serde_json::from_str(r#"{"precision":0.1,"limit":20,"rest":{"method":"GET"}}"#)
                .unwrap();

        assert_eq!(metadata.get("precision"), Some(&MetaValue::Float(0.1)));
        assert_eq!(metadata.get("limit"), Some(&MetaValue::Integer(20)));
        assert!(metadata.get("rest").and_then(MetaValue::as_table).is_some());
    }
}
