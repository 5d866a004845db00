//! Out-of-band classification tags attached to members and types
//!
//! Tags are string keys with an optional JSON payload (for example the
//! column facts behind `COLUMN_FIELD`). Keys keep insertion order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered map of custom data tags
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomData(IndexMap<String, Value>);

impl CustomData {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag with a payload; an existing tag keeps its position
    pub fn put(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Tag without a payload
    pub fn tag(&mut self, key: impl Into<String>) {
        self.0.entry(key.into()).or_insert(Value::Null);
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Payload property as an integer (`COLUMN_FIELD` → `length`)
    #[must_use]
    pub fn i64_property(&self, key: &str, property: &str) -> Option<i64> {
        self.0.get(key)?.get(property)?.as_i64()
    }

    /// Payload property as a boolean (`COLUMN_FIELD` → `unique`)
    #[must_use]
    pub fn bool_property(&self, key: &str, property: &str) -> Option<bool> {
        self.0.get(key)?.get(property)?.as_bool()
    }

    /// Payload property as a string (`COLUMN_FIELD` → `columnDefinition`)
    #[must_use]
    pub fn str_property<'a>(&'a self, key: &str, property: &str) -> Option<&'a str> {
        self.0.get(key)?.get(property)?.as_str()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copy every tag from `other`, overwriting payloads
    pub fn merge(&mut self, other: &CustomData) {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payload_properties() {
        let mut data = CustomData::new();
        data.put("COLUMN_FIELD", json!({ "length": 30, "unique": true }));
        assert_eq!(data.i64_property("COLUMN_FIELD", "length"), Some(30));
        assert_eq!(data.bool_property("COLUMN_FIELD", "unique"), Some(true));
        assert_eq!(data.i64_property("COLUMN_FIELD", "precision"), None);
    }

    #[test]
    fn tag_does_not_clobber_payload() {
        let mut data = CustomData::new();
        data.put("COLUMN_FIELD", json!({ "length": 30 }));
        data.tag("COLUMN_FIELD");
        assert_eq!(data.i64_property("COLUMN_FIELD", "length"), Some(30));
    }

    #[test]
    fn keys_keep_insertion_order() {
        let mut data = CustomData::new();
        data.tag("B");
        data.tag("A");
        assert_eq!(data.keys().collect::<Vec<_>>(), vec!["B", "A"]);
        data.remove("B");
        assert_eq!(data.keys().collect::<Vec<_>>(), vec!["A"]);
    }
}
