//! Ordered `name -> value` entries decoded from JSON objects.
//!
//! The prediction service emits recommendations, risk scores and food
//! sources as JSON objects. Their key order is meaningful for display and
//! for tie-breaking when ranking, so they are kept as an ordered list rather
//! than a hash or B-tree map.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use schemars::{JsonSchema, Schema, SchemaGenerator};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A JSON object decoded as ordered `(name, value)` pairs.
///
/// Names are unique. Decoding rejects a repeated key and [`insert`] refuses
/// to overwrite, so no entry is ever silently replaced.
///
/// [`insert`]: NamedEntries::insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedEntries<T>(Vec<(String, T)>);

impl<T> Default for NamedEntries<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> NamedEntries<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Look up the value stored under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&T> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Append an entry. Returns `false` (and leaves the existing entry in
    /// place) when `name` is already present.
    pub fn insert(&mut self, name: impl Into<String>, value: T) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.0.push((name, value));
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate entries in their original order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }
}

impl<T> FromIterator<(String, T)> for NamedEntries<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        let mut entries = Self::new();
        for (name, value) in iter {
            entries.insert(name, value);
        }
        entries
    }
}

impl<T> IntoIterator for NamedEntries<T> {
    type Item = (String, T);
    type IntoIter = std::vec::IntoIter<(String, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<T: Serialize> Serialize for NamedEntries<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

struct NamedEntriesVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for NamedEntriesVisitor<T> {
    type Value = NamedEntries<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((name, value)) = access.next_entry::<String, T>()? {
            if entries.iter().any(|(existing, _): &(String, T)| *existing == name) {
                return Err(serde::de::Error::custom(format!("duplicate key `{name}`")));
            }
            entries.push((name, value));
        }
        Ok(NamedEntries(entries))
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for NamedEntries<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(NamedEntriesVisitor(PhantomData))
    }
}

// Same wire shape as a string-keyed map.
impl<T: JsonSchema> JsonSchema for NamedEntries<T> {
    fn inline_schema() -> bool {
        <BTreeMap<String, T>>::inline_schema()
    }

    fn schema_name() -> Cow<'static, str> {
        <BTreeMap<String, T>>::schema_name()
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        <BTreeMap<String, T>>::json_schema(generator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn string_entries_have_full_equality() {
        fn requires_eq<T: Eq>(_: &T) {}

        let sources: NamedEntries<String> =
            serde_json::from_str(r#"{"fiber": "Beans", "iron": "Spinach"}"#).unwrap();
        requires_eq(&sources);
        requires_eq(&crate::entities::FoodSourceMap::default());
        requires_eq(&crate::entities::IngredientAnalysisResult::default());
        assert_eq!(sources, sources.clone());
    }

    #[test]
    fn decoding_keeps_source_order() {
        let entries: NamedEntries<u32> =
            serde_json::from_str(r#"{"zinc": 3, "calcium": 1, "iron": 2}"#).unwrap();
        let names: Vec<&str> = entries.names().collect();
        assert_eq!(names, vec!["zinc", "calcium", "iron"]);
        assert_eq!(entries.get("iron"), Some(&2));
    }

    #[test]
    fn decoding_rejects_duplicate_keys() {
        let err = serde_json::from_str::<NamedEntries<u32>>(r#"{"iron": 1, "iron": 2}"#)
            .unwrap_err();
        assert!(err.to_string().contains("duplicate key `iron`"));
    }

    #[test]
    fn insert_never_overwrites() {
        let mut entries = NamedEntries::new();
        assert!(entries.insert("fiber", 1.0));
        assert!(!entries.insert("fiber", 9.0));
        assert_eq!(entries.get("fiber"), Some(&1.0));
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn serializes_as_object_in_order() {
        let entries: NamedEntries<&str> = [("b".to_string(), "x"), ("a".to_string(), "y")]
            .into_iter()
            .collect();
        assert_eq!(serde_json::to_string(&entries).unwrap(), r#"{"b":"x","a":"y"}"#);
    }

    #[test]
    fn rejects_non_object() {
        assert!(serde_json::from_str::<NamedEntries<u32>>("[1, 2]").is_err());
    }
}
