//! Nutrition records and the flat payload sent for prediction.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::CoreError;
use crate::presentation::{format_amount, humanize};

/// Name of the nested vitamin group.
pub const VITAMINS: &str = "vitamins";
/// Name of the nested mineral group.
pub const MINERALS: &str = "minerals";

/// Substrings that mark bookkeeping keys hidden from the profile overview.
const HIDDEN_PROFILE_MARKERS: [&str; 2] = ["total", "timestamp"];

/// A nutrition record as returned by the nutrition store.
///
/// Top-level entries are nutrient amounts; `vitamins` and `minerals` are
/// one-level nested groups. Anything else the store adds (timestamps,
/// identifiers) is carried along untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct NutritionRecord(Map<String, Value>);

impl NutritionRecord {
    #[must_use]
    pub const fn from_map(entries: Map<String, Value>) -> Self {
        Self(entries)
    }

    /// Build a record from an arbitrary JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidRecord`] if `value` is not a JSON object.
    pub fn from_value(value: Value) -> Result<Self, CoreError> {
        match value {
            Value::Object(entries) => Ok(Self(entries)),
            other => Err(CoreError::InvalidRecord {
                found: json_kind(&other),
            }),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Numeric amount of a top-level nutrient.
    #[must_use]
    pub fn amount(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(Value::as_f64)
    }

    /// A nested group such as `vitamins` or `minerals`.
    #[must_use]
    pub fn group(&self, name: &str) -> Option<&Map<String, Value>> {
        self.0.get(name).and_then(Value::as_object)
    }

    #[must_use]
    pub fn vitamins(&self) -> Option<&Map<String, Value>> {
        self.group(VITAMINS)
    }

    #[must_use]
    pub fn minerals(&self) -> Option<&Map<String, Value>> {
        self.group(MINERALS)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    /// Entries shown in the "current nutrition profile" overview.
    ///
    /// Scalar top-level nutrients come first (bookkeeping keys containing
    /// `total` or `timestamp` are skipped), then vitamins, then minerals.
    #[must_use]
    pub fn profile_entries(&self) -> Vec<ProfileEntry> {
        let mut entries: Vec<ProfileEntry> = self
            .0
            .iter()
            .filter(|(key, value)| {
                !value.is_object()
                    && !value.is_null()
                    && !HIDDEN_PROFILE_MARKERS
                        .iter()
                        .any(|marker| key.contains(marker))
            })
            .map(|(key, value)| ProfileEntry {
                key: key.clone(),
                label: humanize(key),
                group: ProfileGroup::Nutrient,
                value: display_value(value),
            })
            .collect();

        if let Some(vitamins) = self.vitamins() {
            entries.extend(vitamins.iter().map(|(name, value)| ProfileEntry {
                key: format!("{VITAMINS}_{name}"),
                label: format!("Vitamin {name}"),
                group: ProfileGroup::Vitamin,
                value: display_value(value),
            }));
        }
        if let Some(minerals) = self.minerals() {
            entries.extend(minerals.iter().map(|(name, value)| ProfileEntry {
                key: format!("{MINERALS}_{name}"),
                label: name.clone(),
                group: ProfileGroup::Mineral,
                value: display_value(value),
            }));
        }
        entries
    }
}

impl TryFrom<Value> for NutritionRecord {
    type Error = CoreError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

/// Where a profile entry comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProfileGroup {
    Nutrient,
    Vitamin,
    Mineral,
}

/// One line of the nutrition profile overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ProfileEntry {
    pub key: String,
    pub label: String,
    pub group: ProfileGroup,
    /// Numbers are shown with two decimals, anything else verbatim.
    pub value: String,
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Number(number) => number
            .as_f64()
            .map_or_else(|| number.to_string(), format_amount),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Flat `key -> scalar` body for a prediction request.
///
/// Produced by [`crate::flatten::flatten`]. Nested entries appear as
/// `"{group}_{item}"`; every key is unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct FlatNutritionPayload(Map<String, Value>);

impl FlatNutritionPayload {
    #[must_use]
    pub const fn from_map(entries: Map<String, Value>) -> Self {
        Self(entries)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Numeric value under `key`.
    #[must_use]
    pub fn number(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(Value::as_f64)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Whether any value is itself a JSON object.
    #[must_use]
    pub fn has_nested_values(&self) -> bool {
        self.0.values().any(Value::is_object)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Insert `value` under `key` unless the key is already taken.
    ///
    /// Returns `false` on collision; the existing value is left in place.
    pub(crate) fn insert_new(&mut self, key: String, value: Value) -> bool {
        if self.0.contains_key(&key) {
            return false;
        }
        self.0.insert(key, value);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn record(value: Value) -> NutritionRecord {
        NutritionRecord::from_value(value).unwrap()
    }

    #[test]
    fn from_value_rejects_non_objects() {
        let err = NutritionRecord::from_value(json!([1, 2])).unwrap_err();
        assert!(matches!(err, CoreError::InvalidRecord { found: "array" }));
    }

    #[test]
    fn group_accessors() {
        let rec = record(json!({"calories": 2000, "vitamins": {"c": 10}, "minerals": {"iron": 5}}));
        assert_eq!(rec.amount("calories"), Some(2000.0));
        assert_eq!(rec.vitamins().and_then(|v| v.get("c")), Some(&json!(10)));
        assert_eq!(rec.minerals().map(Map::len), Some(1));
        assert!(rec.group("calories").is_none());
    }

    #[test]
    fn profile_skips_bookkeeping_keys_and_labels_groups() {
        let rec = record(json!({
            "calories": 1850.456,
            "total_items": 4,
            "timestamp": "2024-01-01T00:00:00Z",
            "protein": 62,
            "vitamins": {"c": 10.5},
            "minerals": {"iron": 5}
        }));

        let entries = rec.profile_entries();
        let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["calories", "protein", "Vitamin c", "iron"]);
        assert_eq!(entries[0].value, "1850.46");
        assert_eq!(entries[2].key, "vitamins_c");
        assert_eq!(entries[2].group, ProfileGroup::Vitamin);
        assert_eq!(entries[3].group, ProfileGroup::Mineral);
    }

    #[test]
    fn profile_humanizes_underscored_names() {
        let rec = record(json!({"saturated_fat": 12}));
        assert_eq!(rec.profile_entries()[0].label, "saturated fat");
    }

    #[test]
    fn payload_insert_new_refuses_duplicates() {
        let mut payload = FlatNutritionPayload::default();
        assert!(payload.insert_new("vitamins_c".into(), json!(10)));
        assert!(!payload.insert_new("vitamins_c".into(), json!(99)));
        assert_eq!(payload.number("vitamins_c"), Some(10.0));
    }
}
