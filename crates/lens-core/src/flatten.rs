//! Flattening of nested nutrition records into prediction payloads.
//!
//! `{"calories": 2000, "vitamins": {"c": 10}}` becomes
//! `{"calories": 2000, "vitamins_c": 10}`. Only one level of nesting is
//! expanded. Values that are neither scalars nor one-level groups (arrays,
//! `null`, strings, deeper objects) are copied through under their own key.

use serde_json::{Map, Value};

use crate::entities::{FlatNutritionPayload, NutritionRecord};
use crate::warnings::DataWarning;

/// Flatten `record` into a prediction payload. Never fails.
///
/// On a key collision the first value wins; use [`flatten_checked`] to see
/// the collisions.
#[must_use]
pub fn flatten(record: &NutritionRecord) -> FlatNutritionPayload {
    flatten_checked(record).0
}

/// Flatten `record` and report every key that was produced more than once.
#[must_use]
pub fn flatten_checked(record: &NutritionRecord) -> (FlatNutritionPayload, Vec<DataWarning>) {
    let mut payload = FlatNutritionPayload::default();
    let mut warnings = Vec::new();

    let mut put = |key: String, value: &Value| {
        if !payload.insert_new(key.clone(), value.clone()) {
            warnings.push(DataWarning::KeyCollision { key });
        }
    };

    for (key, value) in record.iter() {
        match value {
            Value::Object(group) if is_one_level(group) => {
                for (item, item_value) in group {
                    put(format!("{key}_{item}"), item_value);
                }
            }
            _ => put(key.clone(), value),
        }
    }

    (payload, warnings)
}

fn is_one_level(group: &Map<String, Value>) -> bool {
    group.values().all(|value| !value.is_object())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn record(value: Value) -> NutritionRecord {
        NutritionRecord::from_value(value).unwrap()
    }

    fn payload(value: Value) -> FlatNutritionPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn flattens_vitamins_and_minerals() {
        let flat = flatten(&record(json!({
            "calories": 2000,
            "vitamins": {"C": 10},
            "minerals": {"Iron": 5}
        })));
        assert_eq!(
            flat,
            payload(json!({"calories": 2000, "vitamins_C": 10, "minerals_Iron": 5}))
        );
        assert!(!flat.has_nested_values());
    }

    #[test]
    fn every_group_entry_maps_to_one_key() {
        let rec = record(json!({
            "protein": 55.5,
            "vitamins": {"a": 700, "c": 75, "d": 15, "e": 15},
            "minerals": {"iron": 8, "calcium": 1000, "potassium": 3500}
        }));
        let flat = flatten(&rec);

        assert_eq!(flat.len(), 1 + 4 + 3);
        for (item, value) in rec.vitamins().unwrap() {
            assert_eq!(flat.get(&format!("vitamins_{item}")), Some(value));
        }
        for (item, value) in rec.minerals().unwrap() {
            assert_eq!(flat.get(&format!("minerals_{item}")), Some(value));
        }
        assert!(!flat.contains_key("vitamins"));
    }

    #[test]
    fn any_group_name_is_flattened() {
        let flat = flatten(&record(json!({"macros": {"fat": 70, "carbs": 250}})));
        assert_eq!(flat, payload(json!({"macros_fat": 70, "macros_carbs": 250})));
    }

    #[test]
    fn non_scalar_values_pass_through() {
        let flat = flatten(&record(json!({
            "timestamp": "2024-03-01T10:00:00Z",
            "items": ["apple", "rice"],
            "notes": null,
            "deep": {"inner": {"x": 1}}
        })));

        assert_eq!(flat.get("timestamp"), Some(&json!("2024-03-01T10:00:00Z")));
        assert_eq!(flat.get("items"), Some(&json!(["apple", "rice"])));
        assert_eq!(flat.get("notes"), Some(&Value::Null));
        assert_eq!(flat.get("deep"), Some(&json!({"inner": {"x": 1}})));
    }

    #[test]
    fn empty_group_contributes_nothing() {
        let flat = flatten(&record(json!({"calories": 1, "vitamins": {}})));
        assert_eq!(flat, payload(json!({"calories": 1})));
    }

    #[test]
    fn collision_keeps_first_value_and_warns() {
        let (flat, warnings) = flatten_checked(&record(json!({
            "vitamins_c": 90,
            "vitamins": {"c": 10}
        })));

        assert_eq!(flat.number("vitamins_c"), Some(90.0));
        assert_eq!(
            warnings,
            vec![DataWarning::KeyCollision {
                key: "vitamins_c".into()
            }]
        );
    }

    #[test]
    fn flattening_is_pure() {
        let rec = record(json!({"fat": 70, "minerals": {"zinc": 11}}));
        assert_eq!(flatten(&rec), flatten(&rec));
        assert_eq!(rec.minerals().map(Map::len), Some(1));
    }
}
