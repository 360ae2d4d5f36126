//! Central schema registry for Nutrilens wire types.
//!
//! The `SchemaRegistry` builds JSON Schemas from lens-core types at
//! construction time using [`schemars::schema_for!`] and validates values via
//! `jsonschema`.

use std::collections::HashMap;

use lens_core::entities::{
    DiseaseRiskPrediction, FlatNutritionPayload, FoodSourceMap, IngredientAnalysisResult,
    IngredientFinding, NutrientRecommendation, NutritionRecord, PredictionRequest,
    PredictionResponse, ServiceErrorPayload,
};
use lens_core::ranking::Ranking;
use lens_core::risk::DiseaseRisk;
use lens_core::warnings::DataWarning;
use schemars::schema_for;
use serde_json::Value;

use crate::error::SchemaError;

/// Central store of the JSON Schemas for every service payload.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, Value>,
}

macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert($name, schema_for!($ty).to_value());
    };
}

impl SchemaRegistry {
    /// Build a registry containing every wire and result schema.
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        // --- Nutrition store ---
        register!(schemas, "nutrition_record", NutritionRecord);

        // --- Prediction service ---
        register!(schemas, "flat_nutrition_payload", FlatNutritionPayload);
        register!(schemas, "prediction_request", PredictionRequest);
        register!(schemas, "prediction_response", PredictionResponse);
        register!(schemas, "disease_risk_prediction", DiseaseRiskPrediction);
        register!(schemas, "nutrient_recommendation", NutrientRecommendation);
        register!(schemas, "food_source_map", FoodSourceMap);

        // --- Ingredient analysis service ---
        register!(schemas, "ingredient_analysis_result", IngredientAnalysisResult);
        register!(schemas, "ingredient_finding", IngredientFinding);
        register!(schemas, "service_error_payload", ServiceErrorPayload);

        // --- Derived results ---
        register!(schemas, "disease_risk", DiseaseRisk);
        register!(schemas, "ranking", Ranking);
        register!(schemas, "data_warning", DataWarning);

        Self { schemas }
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// List all registered schema names, sorted.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn registry() -> SchemaRegistry {
        SchemaRegistry::new()
    }

    #[test]
    fn registry_has_expected_count() {
        assert_eq!(registry().schema_count(), 13);
    }

    #[test]
    fn registry_list_is_sorted() {
        let names = registry().list();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert_eq!(names.first(), Some(&"data_warning"));
    }

    #[test]
    fn get_nonexistent_schema() {
        assert!(registry().get("nonexistent").is_none());
    }

    #[test]
    fn validate_prediction_response_fixture() {
        let response = json!({
            "predictions": [{"diabetes": 45.0}],
            "recommendations": {
                "fiber": {"current": 12.0, "target": 25.0, "diseases": [], "importance": 3.0}
            },
            "food_sources": {}
        });
        assert!(registry().validate("prediction_response", &response).is_ok());
    }

    #[test]
    fn validate_rejects_missing_predictions() {
        let result = registry().validate("prediction_response", &json!({"recommendations": {}}));
        if let Err(SchemaError::ValidationFailed { errors }) = result {
            assert!(!errors.is_empty());
        } else {
            panic!("Expected ValidationFailed");
        }
    }

    #[test]
    fn validate_rejects_recommendation_without_target() {
        let invalid = json!({"current": 1.0, "importance": 2.0});
        assert!(registry().validate("nutrient_recommendation", &invalid).is_err());
    }

    #[test]
    fn validate_ingredient_result_and_error_payload() {
        let reg = registry();
        let result = json!({
            "harmful_ingredients": [{"name": "Red 40", "banned_countries": ["Norway"]}],
            "preservatives": []
        });
        assert!(reg.validate("ingredient_analysis_result", &result).is_ok());

        let error = json!({"error": "Could not parse model output", "raw_response": "..."});
        assert!(reg.validate("service_error_payload", &error).is_ok());
        assert!(reg.validate("service_error_payload", &json!({"raw_response": "x"})).is_err());
    }

    #[test]
    fn validate_data_warning_tag() {
        let reg = registry();
        assert!(
            reg.validate("data_warning", &json!({"kind": "zero_target", "nutrient": "fiber"}))
                .is_ok()
        );
        assert!(
            reg.validate("data_warning", &json!({"kind": "unknown", "nutrient": "fiber"}))
                .is_err()
        );
    }

    #[test]
    fn validate_nonexistent_schema_returns_not_found() {
        let result = registry().validate("bogus", &json!({}));
        assert!(matches!(result, Err(SchemaError::NotFound(_))));
    }
}
