//! Prediction service request/response types.

use std::borrow::Cow;
use std::fmt;

use schemars::{JsonSchema, Schema, SchemaGenerator};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::nutrition::FlatNutritionPayload;
use crate::named::NamedEntries;

/// A disease risk percentage.
///
/// Expected in `0..=100` but stored exactly as received. Decodes from a JSON
/// number or from a numeric string such as `"45.5"`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct RiskScore(pub f64);

impl RiskScore {
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for RiskScore {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl fmt::Display for RiskScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for RiskScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> Deserialize<'de> for RiskScore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(value) => Ok(Self(value)),
            Raw::Text(text) => text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .map(Self)
                .ok_or_else(|| {
                    serde::de::Error::custom(format!("risk score '{text}' is not a number"))
                }),
        }
    }
}

impl JsonSchema for RiskScore {
    fn inline_schema() -> bool {
        true
    }

    fn schema_name() -> Cow<'static, str> {
        f64::schema_name()
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        f64::json_schema(generator)
    }
}

/// Risk scores for one scored profile, keyed by disease name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct DiseaseRiskPrediction(NamedEntries<RiskScore>);

impl DiseaseRiskPrediction {
    #[must_use]
    pub fn get(&self, disease: &str) -> Option<f64> {
        self.0.get(disease).map(|score| score.0)
    }

    /// `(disease, risk)` pairs in the order the service returned them.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, score)| (name, score.0))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, f64)> for DiseaseRiskPrediction {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, risk)| (name, RiskScore(risk)))
                .collect(),
        )
    }
}

/// A suggested change for one nutrient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NutrientRecommendation {
    /// Current intake.
    pub current: f64,
    /// Target intake. Zero or negative only as a data anomaly.
    pub target: f64,
    /// Relative importance; higher ranks first.
    pub importance: f64,
    /// Conditions this nutrient relates to, in service order.
    #[serde(default, rename = "diseases")]
    pub related_conditions: Vec<String>,
    /// Unit of `current` and `target` (e.g. `mg`), when the service sends one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl NutrientRecommendation {
    /// Distance from current intake to target (`target - current`).
    #[must_use]
    pub fn gap(&self) -> f64 {
        self.target - self.current
    }
}

/// Recommendations keyed by nutrient, in service order.
pub type Recommendations = NamedEntries<NutrientRecommendation>;

/// Free-text food suggestions keyed by nutrient. Sparse: a missing nutrient
/// means no source data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct FoodSourceMap(NamedEntries<String>);

impl FoodSourceMap {
    #[must_use]
    pub fn get(&self, nutrient: &str) -> Option<&str> {
        self.0.get(nutrient).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, text)| (name, text.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for FoodSourceMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Body of a prediction request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PredictionRequest {
    pub nutrition_data: Vec<FlatNutritionPayload>,
}

impl PredictionRequest {
    /// Request scoring a single profile.
    #[must_use]
    pub fn single(payload: FlatNutritionPayload) -> Self {
        Self {
            nutrition_data: vec![payload],
        }
    }
}

/// Successful prediction service response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PredictionResponse {
    /// One entry per scored profile.
    pub predictions: Vec<DiseaseRiskPrediction>,
    #[serde(default)]
    pub recommendations: Recommendations,
    #[serde(default)]
    pub food_sources: FoodSourceMap,
}
