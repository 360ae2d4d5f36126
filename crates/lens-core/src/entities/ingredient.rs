//! Ingredient analysis results.
//!
//! Every field is absent-tolerant: a missing or `null` list decodes as an
//! empty list and renders as "none detected".

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Decode `null` as the type's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A single flagged ingredient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct IngredientFinding {
    pub name: String,
    /// Regulatory code such as an E-number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Known health effects.
    #[serde(default, rename = "effects", skip_serializing_if = "Option::is_none")]
    pub health_effects: Option<String>,
    /// Countries where the ingredient is banned, in service order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub banned_countries: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_restrictions: Option<String>,
}

impl IngredientFinding {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: None,
            health_effects: None,
            banned_countries: Vec::new(),
            usage_restrictions: None,
        }
    }

    /// Health effects, or a fallback when none were provided.
    #[must_use]
    pub fn effects_text(&self) -> &str {
        self.health_effects
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .unwrap_or("No effects provided")
    }

    /// Comma-separated ban list, or a fallback when there are no bans.
    #[must_use]
    pub fn bans_text(&self) -> String {
        if self.banned_countries.is_empty() {
            String::from("No known bans reported")
        } else {
            self.banned_countries.join(", ")
        }
    }
}

/// Artificial additives grouped by sub-category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ArtificialAdditives {
    #[serde(default, deserialize_with = "null_as_default")]
    pub emulsifiers: Vec<IngredientFinding>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub glazing_agents: Vec<IngredientFinding>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub colors: Vec<IngredientFinding>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub other: Vec<IngredientFinding>,
}

impl ArtificialAdditives {
    /// Sub-categories with their display titles, in display order.
    #[must_use]
    pub fn groups(&self) -> [(&'static str, &[IngredientFinding]); 4] {
        [
            ("Emulsifiers", self.emulsifiers.as_slice()),
            ("Glazing Agents", self.glazing_agents.as_slice()),
            ("Colors", self.colors.as_slice()),
            ("Other", self.other.as_slice()),
        ]
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups().iter().all(|(_, findings)| findings.is_empty())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups().iter().map(|(_, findings)| findings.len()).sum()
    }
}

/// The service's overall verdict on the label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct OverallAssessment {
    #[serde(default, deserialize_with = "null_as_default")]
    pub risk_level: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recommendations: Vec<String>,
}

/// Structured result of analyzing one food-label image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct IngredientAnalysisResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub harmful_ingredients: Vec<IngredientFinding>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub artificial_flavors: Vec<IngredientFinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artificial_additives: Option<ArtificialAdditives>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub preservatives: Vec<IngredientFinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_assessment: Option<OverallAssessment>,
}

impl IngredientAnalysisResult {
    /// Whether the service flagged nothing at all.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.harmful_ingredients.is_empty()
            && self.artificial_flavors.is_empty()
            && self.artificial_additives.as_ref().is_none_or(ArtificialAdditives::is_empty)
            && self.preservatives.is_empty()
    }
}

/// Structured error body sent by the ingredient analysis service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ServiceErrorPayload {
    pub error: String,
    /// Raw model output the service failed to interpret.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_full_result() {
        let json = r#"{
            "harmful_ingredients": [
                {"name": "Red 40", "code": "E129", "effects": "Hyperactivity in children",
                 "banned_countries": ["Denmark", "Belgium"], "usage_restrictions": "Warning label in EU"}
            ],
            "artificial_flavors": [],
            "artificial_additives": {
                "emulsifiers": [{"name": "Soy lecithin", "code": "E322"}],
                "colors": null
            },
            "preservatives": [{"name": "Sodium benzoate"}],
            "overall_assessment": {
                "risk_level": "moderate",
                "summary": "Contains synthetic dyes.",
                "recommendations": ["Limit intake", "Choose dye-free options"]
            }
        }"#;

        let result: IngredientAnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.harmful_ingredients.len(), 1);
        let red = &result.harmful_ingredients[0];
        assert_eq!(red.code.as_deref(), Some("E129"));
        assert_eq!(red.bans_text(), "Denmark, Belgium");
        assert!(result.artificial_flavors.is_empty());

        let additives = result.artificial_additives.as_ref().unwrap();
        assert_eq!(additives.emulsifiers.len(), 1);
        assert!(additives.colors.is_empty());
        assert_eq!(additives.len(), 1);

        let overall = result.overall_assessment.as_ref().unwrap();
        assert_eq!(overall.recommendations.len(), 2);
        assert!(!result.is_clean());
    }

    #[test]
    fn empty_object_is_a_clean_result() {
        let result: IngredientAnalysisResult = serde_json::from_str("{}").unwrap();
        assert!(result.is_clean());
        assert!(result.overall_assessment.is_none());
    }

    #[test]
    fn finding_fallback_texts() {
        let finding = IngredientFinding::named("Red 40");
        assert_eq!(finding.effects_text(), "No effects provided");
        assert_eq!(finding.bans_text(), "No known bans reported");
    }

    #[test]
    fn wrong_list_type_is_rejected() {
        let err = serde_json::from_str::<IngredientAnalysisResult>(
            r#"{"harmful_ingredients": "Red 40"}"#,
        )
        .unwrap_err();
        assert!(err.is_data());
    }

    #[test]
    fn finding_without_name_is_rejected() {
        assert!(
            serde_json::from_str::<IngredientAnalysisResult>(
                r#"{"preservatives": [{"code": "E211"}]}"#
            )
            .is_err()
        );
    }
}
