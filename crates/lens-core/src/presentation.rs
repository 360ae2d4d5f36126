//! Presentation-ready text derived from results.
//!
//! Nothing here affects control flow; these helpers only make output
//! deterministic across front ends.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{FoodSourceMap, IngredientAnalysisResult, IngredientFinding};
use crate::enums::IngredientTone;
use crate::ranking::Ranking;

/// Replace underscores with spaces (`heart_disease` → `heart disease`).
#[must_use]
pub fn humanize(name: &str) -> String {
    name.replace('_', " ")
}

/// Two-decimal rendering used for intake amounts.
#[must_use]
pub fn format_amount(value: f64) -> String {
    format!("{value:.2}")
}

/// Capitalize the first character (`minerals iron` → `Minerals iron`).
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// One category of an ingredient analysis, ready to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct IngredientSection {
    pub title: String,
    pub findings: Vec<IngredientFinding>,
    /// Shown instead of the findings when there are none.
    pub empty_message: String,
}

impl IngredientSection {
    fn new(title: &str, findings: &[IngredientFinding], what: &str) -> Self {
        Self {
            title: title.to_string(),
            findings: findings.to_vec(),
            empty_message: format!("No {what} detected"),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Finding names, or the "none detected" message.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.findings.is_empty() {
            self.empty_message.clone()
        } else {
            self.findings
                .iter()
                .map(|finding| finding.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        }
    }
}

/// Overall verdict, ready to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AssessmentView {
    /// Upper-cased risk level, `UNKNOWN` when the service sent none.
    pub risk_level: String,
    pub tone: IngredientTone,
    pub summary: String,
    pub recommendations: Vec<String>,
}

impl IngredientAnalysisResult {
    /// The four result sections in display order. Artificial additives are
    /// flattened across their sub-categories.
    #[must_use]
    pub fn sections(&self) -> Vec<IngredientSection> {
        let additives: Vec<IngredientFinding> = self
            .artificial_additives
            .as_ref()
            .map(|additives| {
                additives
                    .groups()
                    .iter()
                    .flat_map(|(_, findings)| findings.iter().cloned())
                    .collect()
            })
            .unwrap_or_default();

        vec![
            IngredientSection::new(
                "Harmful Ingredients",
                &self.harmful_ingredients,
                "harmful ingredients",
            ),
            IngredientSection::new(
                "Artificial Flavors",
                &self.artificial_flavors,
                "artificial flavors",
            ),
            IngredientSection::new("Artificial Additives", &additives, "artificial additives"),
            IngredientSection::new("Preservatives", &self.preservatives, "preservatives"),
        ]
    }

    #[must_use]
    pub fn assessment_view(&self) -> Option<AssessmentView> {
        self.overall_assessment.as_ref().map(|overall| {
            let level = overall.risk_level.trim();
            AssessmentView {
                risk_level: if level.is_empty() {
                    String::from("UNKNOWN")
                } else {
                    level.to_uppercase()
                },
                tone: IngredientTone::from_risk_level(level),
                summary: overall.summary.clone(),
                recommendations: overall.recommendations.clone(),
            }
        })
    }
}

/// Detail lines for one finding.
#[must_use]
pub fn finding_details(finding: &IngredientFinding) -> Vec<String> {
    let mut lines = Vec::with_capacity(4);
    if let Some(code) = &finding.code {
        lines.push(format!("Code: {code}"));
    }
    lines.push(format!("Health Effects: {}", finding.effects_text()));
    lines.push(format!("Banned in Countries: {}", finding.bans_text()));
    if let Some(restrictions) = &finding.usage_restrictions {
        lines.push(format!("Usage Restrictions: {restrictions}"));
    }
    lines
}

/// Plain-text recommendation report, most important nutrient first.
#[must_use]
pub fn recommendations_report(ranking: &Ranking, food_sources: &FoodSourceMap) -> String {
    if ranking.is_empty() {
        return String::from("No recommendations available.");
    }
    RecommendationsReport {
        ranking,
        food_sources,
    }
    .to_string()
}

struct RecommendationsReport<'a> {
    ranking: &'a Ranking,
    food_sources: &'a FoodSourceMap,
}

impl fmt::Display for RecommendationsReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("=== NUTRITION RECOMMENDATIONS ===\n\n")?;
        for entry in &self.ranking.entries {
            let rec = &entry.recommendation;
            let unit = rec.unit.as_deref().unwrap_or("");
            writeln!(f, "• {}:", capitalize(&entry.label))?;
            writeln!(f, "  Current: {:.2} {unit}", rec.current)?;
            writeln!(f, "  Target: {:.2} {unit}", rec.target)?;
            if let Some(sources) = self.food_sources.get(&entry.nutrient) {
                writeln!(f, "  Food sources: {sources}")?;
            }
            if !rec.related_conditions.is_empty() {
                writeln!(
                    f,
                    "  Related conditions: {}",
                    rec.related_conditions.join(", ")
                )?;
            }
            writeln!(f, "  Importance score: {:.1}/10\n", rec.importance)?;
        }
        Ok(())
    }
}
