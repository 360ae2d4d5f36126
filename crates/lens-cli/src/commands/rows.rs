//! Flat display rows shared by several commands.

use lens_core::entities::FoodSourceMap;
use lens_core::presentation::format_amount;
use lens_core::ranking::{RankedRecommendation, Ranking};
use lens_core::risk::DiseaseRisk;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RiskRow {
    pub disease: String,
    pub risk: String,
    pub band: String,
    pub color: String,
    pub width: f64,
}

impl From<&DiseaseRisk> for RiskRow {
    fn from(risk: &DiseaseRisk) -> Self {
        Self {
            disease: risk.label.clone(),
            risk: risk.percent_text(),
            band: risk.band_text(),
            color: risk.color.clone(),
            width: risk.display_width,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecommendationRow {
    pub nutrient: String,
    pub current: String,
    pub target: String,
    pub progress: String,
    pub gap: String,
    pub importance: f64,
    pub conditions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_sources: Option<String>,
}

impl RecommendationRow {
    pub fn new(entry: &RankedRecommendation, food_sources: &FoodSourceMap) -> Self {
        let rec = &entry.recommendation;
        let with_unit = |amount: f64| match &rec.unit {
            Some(unit) => format!("{} {unit}", format_amount(amount)),
            None => format_amount(amount),
        };
        Self {
            nutrient: entry.label.clone(),
            current: with_unit(rec.current),
            target: with_unit(rec.target),
            progress: format!("{}%", entry.progress_percent),
            gap: with_unit(entry.gap),
            importance: rec.importance,
            conditions: rec.related_conditions.clone(),
            food_sources: food_sources.get(&entry.nutrient).map(str::to_string),
        }
    }
}

pub fn recommendation_rows(ranking: &Ranking, food_sources: &FoodSourceMap) -> Vec<RecommendationRow> {
    ranking
        .entries
        .iter()
        .map(|entry| RecommendationRow::new(entry, food_sources))
        .collect()
}

#[cfg(test)]
mod tests {
    use lens_core::entities::{NutrientRecommendation, Recommendations};
    use lens_core::ranking::rank;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn risk_row_carries_band_text_and_clamped_width() {
        let row = RiskRow::from(&DiseaseRisk::new("heart_disease", 120.0));
        assert_eq!(row.disease, "heart disease");
        assert_eq!(row.risk, "120.0%");
        assert_eq!(row.band, "High Risk");
        assert_eq!(row.color, "#dc2626");
        assert_eq!(row.width, 100.0);
    }

    #[test]
    fn recommendation_row_formats_amounts_with_unit() {
        let recommendations: Recommendations = [(
            "vitamins_c".to_string(),
            NutrientRecommendation {
                current: 45.0,
                target: 90.0,
                importance: 6.0,
                related_conditions: vec!["scurvy".into()],
                unit: Some("mg".into()),
            },
        )]
        .into_iter()
        .collect();
        let food_sources: FoodSourceMap =
            [("vitamins_c".to_string(), "Citrus fruits".to_string())]
                .into_iter()
                .collect();

        let rows = recommendation_rows(&rank(&recommendations), &food_sources);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].nutrient, "vitamins c");
        assert_eq!(rows[0].current, "45.00 mg");
        assert_eq!(rows[0].target, "90.00 mg");
        assert_eq!(rows[0].progress, "50%");
        assert_eq!(rows[0].gap, "45.00 mg");
        assert_eq!(rows[0].food_sources.as_deref(), Some("Citrus fruits"));
    }
}
