//! Ranking of nutrient recommendations.
//!
//! Recommendations are ordered by importance, highest first. The sort is
//! stable: equal importances keep the order the service sent them in.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{NutrientRecommendation, Recommendations};
use crate::presentation::humanize;
use crate::warnings::DataWarning;

/// A recommendation annotated with progress metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RankedRecommendation {
    pub nutrient: String,
    /// Human-readable nutrient name.
    pub label: String,
    pub recommendation: NutrientRecommendation,
    /// `current / target` clamped to `0..=1`; `0` when the target is zero.
    pub progress_ratio: f64,
    /// `current / target * 100`, rounded, not clamped; `0` when the target
    /// is zero.
    pub progress_percent: f64,
    /// `target - current`.
    pub gap: f64,
}

/// Recommendations in display order, plus any data-quality findings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Ranking {
    pub entries: Vec<RankedRecommendation>,
    pub warnings: Vec<DataWarning>,
}

impl Ranking {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn nutrients(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.nutrient.as_str())
    }
}

/// Progress towards `target`, clamped to `0..=1`.
///
/// A zero target yields `0`, never infinity or `NaN`.
#[must_use]
pub fn progress_ratio(current: f64, target: f64) -> f64 {
    raw_ratio(current, target).clamp(0.0, 1.0)
}

fn raw_ratio(current: f64, target: f64) -> f64 {
    if target == 0.0 {
        return 0.0;
    }
    let ratio = current / target;
    if ratio.is_nan() { 0.0 } else { ratio }
}

/// Unclamped rounded percentage, saturated so it stays finite when a tiny
/// target overflows the ratio.
fn progress_percent(ratio: f64) -> f64 {
    (ratio * 100.0).round().clamp(f64::MIN, f64::MAX)
}

/// Order `recommendations` by importance (descending, stable) and attach
/// progress metrics.
#[must_use]
pub fn rank(recommendations: &Recommendations) -> Ranking {
    let mut warnings = Vec::new();
    let mut entries: Vec<RankedRecommendation> = recommendations
        .iter()
        .map(|(nutrient, recommendation)| {
            if recommendation.target == 0.0 {
                warnings.push(DataWarning::ZeroTarget {
                    nutrient: nutrient.to_string(),
                });
            }
            let ratio = raw_ratio(recommendation.current, recommendation.target);
            RankedRecommendation {
                nutrient: nutrient.to_string(),
                label: humanize(nutrient),
                recommendation: recommendation.clone(),
                progress_ratio: ratio.clamp(0.0, 1.0),
                progress_percent: progress_percent(ratio),
                gap: recommendation.gap(),
            }
        })
        .collect();

    // `sort_by` is stable, which the tie-break relies on.
    entries.sort_by(|a, b| {
        b.recommendation
            .importance
            .total_cmp(&a.recommendation.importance)
    });

    Ranking { entries, warnings }
}
