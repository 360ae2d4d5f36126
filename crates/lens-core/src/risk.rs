//! Risk band classification.
//!
//! ```text
//! risk >= 70        -> High
//! 30 <= risk < 70   -> Moderate
//! risk < 30         -> Low
//! ```
//!
//! Classification never clamps. Values above 100 stay `High` and values
//! below 0 stay `Low`; only the display width is clamped.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entities::DiseaseRiskPrediction;
use crate::presentation::humanize;
use crate::warnings::DataWarning;

/// Lower bound of the `High` band.
pub const HIGH_RISK_THRESHOLD: f64 = 70.0;
/// Lower bound of the `Moderate` band.
pub const MODERATE_RISK_THRESHOLD: f64 = 30.0;
/// Upper end of the expected risk range.
pub const MAX_RISK: f64 = 100.0;

/// Severity tier derived from a risk percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    Low,
    Moderate,
    High,
}

impl RiskBand {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }

    /// Title-case name (`"Moderate"`).
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }

    /// Display colour of the band as a hex RGB string.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Low => "#16a34a",
            Self::Moderate => "#ca8a04",
            Self::High => "#dc2626",
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a risk percentage. Pure; defined for every input, `NaN`
/// included (`Low`).
#[must_use]
pub fn classify(risk_percent: f64) -> RiskBand {
    if risk_percent >= HIGH_RISK_THRESHOLD {
        RiskBand::High
    } else if risk_percent >= MODERATE_RISK_THRESHOLD {
        RiskBand::Moderate
    } else {
        RiskBand::Low
    }
}

/// Width of a risk bar in percent: the risk clamped to `0..=100`.
#[must_use]
pub fn display_width(risk_percent: f64) -> f64 {
    if risk_percent.is_nan() {
        return 0.0;
    }
    risk_percent.clamp(0.0, MAX_RISK)
}

/// Presentation-ready view of one disease risk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DiseaseRisk {
    pub disease: String,
    /// Human-readable disease name.
    pub label: String,
    /// Risk exactly as reported.
    pub risk: f64,
    pub band: RiskBand,
    pub color: String,
    /// Bar width in percent, clamped to `0..=100`.
    pub display_width: f64,
}

impl DiseaseRisk {
    #[must_use]
    pub fn new(disease: impl Into<String>, risk: f64) -> Self {
        let disease = disease.into();
        let band = classify(risk);
        Self {
            label: humanize(&disease),
            disease,
            risk,
            band,
            color: band.color().to_string(),
            display_width: display_width(risk),
        }
    }

    /// `"45.0%"`.
    #[must_use]
    pub fn percent_text(&self) -> String {
        format!("{:.1}%", self.risk)
    }

    /// `"Moderate Risk"`.
    #[must_use]
    pub fn band_text(&self) -> String {
        format!("{} Risk", self.band.title())
    }
}

/// Classify every score of every prediction, in service order.
///
/// Scores above 100 are kept as-is and reported as
/// [`DataWarning::RiskAboveRange`].
#[must_use]
pub fn assess(predictions: &[DiseaseRiskPrediction]) -> (Vec<DiseaseRisk>, Vec<DataWarning>) {
    let mut risks = Vec::new();
    let mut warnings = Vec::new();

    for prediction in predictions {
        for (disease, risk) in prediction.iter() {
            if risk > MAX_RISK {
                warnings.push(DataWarning::RiskAboveRange {
                    disease: disease.to_string(),
                    risk,
                });
            }
            risks.push(DiseaseRisk::new(disease, risk));
        }
    }

    (risks, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, RiskBand::Low)]
    #[case(29.999, RiskBand::Low)]
    #[case(30.0, RiskBand::Moderate)]
    #[case(45.0, RiskBand::Moderate)]
    #[case(69.999, RiskBand::Moderate)]
    #[case(70.0, RiskBand::High)]
    #[case(100.0, RiskBand::High)]
    #[case(150.0, RiskBand::High)]
    #[case(-5.0, RiskBand::Low)]
    #[case(f64::NAN, RiskBand::Low)]
    #[case(f64::INFINITY, RiskBand::High)]
    fn classify_thresholds(#[case] risk: f64, #[case] expected: RiskBand) {
        assert_eq!(classify(risk), expected);
    }

    #[test]
    fn classification_matches_band_definitions_across_range() {
        for tenths in -100..=1200 {
            let risk = f64::from(tenths) / 10.0;
            let band = classify(risk);
            assert_eq!(band == RiskBand::High, risk >= 70.0, "risk {risk}");
            assert_eq!(
                band == RiskBand::Moderate,
                (30.0..70.0).contains(&risk),
                "risk {risk}"
            );
            assert_eq!(band == RiskBand::Low, risk < 30.0, "risk {risk}");
        }
    }

    #[test]
    fn band_colors() {
        assert_eq!(RiskBand::Low.color(), "#16a34a");
        assert_eq!(RiskBand::Moderate.color(), "#ca8a04");
        assert_eq!(RiskBand::High.color(), "#dc2626");
    }

    #[rstest]
    #[case(45.0, 45.0)]
    #[case(130.0, 100.0)]
    #[case(-3.0, 0.0)]
    #[case(f64::NAN, 0.0)]
    fn display_width_is_clamped(#[case] risk: f64, #[case] width: f64) {
        assert!((display_width(risk) - width).abs() < f64::EPSILON);
    }

    #[test]
    fn disease_risk_texts() {
        let risk = DiseaseRisk::new("heart_disease", 61.24);
        assert_eq!(risk.label, "heart disease");
        assert_eq!(risk.percent_text(), "61.2%");
        assert_eq!(risk.band_text(), "Moderate Risk");
        assert_eq!(risk.color, "#ca8a04");
    }

    #[test]
    fn assess_keeps_out_of_range_values_and_warns() {
        let prediction: DiseaseRiskPrediction = [
            ("diabetes".to_string(), 45.0),
            ("obesity".to_string(), 120.0),
        ]
        .into_iter()
        .collect();

        let (risks, warnings) = assess(&[prediction]);

        assert_eq!(risks.len(), 2);
        assert_eq!(risks[0].band, RiskBand::Moderate);
        assert!((risks[1].risk - 120.0).abs() < f64::EPSILON);
        assert_eq!(risks[1].band, RiskBand::High);
        assert!((risks[1].display_width - 100.0).abs() < f64::EPSILON);
        assert_eq!(
            warnings,
            vec![DataWarning::RiskAboveRange {
                disease: "obesity".into(),
                risk: 120.0
            }]
        );
    }
}
