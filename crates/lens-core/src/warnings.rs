//! Data-quality warnings.
//!
//! Anomalies in service data that must be surfaced but never abort a run.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataWarning {
    /// Flattening produced the same key twice; the first value was kept.
    KeyCollision { key: String },
    /// A recommendation has a zero target, so its progress is reported as 0.
    ZeroTarget { nutrient: String },
    /// A risk score above 100. Stored and classified as-is, clamped for display.
    RiskAboveRange { disease: String, risk: f64 },
}

impl DataWarning {
    /// Emit the warning through `tracing`.
    pub fn log(&self) {
        tracing::warn!(warning = %self, "data quality warning");
    }
}

impl fmt::Display for DataWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeyCollision { key } => {
                write!(f, "flattened key '{key}' produced more than once; kept first value")
            }
            Self::ZeroTarget { nutrient } => {
                write!(f, "recommendation for '{nutrient}' has a zero target")
            }
            Self::RiskAboveRange { disease, risk } => {
                write!(f, "risk for '{disease}' is {risk}, above 100")
            }
        }
    }
}
