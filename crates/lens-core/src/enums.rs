//! Workflow phase enums.
//!
//! All enums use `snake_case` serialization. Each phase enum provides
//! `allowed_next_states()`; the workflow controllers check every state
//! change against it in debug builds.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// NutritionPhase
// ---------------------------------------------------------------------------

/// Phase of the nutrition risk workflow.
///
/// ```text
/// idle → loading → ready
///                → failed
/// loading → loading   (superseded by a newer refresh)
/// ready   → loading   (refresh)
/// failed  → loading   (retry)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NutritionPhase {
    Idle,
    Loading,
    Ready,
    Failed,
}

impl NutritionPhase {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Idle | Self::Ready | Self::Failed => &[Self::Loading],
            Self::Loading => &[Self::Loading, Self::Ready, Self::Failed],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for NutritionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AnalysisPhase
// ---------------------------------------------------------------------------

/// Phase of the ingredient analysis workflow.
///
/// ```text
/// empty → selected → analyzing → succeeded
///                              → failed
/// any state → selected          (new image chosen)
/// succeeded | failed → analyzing (analyze again)
/// analyzing → analyzing          (superseded by a newer analyze)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisPhase {
    Empty,
    Selected,
    Analyzing,
    Succeeded,
    Failed,
}

impl AnalysisPhase {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Empty => &[Self::Selected],
            Self::Selected => &[Self::Selected, Self::Analyzing],
            Self::Analyzing => &[
                Self::Selected,
                Self::Analyzing,
                Self::Succeeded,
                Self::Failed,
            ],
            Self::Succeeded | Self::Failed => &[Self::Selected, Self::Analyzing],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Whether an image is held in this phase.
    #[must_use]
    pub const fn has_image(self) -> bool {
        !matches!(self, Self::Empty)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Selected => "selected",
            Self::Analyzing => "analyzing",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for AnalysisPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// IngredientTone
// ---------------------------------------------------------------------------

/// Display tone for the free-text risk level of an ingredient assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum IngredientTone {
    Green,
    Orange,
    Red,
    Neutral,
}

impl IngredientTone {
    /// Map a service risk level (`"low"`, `"Moderate"`, ...) to a tone.
    #[must_use]
    pub fn from_risk_level(level: &str) -> Self {
        match level.trim().to_ascii_lowercase().as_str() {
            "low" => Self::Green,
            "moderate" => Self::Orange,
            "high" => Self::Red,
            _ => Self::Neutral,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Orange => "orange",
            Self::Red => "red",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for IngredientTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nutrition_transitions() {
        use NutritionPhase::*;
        assert!(Idle.can_transition_to(Loading));
        assert!(!Idle.can_transition_to(Ready));
        assert!(Loading.can_transition_to(Ready));
        assert!(Loading.can_transition_to(Failed));
        assert!(Loading.can_transition_to(Loading));
        assert!(Ready.can_transition_to(Loading));
        assert!(Failed.can_transition_to(Loading));
        assert!(!Ready.can_transition_to(Failed));
        assert!(!Failed.can_transition_to(Idle));
    }

    #[test]
    fn analysis_transitions() {
        use AnalysisPhase::*;
        assert!(Empty.can_transition_to(Selected));
        assert!(!Empty.can_transition_to(Analyzing));
        assert!(Selected.can_transition_to(Analyzing));
        assert!(Analyzing.can_transition_to(Succeeded));
        assert!(Analyzing.can_transition_to(Failed));
        assert!(Analyzing.can_transition_to(Selected));
        assert!(Succeeded.can_transition_to(Analyzing));
        assert!(Failed.can_transition_to(Selected));
        assert!(!Succeeded.can_transition_to(Empty));
        assert!(!Selected.can_transition_to(Succeeded));
    }

    #[test]
    fn every_phase_except_empty_holds_an_image() {
        assert!(!AnalysisPhase::Empty.has_image());
        assert!(AnalysisPhase::Failed.has_image());
    }

    #[test]
    fn tone_from_risk_level() {
        assert_eq!(IngredientTone::from_risk_level("LOW"), IngredientTone::Green);
        assert_eq!(IngredientTone::from_risk_level(" moderate "), IngredientTone::Orange);
        assert_eq!(IngredientTone::from_risk_level("High"), IngredientTone::Red);
        assert_eq!(IngredientTone::from_risk_level("unknown"), IngredientTone::Neutral);
        assert_eq!(IngredientTone::from_risk_level(""), IngredientTone::Neutral);
    }

    #[test]
    fn phases_serialize_snake_case() {
        assert_eq!(
            serde_json::to_string(&AnalysisPhase::Succeeded).unwrap(),
            "\"succeeded\""
        );
        assert_eq!(NutritionPhase::Loading.to_string(), "loading");
    }
}
