//! Value objects exchanged with the Nutrilens services.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` so they can
//! be validated against the schemas registered in `lens-schema`.

mod ingredient;
mod nutrition;
mod prediction;

pub use ingredient::{
    ArtificialAdditives, IngredientAnalysisResult, IngredientFinding, OverallAssessment,
    ServiceErrorPayload,
};
pub use nutrition::{
    FlatNutritionPayload, MINERALS, NutritionRecord, ProfileEntry, ProfileGroup, VITAMINS,
};
pub use prediction::{
    DiseaseRiskPrediction, FoodSourceMap, NutrientRecommendation, PredictionRequest,
    PredictionResponse, Recommendations, RiskScore,
};
