//! Collaborator trait implementations over HTTP.

use async_trait::async_trait;
use lens_core::collaborators::{
    ImageUpload, IngredientAnalysisService, NutritionStore, PredictionService,
};
use lens_core::entities::{
    FlatNutritionPayload, IngredientAnalysisResult, NutritionRecord, PredictionResponse,
};
use lens_core::errors::ServiceError;

use crate::ServiceClient;

#[async_trait]
impl NutritionStore for ServiceClient {
    async fn fetch_latest(&self) -> Result<Vec<NutritionRecord>, ServiceError> {
        self.fetch_nutrition().await.map_err(ServiceError::from)
    }
}

#[async_trait]
impl PredictionService for ServiceClient {
    async fn predict(
        &self,
        payload: &FlatNutritionPayload,
    ) -> Result<PredictionResponse, ServiceError> {
        self.request_prediction(payload)
            .await
            .map_err(ServiceError::from)
    }
}

#[async_trait]
impl IngredientAnalysisService for ServiceClient {
    async fn analyze(&self, image: &ImageUpload) -> Result<IngredientAnalysisResult, ServiceError> {
        self.analyze_ingredients(image)
            .await
            .map_err(ServiceError::from)
    }
}
