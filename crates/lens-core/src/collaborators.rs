//! Remote collaborators the workflows depend on.
//!
//! Only the boundary is defined here; `lens-client` implements it over HTTP
//! and tests substitute in-memory doubles.

use async_trait::async_trait;

use crate::entities::{
    FlatNutritionPayload, IngredientAnalysisResult, NutritionRecord, PredictionResponse,
};
use crate::errors::ServiceError;

/// Source of stored nutrition records.
#[async_trait]
pub trait NutritionStore: Send + Sync {
    /// Fetch the latest records, newest first. May be empty.
    async fn fetch_latest(&self) -> Result<Vec<NutritionRecord>, ServiceError>;
}

/// Disease risk inference over a flattened nutrition profile.
#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict(
        &self,
        payload: &FlatNutritionPayload,
    ) -> Result<PredictionResponse, ServiceError>;
}

/// Ingredient analysis of a food-label image.
#[async_trait]
pub trait IngredientAnalysisService: Send + Sync {
    async fn analyze(&self, image: &ImageUpload) -> Result<IngredientAnalysisResult, ServiceError>;
}

/// An image to upload for analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    /// MIME type such as `image/png`.
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    #[must_use]
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
