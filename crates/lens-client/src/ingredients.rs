//! Ingredient analysis client.

use lens_core::collaborators::ImageUpload;
use lens_core::entities::IngredientAnalysisResult;
use reqwest::multipart::{Form, Part};

use crate::{
    ServiceClient,
    error::ClientError,
    http::{check_response, decode_json},
};

/// Multipart field name the analysis service reads the image from.
pub const IMAGE_FIELD: &str = "image";

impl ServiceClient {
    /// Upload a label image for ingredient analysis.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Service`] when the service answers with an
    /// `{"error": ...}` payload (on any status), [`ClientError::Malformed`]
    /// when the body is not an analysis result, and other variants for
    /// transport or status failures.
    pub async fn analyze_ingredients(
        &self,
        image: &ImageUpload,
    ) -> Result<IngredientAnalysisResult, ClientError> {
        let url = self.service.analyze_url();
        tracing::debug!(
            %url,
            file = %image.file_name,
            bytes = image.len(),
            "uploading image for ingredient analysis"
        );

        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)?;
        let form = Form::new().part(IMAGE_FIELD, part);

        let resp = self.http.post(&url).multipart(form).send().await?;
        decode_json(check_response(resp).await?).await
    }
}
