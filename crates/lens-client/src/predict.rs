//! Disease risk prediction client.

use lens_core::entities::{FlatNutritionPayload, PredictionRequest, PredictionResponse};

use crate::{
    ServiceClient,
    error::ClientError,
    http::{check_response, decode_json},
};

impl ServiceClient {
    /// Score one flattened nutrition profile.
    ///
    /// The payload is sent as `{"nutrition_data": [payload]}`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails, the service reports an
    /// error, or the response lacks a `predictions` list.
    pub async fn request_prediction(
        &self,
        payload: &FlatNutritionPayload,
    ) -> Result<PredictionResponse, ClientError> {
        let url = self.service.predict_url();
        tracing::debug!(%url, fields = payload.len(), "requesting disease risk prediction");

        let request = PredictionRequest::single(payload.clone());
        let resp = self.http.post(&url).json(&request).send().await?;
        let response: PredictionResponse = decode_json(check_response(resp).await?).await?;

        tracing::debug!(
            predictions = response.predictions.len(),
            recommendations = response.recommendations.len(),
            "prediction received"
        );
        Ok(response)
    }
}
