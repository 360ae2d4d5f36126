//! Nutrition store client.

use lens_core::entities::NutritionRecord;
use reqwest::StatusCode;

use crate::{
    ServiceClient,
    error::ClientError,
    http::{check_response, decode_json},
};

impl ServiceClient {
    /// Fetch the latest nutrition records, newest first.
    ///
    /// A 404 means the store has no records yet and yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails, the store returns a
    /// non-success status, or the body is not a list of JSON objects.
    pub async fn fetch_nutrition(&self) -> Result<Vec<NutritionRecord>, ClientError> {
        let url = self.service.nutrition_url();
        tracing::debug!(%url, "fetching latest nutrition records");

        let resp = self.http.get(&url).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            tracing::debug!("nutrition store has no records");
            return Ok(Vec::new());
        }
        let records: Vec<NutritionRecord> = decode_json(check_response(resp).await?).await?;
        tracing::debug!(count = records.len(), "nutrition records received");
        Ok(records)
    }
}
