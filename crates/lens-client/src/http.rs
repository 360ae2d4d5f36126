//! Shared HTTP response helpers for the service clients.
//!
//! Centralizes status-code checks (429 rate limiting with `Retry-After`
//! parsing, structured `{"error": ...}` bodies, other non-success statuses)
//! and body decoding, so each client module only builds its request.

use lens_core::entities::ServiceErrorPayload;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ClientError;

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **429 Too Many Requests** → [`ClientError::RateLimited`] with
///   `Retry-After` header parsing (falls back to 60 s if absent or
///   unparseable).
/// - **Non-success with an `{"error": ...}` body** → [`ClientError::Service`].
/// - **Any other non-success status** → [`ClientError::Api`] with the body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    if resp.status() == 429 {
        let retry_after = parse_retry_after(&resp);
        return Err(ClientError::RateLimited {
            retry_after_secs: retry_after,
        });
    }
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        return Err(structured_error(status, &body).unwrap_or(ClientError::Api {
            status,
            message: body,
        }));
    }
    Ok(resp)
}

/// Decode a successful response body as `T`.
///
/// A body carrying a structured `error` field is reported as
/// [`ClientError::Service`] even on a 2xx status; any other mismatch is
/// [`ClientError::Malformed`].
pub async fn decode_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let status = resp.status().as_u16();
    let body = resp.text().await?;
    if let Some(err) = structured_error(status, &body) {
        return Err(err);
    }
    serde_json::from_str(&body).map_err(|e| ClientError::Malformed(e.to_string()))
}

/// Parse `body` as a structured service error, if it is one.
fn structured_error(status: u16, body: &str) -> Option<ClientError> {
    let value: Value = serde_json::from_str(body).ok()?;
    if !value.get("error").is_some_and(Value::is_string) {
        return None;
    }
    let payload: ServiceErrorPayload = serde_json::from_value(value).ok()?;
    Some(ClientError::Service {
        status,
        message: payload.error,
        raw_response: payload.raw_response,
    })
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lens_core::entities::PredictionResponse;

    fn mock_response(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    fn mock_response_with_retry_after(status: u16, value: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .header("Retry-After", value)
                .body("")
                .unwrap(),
        )
    }

    #[test]
    fn parse_retry_after_from_header() {
        let resp = mock_response_with_retry_after(429, "120");
        assert_eq!(parse_retry_after(&resp), 120);
    }

    #[test]
    fn parse_retry_after_missing_or_non_numeric() {
        assert_eq!(parse_retry_after(&mock_response(429, "")), 60);
        let resp = mock_response_with_retry_after(429, "not-a-number");
        assert_eq!(parse_retry_after(&resp), 60);
    }

    #[tokio::test]
    async fn check_response_rate_limited_with_header() {
        let resp = mock_response_with_retry_after(429, "30");
        let err = check_response(resp).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::RateLimited {
                retry_after_secs: 30
            }
        ));
    }

    #[tokio::test]
    async fn check_response_plain_api_error() {
        let err = check_response(mock_response(500, "Internal Server Error"))
            .await
            .unwrap_err();
        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal Server Error");
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn check_response_structured_error_body() {
        let resp = mock_response(
            500,
            r#"{"error": "Could not parse model output", "raw_response": "```json"}"#,
        );
        let err = check_response(resp).await.unwrap_err();
        match err {
            ClientError::Service {
                status,
                message,
                raw_response,
            } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Could not parse model output");
                assert_eq!(raw_response.as_deref(), Some("```json"));
            }
            other => panic!("expected Service, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn check_response_success() {
        assert!(check_response(mock_response(200, "")).await.is_ok());
    }

    #[tokio::test]
    async fn decode_json_reports_error_payload_on_success_status() {
        let resp = mock_response(200, r#"{"error": "No text found in image"}"#);
        let err = decode_json::<PredictionResponse>(resp).await.unwrap_err();
        assert!(matches!(err, ClientError::Service { status: 200, .. }));
    }

    #[tokio::test]
    async fn decode_json_flags_wrong_shape_as_malformed() {
        let resp = mock_response(200, r#"{"recommendations": {}}"#);
        let err = decode_json::<PredictionResponse>(resp).await.unwrap_err();
        match err {
            ClientError::Malformed(detail) => assert!(detail.contains("predictions")),
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn decode_json_accepts_valid_body() {
        let resp = mock_response(200, r#"{"predictions": [{"diabetes": 12.5}]}"#);
        let response = decode_json::<PredictionResponse>(resp).await.unwrap();
        assert_eq!(response.predictions[0].get("diabetes"), Some(12.5));
    }
}
