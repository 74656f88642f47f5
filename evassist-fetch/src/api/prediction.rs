//! Battery prediction endpoint.

use evassist_core::PredictionResult;
use serde_json::json;
use tracing::{debug, instrument};

use super::endpoint_url;
use crate::client::NetworkCall;
use crate::envelope::unwrap_data;
use crate::error::{FetchError, NetworkError};
use crate::request::HttpRequest;

/// Message shown when a failed prediction carries no message of its own.
pub fn prediction_status_message(status: u16) -> String {
    format!("Failed to predict battery optimization (HTTP {status})")
}

/// Decodes a prediction body, bare or `data`-wrapped.
///
/// # Errors
///
/// Returns an error if the body is not JSON or lacks the prediction fields.
pub fn parse_prediction(body: &str) -> Result<PredictionResult, FetchError> {
    let value = unwrap_data(serde_json::from_str(body)?);
    serde_json::from_value(value)
        .map_err(|e| FetchError::InvalidResponse(format!("not a prediction: {e}")))
}

/// Client for `POST {base}/predict`.
#[derive(Debug, Clone)]
pub struct PredictionClient {
    call: NetworkCall,
    base_url: String,
}

impl PredictionClient {
    /// Creates a client.
    pub fn new(call: NetworkCall, base_url: impl Into<String>) -> Self {
        Self {
            call,
            base_url: base_url.into(),
        }
    }

    /// Requests a prediction for a vehicle model and charging session length.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidRequest`] for an empty model, or any
    /// other network or decoding error.
    #[instrument(skip(self))]
    pub async fn predict(
        &self,
        ev_model: &str,
        charging_duration_min: u32,
    ) -> Result<PredictionResult, FetchError> {
        let ev_model = ev_model.trim();
        if ev_model.is_empty() {
            return Err(NetworkError::InvalidRequest("EV model must not be empty".to_string()).into());
        }

        let url = endpoint_url(&self.base_url, "predict", &[])?;
        let body = json!({
            "EV Model": ev_model,
            "Charging Duration (min)": charging_duration_min,
        });
        let request = HttpRequest::post_json(url.as_str(), &body)?;

        let response = self
            .call
            .execute_with_retry(&request)
            .await
            .map_err(|e| FetchError::from_network(e, prediction_status_message))?;

        let prediction = parse_prediction(&response.text())?;
        debug!(health = %prediction.battery_health, "Received prediction");
        Ok(prediction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prediction_bare() {
        let body = r#"{"Battery Health":"Good","Charging Duration Class":"Normal","Recommendation":"Keep it up"}"#;
        let p = parse_prediction(body).unwrap();
        assert_eq!(p.battery_health, "Good");
        assert_eq!(p.charging_duration_class, "Normal");
        assert_eq!(p.recommendation, "Keep it up");
    }

    #[test]
    fn test_parse_prediction_wrapped() {
        let body = r#"{"data":{"Battery Health":"Poor","Charging Duration Class":"Fast"}}"#;
        let p = parse_prediction(body).unwrap();
        assert_eq!(p.battery_health, "Poor");
        assert!(p.recommendation.is_empty());
    }

    #[test]
    fn test_parse_prediction_missing_fields() {
        assert!(matches!(
            parse_prediction(r#"{"status":"ok"}"#),
            Err(FetchError::InvalidResponse(_))
        ));
    }
}
