//! Backend endpoint clients.
//!
//! Each client owns a [`NetworkCall`](crate::NetworkCall) and a base URL,
//! builds its request, and decodes the response into core types.

pub mod nearby;
pub mod prediction;

pub use nearby::{NearbyClient, NearbyResponse, RawMechanic, nearby_status_message, parse_nearby};
pub use prediction::{PredictionClient, parse_prediction, prediction_status_message};

use url::Url;

use crate::error::NetworkError;

/// Joins `base` and `path` and appends the query pairs.
pub(crate) fn endpoint_url(
    base: &str,
    path: &str,
    query: &[(&str, String)],
) -> Result<Url, NetworkError> {
    let joined = format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'));
    Url::parse_with_params(&joined, query)
        .map_err(|e| NetworkError::InvalidRequest(format!("bad URL {joined}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_joins_slashes() {
        let url = endpoint_url("http://api.test/", "/nearby", &[]).unwrap();
        assert_eq!(url.as_str(), "http://api.test/nearby");
    }

    #[test]
    fn test_endpoint_url_encodes_query() {
        let url = endpoint_url("http://api.test/v1", "nearby", &[("q", "a b".to_string())]).unwrap();
        assert_eq!(url.as_str(), "http://api.test/v1/nearby?q=a+b");
    }

    #[test]
    fn test_endpoint_url_rejects_garbage() {
        let err = endpoint_url("not a url", "nearby", &[]).unwrap_err();
        assert!(matches!(err, NetworkError::InvalidRequest(_)));
    }
}
