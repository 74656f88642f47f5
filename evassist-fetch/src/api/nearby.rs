//! Nearby mechanic search.

use evassist_core::Coordinate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, instrument};

use super::endpoint_url;
use crate::client::NetworkCall;
use crate::envelope::unwrap_data;
use crate::error::{FetchError, NetworkError};
use crate::request::HttpRequest;

// ============================================================================
// Wire Types
// ============================================================================

/// One mechanic as it appears on the wire.
///
/// Every field is optional and leniently decoded; deciding whether the
/// record is usable is left to the caller.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawMechanic {
    /// Identifier, given as a number or a string.
    #[serde(deserialize_with = "lenient_string")]
    pub id: Option<String>,
    /// Shop name.
    #[serde(alias = "name", deserialize_with = "lenient_string")]
    pub shop_name: Option<String>,
    /// Latitude in degrees.
    #[serde(deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,
    /// Longitude in degrees.
    #[serde(deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,
    /// Server-computed distance in kilometers.
    #[serde(deserialize_with = "lenient_f64")]
    pub distance_km: Option<f64>,
    /// Average rating.
    #[serde(deserialize_with = "lenient_f64")]
    pub rating: Option<f64>,
    /// Number of ratings.
    #[serde(deserialize_with = "lenient_f64")]
    pub rating_count: Option<f64>,
    /// Phone number.
    #[serde(deserialize_with = "lenient_string")]
    pub phone: Option<String>,
    /// Street address.
    #[serde(deserialize_with = "lenient_string")]
    pub address: Option<String>,
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(Option::<Value>::deserialize(d)?.as_ref().and_then(value_as_f64))
}

fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn value_as_page(value: Option<&Value>) -> Option<u32> {
    let n = value.and_then(value_as_f64)?;
    if n.is_finite() && n >= 1.0 && n <= f64::from(u32::MAX) {
        Some(n as u32)
    } else {
        None
    }
}

/// A decoded page of search results.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyResponse {
    /// Records that decoded into [`RawMechanic`].
    pub mechanics: Vec<RawMechanic>,
    /// Page number, at least 1.
    pub page: u32,
    /// Total pages, at least `page`.
    pub total_pages: u32,
    /// Records that were not objects and could not be decoded.
    pub undecodable: usize,
}

/// Decodes a nearby-search body.
///
/// Accepts both the bare and the `data`-wrapped shape. A missing `page`
/// falls back to `requested_page`, a missing or zero `total_pages` to 1.
///
/// # Errors
///
/// Returns an error if the body is not JSON, is not an object, or carries
/// a `mechanics` field that is not a list.
pub fn parse_nearby(body: &str, requested_page: u32) -> Result<NearbyResponse, FetchError> {
    let value = unwrap_data(serde_json::from_str(body)?);
    let Value::Object(map) = value else {
        return Err(FetchError::InvalidResponse(
            "expected a JSON object".to_string(),
        ));
    };

    let items = match map.get("mechanics") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.clone(),
        Some(other) => {
            return Err(FetchError::InvalidResponse(format!(
                "mechanics is not a list: {other}"
            )));
        }
    };

    let mut mechanics = Vec::with_capacity(items.len());
    let mut undecodable = 0;
    for item in items {
        match serde_json::from_value::<RawMechanic>(item) {
            Ok(m) => mechanics.push(m),
            Err(e) => {
                debug!(error = %e, "Skipping undecodable mechanic");
                undecodable += 1;
            }
        }
    }

    let page = value_as_page(map.get("page")).unwrap_or(requested_page.max(1));
    let total_pages = value_as_page(map.get("total_pages")).unwrap_or(1).max(page);

    Ok(NearbyResponse {
        mechanics,
        page,
        total_pages,
        undecodable,
    })
}

/// Message shown when a failed search carries no message of its own.
pub fn nearby_status_message(status: u16) -> String {
    match status {
        400 => "Invalid location parameters",
        404 => "No mechanics found in this area",
        500 => "Server error. Please try again later",
        _ => "Failed to fetch nearby mechanics",
    }
    .to_string()
}

// ============================================================================
// Client
// ============================================================================

/// Client for `GET {base}/nearby`.
#[derive(Debug, Clone)]
pub struct NearbyClient {
    call: NetworkCall,
    base_url: String,
    page_size: u32,
}

impl NearbyClient {
    /// Default number of results per page.
    pub const DEFAULT_PAGE_SIZE: u32 = 10;

    /// Creates a client.
    pub fn new(call: NetworkCall, base_url: impl Into<String>) -> Self {
        Self {
            call,
            base_url: base_url.into(),
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }

    /// Sets the page size; zero is raised to 1.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Returns the page size.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Builds the request for one page.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidRequest`] for page 0 or a bad base URL.
    pub fn request(&self, location: &Coordinate, page: u32) -> Result<HttpRequest, NetworkError> {
        if page == 0 {
            return Err(NetworkError::InvalidRequest("page must be >= 1".to_string()));
        }
        let url = endpoint_url(
            &self.base_url,
            "nearby",
            &[
                ("lat", location.latitude.to_string()),
                ("lon", location.longitude.to_string()),
                ("page", page.to_string()),
                ("limit", self.page_size.to_string()),
            ],
        )?;
        Ok(HttpRequest::get(url.as_str()).with_header("Accept", "application/json"))
    }

    /// Fetches one page of mechanics around `location`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Api`] with a human-readable message when the
    /// backend rejects the request, or a network/decoding error.
    #[instrument(skip(self), fields(lat = location.latitude, lon = location.longitude))]
    pub async fn fetch_page(
        &self,
        location: &Coordinate,
        page: u32,
    ) -> Result<NearbyResponse, FetchError> {
        let request = self.request(location, page)?;
        let response = self
            .call
            .execute_with_retry(&request)
            .await
            .map_err(|e| FetchError::from_network(e, nearby_status_message))?;

        let parsed = parse_nearby(&response.text(), page)?;
        debug!(
            count = parsed.mechanics.len(),
            page = parsed.page,
            total_pages = parsed.total_pages,
            "Fetched nearby mechanics"
        );
        Ok(parsed)
    }
}
