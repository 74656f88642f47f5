//! JSON output formatting.

use anyhow::Result;
use chrono::{DateTime, Utc};
use evassist_core::{BatteryStatus, Coordinate, MapRegion, Provider, format_distance};
use evassist_location::{Position, PositionSource};
use evassist_store::{NO_PREDICTION_MESSAGE, PagerSnapshot};
use serde::{Serialize, Serializer};

// ============================================================================
// Output Types
// ============================================================================

/// Position report.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionOutput {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
    pub source: PositionSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PositionOutput {
    /// Wraps a region obtained from the device.
    pub fn device(region: MapRegion) -> Self {
        Self {
            latitude: region.coordinate.latitude,
            longitude: region.coordinate.longitude,
            latitude_delta: region.latitude_delta,
            longitude_delta: region.longitude_delta,
            source: PositionSource::Device,
            error: None,
        }
    }
}

impl From<&Position> for PositionOutput {
    fn from(position: &Position) -> Self {
        Self {
            source: position.source,
            error: position.error.as_ref().map(evassist_location::LocationError::user_message),
            ..Self::device(position.region)
        }
    }
}

/// One mechanic with its display distance.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MechanicOutput {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub distance_km: f64,
    pub distance: String,
    pub server_distance: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl MechanicOutput {
    fn new(provider: &Provider, distance_km: f64) -> Self {
        Self {
            id: provider.id.clone(),
            name: provider.name.clone(),
            latitude: provider.coordinate.latitude,
            longitude: provider.coordinate.longitude,
            distance_km,
            distance: format_distance(distance_km),
            server_distance: provider.has_server_distance(),
            rating: provider.rating,
            rating_count: provider.rating_count,
            phone: provider.phone.clone(),
            address: provider.address.clone(),
        }
    }
}

/// Nearby search results.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyOutput {
    pub origin: Coordinate,
    pub degraded: bool,
    pub page: u32,
    pub total_pages: u32,
    pub has_more: bool,
    pub mechanics: Vec<MechanicOutput>,
}

impl NearbyOutput {
    /// Builds the report from pager state.
    pub fn new(
        origin: Coordinate,
        degraded: bool,
        snapshot: &PagerSnapshot,
        rows: &[(Provider, f64)],
    ) -> Self {
        Self {
            origin,
            degraded,
            page: snapshot.current_page,
            total_pages: snapshot.total_pages,
            has_more: snapshot.has_more_pages,
            mechanics: rows.iter().map(|(p, d)| MechanicOutput::new(p, *d)).collect(),
        }
    }
}

/// Battery status report.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatteryOutput {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charging_duration_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ev_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charging_duration: Option<u32>,
    #[serde(
        serialize_with = "serialize_datetime_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_hours: Option<f64>,
    pub recommendations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<Option<&BatteryStatus>> for BatteryOutput {
    fn from(status: Option<&BatteryStatus>) -> Self {
        match status {
            Some(s) => Self {
                available: true,
                health: Some(s.health.clone()),
                charging_duration_class: Some(s.charging_duration_class.clone()),
                ev_model: Some(s.ev_model.clone()),
                charging_duration: s.charging_duration,
                last_updated: s.last_updated,
                age_hours: Some(s.age_hours),
                recommendations: s.recommendations(),
                message: None,
            },
            None => Self {
                available: false,
                health: None,
                charging_duration_class: None,
                ev_model: None,
                charging_duration: None,
                last_updated: None,
                age_hours: None,
                recommendations: Vec::new(),
                message: Some(NO_PREDICTION_MESSAGE.to_string()),
            },
        }
    }
}

// ============================================================================
// Serialization helpers
// ============================================================================

#[allow(clippy::ref_option)]
fn serialize_datetime_opt<S>(dt: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match dt {
        Some(dt) => s.serialize_str(&dt.to_rfc3339()),
        None => s.serialize_none(),
    }
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }
}
