//! Battery prediction types.
//!
//! - [`PredictionResult`] - Classification returned by the prediction endpoint
//! - [`VehicleInfo`] - Vehicle metadata captured when the prediction was made
//! - [`PredictionCacheEntry`] - Persisted prediction plus its timestamp
//! - [`BatteryStatus`] - View model for the monitoring screen

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Model name shown when no vehicle metadata was stored.
const UNKNOWN_MODEL: &str = "Unknown";

// ============================================================================
// Prediction Result
// ============================================================================

/// Battery prediction as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Battery health classification (e.g. "Good", "Poor").
    #[serde(rename = "Battery Health", alias = "battery_health")]
    pub battery_health: String,
    /// Charging duration classification (e.g. "Fast", "Normal", "Slow").
    #[serde(rename = "Charging Duration Class", alias = "charging_duration_class")]
    pub charging_duration_class: String,
    /// Free-text recommendation.
    #[serde(rename = "Recommendation", alias = "recommendation", default)]
    pub recommendation: String,
}

// ============================================================================
// Vehicle Info
// ============================================================================

/// Vehicle metadata captured at prediction time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleInfo {
    /// EV model name.
    pub ev_model: String,
    /// Charging duration in minutes that was submitted for the prediction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charging_duration: Option<u32>,
}

impl VehicleInfo {
    /// Creates vehicle metadata.
    pub fn new(ev_model: impl Into<String>, charging_duration: Option<u32>) -> Self {
        Self {
            ev_model: ev_model.into(),
            charging_duration,
        }
    }
}

// ============================================================================
// Prediction Cache Entry
// ============================================================================

/// A prediction persisted for offline display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionCacheEntry {
    /// The stored prediction.
    pub prediction: PredictionResult,
    /// Vehicle metadata, if any was captured.
    pub vehicle_info: Option<VehicleInfo>,
    /// When the entry was written, in milliseconds since the Unix epoch.
    pub stored_at_epoch_millis: i64,
}

impl PredictionCacheEntry {
    /// Returns the write time as a UTC timestamp.
    pub fn stored_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.stored_at_epoch_millis).single()
    }

    /// Returns how old the entry is at `now`.
    ///
    /// An age too large to represent saturates to [`Duration::MAX`], so the
    /// entry reads as expired.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now.timestamp_millis()
            .checked_sub(self.stored_at_epoch_millis)
            .and_then(Duration::try_milliseconds)
            .unwrap_or(Duration::MAX)
    }

    /// Returns true if the entry is older than `ttl` at `now`.
    ///
    /// An entry exactly `ttl` old is still fresh.
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.age(now) > ttl
    }
}

// ============================================================================
// Battery Status
// ============================================================================

/// Battery monitoring view built from a cached prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatteryStatus {
    /// Battery health classification.
    pub health: String,
    /// Charging duration classification.
    pub charging_duration_class: String,
    /// Recommendation from the prediction.
    pub recommendation: String,
    /// EV model the prediction was made for.
    pub ev_model: String,
    /// Charging duration submitted with the prediction.
    pub charging_duration: Option<u32>,
    /// When the prediction was stored.
    pub last_updated: Option<DateTime<Utc>>,
    /// Age of the prediction in hours.
    pub age_hours: f64,
}

impl BatteryStatus {
    /// Builds the view from a cache entry.
    #[allow(clippy::cast_precision_loss)]
    pub fn from_entry(entry: &PredictionCacheEntry, now: DateTime<Utc>) -> Self {
        let vehicle = entry.vehicle_info.as_ref();
        Self {
            health: entry.prediction.battery_health.clone(),
            charging_duration_class: entry.prediction.charging_duration_class.clone(),
            recommendation: entry.prediction.recommendation.clone(),
            ev_model: vehicle.map_or_else(|| UNKNOWN_MODEL.to_string(), |v| v.ev_model.clone()),
            charging_duration: vehicle.and_then(|v| v.charging_duration),
            last_updated: entry.stored_at(),
            age_hours: entry.age(now).num_milliseconds() as f64 / 3_600_000.0,
        }
    }

    /// Returns the recommendations to display, most specific first.
    pub fn recommendations(&self) -> Vec<String> {
        let mut out = Vec::new();

        if !self.recommendation.trim().is_empty() {
            out.push(self.recommendation.clone());
        }
        if self.health.eq_ignore_ascii_case("poor") {
            out.push("Battery health is poor. Consider maintenance.".to_string());
        }
        if self.charging_duration_class.eq_ignore_ascii_case("fast") {
            out.push("Fast charging detected. Monitor battery temperature.".to_string());
        }
        if self.charging_duration_class.eq_ignore_ascii_case("slow") {
            out.push("Slow charging detected. Check charging equipment.".to_string());
        }

        if out.is_empty() {
            out.push("Battery is operating normally.".to_string());
        }
        out
    }
}
