//! Short-lived battery prediction cache.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use evassist_core::{Clock, PredictionCacheEntry, PredictionResult, VehicleInfo};
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::kv::KeyValueStore;

/// Storage key for the prediction JSON.
pub const PREDICTION_KEY: &str = "batteryPrediction";
/// Storage key for the write time.
pub const TIMESTAMP_KEY: &str = "predictionTimestamp";
/// Storage key for the vehicle metadata JSON.
pub const VEHICLE_KEY: &str = "vehicleData";

/// Default entry lifetime in hours.
pub const DEFAULT_TTL_HOURS: i64 = 24;

/// Persists the latest prediction for offline display.
///
/// Entries expire lazily: an expired entry stays in storage and simply
/// reads as absent.
pub struct PredictionCache {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl PredictionCache {
    /// Creates a cache with the default 24 hour lifetime.
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            ttl: Duration::hours(DEFAULT_TTL_HOURS),
        }
    }

    /// Sets the entry lifetime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Returns the entry lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Replaces the cached entry.
    ///
    /// All three slots are written in one batch. Without `vehicle_info` the
    /// vehicle slot is removed so no stale metadata survives.
    pub async fn store(
        &self,
        prediction: &PredictionResult,
        vehicle_info: Option<&VehicleInfo>,
    ) -> Result<PredictionCacheEntry, StoreError> {
        let stored_at_epoch_millis = self.clock.now_millis();
        let vehicle_json = vehicle_info.map(serde_json::to_string).transpose()?;

        self.store
            .write_batch(vec![
                (PREDICTION_KEY.to_string(), Some(serde_json::to_string(prediction)?)),
                (TIMESTAMP_KEY.to_string(), Some(stored_at_epoch_millis.to_string())),
                (VEHICLE_KEY.to_string(), vehicle_json),
            ])
            .await?;

        debug!(health = %prediction.battery_health, "Stored battery prediction");
        Ok(PredictionCacheEntry {
            prediction: prediction.clone(),
            vehicle_info: vehicle_info.cloned(),
            stored_at_epoch_millis,
        })
    }

    /// Returns the cached entry if present and fresh.
    ///
    /// Storage failures and undecodable slots read as a miss.
    pub async fn retrieve(&self) -> Option<PredictionCacheEntry> {
        match self.try_retrieve().await {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "Failed to read cached prediction");
                None
            }
        }
    }

    /// Returns the cached entry if present and fresh, surfacing storage errors.
    pub async fn try_retrieve(&self) -> Result<Option<PredictionCacheEntry>, StoreError> {
        let (Some(prediction), Some(timestamp)) = (
            self.store.get(PREDICTION_KEY).await?,
            self.store.get(TIMESTAMP_KEY).await?,
        ) else {
            debug!("No cached prediction");
            return Ok(None);
        };

        let Some(stored_at_epoch_millis) = parse_timestamp(&timestamp) else {
            warn!(timestamp = %timestamp, "Undecodable prediction timestamp");
            return Ok(None);
        };

        let prediction: PredictionResult = match serde_json::from_str(&prediction) {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %e, "Undecodable cached prediction");
                return Ok(None);
            }
        };

        let vehicle_info = match self.store.get(VEHICLE_KEY).await? {
            Some(raw) => serde_json::from_str(&raw)
                .inspect_err(|e| warn!(error = %e, "Undecodable vehicle data"))
                .ok(),
            None => None,
        };

        let entry = PredictionCacheEntry {
            prediction,
            vehicle_info,
            stored_at_epoch_millis,
        };

        let now = self.clock.now();
        if entry.is_expired(now, self.ttl) {
            debug!(
                age_hours = entry.age(now).num_hours(),
                "Cached prediction is too old"
            );
            return Ok(None);
        }
        Ok(Some(entry))
    }

    /// Removes every slot.
    pub async fn clear(&self) -> Result<(), StoreError> {
        self.store
            .write_batch(vec![
                (PREDICTION_KEY.to_string(), None),
                (TIMESTAMP_KEY.to_string(), None),
                (VEHICLE_KEY.to_string(), None),
            ])
            .await
    }
}

/// Accepts epoch milliseconds or an RFC 3339 timestamp.
///
/// Millisecond values outside the representable date range are rejected.
fn parse_timestamp(raw: &str) -> Option<i64> {
    let raw = raw.trim().trim_matches('"');
    match raw.parse::<i64>() {
        Ok(millis) => Utc
            .timestamp_millis_opt(millis)
            .single()
            .map(|t| t.timestamp_millis()),
        Err(_) => DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|t| t.with_timezone(&Utc).timestamp_millis()),
    }
}

impl std::fmt::Debug for PredictionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionCache")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(parse_timestamp("1700000000000"), Some(1_700_000_000_000));
        assert_eq!(parse_timestamp("\"1700000000000\""), Some(1_700_000_000_000));
        assert_eq!(
            parse_timestamp("2023-11-14T22:13:20Z"),
            Some(1_700_000_000_000)
        );
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp(&i64::MIN.to_string()), None);
        assert_eq!(parse_timestamp(&i64::MAX.to_string()), None);
    }
}
