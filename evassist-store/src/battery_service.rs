//! Battery prediction flow.

use std::sync::Arc;

use evassist_core::{BatteryStatus, Clock, PredictionResult, VehicleInfo};
use evassist_fetch::PredictionClient;
use tracing::{info, instrument, warn};

use crate::error::StoreError;
use crate::prediction_cache::PredictionCache;

/// Message shown when no cached prediction exists.
pub const NO_PREDICTION_MESSAGE: &str =
    "No battery prediction data available. Please register your vehicle and get a prediction first.";

/// Requests predictions and serves the cached battery view.
pub struct BatteryService {
    client: PredictionClient,
    cache: PredictionCache,
    clock: Arc<dyn Clock>,
}

impl BatteryService {
    /// Creates a service.
    pub fn new(client: PredictionClient, cache: PredictionCache, clock: Arc<dyn Clock>) -> Self {
        Self {
            client,
            cache,
            clock,
        }
    }

    /// Returns the cache.
    pub fn cache(&self) -> &PredictionCache {
        &self.cache
    }

    /// Requests a prediction and caches it with the vehicle metadata.
    ///
    /// A failure to cache is logged; the prediction is still returned.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Fetch`] if the prediction request fails.
    #[instrument(skip(self))]
    pub async fn predict(
        &self,
        ev_model: &str,
        charging_duration_min: u32,
    ) -> Result<PredictionResult, StoreError> {
        let prediction = self.client.predict(ev_model, charging_duration_min).await?;

        let vehicle = VehicleInfo::new(ev_model.trim(), Some(charging_duration_min));
        match self.cache.store(&prediction, Some(&vehicle)).await {
            Ok(_) => info!(health = %prediction.battery_health, "Cached new prediction"),
            Err(e) => warn!(error = %e, "Failed to cache prediction"),
        }
        Ok(prediction)
    }

    /// Builds the battery view from the cached prediction.
    ///
    /// `None` means no fresh prediction is available.
    pub async fn status(&self) -> Option<BatteryStatus> {
        let entry = self.cache.retrieve().await?;
        Some(BatteryStatus::from_entry(&entry, self.clock.now()))
    }
}

impl std::fmt::Debug for BatteryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatteryService")
            .field("client", &self.client)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
