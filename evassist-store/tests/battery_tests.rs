//! Prediction cache expiry and the battery service flow.

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use evassist_core::{Clock, ManualClock, PredictionResult, VehicleInfo};
use evassist_fetch::{FetchContext, FetchSettings, ScriptedTransport};
use evassist_store::{
    BatteryService, KeyValueStore, MemoryKvStore, PREDICTION_KEY, PredictionCache, TIMESTAMP_KEY,
    VEHICLE_KEY,
};
use serde_json::json;

fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()))
}

fn prediction(health: &str) -> PredictionResult {
    PredictionResult {
        battery_health: health.to_string(),
        charging_duration_class: "Normal".to_string(),
        recommendation: String::new(),
    }
}

#[tokio::test]
async fn test_entry_is_fresh_after_one_hour() {
    let store = Arc::new(MemoryKvStore::new());
    let clock = clock();
    let cache = PredictionCache::new(store, clock.clone());

    cache
        .store(&prediction("Good"), Some(&VehicleInfo::new("Leaf", Some(60))))
        .await
        .unwrap();
    clock.advance(chrono::Duration::hours(1));

    let entry = cache.retrieve().await.unwrap();
    assert_eq!(entry.prediction.battery_health, "Good");
    assert_eq!(entry.vehicle_info, Some(VehicleInfo::new("Leaf", Some(60))));
}

#[tokio::test]
async fn test_entry_expires_lazily_after_ttl() {
    let store = Arc::new(MemoryKvStore::new());
    let clock = clock();
    let cache = PredictionCache::new(store.clone(), clock.clone());

    cache.store(&prediction("Good"), None).await.unwrap();

    clock.advance(chrono::Duration::hours(24));
    assert!(cache.retrieve().await.is_some(), "exactly 24h is still fresh");

    clock.advance(chrono::Duration::hours(1));
    assert!(cache.retrieve().await.is_none());
    assert!(store.get(PREDICTION_KEY).await.unwrap().is_some(), "expiry never deletes");
}

#[tokio::test]
async fn test_store_replaces_whole_entry() {
    let store = Arc::new(MemoryKvStore::new());
    let clock = clock();
    let cache = PredictionCache::new(store.clone(), clock.clone());

    cache
        .store(&prediction("Good"), Some(&VehicleInfo::new("Ioniq 5", Some(30))))
        .await
        .unwrap();
    clock.advance(chrono::Duration::minutes(5));
    let second = cache.store(&prediction("Poor"), None).await.unwrap();

    assert!(store.get(VEHICLE_KEY).await.unwrap().is_none());
    let entry = cache.retrieve().await.unwrap();
    assert_eq!(entry, second);
    assert_eq!(entry.stored_at_epoch_millis, clock.now_millis());
}

#[tokio::test]
async fn test_undecodable_slots_read_as_miss() {
    let store = Arc::new(MemoryKvStore::new());
    let cache = PredictionCache::new(store.clone(), clock());

    store.set(PREDICTION_KEY, "{oops".into()).await.unwrap();
    store.set(TIMESTAMP_KEY, "1714550400000".into()).await.unwrap();
    assert!(cache.retrieve().await.is_none());

    store
        .set(PREDICTION_KEY, json!({"Battery Health": "Good", "Charging Duration Class": "Fast"}).to_string())
        .await
        .unwrap();
    store.set(TIMESTAMP_KEY, "not a time".into()).await.unwrap();
    assert!(cache.retrieve().await.is_none());
}

#[tokio::test]
async fn test_out_of_range_timestamp_is_a_miss() {
    let store = Arc::new(MemoryKvStore::new());
    let cache = PredictionCache::new(store.clone(), clock());
    store
        .set(PREDICTION_KEY, json!({"Battery Health": "Good", "Charging Duration Class": "Fast"}).to_string())
        .await
        .unwrap();

    for raw in [i64::MIN.to_string(), i64::MAX.to_string()] {
        store.set(TIMESTAMP_KEY, raw).await.unwrap();
        assert!(cache.retrieve().await.is_none());
        assert!(cache.try_retrieve().await.unwrap().is_none());
    }
}

#[tokio::test]
async fn test_missing_timestamp_is_a_miss() {
    let store = Arc::new(MemoryKvStore::new());
    let cache = PredictionCache::new(store.clone(), clock());
    store
        .set(PREDICTION_KEY, json!({"Battery Health": "Good", "Charging Duration Class": "Fast"}).to_string())
        .await
        .unwrap();
    assert!(cache.retrieve().await.is_none());
}

#[tokio::test]
async fn test_predict_caches_and_status_reads_back() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_json(
        200,
        json!({
            "Battery Health": "Poor",
            "Charging Duration Class": "Fast",
            "Recommendation": "Reduce DC fast charging"
        }),
    );
    let settings = FetchSettings::new("http://api.test").with_retry(1, Duration::ZERO);
    let ctx = FetchContext::with_transport(transport.clone(), settings);

    let clock = clock();
    let cache = PredictionCache::new(Arc::new(MemoryKvStore::new()), clock.clone());
    let service = BatteryService::new(ctx.prediction_client(), cache, clock.clone());

    assert!(service.status().await.is_none());

    service.predict("Model Y", 40).await.unwrap();
    clock.advance(chrono::Duration::minutes(90));

    let status = service.status().await.unwrap();
    assert_eq!(status.health, "Poor");
    assert_eq!(status.ev_model, "Model Y");
    assert_eq!(status.charging_duration, Some(40));
    assert!((status.age_hours - 1.5).abs() < 1e-9);
    assert_eq!(
        status.recommendations(),
        [
            "Reduce DC fast charging",
            "Battery health is poor. Consider maintenance.",
            "Fast charging detected. Monitor battery temperature.",
        ]
    );
}

#[tokio::test]
async fn test_failed_prediction_leaves_cache_untouched() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_json(422, json!({"detail": "Unknown EV model"}));
    let settings = FetchSettings::new("http://api.test").with_retry(1, Duration::ZERO);
    let ctx = FetchContext::with_transport(transport, settings);

    let clock = clock();
    let cache = PredictionCache::new(Arc::new(MemoryKvStore::new()), clock.clone());
    let service = BatteryService::new(ctx.prediction_client(), cache, clock);

    let err = service.predict("Flux Capacitor", 10).await.unwrap_err();
    assert_eq!(err.user_message(), "Unknown EV model");
    assert!(service.status().await.is_none());
}
