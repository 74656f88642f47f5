//! Serde tests for the wire and storage formats of core types.
//!
//! Field names here are fixed by the backend and by previously persisted
//! cache entries, so renames must be caught.

use serde_json::json;

use crate::{
    Coordinate, MapRegion, PermissionState, PredictionCacheEntry, PredictionResult, Provider,
    VehicleInfo,
};

// ============================================================================
// Prediction Tests
// ============================================================================

#[test]
fn test_prediction_result_backend_names() {
    let json = r#"{
        "Battery Health": "Good",
        "Charging Duration Class": "Normal",
        "Recommendation": "Charge between 20% and 80%."
    }"#;

    let result: PredictionResult = serde_json::from_str(json).unwrap();
    assert_eq!(result.battery_health, "Good");
    assert_eq!(result.charging_duration_class, "Normal");
    assert_eq!(result.recommendation, "Charge between 20% and 80%.");

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["Battery Health"], "Good");
    assert_eq!(value["Charging Duration Class"], "Normal");
}

#[test]
fn test_prediction_result_snake_case_alias() {
    let json = r#"{"battery_health": "Poor", "charging_duration_class": "Slow"}"#;
    let result: PredictionResult = serde_json::from_str(json).unwrap();
    assert_eq!(result.battery_health, "Poor");
    assert!(result.recommendation.is_empty());
}

#[test]
fn test_prediction_result_missing_health_fails() {
    let json = r#"{"Charging Duration Class": "Slow"}"#;
    assert!(serde_json::from_str::<PredictionResult>(json).is_err());
}

// ============================================================================
// Vehicle Info Tests
// ============================================================================

#[test]
fn test_vehicle_info_camel_case() {
    let info = VehicleInfo::new("Nissan Leaf", Some(120));
    let value = serde_json::to_value(&info).unwrap();
    assert_eq!(value, json!({"evModel": "Nissan Leaf", "chargingDuration": 120}));

    let without: VehicleInfo = serde_json::from_str(r#"{"evModel": "Kona"}"#).unwrap();
    assert_eq!(without.charging_duration, None);
}

#[test]
fn test_cache_entry_roundtrip() {
    let entry = PredictionCacheEntry {
        prediction: PredictionResult {
            battery_health: "Good".to_string(),
            charging_duration_class: "Fast".to_string(),
            recommendation: String::new(),
        },
        vehicle_info: None,
        stored_at_epoch_millis: 1_700_000_000_000,
    };

    let json = serde_json::to_string(&entry).unwrap();
    let parsed: PredictionCacheEntry = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, entry);
}

// ============================================================================
// Geography Tests
// ============================================================================

#[test]
fn test_map_region_is_flat() {
    let region = MapRegion::new(Coordinate::new_unchecked(37.7749, -122.4194));
    let value = serde_json::to_value(region).unwrap();
    assert_eq!(value["latitude"], 37.7749);
    assert_eq!(value["longitude"], -122.4194);
    assert_eq!(value["latitude_delta"], 0.01);
    assert!(value.get("coordinate").is_none());
}

#[test]
fn test_permission_state_snake_case() {
    let json = serde_json::to_string(&PermissionState::DeniedRetryable).unwrap();
    assert_eq!(json, r#""denied_retryable""#);
}

#[test]
fn test_provider_skips_absent_fields() {
    let provider = Provider::new("7", "Volt Garage", Coordinate::new_unchecked(1.0, 2.0));
    let value = serde_json::to_value(&provider).unwrap();
    assert!(value.get("distance_km").is_none());
    assert!(value.get("phone").is_none());
    assert_eq!(value["name"], "Volt Garage");
}
