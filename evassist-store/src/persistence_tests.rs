//! Persistence round-trip and edge case tests.
//!
//! Tests file I/O operations, config persistence, and the file-backed
//! key-value store.

use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use crate::config::Config;
use crate::kv::{FileKvStore, KeyValueStore};
use crate::persistence::{ensure_dir, load_json, load_json_if_exists, load_json_or_default, save_json};
use crate::prediction_cache::{PREDICTION_KEY, PredictionCache, TIMESTAMP_KEY, VEHICLE_KEY};
use evassist_core::{Coordinate, ManualClock, PredictionResult, VehicleInfo};

// ============================================================================
// JSON Persistence Tests
// ============================================================================

#[tokio::test]
async fn test_save_and_load_json_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("test.json");

    let mut config = Config::default();
    config.api.base_url = "https://ev.example.com".to_string();

    save_json(&file_path, &config).await.unwrap();
    let loaded: Config = load_json(&file_path).await.unwrap();

    assert_eq!(loaded, config);
}

#[tokio::test]
async fn test_save_creates_parent_directories() {
    let temp_dir = TempDir::new().unwrap();
    let nested_path = temp_dir.path().join("deeply").join("nested").join("test.json");

    let data = serde_json::json!({"key": "value"});

    let result = save_json(&nested_path, &data).await;
    assert!(result.is_ok());
    assert!(nested_path.exists());
}

#[tokio::test]
async fn test_load_nonexistent_file() {
    let file_path = PathBuf::from("/nonexistent/path/config.json");

    let result: Result<Config, _> = load_json(&file_path).await;
    assert!(result.is_err());

    let missing: Option<Config> = load_json_if_exists(&file_path).await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_load_or_default_on_corrupt_file() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("corrupt.json");
    tokio::fs::write(&file_path, "{{{").await.unwrap();

    let loaded: Config = load_json_or_default(&file_path).await;
    assert_eq!(loaded, Config::default());
}

#[tokio::test]
async fn test_ensure_dir_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let dir_path = temp_dir.path().join("test_dir");

    ensure_dir(&dir_path).await.unwrap();
    ensure_dir(&dir_path).await.unwrap();

    assert!(dir_path.is_dir());
}

#[tokio::test]
async fn test_atomic_write() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("atomic.json");

    save_json(&file_path, &Config::default()).await.unwrap();

    let temp_path = file_path.with_extension("json.tmp");
    assert!(!temp_path.exists());
    assert!(file_path.exists());
}

// ============================================================================
// Config Persistence Tests
// ============================================================================

#[tokio::test]
async fn test_config_full_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("config.json");

    let mut config = Config::default();
    config.api.page_size = 25;
    config.api.retry_delay_ms = 250;
    config.location.fallback = Coordinate::new(51.5074, -0.1278).unwrap();
    config.location.device_position = Some(Coordinate::new(51.5, -0.12).unwrap());
    config.cache.ttl_hours = 12;

    config.save_to(&file_path).await.unwrap();
    let loaded = Config::load_from(&file_path).await.unwrap();

    assert_eq!(loaded, config);
}

#[tokio::test]
async fn test_config_load_minimal_json_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("minimal.json");
    tokio::fs::write(&file_path, "{}").await.unwrap();

    let loaded = Config::load_from(&file_path).await.unwrap();
    assert_eq!(loaded, Config::default());
}

#[tokio::test]
async fn test_config_with_unknown_fields() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("extra_fields.json");

    let json = r#"{
        "api": {"page_size": 5, "unknown": true},
        "nested_unknown": {"key": "value"}
    }"#;
    tokio::fs::write(&file_path, json).await.unwrap();

    let loaded = Config::load_from(&file_path).await.unwrap();
    assert_eq!(loaded.api.page_size, 5);
}

#[tokio::test]
async fn test_config_invalid_values_rejected_on_load() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("bad.json");
    tokio::fs::write(&file_path, r#"{"api": {"max_attempts": 0}}"#)
        .await
        .unwrap();

    assert!(Config::load_from(&file_path).await.is_err());
}

// ============================================================================
// File-backed Cache Tests
// ============================================================================

#[tokio::test]
async fn test_prediction_cache_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("storage.json");
    let clock = Arc::new(ManualClock::new(chrono::Utc::now()));
    let prediction = PredictionResult {
        battery_health: "Good".to_string(),
        charging_duration_class: "Normal".to_string(),
        recommendation: "Keep charging between 20% and 80%".to_string(),
    };

    PredictionCache::new(Arc::new(FileKvStore::new(&path)), clock.clone())
        .store(&prediction, Some(&VehicleInfo::new("Kona", Some(50))))
        .await
        .unwrap();

    let store = Arc::new(FileKvStore::new(&path));
    for key in [PREDICTION_KEY, TIMESTAMP_KEY, VEHICLE_KEY] {
        assert!(store.get(key).await.unwrap().is_some(), "missing {key}");
    }

    let entry = PredictionCache::new(store, clock).retrieve().await.unwrap();
    assert_eq!(entry.prediction, prediction);
    assert_eq!(entry.vehicle_info.unwrap().ev_model, "Kona");
}

#[tokio::test]
async fn test_unicode_values() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileKvStore::new(temp_dir.path().join("unicode.json"));

    store.set("note", "⚡ 充電 テスト".to_string()).await.unwrap();
    assert_eq!(store.get("note").await.unwrap().as_deref(), Some("⚡ 充電 テスト"));
}
