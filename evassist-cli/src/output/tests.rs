//! CLI output formatting tests.
//!
//! These tests verify that CLI output is correctly formatted for both
//! text and JSON output modes.

#[cfg(test)]
mod text_formatter_tests {
    use super::super::json::{NearbyOutput, PositionOutput};
    use super::super::text::TextFormatter;
    use chrono::Utc;
    use evassist_core::{
        BatteryStatus, Coordinate, MapRegion, PredictionCacheEntry, PredictionResult, Provider,
    };
    use evassist_location::{LocationError, Position, PositionSource};
    use evassist_store::PagerSnapshot;

    const ORIGIN: Coordinate = Coordinate::new_unchecked(37.7749, -122.4194);

    fn snapshot(providers: Vec<Provider>) -> PagerSnapshot {
        PagerSnapshot {
            providers,
            current_page: 1,
            total_pages: 2,
            has_more_pages: true,
            last_location: Some(ORIGIN),
            last_error: None,
            is_loading: false,
        }
    }

    #[test]
    fn test_position_device() {
        let formatter = TextFormatter::new(false);
        let out = formatter.format_position(&PositionOutput::device(MapRegion::new(ORIGIN)));
        assert!(out.contains("37.774900, -122.419400"));
        assert!(out.contains("source: device"));
    }

    #[test]
    fn test_position_fallback_shows_reason() {
        let formatter = TextFormatter::new(false);
        let position = Position {
            region: MapRegion::new(ORIGIN),
            source: PositionSource::Fallback,
            error: Some(LocationError::ServicesDisabled),
        };
        let out = formatter.format_position(&PositionOutput::from(&position));
        assert!(out.contains("fallback location"));
        assert!(out.contains("Location services are turned off"));
    }

    #[test]
    fn test_nearby_lists_distances() {
        let formatter = TextFormatter::new(false);
        let near = Provider::new("1", "Volt Garage", ORIGIN).with_distance_km(Some(0.25));
        let far = Provider::new("2", "Amp Auto", Coordinate::new_unchecked(37.7849, -122.4194));
        let rows = vec![(near.clone(), 0.25), (far.clone(), 1.112)];

        let output = NearbyOutput::new(ORIGIN, false, &snapshot(vec![near, far]), &rows);
        let text = formatter.format_nearby(&output);

        assert!(text.contains("1. Volt Garage  250 m"));
        assert!(text.contains("2. Amp Auto  1.1 km (approx)"));
        assert!(text.contains("Page 1 of 2 - more available"));
    }

    #[test]
    fn test_nearby_empty() {
        let formatter = TextFormatter::new(false);
        let output = NearbyOutput::new(ORIGIN, true, &snapshot(Vec::new()), &[]);
        let text = formatter.format_nearby(&output);
        assert!(text.contains("No mechanics found"));
        assert!(text.contains("(approximate location)"));
    }

    #[test]
    fn test_battery_with_colors() {
        let entry = PredictionCacheEntry {
            prediction: PredictionResult {
                battery_health: "Poor".to_string(),
                charging_duration_class: "Slow".to_string(),
                recommendation: String::new(),
            },
            vehicle_info: None,
            stored_at_epoch_millis: Utc::now().timestamp_millis(),
        };
        let status = BatteryStatus::from_entry(&entry, Utc::now());

        let text = TextFormatter::new(true).format_battery(&status);
        assert!(text.contains("\x1b[31mPoor\x1b[0m"), "poor health is red");
        assert!(text.contains("Slow charging detected"));

        let plain = TextFormatter::new(false).format_battery(&status);
        assert!(!plain.contains('\x1b'));
    }
}

#[cfg(test)]
mod json_formatter_tests {
    use super::super::json::{BatteryOutput, JsonFormatter, PositionOutput};
    use evassist_core::{Coordinate, MapRegion};

    #[test]
    fn test_position_json_shape() {
        let region = MapRegion::new(Coordinate::new_unchecked(1.5, 2.5));
        let json = JsonFormatter::new(false)
            .format(&PositionOutput::device(region))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["latitude"], 1.5);
        assert_eq!(value["latitudeDelta"], 0.01);
        assert_eq!(value["source"], "device");
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_battery_unavailable_json() {
        let json = JsonFormatter::new(false)
            .format(&BatteryOutput::from(None))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["available"], false);
        assert!(value["message"].as_str().unwrap().starts_with("No battery prediction"));
        assert!(value.get("health").is_none());
    }

    #[test]
    fn test_pretty_output() {
        let json = JsonFormatter::new(true)
            .format(&serde_json::json!({"a": 1}))
            .unwrap();
        assert!(json.contains('\n'));
    }
}
