//! Integration tests for core model types.

use evassist_core::{
    display_distance, format_distance, haversine, Coordinate, MapRegion, Provider, ProviderPage,
};

#[test]
fn test_resolved_distance_formatting() {
    let user = Coordinate::new(37.7749, -122.4194).unwrap();
    let shop = Provider::new("1", "Mission Motors", Coordinate::new(37.7790, -122.4194).unwrap());

    let km = display_distance(&shop, &user);
    assert!(km < 1.0);
    assert!(format_distance(km).ends_with(" m"));
}

#[test]
fn test_region_around_valid_coordinate() {
    let coordinate = Coordinate::new(-33.8688, 151.2093).unwrap();
    let region = MapRegion::new(coordinate).with_deltas(0.05, 0.05).unwrap();
    assert!(region.coordinate.is_valid());
    assert_eq!(region.coordinate.key(), coordinate.key());
}

#[test]
fn test_page_of_providers_has_valid_distances() {
    let origin = Coordinate::new(0.0, 0.0).unwrap();
    let providers = vec![
        Provider::new("1", "A", Coordinate::new(0.0, 0.5).unwrap()),
        Provider::new("2", "B", Coordinate::new(0.5, 0.0).unwrap()).with_distance_km(Some(55.0)),
    ];
    let page = ProviderPage::new(providers, 1, 2);

    assert!(page.has_more());
    for provider in &page.providers {
        let d = display_distance(provider, &origin);
        assert!(d.is_finite() && d >= 0.0);
    }
    assert!((haversine(&origin, &page.providers[0].coordinate) - 55.6).abs() < 0.5);
}
