//! Great-circle distance resolution.
//!
//! The backend usually reports `distance_km` for each mechanic. When it
//! does not, the display distance is computed from the caller's position.

use crate::models::{Coordinate, Provider};

/// Mean earth radius used by [`haversine`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Returns the great-circle distance between `a` and `b` in kilometers.
///
/// The result is symmetric in its arguments and zero for equal points.
pub fn haversine(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    // abs() keeps the result bit-identical when the arguments are swapped.
    let delta_lat = (b.latitude - a.latitude).abs().to_radians();
    let delta_lon = (b.longitude - a.longitude).abs().to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Formats a distance for display.
///
/// Below 1 km the value is shown in whole meters (`"250 m"`), otherwise in
/// kilometers with one decimal (`"1.5 km"`). Unusable values render as `"-"`.
#[allow(clippy::cast_possible_truncation)]
pub fn format_distance(km: f64) -> String {
    if !km.is_finite() || km < 0.0 {
        return "-".to_string();
    }

    let meters = (km * 1000.0).round();
    if meters < 1000.0 {
        format!("{} m", meters as i64)
    } else {
        format!("{km:.1} km")
    }
}

/// Returns the distance to show for `provider`, in kilometers.
///
/// Uses the server-supplied distance when present, otherwise the
/// great-circle distance from `origin`. The provider is never modified.
pub fn display_distance(provider: &Provider, origin: &Coordinate) -> f64 {
    provider
        .distance_km
        .unwrap_or_else(|| haversine(&provider.coordinate, origin))
}
