//! Turning wire records into validated providers.

use std::fmt;

use evassist_core::{Coordinate, Provider};
use evassist_fetch::RawMechanic;

/// Name used when the backend sends none.
pub const UNNAMED_SHOP: &str = "Unnamed mechanic";

/// Why a record was dropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DropReason {
    /// No usable identifier.
    MissingId,
    /// Latitude or longitude absent.
    MissingCoordinates,
    /// Latitude or longitude not finite or out of range.
    InvalidCoordinates {
        /// Reported latitude.
        latitude: f64,
        /// Reported longitude.
        longitude: f64,
    },
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingId => f.write_str("missing id"),
            Self::MissingCoordinates => f.write_str("missing coordinates"),
            Self::InvalidCoordinates {
                latitude,
                longitude,
            } => write!(f, "invalid coordinates ({latitude}, {longitude})"),
        }
    }
}

/// Validates one record.
///
/// # Errors
///
/// Returns the reason the record cannot be shown on a map.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn validate_mechanic(raw: &RawMechanic) -> Result<Provider, DropReason> {
    let id = raw.id.clone().ok_or(DropReason::MissingId)?;
    let (Some(latitude), Some(longitude)) = (raw.latitude, raw.longitude) else {
        return Err(DropReason::MissingCoordinates);
    };
    let coordinate = Coordinate::new(latitude, longitude)
        .map_err(|_| DropReason::InvalidCoordinates { latitude, longitude })?;

    let name = raw.shop_name.clone().unwrap_or_else(|| UNNAMED_SHOP.to_string());
    let mut provider = Provider::new(id, name, coordinate).with_distance_km(raw.distance_km);
    provider.rating = raw.rating.filter(|r| r.is_finite() && *r >= 0.0);
    provider.rating_count = raw
        .rating_count
        .filter(|c| c.is_finite() && *c >= 0.0 && *c <= f64::from(u32::MAX))
        .map(|c| c.round() as u32);
    provider.phone.clone_from(&raw.phone);
    provider.address.clone_from(&raw.address);
    Ok(provider)
}

/// Outcome of validating a page of records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Validated {
    /// Records that passed.
    pub providers: Vec<Provider>,
    /// Records dropped, with the reason.
    pub dropped: Vec<(Option<String>, DropReason)>,
}

/// Validates every record, keeping the order of those that pass.
pub fn validate_all(raw: &[RawMechanic]) -> Validated {
    let mut out = Validated::default();
    for m in raw {
        match validate_mechanic(m) {
            Ok(p) => out.providers.push(p),
            Err(reason) => out.dropped.push((m.id.clone(), reason)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: Option<&str>, lat: Option<f64>, lon: Option<f64>) -> RawMechanic {
        RawMechanic {
            id: id.map(str::to_string),
            shop_name: Some("Amp Auto".to_string()),
            latitude: lat,
            longitude: lon,
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_record() {
        let mut m = raw(Some("9"), Some(37.0), Some(-122.0));
        m.distance_km = Some(1.25);
        m.rating = Some(4.5);
        m.rating_count = Some(17.0);
        m.phone = Some("555-0100".to_string());

        let p = validate_mechanic(&m).unwrap();
        assert_eq!(p.id, "9");
        assert_eq!(p.name, "Amp Auto");
        assert_eq!(p.distance_km, Some(1.25));
        assert_eq!(p.rating_count, Some(17));
        assert_eq!(p.phone.as_deref(), Some("555-0100"));
    }

    #[test]
    fn test_drop_reasons() {
        assert_eq!(
            validate_mechanic(&raw(None, Some(1.0), Some(1.0))),
            Err(DropReason::MissingId)
        );
        assert_eq!(
            validate_mechanic(&raw(Some("1"), None, Some(1.0))),
            Err(DropReason::MissingCoordinates)
        );
        assert!(matches!(
            validate_mechanic(&raw(Some("1"), Some(f64::NAN), Some(1.0))),
            Err(DropReason::InvalidCoordinates { .. })
        ));
        assert!(matches!(
            validate_mechanic(&raw(Some("1"), Some(91.0), Some(1.0))),
            Err(DropReason::InvalidCoordinates { .. })
        ));
    }

    #[test]
    fn test_bad_optional_fields_are_cleared() {
        let mut m = raw(Some("1"), Some(0.5), Some(0.5));
        m.shop_name = None;
        m.distance_km = Some(-3.0);
        m.rating = Some(f64::INFINITY);
        m.rating_count = Some(-1.0);

        let p = validate_mechanic(&m).unwrap();
        assert_eq!(p.name, UNNAMED_SHOP);
        assert!(p.distance_km.is_none());
        assert!(p.rating.is_none());
        assert!(p.rating_count.is_none());
    }

    #[test]
    fn test_validate_all_keeps_order() {
        let records = vec![
            raw(Some("a"), Some(1.0), Some(1.0)),
            raw(Some("b"), Some(f64::NAN), Some(1.0)),
            raw(Some("c"), Some(2.0), Some(2.0)),
        ];
        let v = validate_all(&records);
        let ids: Vec<_> = v.providers.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
        assert_eq!(v.dropped.len(), 1);
        assert_eq!(v.dropped[0].0.as_deref(), Some("b"));
    }
}
