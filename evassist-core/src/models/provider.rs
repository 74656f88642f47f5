//! Mechanic (service provider) types.
//!
//! - [`Provider`] - A repair shop returned by the nearby endpoint
//! - [`ProviderPage`] - One validated page of results

use serde::{Deserialize, Serialize};

use super::geo::Coordinate;

// ============================================================================
// Provider
// ============================================================================

/// A repair shop near the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    /// Backend identifier.
    pub id: String,
    /// Shop name.
    pub name: String,
    /// Shop location. Always valid for providers that passed validation.
    pub coordinate: Coordinate,
    /// Distance reported by the backend, if usable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    /// Average rating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Number of ratings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_count: Option<u32>,
    /// Contact phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Street address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Provider {
    /// Creates a provider with only the required fields.
    pub fn new(id: impl Into<String>, name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            coordinate,
            distance_km: None,
            rating: None,
            rating_count: None,
            phone: None,
            address: None,
        }
    }

    /// Sets the server distance. Values that are not finite and non-negative
    /// are treated as absent.
    pub fn with_distance_km(mut self, distance_km: Option<f64>) -> Self {
        self.distance_km = distance_km.filter(|d| d.is_finite() && *d >= 0.0);
        self
    }

    /// Returns true if the backend supplied a usable distance.
    pub fn has_server_distance(&self) -> bool {
        self.distance_km.is_some()
    }
}

// ============================================================================
// Provider Page
// ============================================================================

/// One page of validated discovery results.
///
/// `page == 1` replaces the accumulated list; later pages append to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderPage {
    /// Providers on this page that passed validation.
    pub providers: Vec<Provider>,
    /// 1-based page number.
    pub page: u32,
    /// Total number of pages for this query.
    pub total_pages: u32,
}

impl ProviderPage {
    /// Creates a page, normalizing the numbering so that
    /// `1 <= page <= total_pages`.
    pub fn new(providers: Vec<Provider>, page: u32, total_pages: u32) -> Self {
        let page = page.max(1);
        Self {
            providers,
            page,
            total_pages: total_pages.max(page),
        }
    }

    /// Returns true if this page replaces previously accumulated results.
    pub fn is_first(&self) -> bool {
        self.page == 1
    }

    /// Returns true if pages remain after this one.
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }

    /// Returns the number of providers on this page.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns true if this page holds no providers.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_sanitized() {
        let c = Coordinate::new_unchecked(0.0, 0.0);
        assert_eq!(Provider::new("1", "A", c).with_distance_km(Some(2.5)).distance_km, Some(2.5));
        assert_eq!(Provider::new("1", "A", c).with_distance_km(Some(0.0)).distance_km, Some(0.0));
        assert!(Provider::new("1", "A", c).with_distance_km(Some(-1.0)).distance_km.is_none());
        assert!(Provider::new("1", "A", c).with_distance_km(Some(f64::NAN)).distance_km.is_none());
        assert!(
            Provider::new("1", "A", c)
                .with_distance_km(Some(f64::INFINITY))
                .distance_km
                .is_none()
        );
    }

    #[test]
    fn test_page_normalization() {
        let page = ProviderPage::new(Vec::new(), 3, 2);
        assert_eq!(page.page, 3);
        assert_eq!(page.total_pages, 3);
        assert!(!page.has_more());

        let page = ProviderPage::new(Vec::new(), 0, 0);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.is_first());

        let page = ProviderPage::new(Vec::new(), 1, 4);
        assert!(page.has_more());
    }
}
