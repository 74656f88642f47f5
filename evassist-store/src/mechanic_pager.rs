//! Paginated nearby-mechanic discovery.
//!
//! [`MechanicPager`] owns the accumulated result list for one search
//! session. Page 1 replaces the list, later pages append to it. State sits
//! behind short read/write sections that are never held across a network
//! call; an atomic loading flag rejects overlapping fetches instead.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use evassist_core::{Coordinate, LocationKey, Provider, ProviderPage, display_distance};
use evassist_fetch::NearbyClient;
use tokio::sync::{RwLock, watch};
use tracing::{debug, info, instrument, warn};

use crate::error::PagerError;
use crate::validation::validate_all;

// ============================================================================
// State
// ============================================================================

#[derive(Debug, Default)]
struct PagerInner {
    providers: Vec<Provider>,
    current_page: u32,
    total_pages: u32,
    last_location: Option<Coordinate>,
    last_error: Option<String>,
    session: Option<LocationKey>,
    pages: BTreeMap<u32, ProviderPage>,
}

/// A point-in-time copy of the pager state.
#[derive(Debug, Clone, PartialEq)]
pub struct PagerSnapshot {
    /// Accumulated providers, in page order.
    pub providers: Vec<Provider>,
    /// Last page loaded, 0 before the first fetch.
    pub current_page: u32,
    /// Total pages reported for the session.
    pub total_pages: u32,
    /// Whether more pages remain.
    pub has_more_pages: bool,
    /// Location of the last successful fetch.
    pub last_location: Option<Coordinate>,
    /// Message from the last failed fetch, cleared on success.
    pub last_error: Option<String>,
    /// Whether a fetch is in flight.
    pub is_loading: bool,
}

/// Clears the loading flag when dropped, even if the fetch is cancelled.
struct LoadingGuard<'a>(&'a AtomicBool);

impl<'a> LoadingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, PagerError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| Self(flag))
            .map_err(|_| PagerError::FetchInProgress)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

// ============================================================================
// Mechanic Pager
// ============================================================================

/// Search session over the nearby endpoint.
pub struct MechanicPager {
    client: NearbyClient,
    inner: Arc<RwLock<PagerInner>>,
    loading: AtomicBool,
    notify: watch::Sender<u64>,
}

impl MechanicPager {
    /// Creates an empty pager.
    pub fn new(client: NearbyClient) -> Self {
        let (notify, _) = watch::channel(0);
        Self {
            client,
            inner: Arc::new(RwLock::new(PagerInner::default())),
            loading: AtomicBool::new(false),
            notify,
        }
    }

    /// Subscribes to state changes. The value is a change counter.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.notify.subscribe()
    }

    fn bump(&self) {
        self.notify.send_modify(|v| *v = v.wrapping_add(1));
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Returns a copy of the whole state.
    pub async fn snapshot(&self) -> PagerSnapshot {
        let inner = self.inner.read().await;
        PagerSnapshot {
            providers: inner.providers.clone(),
            current_page: inner.current_page,
            total_pages: inner.total_pages,
            has_more_pages: inner.current_page < inner.total_pages,
            last_location: inner.last_location,
            last_error: inner.last_error.clone(),
            is_loading: self.is_loading(),
        }
    }

    /// Returns the accumulated providers.
    pub async fn providers(&self) -> Vec<Provider> {
        self.inner.read().await.providers.clone()
    }

    /// Returns the last page loaded, 0 before the first fetch.
    pub async fn current_page(&self) -> u32 {
        self.inner.read().await.current_page
    }

    /// Returns the total pages reported for the session.
    pub async fn total_pages(&self) -> u32 {
        self.inner.read().await.total_pages
    }

    /// Returns whether more pages remain.
    pub async fn has_more_pages(&self) -> bool {
        let inner = self.inner.read().await;
        inner.current_page < inner.total_pages
    }

    /// Returns the location of the last successful fetch.
    pub async fn last_location(&self) -> Option<Coordinate> {
        self.inner.read().await.last_location
    }

    /// Returns the message from the last failed fetch.
    pub async fn last_error(&self) -> Option<String> {
        self.inner.read().await.last_error.clone()
    }

    /// Returns whether a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Pairs every provider with the distance to show for it.
    ///
    /// Server distances win; missing ones are computed from `origin`.
    pub async fn providers_with_distance(&self, origin: &Coordinate) -> Vec<(Provider, f64)> {
        self.inner
            .read()
            .await
            .providers
            .iter()
            .map(|p| (p.clone(), display_distance(p, origin)))
            .collect()
    }

    // ========================================================================
    // Fetching
    // ========================================================================

    /// Fetches one page around `location` and merges it.
    ///
    /// A page already loaded for the same rounded location is returned
    /// from memory without a network call. Page 1, or any page for a
    /// location other than the current session's, replaces the list;
    /// later pages for the same location append to it.
    ///
    /// # Errors
    ///
    /// - [`PagerError::InvalidLocation`] / [`PagerError::InvalidPage`] for bad input
    /// - [`PagerError::FetchInProgress`] if another fetch is running
    /// - [`PagerError::Fetch`] if the backend call fails; existing results
    ///   are kept and [`last_error`](Self::last_error) is set
    pub async fn fetch(&self, location: Coordinate, page: u32) -> Result<ProviderPage, PagerError> {
        validate_request(&location, page)?;

        {
            let inner = self.inner.read().await;
            if inner.session == Some(location.key()) {
                if let Some(loaded) = inner.pages.get(&page) {
                    debug!(page, "Page already loaded, skipping fetch");
                    return Ok(loaded.clone());
                }
            }
        }

        self.fetch_uncached(location, page).await
    }

    /// Loads the page after the current one.
    ///
    /// Returns `Ok(None)` without fetching when there is no location yet,
    /// no further page, or a fetch in flight.
    ///
    /// # Errors
    ///
    /// Returns [`PagerError::Fetch`] if the backend call fails.
    pub async fn load_more(&self) -> Result<Option<ProviderPage>, PagerError> {
        let (location, next) = {
            let inner = self.inner.read().await;
            match inner.last_location {
                Some(loc) if inner.current_page < inner.total_pages && !self.is_loading() => {
                    (loc, inner.current_page + 1)
                }
                _ => return Ok(None),
            }
        };
        skip_if_busy(self.fetch(location, next).await)
    }

    /// Reloads page 1 for the last location, ignoring pages already loaded.
    ///
    /// Returns `Ok(None)` when there is no location yet or a fetch is in
    /// flight.
    ///
    /// # Errors
    ///
    /// Returns [`PagerError::Fetch`] if the backend call fails.
    pub async fn refresh(&self) -> Result<Option<ProviderPage>, PagerError> {
        let Some(location) = self.last_location().await else {
            return Ok(None);
        };
        if self.is_loading() {
            return Ok(None);
        }
        skip_if_busy(self.fetch_uncached(location, 1).await)
    }

    /// Clears all results.
    pub async fn reset(&self) {
        *self.inner.write().await = PagerInner::default();
        self.bump();
    }

    #[instrument(skip(self), fields(lat = location.latitude, lon = location.longitude))]
    async fn fetch_uncached(
        &self,
        location: Coordinate,
        page: u32,
    ) -> Result<ProviderPage, PagerError> {
        let _guard = LoadingGuard::acquire(&self.loading)?;
        self.bump();

        let response = match self.client.fetch_page(&location, page).await {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, page, "Mechanic fetch failed");
                self.inner.write().await.last_error = Some(e.user_message());
                self.bump();
                return Err(e.into());
            }
        };

        let validated = validate_all(&response.mechanics);
        let dropped = validated.dropped.len() + response.undecodable;
        if dropped > 0 {
            for (id, reason) in &validated.dropped {
                debug!(id = ?id, %reason, "Dropping mechanic");
            }
            warn!(dropped, page, "Dropped invalid mechanics");
        }

        let loaded = ProviderPage::new(validated.providers, page, response.total_pages);
        let key = location.key();
        {
            let mut inner = self.inner.write().await;
            if loaded.is_first() || inner.session != Some(key) {
                inner.providers.clone_from(&loaded.providers);
                inner.pages.clear();
            } else {
                inner.providers.extend(loaded.providers.iter().cloned());
            }
            inner.session = Some(key);
            inner.pages.insert(loaded.page, loaded.clone());
            inner.current_page = loaded.page;
            inner.total_pages = loaded.total_pages;
            inner.last_location = Some(location);
            inner.last_error = None;

            info!(
                page = loaded.page,
                total_pages = loaded.total_pages,
                received = loaded.len(),
                accumulated = inner.providers.len(),
                "Loaded mechanics"
            );
        }
        self.bump();
        Ok(loaded)
    }
}

fn validate_request(location: &Coordinate, page: u32) -> Result<(), PagerError> {
    if !location.is_valid() {
        return Err(PagerError::InvalidLocation {
            latitude: location.latitude,
            longitude: location.longitude,
        });
    }
    if page == 0 {
        return Err(PagerError::InvalidPage(page));
    }
    Ok(())
}

fn skip_if_busy(result: Result<ProviderPage, PagerError>) -> Result<Option<ProviderPage>, PagerError> {
    match result {
        Ok(page) => Ok(Some(page)),
        Err(PagerError::FetchInProgress) => Ok(None),
        Err(e) => Err(e),
    }
}

impl std::fmt::Debug for MechanicPager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MechanicPager")
            .field("client", &self.client)
            .field("is_loading", &self.is_loading())
            .finish_non_exhaustive()
    }
}
