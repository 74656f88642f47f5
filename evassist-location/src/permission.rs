//! Location permission state machine.

use std::sync::Arc;

use evassist_core::PermissionState;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::platform::LocationPlatform;

/// Tracks the location permission and decides when to prompt.
///
/// The state lock is held while a prompt is on screen, so concurrent
/// callers wait for the answer instead of stacking prompts.
pub struct PermissionStateMachine {
    platform: Arc<dyn LocationPlatform>,
    state: Mutex<PermissionState>,
}

impl PermissionStateMachine {
    /// Creates a machine in the `Unknown` state.
    pub fn new(platform: Arc<dyn LocationPlatform>) -> Self {
        Self {
            platform,
            state: Mutex::new(PermissionState::Unknown),
        }
    }

    /// Returns the last observed state without touching the platform.
    pub async fn state(&self) -> PermissionState {
        *self.state.lock().await
    }

    /// Reads the platform grant without prompting.
    pub async fn check(&self) -> PermissionState {
        let mut state = self.state.lock().await;
        let observed = self.platform.permission_status().await.to_state();
        let previous = *state;
        if previous != observed {
            debug!(from = %previous, to = %observed, "Permission state changed");
        }
        *state = observed;
        observed
    }

    /// Prompts the user if the current state allows it.
    ///
    /// `Granted` and `DeniedPermanent` are returned as-is. An answer that
    /// would move back to `Unknown` is recorded as `DeniedRetryable`.
    pub async fn request(&self) -> PermissionState {
        let mut state = self.state.lock().await;
        let current = *state;
        if !current.can_prompt() {
            debug!(state = %current, "Not prompting for permission");
            return current;
        }

        let answer = self.platform.request_permission().await.to_state();
        let next = if current.allows_request_transition(answer) {
            answer
        } else {
            PermissionState::DeniedRetryable
        };
        info!(from = %current, to = %next, "Location permission requested");
        *state = next;
        next
    }
}

impl std::fmt::Debug for PermissionStateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionStateMachine").finish_non_exhaustive()
    }
}
