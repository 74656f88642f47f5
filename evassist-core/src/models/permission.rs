//! Location permission states.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Location permission status as tracked for the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionState {
    /// Not yet determined; the user has never been asked.
    #[default]
    Unknown,
    /// Location access granted.
    Granted,
    /// Denied, but the platform allows asking again.
    DeniedRetryable,
    /// Denied, and the platform will not show the prompt again.
    DeniedPermanent,
}

impl PermissionState {
    /// Returns true if location access is granted.
    pub fn is_granted(self) -> bool {
        self == Self::Granted
    }

    /// Returns true if a `request()` in this state may show a platform prompt.
    pub fn can_prompt(self) -> bool {
        matches!(self, Self::Unknown | Self::DeniedRetryable)
    }

    /// Returns true if `request()` may move from `self` to `next`.
    pub fn allows_request_transition(self, next: PermissionState) -> bool {
        self.can_prompt() && next != Self::Unknown
    }

    /// Returns the lowercase name used in logs and CLI output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Granted => "granted",
            Self::DeniedRetryable => "denied_retryable",
            Self::DeniedPermanent => "denied_permanent",
        }
    }
}

impl fmt::Display for PermissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_transitions() {
        use PermissionState::*;

        for next in [Granted, DeniedRetryable, DeniedPermanent] {
            assert!(Unknown.allows_request_transition(next));
            assert!(DeniedRetryable.allows_request_transition(next));
            assert!(!Granted.allows_request_transition(next));
            assert!(!DeniedPermanent.allows_request_transition(next));
        }

        assert!(!Unknown.allows_request_transition(Unknown));
        assert!(!DeniedRetryable.allows_request_transition(Unknown));
    }

    #[test]
    fn test_display() {
        assert_eq!(PermissionState::DeniedPermanent.to_string(), "denied_permanent");
        assert_eq!(PermissionState::default(), PermissionState::Unknown);
    }
}
