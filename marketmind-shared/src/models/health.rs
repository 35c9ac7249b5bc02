use serde::{Deserialize, Serialize};
use std::fmt;

/// Status value the backend root reports when it is serving requests.
pub const ACTIVE_STATUS: &str = "active";

/// Body of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    /// Liveness marker; only `"active"` counts as online.
    pub status: String,
}

impl HealthResponse {
    /// Returns `true` when the backend explicitly reports itself active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == ACTIVE_STATUS
    }
}

/// Displayed backend liveness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HealthStatus {
    /// No probe has completed yet.
    #[default]
    Checking,
    Online,
    Offline,
}

impl HealthStatus {
    /// Status for a probe outcome.
    #[must_use]
    pub const fn from_probe(online: bool) -> Self {
        if online { Self::Online } else { Self::Offline }
    }

    /// Indicator text; `None` while checking, since nothing is shown then.
    #[must_use]
    pub const fn label(self) -> Option<&'static str> {
        match self {
            Self::Checking => None,
            Self::Online => Some("System Online"),
            Self::Offline => Some("Backend Offline"),
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Checking => "checking",
            Self::Online => "online",
            Self::Offline => "offline",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_active_is_online() {
        let active: HealthResponse = serde_json::from_str(r#"{"status":"active"}"#).expect("body");
        let degraded: HealthResponse =
            serde_json::from_str(r#"{"status":"degraded"}"#).expect("body");
        assert!(active.is_active());
        assert!(!degraded.is_active());
    }

    #[test]
    fn test_labels() {
        assert_eq!(HealthStatus::Checking.label(), None);
        assert_eq!(HealthStatus::from_probe(true).label(), Some("System Online"));
        assert_eq!(HealthStatus::from_probe(false).label(), Some("Backend Offline"));
        assert_eq!(HealthStatus::default(), HealthStatus::Checking);
    }
}
