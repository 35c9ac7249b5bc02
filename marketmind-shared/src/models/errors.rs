use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Fixed message surfaced whenever the backend cannot be reached at all.
pub const BACKEND_UNREACHABLE: &str = "Backend unreachable. Please ensure the server is running.";

/// Where a failure originated. Never sent over the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No response was received (connection refused, DNS failure, timeout).
    Transport,
    /// The backend answered and rejected the request.
    #[default]
    Application,
    /// The input was rejected locally before any request was issued.
    Validation,
}

impl ErrorKind {
    /// Short lowercase label used in log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Application => "application",
            Self::Validation => "validation",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniform error shape for every failed API call.
///
/// Only `detail` is part of the wire format; the backend's error bodies
/// deserialize straight into this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{detail}")]
pub struct ApiError {
    /// Human-readable message shown inline to the user.
    pub detail: String,
    /// Client-side classification of the failure.
    #[serde(skip)]
    pub kind: ErrorKind,
}

impl ApiError {
    /// The backend could not be reached.
    #[must_use]
    pub fn unreachable() -> Self {
        Self {
            detail: BACKEND_UNREACHABLE.to_string(),
            kind: ErrorKind::Transport,
        }
    }

    /// The backend rejected the request with the given message.
    pub fn application(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
            kind: ErrorKind::Application,
        }
    }

    /// Local input validation failed; no request was sent.
    pub fn validation(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
            kind: ErrorKind::Validation,
        }
    }

    /// Returns `true` when no response was received.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self.kind, ErrorKind::Transport)
    }

    /// Returns `true` when the failure was detected before any request.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self.kind, ErrorKind::Validation)
    }
}
