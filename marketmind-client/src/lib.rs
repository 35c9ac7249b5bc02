//! Client core of the MarketMind dashboard.
//!
//! - [`api`]: typed calls to the backend, all failing with one error shape.
//! - [`session`]: who is signed in.
//! - [`health`]: periodic liveness polling.
//! - [`controllers`]: per-page submission state.
//!
//! Any front end (the CLI in this workspace, or a GUI) renders the state these
//! types expose and forwards user input to them.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod controllers;
pub mod health;
pub mod session;

#[cfg(test)]
mod test_support;

pub use api::{ApiClient, MarketMindApi};
pub use controllers::{PageController, SubmissionState, SubmitError};
pub use health::{DEFAULT_HEALTH_INTERVAL, HealthMonitor, MIN_HEALTH_INTERVAL};
pub use session::SessionStore;
