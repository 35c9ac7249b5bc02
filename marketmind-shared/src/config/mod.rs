//! # Configuration
//!
//! Client configuration: backend locations, timeouts, polling cadence, and
//! logging settings.

pub mod client;
