//! Number Info API - relay service for phone number lookups
//!
//! Accepts a phone number over HTTP, checks a shared API key, forwards the
//! number to the upstream lookup service and wraps the result in a fixed
//! JSON envelope.

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::config::Settings;
pub use error::{envelope_errors, RelayError};
pub use models::{Envelope, LookupInput, LookupResponse};
pub use routes::{configure_routes, lookup::AppState};
pub use services::{UpstreamClient, UpstreamError};
