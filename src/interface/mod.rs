//! Interface layer - External interfaces
//!
//! This layer handles:
//! - REST API endpoints and API key checks
//! - Request validation and response formatting
//! - Prometheus metrics export

pub mod api;
