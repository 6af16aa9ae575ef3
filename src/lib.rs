//! Bontho - batch phone invitations
//!
//! Validates a batch of region-local phone numbers, calls every recipient
//! through a telephony provider and records who answered "down" or "not down".
//! Laid out in domain / application / infrastructure / interface layers.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interface;

// Re-export commonly used types
pub use domain::shared::error::DomainError;
pub use domain::shared::error::Result;
