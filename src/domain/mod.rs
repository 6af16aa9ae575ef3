//! Domain layer - Core business logic and rules
//!
//! This layer contains:
//! - Value Objects: canonical phone numbers and numbering regions
//! - Entities: invitation records and their response state
//! - Domain Services: number normalization and call dispatch
//! - Ports: outbound calling, invitation storage, content fetching

pub mod content;
pub mod dispatch;
pub mod invitation;
pub mod numbering;
pub mod shared;

// Re-export commonly used types
pub use shared::{DomainError, Result};
