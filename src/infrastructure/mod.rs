//! Infrastructure layer - Technical implementations
//!
//! This layer contains:
//! - Repository implementations
//! - Telephony provider integration
//! - Content service integration

pub mod content;
pub mod persistence;
pub mod telephony;
