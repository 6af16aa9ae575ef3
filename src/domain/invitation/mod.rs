//! Invitation records
//!
//! One record per successfully queued call, tracking whether the recipient
//! answered that they are coming.

pub mod entity;
pub mod phone_hash;
pub mod repository;

pub use entity::{InvitationRecord, ResponseState};
pub use phone_hash::PhoneHasher;
pub use repository::InvitationRepository;
