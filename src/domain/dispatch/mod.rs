//! Outbound call dispatch
//!
//! The [`OutboundCallProvider`] port is implemented by the telephony adapter in
//! the infrastructure layer; [`CallDispatcher`] turns its outcome into a
//! [`CallOutcome`] that never escapes as an error.

pub mod callback;
pub mod dispatcher;
pub mod outcome;
pub mod provider;

pub use callback::CallbackUrls;
pub use dispatcher::CallDispatcher;
pub use outcome::{CallOutcome, CallResult};
pub use provider::{OutboundCallProvider, PlaceCall, PlacedCall, ProviderError};
