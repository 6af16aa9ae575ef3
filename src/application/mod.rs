//! Application layer - Use cases and application services
//!
//! This layer orchestrates domain objects to fulfill use cases.
//! It's responsible for:
//! - Validating a whole batch before any side effect
//! - Running dispatches concurrently and joining their outcomes
//! - Best-effort bookkeeping of what was sent

pub mod demo_call;
pub mod invite;
pub mod response;

pub use demo_call::DemoCallService;
pub use invite::{BatchInviteWorkflow, InviteOutcome};
pub use response::{ResponseHandler, ResponseOutcome};
