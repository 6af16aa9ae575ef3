//! HTTP API

pub mod auth;
pub mod demo_call_handler;
pub mod error;
pub mod invitation_dto;
pub mod invitation_handler;
pub mod metrics_handler;
pub mod router;

pub use error::ApiError;
pub use invitation_handler::AppState;
pub use metrics_handler::init_metrics;
pub use router::build_router;
