//! Content service adapters

pub mod http;

pub use http::{HttpContentSource, HttpContentConfig};
