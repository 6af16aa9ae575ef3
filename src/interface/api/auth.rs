//! Static API key check
//!
//! Protected handlers take an [`ApiKeyAuth`] argument; extraction fails with
//! 401 unless the `api_key` query parameter matches the configured key.

use super::error::ApiError;
use super::invitation_handler::AppState;
use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Deserialize)]
struct ApiKeyQuery {
    api_key: Option<String>,
}

/// Proof that the request carried a valid API key
#[derive(Debug, Clone, Copy)]
pub struct ApiKeyAuth;

#[async_trait]
impl FromRequestParts<AppState> for ApiKeyAuth {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let provided = Query::<ApiKeyQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(query)| query.api_key);

        match provided {
            Some(key) if key == state.api_key.as_ref() => Ok(ApiKeyAuth),
            _ => {
                warn!("API: Rejected request to {} with invalid api_key", parts.uri.path());
                Err(ApiError::Unauthorized("invalid api_key".to_string()))
            }
        }
    }
}
