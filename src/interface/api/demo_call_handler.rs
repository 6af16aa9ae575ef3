//! Demo call API handler

use super::auth::ApiKeyAuth;
use super::error::ApiError;
use super::invitation_dto::{CallResultDto, DemoCallRequest};
use super::invitation_handler::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::info;

/// Place one call reading out generated text
pub async fn demo_call(
    State(state): State<AppState>,
    _auth: ApiKeyAuth,
    payload: Result<Json<DemoCallRequest>, JsonRejection>,
) -> Result<Json<CallResultDto>, ApiError> {
    let Json(req) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    if req.number.is_empty() {
        return Err(ApiError::BadRequest(
            "\"number\" is not allowed to be empty".to_string(),
        ));
    }

    info!("API: Demo call to {}", req.number);

    let result = state.demo_calls.call(&req.number).await?;
    Ok(Json(result.into()))
}
