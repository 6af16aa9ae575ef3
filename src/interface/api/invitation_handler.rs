//! Invitation API handlers

use super::auth::ApiKeyAuth;
use super::error::ApiError;
use super::invitation_dto::{AckResponse, InviteRequest, InviteResponse, ResponseRequest};
use super::metrics_handler::{record_batch, record_rejected_batch, record_response};
use crate::application::{BatchInviteWorkflow, DemoCallService, ResponseHandler};
use crate::domain::shared::error::DomainError;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub invite_workflow: Arc<BatchInviteWorkflow>,
    pub response_handler: Arc<ResponseHandler>,
    pub demo_calls: Arc<DemoCallService>,
    pub api_key: Arc<str>,
}

/// Invite a batch of numbers.
///
/// The batch runs on its own task so a client hanging up mid-request does not
/// cancel calls that are already being placed.
pub async fn invite(
    State(state): State<AppState>,
    _auth: ApiKeyAuth,
    payload: Result<Json<InviteRequest>, JsonRejection>,
) -> Result<Json<InviteResponse>, ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        record_rejected_batch();
        ApiError::BadRequest(rejection.body_text())
    })?;

    if let Err(msg) = req.validate() {
        warn!("API: Rejected invitation request: {}", msg);
        record_rejected_batch();
        return Err(ApiError::BadRequest(msg));
    }

    info!(
        "API: Inviting {} number(s) to {} from {}",
        req.numbers.len(),
        req.place,
        req.inviter
    );

    let workflow = state.invite_workflow.clone();
    let started = Instant::now();
    let result = tokio::spawn(async move {
        workflow
            .invite_all(&req.numbers, &req.inviter, &req.place)
            .await
    })
    .await
    .map_err(|e| ApiError::Internal(format!("invitation task failed: {}", e)))?;

    match result {
        Ok(outcome) => {
            record_batch(&outcome, started.elapsed());
            Ok(Json(outcome.into()))
        }
        Err(e) => {
            if matches!(e, DomainError::InvalidNumber { .. }) {
                record_rejected_batch();
            }
            Err(e.into())
        }
    }
}

/// Record an invitee's answer
pub async fn respond(
    State(state): State<AppState>,
    payload: Result<Json<ResponseRequest>, JsonRejection>,
) -> Result<Json<AckResponse>, ApiError> {
    let Json(req) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    info!("API: Response for call {}: is_down={}", req.call_id, req.is_down);

    let outcome = state.response_handler.handle(&req.call_id, req.is_down).await?;
    record_response(outcome);

    Ok(Json(AckResponse { ok: true }))
}

/// Health check endpoint
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
