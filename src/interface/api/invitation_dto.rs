//! Invitation API DTOs

use crate::application::InviteOutcome;
use crate::domain::dispatch::{CallOutcome, CallResult};
use serde::{Deserialize, Serialize};

pub const INVITER_MAX_LEN: usize = 100;
pub const PLACE_MAX_LEN: usize = 200;

/// Batch invitation request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InviteRequest {
    pub numbers: Vec<String>,
    pub inviter: String,
    pub place: String,
}

impl InviteRequest {
    /// Check field constraints, returning every violation
    pub fn validate(&self) -> Result<(), String> {
        let mut errors = Vec::new();

        check_text(&mut errors, "inviter", &self.inviter, INVITER_MAX_LEN);
        check_text(&mut errors, "place", &self.place, PLACE_MAX_LEN);
        for (i, number) in self.numbers.iter().enumerate() {
            if number.is_empty() {
                errors.push(format!("\"numbers[{}]\" is not allowed to be empty", i));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors.join(", "))
        }
    }
}

fn check_text(errors: &mut Vec<String>, field: &str, value: &str, max_len: usize) {
    if value.is_empty() {
        errors.push(format!("\"{}\" is not allowed to be empty", field));
    } else if value.chars().count() > max_len {
        errors.push(format!(
            "\"{}\" length must be less than or equal to {} characters long",
            field, max_len
        ));
    }
}

/// A queued call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueuedCallDto {
    pub call_id: String,
    pub number: String,
    pub parsed_number: String,
}

/// A failed call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedCallDto {
    pub error: String,
    pub number: String,
    pub parsed_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CallResultDto {
    Queued(QueuedCallDto),
    Failed(FailedCallDto),
}

impl From<CallResult> for CallResultDto {
    fn from(result: CallResult) -> Self {
        let parsed_number = result.parsed_number.into_string();
        match result.outcome {
            CallOutcome::Queued { call_id } => CallResultDto::Queued(QueuedCallDto {
                call_id,
                number: result.number,
                parsed_number,
            }),
            CallOutcome::Failed { reason } => CallResultDto::Failed(FailedCallDto {
                error: reason,
                number: result.number,
                parsed_number,
            }),
        }
    }
}

/// Batch invitation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteResponse {
    pub queued: Vec<CallResultDto>,
    pub failed: Vec<CallResultDto>,
}

impl From<InviteOutcome> for InviteResponse {
    fn from(outcome: InviteOutcome) -> Self {
        Self {
            queued: outcome.queued.into_iter().map(Into::into).collect(),
            failed: outcome.failed.into_iter().map(Into::into).collect(),
        }
    }
}

/// Response notification for a call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRequest {
    pub call_id: String,
    pub is_down: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckResponse {
    pub ok: bool,
}

/// Demo call request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoCallRequest {
    pub number: String,
}
