//! Recording invitees' answers

use crate::domain::invitation::InvitationRepository;
use crate::domain::shared::error::Result;
use std::sync::Arc;
use tracing::{debug, info};

/// What a response notification did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseOutcome {
    Recorded,
    AlreadyResponded,
    UnknownCall,
}

impl ResponseOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseOutcome::Recorded => "recorded",
            ResponseOutcome::AlreadyResponded => "already_responded",
            ResponseOutcome::UnknownCall => "unknown_call",
        }
    }
}

/// Applies response notifications to invitation records.
///
/// Unknown call ids and repeated notifications are accepted as no-ops; the
/// provider may deliver late or more than once.
pub struct ResponseHandler {
    repository: Arc<dyn InvitationRepository>,
}

impl ResponseHandler {
    pub fn new(repository: Arc<dyn InvitationRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, call_id: &str, is_down: bool) -> Result<ResponseOutcome> {
        let Some(mut record) = self.repository.find_by_call_id(call_id).await? else {
            debug!("Ignoring response for unknown call {}", call_id);
            return Ok(ResponseOutcome::UnknownCall);
        };

        if !record.set_is_down(is_down) {
            debug!(
                "Ignoring repeated response for call {} (already {})",
                call_id,
                record.response.as_str()
            );
            return Ok(ResponseOutcome::AlreadyResponded);
        }

        if !self.repository.save(&record).await? {
            debug!("Ignoring response for call {}, another one was stored first", call_id);
            return Ok(ResponseOutcome::AlreadyResponded);
        }
        info!("Recorded {} for call {}", record.response.as_str(), call_id);

        Ok(ResponseOutcome::Recorded)
    }
}
