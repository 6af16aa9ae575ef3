//! Call dispatcher

use super::outcome::CallOutcome;
use super::provider::{OutboundCallProvider, PlaceCall};
use crate::domain::shared::value_objects::PhoneNumber;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Places one call per invocation and reports the outcome as data.
///
/// Provider failures never propagate: a failed dispatch is an ordinary
/// [`CallOutcome::Failed`] so one recipient cannot abort a batch. No retries.
pub struct CallDispatcher {
    provider: Arc<dyn OutboundCallProvider>,
    from_number: String,
}

impl CallDispatcher {
    pub fn new(provider: Arc<dyn OutboundCallProvider>, from_number: impl Into<String>) -> Self {
        Self {
            provider,
            from_number: from_number.into(),
        }
    }

    /// Ask the provider to call `number`, fetching instructions from `callback_url`
    pub async fn dispatch(&self, number: &PhoneNumber, callback_url: &str) -> CallOutcome {
        let request = PlaceCall {
            callback_url: callback_url.to_string(),
            from: self.from_number.clone(),
            to: number.clone(),
        };

        match self.provider.place(request).await {
            Ok(placed) => match placed.embedded_error() {
                Some(reason) => {
                    warn!("Call {} to {} accepted but failed: {}", placed.call_id, number, reason);
                    CallOutcome::Failed { reason }
                }
                None => {
                    info!("Call {} queued to {}", placed.call_id, number);
                    CallOutcome::Queued {
                        call_id: placed.call_id,
                    }
                }
            },
            Err(e) => {
                error!("Failed to dispatch call to {}: {}", number, e);
                CallOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}
