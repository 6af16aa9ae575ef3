//! Dispatch outcomes

use crate::domain::shared::value_objects::PhoneNumber;

/// Result of dispatching one call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    Queued { call_id: String },
    Failed { reason: String },
}

/// A dispatch outcome tagged with the number it was for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallResult {
    /// Number exactly as the caller submitted it
    pub number: String,
    pub parsed_number: PhoneNumber,
    pub outcome: CallOutcome,
}

impl CallResult {
    pub fn new(number: impl Into<String>, parsed_number: PhoneNumber, outcome: CallOutcome) -> Self {
        Self {
            number: number.into(),
            parsed_number,
            outcome,
        }
    }

    pub fn is_queued(&self) -> bool {
        matches!(self.outcome, CallOutcome::Queued { .. })
    }

    pub fn call_id(&self) -> Option<&str> {
        match &self.outcome {
            CallOutcome::Queued { call_id } => Some(call_id),
            CallOutcome::Failed { .. } => None,
        }
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match &self.outcome {
            CallOutcome::Queued { .. } => None,
            CallOutcome::Failed { reason } => Some(reason),
        }
    }
}
