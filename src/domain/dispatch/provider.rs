//! Outbound call provider port

use crate::domain::shared::value_objects::PhoneNumber;
use async_trait::async_trait;
use thiserror::Error;

/// Request to place one outbound call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceCall {
    /// URL the provider fetches call instructions from once the call connects
    pub callback_url: String,
    /// Caller number presented to the recipient
    pub from: String,
    pub to: PhoneNumber,
}

/// Provider acknowledgement of a call request.
///
/// A provider may accept the request and still report that the call itself
/// failed or will fail; in that case `error_code`/`error_message` are set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedCall {
    pub call_id: String,
    pub error_code: Option<i64>,
    pub error_message: Option<String>,
}

impl PlacedCall {
    pub fn accepted(call_id: impl Into<String>) -> Self {
        Self {
            call_id: call_id.into(),
            error_code: None,
            error_message: None,
        }
    }

    /// Human-readable reason if the provider embedded an error in the acknowledgement
    pub fn embedded_error(&self) -> Option<String> {
        match (&self.error_message, self.error_code) {
            (Some(message), Some(code)) => Some(format!("{} (code {})", message, code)),
            (Some(message), None) => Some(message.clone()),
            (None, Some(code)) => Some(format!("Call failed with error code {}", code)),
            (None, None) => None,
        }
    }
}

/// Provider-level failure: the request itself did not go through
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Provider request failed: {0}")]
    Transport(String),

    #[error("Provider rejected request with status {status}: {message}")]
    Rejected {
        status: u16,
        code: Option<i64>,
        message: String,
    },

    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    #[error("Provider misconfigured: {0}")]
    Configuration(String),
}

/// Outbound call provider
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OutboundCallProvider: Send + Sync {
    /// Ask the provider to place a call
    async fn place(&self, request: PlaceCall) -> Result<PlacedCall, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_error_absent() {
        assert_eq!(PlacedCall::accepted("CA123").embedded_error(), None);
    }

    #[test]
    fn test_embedded_error_message_and_code() {
        let placed = PlacedCall {
            call_id: "CA123".to_string(),
            error_code: Some(13224),
            error_message: Some("Invalid destination".to_string()),
        };
        assert_eq!(
            placed.embedded_error().as_deref(),
            Some("Invalid destination (code 13224)")
        );
    }

    #[test]
    fn test_embedded_error_code_only() {
        let placed = PlacedCall {
            call_id: "CA123".to_string(),
            error_code: Some(32009),
            error_message: None,
        };
        assert_eq!(
            placed.embedded_error().as_deref(),
            Some("Call failed with error code 32009")
        );
    }
}
