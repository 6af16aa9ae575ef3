//! Invitation record entity

use crate::domain::shared::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Recipient's answer to an invitation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseState {
    NoResponseYet,
    IsDown,
    IsNotDown,
}

impl ResponseState {
    pub fn from_is_down(is_down: bool) -> Self {
        if is_down {
            ResponseState::IsDown
        } else {
            ResponseState::IsNotDown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseState::NoResponseYet => "NO_RESPONSE_YET",
            ResponseState::IsDown => "IS_DOWN",
            ResponseState::IsNotDown => "IS_NOT_DOWN",
        }
    }

    /// Column value; "no response yet" is stored as NULL
    pub fn to_column(&self) -> Option<&'static str> {
        match self {
            ResponseState::NoResponseYet => None,
            other => Some(other.as_str()),
        }
    }

    pub fn from_column(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.parse().ok())
            .unwrap_or(ResponseState::NoResponseYet)
    }
}

impl FromStr for ResponseState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NO_RESPONSE_YET" => Ok(ResponseState::NoResponseYet),
            "IS_DOWN" => Ok(ResponseState::IsDown),
            "IS_NOT_DOWN" => Ok(ResponseState::IsNotDown),
            other => Err(DomainError::Persistence(format!(
                "unknown response state: {}",
                other
            ))),
        }
    }
}

/// One outbound invitation call.
///
/// Only a hash of the canonical number is kept, never the number itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvitationRecord {
    pub id: Uuid,

    /// Provider call identifier
    pub call_id: String,

    /// One-way hash of the E.164 number
    pub phone_hash: String,

    pub inviter: String,
    pub place: String,
    pub response: ResponseState,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InvitationRecord {
    /// Record for a call that was just queued
    pub fn sent(call_id: String, phone_hash: String, inviter: String, place: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            call_id,
            phone_hash,
            inviter,
            place,
            response: ResponseState::NoResponseYet,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_responded(&self) -> bool {
        self.response != ResponseState::NoResponseYet
    }

    /// Record the recipient's answer.
    ///
    /// Only the first answer counts; returns `false` and leaves the record
    /// untouched if one was already recorded.
    pub fn set_is_down(&mut self, is_down: bool) -> bool {
        if self.has_responded() {
            return false;
        }

        self.response = ResponseState::from_is_down(is_down);
        self.updated_at = Utc::now();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> InvitationRecord {
        InvitationRecord::sent(
            "CA123".to_string(),
            "$2b$04$hash".to_string(),
            "Ann".to_string(),
            "Cafe".to_string(),
        )
    }

    #[test]
    fn test_sent_record() {
        let record = record();
        assert_eq!(record.call_id, "CA123");
        assert_eq!(record.inviter, "Ann");
        assert_eq!(record.place, "Cafe");
        assert_eq!(record.response, ResponseState::NoResponseYet);
        assert!(!record.has_responded());
        assert_eq!(record.created_at, record.updated_at);
    }

    #[test]
    fn test_set_is_down() {
        let mut record = record();
        assert!(record.set_is_down(true));
        assert_eq!(record.response, ResponseState::IsDown);
        assert!(record.has_responded());
    }

    #[test]
    fn test_first_answer_wins() {
        let mut record = record();
        assert!(record.set_is_down(false));
        let answered_at = record.updated_at;

        assert!(!record.set_is_down(true));
        assert_eq!(record.response, ResponseState::IsNotDown);
        assert_eq!(record.updated_at, answered_at);
    }

    #[test]
    fn test_response_state_conversion() {
        assert_eq!(ResponseState::IsDown.as_str(), "IS_DOWN");
        assert_eq!("IS_NOT_DOWN".parse::<ResponseState>(), Ok(ResponseState::IsNotDown));
        for state in [ResponseState::NoResponseYet, ResponseState::IsDown, ResponseState::IsNotDown] {
            assert_eq!(state.as_str().parse::<ResponseState>(), Ok(state));
        }
        assert!(matches!(
            "maybe".parse::<ResponseState>(),
            Err(DomainError::Persistence(_))
        ));
    }

    #[test]
    fn test_response_state_column() {
        assert_eq!(ResponseState::NoResponseYet.to_column(), None);
        assert_eq!(ResponseState::IsDown.to_column(), Some("IS_DOWN"));
        assert_eq!(ResponseState::from_column(None), ResponseState::NoResponseYet);
        assert_eq!(ResponseState::from_column(Some("IS_DOWN")), ResponseState::IsDown);
        assert_eq!(ResponseState::from_column(Some("garbage")), ResponseState::NoResponseYet);
    }
}
