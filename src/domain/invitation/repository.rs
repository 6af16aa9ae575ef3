//! Invitation repository interface

use super::entity::InvitationRecord;
use crate::domain::shared::error::Result;
use async_trait::async_trait;

/// Repository for invitation records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InvitationRepository: Send + Sync {
    /// Insert all records in one write
    async fn bulk_insert(&self, records: Vec<InvitationRecord>) -> Result<()>;

    /// Find a record by provider call identifier
    async fn find_by_call_id(&self, call_id: &str) -> Result<Option<InvitationRecord>>;

    /// Store the response of an existing record unless one is already stored.
    ///
    /// Returns `false` when another response was stored first; the stored
    /// record is left untouched in that case.
    async fn save(&self, record: &InvitationRecord) -> Result<bool>;
}
