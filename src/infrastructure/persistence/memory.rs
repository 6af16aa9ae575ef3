//! In-memory invitation repository
//!
//! Used when no database is configured and in tests.

use crate::domain::invitation::{InvitationRecord, InvitationRepository};
use crate::domain::shared::error::{DomainError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryInvitationRepository {
    records: RwLock<HashMap<Uuid, InvitationRecord>>,
}

impl InMemoryInvitationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    pub async fn all(&self) -> Vec<InvitationRecord> {
        let mut records: Vec<InvitationRecord> = self.records.read().await.values().cloned().collect();
        records.sort_by_key(|r| r.created_at);
        records
    }
}

#[async_trait]
impl InvitationRepository for InMemoryInvitationRepository {
    async fn bulk_insert(&self, records: Vec<InvitationRecord>) -> Result<()> {
        let mut stored = self.records.write().await;
        if let Some(duplicate) = records.iter().find(|r| stored.contains_key(&r.id)) {
            return Err(DomainError::Persistence(format!(
                "invitation {} already exists",
                duplicate.id
            )));
        }

        debug!("Storing {} invitation record(s)", records.len());
        stored.extend(records.into_iter().map(|r| (r.id, r)));
        Ok(())
    }

    async fn find_by_call_id(&self, call_id: &str) -> Result<Option<InvitationRecord>> {
        let stored = self.records.read().await;
        Ok(stored
            .values()
            .filter(|r| r.call_id == call_id)
            .min_by_key(|r| r.created_at)
            .cloned())
    }

    async fn save(&self, record: &InvitationRecord) -> Result<bool> {
        let mut stored = self.records.write().await;
        match stored.get_mut(&record.id) {
            Some(existing) if existing.has_responded() => Ok(false),
            Some(existing) => {
                *existing = record.clone();
                Ok(true)
            }
            None => Err(DomainError::NotFound(format!("invitation {}", record.id))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::invitation::ResponseState;

    fn record(call_id: &str) -> InvitationRecord {
        InvitationRecord::sent(
            call_id.to_string(),
            "hash".to_string(),
            "Ann".to_string(),
            "Cafe".to_string(),
        )
    }

    #[tokio::test]
    async fn test_bulk_insert_and_find() {
        let repo = InMemoryInvitationRepository::new();
        repo.bulk_insert(vec![record("a"), record("b")]).await.unwrap();

        assert_eq!(repo.len().await, 2);
        assert_eq!(repo.find_by_call_id("b").await.unwrap().unwrap().call_id, "b");
        assert!(repo.find_by_call_id("c").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_bulk_insert_rejects_duplicates_atomically() {
        let repo = InMemoryInvitationRepository::new();
        let existing = record("a");
        repo.bulk_insert(vec![existing.clone()]).await.unwrap();

        let result = repo.bulk_insert(vec![record("b"), existing]).await;
        assert!(result.is_err());
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_save_updates_record() {
        let repo = InMemoryInvitationRepository::new();
        repo.bulk_insert(vec![record("a")]).await.unwrap();

        let mut stored = repo.find_by_call_id("a").await.unwrap().unwrap();
        stored.set_is_down(true);
        assert!(repo.save(&stored).await.unwrap());

        let reloaded = repo.find_by_call_id("a").await.unwrap().unwrap();
        assert_eq!(reloaded.response, ResponseState::IsDown);
    }

    #[tokio::test]
    async fn test_save_keeps_stored_response() {
        let repo = InMemoryInvitationRepository::new();
        repo.bulk_insert(vec![record("a")]).await.unwrap();

        // Both copies are read before either answer is stored
        let mut first = repo.find_by_call_id("a").await.unwrap().unwrap();
        let mut second = first.clone();
        first.set_is_down(true);
        second.set_is_down(false);

        assert!(repo.save(&first).await.unwrap());
        assert!(!repo.save(&second).await.unwrap());

        let reloaded = repo.find_by_call_id("a").await.unwrap().unwrap();
        assert_eq!(reloaded.response, ResponseState::IsDown);
    }

    #[tokio::test]
    async fn test_save_unknown_record() {
        let repo = InMemoryInvitationRepository::new();
        let result = repo.save(&record("a")).await;
        assert!(matches!(result, Err(DomainError::NotFound(_))));
        assert!(repo.is_empty().await);
    }
}
