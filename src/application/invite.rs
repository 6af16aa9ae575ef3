//! Batch invitation use case

use crate::domain::dispatch::{CallDispatcher, CallResult, CallbackUrls};
use crate::domain::invitation::{InvitationRecord, InvitationRepository, PhoneHasher};
use crate::domain::numbering::NumberNormalizer;
use crate::domain::shared::error::{DomainError, Result};
use futures::future::{join_all, try_join_all};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Partitioned dispatch results of one batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InviteOutcome {
    pub queued: Vec<CallResult>,
    pub failed: Vec<CallResult>,
}

impl InviteOutcome {
    pub fn len(&self) -> usize {
        self.queued.len() + self.failed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Invites a batch of recipients to a place.
///
/// 1. Every number is normalized first; one invalid number rejects the batch
///    and nothing is dialled.
/// 2. One call per number is dispatched concurrently, and the outcome is
///    computed only after all of them completed.
/// 3. Queued calls are recorded in one bulk write. A failed write is logged and
///    does not change the returned outcome.
pub struct BatchInviteWorkflow {
    normalizer: NumberNormalizer,
    dispatcher: Arc<CallDispatcher>,
    callbacks: CallbackUrls,
    repository: Arc<dyn InvitationRepository>,
    hasher: PhoneHasher,
}

impl BatchInviteWorkflow {
    pub fn new(
        normalizer: NumberNormalizer,
        dispatcher: Arc<CallDispatcher>,
        callbacks: CallbackUrls,
        repository: Arc<dyn InvitationRepository>,
        hasher: PhoneHasher,
    ) -> Self {
        Self {
            normalizer,
            dispatcher,
            callbacks,
            repository,
            hasher,
        }
    }

    pub async fn invite_all(
        &self,
        raw_numbers: &[String],
        inviter: &str,
        place: &str,
    ) -> Result<InviteOutcome> {
        let numbers = self.normalizer.normalize_all(raw_numbers).map_err(|e| {
            warn!("Rejecting invitation batch from {}: {}", inviter, e);
            e
        })?;

        info!(
            "Inviting {} recipient(s) to {} on behalf of {}",
            numbers.len(),
            place,
            inviter
        );

        let callback_url = self.callbacks.invitation(inviter, place);
        let dispatches = raw_numbers.iter().zip(numbers).map(|(raw, number)| {
            let callback_url = callback_url.as_str();
            async move {
                let outcome = self.dispatcher.dispatch(&number, callback_url).await;
                CallResult::new(raw.clone(), number, outcome)
            }
        });

        let results = join_all(dispatches).await;
        let (queued, failed): (Vec<CallResult>, Vec<CallResult>) =
            results.into_iter().partition(CallResult::is_queued);

        info!(
            "Invitation batch done: {} queued, {} failed",
            queued.len(),
            failed.len()
        );

        if let Err(e) = self.record_sent(inviter, place, &queued).await {
            error!(
                "Failed to record {} sent invitation(s), continuing: {}",
                queued.len(),
                e
            );
        }

        Ok(InviteOutcome { queued, failed })
    }

    async fn record_sent(&self, inviter: &str, place: &str, queued: &[CallResult]) -> Result<()> {
        if queued.is_empty() {
            return Ok(());
        }

        let records = try_join_all(queued.iter().filter_map(|result| {
            let call_id = result.call_id()?.to_string();
            Some(async move {
                let phone_hash = self.hasher.hash(&result.parsed_number).await?;
                Ok::<_, DomainError>(InvitationRecord::sent(
                    call_id,
                    phone_hash,
                    inviter.to_string(),
                    place.to_string(),
                ))
            })
        }))
        .await?;

        self.repository.bulk_insert(records).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dispatch::provider::{
        MockOutboundCallProvider, OutboundCallProvider, PlaceCall, PlacedCall, ProviderError,
    };
    use crate::domain::dispatch::CallOutcome;
    use crate::domain::invitation::repository::MockInvitationRepository;
    use crate::domain::invitation::ResponseState;
    use crate::infrastructure::persistence::memory::InMemoryInvitationRepository;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Provider that answers per destination number, with an optional delay
    #[derive(Default)]
    struct ScriptedProvider {
        answers: HashMap<String, (Duration, std::result::Result<PlacedCall, ProviderError>)>,
        placed: Mutex<Vec<PlaceCall>>,
    }

    impl ScriptedProvider {
        fn answer(
            mut self,
            e164: &str,
            delay_ms: u64,
            answer: std::result::Result<PlacedCall, ProviderError>,
        ) -> Self {
            self.answers
                .insert(e164.to_string(), (Duration::from_millis(delay_ms), answer));
            self
        }
    }

    #[async_trait]
    impl OutboundCallProvider for ScriptedProvider {
        async fn place(&self, request: PlaceCall) -> std::result::Result<PlacedCall, ProviderError> {
            self.placed.lock().unwrap().push(request.clone());
            let (delay, answer) = self
                .answers
                .get(request.to.as_str())
                .cloned()
                .unwrap_or((Duration::ZERO, Ok(PlacedCall::accepted("default"))));
            tokio::time::sleep(delay).await;
            answer
        }
    }

    fn workflow(
        provider: Arc<dyn OutboundCallProvider>,
        repository: Arc<dyn InvitationRepository>,
    ) -> BatchInviteWorkflow {
        BatchInviteWorkflow::new(
            NumberNormalizer::default(),
            Arc::new(CallDispatcher::new(provider, "+358900000000")),
            CallbackUrls::new("https://twiml.example.com").unwrap(),
            repository,
            PhoneHasher::new(4 /* bcrypt minimum cost */),
        )
    }

    fn numbers(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_single_number_queued() {
        let provider = Arc::new(
            ScriptedProvider::default().answer("+358401234567", 0, Ok(PlacedCall::accepted("abc"))),
        );
        let repository = Arc::new(InMemoryInvitationRepository::new());
        let workflow = workflow(provider.clone(), repository.clone());

        let outcome = workflow
            .invite_all(&numbers(&["0401234567"]), "Ann", "Cafe")
            .await
            .unwrap();

        assert!(outcome.failed.is_empty());
        assert_eq!(outcome.queued.len(), 1);
        let queued = &outcome.queued[0];
        assert_eq!(queued.number, "0401234567");
        assert_eq!(queued.parsed_number.as_str(), "+358401234567");
        assert_eq!(queued.call_id(), Some("abc"));

        let placed = provider.placed.lock().unwrap().clone();
        assert_eq!(placed.len(), 1);
        assert_eq!(
            placed[0].callback_url,
            "https://twiml.example.com/twiml/come-bontho?name=Ann&place=Cafe"
        );

        let record = repository.find_by_call_id("abc").await.unwrap().unwrap();
        assert_eq!(record.inviter, "Ann");
        assert_eq!(record.place, "Cafe");
        assert_eq!(record.response, ResponseState::NoResponseYet);
        assert!(!record.phone_hash.contains("401234567"));
    }

    #[tokio::test]
    async fn test_invalid_number_dispatches_nothing() {
        let mut provider = MockOutboundCallProvider::new();
        provider.expect_place().never();
        let mut repository = MockInvitationRepository::new();
        repository.expect_bulk_insert().never();

        let workflow = workflow(Arc::new(provider), Arc::new(repository));
        let err = workflow
            .invite_all(&numbers(&["0401234567", "not-a-number", "0507654321"]), "Ann", "Cafe")
            .await
            .unwrap_err();

        assert_eq!(err, DomainError::invalid_number("not-a-number"));
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_every_number() {
        let provider = Arc::new(
            ScriptedProvider::default()
                .answer("+358401234567", 30, Ok(PlacedCall::accepted("call-1")))
                .answer(
                    "+358507654321",
                    0,
                    Err(ProviderError::Transport("timed out".to_string())),
                )
                .answer(
                    "+358451112222",
                    10,
                    Ok(PlacedCall {
                        call_id: "call-3".to_string(),
                        error_code: Some(13224),
                        error_message: Some("Invalid destination".to_string()),
                    }),
                )
                .answer("+358443334444", 5, Ok(PlacedCall::accepted("call-4"))),
        );
        let repository = Arc::new(InMemoryInvitationRepository::new());
        let workflow = workflow(provider, repository.clone());

        let raw = numbers(&["040 123 4567", "0507654321", "045 111 2222", "0443334444"]);
        let outcome = workflow.invite_all(&raw, "Ann", "Cafe").await.unwrap();

        assert_eq!(outcome.len(), raw.len());
        let mut seen: Vec<&str> = outcome
            .queued
            .iter()
            .chain(outcome.failed.iter())
            .map(|r| r.number.as_str())
            .collect();
        seen.sort_unstable();
        let mut expected: Vec<&str> = raw.iter().map(String::as_str).collect();
        expected.sort_unstable();
        assert_eq!(seen, expected);

        let queued_ids: Vec<&str> = outcome.queued.iter().filter_map(CallResult::call_id).collect();
        assert_eq!(queued_ids, vec!["call-1", "call-4"]);

        assert_eq!(outcome.failed.len(), 2);
        assert!(outcome
            .failed
            .iter()
            .all(|r| matches!(r.outcome, CallOutcome::Failed { .. })));
        let reasons: Vec<&str> = outcome.failed.iter().filter_map(CallResult::failure_reason).collect();
        assert!(reasons.iter().any(|r| r.contains("timed out")));
        assert!(reasons.iter().any(|r| r.contains("Invalid destination")));

        // Only queued calls are recorded
        assert_eq!(repository.len().await, 2);
        assert!(repository.find_by_call_id("call-3").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_dispatches_run_concurrently() {
        let provider = Arc::new(
            ScriptedProvider::default()
                .answer("+358401234567", 200, Ok(PlacedCall::accepted("a")))
                .answer("+358507654321", 200, Ok(PlacedCall::accepted("b")))
                .answer("+358451112222", 200, Ok(PlacedCall::accepted("c"))),
        );
        let workflow = workflow(provider, Arc::new(InMemoryInvitationRepository::new()));

        let started = std::time::Instant::now();
        let outcome = workflow
            .invite_all(&numbers(&["0401234567", "0507654321", "0451112222"]), "Ann", "Cafe")
            .await
            .unwrap();

        assert_eq!(outcome.queued.len(), 3);
        assert!(started.elapsed() < Duration::from_millis(550));
    }

    #[tokio::test]
    async fn test_persistence_failure_is_swallowed() {
        let provider = Arc::new(
            ScriptedProvider::default().answer("+358401234567", 0, Ok(PlacedCall::accepted("abc"))),
        );
        let mut repository = MockInvitationRepository::new();
        repository
            .expect_bulk_insert()
            .times(1)
            .returning(|_| Err(DomainError::Persistence("connection reset".to_string())));

        let workflow = workflow(provider, Arc::new(repository));
        let outcome = workflow
            .invite_all(&numbers(&["0401234567"]), "Ann", "Cafe")
            .await
            .unwrap();

        assert_eq!(outcome.queued.len(), 1);
        assert!(outcome.failed.is_empty());
    }

    #[tokio::test]
    async fn test_all_failed_writes_nothing() {
        let provider = Arc::new(ScriptedProvider::default().answer(
            "+358401234567",
            0,
            Err(ProviderError::Rejected {
                status: 401,
                code: Some(20003),
                message: "Authenticate".to_string(),
            }),
        ));
        let mut repository = MockInvitationRepository::new();
        repository.expect_bulk_insert().never();

        let workflow = workflow(provider, Arc::new(repository));
        let outcome = workflow
            .invite_all(&numbers(&["0401234567"]), "Ann", "Cafe")
            .await
            .unwrap();

        assert!(outcome.queued.is_empty());
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].parsed_number.as_str(), "+358401234567");
    }

    #[tokio::test]
    async fn test_bulk_insert_receives_all_queued() {
        let provider = Arc::new(ScriptedProvider::default());
        let mut repository = MockInvitationRepository::new();
        repository
            .expect_bulk_insert()
            .times(1)
            .withf(|records| {
                records.len() == 2
                    && records.iter().all(|r| r.inviter == "Ann" && r.place == "Cafe")
                    && records.iter().all(|r| r.response == ResponseState::NoResponseYet)
            })
            .returning(|_| Ok(()));

        let workflow = workflow(provider, Arc::new(repository));
        let outcome = workflow
            .invite_all(&numbers(&["0401234567", "0507654321"]), "Ann", "Cafe")
            .await
            .unwrap();

        assert_eq!(outcome.queued.len(), 2);
    }
}
