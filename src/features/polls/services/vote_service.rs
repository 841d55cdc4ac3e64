use std::sync::Arc;

use chrono::NaiveDate;

use crate::core::error::{AppError, Result};
use crate::features::polls::dtos::VoteSelection;
use crate::features::polls::models::Choice;
use crate::features::polls::store::PollStore;

/// What happened to a submitted vote
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
    /// Counted; carries the choice with its new tally
    Accepted(Choice),
    /// The poll is past its expiry date; nothing was counted
    PollExpired,
    /// Missing, malformed or mismatched question/choice; nothing was counted
    InvalidSelection,
}

/// The vote transaction
pub struct VoteService {
    store: Arc<dyn PollStore>,
}

impl VoteService {
    pub fn new(store: Arc<dyn PollStore>) -> Self {
        Self { store }
    }

    /// Apply one vote to a poll.
    ///
    /// `selection` is `None` when the submitted fields could not be parsed.
    /// Fails only with `NotFound` (unknown poll) or a storage error; every
    /// other rejection is reported through [`VoteOutcome`].
    pub async fn cast(
        &self,
        poll_id: i64,
        selection: Option<VoteSelection>,
        today: NaiveDate,
    ) -> Result<VoteOutcome> {
        let poll = self
            .store
            .find_poll(poll_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Poll {} not found", poll_id)))?;

        // Expiry wins over a bad selection
        if poll.is_expired(today) {
            tracing::info!("Vote blocked: poll {} expired on {}", poll.id, poll.expiry);
            return Ok(VoteOutcome::PollExpired);
        }

        let Some(selection) = selection else {
            tracing::debug!("Invalid selection on poll {}: unparsable fields", poll.id);
            return Ok(VoteOutcome::InvalidSelection);
        };

        match self
            .store
            .increment_votes(poll.id, selection.question_id, selection.choice_id)
            .await?
        {
            Some(choice) => {
                tracing::info!(
                    "Vote accepted: poll={}, choice={}, votes={}",
                    poll.id,
                    choice.id,
                    choice.votes
                );
                Ok(VoteOutcome::Accepted(choice))
            }
            None => {
                tracing::debug!(
                    "Invalid selection on poll {}: question={}, choice={}",
                    poll.id,
                    selection.question_id,
                    selection.choice_id
                );
                Ok(VoteOutcome::InvalidSelection)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::polls::store::MemoryPollStore;
    use crate::shared::test_helpers::{seed_poll, SeedPoll};
    use chrono::Duration;
    use tokio_test::assert_ok;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 14).unwrap()
    }

    async fn votes_of(store: &MemoryPollStore, question_id: i64) -> Vec<i32> {
        store
            .list_choices(question_id)
            .await
            .unwrap()
            .iter()
            .map(|c| c.votes)
            .collect()
    }

    #[tokio::test]
    async fn test_valid_vote_increments_only_selected_choice() {
        let store = Arc::new(MemoryPollStore::new());
        let seeded = seed_poll(
            store.as_ref(),
            SeedPoll::new("Active Poll", today() + Duration::days(1))
                .choices(&[("A", 0), ("B", 2)]),
        )
        .await;
        let service = VoteService::new(store.clone());

        let selection = VoteSelection {
            question_id: seeded.question_id(),
            choice_id: seeded.choice_id(0),
        };
        let outcome = assert_ok!(service.cast(seeded.poll.id, Some(selection), today()).await);

        match outcome {
            VoteOutcome::Accepted(choice) => assert_eq!(choice.votes, 1),
            other => panic!("expected accepted vote, got {:?}", other),
        }
        assert_eq!(votes_of(&store, seeded.question_id()).await, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_vote_on_expiry_day_is_accepted() {
        let store = Arc::new(MemoryPollStore::new());
        let seeded = seed_poll(
            store.as_ref(),
            SeedPoll::new("Last Day", today()).choices(&[("A", 0), ("B", 0)]),
        )
        .await;
        let service = VoteService::new(store.clone());

        let selection = VoteSelection {
            question_id: seeded.question_id(),
            choice_id: seeded.choice_id(1),
        };
        let outcome = service
            .cast(seeded.poll.id, Some(selection), today())
            .await
            .unwrap();
        assert!(matches!(outcome, VoteOutcome::Accepted(_)));
    }

    #[tokio::test]
    async fn test_expired_poll_blocks_even_invalid_selection() {
        let store = Arc::new(MemoryPollStore::new());
        let seeded = seed_poll(
            store.as_ref(),
            SeedPoll::new("Expired Poll", today() - Duration::days(1))
                .choices(&[("X", 5), ("Y", 1)]),
        )
        .await;
        let service = VoteService::new(store.clone());

        let valid = VoteSelection {
            question_id: seeded.question_id(),
            choice_id: seeded.choice_id(0),
        };
        let outcome = service
            .cast(seeded.poll.id, Some(valid), today())
            .await
            .unwrap();
        assert_eq!(outcome, VoteOutcome::PollExpired);

        let outcome = service.cast(seeded.poll.id, None, today()).await.unwrap();
        assert_eq!(outcome, VoteOutcome::PollExpired);

        assert_eq!(votes_of(&store, seeded.question_id()).await, vec![5, 1]);
    }

    #[tokio::test]
    async fn test_mismatched_selection_is_invalid() {
        let store = Arc::new(MemoryPollStore::new());
        let target = seed_poll(
            store.as_ref(),
            SeedPoll::new("Target", today() + Duration::days(3)).choices(&[("A", 0), ("B", 0)]),
        )
        .await;
        let other = seed_poll(
            store.as_ref(),
            SeedPoll::new("Other", today() + Duration::days(3)).choices(&[("C", 0), ("D", 0)]),
        )
        .await;
        let service = VoteService::new(store.clone());

        let cases = [
            // Choice from another poll
            Some(VoteSelection {
                question_id: target.question_id(),
                choice_id: other.choice_id(0),
            }),
            // Question from another poll
            Some(VoteSelection {
                question_id: other.question_id(),
                choice_id: other.choice_id(0),
            }),
            // Nothing parsable
            None,
        ];

        for selection in cases {
            let outcome = service
                .cast(target.poll.id, selection, today())
                .await
                .unwrap();
            assert_eq!(outcome, VoteOutcome::InvalidSelection);
        }

        assert_eq!(votes_of(&store, target.question_id()).await, vec![0, 0]);
        assert_eq!(votes_of(&store, other.question_id()).await, vec![0, 0]);
    }

    #[tokio::test]
    async fn test_unknown_poll_is_not_found() {
        let service = VoteService::new(Arc::new(MemoryPollStore::new()));
        let result = service.cast(999, None, today()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_votes_all_counted() {
        let store = Arc::new(MemoryPollStore::new());
        let seeded = seed_poll(
            store.as_ref(),
            SeedPoll::new("Busy", today() + Duration::days(1)).choices(&[("A", 0), ("B", 0)]),
        )
        .await;
        let service = Arc::new(VoteService::new(store.clone()));
        let selection = VoteSelection {
            question_id: seeded.question_id(),
            choice_id: seeded.choice_id(1),
        };

        const VOTERS: usize = 100;
        let poll_id = seeded.poll.id;
        let tasks: Vec<_> = (0..VOTERS)
            .map(|_| {
                let service = Arc::clone(&service);
                tokio::spawn(async move { service.cast(poll_id, Some(selection), today()).await })
            })
            .collect();

        for handle in futures::future::join_all(tasks).await {
            let outcome = handle.expect("vote task panicked");
            assert!(matches!(outcome, Ok(VoteOutcome::Accepted(_))));
        }
        assert_eq!(
            votes_of(&store, seeded.question_id()).await,
            vec![0, VOTERS as i32]
        );
    }
}
