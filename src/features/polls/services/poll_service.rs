use std::sync::Arc;

use chrono::NaiveDate;

use crate::core::error::{AppError, Result};
use crate::features::polls::dtos::{PollDetailDto, PollResultsDto, PollSummaryDto};
use crate::features::polls::models::PollWithChoices;
use crate::features::polls::store::PollStore;

/// Read paths: listing, detail and results
pub struct PollService {
    store: Arc<dyn PollStore>,
}

impl PollService {
    pub fn new(store: Arc<dyn PollStore>) -> Self {
        Self { store }
    }

    /// All polls, with the winning choice filled in for expired ones
    pub async fn list(&self, today: NaiveDate) -> Result<Vec<PollSummaryDto>> {
        let polls = self.store.list_polls().await?;

        let mut summaries = Vec::with_capacity(polls.len());
        for poll in polls {
            // Only expired polls show a winner, so skip the choice lookup otherwise
            let choices = if poll.is_expired(today) {
                match self.store.find_question(poll.id).await? {
                    Some(question) => self.store.list_choices(question.id).await?,
                    None => Vec::new(),
                }
            } else {
                Vec::new()
            };

            summaries.push(PollSummaryDto::new(poll, &choices, today));
        }

        Ok(summaries)
    }

    /// `NotFound` unless the poll exists
    pub async fn ensure_exists(&self, poll_id: i64) -> Result<()> {
        self.store
            .find_poll(poll_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Poll {} not found", poll_id)))
    }

    pub async fn detail(&self, poll_id: i64, today: NaiveDate) -> Result<PollDetailDto> {
        let record = self.load(poll_id).await?;
        Ok(PollDetailDto::new(record, today))
    }

    pub async fn results(&self, poll_id: i64, today: NaiveDate) -> Result<PollResultsDto> {
        let record = self.load(poll_id).await?;
        Ok(PollResultsDto::new(record, today))
    }

    async fn load(&self, poll_id: i64) -> Result<PollWithChoices> {
        self.store
            .load_poll(poll_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Poll {} not found", poll_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::polls::store::MemoryPollStore;
    use crate::shared::test_helpers::{seed_poll, SeedPoll};
    use chrono::Duration;

    #[tokio::test]
    async fn test_list_marks_winner_for_expired_only() {
        let store = Arc::new(MemoryPollStore::new());
        let today = NaiveDate::from_ymd_opt(2025, 5, 20).unwrap();

        seed_poll(
            store.as_ref(),
            SeedPoll::new("Active Poll", today + Duration::days(1))
                .choices(&[("A", 0), ("B", 2)]),
        )
        .await;
        seed_poll(
            store.as_ref(),
            SeedPoll::new("Expired Poll", today - Duration::days(1))
                .choices(&[("X", 5), ("Y", 1)]),
        )
        .await;

        let service = PollService::new(store);
        let polls = service.list(today).await.unwrap();

        assert_eq!(polls.len(), 2);
        assert_eq!(polls[0].title, "Active Poll");
        assert!(polls[0].winner.is_none());
        assert_eq!(polls[1].title, "Expired Poll");
        let winner = polls[1].winner.as_ref().unwrap();
        assert_eq!(winner.choice_text, "X");
        assert_eq!(winner.votes, 5);
    }

    #[tokio::test]
    async fn test_missing_poll_is_not_found() {
        let service = PollService::new(Arc::new(MemoryPollStore::new()));
        let today = NaiveDate::from_ymd_opt(2025, 5, 20).unwrap();

        assert!(matches!(
            service.detail(42, today).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.results(42, today).await,
            Err(AppError::NotFound(_))
        ));
    }
}
