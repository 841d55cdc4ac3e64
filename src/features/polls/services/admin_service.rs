use std::sync::Arc;

use chrono::NaiveDate;

use crate::core::error::{AppError, Result};
use crate::features::polls::dtos::{CreatePollDto, PollResultsDto};
use crate::features::polls::store::PollStore;

/// Administrative poll management
pub struct PollAdminService {
    store: Arc<dyn PollStore>,
    default_expiry_days: i64,
}

impl PollAdminService {
    pub fn new(store: Arc<dyn PollStore>, default_expiry_days: i64) -> Self {
        Self {
            store,
            default_expiry_days,
        }
    }

    /// Create a poll with exactly one question and its choices
    pub async fn create(&self, dto: CreatePollDto, today: NaiveDate) -> Result<PollResultsDto> {
        let new_poll = dto.into_new_poll(today, self.default_expiry_days)?;
        let record = self.store.create_poll(new_poll).await?;

        tracing::info!(
            "Poll created: id={}, title={:?}, expiry={}, choices={}",
            record.poll.id,
            record.poll.title,
            record.poll.expiry,
            record.choices.len()
        );

        Ok(PollResultsDto::new(record, today))
    }

    /// Every poll with its question and current tallies
    pub async fn list(&self, today: NaiveDate) -> Result<Vec<PollResultsDto>> {
        let polls = self.store.list_polls().await?;

        let mut items = Vec::with_capacity(polls.len());
        for poll in polls {
            if let Some(record) = self.store.load_poll(poll.id).await? {
                items.push(PollResultsDto::new(record, today));
            }
        }

        Ok(items)
    }

    pub async fn get(&self, poll_id: i64, today: NaiveDate) -> Result<PollResultsDto> {
        let record = self
            .store
            .load_poll(poll_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Poll {} not found", poll_id)))?;

        Ok(PollResultsDto::new(record, today))
    }

    /// Delete a poll together with its question and choices
    pub async fn delete(&self, poll_id: i64) -> Result<()> {
        if !self.store.delete_poll(poll_id).await? {
            return Err(AppError::NotFound(format!("Poll {} not found", poll_id)));
        }

        tracing::info!("Poll deleted: id={}", poll_id);
        Ok(())
    }
}
