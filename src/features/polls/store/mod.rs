//! Storage seam for polls.
//!
//! [`PgPollStore`] is the durable backend. [`MemoryPollStore`] keeps everything
//! in process and backs local demos and the HTTP tests. Both apply vote
//! increments atomically, so concurrent voters never lose updates.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::polls::models::{Choice, NewPoll, Poll, PollWithChoices, Question};

pub use memory::MemoryPollStore;
pub use postgres::PgPollStore;

#[async_trait]
pub trait PollStore: Send + Sync {
    /// All polls ordered by id
    async fn list_polls(&self) -> Result<Vec<Poll>>;

    async fn find_poll(&self, poll_id: i64) -> Result<Option<Poll>>;

    /// The question owned by a poll, if one was created
    async fn find_question(&self, poll_id: i64) -> Result<Option<Question>>;

    /// Choices of a question ordered by id
    async fn list_choices(&self, question_id: i64) -> Result<Vec<Choice>>;

    /// Add one vote to `choice_id` in a single atomic step.
    ///
    /// The increment only happens when the choice belongs to `question_id` and
    /// that question belongs to `poll_id`. Returns the updated choice, or `None`
    /// when the chain does not match and nothing was written.
    async fn increment_votes(
        &self,
        poll_id: i64,
        question_id: i64,
        choice_id: i64,
    ) -> Result<Option<Choice>>;

    /// Insert a poll, its question and choices as one unit
    async fn create_poll(&self, new_poll: NewPoll) -> Result<PollWithChoices>;

    /// Delete a poll and, by cascade, its question and choices.
    /// Returns false when the poll did not exist.
    async fn delete_poll(&self, poll_id: i64) -> Result<bool>;

    /// Poll with its question and choices
    async fn load_poll(&self, poll_id: i64) -> Result<Option<PollWithChoices>> {
        let Some(poll) = self.find_poll(poll_id).await? else {
            return Ok(None);
        };

        let question = self.find_question(poll.id).await?;
        let choices = match &question {
            Some(q) => self.list_choices(q.id).await?,
            None => Vec::new(),
        };

        Ok(Some(PollWithChoices {
            poll,
            question,
            choices,
        }))
    }
}
