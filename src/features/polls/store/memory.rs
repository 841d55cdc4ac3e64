use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::core::error::{AppError, Result};
use crate::features::polls::models::{Choice, NewPoll, Poll, PollWithChoices, Question};
use crate::features::polls::store::PollStore;

#[derive(Debug, Default)]
struct Tables {
    polls: BTreeMap<i64, Poll>,
    questions: BTreeMap<i64, Question>,
    choices: BTreeMap<i64, Choice>,
    last_poll_id: i64,
    last_question_id: i64,
    last_choice_id: i64,
}

impl Tables {
    fn question_of(&self, poll_id: i64) -> Option<&Question> {
        self.questions.values().find(|q| q.poll_id == poll_id)
    }
}

/// In-process poll storage.
///
/// Every mutation takes the write lock, which makes a vote increment a single
/// indivisible step for concurrent callers.
#[derive(Debug, Default)]
pub struct MemoryPollStore {
    tables: RwLock<Tables>,
}

impl MemoryPollStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PollStore for MemoryPollStore {
    async fn list_polls(&self) -> Result<Vec<Poll>> {
        let tables = self.tables.read().await;
        Ok(tables.polls.values().cloned().collect())
    }

    async fn find_poll(&self, poll_id: i64) -> Result<Option<Poll>> {
        let tables = self.tables.read().await;
        Ok(tables.polls.get(&poll_id).cloned())
    }

    async fn find_question(&self, poll_id: i64) -> Result<Option<Question>> {
        let tables = self.tables.read().await;
        Ok(tables.question_of(poll_id).cloned())
    }

    async fn list_choices(&self, question_id: i64) -> Result<Vec<Choice>> {
        let tables = self.tables.read().await;
        Ok(tables
            .choices
            .values()
            .filter(|c| c.question_id == question_id)
            .cloned()
            .collect())
    }

    async fn increment_votes(
        &self,
        poll_id: i64,
        question_id: i64,
        choice_id: i64,
    ) -> Result<Option<Choice>> {
        let mut tables = self.tables.write().await;

        let question_matches = tables
            .questions
            .get(&question_id)
            .is_some_and(|q| q.poll_id == poll_id);
        if !question_matches {
            return Ok(None);
        }

        let Some(choice) = tables
            .choices
            .get_mut(&choice_id)
            .filter(|c| c.question_id == question_id)
        else {
            return Ok(None);
        };

        choice.votes = choice.votes.checked_add(1).ok_or_else(|| {
            AppError::Internal(format!("Vote counter overflow on choice {}", choice_id))
        })?;

        Ok(Some(choice.clone()))
    }

    async fn create_poll(&self, new_poll: NewPoll) -> Result<PollWithChoices> {
        if new_poll.question.choices.iter().any(|c| c.votes < 0) {
            return Err(AppError::Validation(
                "Vote counts must not be negative".to_string(),
            ));
        }

        let mut tables = self.tables.write().await;

        tables.last_poll_id += 1;
        let poll = Poll {
            id: tables.last_poll_id,
            title: new_poll.title,
            description: new_poll.description,
            created_at: new_poll.created_at,
            expiry: new_poll.expiry,
        };

        tables.last_question_id += 1;
        let question = Question {
            id: tables.last_question_id,
            poll_id: poll.id,
            text: new_poll.question.text,
        };

        let mut choices = Vec::with_capacity(new_poll.question.choices.len());
        for new_choice in new_poll.question.choices {
            tables.last_choice_id += 1;
            choices.push(Choice {
                id: tables.last_choice_id,
                question_id: question.id,
                choice_text: new_choice.choice_text,
                votes: new_choice.votes,
            });
        }

        tables.polls.insert(poll.id, poll.clone());
        tables.questions.insert(question.id, question.clone());
        for choice in &choices {
            tables.choices.insert(choice.id, choice.clone());
        }

        Ok(PollWithChoices {
            poll,
            question: Some(question),
            choices,
        })
    }

    async fn delete_poll(&self, poll_id: i64) -> Result<bool> {
        let mut tables = self.tables.write().await;

        if tables.polls.remove(&poll_id).is_none() {
            return Ok(false);
        }

        let question_ids: Vec<i64> = tables
            .questions
            .values()
            .filter(|q| q.poll_id == poll_id)
            .map(|q| q.id)
            .collect();

        tables.questions.retain(|_, q| q.poll_id != poll_id);
        tables
            .choices
            .retain(|_, c| !question_ids.contains(&c.question_id));

        Ok(true)
    }
}
