use chrono::NaiveDate;
use sqlx::FromRow;

use crate::features::polls::models::{Choice, Question};
use crate::features::polls::policy;

/// Database model for poll
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Poll {
    pub id: i64,
    pub title: String,
    /// Free-form blurb shown under the title; empty when not set
    pub description: String,
    pub created_at: NaiveDate,
    pub expiry: NaiveDate,
}

impl Poll {
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        policy::is_expired(self.expiry, today)
    }
}

/// A poll loaded together with its question and that question's choices.
///
/// Choices are ordered by id.
#[derive(Debug, Clone)]
pub struct PollWithChoices {
    pub poll: Poll,
    pub question: Option<Question>,
    pub choices: Vec<Choice>,
}

impl PollWithChoices {
    pub fn total_votes(&self) -> i64 {
        self.choices.iter().map(|c| i64::from(c.votes)).sum()
    }
}

/// Data for creating a new poll with its single question
#[derive(Debug, Clone)]
pub struct NewPoll {
    pub title: String,
    pub description: String,
    pub created_at: NaiveDate,
    pub expiry: NaiveDate,
    pub question: NewQuestion,
}

#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub text: String,
    pub choices: Vec<NewChoice>,
}

#[derive(Debug, Clone)]
pub struct NewChoice {
    pub choice_text: String,
    pub votes: i32,
}
