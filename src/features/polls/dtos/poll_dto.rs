use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::polls::models::{winning_choice, Choice, Poll, PollWithChoices};
use crate::features::polls::policy;

/// Top-voted choice of an expired poll
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WinningChoiceDto {
    pub id: i64,
    pub choice_text: String,
    pub votes: i32,
}

impl From<&Choice> for WinningChoiceDto {
    fn from(c: &Choice) -> Self {
        Self {
            id: c.id,
            choice_text: c.choice_text.clone(),
            votes: c.votes,
        }
    }
}

/// One row of the poll listing
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PollSummaryDto {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub created_at: NaiveDate,
    pub expiry: NaiveDate,
    pub is_expired: bool,
    pub days_left: i64,
    /// Present only once the poll has expired
    pub winner: Option<WinningChoiceDto>,
}

impl PollSummaryDto {
    /// `choices` are only consulted for expired polls
    pub fn new(poll: Poll, choices: &[Choice], today: NaiveDate) -> Self {
        let is_expired = poll.is_expired(today);
        let winner = if is_expired {
            winning_choice(choices).map(WinningChoiceDto::from)
        } else {
            None
        };

        Self {
            id: poll.id,
            title: poll.title,
            description: poll.description,
            created_at: poll.created_at,
            expiry: poll.expiry,
            is_expired,
            days_left: policy::days_left(poll.expiry, today),
            winner,
        }
    }
}

/// A selectable answer on the detail page
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChoiceOptionDto {
    pub id: i64,
    pub choice_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuestionDetailDto {
    pub id: i64,
    pub text: String,
    pub choices: Vec<ChoiceOptionDto>,
}

/// Poll with its question and choices, for voting
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PollDetailDto {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub created_at: NaiveDate,
    pub expiry: NaiveDate,
    pub is_expired: bool,
    pub days_left: i64,
    pub question: Option<QuestionDetailDto>,
}

impl PollDetailDto {
    pub fn new(record: PollWithChoices, today: NaiveDate) -> Self {
        let PollWithChoices {
            poll,
            question,
            choices,
        } = record;

        let question = question.map(|q| QuestionDetailDto {
            id: q.id,
            text: q.text,
            choices: choices
                .into_iter()
                .map(|c| ChoiceOptionDto {
                    id: c.id,
                    choice_text: c.choice_text,
                })
                .collect(),
        });

        Self {
            id: poll.id,
            is_expired: poll.is_expired(today),
            days_left: policy::days_left(poll.expiry, today),
            title: poll.title,
            description: poll.description,
            created_at: poll.created_at,
            expiry: poll.expiry,
            question,
        }
    }
}

/// A choice with its tally
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChoiceResultDto {
    pub id: i64,
    pub choice_text: String,
    pub votes: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuestionResultsDto {
    pub id: i64,
    pub text: String,
    /// Ordered by votes descending, ties by id
    pub choices: Vec<ChoiceResultDto>,
}

/// Tallied results of a poll, expired or not
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PollResultsDto {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub created_at: NaiveDate,
    pub expiry: NaiveDate,
    pub is_expired: bool,
    pub total_votes: i64,
    pub question: Option<QuestionResultsDto>,
}

impl PollResultsDto {
    pub fn new(record: PollWithChoices, today: NaiveDate) -> Self {
        let total_votes = record.total_votes();
        let PollWithChoices {
            poll,
            question,
            mut choices,
        } = record;

        choices.sort_by(|a, b| b.votes.cmp(&a.votes).then_with(|| a.id.cmp(&b.id)));

        let question = question.map(|q| QuestionResultsDto {
            id: q.id,
            text: q.text,
            choices: choices
                .into_iter()
                .map(|c| ChoiceResultDto {
                    id: c.id,
                    choice_text: c.choice_text,
                    votes: c.votes,
                })
                .collect(),
        });

        Self {
            id: poll.id,
            is_expired: poll.is_expired(today),
            title: poll.title,
            description: poll.description,
            created_at: poll.created_at,
            expiry: poll.expiry,
            total_votes,
            question,
        }
    }
}
