use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::core::error::{AppError, Result};
use crate::features::polls::models::{NewChoice, NewPoll, NewQuestion};

/// Reject strings that are empty once surrounding whitespace is removed
fn not_blank(value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("must not be blank".into());
        return Err(error);
    }
    Ok(())
}

/// Request DTO for creating a poll with its question and choices
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePollDto {
    #[validate(
        length(min = 1, max = 100, message = "Title must be 1-100 characters"),
        custom(function = "not_blank")
    )]
    pub title: String,

    /// Optional blurb shown under the title
    #[validate(length(max = 300, message = "Description must be at most 300 characters"))]
    pub description: Option<String>,

    /// Defaults to today
    pub created_at: Option<NaiveDate>,

    /// Defaults to the creation date plus the configured number of days
    pub expiry: Option<NaiveDate>,

    /// The poll's one and only question
    #[validate(nested)]
    pub question: CreateQuestionDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateQuestionDto {
    #[validate(
        length(min = 1, max = 300, message = "Question must be 1-300 characters"),
        custom(function = "not_blank")
    )]
    pub text: String,

    #[validate(
        length(min = 2, max = 10, message = "A question needs between 2 and 10 choices"),
        nested
    )]
    pub choices: Vec<CreateChoiceDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateChoiceDto {
    #[validate(
        length(min = 1, max = 200, message = "Choice must be 1-200 characters"),
        custom(function = "not_blank")
    )]
    pub choice_text: String,

    /// Initial tally, for importing existing results
    #[validate(range(min = 0, message = "Votes must not be negative"))]
    pub votes: Option<i32>,
}

impl CreatePollDto {
    /// Resolve default dates and trim text fields
    ///
    /// Fails when the default expiry falls outside the representable date range.
    pub fn into_new_poll(self, today: NaiveDate, default_expiry_days: i64) -> Result<NewPoll> {
        let created_at = self.created_at.unwrap_or(today);
        let expiry = match self.expiry {
            Some(expiry) => expiry,
            None => chrono::Duration::try_days(default_expiry_days)
                .and_then(|days| created_at.checked_add_signed(days))
                .ok_or_else(|| {
                    AppError::Validation(format!(
                        "Expiry cannot be derived from created_at {}; set it explicitly",
                        created_at
                    ))
                })?,
        };

        Ok(NewPoll {
            title: self.title.trim().to_string(),
            description: self
                .description
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
            created_at,
            expiry,
            question: NewQuestion {
                text: self.question.text.trim().to_string(),
                choices: self
                    .question
                    .choices
                    .into_iter()
                    .map(|c| NewChoice {
                        choice_text: c.choice_text.trim().to_string(),
                        votes: c.votes.unwrap_or(0),
                    })
                    .collect(),
            },
        })
    }
}
