use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::polls::dtos::PollResultsDto;

/// Fields posted by the vote form on the detail page.
///
/// Everything is optional text: a missing or garbled field is an invalid
/// selection, not a request error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VoteForm {
    pub question_id: Option<String>,
    pub choice: Option<String>,
}

/// Request DTO for casting a vote through the JSON API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CastVoteDto {
    pub question_id: i64,
    pub choice_id: i64,
}

/// A parsed (but not yet verified) question/choice pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteSelection {
    pub question_id: i64,
    pub choice_id: i64,
}

impl VoteSelection {
    /// `None` when either field is absent or not an integer
    pub fn from_form(form: &VoteForm) -> Option<Self> {
        let question_id = form.question_id.as_deref()?.trim().parse().ok()?;
        let choice_id = form.choice.as_deref()?.trim().parse().ok()?;

        Some(Self {
            question_id,
            choice_id,
        })
    }
}

impl From<CastVoteDto> for VoteSelection {
    fn from(dto: CastVoteDto) -> Self {
        Self {
            question_id: dto.question_id,
            choice_id: dto.choice_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum VoteStatus {
    /// The vote was counted
    Accepted,
    /// The poll is closed; nothing was counted
    Expired,
}

/// Response DTO for a vote cast through the JSON API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VoteResponseDto {
    pub status: VoteStatus,
    pub results: PollResultsDto,
}
