use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppPath};
use crate::features::polls::dtos::{
    CastVoteDto, PollDetailDto, PollResultsDto, PollSummaryDto, VoteResponseDto, VoteStatus,
};
use crate::features::polls::policy;
use crate::features::polls::services::{PollService, VoteOutcome, VoteService};
use crate::shared::constants::INVALID_SELECTION_MESSAGE;
use crate::shared::types::{ApiResponse, Meta};

/// State for the JSON vote endpoint
#[derive(Clone)]
pub struct VoteApiState {
    pub polls: Arc<PollService>,
    pub votes: Arc<VoteService>,
}

/// List all polls
///
/// Expired polls carry their winning choice.
#[utoipa::path(
    get,
    path = "/api/polls",
    responses(
        (status = 200, description = "List of polls", body = ApiResponse<Vec<PollSummaryDto>>)
    ),
    tag = "polls"
)]
pub async fn list_polls(
    State(service): State<Arc<PollService>>,
) -> Result<Json<ApiResponse<Vec<PollSummaryDto>>>> {
    let polls = service.list(policy::today()).await?;
    let total = polls.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(polls),
        None,
        Some(Meta { total }),
    )))
}

/// Get a poll with its question and choices
#[utoipa::path(
    get,
    path = "/api/polls/{id}",
    params(
        ("id" = i64, Path, description = "Poll ID")
    ),
    responses(
        (status = 200, description = "Poll found", body = ApiResponse<PollDetailDto>),
        (status = 404, description = "Poll not found")
    ),
    tag = "polls"
)]
pub async fn get_poll(
    State(service): State<Arc<PollService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<PollDetailDto>>> {
    let poll = service.detail(id, policy::today()).await?;
    Ok(Json(ApiResponse::success(Some(poll), None, None)))
}

/// Get the tallied results of a poll
#[utoipa::path(
    get,
    path = "/api/polls/{id}/results",
    params(
        ("id" = i64, Path, description = "Poll ID")
    ),
    responses(
        (status = 200, description = "Poll results", body = ApiResponse<PollResultsDto>),
        (status = 404, description = "Poll not found")
    ),
    tag = "polls"
)]
pub async fn get_results(
    State(service): State<Arc<PollService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<PollResultsDto>>> {
    let results = service.results(id, policy::today()).await?;
    Ok(Json(ApiResponse::success(Some(results), None, None)))
}

/// Cast a vote
///
/// A vote on an expired poll is not counted; the response reports status
/// `expired` with the unchanged results.
#[utoipa::path(
    post,
    path = "/api/polls/{id}/votes",
    params(
        ("id" = i64, Path, description = "Poll ID")
    ),
    request_body = CastVoteDto,
    responses(
        (status = 200, description = "Vote processed", body = ApiResponse<VoteResponseDto>),
        (status = 400, description = "Invalid question or choice"),
        (status = 404, description = "Poll not found")
    ),
    tag = "polls"
)]
pub async fn cast_vote(
    State(state): State<VoteApiState>,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<CastVoteDto>,
) -> Result<Json<ApiResponse<VoteResponseDto>>> {
    let today = policy::today();

    let (status, message) = match state.votes.cast(id, Some(dto.into()), today).await? {
        VoteOutcome::Accepted(_) => (VoteStatus::Accepted, "Vote recorded"),
        VoteOutcome::PollExpired => (VoteStatus::Expired, "Voting on this poll is closed"),
        VoteOutcome::InvalidSelection => {
            return Err(AppError::BadRequest(INVALID_SELECTION_MESSAGE.to_string()));
        }
    };

    let results = state.polls.results(id, today).await?;
    Ok(Json(ApiResponse::success(
        Some(VoteResponseDto { status, results }),
        Some(message.to_string()),
        None,
    )))
}
