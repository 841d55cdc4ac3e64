use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, FromRequestParts, State},
    http::{request::Parts, Method, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use chrono::NaiveDate;
use minijinja::context;

use crate::core::error::AppError;
use crate::core::extractor::AppPath;
use crate::features::polls::dtos::{VoteForm, VoteSelection};
use crate::features::polls::policy;
use crate::features::polls::services::{PollService, VoteOutcome, VoteService};
use crate::shared::constants::INVALID_SELECTION_MESSAGE;
use crate::shared::templates::render_template;

/// State for the HTML pages
#[derive(Clone)]
pub struct PollPagesState {
    pub polls: Arc<PollService>,
    pub votes: Arc<VoteService>,
}

/// Served when the not-found template itself cannot be rendered
const NOT_FOUND_FALLBACK: &str =
    "<!DOCTYPE html><html><body><h1>Page not found</h1><a href=\"/\">All polls</a></body></html>";

/// Error type for the HTML pages.
///
/// Unknown polls get a rendered HTML 404; everything else falls through to
/// the JSON error envelope.
#[derive(Debug)]
pub struct PageError(AppError);

impl<E> From<E> for PageError
where
    E: Into<AppError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self.0 {
            AppError::NotFound(message) => {
                let body = render_template("not_found.html", context! { message })
                    .unwrap_or_else(|e| {
                        tracing::error!("Failed to render not-found page: {}", e);
                        NOT_FOUND_FALLBACK.to_string()
                    });
                (StatusCode::NOT_FOUND, Html(body)).into_response()
            }
            other => other.into_response(),
        }
    }
}

pub type PageResult<T> = std::result::Result<T, PageError>;

/// Poll id from the URL; an unparseable id is a page-level 404
pub struct PollId(pub i64);

impl<S> FromRequestParts<S> for PollId
where
    S: Send + Sync,
{
    type Rejection = PageError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> PageResult<Self> {
        let AppPath(poll_id) = AppPath::<i64>::from_request_parts(parts, state).await?;
        Ok(Self(poll_id))
    }
}

fn detail_path(poll_id: i64) -> String {
    format!("/{}/", poll_id)
}

fn results_path(poll_id: i64) -> String {
    format!("/{}/results/", poll_id)
}

async fn render_detail(
    polls: &PollService,
    poll_id: i64,
    error_message: Option<&str>,
    today: NaiveDate,
) -> PageResult<Html<String>> {
    let poll = polls.detail(poll_id, today).await?;
    let html = render_template("detail.html", context! { poll, error_message })?;
    Ok(Html(html))
}

/// `GET /` - every poll, with winners for expired ones
pub async fn index(State(state): State<PollPagesState>) -> PageResult<Html<String>> {
    let polls = state.polls.list(policy::today()).await?;
    let html = render_template("index.html", context! { polls })?;
    Ok(Html(html))
}

/// `GET /{poll_id}/` - question and vote form
pub async fn detail(
    State(state): State<PollPagesState>,
    PollId(poll_id): PollId,
) -> PageResult<Html<String>> {
    render_detail(&state.polls, poll_id, None, policy::today()).await
}

/// `/{poll_id}/vote/` - any method; only POST can change a tally.
///
/// Success and expired polls both redirect to the results page. An invalid
/// selection re-renders the detail page with an error instead.
pub async fn vote(
    State(state): State<PollPagesState>,
    PollId(poll_id): PollId,
    method: Method,
    form: std::result::Result<Form<VoteForm>, FormRejection>,
) -> PageResult<Response> {
    let today = policy::today();

    if method != Method::POST {
        state.polls.ensure_exists(poll_id).await?;
        return Ok(Redirect::to(&detail_path(poll_id)).into_response());
    }

    let selection = match form {
        Ok(Form(form)) => VoteSelection::from_form(&form),
        Err(rejection) => {
            tracing::debug!("Unreadable vote form for poll {}: {}", poll_id, rejection);
            None
        }
    };

    match state.votes.cast(poll_id, selection, today).await? {
        VoteOutcome::Accepted(_) | VoteOutcome::PollExpired => {
            Ok(Redirect::to(&results_path(poll_id)).into_response())
        }
        VoteOutcome::InvalidSelection => {
            render_detail(&state.polls, poll_id, Some(INVALID_SELECTION_MESSAGE), today)
                .await
                .map(IntoResponse::into_response)
        }
    }
}

/// `GET /{poll_id}/results/` - tallies, highest first
pub async fn results(
    State(state): State<PollPagesState>,
    PollId(poll_id): PollId,
) -> PageResult<Html<String>> {
    let poll = state.polls.results(poll_id, policy::today()).await?;
    let html = render_template("results.html", context! { poll })?;
    Ok(Html(html))
}
