use std::sync::Arc;

use axum::{
    middleware::from_fn,
    routing::{any, get, post},
    Router,
};

use super::handlers::{
    admin_handler,
    api_handler::{self, VoteApiState},
    page_handler::{self, PollPagesState},
};
use super::services::{PollAdminService, PollService, VoteService};
use crate::core::middleware::basic_auth_middleware;
use crate::shared::constants::ADMIN_REALM;

/// Server-rendered pages (public)
pub fn page_routes(polls: Arc<PollService>, votes: Arc<VoteService>) -> Router {
    let state = PollPagesState { polls, votes };

    Router::new()
        .route("/", get(page_handler::index))
        .route("/{poll_id}/", get(page_handler::detail))
        // Every method is accepted; non-POST requests bounce back to the detail page
        .route("/{poll_id}/vote/", any(page_handler::vote))
        .route("/{poll_id}/results/", get(page_handler::results))
        .with_state(state)
}

/// Public JSON API
pub fn api_routes(polls: Arc<PollService>, votes: Arc<VoteService>) -> Router {
    let vote_state = VoteApiState {
        polls: Arc::clone(&polls),
        votes,
    };

    let read_routes = Router::new()
        .route("/api/polls", get(api_handler::list_polls))
        .route("/api/polls/{id}", get(api_handler::get_poll))
        .route("/api/polls/{id}/results", get(api_handler::get_results))
        .with_state(polls);

    let vote_routes = Router::new()
        .route("/api/polls/{id}/votes", post(api_handler::cast_vote))
        .with_state(vote_state);

    read_routes.merge(vote_routes)
}

/// Poll management, guarded by HTTP basic auth
pub fn admin_routes(service: Arc<PollAdminService>, credentials: Arc<String>) -> Router {
    Router::new()
        .route(
            "/api/admin/polls",
            get(admin_handler::list_polls).post(admin_handler::create_poll),
        )
        .route(
            "/api/admin/polls/{id}",
            get(admin_handler::get_poll).delete(admin_handler::delete_poll),
        )
        .route_layer(from_fn(basic_auth_middleware(credentials, ADMIN_REALM)))
        .with_state(service)
}
