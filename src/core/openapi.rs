use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::polls::dtos as polls_dtos;
use crate::features::polls::handlers::{admin_handler, api_handler};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Polls (public)
        api_handler::list_polls,
        api_handler::get_poll,
        api_handler::get_results,
        api_handler::cast_vote,
        // Admin
        admin_handler::create_poll,
        admin_handler::list_polls,
        admin_handler::get_poll,
        admin_handler::delete_poll,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Polls
            polls_dtos::PollSummaryDto,
            polls_dtos::WinningChoiceDto,
            polls_dtos::PollDetailDto,
            polls_dtos::QuestionDetailDto,
            polls_dtos::ChoiceOptionDto,
            polls_dtos::PollResultsDto,
            polls_dtos::QuestionResultsDto,
            polls_dtos::ChoiceResultDto,
            polls_dtos::CastVoteDto,
            polls_dtos::VoteStatus,
            polls_dtos::VoteResponseDto,
            ApiResponse<Vec<polls_dtos::PollSummaryDto>>,
            ApiResponse<polls_dtos::PollDetailDto>,
            ApiResponse<polls_dtos::PollResultsDto>,
            ApiResponse<Vec<polls_dtos::PollResultsDto>>,
            ApiResponse<polls_dtos::VoteResponseDto>,
            // Admin
            polls_dtos::CreatePollDto,
            polls_dtos::CreateQuestionDto,
            polls_dtos::CreateChoiceDto,
        )
    ),
    tags(
        (name = "polls", description = "Poll listing, voting and results (public)"),
        (name = "admin", description = "Poll management (basic auth)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Polls API",
        version = "0.1.0",
        description = "API documentation for Polls",
    )
)]
pub struct ApiDoc;

/// Adds the HTTP basic security scheme used by the admin endpoints
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "basic_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Basic).build()),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
