use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppPath};
use crate::features::polls::dtos::{CreatePollDto, PollResultsDto};
use crate::features::polls::policy;
use crate::features::polls::services::PollAdminService;
use crate::shared::types::{ApiResponse, Meta};

/// Create a poll with its question and choices
#[utoipa::path(
    post,
    path = "/api/admin/polls",
    request_body = CreatePollDto,
    responses(
        (status = 201, description = "Poll created", body = ApiResponse<PollResultsDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin",
    security(
        ("basic_auth" = [])
    )
)]
pub async fn create_poll(
    State(service): State<Arc<PollAdminService>>,
    AppJson(dto): AppJson<CreatePollDto>,
) -> Result<(StatusCode, Json<ApiResponse<PollResultsDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let poll = service.create(dto, policy::today()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(poll),
            Some("Poll created".to_string()),
            None,
        )),
    ))
}

/// List all polls with their tallies
#[utoipa::path(
    get,
    path = "/api/admin/polls",
    responses(
        (status = 200, description = "List of polls", body = ApiResponse<Vec<PollResultsDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin",
    security(
        ("basic_auth" = [])
    )
)]
pub async fn list_polls(
    State(service): State<Arc<PollAdminService>>,
) -> Result<Json<ApiResponse<Vec<PollResultsDto>>>> {
    let polls = service.list(policy::today()).await?;
    let total = polls.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(polls),
        None,
        Some(Meta { total }),
    )))
}

/// Get a poll with its tallies
#[utoipa::path(
    get,
    path = "/api/admin/polls/{id}",
    params(
        ("id" = i64, Path, description = "Poll ID")
    ),
    responses(
        (status = 200, description = "Poll found", body = ApiResponse<PollResultsDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Poll not found")
    ),
    tag = "admin",
    security(
        ("basic_auth" = [])
    )
)]
pub async fn get_poll(
    State(service): State<Arc<PollAdminService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<PollResultsDto>>> {
    let poll = service.get(id, policy::today()).await?;
    Ok(Json(ApiResponse::success(Some(poll), None, None)))
}

/// Delete a poll together with its question and choices
#[utoipa::path(
    delete,
    path = "/api/admin/polls/{id}",
    params(
        ("id" = i64, Path, description = "Poll ID")
    ),
    responses(
        (status = 200, description = "Poll deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Poll not found")
    ),
    tag = "admin",
    security(
        ("basic_auth" = [])
    )
)]
pub async fn delete_poll(
    State(service): State<Arc<PollAdminService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Poll deleted".to_string()),
        None,
    )))
}

#[cfg(test)]
mod tests {
    use axum::http::{header, HeaderValue, StatusCode};
    use serde_json::{json, Value};

    use crate::features::polls::policy;
    use crate::shared::test_helpers::{admin_auth_header, test_app, SeedPoll};

    fn poll_body(title: &str, choices: &[&str]) -> Value {
        json!({
            "title": title,
            "question": {
                "text": "Tabs or spaces?",
                "choices": choices
                    .iter()
                    .map(|c| json!({ "choice_text": c }))
                    .collect::<Vec<_>>()
            }
        })
    }

    #[tokio::test]
    async fn test_admin_requires_credentials() {
        let app = test_app().await;

        let response = app.server.get("/api/admin/polls").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));

        app.server
            .get("/api/admin/polls")
            .add_header(
                header::AUTHORIZATION,
                HeaderValue::from_static("Basic d3Jvbmc6d3Jvbmc="),
            )
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        app.server
            .get("/api/admin/polls")
            .add_header(header::AUTHORIZATION, admin_auth_header())
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn test_created_poll_is_served_by_pages() {
        let app = test_app().await;

        let response = app
            .server
            .post("/api/admin/polls")
            .add_header(header::AUTHORIZATION, admin_auth_header())
            .json(&{
                let mut body = poll_body("Style Poll", &["Tabs", "Spaces"]);
                body["description"] = json!("  Settle it once and for all.  ");
                body
            })
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        let poll_id = body["data"]["id"].as_i64().unwrap();
        assert_eq!(body["data"]["total_votes"], 0);
        assert_eq!(body["data"]["description"], "Settle it once and for all.");
        assert_eq!(
            body["data"]["expiry"],
            (policy::today() + chrono::Duration::days(3)).to_string()
        );

        // Visible on the public pages straight away
        let page = app.server.get(&format!("/{}/", poll_id)).await;
        page.assert_status_ok();
        assert!(page.text().contains("Tabs or spaces?"));
        assert!(page.text().contains("Settle it once and for all."));
    }

    #[tokio::test]
    async fn test_create_poll_validation() {
        let app = test_app().await;

        let invalid = [
            poll_body("   ", &["Tabs", "Spaces"]),
            poll_body("Style Poll", &["Tabs"]),
            poll_body("Style Poll", &["Tabs", ""]),
        ];

        for body in invalid {
            app.server
                .post("/api/admin/polls")
                .add_header(header::AUTHORIZATION, admin_auth_header())
                .json(&body)
                .await
                .assert_status(StatusCode::BAD_REQUEST);
        }

        let response = app
            .server
            .get("/api/admin/polls")
            .add_header(header::AUTHORIZATION, admin_auth_header())
            .await;
        let body: Value = response.json();
        assert_eq!(body["meta"]["total"], 0);
    }

    #[tokio::test]
    async fn test_unrepresentable_default_expiry_rejected() {
        let app = test_app().await;

        let mut body = poll_body("Far Future", &["Tabs", "Spaces"]);
        body["created_at"] = json!(chrono::NaiveDate::MAX);
        let response = app
            .server
            .post("/api/admin/polls")
            .add_header(header::AUTHORIZATION, admin_auth_header())
            .json(&body)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let error: Value = response.json();
        assert_eq!(error["success"], false);

        // Same start date with an explicit expiry is fine
        body["expiry"] = json!(chrono::NaiveDate::MAX);
        app.server
            .post("/api/admin/polls")
            .add_header(header::AUTHORIZATION, admin_auth_header())
            .json(&body)
            .await
            .assert_status(StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_delete_poll_cascades() {
        let app = test_app().await;
        let seeded = app
            .seed(SeedPoll::new("Doomed Poll", policy::today()).choices(&[("A", 1), ("B", 1)]))
            .await;
        let path = format!("/api/admin/polls/{}", seeded.poll.id);

        app.server
            .get(&path)
            .add_header(header::AUTHORIZATION, admin_auth_header())
            .await
            .assert_status_ok();

        app.server
            .delete(&path)
            .add_header(header::AUTHORIZATION, admin_auth_header())
            .await
            .assert_status_ok();

        app.server
            .delete(&path)
            .add_header(header::AUTHORIZATION, admin_auth_header())
            .await
            .assert_status_not_found();

        app.server
            .get(&format!("/{}/", seeded.poll.id))
            .await
            .assert_status_not_found();
        assert!(app.votes(seeded.poll.id).await.is_empty());
    }
}
