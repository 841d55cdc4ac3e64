use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::polls::models::{Choice, NewPoll, Poll, PollWithChoices, Question};
use crate::features::polls::store::PollStore;

/// Convert database error to more specific AppError with user-friendly messages
fn handle_db_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        // Unique constraint violation (PostgreSQL error code 23505)
        if db_err.code() == Some(std::borrow::Cow::Borrowed("23505")) {
            if db_err.constraint() == Some("questions_poll_id_unique") {
                return AppError::Conflict("Poll already has a question.".to_string());
            }
            return AppError::Conflict("Record already exists.".to_string());
        }

        // Check constraint violation (23514): blank text or negative votes
        if db_err.code() == Some(std::borrow::Cow::Borrowed("23514")) {
            return AppError::Validation(format!("Rejected by database: {}", db_err.message()));
        }

        // Foreign key violation (23503)
        if db_err.code() == Some(std::borrow::Cow::Borrowed("23503")) {
            return AppError::BadRequest("Referenced record does not exist.".to_string());
        }
    }

    AppError::Database(e)
}

/// PostgreSQL-backed poll storage
pub struct PgPollStore {
    pool: PgPool,
}

impl PgPollStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PollStore for PgPollStore {
    async fn list_polls(&self) -> Result<Vec<Poll>> {
        sqlx::query_as::<_, Poll>(
            r#"
            SELECT id, title, description, created_at, expiry
            FROM polls
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list polls: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find_poll(&self, poll_id: i64) -> Result<Option<Poll>> {
        sqlx::query_as::<_, Poll>(
            r#"
            SELECT id, title, description, created_at, expiry
            FROM polls
            WHERE id = $1
            "#,
        )
        .bind(poll_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get poll {}: {:?}", poll_id, e);
            AppError::Database(e)
        })
    }

    async fn find_question(&self, poll_id: i64) -> Result<Option<Question>> {
        sqlx::query_as::<_, Question>(
            r#"
            SELECT id, poll_id, text
            FROM questions
            WHERE poll_id = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(poll_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get question for poll {}: {:?}", poll_id, e);
            AppError::Database(e)
        })
    }

    async fn list_choices(&self, question_id: i64) -> Result<Vec<Choice>> {
        sqlx::query_as::<_, Choice>(
            r#"
            SELECT id, question_id, choice_text, votes
            FROM choices
            WHERE question_id = $1
            ORDER BY id
            "#,
        )
        .bind(question_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(
                "Failed to list choices for question {}: {:?}",
                question_id,
                e
            );
            AppError::Database(e)
        })
    }

    async fn increment_votes(
        &self,
        poll_id: i64,
        question_id: i64,
        choice_id: i64,
    ) -> Result<Option<Choice>> {
        // One statement: the row lock taken by UPDATE serializes concurrent voters
        sqlx::query_as::<_, Choice>(
            r#"
            UPDATE choices AS c
            SET votes = c.votes + 1
            FROM questions AS q
            WHERE c.id = $3
              AND c.question_id = q.id
              AND q.id = $2
              AND q.poll_id = $1
            RETURNING c.id, c.question_id, c.choice_text, c.votes
            "#,
        )
        .bind(poll_id)
        .bind(question_id)
        .bind(choice_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to record vote for choice {}: {:?}", choice_id, e);
            AppError::Database(e)
        })
    }

    async fn create_poll(&self, new_poll: NewPoll) -> Result<PollWithChoices> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let poll = sqlx::query_as::<_, Poll>(
            r#"
            INSERT INTO polls (title, description, created_at, expiry)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, created_at, expiry
            "#,
        )
        .bind(&new_poll.title)
        .bind(&new_poll.description)
        .bind(new_poll.created_at)
        .bind(new_poll.expiry)
        .fetch_one(&mut *tx)
        .await
        .map_err(handle_db_error)?;

        let question = sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions (poll_id, text)
            VALUES ($1, $2)
            RETURNING id, poll_id, text
            "#,
        )
        .bind(poll.id)
        .bind(&new_poll.question.text)
        .fetch_one(&mut *tx)
        .await
        .map_err(handle_db_error)?;

        let mut choices = Vec::with_capacity(new_poll.question.choices.len());
        for new_choice in &new_poll.question.choices {
            let choice = sqlx::query_as::<_, Choice>(
                r#"
                INSERT INTO choices (question_id, choice_text, votes)
                VALUES ($1, $2, $3)
                RETURNING id, question_id, choice_text, votes
                "#,
            )
            .bind(question.id)
            .bind(&new_choice.choice_text)
            .bind(new_choice.votes)
            .fetch_one(&mut *tx)
            .await
            .map_err(handle_db_error)?;
            choices.push(choice);
        }

        tx.commit().await.map_err(AppError::Database)?;

        Ok(PollWithChoices {
            poll,
            question: Some(question),
            choices,
        })
    }

    async fn delete_poll(&self, poll_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM polls WHERE id = $1")
            .bind(poll_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete poll {}: {:?}", poll_id, e);
                AppError::Database(e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
