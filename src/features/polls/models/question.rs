use sqlx::FromRow;

/// Database model for question. Each poll owns exactly one.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Question {
    pub id: i64,
    pub poll_id: i64,
    pub text: String,
}
