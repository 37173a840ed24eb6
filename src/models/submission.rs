use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Submission {
    pub id: Uuid,
    pub session_id: Uuid,
    pub user_answer: i64,
    pub is_correct: bool,
    pub feedback_text: String,
    pub created_at: DateTime<Utc>,
}

/// Fields of a submission the caller supplies; id and timestamp come from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
    pub session_id: Uuid,
    pub user_answer: i64,
    pub is_correct: bool,
    pub feedback_text: String,
}
