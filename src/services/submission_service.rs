use crate::error::{Error, Result};
use crate::models::submission::{NewSubmission, Submission};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use std::sync::RwLock;
use uuid::Uuid;

/// Persists answer attempts. The session is assumed to exist; callers check first.
#[async_trait]
pub trait SubmissionRecorder: Send + Sync {
    async fn record(&self, submission: NewSubmission) -> Result<Submission>;
}

#[derive(Clone)]
pub struct PgSubmissionRecorder {
    pool: PgPool,
}

impl PgSubmissionRecorder {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionRecorder for PgSubmissionRecorder {
    async fn record(&self, submission: NewSubmission) -> Result<Submission> {
        let saved = sqlx::query_as::<_, Submission>(
            r#"
            INSERT INTO math_problem_submissions
                (id, session_id, user_answer, is_correct, feedback_text)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, session_id, user_answer, is_correct, feedback_text, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(submission.session_id)
        .bind(submission.user_answer)
        .bind(submission.is_correct)
        .bind(&submission.feedback_text)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }
}

#[derive(Default)]
pub struct InMemorySubmissionRecorder {
    submissions: RwLock<Vec<Submission>>,
}

impl InMemorySubmissionRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list_for_session(&self, session_id: Uuid) -> Result<Vec<Submission>> {
        let all = self
            .submissions
            .read()
            .map_err(|e| Error::Store(e.to_string()))?;
        Ok(all
            .iter()
            .filter(|s| s.session_id == session_id)
            .cloned()
            .collect())
    }

    pub fn len(&self) -> Result<usize> {
        self.submissions
            .read()
            .map(|s| s.len())
            .map_err(|e| Error::Store(e.to_string()))
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl SubmissionRecorder for InMemorySubmissionRecorder {
    async fn record(&self, submission: NewSubmission) -> Result<Submission> {
        let saved = Submission {
            id: Uuid::new_v4(),
            session_id: submission.session_id,
            user_answer: submission.user_answer,
            is_correct: submission.is_correct,
            feedback_text: submission.feedback_text,
            created_at: Utc::now(),
        };

        self.submissions
            .write()
            .map_err(|e| Error::Store(e.to_string()))?
            .push(saved.clone());
        Ok(saved)
    }
}
