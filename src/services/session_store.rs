use crate::error::{Error, Result};
use crate::models::problem::Problem;
use crate::models::session::Session;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// Write-once storage for problem sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create(&self, problem: &Problem) -> Result<Session>;

    /// `Ok(None)` means no session has this id; any other failure is an error.
    async fn get(&self, id: Uuid) -> Result<Option<Session>>;
}

#[derive(Clone)]
pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn create(&self, problem: &Problem) -> Result<Session> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO math_problem_sessions (id, problem_text, correct_answer)
            VALUES ($1, $2, $3)
            RETURNING id, created_at, problem_text, correct_answer
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&problem.problem_text)
        .bind(problem.final_answer)
        .fetch_one(&self.pool)
        .await?;

        Ok(session)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Session>> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            SELECT id, created_at, problem_text, correct_answer
            FROM math_problem_sessions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session)
    }
}

/// Process-local store for tests and for running without a database.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize> {
        self.sessions
            .read()
            .map(|s| s.len())
            .map_err(|e| Error::Store(e.to_string()))
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, problem: &Problem) -> Result<Session> {
        let session = Session {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            problem_text: problem.problem_text.clone(),
            correct_answer: problem.final_answer,
        };

        let mut sessions = self
            .sessions
            .write()
            .map_err(|e| Error::Store(e.to_string()))?;
        sessions.insert(session.id, session.clone());
        Ok(session)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Session>> {
        let sessions = self
            .sessions
            .read()
            .map_err(|e| Error::Store(e.to_string()))?;
        Ok(sessions.get(&id).cloned())
    }
}
