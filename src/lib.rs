pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::services::{
    generation_client::{GeminiClient, GenerationClient},
    math_problem_service::MathProblemService,
    session_store::{InMemorySessionStore, PgSessionStore, SessionStore},
    submission_service::{InMemorySubmissionRecorder, PgSubmissionRecorder, SubmissionRecorder},
};
use reqwest::Client;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub math_problem_service: MathProblemService,
    pub has_api_key: bool,
}

impl AppState {
    /// Builds the single generation client for the process and the stores. Without a
    /// pool the stores live in memory; `database::pool::connect_store` decides whether
    /// that is allowed.
    pub fn new(config: &Config, pool: Option<PgPool>) -> Result<Self> {
        let http_client = Client::builder()
            .build()
            .map_err(|e| Error::Internal(format!("Failed to build HTTP client: {}", e)))?;
        let generation_client: Arc<dyn GenerationClient> =
            Arc::new(GeminiClient::from_config(config, http_client));

        let (sessions, submissions): (Arc<dyn SessionStore>, Arc<dyn SubmissionRecorder>) =
            match pool {
                Some(pool) => (
                    Arc::new(PgSessionStore::new(pool.clone())),
                    Arc::new(PgSubmissionRecorder::new(pool)),
                ),
                None => (
                    Arc::new(InMemorySessionStore::new()),
                    Arc::new(InMemorySubmissionRecorder::new()),
                ),
            };

        Ok(Self::from_parts(config, generation_client, sessions, submissions))
    }

    pub fn from_parts(
        config: &Config,
        generation_client: Arc<dyn GenerationClient>,
        sessions: Arc<dyn SessionStore>,
        submissions: Arc<dyn SubmissionRecorder>,
    ) -> Self {
        Self {
            math_problem_service: MathProblemService::new(generation_client, sessions, submissions),
            has_api_key: config.has_api_key(),
        }
    }
}
