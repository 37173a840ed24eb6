use crate::error::{Error, Result};
use crate::models::submission::NewSubmission;
use crate::services::answer_evaluator::AnswerEvaluator;
use crate::services::feedback_service::FeedbackGenerator;
use crate::services::generation_client::GenerationClient;
use crate::services::problem_service::ProblemGenerator;
use crate::services::session_store::SessionStore;
use crate::services::submission_service::SubmissionRecorder;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// What the learner gets back from generation. The answer is intentionally absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedProblem {
    pub id: Uuid,
    pub problem_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerOutcome {
    pub is_correct: bool,
    pub correct_answer: i64,
    pub feedback: String,
}

/// Sequences provider and store calls for the problem → session → submission lifecycle.
/// Failures are returned as-is; nothing is retried or rolled back.
#[derive(Clone)]
pub struct MathProblemService {
    problems: ProblemGenerator,
    feedback: FeedbackGenerator,
    sessions: Arc<dyn SessionStore>,
    submissions: Arc<dyn SubmissionRecorder>,
}

impl MathProblemService {
    pub fn new(
        client: Arc<dyn GenerationClient>,
        sessions: Arc<dyn SessionStore>,
        submissions: Arc<dyn SubmissionRecorder>,
    ) -> Self {
        Self {
            problems: ProblemGenerator::new(client.clone()),
            feedback: FeedbackGenerator::new(client),
            sessions,
            submissions,
        }
    }

    pub async fn generate_problem(&self) -> Result<GeneratedProblem> {
        let problem = self.problems.generate().await?;
        let session = self.sessions.create(&problem).await?;
        tracing::info!(session_id = %session.id, "Math problem session created");

        Ok(GeneratedProblem {
            id: session.id,
            problem_text: session.problem_text,
        })
    }

    pub async fn submit_answer(&self, session_id: &str, user_answer: i64) -> Result<AnswerOutcome> {
        // An id that is not a UUID cannot name a stored session.
        let id = Uuid::parse_str(session_id.trim())
            .map_err(|_| Error::SessionNotFound(session_id.to_string()))?;

        let session = self
            .sessions
            .get(id)
            .await?
            .ok_or_else(|| Error::SessionNotFound(session_id.to_string()))?;

        let is_correct = AnswerEvaluator::evaluate(&session, user_answer);
        let feedback = self
            .feedback
            .generate(
                &session.problem_text,
                session.correct_answer,
                user_answer,
                is_correct,
            )
            .await?;

        let submission = self
            .submissions
            .record(NewSubmission {
                session_id: session.id,
                user_answer,
                is_correct,
                feedback_text: feedback.clone(),
            })
            .await?;
        tracing::info!(
            session_id = %session.id,
            submission_id = %submission.id,
            is_correct,
            "Answer submission recorded"
        );

        Ok(AnswerOutcome {
            is_correct,
            correct_answer: session.correct_answer,
            feedback,
        })
    }
}
