use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::dto::math_problem_dto::{
    GenerateProblemResponse, SubmitAnswerRequest, SubmitAnswerResponse,
};
use crate::error::{Error, Result};
use crate::AppState;

#[axum::debug_handler]
pub async fn generate_problem(
    State(state): State<AppState>,
) -> Result<Json<GenerateProblemResponse>> {
    tracing::info!("Generate problem request");
    let generated = state.math_problem_service.generate_problem().await?;

    Ok(Json(GenerateProblemResponse {
        id: generated.id,
        problem_text: generated.problem_text,
        success: true,
    }))
}

#[axum::debug_handler]
pub async fn submit_answer(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SubmitAnswerRequest>, JsonRejection>,
) -> Result<Json<SubmitAnswerResponse>> {
    tracing::info!("Submit answer request");
    let Json(req) = payload.map_err(|e| Error::BadRequest(e.body_text()))?;
    let (session_id, user_answer) = req.into_validated()?;

    let outcome = state
        .math_problem_service
        .submit_answer(&session_id, user_answer)
        .await?;

    Ok(Json(SubmitAnswerResponse {
        is_correct: outcome.is_correct,
        correct_answer: outcome.correct_answer,
        feedback: outcome.feedback,
        success: true,
    }))
}
