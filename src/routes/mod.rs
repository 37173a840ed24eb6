pub mod health;
pub mod math_problem;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/math-problem",
            get(health::math_problem_health).post(math_problem::generate_problem),
        )
        .route("/api/math-problem/submit", post(math_problem::submit_answer))
        .with_state(state)
}
