pub mod answer_evaluator;
pub mod extraction;
pub mod feedback_service;
pub mod generation_client;
pub mod math_problem_service;
pub mod problem_service;
pub mod session_store;
pub mod submission_service;
