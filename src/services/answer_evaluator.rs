use crate::models::session::Session;

pub struct AnswerEvaluator;

impl AnswerEvaluator {
    /// Exact integer match. No tolerance and no partial credit.
    pub fn evaluate(session: &Session, user_answer: i64) -> bool {
        user_answer == session.correct_answer
    }
}
