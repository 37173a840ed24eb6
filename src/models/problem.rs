use serde::{Deserialize, Serialize};

/// A generated problem before it is stored. The answer never leaves the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub problem_text: String,
    pub final_answer: i64,
}
