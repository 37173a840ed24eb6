use crate::error::{Error, Result};
use crate::services::extraction::whole_number;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateProblemResponse {
    pub id: uuid::Uuid,
    pub problem_text: String,
    pub success: bool,
}

/// Raw submit body. Fields stay loose so bad input becomes a 400 with a clear message.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitAnswerRequest {
    #[validate(
        required(message = "Session ID is required"),
        length(min = 1, message = "Session ID is required")
    )]
    pub session_id: Option<String>,
    pub user_answer: Option<JsonValue>,
}

impl SubmitAnswerRequest {
    /// Checks the body and returns `(session_id, user_answer)`.
    pub fn into_validated(self) -> Result<(String, i64)> {
        self.validate()?;

        let session_id = self
            .session_id
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::BadRequest("Session ID is required".to_string()))?;

        let user_answer = match self.user_answer {
            Some(value) if value.is_number() => whole_number(&value).ok_or_else(|| {
                Error::BadRequest("User answer must be a whole number".to_string())
            })?,
            _ => return Err(Error::BadRequest("User answer must be a number".to_string())),
        };

        Ok((session_id, user_answer))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitAnswerResponse {
    pub is_correct: bool,
    pub correct_answer: i64,
    pub feedback: String,
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(rename = "hasApiKey")]
    pub has_api_key: bool,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}
