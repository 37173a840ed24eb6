use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Provider call failed: {0}")]
    ProviderCall(String),

    #[error("Malformed provider response: {0}")]
    MalformedProviderResponse(String),

    #[error("Invalid problem structure: {0}")]
    InvalidProblemStructure(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::BadRequest(_) | Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::SessionNotFound(_) => StatusCode::NOT_FOUND,
            Error::MalformedProviderResponse(_) | Error::InvalidProblemStructure(_) => {
                StatusCode::BAD_GATEWAY
            }
            Error::Config(_)
            | Error::ProviderCall(_)
            | Error::Database(_)
            | Error::Store(_)
            | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the caller. Provider and storage details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            Error::BadRequest(msg) => msg.clone(),
            Error::Validation(err) => err.to_string(),
            Error::SessionNotFound(_) => "Session not found".to_string(),
            Error::Config(_) => "Server configuration error".to_string(),
            Error::MalformedProviderResponse(_) | Error::InvalidProblemStructure(_) => {
                "AI service error".to_string()
            }
            Error::ProviderCall(_) | Error::Database(_) | Error::Store(_) | Error::Internal(_) => {
                "Internal server error".to_string()
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }

        let body = Json(json!({ "error": self.public_message(), "success": false }));
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Error::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_each_failure_class_to_its_status() {
        let cases = [
            (Error::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (Error::SessionNotFound("x".into()), StatusCode::NOT_FOUND),
            (Error::Config("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (Error::ProviderCall("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (Error::MalformedProviderResponse("x".into()), StatusCode::BAD_GATEWAY),
            (Error::InvalidProblemStructure("x".into()), StatusCode::BAD_GATEWAY),
            (Error::Store("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (Error::Database(sqlx::Error::RowNotFound), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            assert_eq!(err.status(), expected, "{err}");
        }
    }

    #[test]
    fn server_errors_do_not_leak_details() {
        let err = Error::ProviderCall("HTTP 403: key=secret".into());
        assert_eq!(err.public_message(), "Internal server error");

        let err = Error::Config("GOOGLE_API_KEY is not configured".into());
        assert_eq!(err.public_message(), "Server configuration error");
    }
}
