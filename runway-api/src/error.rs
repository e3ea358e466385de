use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use runway_pass::PassError;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    NotFoundError(String),
    /// Failure while producing a boarding pass; the cause is shown to the caller.
    GenerationError(String),
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::GenerationError(msg) => {
                tracing::error!("Boarding pass generation error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to generate boarding pass: {}", msg),
                )
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            },
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<PassError> for AppError {
    fn from(err: PassError) -> Self {
        match err {
            PassError::NotFound(_) => AppError::NotFoundError("Booking not found".to_string()),
            PassError::Storage(msg) => AppError::GenerationError(msg),
            PassError::Render(e) => AppError::GenerationError(e.to_string()),
        }
    }
}
