use crate::models::{TaskName, UnknownTask};
use axum::http::StatusCode;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// Rejects a date that is not a `YYYY-MM-DD` calendar date.
    pub fn invalid_date(value: &str) -> Self {
        Self::bad_request(format!("invalid date '{value}', expected YYYY-MM-DD"))
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

/// Task names come from the client, so an unknown one is a bad request.
impl From<UnknownTask> for AppError {
    fn from(err: UnknownTask) -> Self {
        Self::bad_request(format!(
            "{err}, expected one of: {}",
            TaskName::ALL.map(TaskName::label).join(", ")
        ))
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
