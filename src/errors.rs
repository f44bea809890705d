use axum::http::StatusCode;
use thiserror::Error;

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

impl From<SubmissionError> for AppError {
    fn from(err: SubmissionError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<CalendarError> for AppError {
    fn from(err: CalendarError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

/// Rejections raised by the submission recorder. Nothing is mutated when one is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("task is required")]
    EmptyTask,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalendarError {
    #[error("invalid month {0}, expected 1-12")]
    InvalidMonth(u32),
    #[error("year {0} is out of range")]
    YearOutOfRange(i32),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid day key '{0}'")]
pub struct ParseDayKeyError(pub String);
