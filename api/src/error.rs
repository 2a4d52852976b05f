use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub status: String,
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("document `{0}` is not open")]
    DocumentNotFound(String),
    #[error("at most {0} documents can be open at once")]
    TooManyDocuments(usize),
    #[error("could not read PDF text: {0}")]
    UnreadablePdf(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::DocumentNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::TooManyDocuments(_) => StatusCode::CONFLICT,
            ApiError::UnreadablePdf(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("worker task failed: {}", err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{}", self);
        }

        let body = ErrorResponse {
            status: "error".to_string(),
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
