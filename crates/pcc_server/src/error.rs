//! Error responses.
//!
//! Every failure is rendered as `{"error": "<message>"}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use pcc_core::pipeline::PipelineError;
use pcc_core::topics::TopicStoreError;
use pcc_core::{CoreError, ErrorKind};

#[derive(Debug)]
pub enum AppError {
    Core(CoreError),
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Core(e) => match e.kind() {
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::InvalidArgument | ErrorKind::Conflict => StatusCode::BAD_REQUEST,
                ErrorKind::StorageFailure | ErrorKind::MalformedData => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CoreError> for AppError {
    fn from(e: CoreError) -> Self {
        AppError::Core(e)
    }
}

impl From<TopicStoreError> for AppError {
    fn from(e: TopicStoreError) -> Self {
        AppError::Core(e.into())
    }
}

impl From<PipelineError> for AppError {
    fn from(e: PipelineError) -> Self {
        AppError::Core(e.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            AppError::Core(e) => e.to_string(),
            AppError::NotFound(msg) | AppError::BadRequest(msg) | AppError::Internal(msg) => msg,
        };

        if status.is_server_error() {
            tracing::error!("{} {}", status.as_u16(), error_message);
        }

        let body = Json(serde_json::json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
