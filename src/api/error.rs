use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use std::fmt;

use crate::core::DocumentError;

#[derive(Debug)]
pub struct ApiError {
    message: String,
    kind: &'static str,
    status_code: StatusCode,
}

impl ApiError {
    pub fn new(message: impl Into<String>, kind: &'static str, status_code: StatusCode) -> Self {
        ApiError {
            message: message.into(),
            kind,
            status_code,
        }
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(message, "internal", StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(message, "bad_request", StatusCode::BAD_REQUEST)
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code).json(serde_json::json!({
            "error": self.message,
            "kind": self.kind,
            "status": self.status_code.as_u16()
        }))
    }

    fn status_code(&self) -> StatusCode {
        self.status_code
    }
}

impl From<DocumentError> for ApiError {
    fn from(err: DocumentError) -> Self {
        let status_code = match err {
            DocumentError::UnsupportedDocumentType(_) => StatusCode::BAD_REQUEST,
            DocumentError::InvalidTerms(_) | DocumentError::TemplateBinding(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        ApiError::new(err.to_string(), err.kind(), status_code)
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::internal_server_error(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
