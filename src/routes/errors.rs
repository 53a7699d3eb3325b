use actix_web::http::StatusCode;
use actix_web::{
    web,
    HttpResponse,
    ResponseError,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::domain::MalformedInput;
use crate::store::StoreError;

/// A request field rejected by validation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, error: MalformedInput) -> Self {
        Self {
            field,
            message: error.to_string(),
        }
    }
}

/// Error inside route handler
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("Invalid request: {0}")]
    InvalidPayload(String),
    #[error("Invalid fields: {0:?}")]
    Validation(Vec<FieldError>),
    #[error("{0}")]
    Conflict(&'static str),
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{message}: {source}")]
    Internal {
        message: &'static str,
        #[source]
        source: StoreError,
    },
}

impl RouteError {
    /// Wraps a storage failure; only `message` is shown to the caller.
    pub fn internal(message: &'static str) -> impl FnOnce(StoreError) -> RouteError {
        move |source| {
            tracing::error!(error.cause_chain = ?source, "{}", message);
            RouteError::Internal { message, source }
        }
    }
}

impl ResponseError for RouteError {
    fn status_code(&self) -> StatusCode {
        match self {
            RouteError::InvalidPayload(_) | RouteError::Validation(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            RouteError::Conflict(_) => StatusCode::BAD_REQUEST,
            RouteError::NotFound(_) => StatusCode::NOT_FOUND,
            RouteError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let detail = match self {
            RouteError::InvalidPayload(message) => json!(message),
            RouteError::Validation(errors) => json!(errors),
            RouteError::Conflict(message)
            | RouteError::NotFound(message)
            | RouteError::Internal { message, .. } => json!(message),
        };
        HttpResponse::build(self.status_code()).json(json!({ "detail": detail }))
    }
}

/// Body decoding failures are reported like field validation failures.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|error, _request| RouteError::InvalidPayload(error.to_string()).into())
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|error, _request| RouteError::InvalidPayload(error.to_string()).into())
}
