//! JSON error bodies and the mapping from service errors to status codes.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::todo_list::services::ToDoListServiceError;
use crate::user::services::UserServiceError;
use crate::validation::ValidationErrors;

/// Value of the `WWW-Authenticate` header sent with every 401.
pub const BASIC_CHALLENGE: &str = "Basic realm=\"todo-api\"";

/// Message returned for infrastructure failures; the cause is only logged.
const INTERNAL_MESSAGE: &str = "an internal error occurred";

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Field-level failures, present on validation errors only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl ApiError {
    /// Creates an error body without field details.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }
}

/// A rejected request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field name as it appears in the request body.
    pub field: String,
    /// Reason the value was rejected.
    pub message: String,
}

/// Status code plus error body.
#[derive(Debug, Clone)]
pub struct ApiErrorResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a response from its parts.
    #[must_use]
    pub const fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }

    /// 400 for malformed input.
    #[must_use]
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiError::new(code, message))
    }

    /// 400 with one entry per rejected field.
    #[must_use]
    pub fn validation_error(errors: ValidationErrors) -> Self {
        let details = errors
            .into_violations()
            .into_iter()
            .map(|violation| FieldError {
                field: violation.field().to_owned(),
                message: violation.message().to_owned(),
            })
            .collect();
        Self::new(
            StatusCode::BAD_REQUEST,
            ApiError {
                code: "VALIDATION_ERROR".to_owned(),
                message: "request validation failed".to_owned(),
                details: Some(details),
            },
        )
    }

    /// 401 carrying a Basic challenge.
    #[must_use]
    pub fn unauthorized() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            ApiError::new("UNAUTHORIZED", "valid credentials are required"),
        )
    }

    /// 403 for authenticated callers lacking a role.
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, ApiError::new("FORBIDDEN", message))
    }

    /// 404 for missing or hidden resources.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", message))
    }

    /// 409 for optimistic concurrency failures.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::CONFLICT,
            ApiError::new("VERSION_CONFLICT", message),
        )
    }

    /// 500 with a generic message.
    #[must_use]
    pub fn internal_error() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::new("INTERNAL_ERROR", INTERNAL_MESSAGE),
        )
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        let mut response = (self.status, Json(self.error)).into_response();
        if self.status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static(BASIC_CHALLENGE),
            );
        }
        response
    }
}

impl From<ToDoListServiceError> for ApiErrorResponse {
    fn from(err: ToDoListServiceError) -> Self {
        match err {
            ToDoListServiceError::NotFound(_) | ToDoListServiceError::TaskNotFound { .. } => {
                Self::not_found(err.to_string())
            }
            ToDoListServiceError::Validation(errors) => Self::validation_error(errors),
            ToDoListServiceError::Conflict(_) => Self::conflict(err.to_string()),
            ToDoListServiceError::Repository(cause) => {
                error!(error = %cause, "to-do list storage failure");
                Self::internal_error()
            }
        }
    }
}

impl From<UserServiceError> for ApiErrorResponse {
    fn from(err: UserServiceError) -> Self {
        match err {
            UserServiceError::UserNotFound(_) => Self::not_found(err.to_string()),
            UserServiceError::Validation(errors) => Self::validation_error(errors),
            UserServiceError::InvalidCredentials => Self::unauthorized(),
            UserServiceError::Repository(_) | UserServiceError::Hashing(_) => {
                error!(error = %err, "user account failure");
                Self::internal_error()
            }
        }
    }
}

impl From<JsonRejection> for ApiErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request("INVALID_BODY", rejection.body_text())
    }
}

impl From<PathRejection> for ApiErrorResponse {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request("INVALID_PATH", rejection.body_text())
    }
}
