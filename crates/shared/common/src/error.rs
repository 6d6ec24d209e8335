//! Unified error handling for services and HTTP.
//!
//! Rule violations travel as [`DomainError`] inside [`AppError::Rule`], so
//! callers can still match on the activity and reason code. At the HTTP edge
//! the error is rendered as a JSON body with a status picked from the reason.

use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::{Activity, DomainError, ErrorReason};
use serde::Serialize;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    /// Business rule violation
    #[error(transparent)]
    Rule(#[from] DomainError),

    /// Request did not say which user it acts for
    #[error("Acting user required")]
    MissingActingUser,

    // Validation
    #[error("{0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body for HTTP
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    activity: Option<Activity>,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Rule(e) => e.reason.code(),
            AppError::MissingActingUser => "MISSING_ACTING_USER",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Rule(e) => match e.reason {
                ErrorReason::NotFound | ErrorReason::UserNotAssignedToThisAccount => {
                    StatusCode::NOT_FOUND
                }
                ErrorReason::NotOwner => StatusCode::FORBIDDEN,
                ErrorReason::UserPersonalIdNotUnique
                | ErrorReason::AccountNameNotUnique
                | ErrorReason::NotActive
                | ErrorReason::UserAlreadyAssignedToThisAccount => StatusCode::CONFLICT,
                ErrorReason::CannotAddOwnerAsUser => StatusCode::UNPROCESSABLE_ENTITY,
            },
            AppError::MissingActingUser => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }

    /// The rule violation carried by this error, if any
    pub fn domain(&self) -> Option<&DomainError> {
        match self {
            AppError::Rule(e) => Some(e),
            _ => None,
        }
    }

    /// Reason code of the carried rule violation
    pub fn reason(&self) -> Option<ErrorReason> {
        self.domain().map(|e| e.reason)
    }
}

// =============================================================================
// HTTP Response (Axum)
// =============================================================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
                activity: self.domain().map(|e| e.activity),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::from_rejection(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::from_rejection(rejection.status(), rejection.body_text())
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn rule(activity: Activity, reason: ErrorReason) -> Self {
        AppError::Rule(DomainError::new(activity, reason))
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// Map an extractor rejection. Server-side rejections (a route wired
    /// without the parameters its handler extracts) are internal errors.
    pub fn from_rejection(status: StatusCode, detail: impl Into<String>) -> Self {
        if status.is_server_error() {
            AppError::internal(detail)
        } else {
            AppError::bad_request(detail)
        }
    }
}
