//! Response types and error handling for API endpoints
//!
//! Every response body, success or failure, uses the same envelope:
//! `{success, message?, data?, pagination?, errors?, field?}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use directory_core::FieldError;
use directory_service::dto::PaginationMeta;
use directory_service::{ServiceError, ServiceResult};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// API error type for consistent error responses
#[derive(Debug, Error)]
pub enum ApiError {
    /// Service failure without operation context
    #[error("{0}")]
    Service(#[from] ServiceError),

    /// Service failure raised while performing a named operation
    #[error("{operation}: {source}")]
    Operation {
        operation: &'static str,
        #[source]
        source: ServiceError,
    },

    #[error("Invalid user ID format")]
    InvalidId,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Service(e) | Self::Operation { source: e, .. } => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::InvalidId | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get error code for logs
    #[must_use]
    pub fn error_code(&self) -> &str {
        match self {
            Self::Service(e) | Self::Operation { source: e, .. } => e.error_code(),
            Self::InvalidId => "INVALID_ID",
            Self::InvalidBody(_) => "INVALID_BODY",
        }
    }

    /// Create an invalid body error
    pub fn invalid_body(msg: impl Into<String>) -> Self {
        Self::InvalidBody(msg.into())
    }

    /// Human-readable message placed in the envelope
    ///
    /// Server-side failures only name the operation that failed; caller
    /// mistakes describe the mistake.
    fn public_message(&self) -> String {
        match self {
            Self::Operation { operation, source } if source.is_server_error() => {
                (*operation).to_string()
            }
            Self::Service(e) | Self::Operation { source: e, .. } => match e {
                ServiceError::NotFound { resource, .. } => format!("{resource} not found"),
                ServiceError::Validation(_) => "Validation error".to_string(),
                ServiceError::DuplicateEmail => e.to_string(),
                ServiceError::Domain(_) | ServiceError::Internal(_) => {
                    "Internal server error".to_string()
                }
            },
            Self::InvalidId => "Invalid user ID format".to_string(),
            Self::InvalidBody(_) => "Invalid request body".to_string(),
        }
    }

    /// Failure envelope, with per-field errors or the offending field
    fn envelope(&self) -> Envelope<()> {
        let mut body = Envelope::failure(self.public_message());
        match self {
            Self::Service(e) | Self::Operation { source: e, .. } => match e {
                ServiceError::Validation(errors) => body.errors = Some(errors.clone()),
                ServiceError::DuplicateEmail => body.field = Some("email"),
                _ => {}
            },
            _ => {}
        }
        body
    }
}

/// Attach an operation name to a service result
pub trait OperationContext<T> {
    /// Name the operation so server-side failures render as e.g.
    /// "Error creating user"
    fn during(self, operation: &'static str) -> ApiResult<T>;
}

impl<T> OperationContext<T> for ServiceResult<T> {
    fn during(self, operation: &'static str) -> ApiResult<T> {
        self.map_err(|source| ApiError::Operation { operation, source })
    }
}

/// Uniform response envelope
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}

impl<T> Envelope<T> {
    /// Successful envelope around `data`
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            pagination: None,
            errors: None,
            field: None,
        }
    }

    /// Add a message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Add pagination metadata
    pub fn with_pagination(mut self, pagination: PaginationMeta) -> Self {
        self.pagination = Some(pagination);
        self
    }
}

impl Envelope<()> {
    /// Failure envelope
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            pagination: None,
            errors: None,
            field: None,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log server errors
        if status.is_server_error() {
            error!(error = %self, code = self.error_code(), "Server error occurred");
        }

        (status, self.envelope()).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

/// Created response (201) with JSON body
pub struct Created<T>(pub T);

impl<T: IntoResponse> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        let mut response = self.0.into_response();
        *response.status_mut() = StatusCode::CREATED;
        response
    }
}
