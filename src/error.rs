//! Error types for Shelfdesk

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::models::EntityKind;

/// Application error codes reported in every error body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    NotLoggedIn = 2,
    InvalidMember = 3,
    NoSuchBook = 4,
    NoSuchMember = 5,
    NoSuchTransaction = 6,
    NoCopiesAvailable = 8,
    BadValue = 9,
    FixtureFailure = 10,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// The selected member does not exist or is inactive
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// No session member; the caller should log in and come back to `redirect`
    #[error("Login required")]
    LoginRequired { redirect: String },

    #[error("{0} not found")]
    NotFound(EntityKind),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    #[error("Fixture load failed: {0}")]
    FixtureLoad(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
    /// Where the client should go next (set for login-required errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

impl AppError {
    /// Short user-facing message, the text shown in a transient notification
    pub fn user_message(&self) -> String {
        match self {
            AppError::Authentication(msg)
            | AppError::Validation(msg)
            | AppError::BusinessRule(msg) => msg.clone(),
            AppError::NotFound(kind) => format!("{} not found", kind),
            AppError::LoginRequired { .. } => "Please select a member first".to_string(),
            AppError::FixtureLoad(_) => "Catalog data could not be loaded".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }

    fn code(&self) -> ErrorCode {
        match self {
            AppError::Authentication(_) => ErrorCode::InvalidMember,
            AppError::LoginRequired { .. } => ErrorCode::NotLoggedIn,
            AppError::NotFound(EntityKind::Book) => ErrorCode::NoSuchBook,
            AppError::NotFound(EntityKind::Member) => ErrorCode::NoSuchMember,
            AppError::NotFound(EntityKind::Transaction) => ErrorCode::NoSuchTransaction,
            AppError::Validation(_) => ErrorCode::BadValue,
            AppError::BusinessRule(_) => ErrorCode::NoCopiesAvailable,
            AppError::FixtureLoad(_) => ErrorCode::FixtureFailure,
            AppError::Internal(_) => ErrorCode::Failure,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Authentication(_) => StatusCode::UNAUTHORIZED,
            AppError::LoginRequired { .. } => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::BusinessRule(_) => StatusCode::CONFLICT,
            AppError::FixtureLoad(msg) => {
                tracing::error!("Fixture load error: {}", msg);
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let code = self.code();
        let redirect = match &self {
            AppError::LoginRequired { redirect } => Some(redirect.clone()),
            _ => None,
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message: self.user_message(),
            redirect,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
