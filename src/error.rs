//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Every handler, the auth gate and the store implementations return it, and it is
//! translated into an HTTP response exactly once, at the actix boundary.
//!
//! `AppError` implements `actix_web::error::ResponseError`. The body sent to the client is
//! always a fixed, client-safe message for authentication, authorization and server-side
//! failures; the detail carried by `Unauthorized` and `InternalError` is only logged.
//! `From` implementations for `sqlx::Error`, `validator::ValidationErrors`,
//! `bcrypt::BcryptError`, `actix_web::error::BlockingError` and
//! [`TokenError`](crate::auth::token::TokenError) allow handlers to use `?` directly.

use actix_web::{error::BlockingError, error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

use crate::auth::token::TokenError;

/// Message returned for both "unknown email" and "wrong password" on login.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
/// Message returned for every rejected bearer token, whatever the cause.
pub const UNAUTHORIZED: &str = "Unauthorized";
/// Message returned when a todo does not exist or belongs to someone else.
pub const TODO_NOT_FOUND: &str = "Todo not found or unauthorized";
/// Message returned for configuration and store failures.
pub const INTERNAL: &str = "Internal server error";

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// The request body could not be deserialized into the endpoint's input shape (HTTP 400).
    BadRequest(String),
    /// The input deserialized but failed field validation (HTTP 422).
    ValidationError(String),
    /// Login failed. Unknown email and wrong password are deliberately the same variant (HTTP 401).
    InvalidCredentials,
    /// Bearer authentication failed (HTTP 401).
    /// The string is the internal reason (missing header, expired token, ...) and is never sent.
    Unauthorized(String),
    /// The todo does not exist or is not owned by the caller (HTTP 404).
    NotFoundOrUnauthorized,
    /// The resource already exists (HTTP 409).
    Conflict(String),
    /// A required setting is missing or malformed (HTTP 500 if it happens while serving).
    ConfigurationError(String),
    /// Unexpected store or runtime failure (HTTP 500). The detail is logged, not sent.
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::InvalidCredentials => write!(f, "{}", INVALID_CREDENTIALS),
            AppError::Unauthorized(reason) => write!(f, "Unauthorized: {}", reason),
            AppError::NotFoundOrUnauthorized => write!(f, "{}", TODO_NOT_FOUND),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::ConfigurationError(msg) => write!(f, "Configuration Error: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// The message placed in the `error` field of the JSON response body.
    pub fn public_message(&self) -> String {
        match self {
            AppError::BadRequest(msg) | AppError::ValidationError(msg) | AppError::Conflict(msg) => {
                msg.clone()
            }
            AppError::InvalidCredentials => INVALID_CREDENTIALS.to_string(),
            AppError::Unauthorized(_) => UNAUTHORIZED.to_string(),
            AppError::NotFoundOrUnauthorized => TODO_NOT_FOUND.to_string(),
            AppError::ConfigurationError(_) | AppError::InternalError(_) => INTERNAL.to_string(),
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidCredentials | AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFoundOrUnauthorized => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::ConfigurationError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            log::error!("{}", self);
        }
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.public_message()
        }))
    }
}

/// All store failures surface as internal errors; row-not-found is handled by the
/// store through `fetch_optional`, never through this conversion.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        AppError::InternalError(format!("Database error: {}", error))
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(error: sqlx::migrate::MigrateError) -> AppError {
        AppError::InternalError(format!("Migration failed: {}", error))
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`.
///
/// The detailed validation messages are preserved.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalError(format!("Password hashing failed: {}", error))
    }
}

impl From<BlockingError> for AppError {
    fn from(error: BlockingError) -> AppError {
        AppError::InternalError(format!("Blocking task failed: {}", error))
    }
}

/// A missing secret is a configuration problem; anything else about a token is an
/// authentication failure.
impl From<TokenError> for AppError {
    fn from(error: TokenError) -> AppError {
        match error {
            TokenError::MissingSecret => {
                AppError::ConfigurationError("TOKEN_SECRET is not set".into())
            }
            TokenError::InvalidToken(reason) => AppError::Unauthorized(reason),
        }
    }
}
