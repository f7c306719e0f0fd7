//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Domain failures (malformed email or password, duplicate registration, bad credentials,
//! identity misuse) and infrastructure failures (database, hashing, token signing) all
//! flow through it, so services and handlers can use the `?` operator end to end.
//!
//! `AppError` implements `actix_web::error::ResponseError`. Client-facing failures map to
//! 400/401/404 with their message in a `{"error": ...}` body; everything else becomes a
//! 500 whose details are logged but never sent to the caller.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;

/// Message returned for both unknown emails and wrong passwords.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Message returned when registering an email that already has an account.
pub const EMAIL_ALREADY_REGISTERED: &str = "Email already registered";

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// An email or password did not have the required shape (HTTP 400).
    InvalidFormat(String),
    /// Registration attempted with an email that already belongs to a user (HTTP 400).
    EmailAlreadyRegistered,
    /// A required credential field was absent or empty (HTTP 400).
    MissingCredentials(String),
    /// Represents a client-side error due to a malformed request body (HTTP 400).
    BadRequest(String),
    /// Unknown email or wrong password. Both cases share one message (HTTP 401).
    InvalidCredentials,
    /// A bearer token failed signature or expiry checks (HTTP 401).
    InvalidToken(String),
    /// Authentication is required but missing (HTTP 401).
    Unauthorized(String),
    /// Represents a situation where a requested resource was not found (HTTP 404).
    NotFound(String),
    /// A user's identity was read before the store assigned it.
    IdentityNotSet,
    /// A user's identity was assigned a second time.
    IdentityAlreadySet,
    /// Represents an unexpected server-side error (HTTP 500).
    InternalServerError(String),
    /// Represents an error originating from database operations (HTTP 500).
    /// Wraps errors from the `sqlx` crate.
    DatabaseError(String),
    /// The process environment could not be turned into a `Config`.
    Config(String),
}

impl AppError {
    /// Whether this error is a server-side failure whose details must stay private.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            AppError::IdentityNotSet
                | AppError::IdentityAlreadySet
                | AppError::InternalServerError(_)
                | AppError::DatabaseError(_)
                | AppError::Config(_)
        )
    }

    /// The message placed in the JSON error body.
    fn public_message(&self) -> String {
        match self {
            AppError::InvalidFormat(msg)
            | AppError::MissingCredentials(msg)
            | AppError::BadRequest(msg)
            | AppError::InvalidToken(msg)
            | AppError::Unauthorized(msg)
            | AppError::NotFound(msg) => msg.clone(),
            AppError::EmailAlreadyRegistered => EMAIL_ALREADY_REGISTERED.to_string(),
            AppError::InvalidCredentials => INVALID_CREDENTIALS.to_string(),
            _ => "Internal server error".to_string(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::InvalidFormat(msg) => write!(f, "Invalid Format: {}", msg),
            AppError::EmailAlreadyRegistered => write!(f, "{}", EMAIL_ALREADY_REGISTERED),
            AppError::MissingCredentials(msg) => write!(f, "Missing Credentials: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::InvalidCredentials => write!(f, "{}", INVALID_CREDENTIALS),
            AppError::InvalidToken(msg) => write!(f, "Invalid Token: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::IdentityNotSet => write!(f, "User ID not set"),
            AppError::IdentityAlreadySet => write!(f, "User ID already set"),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::Config(msg) => write!(f, "Configuration Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Converts `AppError` variants into `HttpResponse` objects.
///
/// Internal variants are logged here, since this is the last place their
/// details are visible before being replaced by a generic message.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidFormat(_)
            | AppError::EmailAlreadyRegistered
            | AppError::MissingCredentials(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::InvalidToken(_) | AppError::Unauthorized(_) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.is_internal() {
            log::error!("{}", self);
        }
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.public_message()
        }))
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// Unique violations are reported as duplicate registrations since the only unique
/// column the application writes is the user's email.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::EmailAlreadyRegistered
            }
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

/// Converts `jsonwebtoken::errors::Error` into `AppError::InvalidToken`.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::InvalidToken(format!("Invalid token: {}", error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_error_responses() {
        let error = AppError::InvalidFormat("Invalid email format".into());
        assert_eq!(error.error_response().status(), 400);

        let error = AppError::EmailAlreadyRegistered;
        assert_eq!(error.error_response().status(), 400);

        let error = AppError::MissingCredentials("Email is required".into());
        assert_eq!(error.error_response().status(), 400);

        let error = AppError::InvalidCredentials;
        assert_eq!(error.error_response().status(), 401);

        let error = AppError::InvalidToken("Invalid token".into());
        assert_eq!(error.error_response().status(), 401);

        let error = AppError::NotFound("User not found".into());
        assert_eq!(error.error_response().status(), 404);

        let error = AppError::IdentityNotSet;
        assert_eq!(error.error_response().status(), 500);

        let error = AppError::DatabaseError("connection refused".into());
        assert_eq!(error.error_response().status(), 500);
    }

    #[actix_rt::test]
    async fn test_internal_errors_do_not_leak_details() {
        let response = AppError::DatabaseError("password authentication failed".into())
            .error_response();
        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Internal server error");
    }

    #[actix_rt::test]
    async fn test_invalid_credentials_message() {
        let response = AppError::InvalidCredentials.error_response();
        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], INVALID_CREDENTIALS);
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        assert!(matches!(
            AppError::from(sqlx::Error::RowNotFound),
            AppError::NotFound(_)
        ));
    }
}
