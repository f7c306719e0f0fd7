pub mod extractors;
pub mod middleware;
pub mod service;
pub mod token;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::UserProjection;

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use service::{AuthenticationService, RegistrationData};
pub use token::{Claims, JwtTokenService, TokenPayload, TokenService};

/// Represents the payload for a user login request.
///
/// Fields are optional so that absent and empty values get the same
/// `{"error": ...}` response instead of a deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

impl RegisterRequest {
    /// Checks that email and password were supplied, in that order.
    pub fn into_registration(self) -> Result<RegistrationData, AppError> {
        let email = required(self.email, "Email is required")?;
        let password = required(self.password, "Password is required")?;
        Ok(RegistrationData {
            email,
            password,
            name: self.name,
        })
    }
}

impl LoginRequest {
    pub fn into_credentials(self) -> Result<(String, String), AppError> {
        match (self.email, self.password) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                Ok((email, password))
            }
            _ => Err(AppError::MissingCredentials(
                "Email and password are required".into(),
            )),
        }
    }
}

fn required(value: Option<String>, message: &str) -> Result<String, AppError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::MissingCredentials(message.into()))
}

/// Response structure after successful authentication (login or registration).
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: UserProjection,
    /// The JWT (JSON Web Token) for session authentication.
    pub token: String,
}
