use std::sync::Arc;

use uuid::Uuid;

use super::token::{TokenPayload, TokenService};
use super::AuthResponse;
use crate::error::AppError;
use crate::models::{User, UserProjection};
use crate::repository::UserRepository;

/// Input for a new account.
#[derive(Debug, Clone)]
pub struct RegistrationData {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

/// Orchestrates registration and login over a user store and a token issuer.
#[derive(Clone)]
pub struct AuthenticationService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenService>,
}

impl AuthenticationService {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<dyn TokenService>) -> Self {
        Self { users, tokens }
    }

    pub async fn register(&self, data: RegistrationData) -> Result<AuthResponse, AppError> {
        if self.users.find_by_email(&data.email).await?.is_some() {
            return Err(AppError::EmailAlreadyRegistered);
        }

        let mut user = User::create(&data.email, &data.password, data.name)?;
        self.users.save(&mut user).await?;
        log::info!("Registered user {} <{}>", user.id()?, user.email());

        self.issue(&user)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, AppError> {
        if email.is_empty() || password.is_empty() {
            return Err(AppError::MissingCredentials(
                "Email and password are required".into(),
            ));
        }

        let user = match self.users.find_by_email(email).await? {
            Some(user) => user,
            None => {
                log::warn!("Login attempt for unknown email");
                return Err(AppError::InvalidCredentials);
            }
        };

        if !user.verify_password(password)? {
            log::warn!("Failed login for user {}", user.id()?);
            return Err(AppError::InvalidCredentials);
        }

        self.issue(&user)
    }

    pub fn verify_token(&self, token: &str) -> Result<TokenPayload, AppError> {
        self.tokens.verify_token(token)
    }

    /// Looks up the user a verified token refers to.
    pub async fn current_user(&self, user_id: Uuid) -> Result<UserProjection, AppError> {
        match self.users.find_by_id(user_id).await? {
            Some(user) => user.projection(),
            None => Err(AppError::NotFound("User not found".into())),
        }
    }

    fn issue(&self, user: &User) -> Result<AuthResponse, AppError> {
        let user = user.projection()?;
        let token = self.tokens.generate_token(&TokenPayload {
            user_id: user.id,
            email: user.email.clone(),
        })?;
        Ok(AuthResponse { user, token })
    }
}
