use crate::{
    auth::{AuthenticatedUser, AuthenticationService, LoginRequest, RegisterRequest},
    error::AppError,
};
use actix_web::{get, post, web, HttpResponse, Responder};

/// Register a new user
///
/// Creates a new user account and returns the user with an authentication token.
#[post("/register")]
pub async fn register(
    auth: web::Data<AuthenticationService>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    let registration = register_data.into_inner().into_registration()?;
    let response = auth.register(registration).await?;
    Ok(HttpResponse::Created().json(response))
}

/// Login user
///
/// Authenticates a user and returns the user with an authentication token.
#[post("/login")]
pub async fn login(
    auth: web::Data<AuthenticationService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let (email, password) = login_data.into_inner().into_credentials()?;
    let response = auth.login(&email, &password).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Current user
///
/// Returns the account the bearer token was issued for.
#[get("/me")]
pub async fn me(
    auth: web::Data<AuthenticationService>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let projection = auth.current_user(user.0.user_id).await?;
    Ok(HttpResponse::Ok().json(projection))
}
