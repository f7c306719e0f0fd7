pub mod auth;
pub mod health;

use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::error::AppError;

/// Mounts the API routes. Expected to be nested under `/api`.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).service(
        web::scope("/auth")
            .service(auth::login)
            .service(auth::register)
            .service(auth::me),
    );
}

/// Renders unreadable JSON bodies with the same `{"error": ...}` shape as other errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        AppError::BadRequest(format!("Invalid request body: {}", err)).into()
    })
}
