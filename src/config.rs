use std::env;

use crate::error::AppError;

const DEFAULT_JWT_SECRET: &str = "your-secret-key";

pub struct Config {
    /// `None` runs the server on the in-memory user store.
    pub database_url: Option<String>,
    pub server_port: u16,
    pub server_host: String,
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    token_ttl: chrono::Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                log::warn!("JWT_SECRET not set, falling back to the development secret");
                DEFAULT_JWT_SECRET.to_string()
            }
        };

        let jwt_expiration_hours: i64 = parse_var("JWT_EXPIRATION_HOURS", 24)?;
        let token_ttl = token_ttl_from_hours(jwt_expiration_hours)?;

        Ok(Self {
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            server_port: parse_var("SERVER_PORT", 8080)?,
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            jwt_secret,
            jwt_expiration_hours,
            token_ttl,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }

    pub fn token_ttl(&self) -> chrono::Duration {
        self.token_ttl
    }
}

/// Tokens must outlive their issuance and expire at a representable time.
fn token_ttl_from_hours(hours: i64) -> Result<chrono::Duration, AppError> {
    let out_of_range = || {
        AppError::Config(format!(
            "JWT_EXPIRATION_HOURS must be a positive number of hours, got {}",
            hours
        ))
    };
    if hours <= 0 {
        return Err(out_of_range());
    }
    let ttl = chrono::Duration::try_hours(hours).ok_or_else(out_of_range)?;
    chrono::Utc::now()
        .checked_add_signed(ttl)
        .ok_or_else(out_of_range)?;
    Ok(ttl)
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| AppError::Config(format!("{} must be a number, got {:?}", name, raw))),
        Err(_) => Ok(default),
    }
}
