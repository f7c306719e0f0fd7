use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use sqlx::PgPool;

use todoforge::auth::{AuthMiddleware, AuthenticationService, JwtTokenService};
use todoforge::config::Config;
use todoforge::repository::{InMemoryUserRepository, PgUserRepository, UserRepository};
use todoforge::routes::{self, health};

fn to_io_error(err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, err.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(to_io_error)?;

    let users: Arc<dyn UserRepository> = match &config.database_url {
        Some(url) => {
            let pool = PgPool::connect(url).await.map_err(to_io_error)?;
            log::info!("Using PostgreSQL user store");
            Arc::new(PgUserRepository::new(pool))
        }
        None => {
            log::warn!("DATABASE_URL not set, users are kept in memory only");
            Arc::new(InMemoryUserRepository::new())
        }
    };
    let tokens = Arc::new(JwtTokenService::new(&config.jwt_secret, config.token_ttl()));
    let auth = web::Data::new(AuthenticationService::new(users, tokens));

    log::info!("Starting todoforge server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .app_data(auth.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .configure(routes::config),
            )
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
