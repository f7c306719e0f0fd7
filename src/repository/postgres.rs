use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::UserRepository;
use crate::error::AppError;
use crate::models::User;

/// Row shape of the `users` table.
#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    name: Option<String>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User::reconstitute(row.id, row.email, row.password_hash, row.name)
    }
}

/// `UserRepository` backed by PostgreSQL.
///
/// Expects the `users` table from `migrations/`, whose unique index on `email`
/// turns concurrent duplicate registrations into `EmailAlreadyRegistered`.
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, password_hash, name FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, password_hash, name FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn save(&self, user: &mut User) -> Result<(), AppError> {
        match user.identity() {
            Some(id) => {
                // The password hash is only written on insert.
                let result = sqlx::query(
                    "UPDATE users SET email = $1, name = $2, updated_at = NOW() WHERE id = $3",
                )
                .bind(user.email().as_str())
                .bind(user.name())
                .bind(id)
                .execute(&self.pool)
                .await?;

                if result.rows_affected() == 0 {
                    return Err(AppError::NotFound(format!("User {} not found", id)));
                }
            }
            None => {
                let id = sqlx::query_scalar::<_, Uuid>(
                    "INSERT INTO users (email, password_hash, name) VALUES ($1, $2, $3) RETURNING id",
                )
                .bind(user.email().as_str())
                .bind(user.hashed_password())
                .bind(user.name())
                .fetch_one(&self.pool)
                .await?;

                user.assign_id(id)?;
                log::debug!("Inserted user {}", id);
            }
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User {} not found", id)));
        }
        Ok(())
    }
}
