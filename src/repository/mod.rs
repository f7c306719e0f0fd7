//! Persistence port for the `User` aggregate and its adapters.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::User;

pub use memory::InMemoryUserRepository;
pub use postgres::PgUserRepository;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Updates the stored record when `user` already has an identity; otherwise
    /// inserts it and assigns the generated identity back onto `user`.
    ///
    /// Inserting an email that is already stored fails with `EmailAlreadyRegistered`.
    async fn save(&self, user: &mut User) -> Result<(), AppError>;

    async fn delete(&self, id: Uuid) -> Result<(), AppError>;
}
