use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::UserRepository;
use crate::error::AppError;
use crate::models::{Email, User};

/// Process-local user store. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.email().as_str() == email)
            .cloned())
    }

    async fn save(&self, user: &mut User) -> Result<(), AppError> {
        // Check and write under one lock so concurrent registrations can't both insert.
        let mut users = self.users.write().await;

        match user.identity() {
            Some(id) => {
                if !users.contains_key(&id) {
                    return Err(AppError::NotFound(format!("User {} not found", id)));
                }
                if email_taken(&users, user.email(), Some(id)) {
                    return Err(AppError::EmailAlreadyRegistered);
                }
                users.insert(id, user.clone());
            }
            None => {
                if email_taken(&users, user.email(), None) {
                    return Err(AppError::EmailAlreadyRegistered);
                }
                let id = Uuid::new_v4();
                user.assign_id(id)?;
                users.insert(id, user.clone());
            }
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        match self.users.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(format!("User {} not found", id))),
        }
    }
}

fn email_taken(users: &HashMap<Uuid, User>, email: &Email, own: Option<Uuid>) -> bool {
    users
        .values()
        .any(|u| u.email() == email && u.identity() != own)
}
