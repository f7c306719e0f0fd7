use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Email, Password};
use crate::error::AppError;

/// The user aggregate: identity, email, hashed password and an optional display name.
///
/// Identity is assigned exactly once, by the repository on first save.
#[derive(Debug, Clone)]
pub struct User {
    id: Option<Uuid>,
    email: Email,
    password: Password,
    name: Option<String>,
}

/// Externally safe view of a user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProjection {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
}

impl User {
    /// Builds a fresh, unsaved user from raw registration input.
    pub fn create(email: &str, plaintext: &str, name: Option<String>) -> Result<Self, AppError> {
        let email = Email::create(email)?;
        let password = Password::create_hashed(plaintext)?;
        Ok(Self {
            id: None,
            email,
            password,
            name: name.filter(|n| !n.is_empty()),
        })
    }

    /// Rebuilds a user from stored fields without re-validating them.
    pub fn reconstitute(id: Uuid, email: String, hash: String, name: Option<String>) -> Self {
        Self {
            id: Some(id),
            email: Email::from_stored(email),
            password: Password::from_hashed(hash),
            name: name.filter(|n| !n.is_empty()),
        }
    }

    pub fn verify_password(&self, plaintext: &str) -> Result<bool, AppError> {
        self.password.compare(plaintext)
    }

    /// The assigned identity, if any.
    pub fn identity(&self) -> Option<Uuid> {
        self.id
    }

    pub fn id(&self) -> Result<Uuid, AppError> {
        self.id.ok_or(AppError::IdentityNotSet)
    }

    pub fn assign_id(&mut self, id: Uuid) -> Result<(), AppError> {
        if self.id.is_some() {
            return Err(AppError::IdentityAlreadySet);
        }
        self.id = Some(id);
        Ok(())
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn hashed_password(&self) -> &str {
        self.password.as_hash()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name.filter(|n| !n.is_empty());
    }

    pub fn projection(&self) -> Result<UserProjection, AppError> {
        Ok(UserProjection {
            id: self.id()?,
            email: self.email.as_str().to_string(),
            name: self.name.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_create_validates_email_then_password() {
        match User::create("invalid-email", "weak", None) {
            Err(AppError::InvalidFormat(msg)) => assert_eq!(msg, "Invalid email format"),
            other => panic!("expected InvalidFormat, got {:?}", other),
        }
        match User::create("a@b.com", "weak", None) {
            Err(AppError::InvalidFormat(msg)) => {
                assert_eq!(msg, crate::models::password::PASSWORD_POLICY_MESSAGE)
            }
            other => panic!("expected InvalidFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_identity_lifecycle() {
        let mut user = User::create("a@b.com", "Password123", Some("A".into())).unwrap();

        assert_eq!(user.identity(), None);
        assert!(matches!(user.id(), Err(AppError::IdentityNotSet)));
        assert!(matches!(user.projection(), Err(AppError::IdentityNotSet)));

        let id = Uuid::new_v4();
        user.assign_id(id).unwrap();
        assert_eq!(user.id().unwrap(), id);

        assert!(matches!(
            user.assign_id(Uuid::new_v4()),
            Err(AppError::IdentityAlreadySet)
        ));
        assert_eq!(user.id().unwrap(), id);
    }

    #[test]
    fn test_projection_excludes_password() {
        let id = Uuid::new_v4();
        let user = User::reconstitute(id, "a@b.com".into(), "$2b$10$hash".into(), None);

        let projection = user.projection().unwrap();
        assert_eq!(
            projection,
            UserProjection {
                id,
                email: "a@b.com".into(),
                name: None,
            }
        );

        let json = serde_json::to_value(&projection).unwrap();
        assert_eq!(json["name"], serde_json::Value::Null);
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_verify_password() {
        let user = User::create("a@b.com", "Password123", None).unwrap();
        assert!(user.verify_password("Password123").unwrap());
        assert!(!user.verify_password("WrongPass1").unwrap());
    }

    #[test]
    fn test_reconstitute_cannot_reassign_identity() {
        let mut user = User::reconstitute(Uuid::new_v4(), "a@b.com".into(), "h".into(), None);
        assert!(matches!(
            user.assign_id(Uuid::new_v4()),
            Err(AppError::IdentityAlreadySet)
        ));
    }

    #[test]
    fn test_empty_name_is_absent() {
        let mut user = User::create("a@b.com", "Password123", Some(String::new())).unwrap();
        assert_eq!(user.name(), None);

        user.set_name(Some("Renamed".into()));
        assert_eq!(user.name(), Some("Renamed"));
    }
}
