use std::fmt;

use bcrypt::{hash, verify};

use crate::error::AppError;

/// bcrypt work factor for newly hashed passwords.
pub const HASH_COST: u32 = 10;

pub const PASSWORD_POLICY_MESSAGE: &str = "Password must be at least 8 characters long and \
contain at least one uppercase letter, one lowercase letter, and one number";

const MIN_PASSWORD_LENGTH: usize = 8;

/// A one-way hashed password. The plaintext is never retained.
#[derive(Clone, PartialEq, Eq)]
pub struct Password {
    hash: String,
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Checks the strength policy, then salts and hashes the plaintext.
    pub fn create_hashed(plaintext: &str) -> Result<Self, AppError> {
        if !meets_policy(plaintext) {
            return Err(AppError::InvalidFormat(PASSWORD_POLICY_MESSAGE.into()));
        }
        let hash = hash(plaintext, HASH_COST)
            .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))?;
        Ok(Self { hash })
    }

    pub fn from_hashed(hash: String) -> Self {
        Self { hash }
    }

    /// Returns whether `candidate` hashes to the stored value.
    ///
    /// A stored hash that bcrypt cannot parse is an error, not a mismatch.
    /// bcrypt reads at most 72 bytes, so candidates that agree on their first
    /// 72 bytes compare equal.
    pub fn compare(&self, candidate: &str) -> Result<bool, AppError> {
        verify(candidate, &self.hash)
            .map_err(|e| AppError::InternalServerError(format!("Failed to verify password: {}", e)))
    }

    pub fn as_hash(&self) -> &str {
        &self.hash
    }
}

fn meets_policy(plaintext: &str) -> bool {
    let mut length = 0;
    let (mut upper, mut lower, mut digit) = (false, false, false);
    for c in plaintext.chars() {
        if matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}') {
            return false;
        }
        length += 1;
        upper |= c.is_ascii_uppercase();
        lower |= c.is_ascii_lowercase();
        digit |= c.is_ascii_digit();
    }
    length >= MIN_PASSWORD_LENGTH && upper && lower && digit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hashing_and_verification() {
        let password = Password::create_hashed("Password123").unwrap();

        assert_ne!(password.as_hash(), "Password123");
        assert!(password.compare("Password123").unwrap());
        assert!(!password.compare("WrongPass1").unwrap());
        assert!(!password.compare("password123").unwrap());
    }

    #[test]
    fn test_same_password_different_salts() {
        let a = Password::create_hashed("SamePassword1").unwrap();
        let b = Password::create_hashed("SamePassword1").unwrap();

        assert_ne!(a.as_hash(), b.as_hash());
        assert!(a.compare("SamePassword1").unwrap());
        assert!(b.compare("SamePassword1").unwrap());
    }

    #[test]
    fn test_policy_rejections() {
        let cases = [
            ("Pass1", "too short"),
            ("password123", "no uppercase"),
            ("PASSWORD123", "no lowercase"),
            ("PasswordABC", "no digit"),
            ("Pass\nword123", "line break"),
            ("", "empty"),
        ];
        for (plaintext, description) in cases {
            match Password::create_hashed(plaintext) {
                Err(AppError::InvalidFormat(msg)) => assert_eq!(msg, PASSWORD_POLICY_MESSAGE),
                other => panic!("{}: expected InvalidFormat, got {:?}", description, other),
            }
        }
    }

    #[test]
    fn test_policy_boundaries() {
        assert!(meets_policy("Abcdefg1"));
        assert!(!meets_policy("Abcdef1"));
        assert!(meets_policy("StrongPass123!"));
    }

    #[test]
    fn test_from_hashed_round_trips_stored_hash() {
        let original = Password::create_hashed("Password123").unwrap();
        let restored = Password::from_hashed(original.as_hash().to_string());

        assert_eq!(original, restored);
        assert!(restored.compare("Password123").unwrap());
    }

    #[test]
    fn test_only_first_72_bytes_are_significant() {
        let prefix = format!("Aa1{}", "x".repeat(69));
        assert_eq!(prefix.len(), 72);
        let password = Password::create_hashed(&format!("{}first", prefix)).unwrap();

        assert!(password.compare(&format!("{}second", prefix)).unwrap());
        assert!(!password.compare(&format!("Ab1{}", "x".repeat(69))).unwrap());
    }

    #[test]
    fn test_compare_with_invalid_hash() {
        let password = Password::from_hashed("invalidhashformat".into());
        match password.compare("Password123") {
            Err(AppError::InternalServerError(msg)) => {
                assert!(msg.contains("Failed to verify password"))
            }
            other => panic!("expected InternalServerError, got {:?}", other),
        }
    }

    #[test]
    fn test_debug_redacts_hash() {
        let password = Password::create_hashed("Password123").unwrap();
        let debug = format!("{:?}", password);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains(password.as_hash()));
    }
}
