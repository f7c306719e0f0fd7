use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::AppError;

lazy_static! {
    // Non-whitespace local part, '@', non-whitespace domain containing a dot.
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// A syntactically valid email address. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn create(raw: &str) -> Result<Self, AppError> {
        if !EMAIL_REGEX.is_match(raw) {
            return Err(AppError::InvalidFormat("Invalid email format".into()));
        }
        Ok(Self(raw.to_string()))
    }

    /// Wraps a value read back from storage, which was validated when first written.
    pub(crate) fn from_stored(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
