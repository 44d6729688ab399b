//! User identity record.
//!
//! # Invariants
//! - `email` is required, unique, and at most 120 chars.
//! - `user_name` is unique when present and at most 40 chars.
//! - `created_at` is assigned by storage on insert and never rewritten.

use super::{ensure_max_chars, ensure_not_empty, ValidationError};
use once_cell::sync::Lazy;
use regex::Regex;

/// Stable numeric identifier of a user row.
pub type UserId = i64;

pub const EMAIL_MAX_CHARS: usize = 120;
pub const USER_NAME_MAX_CHARS: usize = 40;
pub const FIRST_NAME_MAX_CHARS: usize = 20;
pub const LAST_NAME_MAX_CHARS: usize = 40;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+$").expect("valid email regex"));

/// Persisted user row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    /// Opaque credential. Never emitted by projections.
    pub password: String,
    pub user_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Unix epoch milliseconds (UTC). `None` for rows inserted without a default.
    pub created_at: Option<i64>,
}

impl User {
    /// Checks column constraints that storage does not express.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_user_fields(
            &self.email,
            &self.password,
            self.user_name.as_deref(),
            self.first_name.as_deref(),
            self.last_name.as_deref(),
        )
    }
}

/// Insert payload for a user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub user_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl NewUser {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    pub fn with_user_name(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = Some(user_name.into());
        self
    }

    pub fn with_names(
        mut self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        self.first_name = Some(first_name.into());
        self.last_name = Some(last_name.into());
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_user_fields(
            &self.email,
            &self.password,
            self.user_name.as_deref(),
            self.first_name.as_deref(),
            self.last_name.as_deref(),
        )
    }
}

fn validate_user_fields(
    email: &str,
    password: &str,
    user_name: Option<&str>,
    first_name: Option<&str>,
    last_name: Option<&str>,
) -> Result<(), ValidationError> {
    ensure_not_empty("email", email)?;
    ensure_max_chars("email", Some(email), EMAIL_MAX_CHARS)?;
    if !EMAIL_RE.is_match(email) {
        return Err(ValidationError::InvalidEmail(email.to_string()));
    }
    ensure_not_empty("password", password)?;
    ensure_max_chars("user_name", user_name, USER_NAME_MAX_CHARS)?;
    ensure_max_chars("first_name", first_name, FIRST_NAME_MAX_CHARS)?;
    ensure_max_chars("last_name", last_name, LAST_NAME_MAX_CHARS)?;
    Ok(())
}
