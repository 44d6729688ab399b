//! Record types for the social graph.
//!
//! # Responsibility
//! - Define the persisted shape of users, posts, comments, media and
//!   follower edges.
//! - Validate field constraints before any write reaches storage.
//!
//! # Invariants
//! - Relations are carried as identifier fields, never as embedded records
//!   or owning-side collections.
//! - `New*` types describe inserts; the storage engine assigns `id`.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod comment;
pub mod follower;
pub mod media;
pub mod post;
pub mod user;

/// Field-level validation failure raised before persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is empty or whitespace-only.
    EmptyField(&'static str),
    /// A text field exceeds its declared column size.
    FieldTooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
    /// Email does not look like `local@domain`.
    InvalidEmail(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "{field} must not be empty"),
            Self::FieldTooLong { field, max, actual } => {
                write!(f, "{field} is {actual} chars, exceeds limit of {max}")
            }
            Self::InvalidEmail(value) => write!(f, "invalid email address `{value}`"),
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn ensure_not_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}

pub(crate) fn ensure_max_chars(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<(), ValidationError> {
    let Some(value) = value else {
        return Ok(());
    };
    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError::FieldTooLong { field, max, actual });
    }
    Ok(())
}
