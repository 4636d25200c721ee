//! Validation for content entities.
//!
//! Provides validation functions to ensure data integrity before
//! inserting or updating entities in the content store.

use super::models::ContentEntity;
use std::fmt;

/// Length of a store identifier in hex characters.
pub const OBJECT_ID_LEN: usize = 24;

/// Validation error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyField { field: &'static str },
    InvalidSlug { slug: String },
    InvalidIdentifier { id: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyField { field } => {
                write!(f, "Field '{}' is required but was empty", field)
            }
            ValidationError::InvalidSlug { slug } => write!(
                f,
                "Slug '{}' must contain only lowercase letters, digits and single dashes",
                slug
            ),
            ValidationError::InvalidIdentifier { id } => write!(
                f,
                "Invalid ID format: '{}' (expected {} hexadecimal characters)",
                id, OBJECT_ID_LEN
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

pub fn is_valid_object_id(id: &str) -> bool {
    id.len() == OBJECT_ID_LEN && id.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Checks an identifier before it is used to address an update or delete.
pub fn validate_identifier(id: &str) -> ValidationResult<()> {
    if is_valid_object_id(id) {
        Ok(())
    } else {
        Err(ValidationError::InvalidIdentifier { id: id.to_string() })
    }
}

pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.split('-').all(|part| {
            !part.is_empty()
                && part
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        })
}

/// Validate an entity record prior to persisting it.
pub fn validate_entity<R: ContentEntity>(record: &R) -> ValidationResult<()> {
    let slug = record.slug();
    if slug.trim().is_empty() {
        return Err(ValidationError::EmptyField { field: "slug" });
    }
    if !is_valid_slug(slug) {
        return Err(ValidationError::InvalidSlug {
            slug: slug.to_string(),
        });
    }
    if record.display_name().trim().is_empty() {
        return Err(ValidationError::EmptyField {
            field: R::KIND.display_field(),
        });
    }
    Ok(())
}
