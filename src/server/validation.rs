//! Request validation utilities for the Sexton API.
//!
//! This module provides validation functions for common input types
//! used across the API endpoints.

use std::fmt;

/// Validation error type.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate that a string is not empty or whitespace only.
///
/// # Example
/// ```
/// use sexton::server::validation::validate_not_empty;
///
/// assert!(validate_not_empty("Acme", "name").is_ok());
/// assert!(validate_not_empty("", "name").is_err());
/// assert!(validate_not_empty("   ", "name").is_err());
/// ```
pub fn validate_not_empty(value: &str, field_name: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        Err(ValidationError {
            field: field_name.to_string(),
            message: "must not be empty".to_string(),
        })
    } else {
        Ok(())
    }
}

/// Validate that a string length falls within an inclusive range.
///
/// # Example
/// ```
/// use sexton::server::validation::validate_length;
///
/// assert!(validate_length("Acme", 1, 120, "name").is_ok());
/// assert!(validate_length("", 1, 120, "name").is_err());
/// ```
pub fn validate_length(value: &str, min: usize, max: usize, field_name: &str) -> ValidationResult<()> {
    let len = value.trim().len();
    if len < min || len > max {
        Err(ValidationError {
            field: field_name.to_string(),
            message: format!("length must be between {min} and {max} characters"),
        })
    } else {
        Ok(())
    }
}

/// Validate a phone number.
///
/// Accepts an optional leading `+` followed by 7-20 digits, spaces,
/// parentheses, or dashes.
///
/// # Example
/// ```
/// use sexton::server::validation::validate_phone_number;
///
/// assert!(validate_phone_number("+1 (555) 123-4567", "phone_number").is_ok());
/// assert!(validate_phone_number("not a number", "phone_number").is_err());
/// ```
pub fn validate_phone_number(value: &str, field_name: &str) -> ValidationResult<()> {
    let phone_regex = regex::Regex::new(r"^\+?[0-9 ()\-]{7,20}$").unwrap();

    if phone_regex.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError {
            field: field_name.to_string(),
            message: "invalid phone number format".to_string(),
        })
    }
}

/// Validate a company id (UUID format).
///
/// # Example
/// ```
/// use sexton::server::validation::validate_company_id;
///
/// assert!(validate_company_id("550e8400-e29b-41d4-a716-446655440000", "company_id").is_ok());
/// assert!(validate_company_id("not-a-uuid", "company_id").is_err());
/// ```
pub fn validate_company_id(value: &str, field_name: &str) -> ValidationResult<()> {
    // UUID pattern: 8-4-4-4-12 hex chars
    let uuid_regex = regex::Regex::new(
        r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$",
    )
    .unwrap();

    if uuid_regex.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError {
            field: field_name.to_string(),
            message: "invalid id format (expected: xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx)"
                .to_string(),
        })
    }
}
