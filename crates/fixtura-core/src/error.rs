use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure raised by a model when a field cannot be assigned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The model has no field with this name.
    #[error("unknown field: {0}")]
    UnknownField(String),
    /// The value kind does not fit the field.
    #[error("field '{field}' expects {expected}, got {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl FieldError {
    pub fn unknown(field: impl Into<String>) -> Self {
        Self::UnknownField(field.into())
    }

    pub fn mismatch(field: impl Into<String>, expected: &'static str, found: &'static str) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
            found,
        }
    }
}

/// A single validation issue reported by a model's persistence operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    /// Create a new validation issue.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Aggregated validation failures, in the order the model reported them.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a report holding one issue.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    /// Returns true when no issue was recorded.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.issues.push(ValidationIssue::new(field, message));
    }

    /// Issues recorded against `field`.
    pub fn on(&self, field: &str) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(move |issue| issue.field == field)
    }

    /// `Ok(())` when empty, otherwise the report itself as an error.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed")?;
        for (idx, issue) in self.issues.iter().enumerate() {
            let sep = if idx == 0 { ": " } else { ", " };
            write!(f, "{sep}{} {}", issue.field, issue.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_lists_every_issue() {
        let mut errors = ValidationErrors::new();
        errors.push("name", "can't be blank");
        errors.push("email", "is invalid");
        assert_eq!(
            errors.to_string(),
            "validation failed: name can't be blank, email is invalid"
        );
    }

    #[test]
    fn empty_report_is_ok() {
        assert!(ValidationErrors::new().into_result().is_ok());
        assert!(ValidationErrors::single("name", "missing").into_result().is_err());
    }
}
