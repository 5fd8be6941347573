use thiserror::Error;

use fixtura_core::{FieldError, ValidationErrors};

/// Errors emitted while declaring blueprints or resolving them.
#[derive(Debug, Error)]
pub enum FactoryError {
    #[error("duplicate attribute '{attribute}' in blueprint '{blueprint}'")]
    DuplicateAttribute { blueprint: String, attribute: String },
    #[error("invalid attribute name '{name}': {reason}")]
    InvalidAttributeName { name: String, reason: &'static str },
    #[error("invalid option: {0}")]
    InvalidOption(String),
    #[error("blueprint already defined: {0}")]
    DuplicateBlueprint(String),
    #[error("no such blueprint: {0}")]
    UnknownBlueprint(String),
    #[error("model class already registered: {0}")]
    DuplicateClass(String),
    #[error("no model class '{class}' registered for blueprint '{blueprint}'")]
    UnknownClass { blueprint: String, class: String },
    #[error("sequence already defined: {0}")]
    DuplicateSequence(String),
    #[error("no such sequence: {0}")]
    UnknownSequence(String),
    #[error("attribute '{attribute}' has not been resolved in blueprint '{blueprint}'")]
    MissingAttribute { blueprint: String, attribute: String },
    #[error("association depth limit {limit} exceeded while building '{blueprint}'")]
    AssociationDepthExceeded { blueprint: String, limit: usize },
    #[error("blueprint '{blueprint}' does not build a {expected}")]
    ModelTypeMismatch {
        blueprint: String,
        expected: &'static str,
    },
    #[error("computation failed: {0}")]
    Computation(String),
    #[error("cannot assign attribute on '{blueprint}': {source}")]
    Field {
        blueprint: String,
        #[source]
        source: FieldError,
    },
    #[error("'{blueprint}' failed to persist: {source}")]
    Validation {
        blueprint: String,
        #[source]
        source: ValidationErrors,
    },
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl FactoryError {
    /// Failure raised from inside a deferred computation.
    pub fn computation(message: impl Into<String>) -> Self {
        Self::Computation(message.into())
    }

    /// True when the error came from the model's persistence operation.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Validation issues when this is a persistence failure.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result type for factory operations.
pub type Result<T> = std::result::Result<T, FactoryError>;
