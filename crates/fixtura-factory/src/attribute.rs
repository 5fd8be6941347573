use std::fmt;
use std::sync::Arc;

use fixtura_core::Value;

use crate::context::ResolutionContext;
use crate::errors::{FactoryError, Result};

/// Deferred computation evaluated against the in-progress resolution.
pub type Computation = Arc<dyn Fn(&ResolutionContext<'_>) -> Result<Value> + Send + Sync>;

/// Where an attribute's value comes from.
#[derive(Clone)]
pub enum AttributeSource {
    Static(Value),
    Deferred(Computation),
}

impl fmt::Debug for AttributeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeSource::Static(value) => f.debug_tuple("Static").field(value).finish(),
            AttributeSource::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

/// One named field definition of a blueprint.
#[derive(Debug, Clone)]
pub struct Attribute {
    name: String,
    source: AttributeSource,
}

impl Attribute {
    pub fn new(name: impl Into<String>, source: AttributeSource) -> Result<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self { name, source })
    }

    pub fn fixed(name: impl Into<String>, value: impl Into<Value>) -> Result<Self> {
        Self::new(name, AttributeSource::Static(value.into()))
    }

    pub fn deferred<F>(name: impl Into<String>, computation: F) -> Result<Self>
    where
        F: Fn(&ResolutionContext<'_>) -> Result<Value> + Send + Sync + 'static,
    {
        Self::new(name, AttributeSource::Deferred(Arc::new(computation)))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &AttributeSource {
        &self.source
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self.source, AttributeSource::Deferred(_))
    }

    /// Static values ignore the context; deferred ones are invoked with it.
    pub fn value(&self, context: &ResolutionContext<'_>) -> Result<Value> {
        match &self.source {
            AttributeSource::Static(value) => Ok(value.clone()),
            AttributeSource::Deferred(computation) => computation(context),
        }
    }
}

fn validate_name(name: &str) -> Result<()> {
    let reason = if name.trim().is_empty() {
        "name is empty"
    } else if name.ends_with('=') {
        "declare attributes by name, without assignment syntax"
    } else {
        return Ok(());
    };
    Err(FactoryError::InvalidAttributeName {
        name: name.to_string(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_assignment_style_names() {
        let err = Attribute::fixed("name=", "Billy").expect_err("assignment syntax");
        assert!(matches!(err, FactoryError::InvalidAttributeName { .. }));
        assert!(Attribute::fixed("  ", 1).is_err());
    }

    #[test]
    fn reports_source_kind() {
        let fixed = Attribute::fixed("name", "Billy").expect("valid");
        let lazy = Attribute::deferred("email", |_| Ok(Value::from("b@example.com")))
            .expect("valid");
        assert!(!fixed.is_deferred());
        assert!(lazy.is_deferred());
    }
}
