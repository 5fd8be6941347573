use crate::attributes::AttributeMap;
use crate::error::{FieldError, ValidationErrors};
use crate::model::Model;
use crate::value::Value;

/// Schemaless in-memory model that accepts every field.
///
/// Useful when no bespoke Rust type exists for a blueprint. Fields listed in
/// `required` must be present and non-null for `save` to succeed.
#[derive(Debug, Clone, Default)]
pub struct Record {
    fields: AttributeMap,
    required: Vec<String>,
    persisted: bool,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requiring<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required: fields.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> &AttributeMap {
        &self.fields
    }

    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for field in &self.required {
            if self.fields.get(field).is_none_or(Value::is_null) {
                errors.push(field.clone(), "can't be blank");
            }
        }
        errors
    }
}

impl Model for Record {
    fn set_attribute(&mut self, name: &str, value: Value) -> Result<(), FieldError> {
        self.fields.insert(name, value);
        Ok(())
    }

    fn save(&mut self) -> Result<(), ValidationErrors> {
        self.validate().into_result()?;
        self.persisted = true;
        Ok(())
    }

    fn to_json(&self) -> serde_json::Value {
        self.fields.to_json()
    }
}
