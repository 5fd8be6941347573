use std::any::Any;
use std::fmt;

use crate::error::{FieldError, ValidationErrors};
use crate::value::Value;

/// Type-erasure helper so trait objects can be downcast to their concrete
/// model type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Contract for any type a blueprint can instantiate.
///
/// Zero-argument construction is captured separately by [`ModelClass`], so
/// the trait stays object safe.
pub trait Model: AsAny + fmt::Debug + Send + Sync {
    /// Assign one resolved attribute by name.
    fn set_attribute(&mut self, name: &str, value: Value) -> Result<(), FieldError>;

    /// Persist the instance. Only the `create` strategy calls this.
    fn save(&mut self) -> Result<(), ValidationErrors> {
        Ok(())
    }

    /// JSON rendering used when the instance is nested in another value.
    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Null
    }
}

impl dyn Model {
    pub fn is<T: Model>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: Model>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// Recover the concrete type of a boxed model.
pub fn downcast_model<T: Model>(model: Box<dyn Model>) -> Option<Box<T>> {
    model.into_any().downcast::<T>().ok()
}

/// A named constructor for a model type.
#[derive(Clone)]
pub struct ModelClass {
    name: String,
    construct: fn() -> Box<dyn Model>,
}

impl ModelClass {
    pub fn new(name: impl Into<String>, construct: fn() -> Box<dyn Model>) -> Self {
        Self {
            name: name.into(),
            construct,
        }
    }

    /// Class backed by `T::default()`.
    pub fn of<T: Model + Default>(name: impl Into<String>) -> Self {
        Self::new(name, construct_default::<T>)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// A fresh, empty instance.
    pub fn instantiate(&self) -> Box<dyn Model> {
        (self.construct)()
    }
}

impl fmt::Debug for ModelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelClass").field("name", &self.name).finish()
    }
}

fn construct_default<T: Model + Default>() -> Box<dyn Model> {
    Box::new(T::default())
}
