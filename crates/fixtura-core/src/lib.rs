//! Core contracts for Fixtura.
//!
//! This crate defines the value model shared by blueprints, the build
//! strategies, and the contract a target type implements so the factory can
//! instantiate, populate, and persist it.

pub mod attributes;
pub mod error;
pub mod model;
pub mod record;
pub mod strategy;
pub mod value;

pub use attributes::AttributeMap;
pub use error::{FieldError, ValidationErrors, ValidationIssue};
pub use model::{AsAny, Model, ModelClass, downcast_model};
pub use record::Record;
pub use strategy::Strategy;
pub use value::Value;
