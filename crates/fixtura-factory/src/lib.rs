//! Blueprint-driven test object factory for Fixtura.
//!
//! Blueprints are declared once on a [`RegistryBuilder`], frozen into a
//! [`Registry`], and then materialized as attribute maps, unsaved instances,
//! or persisted instances, with per-call overrides.
//!
//! ```
//! use fixtura_core::{AttributeMap, Record, Value};
//! use fixtura_factory::{AssociationOptions, DefineOptions, RegistryBuilder};
//!
//! let mut builder = RegistryBuilder::new();
//! builder.register_model::<Record>("User")?;
//! builder.register_model::<Record>("Post")?;
//! builder.define("user", DefineOptions::new(), |f| {
//!     f.value("name", "Billy Idol")?;
//!     Ok(())
//! })?;
//! builder.define("post", DefineOptions::new(), |f| {
//!     f.value("title", "Rebel Yell")?;
//!     f.association("author", AssociationOptions::new().factory("user"))?;
//!     Ok(())
//! })?;
//! let registry = builder.freeze();
//!
//! let post = registry.create_as::<Record>("post", AttributeMap::new())?;
//! let author = post.get("author").and_then(Value::instance_as::<Record>);
//! assert_eq!(author.and_then(|user| user.get("name")), Some(&Value::from("Billy Idol")));
//! # Ok::<(), fixtura_factory::FactoryError>(())
//! ```

pub mod alias;
pub mod attribute;
pub mod blueprint;
pub mod config;
pub mod context;
pub mod declare;
pub mod errors;
pub mod logging;
pub mod options;
pub mod registry;
pub mod sequence;

pub use alias::{AliasRule, AliasTable};
pub use attribute::{Attribute, AttributeSource, Computation};
pub use blueprint::Blueprint;
pub use config::{AliasConfig, AliasRuleConfig, RegistryConfig, registry_config_json_schema};
pub use context::ResolutionContext;
pub use declare::{AssociationOptions, BlueprintBuilder};
pub use errors::{FactoryError, Result};
pub use options::{DefineOptions, class_name_for};
pub use registry::{Product, Registry, RegistryBuilder};
pub use sequence::Sequence;
