use tracing::{debug, trace};

use fixtura_core::{AttributeMap, Model, ModelClass, Strategy};

use crate::attribute::Attribute;
use crate::context::ResolutionContext;
use crate::errors::{FactoryError, Result};
use crate::registry::Registry;

/// Named, ordered attribute definitions bound to a model class.
#[derive(Debug, Clone)]
pub struct Blueprint {
    name: String,
    class: ModelClass,
    attributes: Vec<Attribute>,
}

impl Blueprint {
    pub(crate) fn new(name: impl Into<String>, class: ModelClass) -> Self {
        Self {
            name: name.into(),
            class,
            attributes: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class_name(&self) -> &str {
        self.class.name()
    }

    /// Attributes in declaration order.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.name() == name)
    }

    pub(crate) fn add_attribute(&mut self, attribute: Attribute) -> Result<()> {
        if self.attribute(attribute.name()).is_some() {
            return Err(FactoryError::DuplicateAttribute {
                blueprint: self.name.clone(),
                attribute: attribute.name().to_string(),
            });
        }
        self.attributes.push(attribute);
        Ok(())
    }

    /// Merge `overrides` with this blueprint's definitions.
    ///
    /// Overrides are kept verbatim and always win: an attribute whose name or
    /// any alias of it was passed as an override is never evaluated. The
    /// remaining attributes are evaluated once each, in declaration order, and
    /// each one sees everything resolved before it.
    pub fn resolve_attributes(
        &self,
        registry: &Registry,
        overrides: AttributeMap,
        strategy: Strategy,
    ) -> Result<AttributeMap> {
        self.resolve_at(registry, overrides, strategy, 0)
    }

    pub fn attributes_for(
        &self,
        registry: &Registry,
        overrides: AttributeMap,
    ) -> Result<AttributeMap> {
        self.resolve_attributes(registry, overrides, Strategy::AttributesOnly)
    }

    /// Resolve with the `build` strategy and populate a fresh instance.
    pub fn build(&self, registry: &Registry, overrides: AttributeMap) -> Result<Box<dyn Model>> {
        self.produce(registry, overrides, Strategy::Build, 0)
    }

    /// Like [`build`](Self::build), then persist the instance.
    pub fn create(&self, registry: &Registry, overrides: AttributeMap) -> Result<Box<dyn Model>> {
        self.produce(registry, overrides, Strategy::Create, 0)
    }

    pub(crate) fn resolve_at(
        &self,
        registry: &Registry,
        overrides: AttributeMap,
        strategy: Strategy,
        depth: usize,
    ) -> Result<AttributeMap> {
        let aliases = registry.aliases();
        let mut resolved = overrides.clone();

        for attribute in &self.attributes {
            if aliases.is_defined(&overrides, attribute.name()) {
                trace!(
                    blueprint = %self.name,
                    attribute = %attribute.name(),
                    %strategy,
                    "attribute overridden"
                );
                continue;
            }

            let value = {
                let context = ResolutionContext::new(
                    registry,
                    self,
                    attribute.name(),
                    strategy,
                    &resolved,
                    depth,
                );
                attribute.value(&context)?
            };
            trace!(
                blueprint = %self.name,
                attribute = %attribute.name(),
                %strategy,
                kind = value.kind(),
                "attribute resolved"
            );
            resolved.insert(attribute.name(), value);
        }

        Ok(resolved)
    }

    /// Resolve, instantiate, and, for `create`, persist.
    pub(crate) fn produce(
        &self,
        registry: &Registry,
        overrides: AttributeMap,
        strategy: Strategy,
        depth: usize,
    ) -> Result<Box<dyn Model>> {
        let attributes = self.resolve_at(registry, overrides, strategy, depth)?;
        let mut instance = self.instantiate(attributes)?;

        if strategy.persists() {
            instance
                .save()
                .map_err(|source| FactoryError::Validation {
                    blueprint: self.name.clone(),
                    source,
                })?;
            debug!(blueprint = %self.name, class = %self.class.name(), "instance persisted");
        }

        Ok(instance)
    }

    fn instantiate(&self, attributes: AttributeMap) -> Result<Box<dyn Model>> {
        let mut instance = self.class.instantiate();
        for (name, value) in attributes {
            instance
                .set_attribute(&name, value)
                .map_err(|source| FactoryError::Field {
                    blueprint: self.name.clone(),
                    source,
                })?;
        }
        Ok(instance)
    }
}
