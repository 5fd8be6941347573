use std::sync::Arc;

use tracing::trace;

use fixtura_core::{AttributeMap, Strategy, Value};

use crate::blueprint::Blueprint;
use crate::errors::{FactoryError, Result};
use crate::registry::Registry;

/// Capability handed to a deferred attribute while it is evaluated.
///
/// It exposes the values resolved so far in this call (overrides first, then
/// earlier declarations), the active strategy, and association building
/// under that same strategy.
#[derive(Debug)]
pub struct ResolutionContext<'a> {
    registry: &'a Registry,
    blueprint: &'a Blueprint,
    attribute: &'a str,
    strategy: Strategy,
    resolved: &'a AttributeMap,
    depth: usize,
}

impl<'a> ResolutionContext<'a> {
    pub(crate) fn new(
        registry: &'a Registry,
        blueprint: &'a Blueprint,
        attribute: &'a str,
        strategy: Strategy,
        resolved: &'a AttributeMap,
        depth: usize,
    ) -> Self {
        Self {
            registry,
            blueprint,
            attribute,
            strategy,
            resolved,
            depth,
        }
    }

    pub fn blueprint_name(&self) -> &str {
        self.blueprint.name()
    }

    /// Name of the attribute being computed.
    pub fn attribute_name(&self) -> &str {
        self.attribute
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Everything resolved so far in this call.
    pub fn attributes(&self) -> &AttributeMap {
        self.resolved
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.resolved.get(name)
    }

    /// Like [`get`](Self::get), failing when the sibling has no value yet.
    pub fn require(&self, name: &str) -> Result<&Value> {
        self.resolved
            .get(name)
            .ok_or_else(|| FactoryError::MissingAttribute {
                blueprint: self.blueprint.name().to_string(),
                attribute: name.to_string(),
            })
    }

    /// Next value of a registry-level sequence.
    pub fn sequence(&self, name: &str) -> Result<Value> {
        self.registry.next(name)
    }

    pub fn association(&self, blueprint: &str) -> Result<Value> {
        self.association_with(blueprint, AttributeMap::new())
    }

    /// Build `blueprint` with the current strategy.
    ///
    /// Under `attributes_only` nothing is instantiated and the value is
    /// `Null`; the blueprint name is still checked.
    pub fn association_with(&self, blueprint: &str, overrides: AttributeMap) -> Result<Value> {
        let associated = self.registry.lookup(blueprint)?;
        if !self.strategy.instantiates() {
            trace!(
                blueprint = %self.blueprint.name(),
                attribute = %self.attribute,
                association = %blueprint,
                "association skipped for attributes_only"
            );
            return Ok(Value::Null);
        }

        let depth = self.depth + 1;
        let limit = self.registry.config().max_association_depth;
        if depth > limit {
            return Err(FactoryError::AssociationDepthExceeded {
                blueprint: blueprint.to_string(),
                limit,
            });
        }

        let instance = associated.produce(self.registry, overrides, self.strategy, depth)?;
        Ok(Value::Instance(Arc::from(instance)))
    }
}
