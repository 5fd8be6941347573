use std::sync::Arc;

use fixtura_core::{AttributeMap, Value};

use crate::attribute::{Attribute, AttributeSource, Computation};
use crate::blueprint::Blueprint;
use crate::context::ResolutionContext;
use crate::errors::Result;
use crate::sequence::Sequence;

/// How an association attribute finds and builds its blueprint.
#[derive(Debug, Clone, Default)]
pub struct AssociationOptions {
    /// Blueprint to build; defaults to the attribute name.
    pub factory: Option<String>,
    /// Overrides forwarded to the associated blueprint.
    pub overrides: AttributeMap,
}

impl AssociationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn factory(mut self, name: impl Into<String>) -> Self {
        self.factory = Some(name.into());
        self
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.overrides.insert(name, value);
        self
    }
}

/// Receiver of a `define` block: adds attributes to the blueprint under
/// construction, in order.
#[derive(Debug)]
pub struct BlueprintBuilder {
    blueprint: Blueprint,
}

impl BlueprintBuilder {
    pub(crate) fn new(blueprint: Blueprint) -> Self {
        Self { blueprint }
    }

    pub(crate) fn finish(self) -> Blueprint {
        self.blueprint
    }

    pub fn name(&self) -> &str {
        self.blueprint.name()
    }

    pub fn add_attribute(&mut self, attribute: Attribute) -> Result<&mut Self> {
        self.blueprint.add_attribute(attribute)?;
        Ok(self)
    }

    /// Static value, cloned into every resolution.
    pub fn value(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Result<&mut Self> {
        self.add_attribute(Attribute::fixed(name, value)?)
    }

    /// Value computed per resolution from the context.
    pub fn lazy<F, V>(&mut self, name: impl Into<String>, computation: F) -> Result<&mut Self>
    where
        F: Fn(&ResolutionContext<'_>) -> Result<V> + Send + Sync + 'static,
        V: Into<Value>,
    {
        let computation: Computation =
            Arc::new(move |ctx: &ResolutionContext<'_>| -> Result<Value> {
                computation(ctx).map(Into::into)
            });
        self.add_attribute(Attribute::new(name, AttributeSource::Deferred(computation))?)
    }

    /// Value drawn from a counter owned by this attribute.
    pub fn sequence<F>(&mut self, name: impl Into<String>, generator: F) -> Result<&mut Self>
    where
        F: Fn(u64) -> Value + Send + Sync + 'static,
    {
        let sequence = Sequence::new(generator);
        self.lazy(name, move |_| Ok(sequence.next_value()))
    }

    /// Instance built from another blueprint under the active strategy.
    pub fn association(
        &mut self,
        name: impl Into<String>,
        options: AssociationOptions,
    ) -> Result<&mut Self> {
        let name = name.into();
        let AssociationOptions { factory, overrides } = options;
        let factory = factory.unwrap_or_else(|| name.clone());
        self.lazy(name, move |ctx| ctx.association_with(&factory, overrides.clone()))
    }
}
