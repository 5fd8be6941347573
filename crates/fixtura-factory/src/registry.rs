use std::collections::BTreeMap;

use tracing::debug;

use fixtura_core::{AttributeMap, Model, ModelClass, Strategy, Value, downcast_model};

use crate::alias::{AliasRule, AliasTable};
use crate::blueprint::Blueprint;
use crate::config::RegistryConfig;
use crate::declare::BlueprintBuilder;
use crate::errors::{FactoryError, Result};
use crate::options::DefineOptions;
use crate::sequence::Sequence;

/// Output of [`Registry::run`].
#[derive(Debug)]
pub enum Product {
    Attributes(AttributeMap),
    Instance(Box<dyn Model>),
}

impl Product {
    pub fn into_attributes(self) -> Option<AttributeMap> {
        match self {
            Product::Attributes(attributes) => Some(attributes),
            Product::Instance(_) => None,
        }
    }

    pub fn into_instance(self) -> Option<Box<dyn Model>> {
        match self {
            Product::Instance(instance) => Some(instance),
            Product::Attributes(_) => None,
        }
    }
}

/// Setup phase of a registry: model classes, sequences, and blueprints are
/// declared here, then [`freeze`](Self::freeze) hands out the read-only
/// [`Registry`].
#[derive(Debug)]
pub struct RegistryBuilder {
    config: RegistryConfig,
    aliases: AliasTable,
    classes: BTreeMap<String, ModelClass>,
    blueprints: BTreeMap<String, Blueprint>,
    sequences: BTreeMap<String, Sequence>,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            config: RegistryConfig::default(),
            aliases: AliasTable::with_defaults(),
            classes: BTreeMap::new(),
            blueprints: BTreeMap::new(),
            sequences: BTreeMap::new(),
        }
    }

    pub fn with_config(config: RegistryConfig) -> Result<Self> {
        config.validate()?;
        let aliases = config.alias_table()?;
        Ok(Self {
            config,
            aliases,
            ..Self::new()
        })
    }

    pub fn register_class(&mut self, class: ModelClass) -> Result<&mut Self> {
        if self.classes.contains_key(class.name()) {
            return Err(FactoryError::DuplicateClass(class.name().to_string()));
        }
        self.classes.insert(class.name().to_string(), class);
        Ok(self)
    }

    /// Register `T` under `class_name`, constructed with `T::default()`.
    pub fn register_model<T: Model + Default>(
        &mut self,
        class_name: impl Into<String>,
    ) -> Result<&mut Self> {
        self.register_class(ModelClass::of::<T>(class_name))
    }

    /// Append an alias rule after the configured ones.
    pub fn alias(&mut self, pattern: &str, replacement: &str) -> Result<&mut Self> {
        self.aliases.push(AliasRule::new(pattern, replacement)?);
        Ok(self)
    }

    /// Named sequence shared by every blueprint of the registry.
    pub fn sequence<F>(&mut self, name: impl Into<String>, generator: F) -> Result<&mut Self>
    where
        F: Fn(u64) -> Value + Send + Sync + 'static,
    {
        let name = name.into();
        if self.sequences.contains_key(&name) {
            return Err(FactoryError::DuplicateSequence(name));
        }
        self.sequences.insert(name, Sequence::new(generator));
        Ok(self)
    }

    /// Declare a blueprint.
    ///
    /// The model class is resolved now, before `declare` runs. Nothing is
    /// registered when the name is taken, the class is unknown, or `declare`
    /// fails.
    pub fn define<F>(
        &mut self,
        name: impl Into<String>,
        options: DefineOptions,
        declare: F,
    ) -> Result<&mut Self>
    where
        F: FnOnce(&mut BlueprintBuilder) -> Result<()>,
    {
        let name = name.into();
        if self.blueprints.contains_key(&name) {
            return Err(FactoryError::DuplicateBlueprint(name));
        }

        let class_name = options.class_for(&name);
        let class = self
            .classes
            .get(&class_name)
            .cloned()
            .ok_or_else(|| FactoryError::UnknownClass {
                blueprint: name.clone(),
                class: class_name.clone(),
            })?;

        let mut builder = BlueprintBuilder::new(Blueprint::new(name.clone(), class));
        declare(&mut builder)?;
        let blueprint = builder.finish();

        debug!(
            blueprint = %name,
            class = %class_name,
            attributes = blueprint.attributes().len(),
            "blueprint registered"
        );
        self.blueprints.insert(name, blueprint);
        Ok(self)
    }

    /// End the setup phase.
    pub fn freeze(self) -> Registry {
        debug!(
            blueprints = self.blueprints.len(),
            sequences = self.sequences.len(),
            aliases = self.aliases.len(),
            "registry frozen"
        );
        Registry {
            config: self.config,
            aliases: self.aliases,
            blueprints: self.blueprints,
            sequences: self.sequences,
        }
    }
}

/// Read-only set of blueprints. Shareable across threads once frozen; only
/// sequence counters change, atomically.
#[derive(Debug)]
pub struct Registry {
    config: RegistryConfig,
    aliases: AliasTable,
    blueprints: BTreeMap<String, Blueprint>,
    sequences: BTreeMap<String, Sequence>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn aliases_for(&self, name: &str) -> Vec<String> {
        self.aliases.aliases_for(name)
    }

    pub fn blueprint(&self, name: &str) -> Option<&Blueprint> {
        self.blueprints.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.blueprints.contains_key(name)
    }

    /// Blueprint names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.blueprints.keys().map(String::as_str)
    }

    pub(crate) fn lookup(&self, name: &str) -> Result<&Blueprint> {
        self.blueprints
            .get(name)
            .ok_or_else(|| FactoryError::UnknownBlueprint(name.to_string()))
    }

    /// Next value of a named sequence.
    pub fn next(&self, sequence: &str) -> Result<Value> {
        self.sequences
            .get(sequence)
            .map(Sequence::next_value)
            .ok_or_else(|| FactoryError::UnknownSequence(sequence.to_string()))
    }

    pub fn attributes_for(&self, name: &str, overrides: AttributeMap) -> Result<AttributeMap> {
        self.lookup(name)?.attributes_for(self, overrides)
    }

    pub fn build(&self, name: &str, overrides: AttributeMap) -> Result<Box<dyn Model>> {
        self.lookup(name)?.build(self, overrides)
    }

    pub fn create(&self, name: &str, overrides: AttributeMap) -> Result<Box<dyn Model>> {
        self.lookup(name)?.create(self, overrides)
    }

    pub fn build_as<T: Model>(&self, name: &str, overrides: AttributeMap) -> Result<T> {
        downcast(name, self.build(name, overrides)?)
    }

    pub fn create_as<T: Model>(&self, name: &str, overrides: AttributeMap) -> Result<T> {
        downcast(name, self.create(name, overrides)?)
    }

    /// Dispatch on a strategy chosen at runtime.
    pub fn run(&self, name: &str, strategy: Strategy, overrides: AttributeMap) -> Result<Product> {
        let blueprint = self.lookup(name)?;
        match strategy {
            Strategy::AttributesOnly => blueprint
                .attributes_for(self, overrides)
                .map(Product::Attributes),
            Strategy::Build => blueprint.build(self, overrides).map(Product::Instance),
            Strategy::Create => blueprint.create(self, overrides).map(Product::Instance),
        }
    }
}

fn downcast<T: Model>(blueprint: &str, instance: Box<dyn Model>) -> Result<T> {
    downcast_model::<T>(instance)
        .map(|instance| *instance)
        .ok_or_else(|| FactoryError::ModelTypeMismatch {
            blueprint: blueprint.to_string(),
            expected: std::any::type_name::<T>(),
        })
}
