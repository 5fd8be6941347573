use std::path::Path;

use schemars::JsonSchema;
use schemars::schema::RootSchema;
use schemars::schema_for;
use serde::{Deserialize, Serialize};

use crate::alias::{AliasRule, AliasTable};
use crate::errors::{FactoryError, Result};

/// Registry-wide settings, usually loaded from `fixtura.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// Deepest chain of nested associations a single call may build.
    pub max_association_depth: usize,
    /// Override-key aliasing.
    pub aliases: AliasConfig,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_association_depth: 16,
            aliases: AliasConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct AliasConfig {
    /// Install the `<name>` / `<name>_id` rules before custom ones.
    pub use_defaults: bool,
    pub rules: Vec<AliasRuleConfig>,
}

impl Default for AliasConfig {
    fn default() -> Self {
        Self {
            use_defaults: true,
            rules: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct AliasRuleConfig {
    /// Regular expression matched against attribute names.
    pub pattern: String,
    /// Expansion producing the alias, e.g. `${1}`.
    pub replacement: String,
}

impl RegistryConfig {
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(input).map_err(|err| FactoryError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|err| {
            FactoryError::Config(format!("failed to read {}: {err}", path.display()))
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_association_depth == 0 {
            return Err(FactoryError::Config(
                "max_association_depth must be at least 1".to_string(),
            ));
        }
        self.alias_table().map(|_| ())
    }

    /// Compile the configured alias rules.
    pub fn alias_table(&self) -> Result<AliasTable> {
        let mut table = if self.aliases.use_defaults {
            AliasTable::with_defaults()
        } else {
            AliasTable::new()
        };
        for rule in &self.aliases.rules {
            table.push(AliasRule::new(&rule.pattern, rule.replacement.clone())?);
        }
        Ok(table)
    }
}

/// Emit the JSON Schema for `fixtura.toml`.
pub fn registry_config_json_schema() -> RootSchema {
    schema_for!(RegistryConfig)
}
