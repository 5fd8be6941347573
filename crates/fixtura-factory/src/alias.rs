use regex::Regex;

use fixtura_core::AttributeMap;

use crate::errors::{FactoryError, Result};

/// Rewrites one attribute name into an alternate override key.
#[derive(Debug, Clone)]
pub struct AliasRule {
    pattern: Regex,
    replacement: String,
}

impl AliasRule {
    /// `replacement` uses `regex` expansion syntax (`${1}`).
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|err| {
            FactoryError::Config(format!("invalid alias pattern '{pattern}': {err}"))
        })?;
        Ok(Self {
            pattern,
            replacement: replacement.into(),
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    fn rewrite(&self, name: &str) -> Option<String> {
        if !self.pattern.is_match(name) {
            return None;
        }
        Some(self.pattern.replace(name, self.replacement.as_str()).into_owned())
    }
}

const DEFAULT_RULES: [(&str, &str); 2] = [("^(.+)_id$", "${1}"), ("^(.+)$", "${1}_id")];

/// Ordered alias rules consulted when matching overrides to attributes.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    rules: Vec<AliasRule>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// `author_id` and `author` are mutual aliases.
    pub fn with_defaults() -> Self {
        let rules = DEFAULT_RULES
            .iter()
            .filter_map(|(pattern, replacement)| AliasRule::new(pattern, *replacement).ok())
            .collect();
        Self { rules }
    }

    pub fn push(&mut self, rule: AliasRule) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule rewrites of `name` in rule order, then `name` itself.
    pub fn aliases_for(&self, name: &str) -> Vec<String> {
        let mut aliases: Vec<String> = self
            .rules
            .iter()
            .filter_map(|rule| rule.rewrite(name))
            .collect();
        aliases.push(name.to_string());
        aliases
    }

    /// Whether `name`, under any of its aliases, is a key of `attributes`.
    pub fn is_defined(&self, attributes: &AttributeMap, name: &str) -> bool {
        self.aliases_for(name)
            .iter()
            .any(|alias| attributes.contains_key(alias))
    }
}
