use serde::{Deserialize, Serialize};

use crate::errors::{FactoryError, Result};

/// Options accepted by `define`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefineOptions {
    /// Registered model class to instantiate. Defaults to the blueprint name
    /// in camel case.
    #[serde(default)]
    pub class: Option<String>,
}

impl DefineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self {
            class: Some(name.into()),
        }
    }

    /// Parse options from loose JSON, rejecting unsupported keys.
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|err| FactoryError::InvalidOption(err.to_string()))
    }

    pub(crate) fn class_for(&self, blueprint: &str) -> String {
        self.class
            .clone()
            .unwrap_or_else(|| class_name_for(blueprint))
    }
}

/// `blog_post` -> `BlogPost`.
pub fn class_name_for(blueprint: &str) -> String {
    blueprint
        .split(['_', '-', ' '])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn camel_cases_blueprint_names() {
        assert_eq!(class_name_for("user"), "User");
        assert_eq!(class_name_for("blog_post"), "BlogPost");
        assert_eq!(class_name_for("admin-user"), "AdminUser");
    }

    #[test]
    fn rejects_unsupported_keys() {
        let err = DefineOptions::from_json(json!({"class": "User", "parent": "base"}))
            .expect_err("parent is not supported");
        assert!(matches!(err, FactoryError::InvalidOption(_)));
    }

    #[test]
    fn explicit_class_wins() {
        let options = DefineOptions::from_json(json!({"class": "Account"})).expect("valid");
        assert_eq!(options.class_for("user"), "Account");
        assert_eq!(DefineOptions::new().class_for("user"), "User");
    }
}
