use std::fmt;

use serde::{Deserialize, Serialize};

/// How far a resolution goes: plain attributes, an unsaved instance, or a
/// persisted instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    AttributesOnly,
    Build,
    Create,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::AttributesOnly => "attributes_only",
            Strategy::Build => "build",
            Strategy::Create => "create",
        }
    }

    /// Whether this strategy produces a model instance.
    pub fn instantiates(&self) -> bool {
        !matches!(self, Strategy::AttributesOnly)
    }

    /// Whether this strategy calls the model's persistence operation.
    pub fn persists(&self) -> bool {
        matches!(self, Strategy::Create)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
