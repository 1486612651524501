//! Launch argument declarations

use crate::compose::CompositionError;
use crate::config::Substitution;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A declared launch argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchArgument {
    pub name: String,
    pub default: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl LaunchArgument {
    /// Lazy reference to this argument's value
    pub fn substitution(&self) -> Substitution {
        Substitution::arg(&self.name)
    }
}

/// Ordered set of launch argument declarations
#[derive(Debug, Clone, Default)]
pub struct ArgumentRegistry {
    arguments: IndexMap<String, LaunchArgument>,
}

impl ArgumentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an argument with a default value
    pub fn declare(
        &mut self,
        name: impl Into<String>,
        default: impl Into<String>,
    ) -> Result<LaunchArgument, CompositionError> {
        self.insert(LaunchArgument {
            name: name.into(),
            default: default.into(),
            description: None,
        })
    }

    /// Declare an argument with a default value and a human-readable description
    pub fn declare_with_description(
        &mut self,
        name: impl Into<String>,
        default: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<LaunchArgument, CompositionError> {
        self.insert(LaunchArgument {
            name: name.into(),
            default: default.into(),
            description: Some(description.into()),
        })
    }

    fn insert(&mut self, argument: LaunchArgument) -> Result<LaunchArgument, CompositionError> {
        if self.arguments.contains_key(&argument.name) {
            return Err(CompositionError::DuplicateArgument(argument.name));
        }
        log::debug!(
            "Declared launch argument '{}' (default: '{}')",
            argument.name,
            argument.default
        );
        self.arguments
            .insert(argument.name.clone(), argument.clone());
        Ok(argument)
    }

    /// Arguments in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &LaunchArgument> {
        self.arguments.values()
    }

    pub fn into_arguments(self) -> Vec<LaunchArgument> {
        self.arguments.into_values().collect()
    }
}
