//! Substitution engine for $(arg) and $(env) patterns

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Regex for matching substitution patterns: $(type value)
static SUBSTITUTION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\((\w+)\s+([^)]+)\)|\$\((\w+)\)").unwrap());

/// A text template evaluated lazily against a [`SubstitutionContext`].
///
/// Holding the template instead of the value means every reference to the
/// same argument observes whatever value the context binds at evaluation time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Substitution(String);

impl Substitution {
    /// A plain text value with no substitutions
    pub fn text(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// A reference to a launch argument: `$(arg name)`
    pub fn arg(name: &str) -> Self {
        Self(format!("$(arg {})", name))
    }

    /// The raw template
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Names of all launch arguments referenced by this template
    pub fn referenced_args(&self) -> Vec<String> {
        SUBSTITUTION_PATTERN
            .captures_iter(&self.0)
            .filter_map(|caps| match (caps.get(1), caps.get(2)) {
                (Some(kind), Some(value)) if kind.as_str() == "arg" => {
                    Some(value.as_str().trim().to_string())
                }
                _ => None,
            })
            .collect()
    }

    /// Evaluate the template
    pub fn resolve(&self, ctx: &SubstitutionContext) -> Result<String, SubstitutionError> {
        ctx.substitute(&self.0)
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Substitution context containing all available variables
///
/// Bound argument values are opaque: a value that happens to look like a
/// template is never expanded again.
#[derive(Debug, Clone, Default)]
pub struct SubstitutionContext {
    /// Launch arguments
    pub args: HashMap<String, String>,
}

impl SubstitutionContext {
    /// Create a new substitution context
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an argument
    pub fn with_arg(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.insert(name.into(), value.into());
        self
    }

    /// Substitute all patterns in a string
    ///
    /// Replacement text is not rescanned, so one pass is final.
    pub fn substitute(&self, input: &str) -> Result<String, SubstitutionError> {
        let mut error: Option<SubstitutionError> = None;

        let result = SUBSTITUTION_PATTERN.replace_all(input, |caps: &Captures| {
            if error.is_some() {
                return String::new();
            }

            match self.resolve_capture(caps) {
                Ok(value) => value,
                Err(e) => {
                    error = Some(e);
                    String::new()
                }
            }
        });

        if let Some(e) = error {
            return Err(e);
        }

        Ok(result.into_owned())
    }

    /// Resolve a single capture group
    fn resolve_capture(&self, caps: &Captures) -> Result<String, SubstitutionError> {
        if let (Some(subst_type), Some(value)) = (caps.get(1), caps.get(2)) {
            return self.resolve_typed(subst_type.as_str(), value.as_str().trim());
        }

        if let Some(subst_type) = caps.get(3) {
            return self.resolve_typed(subst_type.as_str(), "");
        }

        Err(SubstitutionError::InvalidPattern(
            caps.get(0).map(|m| m.as_str().to_string()).unwrap_or_default(),
        ))
    }

    fn resolve_typed(&self, subst_type: &str, value: &str) -> Result<String, SubstitutionError> {
        match (subst_type, value) {
            ("arg", "") | ("env", "") => Err(SubstitutionError::InvalidPattern(format!(
                "$({})",
                subst_type
            ))),
            ("arg", name) => self.resolve_arg(name),
            ("env", name) => self.resolve_env(name),
            _ => Err(SubstitutionError::UnknownType(subst_type.to_string())),
        }
    }

    fn resolve_arg(&self, name: &str) -> Result<String, SubstitutionError> {
        self.args
            .get(name)
            .cloned()
            .ok_or_else(|| SubstitutionError::UndefinedArg(name.to_string()))
    }

    fn resolve_env(&self, name: &str) -> Result<String, SubstitutionError> {
        std::env::var(name).map_err(|_| SubstitutionError::UndefinedEnv(name.to_string()))
    }
}

/// Errors that can occur during substitution
#[derive(Debug, thiserror::Error)]
pub enum SubstitutionError {
    #[error("Unknown substitution type: {0}")]
    UnknownType(String),

    #[error("Undefined argument: {0}")]
    UndefinedArg(String),

    #[error("Undefined environment variable: {0}")]
    UndefinedEnv(String),

    #[error("Invalid substitution pattern: {0}")]
    InvalidPattern(String),
}
