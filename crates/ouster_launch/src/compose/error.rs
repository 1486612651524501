use crate::config::SubstitutionError;
use std::path::PathBuf;

/// Errors that abort a composition
///
/// None of these are recoverable at this layer: either a complete plan is
/// produced or the caller gets one of these.
#[derive(Debug, thiserror::Error)]
pub enum CompositionError {
    #[error("Launch argument '{0}' is declared more than once")]
    DuplicateArgument(String),

    #[error("Package '{package}' not found in install prefixes: {}", format_prefixes(.searched))]
    PackageNotFound {
        package: String,
        searched: Vec<PathBuf>,
    },

    #[error("{context} references undeclared launch argument '{argument}'")]
    UnresolvedReference { argument: String, context: String },

    #[error("Override for unknown launch argument '{0}'")]
    UnknownArgument(String),

    #[error("Unit '{unit}' uses namespace '{unit_namespace}' but container '{container}' uses '{container_namespace}'")]
    NamespaceMismatch {
        unit: String,
        unit_namespace: String,
        container: String,
        container_namespace: String,
    },

    #[error("Substitution failed in {context}: {source}")]
    SubstitutionFailed {
        context: String,
        #[source]
        source: SubstitutionError,
    },
}

fn format_prefixes(prefixes: &[PathBuf]) -> String {
    if prefixes.is_empty() {
        return "(none)".to_string();
    }
    prefixes
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
