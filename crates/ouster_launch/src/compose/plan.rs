//! Plan assembly and evaluation

use crate::compose::{
    CompositionError, ConditionalInclusion, Container, InclusionTarget, LaunchArgument,
    StandaloneUnit,
};
use crate::config::{OutputMode, Substitution, SubstitutionContext};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

/// Declarative launch plan handed to the supervisor
///
/// Immutable once assembled. Conditions are attached, not evaluated; see
/// [`Plan::resolve`] for the evaluation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    arguments: Vec<LaunchArgument>,
    container: Container,
    inclusions: Vec<ConditionalInclusion>,
}

/// One top-level entry of a plan, in launch order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchAction<'a> {
    DeclareArgument(&'a LaunchArgument),
    Container(&'a Container),
    Conditional(&'a ConditionalInclusion),
}

impl Plan {
    /// Assemble a plan
    ///
    /// Declarations come first, then the container, then the inclusions in
    /// the given order, so nothing can reference an argument declared after
    /// it. Every argument referenced anywhere must be among `arguments`.
    pub fn assemble(
        arguments: Vec<LaunchArgument>,
        container: Container,
        inclusions: Vec<ConditionalInclusion>,
    ) -> Result<Self, CompositionError> {
        let mut declared: HashSet<&str> = HashSet::new();
        for argument in &arguments {
            if !declared.insert(argument.name.as_str()) {
                return Err(CompositionError::DuplicateArgument(argument.name.clone()));
            }
        }

        let substitutions = container
            .substitutions()
            .into_iter()
            .chain(inclusions.iter().flat_map(|i| i.substitutions()));
        for (context, substitution) in substitutions {
            check_references(&declared, &context, substitution)?;
        }

        log::debug!(
            "Assembled plan: {} arguments, {} units in '{}', {} conditional inclusions",
            arguments.len(),
            container.units.len(),
            container.name,
            inclusions.len()
        );

        Ok(Self {
            arguments,
            container,
            inclusions,
        })
    }

    pub fn arguments(&self) -> &[LaunchArgument] {
        &self.arguments
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn inclusions(&self) -> &[ConditionalInclusion] {
        &self.inclusions
    }

    /// Top-level entries in launch order
    pub fn actions(&self) -> impl Iterator<Item = LaunchAction<'_>> {
        self.arguments
            .iter()
            .map(LaunchAction::DeclareArgument)
            .chain(std::iter::once(LaunchAction::Container(&self.container)))
            .chain(self.inclusions.iter().map(LaunchAction::Conditional))
    }

    /// Bind argument defaults and `overrides` into a fresh context
    pub fn context(
        &self,
        overrides: &HashMap<String, String>,
    ) -> Result<SubstitutionContext, CompositionError> {
        if let Some(name) = overrides
            .keys()
            .find(|name| !self.arguments.iter().any(|a| &a.name == *name))
        {
            return Err(CompositionError::UnknownArgument(name.clone()));
        }

        // Values are bound verbatim; they are never parsed as templates
        let ctx = self
            .arguments
            .iter()
            .fold(SubstitutionContext::new(), |ctx, argument| {
                let value = overrides.get(&argument.name).unwrap_or(&argument.default);
                ctx.with_arg(argument.name.as_str(), value.as_str())
            });
        Ok(ctx)
    }

    /// Evaluate the plan against invoker overrides
    pub fn resolve(
        &self,
        overrides: &HashMap<String, String>,
    ) -> Result<ResolvedPlan, CompositionError> {
        let ctx = self.context(overrides)?;

        let mut arguments = IndexMap::new();
        for argument in &self.arguments {
            let value = ctx
                .args
                .get(&argument.name)
                .cloned()
                .unwrap_or_else(|| argument.default.clone());
            arguments.insert(argument.name.clone(), value);
        }

        let namespace = substitute(&ctx, &self.container.namespace, || {
            format!("container '{}' namespace", self.container.name)
        })?;

        let mut units = Vec::with_capacity(self.container.units.len());
        for unit in &self.container.units {
            units.push(ResolvedUnit {
                package: unit.package.clone(),
                plugin: unit.plugin.clone(),
                name: unit.name.clone(),
                namespace: substitute(&ctx, &unit.namespace, || {
                    format!("unit '{}' namespace", unit.name)
                })?,
                parameters: unit.parameters.iter().map(|p| p.path().to_path_buf()).collect(),
            });
        }

        let mut standalone = Vec::new();
        let mut includes = Vec::new();
        for inclusion in &self.inclusions {
            let enabled = inclusion.condition.evaluate(&ctx).map_err(|e| {
                CompositionError::SubstitutionFailed {
                    context: inclusion.label(),
                    source: e,
                }
            })?;
            if !enabled {
                log::debug!("Condition {:?} is false, skipping", inclusion.condition);
                continue;
            }
            match &inclusion.target {
                InclusionTarget::Unit(unit) => standalone.push(unit.clone()),
                InclusionTarget::SubGraph(graph) => includes.push(graph.path.clone()),
            }
        }

        Ok(ResolvedPlan {
            arguments,
            namespace: namespace.clone(),
            container: ResolvedContainer {
                name: self.container.name.clone(),
                namespace,
                package: self.container.package.clone(),
                executable: self.container.executable.clone(),
                output: self.container.output,
                units,
            },
            standalone,
            includes,
        })
    }
}

fn check_references(
    declared: &HashSet<&str>,
    context: &str,
    substitution: &Substitution,
) -> Result<(), CompositionError> {
    for argument in substitution.referenced_args() {
        if !declared.contains(argument.as_str()) {
            return Err(CompositionError::UnresolvedReference {
                argument,
                context: context.to_string(),
            });
        }
    }
    Ok(())
}

fn substitute(
    ctx: &SubstitutionContext,
    substitution: &Substitution,
    context: impl FnOnce() -> String,
) -> Result<String, CompositionError> {
    substitution
        .resolve(ctx)
        .map_err(|e| CompositionError::SubstitutionFailed {
            context: context(),
            source: e,
        })
}

/// A plan with every substitution and condition evaluated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPlan {
    /// Argument values in declaration order
    pub arguments: IndexMap<String, String>,
    pub namespace: String,
    pub container: ResolvedContainer,
    /// Standalone units whose condition held
    pub standalone: Vec<StandaloneUnit>,
    /// Sub-graph files whose condition held
    pub includes: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedContainer {
    pub name: String,
    pub namespace: String,
    pub package: String,
    pub executable: String,
    pub output: OutputMode,
    pub units: Vec<ResolvedUnit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedUnit {
    pub package: String,
    pub plugin: String,
    pub name: String,
    pub namespace: String,
    pub parameters: Vec<PathBuf>,
}

/// Display the resolved plan in a human-readable format
impl std::fmt::Display for ResolvedPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Launch Plan")?;
        writeln!(f, "===========")?;
        writeln!(f)?;

        if !self.arguments.is_empty() {
            writeln!(f, "Arguments:")?;
            for (key, value) in &self.arguments {
                writeln!(f, "  {}: {}", key, value)?;
            }
            writeln!(f)?;
        }

        let container = &self.container;
        writeln!(
            f,
            "Container: {} ({} {}) [ns: {}, output: {}]",
            container.name,
            container.package,
            container.executable,
            container.namespace,
            container.output.as_str()
        )?;
        for (i, unit) in container.units.iter().enumerate() {
            writeln!(f, "  {}. {} <{}>", i + 1, unit.name, unit.plugin)?;
            writeln!(f, "     Namespace: {}", unit.namespace)?;
            for param in &unit.parameters {
                writeln!(f, "     Parameters: {}", param.display())?;
            }
        }

        if !self.standalone.is_empty() {
            writeln!(f)?;
            writeln!(f, "Standalone units:")?;
            for unit in &self.standalone {
                writeln!(
                    f,
                    "  {}: {} {} {}",
                    unit.name,
                    unit.package,
                    unit.executable,
                    unit.arguments.join(" ")
                )?;
            }
        }

        if !self.includes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Included launch files:")?;
            for path in &self.includes {
                writeln!(f, "  {}", path.display())?;
            }
        }

        Ok(())
    }
}
