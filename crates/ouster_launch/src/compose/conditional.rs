//! Condition-gated standalone units and sub-graph includes
//!
//! The composer only attaches conditions. Whether a tagged entity runs is
//! decided when the plan is evaluated against the launch arguments.

use crate::config::{Substitution, SubstitutionContext, SubstitutionError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Boolean gate on a launch entity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    /// Holds when the expression resolves to a truthy value
    If(Substitution),
}

impl Condition {
    /// Condition on the value of a launch argument
    pub fn if_arg(name: &str) -> Self {
        Condition::If(Substitution::arg(name))
    }

    pub fn expression(&self) -> &Substitution {
        match self {
            Condition::If(expr) => expr,
        }
    }

    /// Evaluate against resolved launch arguments
    pub fn evaluate(&self, ctx: &SubstitutionContext) -> Result<bool, SubstitutionError> {
        match self {
            Condition::If(expr) => Ok(is_truthy(&expr.resolve(ctx)?)),
        }
    }
}

/// Truthiness of a resolved condition value (case-sensitive)
pub fn is_truthy(value: &str) -> bool {
    matches!(value, "True" | "true" | "1")
}

/// A unit run on its own, outside any container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandaloneUnit {
    pub package: String,
    pub executable: String,
    pub name: String,
    #[serde(default)]
    pub arguments: Vec<String>,
}

/// Identity transform publisher between two frames
///
/// Lets a visualization client render before the sensor publishes its own
/// frames.
pub fn static_transform_publisher(name: &str, parent: &str, child: &str) -> StandaloneUnit {
    let mut arguments: Vec<String> = ["0", "0", "0", "0", "0", "0"]
        .iter()
        .map(|v| v.to_string())
        .collect();
    arguments.push(parent.to_string());
    arguments.push(child.to_string());

    StandaloneUnit {
        package: "tf2_ros".to_string(),
        executable: "static_transform_publisher".to_string(),
        name: name.to_string(),
        arguments,
    }
}

/// File reference to a separately defined launch description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubGraphReference {
    pub path: PathBuf,
}

/// What a conditional inclusion brings in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InclusionTarget {
    SubGraph(SubGraphReference),
    Unit(StandaloneUnit),
}

/// An entity tagged with the condition that gates it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionalInclusion {
    pub condition: Condition,
    pub target: InclusionTarget,
}

impl ConditionalInclusion {
    /// Names the gated entity in error messages
    pub(crate) fn label(&self) -> String {
        match &self.target {
            InclusionTarget::SubGraph(graph) => {
                format!("include '{}' condition", graph.path.display())
            }
            InclusionTarget::Unit(unit) => format!("unit '{}' condition", unit.name),
        }
    }

    /// Every substitution carried by the inclusion, with a label
    pub(crate) fn substitutions(&self) -> Vec<(String, &Substitution)> {
        vec![(self.label(), self.condition.expression())]
    }
}

/// Include a launch description by reference when `condition` holds
pub fn include_if(condition: &Condition, sub_graph: impl Into<PathBuf>) -> ConditionalInclusion {
    ConditionalInclusion {
        condition: condition.clone(),
        target: InclusionTarget::SubGraph(SubGraphReference {
            path: sub_graph.into(),
        }),
    }
}

/// Run a standalone unit when `condition` holds
pub fn add_unit_if(condition: &Condition, unit: StandaloneUnit) -> ConditionalInclusion {
    ConditionalInclusion {
        condition: condition.clone(),
        target: InclusionTarget::Unit(unit),
    }
}
