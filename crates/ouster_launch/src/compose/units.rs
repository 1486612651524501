//! Composable unit descriptors and the container that hosts them

use crate::compose::{CompositionError, ParameterSource};
use crate::config::{ContainerSpec, OutputMode, Substitution};
use serde::{Deserialize, Serialize};

/// Plugin types of the units composed into the sensor container, in start order
pub const SENSOR_UNITS: [(&str, &str); 3] = [
    ("os_sensor", "ouster_ros::OusterSensor"),
    ("os_cloud", "ouster_ros::OusterCloud"),
    ("os_image", "ouster_ros::OusterImage"),
];

/// A component loaded into a shared container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitDescriptor {
    pub package: String,
    /// Execution unit type, e.g. `ouster_ros::OusterSensor`
    pub plugin: String,
    pub name: String,
    pub namespace: Substitution,
    pub parameters: Vec<ParameterSource>,
}

/// Build the sensor, point cloud and image units
///
/// All three share `namespace` and `parameters`. Their order only affects
/// readability; the container may load them concurrently.
pub fn build_units(
    package: &str,
    namespace: &Substitution,
    parameters: &ParameterSource,
) -> Vec<UnitDescriptor> {
    SENSOR_UNITS
        .iter()
        .map(|(name, plugin)| UnitDescriptor {
            package: package.to_string(),
            plugin: plugin.to_string(),
            name: name.to_string(),
            namespace: namespace.clone(),
            parameters: vec![parameters.clone()],
        })
        .collect()
}

/// A multi-threaded component container whose members start and stop together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    pub name: String,
    pub namespace: Substitution,
    pub package: String,
    pub executable: String,
    pub output: OutputMode,
    pub units: Vec<UnitDescriptor>,
}

impl Container {
    /// Create a container; every unit must share the container namespace
    pub fn new(
        spec: &ContainerSpec,
        namespace: Substitution,
        units: Vec<UnitDescriptor>,
    ) -> Result<Self, CompositionError> {
        if let Some(unit) = units.iter().find(|u| u.namespace != namespace) {
            return Err(CompositionError::NamespaceMismatch {
                unit: unit.name.clone(),
                unit_namespace: unit.namespace.to_string(),
                container: spec.name.clone(),
                container_namespace: namespace.to_string(),
            });
        }

        Ok(Self {
            name: spec.name.clone(),
            namespace,
            package: spec.package.clone(),
            executable: spec.executable.clone(),
            output: spec.output,
            units,
        })
    }

    /// Every substitution carried by the container and its units, with a label
    pub(crate) fn substitutions(&self) -> Vec<(String, &Substitution)> {
        let mut subs = vec![(format!("container '{}' namespace", self.name), &self.namespace)];
        subs.extend(
            self.units
                .iter()
                .map(|u| (format!("unit '{}' namespace", u.name), &u.namespace)),
        );
        subs
    }
}
