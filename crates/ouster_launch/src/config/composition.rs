//! Composition configuration YAML schema

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root composition configuration
///
/// Every field has a default matching the stock ouster_ros deployment, so an
/// empty document is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositionConfig {
    /// Package whose share directory holds the parameters and launch files
    pub package: String,

    /// Shared parameter file, relative to the package share directory
    pub parameters_file: PathBuf,

    /// Visualization launch description, relative to the package share directory
    pub visualization_launch: PathBuf,

    /// Launch argument defaults
    pub arguments: ArgumentDefaults,

    /// Component container settings
    pub container: ContainerSpec,

    /// Coordinate frame names used by the static transform publishers
    pub frames: FrameNames,
}

impl Default for CompositionConfig {
    fn default() -> Self {
        Self {
            package: "ouster_ros".to_string(),
            parameters_file: PathBuf::from("config/parameters.yaml"),
            visualization_launch: PathBuf::from("launch/sensor.rviz.launch.py"),
            arguments: ArgumentDefaults::default(),
            container: ContainerSpec::default(),
            frames: FrameNames::default(),
        }
    }
}

/// Default values of the recognised launch arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArgumentDefaults {
    /// Default for `ouster_ns`
    pub namespace: String,
    /// Default for `viz`
    pub visualization: String,
}

impl Default for ArgumentDefaults {
    fn default() -> Self {
        Self {
            namespace: "ouster".to_string(),
            visualization: "True".to_string(),
        }
    }
}

/// Component container settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerSpec {
    pub name: String,
    pub package: String,
    pub executable: String,
    pub output: OutputMode,
}

impl Default for ContainerSpec {
    fn default() -> Self {
        Self {
            name: "os_container".to_string(),
            package: "rclcpp_components".to_string(),
            executable: "component_container_mt".to_string(),
            output: OutputMode::Screen,
        }
    }
}

/// Where the supervisor sends a unit's stdout/stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    #[default]
    Screen,
    Log,
    Both,
}

impl OutputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputMode::Screen => "screen",
            OutputMode::Log => "log",
            OutputMode::Both => "both",
        }
    }
}

/// Frame names for the sensor's static transforms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameNames {
    pub sensor: String,
    pub imu: String,
    pub lidar: String,
}

impl Default for FrameNames {
    fn default() -> Self {
        Self {
            sensor: "os_sensor".to_string(),
            imu: "os_imu".to_string(),
            lidar: "os_lidar".to_string(),
        }
    }
}

impl CompositionConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to an empty mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: CompositionConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let names = [
            ("package", &self.package),
            ("container.name", &self.container.name),
            ("container.package", &self.container.package),
            ("container.executable", &self.container.executable),
            ("frames.sensor", &self.frames.sensor),
            ("frames.imu", &self.frames.imu),
            ("frames.lidar", &self.frames.lidar),
        ];
        for (field, value) in names {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "'{}' must not be empty",
                    field
                )));
            }
        }

        for (field, path) in [
            ("parameters_file", &self.parameters_file),
            ("visualization_launch", &self.visualization_launch),
        ] {
            if path.as_os_str().is_empty() || path.is_absolute() {
                return Err(ConfigError::Validation(format!(
                    "'{}' must be a non-empty path relative to the package share directory",
                    field
                )));
            }
        }

        Ok(())
    }
}

/// Errors that can occur when loading a composition configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}
