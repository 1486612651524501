//! Ouster Composite Launch
//!
//! Builds the launch plan that runs the ouster_ros driver components in a
//! single component container.
//!
//! # Overview
//!
//! The composer:
//! - Declares the `ouster_ns` and `viz` launch arguments
//! - Locates the shared `parameters.yaml` through the ament package index
//! - Groups the sensor, point cloud and image components into one container
//! - Tags the static frame publishers and the rviz launch file with the `viz`
//!   condition, leaving evaluation to whoever runs the plan
//!
//! Argument values bind lazily through `$(arg name)` substitutions, so a
//! plan is evaluated against invoker overrides with [`Plan::resolve`].
//!
//! # Example
//!
//! ```no_run
//! use ouster_launch::{compose, AmentIndex, CompositionConfig};
//! use std::collections::HashMap;
//!
//! let plan = compose(&CompositionConfig::default(), &AmentIndex::from_env())?;
//! let overrides = HashMap::from([("ouster_ns".to_string(), "robotA".to_string())]);
//! println!("{}", plan.resolve(&overrides)?);
//! # Ok::<(), ouster_launch::CompositionError>(())
//! ```

pub mod cli;
pub mod compose;
pub mod config;

pub use cli::{LaunchArgs, OutputFormat};
pub use compose::{
    add_unit_if, build_units, compose, include_if, resolve_shared_parameters,
    static_transform_publisher, AmentIndex, ArgumentRegistry, CompositionError, Condition,
    ConditionalInclusion, Container, InclusionTarget, LaunchAction, LaunchArgument, PackageIndex,
    PackageShare, ParameterSource, Plan, ResolvedPlan, StandaloneUnit, SubGraphReference, UnitDescriptor,
};
pub use config::{CompositionConfig, ConfigError, Substitution, SubstitutionContext, SubstitutionError};
