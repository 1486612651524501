//! The ouster sensor composition: driver, cloud and image components in one
//! container, plus the optional visualization stack

use crate::compose::{
    add_unit_if, build_units, include_if, static_transform_publisher, ArgumentRegistry,
    CompositionError, Condition, Container, PackageIndex, PackageShare, Plan,
};
use crate::config::CompositionConfig;

/// Launch argument holding the namespace shared by every composed unit
pub const NAMESPACE_ARG: &str = "ouster_ns";

/// Launch argument enabling the visualization stack
pub const VISUALIZATION_ARG: &str = "viz";

/// Build the sensor launch plan
pub fn compose(
    config: &CompositionConfig,
    index: &dyn PackageIndex,
) -> Result<Plan, CompositionError> {
    let share = PackageShare::locate(index, &config.package)?;
    let parameters = share.parameters(&config.parameters_file);

    let mut registry = ArgumentRegistry::new();
    let ouster_ns = registry.declare_with_description(
        NAMESPACE_ARG,
        &config.arguments.namespace,
        "namespace shared by the sensor components",
    )?;
    let viz = registry.declare_with_description(
        VISUALIZATION_ARG,
        &config.arguments.visualization,
        "start rviz and the static sensor transforms",
    )?;

    let namespace = ouster_ns.substitution();
    let units = build_units(&config.package, &namespace, &parameters);
    let container = Container::new(&config.container, namespace, units)?;

    // One condition value shared by all three so they switch together
    let viz_enabled = Condition::if_arg(&viz.name);
    let frames = &config.frames;
    let inclusions = vec![
        add_unit_if(
            &viz_enabled,
            static_transform_publisher("stp_sensor_imu", &frames.sensor, &frames.imu),
        ),
        add_unit_if(
            &viz_enabled,
            static_transform_publisher("stp_sensor_lidar", &frames.sensor, &frames.lidar),
        ),
        include_if(&viz_enabled, share.file(&config.visualization_launch)),
    ];

    Plan::assemble(registry.into_arguments(), container, inclusions)
}
