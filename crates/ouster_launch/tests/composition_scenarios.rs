//! End-to-end composition scenarios against a fake ament install prefix

use ouster_launch::{
    compose, AmentIndex, CompositionConfig, CompositionError, InclusionTarget, Plan,
};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Create an install prefix containing `ouster_ros`
fn fake_prefix() -> TempDir {
    let prefix = tempfile::tempdir().unwrap();
    let markers = prefix
        .path()
        .join("share/ament_index/resource_index/packages");
    fs::create_dir_all(&markers).unwrap();
    fs::write(markers.join("ouster_ros"), "").unwrap();

    let share = prefix.path().join("share/ouster_ros");
    fs::create_dir_all(share.join("config")).unwrap();
    fs::create_dir_all(share.join("launch")).unwrap();
    fs::write(share.join("config/parameters.yaml"), "ouster/os_driver:\n").unwrap();
    prefix
}

fn compose_from(prefix: &Path) -> Plan {
    compose(&CompositionConfig::default(), &AmentIndex::with_prefix(prefix)).unwrap()
}

fn overrides(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn scenario_a_namespace_override_with_default_visualization() {
    let prefix = fake_prefix();
    let plan = compose_from(prefix.path());

    let resolved = plan.resolve(&overrides(&[("ouster_ns", "robotA")])).unwrap();

    assert_eq!(resolved.namespace, "robotA");
    assert_eq!(resolved.container.units.len(), 3);
    assert!(resolved
        .container
        .units
        .iter()
        .all(|u| u.namespace == "robotA"));

    let frames: Vec<_> = resolved
        .standalone
        .iter()
        .map(|u| (u.name.as_str(), &u.arguments[6..]))
        .collect();
    assert_eq!(
        frames,
        vec![
            ("stp_sensor_imu", &["os_sensor".to_string(), "os_imu".to_string()][..]),
            ("stp_sensor_lidar", &["os_sensor".to_string(), "os_lidar".to_string()][..]),
        ]
    );
    for unit in &resolved.standalone {
        assert_eq!(&unit.arguments[..6], &["0", "0", "0", "0", "0", "0"]);
    }

    assert_eq!(
        resolved.includes,
        vec![prefix.path().join("share/ouster_ros/launch/sensor.rviz.launch.py")]
    );
}

#[test]
fn scenario_b_visualization_disabled() {
    let prefix = fake_prefix();
    let plan = compose_from(prefix.path());

    let resolved = plan.resolve(&overrides(&[("viz", "False")])).unwrap();

    assert_eq!(resolved.namespace, "ouster");
    assert_eq!(resolved.container.units.len(), 3);
    assert!(resolved
        .container
        .units
        .iter()
        .all(|u| u.namespace == "ouster"));
    assert!(resolved.standalone.is_empty());
    assert!(resolved.includes.is_empty());
}

#[test]
fn scenario_c_unresolvable_package_root() {
    let empty = tempfile::tempdir().unwrap();
    let result = compose(
        &CompositionConfig::default(),
        &AmentIndex::with_prefix(empty.path().join("missing")),
    );

    assert!(matches!(
        result,
        Err(CompositionError::PackageNotFound { ref package, .. }) if package == "ouster_ros"
    ));
}

#[test]
fn empty_index_reports_package_not_found() {
    let result = compose(&CompositionConfig::default(), &AmentIndex::new(vec![]));
    assert!(matches!(result, Err(CompositionError::PackageNotFound { .. })));
}

#[test]
fn non_true_visualization_values_exclude_everything() {
    let prefix = fake_prefix();
    let plan = compose_from(prefix.path());

    for value in ["False", "false", "0", "", "off", "TRUE"] {
        let resolved = plan.resolve(&overrides(&[("viz", value)])).unwrap();
        assert!(resolved.standalone.is_empty(), "viz={:?}", value);
        assert!(resolved.includes.is_empty(), "viz={:?}", value);
    }
}

#[test]
fn visualization_inclusions_share_one_condition() {
    let prefix = fake_prefix();
    let plan = compose_from(prefix.path());

    let units = plan
        .inclusions()
        .iter()
        .filter(|i| matches!(i.target, InclusionTarget::Unit(_)))
        .count();
    let graphs = plan
        .inclusions()
        .iter()
        .filter(|i| matches!(i.target, InclusionTarget::SubGraph(_)))
        .count();
    assert_eq!((units, graphs), (2, 1));

    let first = &plan.inclusions()[0].condition;
    assert!(plan.inclusions().iter().all(|i| &i.condition == first));
}

#[test]
fn namespace_is_uniform_for_any_override() {
    let prefix = fake_prefix();
    let plan = compose_from(prefix.path());

    for ns in ["ouster", "robotA", "fleet/robot_7", ""] {
        let resolved = plan.resolve(&overrides(&[("ouster_ns", ns)])).unwrap();
        assert!(resolved.container.units.iter().all(|u| u.namespace == ns));
        assert_eq!(resolved.container.namespace, ns);
    }
}

#[test]
fn composition_is_deterministic() {
    let prefix = fake_prefix();
    let args = overrides(&[("ouster_ns", "robotA"), ("viz", "True")]);

    let first = compose_from(prefix.path());
    let second = compose_from(prefix.path());
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );

    let a = serde_json::to_string(&first.resolve(&args).unwrap()).unwrap();
    let b = serde_json::to_string(&second.resolve(&args).unwrap()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn unknown_override_is_rejected() {
    let prefix = fake_prefix();
    let plan = compose_from(prefix.path());

    let result = plan.resolve(&overrides(&[("visualizationEnabled", "False")]));
    assert!(matches!(result, Err(CompositionError::UnknownArgument(_))));
}

#[test]
fn parameter_file_is_passed_through_unread() {
    let prefix = fake_prefix();
    // Replace the parameters with something that is not YAML at all
    fs::write(
        prefix.path().join("share/ouster_ros/config/parameters.yaml"),
        [0xffu8, 0x00, 0x13],
    )
    .unwrap();

    let plan = compose_from(prefix.path());
    let resolved = plan.resolve(&HashMap::new()).unwrap();
    let expected = prefix.path().join("share/ouster_ros/config/parameters.yaml");
    assert!(resolved
        .container
        .units
        .iter()
        .all(|u| u.parameters == vec![expected.clone()]));
}

#[test]
fn override_values_are_taken_literally() {
    let prefix = fake_prefix();
    let plan = compose_from(prefix.path());

    for ns in ["ns_$(foo)", "$(arg viz)", "$(env HOME)"] {
        let resolved = plan.resolve(&overrides(&[("ouster_ns", ns)])).unwrap();
        assert_eq!(resolved.namespace, ns);
        assert_eq!(resolved.arguments["ouster_ns"], ns);
        assert!(resolved.container.units.iter().all(|u| u.namespace == ns));
    }

    // A template-looking value is not truthy, so visualization switches off
    let resolved = plan.resolve(&overrides(&[("viz", "$(arg ouster_ns)")])).unwrap();
    assert!(resolved.standalone.is_empty());
    assert!(resolved.includes.is_empty());
}
