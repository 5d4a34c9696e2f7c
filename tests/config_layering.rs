//! Configuration layering: defaults, TOML file, then environment.

use std::env;
use std::io::Write;
use std::path::Path;

use contrail::{AngleDifference, ConfigError, SimulationConfig};
use serial_test::serial;
use tempfile::NamedTempFile;

fn toml_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

/// Removes the named variables when dropped, even if the test panics.
struct EnvGuard(&'static [&'static str]);

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for key in self.0 {
            env::remove_var(key);
        }
    }
}

#[test]
#[serial]
fn missing_file_yields_defaults() {
    let config = SimulationConfig::load(Some(Path::new("does/not/exist.toml"))).expect("defaults");
    assert_eq!(config, SimulationConfig::default());
}

#[test]
#[serial]
fn file_overrides_defaults() {
    let file = toml_file(
        r#"
speed = 3.0
obstacle_count = 12
angle_difference = "wrapped"

[bounds]
width = 800.0
"#,
    );
    let config = SimulationConfig::load(Some(file.path())).expect("config loads");
    assert!((config.speed - 3.0).abs() < f64::EPSILON);
    assert_eq!(config.obstacle_count, 12);
    assert_eq!(config.angle_difference, AngleDifference::Wrapped);
    assert!((config.bounds.width - 800.0).abs() < f64::EPSILON);
    assert!((config.bounds.height - 700.0).abs() < f64::EPSILON);
}

#[test]
#[serial]
fn environment_overrides_file() {
    let _guard = EnvGuard(&["CONTRAIL_SPEED", "CONTRAIL_BOUNDS__HEIGHT"]);
    env::set_var("CONTRAIL_SPEED", "4.5");
    env::set_var("CONTRAIL_BOUNDS__HEIGHT", "900.0");
    let file = toml_file("speed = 3.0\n");
    let config = SimulationConfig::load(Some(file.path())).expect("config loads");
    assert!((config.speed - 4.5).abs() < f64::EPSILON);
    assert!((config.bounds.height - 900.0).abs() < f64::EPSILON);
}

#[test]
#[serial]
fn invalid_values_are_rejected_after_layering() {
    let file = toml_file("arrival_radius = -1.0\n");
    match SimulationConfig::load(Some(file.path())) {
        Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "arrival_radius"),
        other => panic!("expected invalid arrival_radius, got {other:?}"),
    }
}

#[test]
#[serial]
fn malformed_values_fail_to_load() {
    let file = toml_file("num_directions = \"many\"\n");
    assert!(matches!(
        SimulationConfig::load(Some(file.path())),
        Err(ConfigError::Load(_))
    ));
}
