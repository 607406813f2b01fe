//! Integration tests for Settings loading and the CLI size bounds.
//!
//! These tests use temp files for the explicit config layer; the global
//! layer is whatever the machine has (normally absent).

use std::fs;

use rstest::rstest;
use tempfile::TempDir;

use treemaze::application::ApplicationError;
use treemaze::cli::CliError;
use treemaze::config::Settings;
use treemaze::exitcode;

#[test]
fn given_partial_config_file_when_load_then_unspecified_keys_keep_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("maze.toml");
    fs::write(&path, "max_size = 80\n").unwrap();

    let settings = Settings::load(Some(&path)).expect("load settings");

    assert_eq!(settings.max_size, 80);
    assert_eq!(settings.min_size, 10);
    assert_eq!(settings.size, 10);
}

#[test]
fn given_inverted_bounds_in_file_when_load_then_config_exit_code() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("maze.toml");
    fs::write(&path, "min_size = 40\nmax_size = 20\n").unwrap();

    let err = Settings::load(Some(&path)).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
    assert_eq!(CliError::from(err).exit_code(), exitcode::CONFIG);
}

#[rstest]
#[case(None, Ok(10))]
#[case(Some(10), Ok(10))]
#[case(Some(50), Ok(50))]
#[case(Some(1), Err(1))]
#[case(Some(500), Err(500))]
fn given_default_bounds_when_resolving_size_then_inclusive_range(
    #[case] requested: Option<usize>,
    #[case] expected: Result<usize, usize>,
) {
    assert_eq!(Settings::default().resolve_size(requested), expected);
}

#[test]
fn given_effective_settings_when_rendered_then_roundtrip_through_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("maze.toml");
    let settings = Settings {
        size: 15,
        seed: Some(3),
        ..Settings::default()
    };
    fs::write(&path, settings.to_toml().unwrap()).unwrap();

    assert_eq!(Settings::load(Some(&path)).unwrap(), settings);
}
