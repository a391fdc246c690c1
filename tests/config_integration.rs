//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use drivebox::config::AppConfig;
use serial_test::serial;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("DBX_WINDOW__TITLE", "Test From Env");
    let config = AppConfig::load().unwrap();
    println!("Window title: {}", config.window.title);
    assert_eq!(config.window.title, "Test From Env");
    std::env::remove_var("DBX_WINDOW__TITLE");
}

#[test]
#[serial]
fn test_env_override_numeric() {
    std::env::set_var("DBX_INPUT__DRIVE_FORCE", "750.0");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.input.drive_force, 750.0);
    std::env::remove_var("DBX_INPUT__DRIVE_FORCE");
}

#[test]
#[serial]
fn test_default_config_loading() {
    // Remove env vars to test file-based config
    std::env::remove_var("DBX_WINDOW__TITLE");
    std::env::remove_var("DBX_INPUT__DRIVE_FORCE");

    let cwd = std::env::current_dir().unwrap();
    println!("Current dir: {:?}", cwd);
    println!(
        "config/default.toml exists: {}",
        cwd.join("config/default.toml").exists()
    );

    let config = AppConfig::load().unwrap();
    println!("Window title from file: {}", config.window.title);
    assert_eq!(config.input.drive_force, 500.0);
    assert_eq!(config.physics.gravity, [0.0, -9.82, 0.0]);
}

#[test]
#[serial]
fn test_missing_config_dir_falls_back_to_defaults() {
    let config = AppConfig::load_from("/nonexistent/config/dir").unwrap();
    assert_eq!(config.window.width, 1280);
    assert_eq!(config.input.turn_rate, 5.0);
}
