//! Integration tests for cloudflag-config

use cloudflag_config::*;
use std::env;
use std::io::Write;

#[test]
fn test_builder_loads_prefixed_env() {
    unsafe {
        env::set_var("CFTEST_ENV_LAUNCHDARKLYSDKKEY", "sdk-from-env");
    }

    let config = ConfigManager::builder()
        .with_prefix("CFTEST_ENV")
        .load_env()
        .build()
        .unwrap();

    assert_eq!(
        config.get_value("LaunchDarklySdkKey").as_deref(),
        Some("sdk-from-env")
    );

    unsafe {
        env::remove_var("CFTEST_ENV_LAUNCHDARKLYSDKKEY");
    }
}

#[test]
fn test_builder_file_overrides_env() {
    unsafe {
        env::set_var("CFTEST_LAYER_LAUNCHDARKLYSDKKEY", "sdk-env");
    }

    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"{{"LaunchDarklySdkKey": "sdk-file", "Flags": {{"Offline": true}}}}"#).unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let config = ConfigBuilder::new()
        .with_prefix("CFTEST_LAYER")
        .load_env()
        .add_file(path, FileFormat::Json)
        .build()
        .unwrap();

    assert_eq!(config.get_value("LaunchDarklySdkKey").as_deref(), Some("sdk-file"));
    assert!(config.get::<bool>("Flags:Offline").unwrap());

    unsafe {
        env::remove_var("CFTEST_LAYER_LAUNCHDARKLYSDKKEY");
    }
}

#[test]
fn test_load_toml_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "LaunchDarklySdkKey = \"sdk-toml\"").unwrap();

    let config = ConfigManager::new();
    let path = file.path().to_str().unwrap();
    let loader = ConfigLoader::auto(path).unwrap();
    assert!(loader.load_file(path).is_ok());

    config.load_file(path, FileFormat::Toml).unwrap();
    assert_eq!(config.get_value("launchdarklysdkkey").as_deref(), Some("sdk-toml"));
}

#[test]
fn test_load_missing_file_is_io_error() {
    let config = ConfigManager::new();
    let result = config.load_file("/nonexistent/cloudflag/settings.json", FileFormat::Json);
    assert!(matches!(result, Err(ConfigError::IoError(_))));
}

#[test]
fn test_load_dotenv_explicit_path() {
    let mut file = tempfile::Builder::new().suffix(".env").tempfile().unwrap();
    writeln!(file, "CFTEST_DOTENV_LAUNCHDARKLYSDKKEY=sdk-dotenv").unwrap();

    let config = ConfigManager::with_prefix("CFTEST_DOTENV");
    config.load_dotenv(file.path().to_str()).unwrap();

    assert_eq!(config.get_value("LaunchDarklySdkKey").as_deref(), Some("sdk-dotenv"));

    unsafe {
        env::remove_var("CFTEST_DOTENV_LAUNCHDARKLYSDKKEY");
    }
}

#[test]
fn test_load_dotenv_missing_explicit_path_fails() {
    let config = ConfigManager::new();
    let result = config.load_dotenv(Some("/nonexistent/cloudflag/.env"));
    assert!(matches!(result, Err(ConfigError::LoadError(_))));
}

#[test]
fn test_config_error_display() {
    let err = ConfigError::KeyNotFound("LaunchDarklySdkKey".to_string());
    assert!(err.to_string().contains("LaunchDarklySdkKey"));
}
