use std::fs;

use serial_test::serial;
use tempfile::TempDir;

use unitdash::error::DashboardError;
use unitdash::remote::Config;

fn clear_env() {
    unsafe {
        std::env::remove_var("UNITDASH_API_URL");
        std::env::remove_var("UNITDASH_API_TOKEN");
    }
}

#[test]
fn missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_from(&dir.path().join("config.yaml")).unwrap();
    assert!(config.api_url.is_none());
    assert!(config.api_token.is_none());
}

#[test]
fn loads_values_from_yaml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(
        &path,
        "api_url: https://units.example.com/api\napi_token: secret123\n",
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.api_url.as_deref(), Some("https://units.example.com/api"));
    assert_eq!(config.api_token.as_deref(), Some("secret123"));
}

#[test]
fn malformed_yaml_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, "api_url: [unclosed\n").unwrap();

    assert!(matches!(
        Config::load_from(&path),
        Err(DashboardError::Yaml(_))
    ));
}

#[test]
#[serial]
fn env_variables_override_file_values() {
    clear_env();
    unsafe {
        std::env::set_var("UNITDASH_API_URL", "https://override.example.com");
        std::env::set_var("UNITDASH_API_TOKEN", "env-token");
    }

    let config = Config {
        api_url: Some("https://file.example.com".to_string()),
        api_token: Some("file-token".to_string()),
    }
    .with_env_overrides();

    assert_eq!(config.api_url.as_deref(), Some("https://override.example.com"));
    assert_eq!(config.api_token.as_deref(), Some("env-token"));
    clear_env();
}

#[test]
#[serial]
fn blank_env_variables_are_ignored() {
    clear_env();
    unsafe {
        std::env::set_var("UNITDASH_API_URL", "   ");
    }

    let config = Config {
        api_url: Some("https://file.example.com".to_string()),
        api_token: None,
    }
    .with_env_overrides();

    assert_eq!(config.api_url.as_deref(), Some("https://file.example.com"));
    clear_env();
}

#[test]
#[serial]
fn api_url_error_names_the_setting() {
    clear_env();
    let config = Config::default();
    let err = config.api_url().unwrap_err();
    assert!(err.to_string().contains("UNITDASH_API_URL"));
}
