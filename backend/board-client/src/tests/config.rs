use crate::DEFAULT_API_BASE_URL;
use crate::config::{ClientConfig, ENV_API_BASE_URL, ENV_API_TIMEOUT_SECS, ENV_PAGE_SIZE};
use crate::error::config::ConfigError;
use crate::session::Portal;

use models::PageLimit;

use std::time::Duration;

use serial_test::serial;
use tempfile::TempDir;

fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    std::fs::write(&path, contents).expect("write config");
    path
}

fn clear_env() {
    // SAFETY: env tests are serialized with #[serial].
    unsafe {
        std::env::remove_var(ENV_API_BASE_URL);
        std::env::remove_var(ENV_API_TIMEOUT_SECS);
        std::env::remove_var(ENV_PAGE_SIZE);
    }
}

fn set_env(variable: &str, value: &str) {
    // SAFETY: env tests are serialized with #[serial].
    unsafe {
        std::env::set_var(variable, value);
    }
}

// ============================================
// FILE LOADING
// ============================================

/// **VALUE**: A missing config file is not an error; defaults apply.
///
/// **WHY THIS MATTERS**: First launch has no config file. Failing there would make the client
/// unusable until the user hand-writes one.
#[test]
fn given_missing_file_when_load_then_returns_defaults() {
    let dir = TempDir::new().expect("temp dir");

    let config = ClientConfig::load(&dir.path().join("absent.toml")).expect("defaults");

    assert_eq!(config, ClientConfig::default());
    assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
    assert_eq!(config.api.timeout(), Duration::from_secs(30));
    assert_eq!(config.paging.page_size, PageLimit::DEFAULT);
    assert_eq!(config.portal, Portal::Hub);
}

#[test]
fn given_partial_file_when_load_then_missing_fields_take_defaults() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_config(
        &dir,
        r#"
portal = "employer"

[api]
base_url = "https://api.example.test/"
"#,
    );

    let config = ClientConfig::load(&path).expect("valid config");

    assert_eq!(config.api.base_url, "https://api.example.test/");
    assert_eq!(config.api.timeout_secs, 30);
    assert_eq!(config.paging.page_size, PageLimit::DEFAULT);
    assert_eq!(config.portal, Portal::Employer);
}

/// **VALUE**: An out-of-range page size in the file is rejected while parsing.
///
/// **BUG THIS CATCHES**: Would catch `PageLimit` deserializing without its range check, which
/// would let `limit = 0` reach the backend.
#[test]
fn given_zero_page_size_when_load_then_parse_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_config(&dir, "[paging]\npage_size = 0\n");

    let error = ClientConfig::load(&path).expect_err("should reject");

    assert!(matches!(error, ConfigError::ParseError { .. }), "{error}");
}

#[test]
fn given_malformed_toml_when_load_then_parse_error_names_path() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_config(&dir, "[api\nbase_url = ");

    let error = ClientConfig::load(&path).expect_err("should reject");

    match error {
        ConfigError::ParseError { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected parse error, got {other}"),
    }
}

#[test]
fn given_non_http_base_url_when_load_then_validation_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_config(&dir, "[api]\nbase_url = \"ftp://files.example.test\"\n");

    let error = ClientConfig::load(&path).expect_err("should reject");

    assert!(matches!(error, ConfigError::ValidationError { .. }), "{error}");
}

// ============================================
// VALIDATION
// ============================================

#[test]
fn given_timeout_out_of_range_when_validate_then_error() {
    let mut config = ClientConfig::default();

    config.api.timeout_secs = 0;
    assert!(config.validate().is_err());

    config.api.timeout_secs = 301;
    assert!(config.validate().is_err());

    config.api.timeout_secs = 300;
    assert!(config.validate().is_ok());
}

#[test]
fn given_empty_base_url_when_validate_then_error() {
    let mut config = ClientConfig::default();
    config.api.base_url = String::new();

    let error = config.validate().expect_err("should reject");

    assert!(error.to_string().contains("base_url cannot be empty"));
}

// ============================================
// ENVIRONMENT OVERRIDES
// ============================================

/// **VALUE**: `BOARD_*` variables override file values.
///
/// **WHY THIS MATTERS**: Deployments point the same build at staging or production through
/// the environment without shipping a different config file.
#[test]
#[serial]
fn given_env_vars_when_apply_overrides_then_values_replaced() {
    clear_env();
    set_env(ENV_API_BASE_URL, "https://staging.example.test/");
    set_env(ENV_API_TIMEOUT_SECS, " 12 ");
    set_env(ENV_PAGE_SIZE, "25");

    let mut config = ClientConfig::default();
    let result = config.apply_env_overrides();
    clear_env();

    result.expect("overrides apply");
    assert_eq!(config.api.base_url, "https://staging.example.test/");
    assert_eq!(config.api.timeout_secs, 12);
    assert_eq!(config.paging.page_size.get(), 25);
}

#[test]
#[serial]
fn given_blank_env_var_when_apply_overrides_then_value_kept() {
    clear_env();
    set_env(ENV_API_BASE_URL, "   ");

    let mut config = ClientConfig::default();
    let result = config.apply_env_overrides();
    clear_env();

    result.expect("blank is ignored");
    assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
}

/// **VALUE**: A non-numeric or out-of-range page size names the offending variable.
///
/// **BUG THIS CATCHES**: Would catch a silent fallback to the default, which hides a typo in
/// deployment config.
#[test]
#[serial]
fn given_invalid_page_size_env_when_apply_overrides_then_env_error() {
    clear_env();
    set_env(ENV_PAGE_SIZE, "500");

    let mut config = ClientConfig::default();
    let result = config.apply_env_overrides();
    clear_env();

    match result {
        Err(ConfigError::EnvError { variable, .. }) => assert_eq!(variable, ENV_PAGE_SIZE),
        other => panic!("expected env error, got {other:?}"),
    }
}

#[test]
#[serial]
fn given_non_numeric_timeout_env_when_apply_overrides_then_env_error() {
    clear_env();
    set_env(ENV_API_TIMEOUT_SECS, "soon");

    let mut config = ClientConfig::default();
    let result = config.apply_env_overrides();
    clear_env();

    assert!(matches!(
        result,
        Err(ConfigError::EnvError { variable: ENV_API_TIMEOUT_SECS, .. })
    ));
}

#[test]
#[serial]
fn given_file_and_env_when_resolve_then_env_wins() {
    clear_env();
    let dir = TempDir::new().expect("temp dir");
    let path = write_config(&dir, "[api]\nbase_url = \"https://file.example.test/\"\n");
    set_env(ENV_API_BASE_URL, "https://env.example.test/");

    let result = ClientConfig::resolve(Some(&path));
    clear_env();

    let config = result.expect("resolves");
    assert_eq!(config.api.base_url, "https://env.example.test/");
}
