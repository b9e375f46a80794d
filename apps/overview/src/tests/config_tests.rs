use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_config(contents: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = env::temp_dir().join(format!("overview_config_test_{suffix}"));
    fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("overview.toml");
    fs::write(&path, contents).expect("write config");
    path
}

#[test]
fn defaults_point_at_mars_server() {
    let settings = Settings::default();
    assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(settings.request_timeout(), Duration::from_secs(30));
}

#[test]
fn missing_config_file_is_not_an_error() {
    let path = env::temp_dir().join("overview_config_test_does_not_exist.toml");
    assert!(read_file_settings(&path).expect("read").is_none());
}

#[test]
fn config_file_values_override_defaults() {
    let path = temp_config(
        r#"
api_base_url = "http://127.0.0.1:9000"
request_timeout_secs = 5
"#,
    );

    let mut settings = Settings::default();
    let file_cfg = read_file_settings(&path).expect("read").expect("present");
    apply_file_settings(&mut settings, file_cfg);

    assert_eq!(settings.api_base_url, "http://127.0.0.1:9000");
    assert_eq!(settings.request_timeout_secs, 5);

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn malformed_config_file_is_reported_with_path() {
    let path = temp_config("request_timeout_secs = \"soon\"");

    let err = read_file_settings(&path).expect_err("should fail");
    assert!(err.to_string().contains("overview.toml"));

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn app_prefixed_env_wins_over_plain_env() {
    let env: HashMap<&str, &str> = HashMap::from([
        ("MARS_API_BASE_URL", "http://plain.test"),
        ("APP__API_BASE_URL", "http://app.test"),
        ("APP__REQUEST_TIMEOUT_SECS", " 12 "),
    ]);
    let mut settings = Settings::default();

    apply_env_overrides(&mut settings, |key| env.get(key).map(|v| v.to_string()));

    assert_eq!(settings.api_base_url, "http://app.test");
    assert_eq!(settings.request_timeout_secs, 12);
}

#[test]
fn unparseable_timeout_env_is_ignored() {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings, |key| {
        (key == "APP__REQUEST_TIMEOUT_SECS").then(|| "forever".to_string())
    });
    assert_eq!(settings.request_timeout_secs, 30);
}

#[test]
fn normalizes_trailing_slashes_and_whitespace() {
    assert_eq!(
        normalize_api_base_url("  https://mars.test/api/ ").expect("normalize"),
        "https://mars.test/api"
    );
}

#[test]
fn blank_base_url_falls_back_to_default() {
    assert_eq!(
        normalize_api_base_url("   ").expect("normalize"),
        DEFAULT_API_BASE_URL
    );
}

#[test]
fn rejects_non_http_schemes() {
    let err = normalize_api_base_url("ftp://mars.test").expect_err("should fail");
    assert!(err.to_string().contains("http or https"));
}

#[test]
fn zero_timeout_is_rejected() {
    let settings = Settings {
        request_timeout_secs: 0,
        ..Settings::default()
    };
    assert!(settings.validated().is_err());
}
