use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_settings_path(tag: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    env::temp_dir().join(format!("roster_settings_{tag}_{suffix}.toml"))
}

#[test]
fn missing_file_yields_defaults() {
    let settings = read_settings_file(&temp_settings_path("missing")).expect("defaults");
    assert_eq!(settings, Settings::default());
    assert_eq!(
        settings.endpoint_url().expect("url").as_str(),
        "http://127.0.0.1:20002/graphql"
    );
}

#[test]
fn reads_partial_file_over_defaults() {
    let path = temp_settings_path("partial");
    fs::write(&path, "api_key = \"da2-abc\"\n").expect("write");

    let settings = read_settings_file(&path).expect("settings");
    assert_eq!(settings.api_key.as_deref(), Some("da2-abc"));
    assert_eq!(
        settings.graphql_endpoint,
        Settings::default().graphql_endpoint
    );

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn malformed_file_reports_path() {
    let path = temp_settings_path("broken");
    fs::write(&path, "graphql_endpoint = [").expect("write");

    let err = read_settings_file(&path).expect_err("must fail");
    assert!(err.to_string().contains("failed to parse"));

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn app_prefixed_env_wins_over_short_names() {
    let env: HashMap<&str, &str> = [
        ("ROSTER_GRAPHQL_ENDPOINT", "https://short.example/graphql"),
        ("APP__GRAPHQL_ENDPOINT", "https://app.example/graphql"),
        ("ROSTER_API_KEY", "da2-short"),
        ("APP__API_KEY", "   "),
    ]
    .into_iter()
    .collect();

    let settings = apply_env_overrides(Settings::default(), |name| {
        env.get(name).map(|value| value.to_string())
    });
    assert_eq!(settings.graphql_endpoint, "https://app.example/graphql");
    assert_eq!(settings.api_key.as_deref(), Some("da2-short"));
}

#[test]
fn rejects_non_http_endpoints() {
    let settings = Settings {
        graphql_endpoint: "ftp://example.com/graphql".to_string(),
        api_key: None,
    };
    assert!(settings.endpoint_url().is_err());

    let settings = Settings {
        graphql_endpoint: "not a url".to_string(),
        api_key: None,
    };
    assert!(settings
        .endpoint_url()
        .expect_err("invalid")
        .to_string()
        .contains("invalid graphql endpoint"));
}
