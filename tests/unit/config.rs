use slack_chat_resource::config::{
    apply_env_overrides, load_config, Config, API_URL_ENV, CONFIG_ENV, LOG_ENV,
    UPLOAD_FILENAME_ENV,
};
use std::collections::HashMap;

fn overrides(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name: &str| map.get(name).cloned()
}

#[test]
fn test_default_config() {
    let cfg = Config::default();
    assert_eq!(cfg.slack.api_url, "https://slack.com/api");
    assert_eq!(cfg.upload.default_filename, "upload.txt");
    assert_eq!(cfg.log.filter, "info");
}

#[test]
fn test_env_overrides() {
    let mut cfg = Config::default();
    apply_env_overrides(
        &mut cfg,
        overrides(&[
            (API_URL_ENV, "http://127.0.0.1:9999/api"),
            (UPLOAD_FILENAME_ENV, "notes.md"),
            (LOG_ENV, "debug"),
        ]),
    );
    assert_eq!(cfg.slack.api_url, "http://127.0.0.1:9999/api");
    assert_eq!(cfg.upload.default_filename, "notes.md");
    assert_eq!(cfg.log.filter, "debug");
}

#[test]
fn test_blank_overrides_ignored() {
    let mut cfg = Config::default();
    apply_env_overrides(&mut cfg, overrides(&[(API_URL_ENV, "  "), (LOG_ENV, "")]));
    assert_eq!(cfg.slack.api_url, "https://slack.com/api");
    assert_eq!(cfg.log.filter, "info");
}

#[test]
fn test_partial_json_config_keeps_defaults() {
    let cfg: Config = serde_json::from_str(r#"{"slack": {"api_url": "http://mock/api"}}"#).unwrap();
    assert_eq!(cfg.slack.api_url, "http://mock/api");
    assert_eq!(cfg.upload.default_filename, "upload.txt");
    assert_eq!(cfg.log.filter, "info");
}

// The only test in this binary that touches the process environment.
#[test]
fn test_load_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resource.json");
    std::fs::write(&path, r#"{"upload": {"default_filename": "artifact.bin"}}"#).unwrap();

    std::env::set_var(CONFIG_ENV, &path);
    std::env::remove_var(API_URL_ENV);
    std::env::remove_var(UPLOAD_FILENAME_ENV);
    let cfg = load_config();
    std::env::remove_var(CONFIG_ENV);

    assert_eq!(cfg.upload.default_filename, "artifact.bin");
    assert_eq!(cfg.slack.api_url, "https://slack.com/api");
}
