use serde_json::{json, Value};
use slack_chat_resource::adapters::{check, fetch};
use slack_chat_resource::host::{LocalFs, MemoryFs};
use slack_chat_resource::types::{CheckRequest, InRequest};
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

fn run_binary(bin: &str, args: &[&Path], stdin: &str) -> Output {
    let mut child = Command::new(bin)
        .args(args)
        .env_remove("SLACK_RESOURCE_CONFIG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    if let Some(mut pipe) = child.stdin.take() {
        let _ = pipe.write_all(stdin.as_bytes());
    }
    child.wait_with_output().unwrap()
}

#[test]
fn test_in_writes_timestamp_and_echoes_version() {
    let dir = tempfile::tempdir().unwrap();
    let request: InRequest =
        serde_json::from_value(json!({"version": {"timestamp": "123.456"}})).unwrap();

    let response = fetch::run(request, dir.path(), &LocalFs).unwrap();

    assert_eq!(
        std::fs::read(dir.path().join("timestamp")).unwrap(),
        b"123.456"
    );
    assert_eq!(response.version, json!({"timestamp": "123.456"}));
}

#[test]
fn test_in_accepts_string_version() {
    let fs = MemoryFs::new();
    let request: InRequest = serde_json::from_value(json!({"version": "42.0"})).unwrap();

    let response = fetch::run(request, Path::new("/dest"), &fs).unwrap();

    assert_eq!(fs.contents("/dest/timestamp"), Some(b"42.0".to_vec()));
    assert_eq!(response.version, json!("42.0"));
}

#[test]
fn test_in_rejects_missing_version() {
    let fs = MemoryFs::new();
    let request: InRequest = serde_json::from_value(json!({"source": {}})).unwrap();
    assert!(fetch::run(request, Path::new("/dest"), &fs).is_err());
    assert!(fs.contents("/dest/timestamp").is_none());
}

#[test]
fn test_in_unwritable_destination() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does/not/exist");
    let request: InRequest =
        serde_json::from_value(json!({"version": {"timestamp": "1.0"}})).unwrap();
    let err = fetch::run(request, &missing, &LocalFs).unwrap_err();
    assert!(err.to_string().starts_with("writing timestamp file"));
}

#[test]
fn test_check_echoes_version() {
    let request: CheckRequest =
        serde_json::from_value(json!({"version": {"timestamp": "9.9"}})).unwrap();
    assert_eq!(check::run(request), vec![json!({"timestamp": "9.9"})]);
}

#[test]
fn test_in_binary() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_binary(
        env!("CARGO_BIN_EXE_in"),
        &[dir.path()],
        r#"{"source": {"token": "t", "channel_id": "C"}, "version": {"timestamp": "123.456"}}"#,
    );

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let response: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(response, json!({"version": {"timestamp": "123.456"}}));
    assert_eq!(
        std::fs::read_to_string(dir.path().join("timestamp")).unwrap(),
        "123.456"
    );
}

#[test]
fn test_in_binary_bad_version() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_binary(env!("CARGO_BIN_EXE_in"), &[dir.path()], r#"{"version": 7}"#);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error invalid request"));
}

#[test]
fn test_check_binary() {
    let output = run_binary(
        env!("CARGO_BIN_EXE_check"),
        &[],
        r#"{"source": {}, "version": {"timestamp": "1.2"}}"#,
    );
    assert!(output.status.success());
    let response: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(response, json!([{"timestamp": "1.2"}]));

    let output = run_binary(env!("CARGO_BIN_EXE_check"), &[], r#"{"source": {}}"#);
    let response: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(response, json!([]));
}

#[test]
fn test_check_binary_malformed_request() {
    let output = run_binary(env!("CARGO_BIN_EXE_check"), &[], "not json");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error parsing request"));
}
