//! Black-box tests of the `extchoice` binary.
//!
//! Each test gets its own store root under a temp dir and drives the CLI the
//! way an administrator (configure) and a job (resolve/choices) would.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use serde_json::{json, Value};

fn extchoice(store: &Path) -> Command {
    let mut cmd = Command::cargo_bin("extchoice").expect("extchoice binary");
    cmd.env_remove("RUST_LOG")
        .arg("--json")
        .arg("--store-root")
        .arg(store);
    cmd
}

fn run_json(cmd: &mut Command) -> Value {
    let out = cmd.output().expect("failed to spawn extchoice");
    assert!(
        out.status.success(),
        "extchoice failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    serde_json::from_slice(&out.stdout).expect("stdout is json")
}

fn write_json(path: &Path, v: &Value) {
    fs::write(path, serde_json::to_vec_pretty(v).unwrap()).unwrap();
}

#[test]
fn empty_store_lists_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store");

    let out = run_json(extchoice(&store).arg("list"));
    assert_eq!(out["names"], json!([]));

    let out = run_json(extchoice(&store).args(["choices", "env"]));
    assert_eq!(out["choices"], json!([]));
}

#[test]
fn configure_filters_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store");
    let sub = dir.path().join("submission.json");
    write_json(
        &sub,
        &json!({ "entries": [
            { "name": "env", "choices": ["dev", "staging", "prod"] },
            { "name": "", "choices": ["x"] },
            { "name": "region", "choiceText": "eu\nus\n" }
        ]}),
    );

    let out = run_json(extchoice(&store).arg("configure").arg(&sub));
    assert_eq!(out["submitted"], 3);
    assert_eq!(out["report"]["kept"], 2);
    assert_eq!(out["report"]["dropped"][0]["index"], 1);
    assert_eq!(out["report"]["persistence"]["status"], "saved");

    let out = run_json(extchoice(&store).arg("list"));
    assert_eq!(out["names"], json!(["env", "region"]));

    let out = run_json(extchoice(&store).args(["choices", "env"]));
    assert_eq!(out["choices"], json!(["dev", "staging", "prod"]));

    let out = run_json(extchoice(&store).args(["choices", "missing"]));
    assert_eq!(out["choices"], json!([]));

    let out = run_json(extchoice(&store).args(["show", "region"]));
    assert_eq!(out["entry"]["choices"], json!(["eu", "us"]));
}

#[test]
fn show_missing_entry_fails() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store");
    extchoice(&store).args(["show", "nope"]).assert().failure();
}

#[test]
fn configure_with_empty_list_clears_registry() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store");
    let sub = dir.path().join("sub.json");

    write_json(&sub, &json!([{ "name": "env", "choices": ["dev"] }]));
    run_json(extchoice(&store).arg("configure").arg(&sub));

    write_json(&sub, &json!([]));
    run_json(extchoice(&store).arg("configure").arg(&sub));

    let out = run_json(extchoice(&store).arg("list"));
    assert_eq!(out["names"], json!([]));
}

#[test]
fn resolve_global_binding() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store");
    let sub = dir.path().join("sub.json");
    let binding = dir.path().join("binding.json");

    write_json(&sub, &json!([{ "name": "env", "choices": ["dev", "prod"] }]));
    run_json(extchoice(&store).arg("configure").arg(&sub));

    write_json(
        &binding,
        &json!({ "provider": "builtin.global", "config": { "name": "env" } }),
    );
    let out = run_json(extchoice(&store).arg("resolve").arg(&binding));
    assert_eq!(out["display_name"], "Global Choice Set");
    assert_eq!(out["choices"], json!(["dev", "prod"]));

    write_json(
        &binding,
        &json!({ "provider": "builtin.global", "config": { "name": "gone" } }),
    );
    let out = run_json(extchoice(&store).arg("resolve").arg(&binding));
    assert_eq!(out["choices"], json!([]));
}

#[test]
fn resolve_unknown_provider_fails() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store");
    let binding = dir.path().join("binding.json");
    write_json(&binding, &json!({ "provider": "builtin.nope" }));

    extchoice(&store)
        .arg("resolve")
        .arg(&binding)
        .assert()
        .failure();
}

#[test]
fn providers_lists_builtins() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_json(extchoice(dir.path()).arg("providers"));
    let ids: Vec<&str> = out["providers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["builtin.global", "builtin.textarea"]);
}

#[test]
fn check_name_follows_policy() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store");

    let out = run_json(extchoice(&store).args(["check-name", "env_1"]));
    assert_eq!(out["result"]["kind"], "ok");

    extchoice(&store)
        .args(["check-name", "my env"])
        .assert()
        .failure();

    let out = run_json(extchoice(&store).args(["--name-policy", "non-empty", "check-name", "my env"]));
    assert_eq!(out["result"]["kind"], "ok");
}

fn stderr_error(out: &std::process::Output) -> Value {
    let stderr = String::from_utf8_lossy(&out.stderr);
    let last = stderr.lines().last().expect("error line on stderr");
    serde_json::from_str(last).expect("error line is json")
}

#[test]
fn missing_entry_reports_not_found_code() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store");

    let out = extchoice(&store).args(["show", "nope"]).output().unwrap();
    assert!(!out.status.success());
    assert_eq!(stderr_error(&out)["error"]["code"], "not_found");
}

#[test]
fn zero_max_name_len_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store");

    let out = extchoice(&store)
        .args(["--max-name-len", "0", "list"])
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert_eq!(stderr_error(&out)["error"]["code"], "invalid_argument");
}

#[cfg(unix)]
#[test]
fn configure_save_failure_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    // Store root points nowhere: loads find nothing, saves cannot create it.
    let store = dir.path().join("store");
    std::os::unix::fs::symlink(dir.path().join("missing"), &store).unwrap();
    let sub = dir.path().join("sub.json");
    write_json(&sub, &json!([{ "name": "env", "choices": ["dev"] }]));

    let out = extchoice(&store).arg("configure").arg(&sub).output().unwrap();
    assert!(!out.status.success());

    let report: Value = serde_json::from_slice(&out.stdout).expect("stdout is json");
    assert_eq!(report["report"]["kept"], 1);
    assert_eq!(report["report"]["persistence"]["status"], "failed");
    assert_eq!(report["names"], json!(["env"]));
    assert_eq!(stderr_error(&out)["error"]["code"], "store");
}
