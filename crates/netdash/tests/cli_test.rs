//! Integration tests for the `netdash` CLI binary.
//!
//! Every test runs against an isolated config file in a temp directory
//! and pins the caller with `--caller-ip` unless it exercises the echo
//! service, which is mocked with wiremock.
#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

const ALLOWED_CALLER: &str = "10.19.10.7";
const OUTSIDE_CALLER: &str = "192.168.1.5";

// ── Helpers ─────────────────────────────────────────────────────────

/// Temp directory holding a config file and an export directory.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self::with_config("")
    }

    /// Config allowing `10.19.10.0/24`, fast timers, exports in the sandbox.
    fn authorized() -> Self {
        Self::with_config(
            r#"
[authorization]
allow_list = ["10.19.10.0/24", "39.46.240.230"]

[session]
scan_tick_ms = 1
assistant_delay_ms = 1
"#,
        )
    }

    fn with_config(extra: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let exports = dir.path().join("exports");
        std::fs::create_dir_all(&exports).unwrap();
        let config = format!(
            "{extra}\n[export]\ndirectory = \"{}\"\n",
            exports.display().to_string().replace('\\', "\\\\")
        );
        std::fs::write(dir.path().join("config.toml"), config).unwrap();
        Self { dir }
    }

    fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    fn exports(&self) -> PathBuf {
        self.dir.path().join("exports")
    }

    /// `netdash` with env isolation pointed at this sandbox.
    fn cmd(&self) -> assert_cmd::Command {
        netdash_cmd(&self.config_path())
    }
}

/// Build a [`Command`] for the `netdash` binary with env isolation.
///
/// Clears all `NETDASH_*` env vars the CLI reads and points config
/// lookups at `config` so tests never touch the user's real setup.
fn netdash_cmd(config: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("netdash");
    cmd.env("HOME", "/tmp/netdash-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/netdash-cli-test-nonexistent")
        .env("NETDASH_CONFIG", config)
        .env("NO_COLOR", "1")
        .env_remove("NETDASH_OUTPUT")
        .env_remove("NETDASH_COLOR")
        .env_remove("NETDASH_TIMEOUT")
        .env_remove("NETDASH_CALLER_IP")
        .env_remove("NETDASH_DEVICE_USERNAME")
        .env_remove("NETDASH_DEVICE_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let sandbox = Sandbox::new();
    let output = sandbox.cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    Sandbox::new().cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("devices")
            .and(predicate::str::contains("outputs"))
            .and(predicate::str::contains("alerts"))
            .and(predicate::str::contains("export")),
    );
}

#[test]
fn test_version_flag() {
    Sandbox::new()
        .cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("netdash"));
}

#[test]
fn test_invalid_subcommand() {
    let output = Sandbox::new().cmd().arg("reboot-everything").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    Sandbox::new()
        .cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    Sandbox::new()
        .cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Read-only commands ──────────────────────────────────────────────

#[test]
fn test_devices_list_needs_no_authorization() {
    let output = Sandbox::new()
        .cmd()
        .args(["devices", "list", "-o", "json", "--caller-ip", OUTSIDE_CALLER])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));
    let devices = stdout_json(&output);
    assert_eq!(devices.as_array().unwrap().len(), 106);
}

#[test]
fn test_core_listing_shows_online_devices_only() {
    let output = Sandbox::new()
        .cmd()
        .args(["devices", "list", "-t", "core", "-o", "plain"])
        .args(["--caller-ip", OUTSIDE_CALLER])
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().collect::<Vec<_>>(), vec!["fw-01", "cs-01", "r-01"]);
}

#[test]
fn test_devices_health() {
    let output = Sandbox::new()
        .cmd()
        .args(["devices", "health", "-o", "json", "--caller-ip", OUTSIDE_CALLER])
        .output()
        .unwrap();
    let health = stdout_json(&output);
    assert_eq!(health["total"], 106);
    assert_eq!(health["online"], 58);
}

#[test]
fn test_unknown_device_is_not_found() {
    let output = Sandbox::new()
        .cmd()
        .args(["devices", "get", "nope", "--caller-ip", OUTSIDE_CALLER])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn test_templates_plain() {
    Sandbox::new()
        .cmd()
        .args(["templates", "-o", "plain", "--caller-ip", OUTSIDE_CALLER])
        .assert()
        .success()
        .stdout(predicate::str::contains("show version"));
}

#[test]
fn test_seeded_outputs() {
    let output = Sandbox::new()
        .cmd()
        .args(["outputs", "list", "-o", "json", "--caller-ip", OUTSIDE_CALLER])
        .output()
        .unwrap();
    let outputs = stdout_json(&output);
    assert_eq!(outputs.as_array().unwrap().len(), 3);
    assert_eq!(outputs[0]["id"], "1");
}

#[test]
fn test_auth_reports_verdict() {
    let sandbox = Sandbox::authorized();

    let granted = sandbox
        .cmd()
        .args(["auth", "-o", "json", "--caller-ip", ALLOWED_CALLER])
        .output()
        .unwrap();
    assert_eq!(stdout_json(&granted)["authorized"], true);

    let refused = sandbox
        .cmd()
        .args(["auth", "-o", "json", "--caller-ip", OUTSIDE_CALLER])
        .output()
        .unwrap();
    let view = stdout_json(&refused);
    assert_eq!(view["authorized"], false);
    assert_eq!(view["caller"], OUTSIDE_CALLER);
}

// ── Gate ────────────────────────────────────────────────────────────

#[test]
fn test_empty_allow_list_denies_send() {
    let output = Sandbox::new()
        .cmd()
        .args(["send", "show", "version", "--caller-ip", ALLOWED_CALLER])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(5));
    let text = combined_output(&output);
    assert!(
        text.contains("You are not authorized to perform this action."),
        "missing notifier warning:\n{text}"
    );
}

#[test]
fn test_outside_caller_cannot_resolve_alerts() {
    Sandbox::authorized()
        .cmd()
        .args(["alerts", "resolve", "1", "--caller-ip", OUTSIDE_CALLER])
        .assert()
        .code(5);
}

#[test]
fn test_malformed_caller_is_denied() {
    Sandbox::authorized()
        .cmd()
        .args(["send", "show", "version", "--caller-ip", "10.19.10"])
        .assert()
        .code(5);
}

// ── Mutating commands ───────────────────────────────────────────────

#[test]
fn test_send_to_selected_device() {
    let output = Sandbox::authorized()
        .cmd()
        .args(["send", "show", "version", "-d", "cs-01", "-o", "json"])
        .args(["--caller-ip", ALLOWED_CALLER])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));
    let sent = stdout_json(&output);
    assert_eq!(sent["command"], "show version");
    assert_eq!(sent["device"], "Core Switch (10.19.10.2)");
    assert_eq!(sent["status"], "success");
}

#[test]
fn test_export_requires_type() {
    let sandbox = Sandbox::authorized();
    sandbox
        .cmd()
        .args(["export", "--caller-ip", ALLOWED_CALLER])
        .assert()
        .code(2);
    assert_eq!(std::fs::read_dir(sandbox.exports()).unwrap().count(), 0);
}

#[test]
fn test_export_all_as_json() {
    let sandbox = Sandbox::authorized();
    let output = sandbox
        .cmd()
        .args(["export", "-t", "all", "-f", "json", "-r", "all", "-o", "json"])
        .args(["--caller-ip", ALLOWED_CALLER])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let summary = stdout_json(&output);
    let filename = summary["filename"].as_str().unwrap();
    assert!(filename.starts_with("network_export_all_"));
    assert!(
        Path::new(filename)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    );

    let written = std::fs::read(sandbox.exports().join(filename)).unwrap();
    let doc: serde_json::Value = serde_json::from_slice(&written).unwrap();
    assert_eq!(doc["export_info"]["type"], "all");
    assert_eq!(doc["devices"].as_array().unwrap().len(), 106);
}

#[test]
fn test_save_single_output() {
    let sandbox = Sandbox::authorized();
    sandbox
        .cmd()
        .args(["outputs", "save", "1", "--caller-ip", ALLOWED_CALLER])
        .assert()
        .success();
    let saved: Vec<_> = std::fs::read_dir(sandbox.exports())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(saved.len(), 1);
    assert!(saved[0].ends_with(".txt"), "unexpected file {saved:?}");
}

#[test]
fn test_clear_outputs_needs_confirmation_when_not_interactive() {
    Sandbox::authorized()
        .cmd()
        .args(["outputs", "clear", "--caller-ip", ALLOWED_CALLER])
        .write_stdin("")
        .assert()
        .code(2);
}

#[test]
fn test_scan_reports_new_alert() {
    let output = Sandbox::authorized()
        .cmd()
        .args(["alerts", "scan", "-o", "json", "-q"])
        .args(["--caller-ip", ALLOWED_CALLER])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));
}

#[test]
fn test_scan_prints_alert_json() {
    let output = Sandbox::authorized()
        .cmd()
        .args(["alerts", "scan", "-o", "json"])
        .args(["--caller-ip", ALLOWED_CALLER])
        .output()
        .unwrap();
    let alert = stdout_json(&output);
    assert_eq!(alert["issue"], "Firmware version outdated");
    assert_eq!(alert["status"], "active");
}

#[test]
fn test_assistant_replies() {
    Sandbox::authorized()
        .cmd()
        .args(["assistant", "ask", "how", "is", "the", "network?", "-o", "plain"])
        .args(["--caller-ip", ALLOWED_CALLER])
        .assert()
        .success()
        .stdout(predicate::str::contains("show interfaces status"));
}

#[test]
fn test_shell_keeps_state_between_lines() {
    let output = Sandbox::authorized()
        .cmd()
        .args(["shell", "-q", "-o", "plain", "--caller-ip", ALLOWED_CALLER])
        .write_stdin("send \"show ip route\"\nhistory\nexit\n")
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("show ip route"),
        "history did not keep the sent command:\n{stdout}"
    );
}

// ── Echo service ────────────────────────────────────────────────────

async fn echo_server(ip: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ip": ip })))
        .mount(&server)
        .await;
    server
}

#[tokio::test(flavor = "multi_thread")]
async fn test_echo_service_resolves_caller() {
    let server = echo_server("39.46.240.230").await;
    let sandbox = Sandbox::authorized();

    let output = sandbox
        .cmd()
        .env("NETDASH_AUTHORIZATION__RESOLVER_URL", server.uri())
        .args(["auth", "-o", "json"])
        .output()
        .unwrap();
    let view = stdout_json(&output);
    assert_eq!(view["caller"], "39.46.240.230");
    assert_eq!(view["authorized"], true);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_echo_failure_fails_closed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let sandbox = Sandbox::authorized();

    sandbox
        .cmd()
        .env("NETDASH_AUTHORIZATION__RESOLVER_URL", server.uri())
        .args(["send", "show", "version"])
        .assert()
        .code(5);
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_honors_override() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_show_masks_password() {
    let sandbox =
        Sandbox::with_config("[credentials]\nusername = \"netops\"\npassword = \"hunter2\"\n");
    sandbox
        .cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("****").and(predicate::str::contains("hunter2").not()));
}

#[test]
fn test_invalid_allow_list_is_a_usage_error() {
    Sandbox::with_config("[authorization]\nallow_list = [\"10.0.0.0/33\"]\n")
        .cmd()
        .args(["devices", "health", "--caller-ip", ALLOWED_CALLER])
        .assert()
        .code(2);
}
