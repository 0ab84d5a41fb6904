use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("cacaodx-{nanos}-{file_name}"))
}

fn run_interactive(input: &str) -> (std::process::Output, PathBuf) {
    let exe = env!("CARGO_BIN_EXE_cacaodx");
    let store_path = temp_path("cli-interactive.json");

    let mut child = Command::new(exe)
        .env("CACAODX_STORE_PATH", &store_path)
        .env("CACAODX_CONFIG_PATH", temp_path("no-config.json"))
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn interactive session");

    {
        let stdin = child.stdin.as_mut().expect("stdin");
        stdin
            .write_all(input.as_bytes())
            .expect("failed to write to stdin");
    }

    let output = child
        .wait_with_output()
        .expect("failed to read interactive output");

    (output, store_path)
}

#[test]
fn interactive_help_shows_usage() {
    let (output, _) = run_interactive("help\nexit\n");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage") || stdout.contains("USAGE"));
}

#[test]
fn interactive_invalid_command_prints_error() {
    let (output, _) = run_interactive("nope\nexit\n");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input"));
}

#[test]
fn interactive_session_keeps_state_in_memory() {
    let script = "view 2024-05-01\ntoggle 2024-05-01-0\nprogress 2024-05-01\nexit\n";
    let (output, store_path) = run_interactive(script);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Progress for 2024-05-01: 0/3 done"));
    assert!(stdout.contains("Completed task:"));
    assert!(stdout.contains("Progress for 2024-05-01: 1/3 done"));
    assert!(!store_path.exists());
}

#[test]
fn interactive_delete_asks_for_confirmation() {
    let script = "view 2024-05-01\ndelete 2024-05-01-0\nn\nprogress 2024-05-01\ndelete 2024-05-01-0\ny\nprogress 2024-05-01\nexit\n";
    let (output, _) = run_interactive(script);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[y/N]"));
    assert!(stdout.contains("Kept task"));
    assert!(stdout.contains("Deleted task:"));
    assert!(stdout.contains("Progress for 2024-05-01: 0/2 done"));
}

#[test]
fn interactive_add_rejects_blank_text_and_continues() {
    let script = "add \"  \" --date 2024-05-01\nadd \"Spray neem oil\" --date 2024-05-01\nexit\n";
    let (output, _) = run_interactive(script);

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input - task text is required"));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Added task: Spray neem oil"));
}

#[test]
fn interactive_override_lasts_one_command() {
    let script = "view 2024-05-01 --json --config-override catalog=OnlyChore\nview 2024-05-02 --json\nexit\n";
    let (output, _) = run_interactive(script);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);

    let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(first["tasks"][0]["text"], "OnlyChore");

    let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
    let tasks = second["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 3);
    assert!(tasks.iter().all(|task| task["text"] != "OnlyChore"));
}

#[test]
fn interactive_rejects_log_level_override() {
    let script = "view 2024-05-01 --config-override log_level=debug\nprogress 2024-05-01\nexit\n";
    let (output, _) = run_interactive(script);

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input - log_level cannot change inside a session"));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No tasks for 2024-05-01"));
}
