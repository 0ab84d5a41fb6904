use std::process::Command;

#[test]
fn cli_smoke_help() {
    let exe = env!("CARGO_BIN_EXE_cacaodx");
    let output = Command::new(exe)
        .arg("--help")
        .output()
        .expect("failed to run cacaodx --help");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("view"));
    assert!(stdout.contains("toggle"));
}

#[test]
fn unknown_command_reports_invalid_input() {
    let exe = env!("CARGO_BIN_EXE_cacaodx");
    let output = Command::new(exe)
        .arg("water")
        .output()
        .expect("failed to run cacaodx");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input"));
}
