use std::process::Command;

fn run(args: &[&str]) -> std::process::Output {
    let exe = env!("CARGO_BIN_EXE_cacaodx");
    Command::new(exe)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run cacaodx")
}

#[test]
fn password_strength_plain_text() {
    let output = run(&["password-strength", "abc", "--memory"]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Password strength: Weak"));
}

#[test]
fn password_strength_json() {
    let output = run(&["password-strength", "Cacao-Pod-2024", "--json", "--memory"]);

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["strength"], "Strong");
    assert_eq!(value["fill_percent"], 100);
}

#[test]
fn password_change_accepts_valid_input() {
    let output = run(&[
        "check-password-change",
        "--current",
        "old-pass",
        "--new",
        "Cacao-2024",
        "--confirm",
        "Cacao-2024",
        "--memory",
    ]);

    assert!(output.status.success());
    assert!(
        String::from_utf8_lossy(&output.stdout)
            .contains("Password change accepted (strength: Strong)")
    );
}

#[test]
fn password_change_rejects_mismatched_confirmation() {
    let output = run(&[
        "check-password-change",
        "--current",
        "old-pass",
        "--new",
        "secret1",
        "--confirm",
        "secret2",
        "--memory",
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(
        String::from_utf8_lossy(&output.stderr)
            .contains("ERROR: invalid_input - new passwords do not match")
    );
}
