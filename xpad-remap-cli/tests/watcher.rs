use std::process::Command;

const WATCHER: &str = env!("CARGO_BIN_EXE_gamepad-combo-watch");

#[test]
fn test_unopenable_device_fails() {
    let output = Command::new(WATCHER)
        .args(["--device", "/nonexistent", "--launcher", "/bin/true"])
        .output()
        .expect("watcher binary runs");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("/nonexistent"), "got {stderr:?}");
}

#[test]
fn test_unknown_flag_is_rejected() {
    let output = Command::new(WATCHER)
        .arg("--no-such-flag")
        .output()
        .expect("watcher binary runs");
    assert!(!output.status.success());
}
