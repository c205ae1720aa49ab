use std::process::{Command, Output};

use deferlog::DEBUG_WARNING;

fn demo_output(args: &[&str]) -> Output {
    let path = env!("CARGO_BIN_EXE_deferlog-demo");
    Command::new(path)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|error| panic!("failed to run {}: {}", path, error))
}

fn stdout_utf8(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("stdout is UTF-8")
}

#[test]
fn early_messages_reach_the_backend_in_order() {
    let output = demo_output(&["--early", "2"]);
    assert!(output.status.success(), "demo should succeed");

    let stdout = stdout_utf8(&output);
    let starting = stdout.find("demo starting").expect("replayed start line");
    let first = stdout.find("early message 0").expect("first early line");
    let second = stdout.find("early message 1").expect("second early line");
    let finished = stdout.find("demo finished").expect("post-install line");
    assert!(starting < first && first < second && second < finished);

    assert!(!stdout.contains("early message 2"));
    assert!(!stdout.contains("dropped, nothing is installed"));
    assert!(stdout.contains("backend warmup took "));
    assert!(stdout.contains("first"));
    assert!(stdout.contains("second"));
}

#[test]
fn fatal_before_install_exits_without_replay() {
    let output = demo_output(&["--fatal-early"]);
    assert_eq!(output.status.code(), Some(deferlog::FATAL_EXIT_CODE));

    let stdout = stdout_utf8(&output);
    assert!(!stdout.contains("demo starting"));
    assert!(!stdout.contains("fatal before any backend"));
}

#[test]
fn debug_flag_prints_warning() {
    let output = demo_output(&["--debug", "--early", "0"]);
    assert!(output.status.success());
    assert!(stdout_utf8(&output).contains(DEBUG_WARNING));
}

#[test]
fn missing_config_file_uses_defaults() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("none.toml");
    let output = demo_output(&["--config", path.to_str().unwrap(), "--early", "0"]);
    assert!(output.status.success());
    assert!(!stdout_utf8(&output).contains(DEBUG_WARNING));
}

#[test]
fn config_file_enables_debug() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("deferlog.toml");
    std::fs::write(&path, "debug = true\nfilter = \"debug\"\n").unwrap();

    let output = demo_output(&["--config", path.to_str().unwrap(), "--early", "0"]);
    assert!(output.status.success());

    let stdout = stdout_utf8(&output);
    assert!(stdout.contains(DEBUG_WARNING));
    assert!(stdout.contains("debug detail"));
    assert!(stdout.contains("more detail"));
}

#[test]
fn unknown_flag_is_rejected() {
    let output = demo_output(&["--definitely-not-a-flag"]);
    assert!(!output.status.success());
}
