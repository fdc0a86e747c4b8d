//! CLI tests for the `fanout` binary.
//!
//! Spawns the binary in a temp directory and checks the exit status and the
//! state of `out/` afterwards.

use std::fs;
use std::process::Command;

use fanout::test_support::temp_base;

fn fanout() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_fanout"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn out_entries(root: &std::path::Path) -> usize {
    fs::read_dir(root.join("out")).expect("read out").count()
}

#[test]
fn run_succeeds_even_when_every_write_fails() {
    let temp = temp_base();
    let output = fanout()
        .current_dir(temp.path())
        .args(["--failure-probability", "1.0"])
        .output()
        .expect("run fanout");

    assert!(output.status.success());
    assert_eq!(out_entries(temp.path()), 0);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("simulated error during file write"));
    assert!(stderr.contains("file operations completed"));
}

#[test]
fn run_with_defaults_leaves_out_empty() {
    let temp = temp_base();
    let status = fanout()
        .current_dir(temp.path())
        .status()
        .expect("run fanout");

    assert!(status.success());
    assert_eq!(out_entries(temp.path()), 0);
}

#[test]
fn config_file_and_base_dir_are_honored() {
    let temp = temp_base();
    let base = temp.path().join("base");
    fs::create_dir(&base).expect("mkdir");
    let config = temp.path().join("fanout.toml");
    fs::write(&config, "subdir = \"scratch\"\ncount = 3\n").expect("write config");

    let status = fanout()
        .current_dir(temp.path())
        .arg("--config")
        .arg(&config)
        .arg("--base-dir")
        .arg(&base)
        .status()
        .expect("run fanout");

    assert!(status.success());
    assert!(base.join("scratch").is_dir());
    assert!(!temp.path().join("out").exists());
}

#[test]
fn blocked_output_dir_exits_with_error() {
    let temp = temp_base();
    fs::write(temp.path().join("out"), "in the way").expect("write");

    let output = fanout()
        .current_dir(temp.path())
        .output()
        .expect("run fanout");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("initialize output directory"));
}

#[test]
fn invalid_probability_exits_with_error() {
    let temp = temp_base();
    let status = fanout()
        .current_dir(temp.path())
        .args(["--failure-probability", "2"])
        .status()
        .expect("run fanout");

    assert_eq!(status.code(), Some(1));
}

#[test]
fn log_dir_receives_one_debug_log_per_run() {
    let temp = temp_base();
    let logs = temp.path().join("logs");
    for _ in 0..4 {
        let status = fanout()
            .current_dir(temp.path())
            .arg("--log-dir")
            .arg(&logs)
            .status()
            .expect("run fanout");
        assert!(status.success());
    }

    let files: Vec<_> = fs::read_dir(&logs)
        .expect("read logs")
        .map(|entry| entry.expect("entry").path())
        .collect();
    assert_eq!(files.len(), 3);
    let newest = files.iter().max().expect("newest log");
    let contents = fs::read_to_string(newest).expect("read log");
    assert!(contents.contains("destination path"));
}
