//! Runs the built `deadimg` binary against temp projects.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicU64, Ordering};

static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

fn create_file(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn create_project(name: &str) -> PathBuf {
    let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    let root = std::env::temp_dir()
        .join("deadimg_cli_bin_test")
        .join(format!("{}_{}_{}", name, std::process::id(), id));
    if root.exists() {
        fs::remove_dir_all(&root).ok();
    }
    create_file(&root.join("public/a.png"), "a");
    create_file(&root.join("public/qb.png"), "b");
    create_file(&root.join("src/App.ts"), "import './a.png'");
    root
}

fn deadimg(root: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_deadimg"))
        .arg(root)
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn test_json_with_delete_keeps_stdout_parseable() {
    let root = create_project("json_delete");

    let output = deadimg(&root, &["--json", "--delete"]);

    assert_eq!(output.status.code(), Some(0));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["unusedCount"], 1);
    assert_eq!(report["unusedImages"][0]["path"], "public/qb.png");
    assert!(String::from_utf8_lossy(&output.stderr).contains("[DELETE]"));
    assert!(!root.join("public/qb.png").exists());
    assert!(root.join("public/a.png").exists());

    fs::remove_dir_all(&root).ok();
}

#[test]
fn test_json_with_dry_run_keeps_files() {
    let root = create_project("json_dry_run");

    let output = deadimg(&root, &["--json", "--dry-run"]);

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["unusedCount"], 1);
    assert!(root.join("public/qb.png").exists());

    fs::remove_dir_all(&root).ok();
}

#[test]
fn test_fail_on_unused_exit_code() {
    let root = create_project("fail");

    let output = deadimg(&root, &["--fail-on-unused"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(root.join("unused-images.json").exists());

    fs::remove_dir_all(&root).ok();
}
