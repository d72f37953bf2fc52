//! Integration tests for the `tasktree` CLI.
//!
//! Each test runs `tasktree print` as a subprocess inside a temp directory
//! and checks stdout, stderr and the exit status.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Get the path to the built `tasktree` binary.
fn tasktree_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("tasktree");
    path
}

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Run the binary in `dir` with logs kept inside it
fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(tasktree_bin())
        .current_dir(dir)
        .arg("--log-file")
        .arg(dir.join("tasktree.log"))
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn print_demo_collapsed() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run(tmp.path(), &["print"]);
    assert!(out.status.success());
    let text = stdout(&out);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("ITEM"));
    assert!(lines[0].contains("DUE DATE"));
    assert!(lines[1].contains("\u{25B6} Blog"));
}

#[test]
fn print_demo_expanded() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run(tmp.path(), &["print", "--expand-all"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert_eq!(text.lines().count(), 10);
    for title in ["Social Media", "Write 3 posts", "Landing Page", "Create Video"] {
        assert!(text.contains(title), "missing {}", title);
    }
}

#[test]
fn print_seed_with_its_columns() {
    let tmp = tempfile::TempDir::new().unwrap();
    let seed = fixture("blog.json");
    let out = run(
        tmp.path(),
        &["print", "--expand-all", "--tasks", seed.to_str().unwrap()],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let text = stdout(&out);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].contains("PRIORITY"));
    assert!(!lines[0].contains("ASSIGNEES"));
    assert!(lines[2].contains("Social Media"));
    assert!(lines[2].contains("high"));
    assert!(lines[3].contains("Webinar"));
}

#[test]
fn seed_expansion_flag_is_ignored() {
    let tmp = tempfile::TempDir::new().unwrap();
    let seed = fixture("blog.json");
    let out = run(tmp.path(), &["print", "--tasks", seed.to_str().unwrap()]);
    assert!(out.status.success());
    // isExpanded in the file does not seed the expansion set
    assert_eq!(stdout(&out).lines().count(), 3);
}

#[test]
fn print_json_rows() {
    let tmp = tempfile::TempDir::new().unwrap();
    let seed = fixture("blog.json");
    let out = run(
        tmp.path(),
        &["print", "--json", "--expand-all", "--tasks", seed.to_str().unwrap()],
    );
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    let rows = value["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1]["id"], "1-1");
    assert_eq!(rows[1]["depth"], 1);
    assert_eq!(rows[1]["cells"]["col-status"], "STARTED");
    assert_eq!(rows[1]["cells"]["col-priority"], "high");
    assert_eq!(rows[2]["cells"]["col-priority"], serde_json::Value::Null);
}

#[test]
fn config_columns_apply_without_seed_columns() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(
        tmp.path().join("tasktree.toml"),
        r#"[ui]
show_key_hints = false

[[columns]]
id = "col-title"
title = "WHAT"
field = "title"

[[columns]]
id = "col-who"
title = "WHO"
field = "assignee"
"#,
    )
    .unwrap();
    let out = run(tmp.path(), &["print"]);
    assert!(out.status.success());
    let text = stdout(&out);
    let header = text.lines().next().unwrap();
    assert!(header.contains("WHAT"));
    assert!(header.contains("WHO"));
    assert!(!header.contains("STATUS"));
}

#[test]
fn width_flag_limits_lines() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run(tmp.path(), &["print", "--expand-all", "--width", "60"]);
    assert!(out.status.success());
    for line in stdout(&out).lines() {
        assert!(line.chars().count() <= 60, "too wide: {:?}", line);
    }
}

#[test]
fn missing_seed_exits_with_error() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run(tmp.path(), &["print", "--tasks", "missing.json"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.starts_with("error: "), "stderr: {}", stderr);
    assert!(stderr.contains("missing.json"));
}

#[test]
fn duplicate_ids_are_rejected() {
    let tmp = tempfile::TempDir::new().unwrap();
    let seed = tmp.path().join("dup.json");
    fs::write(
        &seed,
        r#"[{"id":"a","title":"A","subTasks":[{"id":"a","title":"again"}]}]"#,
    )
    .unwrap();
    let out = run(tmp.path(), &["print", "--tasks", seed.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("duplicate task id"));
}

#[test]
fn explicit_config_must_exist() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run(tmp.path(), &["print", "--config", "nope.toml"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn logs_go_to_the_log_file() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run(tmp.path(), &["print"]);
    assert!(out.status.success());
    let log = fs::read_to_string(tmp.path().join("tasktree.log")).unwrap();
    assert!(log.contains("tasktree starting"));
    assert!(out.stderr.is_empty());
}
