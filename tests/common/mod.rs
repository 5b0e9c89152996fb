//! Helpers shared by the integration tests: every test drives the real
//! binary inside a temporary directory. Failures print one line on stdout
//! and exit 0, so assertions read stdout for both outcomes.

// Not every suite uses every helper.
#![allow(dead_code)]

use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;

pub fn lit(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("lit").expect("lit binary builds");
    cmd.current_dir(dir.path());
    cmd
}

/// Run a command and return its stdout. Every invocation is expected to
/// exit 0, errors included.
pub fn run(dir: &TempDir, args: &[&str]) -> String {
    let assert = lit(dir).args(args).assert().success();
    String::from_utf8(assert.get_output().stdout.clone()).expect("utf-8 output")
}

pub fn write_file(dir: &TempDir, path: &str, content: &str) {
    let full = dir.path().join(path);
    if let Some(parent) = full.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(full, content).unwrap();
}

pub fn read_file(dir: &TempDir, path: &str) -> String {
    std::fs::read_to_string(dir.path().join(path)).unwrap()
}

pub fn file_exists(dir: &TempDir, path: &str) -> bool {
    dir.path().join(path).is_file()
}

/// Id of the commit the active branch points at, read from `log`.
pub fn head_id(dir: &TempDir) -> String {
    run(dir, &["log"])
        .lines()
        .find_map(|line| line.strip_prefix("commit "))
        .expect("log prints at least one commit")
        .to_string()
}

/// Stage and commit one file in a single step.
pub fn commit_file(dir: &TempDir, path: &str, content: &str, message: &str) {
    write_file(dir, path, content);
    run(dir, &["add", path]);
    run(dir, &["commit", message]);
}

#[fixture]
pub fn repo() -> TempDir {
    let dir = TempDir::new().unwrap();
    run(&dir, &["init"]);
    dir
}
