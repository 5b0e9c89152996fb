mod common;

use assert_fs::TempDir;
use common::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn log_prints_newest_first_in_block_format(repo: TempDir) {
    commit_file(&repo, "a.txt", "one\n", "first");
    commit_file(&repo, "a.txt", "two\n", "second");

    let log = run(&repo, &["log"]);
    let messages: Vec<&str> = log
        .split("===\n")
        .filter(|block| !block.is_empty())
        .map(|block| block.lines().nth(2).unwrap())
        .collect();
    assert_eq!(messages, vec!["second", "first", "initial commit"]);

    for block in log.split("===\n").filter(|block| !block.is_empty()) {
        let mut lines = block.lines();
        assert!(lines.next().unwrap().starts_with("commit "));
        assert!(lines.next().unwrap().starts_with("Date: "));
    }
}

#[rstest]
fn log_follows_only_the_current_branch(repo: TempDir) {
    commit_file(&repo, "a.txt", "base\n", "base");
    run(&repo, &["branch", "feature"]);
    run(&repo, &["checkout", "feature"]);
    commit_file(&repo, "a.txt", "feature work\n", "on feature");
    run(&repo, &["checkout", "master"]);

    let log = run(&repo, &["log"]);
    assert!(!log.contains("on feature"));

    let global = run(&repo, &["global-log"]);
    assert!(global.contains("on feature"));
    assert!(global.contains("base"));
    assert!(global.contains("initial commit"));
}

#[rstest]
fn find_prints_every_matching_id(repo: TempDir) {
    commit_file(&repo, "a.txt", "one\n", "same message");
    let first = head_id(&repo);
    commit_file(&repo, "a.txt", "two\n", "same message");
    let second = head_id(&repo);

    let out = run(&repo, &["find", "same message"]);
    let mut ids: Vec<&str> = out.lines().collect();
    ids.sort();
    let mut expected = vec![first.as_str(), second.as_str()];
    expected.sort();
    assert_eq!(ids, expected);
}

#[rstest]
fn find_without_a_match_is_rejected(repo: TempDir) {
    let out = run(&repo, &["find", "never committed"]);
    assert_eq!(out, "Found no commit with that message.\n");
}

#[rstest]
fn status_renders_every_section(repo: TempDir) {
    commit_file(&repo, "tracked.txt", "committed\n", "base");
    commit_file(&repo, "gone.txt", "doomed\n", "add doomed");
    run(&repo, &["branch", "feature"]);

    write_file(&repo, "staged.txt", "new\n");
    run(&repo, &["add", "staged.txt"]);
    run(&repo, &["rm", "gone.txt"]);
    write_file(&repo, "tracked.txt", "drifted\n");
    write_file(&repo, "loose.txt", "untracked\n");

    let status = run(&repo, &["status"]);
    assert_eq!(
        status,
        "=== Branches ===\n\
         feature\n\
         *master\n\
         \n\
         === Staged Files ===\n\
         staged.txt\n\
         \n\
         === Removed Files ===\n\
         gone.txt\n\
         \n\
         === Modifications Not Staged For Commit ===\n\
         tracked.txt (modified)\n\
         \n\
         === Untracked Files ===\n\
         loose.txt\n"
    );
}

#[rstest]
fn status_reports_deleted_working_files(repo: TempDir) {
    commit_file(&repo, "tracked.txt", "committed\n", "base");
    std::fs::remove_file(repo.path().join("tracked.txt")).unwrap();

    write_file(&repo, "staged.txt", "x\n");
    run(&repo, &["add", "staged.txt"]);
    std::fs::remove_file(repo.path().join("staged.txt")).unwrap();

    let status = run(&repo, &["status"]);
    assert!(status.contains(
        "=== Modifications Not Staged For Commit ===\n\
         staged.txt (deleted)\n\
         tracked.txt (deleted)\n"
    ));
}
