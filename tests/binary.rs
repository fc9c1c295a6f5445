//! Integration tests for the argot binary

mod common;

use assert_cmd::Command;
use common::{create_test_manifest, WORKSPACE_MANIFEST};
use predicates::prelude::*;
use tempfile::TempDir;

fn argot() -> Command {
    Command::cargo_bin("argot").unwrap()
}

#[test]
fn test_runs_matching_command() {
    let (_temp_dir, manifest_path) = create_test_manifest(WORKSPACE_MANIFEST);

    argot()
        .arg("-f")
        .arg(&manifest_path)
        .arg("init")
        .assert()
        .success()
        .stdout("init\n");
}

#[test]
fn test_passes_options_to_command() {
    let (_temp_dir, manifest_path) = create_test_manifest(WORKSPACE_MANIFEST);

    argot()
        .arg("-f")
        .arg(&manifest_path)
        .args(["test", "action", "-u", "foo", "-p", "bar"])
        .assert()
        .success()
        .stdout("foo:bar@action\n");
}

#[test]
fn test_discovers_manifest_in_current_dir() {
    let (temp_dir, _manifest_path) = create_test_manifest(WORKSPACE_MANIFEST);

    argot()
        .current_dir(temp_dir.path())
        .args(["config:set", "A=1", "B=2"])
        .assert()
        .success()
        .stdout("A=1 B=2\n");
}

#[test]
fn test_unknown_command_fails() {
    let (_temp_dir, manifest_path) = create_test_manifest(WORKSPACE_MANIFEST);

    argot()
        .arg("-f")
        .arg(&manifest_path)
        .arg("deploy")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: Command not found"));
}

#[test]
fn test_missing_manifest_fails() {
    let temp_dir = TempDir::new().unwrap();

    argot()
        .current_dir(temp_dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to find manifest file"));
}

#[test]
fn test_complete_request() {
    let (_temp_dir, manifest_path) = create_test_manifest(WORKSPACE_MANIFEST);

    argot()
        .arg("-f")
        .arg(&manifest_path)
        .args(["complete", "2", "ws test "])
        .assert()
        .success()
        .stdout("foo\nbar\n");

    argot()
        .arg("-f")
        .arg(&manifest_path)
        .args(["complete", "1", "ws test:"])
        .assert()
        .success()
        .stdout("test:command\n");
}

#[test]
fn test_complete_request_without_candidates() {
    let (_temp_dir, manifest_path) = create_test_manifest(WORKSPACE_MANIFEST);

    argot()
        .arg("-f")
        .arg(&manifest_path)
        .args(["complete", "1", "ws zzz"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_completion_script() {
    let (_temp_dir, manifest_path) = create_test_manifest(WORKSPACE_MANIFEST);

    argot()
        .arg("-f")
        .arg(&manifest_path)
        .arg("completion")
        .assert()
        .success()
        .stdout(predicate::str::contains("complete -o nospace -F _ws_completion ws"));
}

#[test]
fn test_command_help() {
    let (_temp_dir, manifest_path) = create_test_manifest(WORKSPACE_MANIFEST);

    argot()
        .arg("-f")
        .arg(&manifest_path)
        .args(["test", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: ws test [action]"))
        .stdout(predicate::str::contains("-u, --user"));
}

#[test]
fn test_silent_suppresses_output() {
    let (_temp_dir, manifest_path) = create_test_manifest(WORKSPACE_MANIFEST);

    argot()
        .arg("-s")
        .arg("-f")
        .arg(&manifest_path)
        .arg("init")
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_top_level_help_lists_commands() {
    let (_temp_dir, manifest_path) = create_test_manifest(WORKSPACE_MANIFEST);

    argot()
        .arg("-f")
        .arg(&manifest_path)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("Initialize the workspace"));
}
