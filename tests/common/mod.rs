//! Common test utilities

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary directory with an argot.yml file
pub fn create_test_manifest(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let manifest_path = temp_dir.path().join("argot.yml");
    fs::write(&manifest_path, content).unwrap();
    (temp_dir, manifest_path)
}

/// Create a test manifest with an empty subdirectory next to it
pub fn create_test_manifest_in_subdir(content: &str) -> (TempDir, PathBuf, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let manifest_path = temp_dir.path().join("argot.yml");
    let sub_dir = temp_dir.path().join("subdir");

    fs::write(&manifest_path, content).unwrap();
    fs::create_dir(&sub_dir).unwrap();

    (temp_dir, manifest_path, sub_dir)
}

/// Manifest used across binary tests
pub const WORKSPACE_MANIFEST: &str = r#"
name: ws
usage: Workspace helper
commands:
  - pattern: init
    description: Initialize the workspace
    output: init
  - pattern: "test:<command>"
    options:
      - name: name
        type: string
        alias: n
    completions:
      command: [command]
    output: "${command}:${name}"
  - pattern: "test [action]"
    options:
      - name: user
        type: string
        alias: u
        description: User name
      - name: password
        type: string
        alias: p
        description: User password
    completions:
      action: [foo, bar]
    output: "${user}:${password}@${action}"
  - pattern: "config:set [...configs]"
    run: "echo ${configs}"
"#;
