// Dweve Mindnotes - Incremental Outline Parser
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


//! Integration tests for the mindnotes binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn mindnotes_cmd() -> Command {
    let mut cmd = Command::cargo_bin("mindnotes").expect("Failed to find mindnotes binary");
    cmd.env("NO_COLOR", "1").env_remove("MINDNOTES_MAX_FILE_SIZE");
    cmd
}

fn create_temp_file(content: &str) -> (TempDir, String) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("notes.mn");
    fs::write(&path, content).expect("Failed to write test file");
    let path = path.to_str().expect("utf-8 temp path").to_string();
    (dir, path)
}

fn json_output(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().expect("Failed to run mindnotes");
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

const OUTLINE: &str = "rootNode\n  child\n  (color=red)\n    grandchild\nsibling\n";

// ===== Parse =====

#[test]
fn test_parse_text_lists_events() {
    let (_dir, path) = create_temp_file(OUTLINE);

    mindnotes_cmd()
        .args(["parse", &path])
        .assert()
        .success()
        .stdout(predicate::str::contains("node.add    id=1 parent=- \"rootNode\""))
        .stdout(predicate::str::contains("node.add    id=2 parent=1 \"child\""))
        .stdout(predicate::str::contains("node.add    id=3 parent=2 \"grandchild\""))
        .stdout(predicate::str::contains("node.add    id=4 parent=- \"sibling\""))
        .stdout(predicate::str::contains("(4 nodes, 4 events, 0 errors)"));
}

#[test]
fn test_parse_json_wire_format() {
    let (_dir, path) = create_temp_file("rootNode\n  child");

    let value = json_output(mindnotes_cmd().args(["parse", &path, "--format", "json"]));
    assert_eq!(
        value["events"],
        serde_json::json!([
            {"name": "node.add", "id": 1, "text": "rootNode"},
            {"name": "node.add", "id": 2, "parentId": 1, "text": "child"},
        ])
    );
    assert_eq!(value["errors"], serde_json::json!([]));
}

#[test]
fn test_parse_errors_exit_with_one() {
    let (_dir, path) = create_temp_file("  indentedRoot\nnext");

    mindnotes_cmd()
        .args(["parse", &path])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("RootLineError at line 0"))
        .stdout(predicate::str::contains("\"next\""));
}

#[test]
fn test_parse_json_reports_errors() {
    let (_dir, path) = create_temp_file("root\n    deep\n  shallow");

    let value = json_output(mindnotes_cmd().args(["parse", &path, "-f", "json"]));
    let errors = value["errors"].as_array().expect("errors array");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["kind"], "IndentationMismatchError");
    assert_eq!(errors[0]["line"], 2);
}

#[test]
fn test_parse_empty_file() {
    let (_dir, path) = create_temp_file("");

    mindnotes_cmd()
        .args(["parse", &path])
        .assert()
        .success()
        .stdout(predicate::str::contains("(0 nodes, 0 events, 0 errors)"));
}

#[test]
fn test_parse_line_limit() {
    let (_dir, path) = create_temp_file("short\nthis line is far too long\n");

    mindnotes_cmd()
        .args(["parse", &path, "--max-line-length", "10"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("LineTooLongError at line 1"));
}

#[test]
fn test_parse_node_limit() {
    let (_dir, path) = create_temp_file("a\nb\nc\n");

    mindnotes_cmd()
        .args(["parse", &path, "--max-nodes", "2"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("NodeLimitError at line 2"));
}

// ===== Tree =====

#[test]
fn test_tree_output() {
    let (_dir, path) = create_temp_file(OUTLINE);

    mindnotes_cmd()
        .args(["tree", &path])
        .assert()
        .success()
        .stdout("#1 rootNode\n  #2 child (color=red)\n    #3 grandchild\n#4 sibling\n");
}

// ===== Edit =====

#[test]
fn test_edit_rename_head() {
    let (_dir, path) = create_temp_file("rootNode\n  child");

    mindnotes_cmd()
        .args(["edit", &path, "--range", "1:2-1:7", "--text", "kid"])
        .assert()
        .success()
        .stdout("node.edit   id=2 parent=1 \"kid\"\n");
}

#[test]
fn test_edit_inserts_lines_with_escapes() {
    let (_dir, path) = create_temp_file("rootNode");

    let value = json_output(mindnotes_cmd().args([
        "edit",
        &path,
        "--range",
        "0:8",
        "--text",
        r"\n  first\n  second",
        "--format",
        "json",
    ]));
    assert_eq!(
        value["events"],
        serde_json::json!([
            {"name": "node.add", "id": 2, "parentId": 1, "text": "first"},
            {"name": "node.add", "id": 3, "parentId": 1, "text": "second"},
        ])
    );
}

#[test]
fn test_edit_does_not_touch_file() {
    let (_dir, path) = create_temp_file("rootNode\n");

    mindnotes_cmd()
        .args(["edit", &path, "-r", "0:0-0:8", "-t", "other"])
        .assert()
        .success();
    assert_eq!(fs::read_to_string(&path).unwrap(), "rootNode\n");
}

#[test]
fn test_edit_out_of_range() {
    let (_dir, path) = create_temp_file("rootNode");

    mindnotes_cmd()
        .args(["edit", &path, "--range", "5:0", "--text", "x"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Parser fault"));
}

#[test]
fn test_edit_invalid_range_argument() {
    let (_dir, path) = create_temp_file("rootNode");

    mindnotes_cmd()
        .args(["edit", &path, "--range", "one:two", "--text", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid range"));
}

// ===== File handling =====

#[test]
fn test_missing_file() {
    mindnotes_cmd()
        .args(["parse", "/nonexistent/notes.mn"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("I/O error"));
}

#[test]
fn test_file_size_limit() {
    let (_dir, path) = create_temp_file(OUTLINE);

    mindnotes_cmd()
        .env("MINDNOTES_MAX_FILE_SIZE", "8")
        .args(["tree", &path])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("too large"));
}

// ===== Logging =====

#[test]
fn test_verbose_logs_to_stderr() {
    let (_dir, path) = create_temp_file("rootNode");

    mindnotes_cmd()
        .env_remove("RUST_LOG")
        .args(["-v", "parse", &path, "--format", "json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("parsed file"));
}

#[test]
fn test_quiet_by_default() {
    let (_dir, path) = create_temp_file("rootNode");

    mindnotes_cmd()
        .env_remove("RUST_LOG")
        .args(["parse", &path])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}
