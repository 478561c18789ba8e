//! Golden tests for patternbook
//!
//! These tests compare command output with expected files and fixed texts,
//! so changes to the comment stripper or the exercise transcripts show up
//! as test failures.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

/// Get the path to the fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Create a command for running the patternbook binary
fn patternbook_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("patternbook"));
    cmd.env_remove("RUST_LOG").arg("--no-color");
    cmd
}

fn run_text(name: &str) -> String {
    let temp = tempdir().unwrap();
    let assert = patternbook_cmd()
        .current_dir(temp.path())
        .arg("--log-file")
        .arg(temp.path().join("Bridge.log"))
        .args(["run", name])
        .assert()
        .success();
    String::from_utf8_lossy(&assert.get_output().stdout).to_string()
}

#[test]
fn golden_strip_file() {
    let expected = fs::read_to_string(fixtures_dir().join("comments.stripped.c")).unwrap();

    patternbook_cmd()
        .arg("strip")
        .arg(fixtures_dir().join("comments.c"))
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn golden_strip_stdin() {
    let input = fs::read_to_string(fixtures_dir().join("comments.c")).unwrap();
    let expected = fs::read_to_string(fixtures_dir().join("comments.stripped.c")).unwrap();

    patternbook_cmd()
        .args(["strip", "-"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn golden_strip_keeps_literals() {
    patternbook_cmd()
        .arg("strip")
        .write_stdin("char c = '\\''; /* gone */ s = \"a // b\"; // tail\nx = a/b;")
        .assert()
        .success()
        .stdout("char c = '\\'';  s = \"a // b\"; \nx = a/b;");
}

#[test]
fn golden_strip_missing_file_fails() {
    patternbook_cmd()
        .args(["strip", "does-not-exist.c"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn golden_state_exercise() {
    let output = run_text("state");
    let expected_tail = "  Filtered text:\n\
\x20    1) \n\
\x20    2) \n\
\x20    3) \n\
\x20    4) \n\
\x20    5) void State_Exercise() \n\
\x20    6) {\n\
\x20    7)     char character = '\\\"';\n\
\x20    8)     std::cout << std::endl;\n\
\x20    9)     std::cout << \"\\\"State\\\" /*Exercise*/\" << std::endl;\n\
\x20   10) \n\
\x20   11)     StateContext_Class filterContext;\n\
\x20   12) \n\
\x20   13)     std::cout << \"\\t\\tDone. //(No, really)//\" << std::endl;\n\
\x20   14) }\n\
\x20 Done.\n";
    assert!(output.starts_with("\nState Exercise\n  Text to filter:\n"));
    assert!(output.ends_with(expected_tail), "unexpected output:\n{}", output);
}

#[test]
fn golden_memento_exercise() {
    let output = run_text("memento");
    let expected = "\nMemento Exercise\n\
\x20 Starting text: \"This is a line of text on which to experiment.\"\n\
\x20   operation Replace 'text' with 'painting' : \"This is a line of painting on which to experiment.\"\n\
\x20   operation Replace 'on' with 'off'        : \"This is a line of painting off which to experiment.\"\n\
\x20   operation Reverse                        : \".tnemirepxe ot hcihw ffo gnitniap fo enil a si sihT\"\n\
\x20   operation Replace 'i' with '!'           : \".tnem!repxe ot hc!hw ffo gn!tn!ap fo en!l a s! s!hT\"\n\
\x20 Now perform undo until back to original\n\
\x20   undoing operation Replace 'i' with '!'           : \".tnemirepxe ot hcihw ffo gnitniap fo enil a si sihT\"\n\
\x20   undoing operation Reverse                        : \"This is a line of painting off which to experiment.\"\n\
\x20   undoing operation Replace 'on' with 'off'        : \"This is a line of painting on which to experiment.\"\n\
\x20   undoing operation Replace 'text' with 'painting' : \"This is a line of text on which to experiment.\"\n\
\x20 Final text   : \"This is a line of text on which to experiment.\"\n\
\x20 Done.\n";
    assert_eq!(output, expected);
}

#[test]
fn golden_observer_exercise_tail() {
    let output = run_text("observer");
    assert!(output.ends_with(
        "  Update 9 on number producer.  Results from observers:\n\
\x20   Decimal    : 10\n\
\x20   Hexadecimal: 0X0000000A\n\
\x20   Binary     : 0b00000000000000000000000000001010\n\
\x20 Done.\n"
    ));
}
