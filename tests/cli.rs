use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn parse_jsonl(stdout: &[u8]) -> Vec<Value> {
    let s = String::from_utf8_lossy(stdout);
    s.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str::<Value>(l).expect("valid jsonl line"))
        .collect()
}

/// Command running inside `dir`, with the Bridge log kept there too
fn patternbook(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("patternbook"));
    cmd.current_dir(dir)
        .env_remove("PATTERNBOOK_SEED")
        .env_remove("RUST_LOG")
        .arg("--no-color")
        .arg("--log-file")
        .arg(dir.join("Bridge.log"));
    cmd
}

#[test]
fn list_prints_catalogue_in_order() {
    let temp = tempdir().unwrap();
    let assert = patternbook(temp.path()).arg("list").assert().success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let names: Vec<&str> = stdout.lines().collect();
    assert_eq!(names.len(), 18);
    assert_eq!(names.first(), Some(&"Adapter"));
    assert_eq!(names.last(), Some(&"Visitor"));
    assert!(names.contains(&"HandlerChain"));
}

#[test]
fn run_single_exercise_as_text() {
    let temp = tempdir().unwrap();
    patternbook(temp.path())
        .args(["run", "interpreter"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("\nInterpreter Exercise\n"))
        .stdout(predicate::str::contains("==> \"What do you say to that?\""))
        .stdout(predicate::str::ends_with("  Done.\n"));
}

#[test]
fn run_unknown_exercise_fails() {
    let temp = tempdir().unwrap();
    patternbook(temp.path())
        .args(["run", "Singleton"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown exercise: Singleton"))
        .stderr(predicate::str::contains("Visitor"));
}

#[test]
fn run_without_command_runs_everything() {
    let temp = tempdir().unwrap();
    let assert = patternbook(temp.path())
        .args(["--format", "jsonl"])
        .assert()
        .success();

    let reports = parse_jsonl(&assert.get_output().stdout);
    assert_eq!(reports.len(), 18);
    for report in &reports {
        assert!(report.get("error").is_none(), "failed: {}", report);
        assert!(report["lines"].as_array().is_some_and(|l| !l.is_empty()));
    }
    assert_eq!(reports[0]["exercise"], "Adapter");
    assert_eq!(reports[17]["exercise"], "Visitor");
}

#[test]
fn run_orders_and_dedupes_names() {
    let temp = tempdir().unwrap();
    let assert = patternbook(temp.path())
        .args(["--format", "json", "run", "visitor", "Proxy", "VISITOR"])
        .assert()
        .success();

    let reports: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    let names: Vec<&str> = reports
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["exercise"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Proxy", "Visitor"]);
}

#[test]
fn markdown_output_has_sections() {
    let temp = tempdir().unwrap();
    patternbook(temp.path())
        .args(["--format", "md", "run", "iterator"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Iterator\n\n```\n"))
        .stdout(predicate::str::contains("## Errors").not());
}

#[test]
fn unknown_format_is_rejected() {
    let temp = tempdir().unwrap();
    patternbook(temp.path())
        .args(["--format", "xml", "run", "proxy"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Unknown format: xml"));
}

#[test]
fn bridge_writes_log_file() {
    let temp = tempdir().unwrap();
    let log_file = temp.path().join("logs.txt");

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("patternbook"));
    cmd.current_dir(temp.path())
        .arg("--log-file")
        .arg(&log_file)
        .args(["run", "bridge"])
        .assert()
        .success();

    let content = fs::read_to_string(&log_file).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].ends_with("[TRACE] Starting \"log to file\" example"));
    assert!(lines[1].ends_with("[INFO ] An example of an informational line"));
    assert!(lines[2].ends_with("[ERROR] An example of an error log entry"));
}

#[test]
fn bridge_failure_is_reported_and_exit_is_non_zero() {
    let temp = tempdir().unwrap();
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("patternbook"));
    cmd.current_dir(temp.path())
        .arg("--log-file")
        .arg(temp.path().join("missing").join("Bridge.log"))
        .args(["--format", "jsonl", "run", "bridge", "proxy"]);

    let assert = cmd.assert().failure();
    let reports = parse_jsonl(&assert.get_output().stdout);
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0]["error"]["code"], "IO_ERROR");
    assert!(reports[1].get("error").is_none());
    assert!(String::from_utf8_lossy(&assert.get_output().stderr).contains("1 of 2 exercises failed"));
}

#[test]
fn flyweight_is_repeatable_with_seed() {
    let temp = tempdir().unwrap();
    let run = || {
        patternbook(temp.path())
            .args(["--seed", "7", "--frames", "3", "run", "flyweight"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone()
    };

    let first = run();
    let second = run();
    assert_eq!(first, second);
    assert!(String::from_utf8_lossy(&first).contains("    3/3 iterations"));
}

#[test]
fn flyweight_seed_from_environment() {
    let temp = tempdir().unwrap();
    let with_flag = patternbook(temp.path())
        .args(["--seed", "11", "--frames", "1", "run", "flyweight"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let with_env = patternbook(temp.path())
        .env("PATTERNBOOK_SEED", "11")
        .args(["--frames", "1", "run", "flyweight"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_eq!(with_flag, with_env);
}

#[test]
fn composite_shows_real_directory() {
    let temp = tempdir().unwrap();
    let root = temp.path().join("tree");
    fs::create_dir_all(root.join("sub")).unwrap();
    fs::write(root.join("sub").join("inner.txt"), "12345").unwrap();
    fs::write(root.join("top.txt"), "abc").unwrap();

    patternbook(temp.path())
        .arg("--composite-root")
        .arg(&root)
        .args(["run", "composite"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  Showing directory '"))
        .stdout(predicate::str::contains("inner.txt"))
        .stdout(predicate::str::contains("top.txt"));
}
