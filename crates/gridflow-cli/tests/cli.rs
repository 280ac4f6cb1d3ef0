use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

const THREE_NODE_DIMACS: &str = "\
c three-node example
p max 3 3
n 1 s
n 3 t
a 1 2 5
a 2 3 3
a 1 3 2
";

const THREE_NODE_CSV: &str = "\
from,to,capacity
A,B,5.0
B,C,3.0
A,C,2.0
";

fn write_fixture(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn help_lists_subcommands() {
    let mut cmd = Command::cargo_bin("gridflow").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("solve"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("model"));
}

#[test]
fn solve_reports_max_flow_for_dimacs() {
    let dir = tempdir().unwrap();
    let input = write_fixture(&dir, "net.max", THREE_NODE_DIMACS);

    let mut cmd = Command::cargo_bin("gridflow").unwrap();
    cmd.args(["solve", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Maximum flow: 5.0000"))
        .stdout(predicate::str::contains("FROM"))
        .stdout(predicate::str::contains("clarabel"));
}

#[test]
fn solve_writes_csv_and_json_outputs() {
    let dir = tempdir().unwrap();
    let input = write_fixture(&dir, "net.max", THREE_NODE_DIMACS);
    let csv_out = dir.path().join("flows.csv");
    let json_out = dir.path().join("flows.json");

    let mut cmd = Command::cargo_bin("gridflow").unwrap();
    cmd.args([
        "solve",
        input.to_str().unwrap(),
        "-o",
        csv_out.to_str().unwrap(),
        "--json",
        json_out.to_str().unwrap(),
    ])
    .assert()
    .success();

    let csv = fs::read_to_string(&csv_out).unwrap();
    assert!(csv.starts_with("from,to,capacity,flow"));
    assert_eq!(csv.lines().count(), 4);

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_out).unwrap()).unwrap();
    assert!((json["max_flow"].as_f64().unwrap() - 5.0).abs() < 1e-4);
}

#[test]
fn solve_accepts_csv_arc_list_with_terminals() {
    let dir = tempdir().unwrap();
    let input = write_fixture(&dir, "net.csv", THREE_NODE_CSV);

    let mut cmd = Command::cargo_bin("gridflow").unwrap();
    cmd.args([
        "solve",
        input.to_str().unwrap(),
        "--source",
        "A",
        "--sink",
        "C",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("Maximum flow: 5.0000"));
}

#[test]
fn solve_rejects_csv_without_terminals() {
    let dir = tempdir().unwrap();
    let input = write_fixture(&dir, "net.csv", THREE_NODE_CSV);

    let mut cmd = Command::cargo_bin("gridflow").unwrap();
    cmd.args(["solve", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no terminal markers"));
}

#[test]
fn solve_rejects_unknown_backend() {
    let dir = tempdir().unwrap();
    let input = write_fixture(&dir, "net.max", THREE_NODE_DIMACS);

    let mut cmd = Command::cargo_bin("gridflow").unwrap();
    cmd.args(["solve", input.to_str().unwrap(), "--solver", "glpk"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown lp backend"));
}

#[test]
fn check_prints_stats_and_writes_dot() {
    let dir = tempdir().unwrap();
    let input = write_fixture(&dir, "net.max", THREE_NODE_DIMACS);
    let dot_out = dir.path().join("net.dot");

    let mut cmd = Command::cargo_bin("gridflow").unwrap();
    cmd.args([
        "check",
        input.to_str().unwrap(),
        "--dot",
        dot_out.to_str().unwrap(),
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("3 nodes, 3 arcs"))
    .stdout(predicate::str::contains("Sink is reachable"));

    let dot = fs::read_to_string(&dot_out).unwrap();
    assert!(dot.starts_with("digraph flow_network {"));
}

#[test]
fn model_prints_lp_text() {
    let dir = tempdir().unwrap();
    let input = write_fixture(&dir, "net.max", THREE_NODE_DIMACS);

    let mut cmd = Command::cargo_bin("gridflow").unwrap();
    cmd.args(["model", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("maximize"))
        .stdout(predicate::str::contains("cap(1,2): f(1,2) <= 5"))
        .stdout(predicate::str::contains("con(2): f(1,2) - f(2,3) = 0"));
}

#[test]
fn check_fails_on_missing_file() {
    let mut cmd = Command::cargo_bin("gridflow").unwrap();
    cmd.args(["check", "does-not-exist.max"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("loading network"));
}
