use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

const ONE_MOVE: &str = "4 4\n1 2 3 4\n5 6 7 8\n9 10 11 12\n13 14 0 15\n";
const THREE_MOVES: &str = "4 4\n1 2 3 4\n5 6 7 8\n9 10 11 12\n0 13 14 15\n";
const TRANSPOSED: &str = "4 4\n1 2 3 4\n5 6 7 8\n9 10 11 12\n13 15 14 0\n";

fn solver() -> Command {
    let mut cmd = Command::cargo_bin("puzzle_solver").unwrap();
    cmd.env("RUST_LOG", "warn");
    cmd
}

fn puzzle_file(name: &str, contents: &str) -> PathBuf {
    let path = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_astar_from_stdin() {
    solver()
        .args(["-a", "manhattan"])
        .write_stdin(ONE_MOVE)
        .assert()
        .success()
        .stdout("1\nR\n");
}

#[test]
fn test_every_strategy_flag() {
    for flags in [
        ["-b", "LRUD"],
        ["-d", "DRLU"],
        ["-i", "R"],
        ["-f", "linear_conflict"],
        ["-a", "misplaced"],
        ["-s", "manhattan"],
    ] {
        solver()
            .args(flags)
            .args(["--seed", "3"])
            .write_stdin(THREE_MOVES)
            .assert()
            .success()
            .stdout("3\nRRR\n");
    }
}

#[test]
fn test_reads_puzzle_file() {
    let path = puzzle_file("cli_three_moves.txt", THREE_MOVES);
    solver()
        .args(["--bfs", "LRUD"])
        .arg(&path)
        .assert()
        .success()
        .stdout("3\nRRR\n");
}

#[test]
fn test_goal_prints_empty_path() {
    solver()
        .args(["--sma", "0", "--sma-policy", "backup"])
        .write_stdin("3 3\n1 2 3\n4 5 6\n7 8 0\n")
        .assert()
        .success()
        .stdout("0\n\n");
}

#[test]
fn test_unsolvable_prints_minus_two() {
    solver()
        .args(["--astar", "manhattan"])
        .write_stdin(TRANSPOSED)
        .assert()
        .success()
        .stdout("-2\n\n");
}

#[test]
fn test_node_limit_prints_minus_one() {
    solver()
        .args(["--bfs", "LRUD", "--max-nodes", "2"])
        .write_stdin(THREE_MOVES)
        .assert()
        .success()
        .stdout("-1\n\n");
}

#[test]
fn test_depth_limit_prints_minus_one() {
    solver()
        .args(["--idfs", "LRUD", "--max-depth", "2"])
        .write_stdin(THREE_MOVES)
        .assert()
        .success()
        .stdout("-1\n\n");
}

#[test]
fn test_stats_go_to_stderr() {
    solver()
        .args(["-a", "lc", "--stats"])
        .write_stdin(ONE_MOVE)
        .assert()
        .success()
        .stdout("1\nR\n")
        .stderr(predicate::str::contains("nodes:").and(predicate::str::contains("max frontier:")));
}

#[test]
fn test_unknown_heuristic_is_rejected() {
    solver()
        .args(["-a", "euclid"])
        .write_stdin(ONE_MOVE)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown heuristic"));
}

#[test]
fn test_invalid_order_is_rejected() {
    solver()
        .args(["-b", "UUDD"])
        .write_stdin(ONE_MOVE)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid search order"));
}

#[test]
fn test_strategy_is_required_and_exclusive() {
    solver().write_stdin(ONE_MOVE).assert().failure();
    solver()
        .args(["-a", "manhattan", "-b", "LRUD"])
        .write_stdin(ONE_MOVE)
        .assert()
        .failure();
}

#[test]
fn test_malformed_puzzle_is_rejected() {
    solver()
        .args(["-a", "manhattan"])
        .write_stdin("4 4\n1 2 3\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid puzzle").and(predicate::str::contains("expected 16 numbers")));
    solver()
        .args(["-a", "manhattan"])
        .write_stdin("2 2\n1 1 2 0\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("appears more than once"));
}

#[test]
fn test_missing_file_is_reported() {
    solver()
        .args(["-a", "manhattan", "no/such/puzzle.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read puzzle file"));
}

#[test]
fn test_viewer_steps_to_goal() {
    let path = puzzle_file("viewer_three_moves.txt", THREE_MOVES);
    Command::cargo_bin("path_viewer")
        .unwrap()
        .arg(&path)
        .arg("RRR")
        .write_stdin("\nJ3\nJ0\nJ9\nQ\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Step 1/3 (R)")
                .and(predicate::str::contains("Goal reached."))
                .and(predicate::str::contains("Step 0/3 (start)"))
                .and(predicate::str::contains("Step out of range")),
        );
}

#[test]
fn test_viewer_rejects_illegal_move() {
    let path = puzzle_file("viewer_illegal.txt", THREE_MOVES);
    Command::cargo_bin("path_viewer")
        .unwrap()
        .arg(&path)
        .arg("RDR")
        .assert()
        .failure()
        .stderr(predicate::str::contains("move 2 (D)"));
}
