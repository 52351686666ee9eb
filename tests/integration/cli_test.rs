use std::path::PathBuf;
use std::process::{Command, Output};

fn get_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_netopt"))
}

fn run_netopt(args: &[&str]) -> Output {
    Command::new(get_binary_path())
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to execute netopt")
}

/// Stdout without the lines that carry wall-clock timings
fn timing_free(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter(|line| {
            !line.starts_with("Found after")
                && !line.starts_with("Time:")
                && !line.starts_with("Throughput:")
        })
        .map(str::to_string)
        .collect()
}

#[test]
fn test_search_with_restart_limit() {
    let output = run_netopt(&["6", "3", "0", "E12", "--target", "4.7", "--max-restarts", "20"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !output.status.success() {
        panic!(
            "Command failed with status: {:?}\nstderr: {}\nstdout: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr),
            stdout
        );
    }

    assert!(
        stdout.lines().next().unwrap().starts_with(" Command: "),
        "Should echo the command line first"
    );
    assert!(stdout.contains(" 6 3 0 E12"), "Should echo the arguments");
    assert!(stdout.contains("Found after"), "Should report a best network");
    assert!(stdout.contains("  Network: "));
    assert!(stdout.contains("  Cost: "));
    assert!(stdout.contains("Search stopped: restart limit reached"));
    assert!(stdout.contains("Restarts: 20"));
}

#[test]
fn test_int_series_lowercase() {
    let output = run_netopt(&["3", "3", "0", "int", "--max-restarts", "5"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Found after"));
}

#[test]
fn test_same_seed_same_output() {
    let args = ["8", "2", "0", "INT", "--target", "17/3", "--seed", "7", "--max-restarts", "25"];
    let first = run_netopt(&args);
    let second = run_netopt(&args);
    assert!(first.status.success());
    assert!(second.status.success());
    assert_eq!(
        timing_free(&String::from_utf8_lossy(&first.stdout)),
        timing_free(&String::from_utf8_lossy(&second.stdout))
    );
}

#[test]
fn test_zero_arity_fails() {
    let output = run_netopt(&["4", "0", "0", "INT", "--max-restarts", "1"]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("error: invalid problem"));
}

#[test]
fn test_unknown_series_rejected_by_parser() {
    let output = run_netopt(&["4", "2", "0", "E24", "--max-restarts", "1"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("E24"), "Should name the bad series: {}", stderr);
}

#[test]
fn test_bad_target_rejected_by_parser() {
    let output = run_netopt(&["4", "2", "0", "INT", "--target", "abc", "--max-restarts", "1"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_oversized_time_limit_fails() {
    let output = run_netopt(&["3", "2", "0", "INT", "--time-limit", "1e300", "--max-restarts", "1"]);
    assert_eq!(
        output.status.code(),
        Some(1),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("error: invalid argument"));
}

#[test]
fn test_negative_time_limit_fails() {
    let output = run_netopt(&["3", "2", "0", "INT", "--time-limit=-1", "--max-restarts", "1"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_missing_arguments_rejected_by_parser() {
    let output = run_netopt(&["4", "2"]);
    assert_eq!(output.status.code(), Some(2));
}
