//! Stress tests for output streaming
//!
//! A burst of output must come through with no line dropped, merged,
//! duplicated or reordered, and repeated launches must not leak readers.

#![cfg(unix)]

use std::time::{Duration, Instant};

use pimenu::{ExecutionController, ExecutionPhase};

const DEADLINE: Duration = Duration::from_secs(30);

async fn run_to_completion(command: &str) -> ExecutionController {
    let mut exec = ExecutionController::launch(command);
    assert_eq!(exec.phase(), ExecutionPhase::Running, "failed to start {command}");

    let started = Instant::now();
    while exec.phase() == ExecutionPhase::Running || !exec.output_closed() {
        assert!(started.elapsed() < DEADLINE, "command did not finish");
        exec.tick_timeout(Duration::from_millis(20)).await;
    }
    exec
}

#[tokio::test]
async fn burst_of_output_is_delivered_exactly_once_in_order() {
    const LINES: usize = 20_000;
    let exec = run_to_completion(&format!("seq 1 {LINES}")).await;

    let lines = exec.lines();
    assert_eq!(lines.len(), LINES);
    for (i, line) in lines.iter().enumerate() {
        assert_eq!(line, &format!("{}\n", i + 1));
    }
}

#[tokio::test]
async fn long_lines_are_not_split() {
    let exec = run_to_completion("sh -c \"head -c 100000 /dev/zero | tr '\\0' x; echo\"").await;

    assert_eq!(exec.lines().len(), 1);
    assert_eq!(exec.lines()[0].len(), 100_001);
}

#[tokio::test]
async fn repeated_launches_release_their_resources() {
    for i in 0..25 {
        let mut exec = run_to_completion(&format!("echo run-{i}")).await;
        assert_eq!(exec.output_text(), format!("run-{i}\n"));
        exec.dismiss().await;
        assert_eq!(exec.phase(), ExecutionPhase::Dismissed);
        assert!(exec.output_closed());
    }
}
