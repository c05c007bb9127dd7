//! Integration test for background jobs and the reaper
//!
//! The reaper collects any terminated child of the process, so this binary
//! holds a single test and nothing else forks alongside it.

use minishell::executor::{spawn_pipeline, spawn_single};
use minishell::jobs::FIRST_STAGE_SUFFIX;
use minishell::{lex, JobTable, Launch, Reaped};
use std::thread;
use std::time::{Duration, Instant};

fn tokens(line: &str) -> Vec<String> {
    lex(line)
}

/// Reap until the table is empty or the deadline passes
fn reap_all(jobs: &mut JobTable) -> Vec<Reaped> {
    let deadline = Instant::now() + Duration::from_secs(10);
    let mut reaped = Vec::new();
    while !jobs.is_empty() && Instant::now() < deadline {
        reaped.extend(jobs.reap());
        thread::sleep(Duration::from_millis(20));
    }
    reaped
}

#[test]
fn test_background_jobs_tracked_and_reaped() {
    let mut jobs = JobTable::new();
    let mut out = Vec::new();

    // Single background command
    let launch = spawn_single(tokens("sleep 0.2"), true, &mut jobs, &mut out).unwrap();
    let Launch::Background(pid) = launch else {
        panic!("expected a background launch, got {:?}", launch);
    };
    assert_eq!(jobs.get(pid), Some("sleep 0.2 "));
    assert_eq!(
        String::from_utf8(out.clone()).unwrap(),
        format!("[{}] sleep 0.2 \n", pid)
    );

    // Still running: nothing to collect yet
    assert!(jobs.reap().is_empty());
    assert_eq!(jobs.len(), 1);

    let reaped = reap_all(&mut jobs);
    assert_eq!(
        reaped,
        vec![Reaped::Done { pid, command: "sleep 0.2 ".into() }]
    );

    // Background pipeline: both stages tracked, only the second announced
    out.clear();
    let launch = spawn_pipeline(
        tokens("sleep 0.2"),
        tokens("cat"),
        true,
        &mut jobs,
        &mut out,
    )
    .unwrap();
    let Launch::Background(second) = launch else {
        panic!("expected a background launch, got {:?}", launch);
    };
    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs.get(second), Some("sleep 0.2 | cat "));
    let first_stage = format!("sleep 0.2 | cat {}", FIRST_STAGE_SUFFIX);
    assert!(jobs.iter().any(|(_, command)| command == first_stage));
    assert_eq!(
        String::from_utf8(out.clone()).unwrap(),
        format!("[{}] sleep 0.2 | cat \n", second)
    );

    let reaped = reap_all(&mut jobs);
    assert_eq!(reaped.len(), 2);
    assert!(reaped
        .iter()
        .all(|r| matches!(r, Reaped::Done { .. })));
    assert!(jobs.is_empty());

    // Foreground commands are waited for and never enter the table
    let launch = spawn_single(tokens("true"), false, &mut jobs, &mut out).unwrap();
    assert_eq!(launch, Launch::Completed);
    assert!(jobs.is_empty());
    assert!(jobs.reap().is_empty());
}
