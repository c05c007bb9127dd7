//! Integration tests for how a launched child terminates
//!
//! Each test forks once and waits for that pid only.

use minishell::fd::{self, Pipe, STDOUT};
use minishell::launcher::{exit_child, run_child, NOT_EXECUTABLE, NOT_FOUND, REDIRECT_FAILURE};
use nix::sys::signal::Signal;
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::{fork, ForkResult};
use std::fs;

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Run `tokens` in a forked child and return how it ended
fn status_of(tokens: Vec<String>, background: bool) -> (nix::unistd::Pid, WaitStatus) {
    match unsafe { fork() }.unwrap() {
        ForkResult::Child => run_child(tokens, background),
        ForkResult::Parent { child } => (child, waitpid(child, None).unwrap()),
    }
}

#[test]
fn test_successful_command_exits_zero() {
    let (pid, status) = status_of(words(&["true"]), false);
    assert_eq!(status, WaitStatus::Exited(pid, 0));
}

#[test]
fn test_missing_program_exits_127() {
    let (pid, status) = status_of(words(&["no-such-program-xyz"]), false);
    assert_eq!(status, WaitStatus::Exited(pid, NOT_FOUND));
}

#[test]
fn test_non_executable_file_exits_126() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("data.txt");
    fs::write(&script, "not a program\n").unwrap();

    let path = script.to_str().unwrap();
    let (pid, status) = status_of(words(&[path]), false);
    assert_eq!(status, WaitStatus::Exited(pid, NOT_EXECUTABLE));
}

#[test]
fn test_failed_redirect_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.txt");

    let (pid, status) = status_of(words(&["cat", "<", missing.to_str().unwrap()]), false);
    assert_eq!(status, WaitStatus::Exited(pid, REDIRECT_FAILURE));
}

#[test]
fn test_dangling_redirect_exits_1() {
    let (pid, status) = status_of(words(&["cat", "<"]), false);
    assert_eq!(status, WaitStatus::Exited(pid, REDIRECT_FAILURE));
}

#[test]
fn test_redirect_only_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("made.txt");

    let (pid, status) = status_of(words(&[">", target.to_str().unwrap()]), false);
    assert_eq!(status, WaitStatus::Exited(pid, 0));
    assert!(target.exists());
}

/// Run `yes` with stdout on a pipe nobody reads
fn writer_into_closed_pipe(background: bool) -> (nix::unistd::Pid, WaitStatus) {
    let Pipe { reader, writer } = Pipe::new().unwrap();
    match unsafe { fork() }.unwrap() {
        ForkResult::Child => {
            drop(reader);
            if fd::bind(writer, STDOUT).is_err() {
                exit_child(REDIRECT_FAILURE)
            }
            run_child(words(&["yes"]), background)
        }
        ForkResult::Parent { child } => {
            drop(reader);
            drop(writer);
            (child, waitpid(child, None).unwrap())
        }
    }
}

#[test]
fn test_writer_killed_by_sigpipe() {
    let (pid, status) = writer_into_closed_pipe(false);
    assert_eq!(status, WaitStatus::Signaled(pid, Signal::SIGPIPE, false));
}

#[test]
fn test_background_writer_killed_by_sigpipe() {
    let (pid, status) = writer_into_closed_pipe(true);
    assert_eq!(status, WaitStatus::Signaled(pid, Signal::SIGPIPE, false));
}
