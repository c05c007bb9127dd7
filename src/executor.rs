//! Executor: forks and wires the processes for one command
//!
//! A single command gets one child. A pipeline gets one pipe and two
//! children, the left writing into it and the right reading from it. Each
//! child applies its pipe binding first and its own redirections second, so
//! an explicit `<` or `>` wins over the pipe for that stream.
//!
//! In the parent a foreground command is waited for; a background command
//! goes into the job table and is announced as `[<pid>] <command>`.

use crate::fd::{self, Pipe, STDIN, STDOUT};
use crate::jobs::{self, JobTable, FIRST_STAGE_SUFFIX};
use crate::launcher::{exit_child, run_child, REDIRECT_FAILURE};
use nix::errno::Errno;
use nix::sys::wait::waitpid;
use nix::unistd::{fork, ForkResult, Pid};
use std::io::{self, Write};
use std::os::fd::{OwnedFd, RawFd};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecError {
    #[error("pipe: {}", .0.desc())]
    Pipe(Errno),
    #[error("fork: {}", .0.desc())]
    Fork(Errno),
    #[error("output: {0}")]
    Output(#[from] io::Error),
}

/// What the parent holds once a command has been started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Launch {
    /// Foreground command; every child has terminated
    Completed,
    /// Background command; the pid announced as the job
    Background(Pid),
}

fn fork_process() -> Result<ForkResult, ExecError> {
    // SAFETY: the shell runs on a single thread, and the child only rewires
    // descriptors before it execs or exits
    unsafe { fork() }.map_err(ExecError::Fork)
}

/// Block until `pid` has terminated
pub fn wait_for(pid: Pid) {
    loop {
        match waitpid(pid, None) {
            Err(Errno::EINTR) => continue,
            // Terminated, or ECHILD when it was already collected
            _ => break,
        }
    }
}

/// Child side of a pipeline stage: bind the pipe end, then run the command
fn run_piped_child(end: OwnedFd, target: RawFd, tokens: Vec<String>, background: bool) -> ! {
    if let Err(errno) = fd::bind(end, target) {
        crate::report(&ExecError::Pipe(errno));
        exit_child(REDIRECT_FAILURE)
    }
    run_child(tokens, background)
}

/// Run one command in a child process.
///
/// `tokens` may still contain redirection operators; the child strips them.
pub fn spawn_single(
    tokens: Vec<String>,
    background: bool,
    jobs: &mut JobTable,
    out: &mut impl Write,
) -> Result<Launch, ExecError> {
    out.flush()?;

    let pid = match fork_process()? {
        ForkResult::Child => run_child(tokens, background),
        ForkResult::Parent { child } => child,
    };

    if !background {
        wait_for(pid);
        return Ok(Launch::Completed);
    }

    let command = jobs::describe(&tokens);
    jobs.insert(pid, command.clone());
    writeln!(out, "[{}] {}", pid, command)?;
    out.flush()?;
    Ok(Launch::Background(pid))
}

/// Run `left | right` as two children joined by a pipe.
///
/// Both sides must be non-empty.
pub fn spawn_pipeline(
    left: Vec<String>,
    right: Vec<String>,
    background: bool,
    jobs: &mut JobTable,
    out: &mut impl Write,
) -> Result<Launch, ExecError> {
    let Pipe { reader, writer } = Pipe::new().map_err(ExecError::Pipe)?;
    out.flush()?;

    let first = match fork_process()? {
        ForkResult::Child => {
            drop(reader);
            run_piped_child(writer, STDOUT, left, background)
        }
        ForkResult::Parent { child } => child,
    };

    let command = jobs::describe_pipeline(&left, &right);
    let second = match fork_process() {
        Ok(ForkResult::Child) => {
            drop(writer);
            run_piped_child(reader, STDIN, right, background)
        }
        Ok(ForkResult::Parent { child }) => child,
        Err(e) => {
            // With the read end closed the first stage gets EPIPE once it writes
            drop(reader);
            drop(writer);
            if background {
                jobs.insert(first, format!("{}{}", command, FIRST_STAGE_SUFFIX));
            } else {
                wait_for(first);
            }
            return Err(e);
        }
    };

    // The reader only sees end-of-stream once no copy of the write end is open
    drop(reader);
    drop(writer);

    if !background {
        wait_for(first);
        wait_for(second);
        return Ok(Launch::Completed);
    }

    jobs.insert(first, format!("{}{}", command, FIRST_STAGE_SUFFIX));
    jobs.insert(second, command.clone());
    writeln!(out, "[{}] {}", second, command)?;
    out.flush()?;
    Ok(Launch::Background(second))
}
