//! Background job table and reaper
//!
//! The table maps the pid of every background process to the text shown for
//! it. Entries are added when a command is launched with `&` and only leave
//! through the reaper, which collects every terminated child without
//! blocking. Children that were never tracked (foreground commands whose wait
//! was cut short) are collected too, so no zombies pile up.

use nix::errno::Errno;
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::Pid;
use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Write};

/// Appended to the display text of a background pipeline's first stage
pub const FIRST_STAGE_SUFFIX: &str = "(pipe part 1)";

/// Display text for a background command: each token followed by one space
pub fn describe(tokens: &[String]) -> String {
    tokens.iter().map(|token| format!("{} ", token)).collect()
}

/// Display text for a background pipeline, `left | right`
pub fn describe_pipeline(left: &[String], right: &[String]) -> String {
    format!("{}| {}", describe(left), describe(right))
}

/// A child collected by the reaper
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaped {
    /// A tracked background job finished and left the table
    Done { pid: Pid, command: String },
    /// A terminated child the table never knew about
    Untracked(Pid),
}

impl fmt::Display for Reaped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reaped::Done { command, .. } => write!(f, "\n[Done] {}", command),
            Reaped::Untracked(pid) => write!(f, "[{}] reaped", pid),
        }
    }
}

/// Background jobs, keyed by raw pid
#[derive(Debug, Default)]
pub struct JobTable {
    jobs: BTreeMap<libc::pid_t, String>,
}

impl JobTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a background process
    pub fn insert(&mut self, pid: Pid, command: impl Into<String>) {
        self.jobs.insert(pid.as_raw(), command.into());
    }

    pub fn get(&self, pid: Pid) -> Option<&str> {
        self.jobs.get(&pid.as_raw()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Tracked jobs in ascending pid order
    pub fn iter(&self) -> impl Iterator<Item = (Pid, &str)> {
        self.jobs
            .iter()
            .map(|(pid, command)| (Pid::from_raw(*pid), command.as_str()))
    }

    /// Record that `pid` has terminated, dropping it from the table
    pub fn complete(&mut self, pid: Pid) -> Reaped {
        match self.jobs.remove(&pid.as_raw()) {
            Some(command) => Reaped::Done { pid, command },
            None => Reaped::Untracked(pid),
        }
    }

    /// Collect every child that has already terminated. Never blocks.
    pub fn reap(&mut self) -> Vec<Reaped> {
        let mut reaped = Vec::new();
        loop {
            match waitpid(None, Some(WaitPidFlag::WNOHANG)) {
                Ok(WaitStatus::Exited(pid, _)) | Ok(WaitStatus::Signaled(pid, _, _)) => {
                    reaped.push(self.complete(pid));
                }
                Err(Errno::EINTR) => continue,
                // StillAlive, or ECHILD once there are no children at all
                _ => break,
            }
        }
        reaped
    }

    /// Write the `jobs` listing
    pub fn write_listing(&self, out: &mut impl Write) -> io::Result<()> {
        if self.is_empty() {
            return writeln!(out, "No background jobs.");
        }
        for (pid, command) in self.iter() {
            writeln!(out, "[{}] {}", pid, command)?;
        }
        Ok(())
    }
}
