//! Shell session - the central coordinator for minishell
//!
//! The Shell owns the session state (the background job table) and runs one
//! line at a time:
//! 1. Tokenize (lexer)
//! 2. Classify: built-in, single command or pipeline (dispatch)
//! 3. Fork and wire the processes (executor)
//!
//! Every error is reported on stderr and the session carries on; only the
//! `exit` built-in ends it.

use crate::dispatch::{self, Dispatch, SyntaxError};
use crate::executor::{self, ExecError};
use crate::jobs::{JobTable, Reaped};
use crate::lexer::lex;
use std::io::{self, Write};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShellError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Exec(#[from] ExecError),
    #[error("output: {0}")]
    Io(#[from] io::Error),
}

/// Whether the session goes on after a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// One interactive session. User-facing lines (job announcements, `[Done]`
/// notices, the `jobs` listing) go to `out`; diagnostics go to stderr.
pub struct Shell<W: Write = io::Stdout> {
    jobs: JobTable,
    out: W,
    trace_mode: bool,
}

impl Shell<io::Stdout> {
    pub fn new() -> Self {
        Shell::with_output(io::stdout())
    }
}

impl Default for Shell<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Shell<W> {
    pub fn with_output(out: W) -> Self {
        Shell {
            jobs: JobTable::new(),
            out,
            trace_mode: false,
        }
    }

    /// Echo each command to stderr before it runs
    pub fn set_trace_mode(&mut self, enabled: bool) {
        self.trace_mode = enabled;
    }

    pub fn jobs(&self) -> &JobTable {
        &self.jobs
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Tokenize and run one line, reporting any error
    pub fn execute_line(&mut self, line: &str) -> Flow {
        self.execute_tokens(lex(line))
    }

    /// Run one line's tokens, reporting any error
    pub fn execute_tokens(&mut self, tokens: Vec<String>) -> Flow {
        match self.try_execute(tokens) {
            Ok(flow) => flow,
            Err(e) => {
                crate::report(&e);
                Flow::Continue
            }
        }
    }

    fn try_execute(&mut self, tokens: Vec<String>) -> Result<Flow, ShellError> {
        match dispatch::parse(tokens)? {
            Dispatch::Empty => {}
            Dispatch::Exit => return Ok(Flow::Exit),
            Dispatch::Jobs => self.builtin_jobs()?,
            Dispatch::Single { tokens, background } => {
                if self.trace_mode {
                    eprintln!("+ {}{}", tokens.join(" "), background_suffix(background));
                }
                executor::spawn_single(tokens, background, &mut self.jobs, &mut self.out)?;
            }
            Dispatch::Pipeline { left, right, background } => {
                if self.trace_mode {
                    eprintln!(
                        "+ {} | {}{}",
                        left.join(" "),
                        right.join(" "),
                        background_suffix(background)
                    );
                }
                executor::spawn_pipeline(left, right, background, &mut self.jobs, &mut self.out)?;
            }
        }
        Ok(Flow::Continue)
    }

    /// Collect finished background jobs and announce them.
    ///
    /// Called before every prompt and by `jobs`.
    pub fn reap_jobs(&mut self) {
        if let Err(e) = self.try_reap_jobs() {
            crate::report(&ShellError::Io(e));
        }
    }

    /// Reap, stopping at the first failed write. The table is already
    /// updated by then, so unwritten `[Done]` lines are lost.
    fn try_reap_jobs(&mut self) -> io::Result<()> {
        for reaped in self.jobs.reap() {
            match reaped {
                Reaped::Done { .. } => writeln!(self.out, "{}", reaped)?,
                Reaped::Untracked(_) => {
                    if self.trace_mode {
                        eprintln!("+ {}", reaped);
                    }
                }
            }
        }
        self.out.flush()
    }

    fn builtin_jobs(&mut self) -> io::Result<()> {
        self.try_reap_jobs()?;
        self.jobs.write_listing(&mut self.out)?;
        self.out.flush()
    }
}

fn background_suffix(background: bool) -> &'static str {
    if background {
        " &"
    } else {
        ""
    }
}
