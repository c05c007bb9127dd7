//! minishell - a small interactive command interpreter
//!
//! # Overview
//!
//! Each input line is split into words and the operators `|`, `<` and `>`,
//! then run as child processes:
//!
//! ```text
//! echo hi                 # one child, waited for
//! ls | grep src           # two children joined by one pipe
//! sort < in.txt > out     # stdin/stdout rebound to files
//! sleep 5 &               # background job, announced as [<pid>] sleep 5
//! jobs                    # list background jobs
//! exit                    # end the session
//! ```
//!
//! There is no quoting, no variable or glob expansion, and at most one pipe
//! per line.
//!
//! # Layout
//!
//! - [`lexer`] splits a line into tokens
//! - [`dispatch`] decides what the tokens mean
//! - [`executor`] forks and wires the processes
//! - [`redirect`] and [`launcher`] run inside each child
//! - [`jobs`] tracks background processes and reaps finished ones
//! - [`shell`] ties it together as one session
//!
//! # Example
//!
//! ```rust,no_run
//! use minishell::{Flow, Shell};
//!
//! let mut shell = Shell::new();
//! shell.execute_line("echo hi > greeting.txt");
//! assert_eq!(shell.execute_line("exit"), Flow::Exit);
//! ```

pub mod config;
pub mod dispatch;
pub mod executor;
pub mod fd;
pub mod jobs;
pub mod launcher;
pub mod lexer;
pub mod redirect;
pub mod shell;
pub mod signals;

use std::fmt::Display;

// Re-export commonly used items
pub use config::Config;
pub use dispatch::{Dispatch, SyntaxError};
pub use executor::{ExecError, Launch};
pub use jobs::{JobTable, Reaped};
pub use lexer::lex;
pub use shell::{Flow, Shell, ShellError};

/// Tag at the start of every diagnostic line
pub const NAME: &str = "minishell";

/// Print one diagnostic line to stderr
pub fn report(err: &dyn Display) {
    eprintln!("{}: {}", NAME, err);
}
