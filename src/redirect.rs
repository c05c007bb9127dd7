//! Redirection resolver
//!
//! Pulls `< file` and `> file` pairs out of a command's tokens and rebinds
//! standard input/output to the named files. Runs inside a forked child only:
//! the rebinding changes the calling process's streams.

use crate::fd::{self, STDIN, STDOUT};
use crate::lexer::{READ, WRITE};
use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::fs::OpenOptionsExt;
use std::path::PathBuf;
use thiserror::Error;

/// Permission bits for files created by `>`
const CREATE_MODE: u32 = 0o644;

#[derive(Error, Debug)]
pub enum RedirectError {
    #[error("syntax error near unexpected token `newline'")]
    UnexpectedEnd,
    #[error("{}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{}: {source}", .path.display())]
    Bind {
        path: PathBuf,
        #[source]
        source: nix::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `< file`
    Input,
    /// `> file`
    Output,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirection {
    pub direction: Direction,
    pub path: PathBuf,
}

impl Redirection {
    /// Open the target and bind it over stdin or stdout
    pub fn apply(&self) -> Result<(), RedirectError> {
        let (file, target) = match self.direction {
            Direction::Input => (File::open(&self.path), STDIN),
            Direction::Output => (
                OpenOptions::new()
                    .write(true)
                    .create(true)
                    .truncate(true)
                    .mode(CREATE_MODE)
                    .open(&self.path),
                STDOUT,
            ),
        };
        let file = file.map_err(|source| RedirectError::Open {
            path: self.path.clone(),
            source,
        })?;
        fd::bind(file, target).map_err(|source| RedirectError::Bind {
            path: self.path.clone(),
            source,
        })
    }
}

/// Split tokens into program arguments and redirections, left to right.
///
/// Nothing is opened here, so a dangling operator is caught before any file
/// is touched.
pub fn plan(tokens: Vec<String>) -> Result<(Vec<String>, Vec<Redirection>), RedirectError> {
    let mut args = Vec::with_capacity(tokens.len());
    let mut redirections = Vec::new();
    let mut iter = tokens.into_iter();

    while let Some(token) = iter.next() {
        let direction = match token.as_str() {
            READ => Direction::Input,
            WRITE => Direction::Output,
            _ => {
                args.push(token);
                continue;
            }
        };
        let path = iter.next().ok_or(RedirectError::UnexpectedEnd)?;
        redirections.push(Redirection {
            direction,
            path: PathBuf::from(path),
        });
    }

    Ok((args, redirections))
}

/// Apply every redirection in `tokens` and return what is left: the program
/// name and its arguments.
pub fn resolve(tokens: Vec<String>) -> Result<Vec<String>, RedirectError> {
    let (args, redirections) = plan(tokens)?;
    for redirection in &redirections {
        redirection.apply()?;
    }
    Ok(args)
}
