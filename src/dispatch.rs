//! Command dispatcher
//!
//! Decides what one line's tokens mean, in this order:
//! 1. no tokens: nothing to do
//! 2. a trailing `&` is stripped and marks the command as background
//! 3. `exit` and `jobs` as the first token are built-ins
//! 4. the first `|` splits the tokens into a left and a right command
//! 5. anything else is a single command
//!
//! Only the first `|` is a split point. A later `|` stays in the right-hand
//! command as an ordinary argument.

use crate::lexer::{BACKGROUND, PIPE};
use thiserror::Error;

pub const EXIT: &str = "exit";
pub const JOBS: &str = "jobs";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("syntax error near unexpected token `|'")]
    EmptyPipeSide,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Blank line, or a lone `&`
    Empty,
    /// `exit` built-in; arguments are ignored
    Exit,
    /// `jobs` built-in
    Jobs,
    Single {
        tokens: Vec<String>,
        background: bool,
    },
    Pipeline {
        left: Vec<String>,
        right: Vec<String>,
        background: bool,
    },
}

/// Classify a line's tokens
pub fn parse(mut tokens: Vec<String>) -> Result<Dispatch, SyntaxError> {
    if tokens.is_empty() {
        return Ok(Dispatch::Empty);
    }

    let background = tokens.last().map(String::as_str) == Some(BACKGROUND);
    if background {
        tokens.pop();
    }

    match tokens.first().map(String::as_str) {
        None => return Ok(Dispatch::Empty),
        Some(EXIT) => return Ok(Dispatch::Exit),
        Some(JOBS) => return Ok(Dispatch::Jobs),
        Some(_) => {}
    }

    let Some(split) = tokens.iter().position(|token| token == PIPE) else {
        return Ok(Dispatch::Single { tokens, background });
    };

    let right = tokens.split_off(split + 1);
    tokens.truncate(split);
    let left = tokens;

    if left.is_empty() || right.is_empty() {
        return Err(SyntaxError::EmptyPipeSide);
    }

    Ok(Dispatch::Pipeline { left, right, background })
}
