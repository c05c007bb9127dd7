//! Tokenization for minishell
//!
//! A line is split on whitespace and on the single-character operators
//! `|`, `<` and `>`, which always become tokens of their own. There is no
//! quoting. `&` is an ordinary word character here: the dispatcher only
//! treats it as the background marker when it is exactly the last token.

use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::one_of,
    combinator::map,
    sequence::preceded,
    IResult,
};

/// Pipe operator token
pub const PIPE: &str = "|";
/// Input redirection token
pub const READ: &str = "<";
/// Output redirection token
pub const WRITE: &str = ">";
/// Background marker, recognized by the dispatcher
pub const BACKGROUND: &str = "&";

fn is_operator_char(c: char) -> bool {
    matches!(c, '|' | '<' | '>')
}

/// The C locale's `isspace` set. Other Unicode spaces belong to words.
fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

fn is_word_char(c: char) -> bool {
    !is_space(c) && !is_operator_char(c)
}

fn whitespace(input: &str) -> IResult<&str, &str> {
    take_while(is_space)(input)
}

/// Parse one of `|`, `<`, `>`
fn operator(input: &str) -> IResult<&str, String> {
    map(one_of("|<>"), |c: char| c.to_string())(input)
}

/// Parse a run of non-space, non-operator characters
fn word(input: &str) -> IResult<&str, String> {
    map(take_while1(is_word_char), |s: &str| s.to_string())(input)
}

fn token(input: &str) -> IResult<&str, String> {
    preceded(whitespace, alt((operator, word)))(input)
}

/// Tokenize a complete input line.
///
/// Every character is either whitespace, an operator or part of a word, so
/// any line splits cleanly; `token` only fails once nothing but whitespace
/// is left.
pub fn lex(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut rest = input;
    while let Ok((remaining, tok)) = token(rest) {
        tokens.push(tok);
        rest = remaining;
    }
    tokens
}
