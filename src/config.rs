//! Session settings
//!
//! Defaults, overridden by environment variables, overridden in turn by
//! command-line flags (applied by the binary).

use std::env;

pub const DEFAULT_PROMPT: &str = "minishell> ";

/// Overrides the prompt string
pub const PROMPT_VAR: &str = "MINISHELL_PROMPT";
/// Enables trace output when set to anything but empty or `0`
pub const TRACE_VAR: &str = "MINISHELL_TRACE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub prompt: String,
    /// Print each command to stderr before running it
    pub trace: bool,
    /// Run `~/.minishellrc` before the first prompt
    pub load_rc: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            prompt: DEFAULT_PROMPT.to_string(),
            trace: false,
            load_rc: true,
        }
    }
}

impl Config {
    /// Defaults with the process environment applied
    pub fn from_env() -> Self {
        Self::default().with_vars(|key| env::var(key).ok())
    }

    /// Apply overrides looked up through `var`
    pub fn with_vars(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(prompt) = var(PROMPT_VAR) {
            self.prompt = prompt;
        }
        if let Some(value) = var(TRACE_VAR) {
            self.trace = is_enabled(&value);
        }
        self
    }
}

fn is_enabled(value: &str) -> bool {
    !value.is_empty() && value != "0"
}
