//! minishell - a small interactive shell
//!
//! Usage:
//!   minishell              Start interactive session
//!   minishell -c "cmd"     Execute a single command line
//!   minishell script       Execute each line of a file

mod cli;
mod rcfile;
mod repl;

use cli::{execute_command, execute_script, parse_args, print_help, print_version};
use minishell::Config;
use std::env;
use std::process::ExitCode;

/// Exit status for command-line usage errors
const USAGE_ERROR: u8 = 2;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(e) => {
            minishell::report(&e);
            return ExitCode::from(USAGE_ERROR);
        }
    };

    if cli.help {
        print_help();
        return ExitCode::SUCCESS;
    }

    if cli.version {
        print_version();
        return ExitCode::SUCCESS;
    }

    let config = cli.apply(Config::from_env());

    if let Some(cmd) = cli.command.as_deref() {
        return execute_command(cmd, &config);
    }

    if let Some(script) = cli.script.as_deref() {
        return execute_script(script, &config);
    }

    match repl::run_repl(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            minishell::report(&e);
            ExitCode::FAILURE
        }
    }
}
