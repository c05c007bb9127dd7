use crate::rcfile::run_lines;
use minishell::{Config, Shell};
use std::fs;
use std::process::ExitCode;
use thiserror::Error;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Error, Debug, PartialEq)]
pub(crate) enum CliError {
    #[error("option {0} requires an argument")]
    MissingArgument(String),
    #[error("unknown option: {0}")]
    UnknownOption(String),
}

/// Parsed command-line arguments
#[derive(Debug, Default, PartialEq)]
pub(crate) struct CliArgs {
    pub(crate) command: Option<String>,
    pub(crate) script: Option<String>,
    pub(crate) norc: bool,
    pub(crate) trace: bool,
    pub(crate) help: bool,
    pub(crate) version: bool,
}

impl CliArgs {
    /// Apply the flags on top of `config`
    pub(crate) fn apply(&self, mut config: Config) -> Config {
        if self.norc {
            config.load_rc = false;
        }
        if self.trace {
            config.trace = true;
        }
        config
    }
}

/// Parse command-line arguments
pub(crate) fn parse_args(args: &[String]) -> Result<CliArgs, CliError> {
    let mut cli = CliArgs::default();

    let mut i = 1; // Skip program name
    while i < args.len() {
        match args[i].as_str() {
            "--norc" => {
                cli.norc = true;
            }
            "--trace" => {
                cli.trace = true;
            }
            "-c" => {
                // Everything after -c is the command
                if i + 1 >= args.len() {
                    return Err(CliError::MissingArgument("-c".into()));
                }
                cli.command = Some(args[i + 1..].join(" "));
                break;
            }
            "--help" | "-h" => {
                cli.help = true;
            }
            "--version" | "-V" => {
                cli.version = true;
            }
            flag if flag.starts_with('-') => {
                return Err(CliError::UnknownOption(flag.to_string()));
            }
            path => {
                cli.script = Some(path.to_string());
            }
        }
        i += 1;
    }

    Ok(cli)
}

pub(crate) fn print_help() {
    println!(
        r#"minishell {} - a small interactive shell

USAGE:
    minishell [--norc] [--trace]        Start interactive session
    minishell -c <command>              Execute a single command line
    minishell <script>                  Execute each line of a file
    minishell --help                    Show this help message
    minishell --version                 Show version

OPTIONS:
    --norc                  Skip ~/.minishellrc
    --trace                 Print each command to stderr before running it

SYNTAX:
    cmd args                Run a program, searching PATH
    cmd < file              Read stdin from file
    cmd > file              Write stdout to file (created or truncated)
    left | right            Pipe left's stdout into right's stdin (one pipe)
    cmd &                   Run in background

BUILTINS:
    jobs                    List background jobs
    exit                    End the session

ENVIRONMENT:
    MINISHELL_PROMPT        Prompt string (default "minishell> ")
    MINISHELL_TRACE         Same as --trace when set to anything but 0
"#,
        VERSION
    );
}

pub(crate) fn print_version() {
    println!("minishell {}", VERSION);
}

fn session(config: &Config) -> Shell {
    let mut shell = Shell::new();
    shell.set_trace_mode(config.trace);
    shell
}

/// Execute a single command line
pub(crate) fn execute_command(cmd: &str, config: &Config) -> ExitCode {
    let mut shell = session(config);
    shell.execute_line(cmd);
    shell.reap_jobs();
    ExitCode::SUCCESS
}

/// Execute a script file
pub(crate) fn execute_script(path: &str, config: &Config) -> ExitCode {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            minishell::report(&format!("{}: {}", path, e));
            return ExitCode::FAILURE;
        }
    };

    let mut shell = session(config);
    run_lines(&mut shell, &content);
    ExitCode::SUCCESS
}
