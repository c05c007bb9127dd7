use crate::rcfile::load_rc;
use minishell::{signals, Config, Flow, Shell};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};

const FAREWELL: &str = "\nExiting minishell. Goodbye!";

/// Run the interactive session until `exit` or end of input
pub(crate) fn run_repl(config: &Config) -> RlResult<()> {
    // Ctrl-C belongs to the foreground command, not the shell
    signals::setup_signal_handlers();

    let mut shell = Shell::new();
    shell.set_trace_mode(config.trace);

    if config.load_rc && load_rc(&mut shell) == Flow::Exit {
        println!("{}", FAREWELL);
        return Ok(());
    }

    let mut rl = DefaultEditor::new()?;

    loop {
        // Collect finished background jobs before showing the prompt
        shell.reap_jobs();

        match rl.readline(&config.prompt) {
            Ok(line) => {
                if shell.execute_line(&line) == Flow::Exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl-C at the prompt drops the line
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                minishell::report(&err);
                break;
            }
        }
    }

    println!("{}", FAREWELL);
    Ok(())
}
