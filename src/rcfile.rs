use minishell::{Flow, Shell};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Startup file name, looked up in the home directory
const RC_FILE: &str = ".minishellrc";

/// Get home directory
pub(crate) fn dirs_home() -> Option<PathBuf> {
    env::var_os("HOME").map(PathBuf::from)
}

/// Run ~/.minishellrc if it exists
pub(crate) fn load_rc<W: Write>(shell: &mut Shell<W>) -> Flow {
    let rc_path = match dirs_home() {
        Some(home) => home.join(RC_FILE),
        None => return Flow::Continue,
    };

    // A missing rc file is normal
    let content = match fs::read_to_string(&rc_path) {
        Ok(c) => c,
        Err(_) => return Flow::Continue,
    };

    run_lines(shell, &content)
}

/// Run each command line of `content` in order.
///
/// Blank lines and lines starting with `#` are skipped. Finished background
/// jobs are reaped before each line, as they are before each prompt. Stops
/// early at `exit`.
pub(crate) fn run_lines<W: Write>(shell: &mut Shell<W>, content: &str) -> Flow {
    for line in content.lines() {
        let trimmed = line.trim();

        // Skip empty lines and comments
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        shell.reap_jobs();
        if shell.execute_line(trimmed) == Flow::Exit {
            return Flow::Exit;
        }
    }
    shell.reap_jobs();
    Flow::Continue
}
