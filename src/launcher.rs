//! Process launcher
//!
//! Everything here runs in a forked child. `run_child` is the child's whole
//! life: resolve redirections, then replace the process image. It never
//! returns to the caller.

use crate::redirect;
use crate::signals;
use nix::errno::Errno;
use nix::unistd::execvp;
use std::convert::Infallible;
use std::ffi::CString;
use thiserror::Error;

/// Exit status of a child whose redirection could not be set up
pub const REDIRECT_FAILURE: i32 = 1;
/// Exit status when the program was not found on PATH
pub const NOT_FOUND: i32 = 127;
/// Exit status when the program was found but could not be executed
pub const NOT_EXECUTABLE: i32 = 126;

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("{program}: {}", .errno.desc())]
    Exec { program: String, errno: Errno },
    #[error("{0}: argument contains a NUL byte")]
    Nul(String),
    #[error("empty command")]
    Empty,
}

impl LaunchError {
    /// Status the child exits with after reporting this error
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchError::Exec { errno: Errno::ENOENT, .. } => NOT_FOUND,
            LaunchError::Exec { .. } | LaunchError::Nul(_) | LaunchError::Empty => NOT_EXECUTABLE,
        }
    }
}

/// Replace the current process image with `args[0]`, searching PATH.
///
/// Only returns on failure.
pub fn launch(args: &[String]) -> Result<Infallible, LaunchError> {
    let program = args.first().ok_or(LaunchError::Empty)?;
    let argv = args
        .iter()
        .map(|arg| CString::new(arg.as_bytes()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| LaunchError::Nul(program.clone()))?;

    execvp(&argv[0], &argv).map_err(|errno| LaunchError::Exec {
        program: program.clone(),
        errno,
    })
}

/// Body of a forked child: redirect, then exec `tokens`.
///
/// A command that is only redirections exits successfully once the files
/// are opened.
pub fn run_child(tokens: Vec<String>, background: bool) -> ! {
    signals::reset_child_handlers(background);

    let args = match redirect::resolve(tokens) {
        Ok(args) => args,
        Err(e) => {
            crate::report(&e);
            exit_child(REDIRECT_FAILURE)
        }
    };

    if args.is_empty() {
        exit_child(0)
    }

    match launch(&args) {
        Ok(never) => match never {},
        Err(e) => {
            crate::report(&e);
            exit_child(e.exit_code())
        }
    }
}

/// Terminate a forked child without running the parent's exit handlers or
/// flushing buffers it inherited.
pub fn exit_child(code: i32) -> ! {
    // SAFETY: _exit has no preconditions
    unsafe { libc::_exit(code) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_127() {
        let err = LaunchError::Exec { program: "nope".into(), errno: Errno::ENOENT };
        assert_eq!(err.exit_code(), NOT_FOUND);
        assert_eq!(err.to_string(), "nope: No such file or directory");
    }

    #[test]
    fn permission_denied_maps_to_126() {
        let err = LaunchError::Exec { program: "./data.txt".into(), errno: Errno::EACCES };
        assert_eq!(err.exit_code(), NOT_EXECUTABLE);
        assert!(err.to_string().starts_with("./data.txt: "));
    }

    #[test]
    fn empty_argument_list_is_an_error() {
        assert!(matches!(launch(&[]), Err(LaunchError::Empty)));
    }

    #[test]
    fn nul_byte_is_rejected_before_exec() {
        // Fails during argv conversion, so the test process is never replaced
        let args = vec!["echo".to_string(), "a\0b".to_string()];
        let err = launch(&args).unwrap_err();
        assert!(matches!(err, LaunchError::Nul(ref p) if p == "echo"));
    }
}
