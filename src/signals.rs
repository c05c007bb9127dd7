//! Signal dispositions for minishell
//!
//! The interactive process ignores SIGINT and SIGQUIT so that Ctrl-C and
//! Ctrl-\ reach the running command without ending the session. Ignored
//! dispositions survive exec, so children put the defaults back first.

use nix::sys::signal::{signal, SigHandler, Signal};

const INTERACTIVE_SIGNALS: [Signal; 2] = [Signal::SIGINT, Signal::SIGQUIT];

/// Ignore terminal interrupt signals in the shell process
pub fn setup_signal_handlers() {
    for sig in INTERACTIVE_SIGNALS {
        // SAFETY: SigIgn installs no handler code
        unsafe {
            let _ = signal(sig, SigHandler::SigIgn);
        }
    }
}

/// Reset dispositions in a forked child before exec.
///
/// SIGPIPE goes back to the default in every child, since the runtime
/// ignores it in the shell itself; a pipeline's writer then dies quietly once
/// its reader is gone. SIGINT and SIGQUIT are restored for foreground
/// children only, so background children keep both ignored.
pub fn reset_child_handlers(background: bool) {
    let interactive: &[Signal] = if background { &[] } else { &INTERACTIVE_SIGNALS };
    for &sig in std::iter::once(&Signal::SIGPIPE).chain(interactive) {
        // SAFETY: SigDfl installs no handler code
        unsafe {
            let _ = signal(sig, SigHandler::SigDfl);
        }
    }
}
