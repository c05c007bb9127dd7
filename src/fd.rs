//! Owned descriptor handles
//!
//! Pipe ends and opened redirection targets are held as `OwnedFd`, so every
//! path out of the forking code closes them on drop. Binding a handle onto a
//! standard stream consumes it: the descriptor is duplicated onto the target
//! and the original is closed in the same step.

use nix::unistd;
use std::os::fd::{AsRawFd, FromRawFd, IntoRawFd, OwnedFd, RawFd};

pub const STDIN: RawFd = libc::STDIN_FILENO;
pub const STDOUT: RawFd = libc::STDOUT_FILENO;

/// An anonymous pipe. Both ends close when dropped.
#[derive(Debug)]
pub struct Pipe {
    pub reader: OwnedFd,
    pub writer: OwnedFd,
}

impl Pipe {
    pub fn new() -> nix::Result<Self> {
        let (read_fd, write_fd) = unistd::pipe()?;
        // SAFETY: pipe() just created both descriptors and nothing else owns them
        let (reader, writer) =
            unsafe { (OwnedFd::from_raw_fd(read_fd), OwnedFd::from_raw_fd(write_fd)) };
        Ok(Pipe { reader, writer })
    }
}

/// Duplicate `fd` onto `target` and close the original.
///
/// If `fd` already is `target` it is left open in place.
pub fn bind(fd: impl Into<OwnedFd>, target: RawFd) -> nix::Result<()> {
    let fd: OwnedFd = fd.into();
    if fd.as_raw_fd() == target {
        let _ = fd.into_raw_fd();
        return Ok(());
    }
    unistd::dup2(fd.as_raw_fd(), target)?;
    Ok(())
}
