//! Controlling terminal acquisition.
//!
//! Interactive gum subcommands draw their UI and read keystrokes on the
//! session's terminal device, not on whatever stdin/stderr happen to be
//! redirected to. [`acquire`] hands out that device; when there is none
//! (CI, nested pipes), the dispatcher falls back to headless wiring, so
//! failure here is expected and never reaches the end user.

use std::fs::{File, OpenOptions};

use crate::error::{GumError, Result};

/// Open the controlling terminal read+write.
///
/// Returns [`GumError::NoControllingTerminal`] when no terminal device is
/// attachable. Only the device decides: the host's own streams may be
/// redirected (`2>err.log`) while the session terminal is still there for
/// the child to draw on.
pub fn acquire() -> Result<File> {
    open_tty().map_err(|err| {
        tracing::debug!(
            attended = console::user_attended_stderr(),
            "failed to open terminal device: {err}"
        );
        GumError::NoControllingTerminal
    })
}

#[cfg(unix)]
fn open_tty() -> std::io::Result<File> {
    OpenOptions::new().read(true).write(true).open("/dev/tty")
}

#[cfg(not(unix))]
fn open_tty() -> std::io::Result<File> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "no terminal device on this platform",
    ))
}
