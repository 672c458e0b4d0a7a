//! Child process wiring strategies.
//!
//! One strategy per (interactive, has-input) combination, plus the
//! display-only and status variants. The invariants every strategy holds:
//! each pipe endpoint it opens is closed, and the child is reaped on every
//! exit path, including a failure while feeding stdin.

use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread;

use crate::args::{build_args, Invocation};
use crate::error::{GumError, Result};
use crate::exec::outcome::{Outcome, ProcessResult};
use crate::tty;

/// Dispatches gum invocations to the right wiring strategy.
///
/// Holds the executable path explicitly; there is no ambient lookup, so
/// tests can point a runner at a stub binary.
#[derive(Debug, Clone)]
pub struct Runner {
    executable: PathBuf,
}

impl Default for Runner {
    /// Resolve `gum` from `PATH`.
    fn default() -> Self {
        Self::new("gum")
    }
}

impl Runner {
    /// Create a runner for a gum executable at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            executable: path.into(),
        }
    }

    /// The executable this runner spawns.
    pub fn executable(&self) -> &std::path::Path {
        &self.executable
    }

    /// Run an invocation with the strategy its shape calls for.
    ///
    /// Interactive strategies fall back to headless wiring when no
    /// controlling terminal is available.
    pub fn run(&self, invocation: &Invocation) -> Result<Outcome> {
        let args = build_args(invocation);
        match (invocation.interactive, invocation.input.as_deref()) {
            (false, input) => self.run_headless(&args, input),
            (true, Some(input)) => self.run_interactive_with_input(&args, input),
            (true, None) => self.run_interactive(&args),
        }
    }

    /// Non-interactive: all streams piped, optional stdin payload.
    pub fn run_headless(&self, args: &[String], input: Option<&str>) -> Result<Outcome> {
        tracing::debug!(args = ?args, "running gum headless");

        let mut child = self
            .command(args)
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // Feed stdin from a writer thread so a child that echoes while we
        // are still writing cannot wedge both pipes.
        let feeder = input.map(|payload| spawn_feeder(child.stdin.take(), payload));

        // Reap before reporting any write failure: no zombies on error paths.
        let output = child.wait_with_output()?;
        let write_err = feeder.and_then(join_feeder);
        if let Some(err) = write_err {
            return Err(err.into());
        }

        Ok(ProcessResult {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
        .classify())
    }

    /// Interactive, no payload: terminal on stdin and stderr (keystrokes in,
    /// live redraw out), stdout piped back for capture.
    pub fn run_interactive(&self, args: &[String]) -> Result<Outcome> {
        let terminal = match tty::acquire() {
            Ok(terminal) => terminal,
            Err(GumError::NoControllingTerminal) => {
                tracing::debug!("no controlling terminal, falling back to headless");
                return self.run_headless(args, None);
            }
            Err(err) => return Err(err),
        };

        tracing::debug!(args = ?args, "running gum on the controlling terminal");

        let terminal_in = terminal.try_clone()?;
        let spawned = self
            .command(args)
            .stdin(Stdio::from(terminal_in))
            .stdout(Stdio::piped())
            .stderr(Stdio::from(terminal))
            .spawn();

        let child = match spawned {
            Ok(child) => child,
            // The device can disappear between acquire and spawn (hangup,
            // detached session); degrade the same way as a missing terminal.
            Err(err)
                if matches!(
                    err.kind(),
                    ErrorKind::NotFound | ErrorKind::NotConnected | ErrorKind::BrokenPipe
                ) =>
            {
                tracing::debug!("terminal went away at spawn: {err}, falling back to headless");
                return self.run_headless(args, None);
            }
            Err(err) => return Err(err.into()),
        };

        let output = child.wait_with_output()?;

        // stderr went to the terminal; only stdout was captured.
        Ok(ProcessResult {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::new(),
        }
        .classify())
    }

    /// Interactive with payload: pipe feeding stdin, terminal on stderr only
    /// for live redraw, stdout piped back for capture.
    pub fn run_interactive_with_input(&self, args: &[String], input: &str) -> Result<Outcome> {
        let terminal = match tty::acquire() {
            Ok(terminal) => terminal,
            Err(GumError::NoControllingTerminal) => {
                tracing::debug!("no controlling terminal, falling back to headless");
                return self.run_headless(args, Some(input));
            }
            Err(err) => return Err(err),
        };

        tracing::debug!(args = ?args, "running gum with piped input and terminal redraw");

        let mut child = self
            .command(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::from(terminal))
            .spawn()?;

        let write_err = feed_stdin(&mut child, input);

        let output = child.wait_with_output()?;
        if let Some(err) = write_err {
            return Err(err.into());
        }

        Ok(ProcessResult {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::new(),
        }
        .classify())
    }

    /// Fire-and-forget rendering: payload piped in, output drawn straight to
    /// the inherited streams. Reports success only.
    pub fn run_display_only(&self, args: &[String], input: &str) -> Result<bool> {
        tracing::debug!(args = ?args, "running gum display-only");

        let mut child = self
            .command(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()?;

        let write_err = feed_stdin(&mut child, input);

        let status = child.wait()?;
        if let Some(err) = write_err {
            return Err(err.into());
        }

        Ok(status.success())
    }

    /// Run to completion for a boolean answer.
    ///
    /// With a payload, streams are captured; without one, the child owns the
    /// inherited streams outright (confirm buttons, spinner animation).
    pub fn run_with_status(&self, args: &[String], input: Option<&str>) -> Result<bool> {
        match input {
            Some(payload) => {
                let mut child = self
                    .command(args)
                    .stdin(Stdio::piped())
                    .stdout(Stdio::piped())
                    .stderr(Stdio::piped())
                    .spawn()?;

                let feeder = spawn_feeder(child.stdin.take(), payload);

                let output = child.wait_with_output()?;
                if let Some(err) = join_feeder(feeder) {
                    return Err(err.into());
                }

                Ok(output.status.success())
            }
            None => {
                let status = self.command(args).status()?;
                Ok(status.success())
            }
        }
    }

    /// Spawn with fully inherited stdio and hand the child to the caller.
    ///
    /// Used by the spinner, which owns the wait.
    pub(crate) fn spawn_inherited(&self, args: &[String]) -> Result<Child> {
        tracing::debug!(args = ?args, "spawning gum with inherited stdio");
        Ok(self.command(args).spawn()?)
    }

    fn command(&self, args: &[String]) -> Command {
        let mut cmd = Command::new(&self.executable);
        cmd.args(args);
        cmd
    }
}

/// Write the payload to the child's stdin and close the write end.
///
/// A `BrokenPipe` is not an error here: the child may legitimately exit
/// before reading everything. Any other failure is handed back to the
/// caller, who must still reap the child before reporting it.
fn feed_stdin(child: &mut Child, input: &str) -> Option<std::io::Error> {
    let stdin = child.stdin.take()?;
    write_all_ignoring_epipe(stdin, input)
}

fn write_all_ignoring_epipe(mut stdin: ChildStdin, input: &str) -> Option<std::io::Error> {
    match stdin.write_all(input.as_bytes()) {
        Err(err) if err.kind() != ErrorKind::BrokenPipe => Some(err),
        _ => None,
    }
    // stdin drops here, closing the pipe so the child sees EOF
}

/// Feed stdin from its own thread, as [`feed_stdin`] does inline.
fn spawn_feeder(
    stdin: Option<ChildStdin>,
    input: &str,
) -> thread::JoinHandle<Option<std::io::Error>> {
    let payload = input.to_string();
    thread::spawn(move || {
        let stdin = stdin?;
        write_all_ignoring_epipe(stdin, &payload)
    })
}

fn join_feeder(feeder: thread::JoinHandle<Option<std::io::Error>>) -> Option<std::io::Error> {
    feeder.join().ok().flatten()
}
