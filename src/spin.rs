//! Spinner display concurrent with host-side work.
//!
//! Two modes, mirroring what `gum spin` can express:
//!
//! - **Command mode**: gum runs the external command itself; the host waits
//!   on that single child and reports success.
//! - **Callable mode**: the work is a host-side closure gum cannot invoke.
//!   The indicator child instead polls for a marker file while the closure
//!   runs in the host; when the closure finishes (Ok or Err) the marker is
//!   written, the indicator is joined, and the marker is removed before the
//!   closure's result propagates.
//!
//! The marker file is a coarse inter-process signal, but it keeps the
//! concurrency model to host + child processes with blocking waits only.

use std::fs;
use std::path::PathBuf;
use std::process::Child;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::args::{add_style_args, build_args, Invocation};
use crate::error::{GumError, Result};
use crate::exec::Runner;

/// Spinner animations gum ships with.
pub const SPINNERS: &[&str] = &[
    "line", "dot", "minidot", "jump", "pulse", "points", "globe", "moon", "monkey", "meter",
    "hamburger",
];

/// Interval the indicator's placeholder command polls the marker at.
const POLL_INTERVAL_SECS: &str = "0.1";

/// Options for a spin invocation.
#[derive(Debug, Clone, Default)]
pub struct SpinOptions {
    /// Title shown next to the spinner. Defaults to "Loading...".
    pub title: Option<String>,

    /// Spinner animation name (see [`SPINNERS`]).
    pub spinner: Option<String>,

    /// Show the command's stdout after completion (command mode).
    pub show_output: Option<bool>,

    /// Show the command's stderr after completion (command mode).
    pub show_error: Option<bool>,

    /// Alignment of spinner and title (`left`, `right`).
    pub align: Option<String>,

    /// Timeout passed through to gum (command mode); enforcement is gum's.
    pub timeout_secs: Option<u64>,

    /// Style sub-flags for the spinner animation.
    pub spinner_style: Vec<(String, String)>,

    /// Style sub-flags for the title text.
    pub title_style: Vec<(String, String)>,

    /// External command tokens for command mode. Must be absent in callable
    /// mode.
    pub command: Option<Vec<String>>,
}

impl SpinOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn spinner(mut self, spinner: impl Into<String>) -> Self {
        self.spinner = Some(spinner.into());
        self
    }

    pub fn show_output(mut self, show: bool) -> Self {
        self.show_output = Some(show);
        self
    }

    pub fn show_error(mut self, show: bool) -> Self {
        self.show_error = Some(show);
        self
    }

    pub fn align(mut self, align: impl Into<String>) -> Self {
        self.align = Some(align.into());
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn spinner_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.spinner_style.push((key.into(), value.into()));
        self
    }

    pub fn title_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.title_style.push((key.into(), value.into()));
        self
    }

    /// Command tokens for command mode. Callers wanting shell semantics pass
    /// `["sh", "-c", ...]` explicitly.
    pub fn command<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.command = Some(tokens.into_iter().map(Into::into).collect());
        self
    }
}

/// Run a spinner over an external command; gum owns the command child.
///
/// Returns whether the command succeeded. Fails with
/// [`GumError::Configuration`] when no command is present.
pub fn spin_command(runner: &Runner, options: &SpinOptions) -> Result<bool> {
    let command = options.command.as_ref().ok_or_else(|| GumError::Configuration {
        message: "a command is required when no callable is supplied".into(),
    })?;

    let mut args = spin_args(options, true);
    args.push("--".into());
    args.extend(command.iter().cloned());

    runner.run_with_status(&args, None)
}

/// Run a spinner concurrently with a host-side closure.
///
/// The indicator child is spawned before the closure runs and is always
/// joined before this returns, on every exit path; the closure's error wins
/// over any teardown error. Fails with [`GumError::Configuration`] before
/// spawning anything if the options also carry a command.
pub fn spin<T>(
    runner: &Runner,
    options: &SpinOptions,
    work: impl FnOnce() -> Result<T>,
) -> Result<T> {
    if options.command.is_some() {
        return Err(GumError::Configuration {
            message: "cannot specify both a command and a callable".into(),
        });
    }

    let marker = marker_path();
    let mut args = spin_args(options, false);
    args.push("--".into());
    args.push("sh".into());
    args.push("-c".into());
    args.push(format!(
        "while [ ! -e '{}' ]; do sleep {POLL_INTERVAL_SECS}; done",
        marker.display()
    ));

    let child = runner.spawn_inherited(&args)?;
    let session = SpinnerSession {
        marker,
        child: Some(child),
    };

    let result = work();
    let teardown = session.finish();

    match result {
        Err(err) => Err(err),
        Ok(value) => {
            teardown?;
            Ok(value)
        }
    }
}

/// Render the spin flag tokens. Command mode (`full`) carries the display
/// passthroughs; callable mode only titles the animation, as the placeholder
/// command has no output worth showing.
fn spin_args(options: &SpinOptions, full: bool) -> Vec<String> {
    let mut invocation = Invocation::new("spin")
        .opt("title", options.title.as_deref().unwrap_or("Loading..."))
        .maybe_opt("spinner", options.spinner.as_deref());

    if full {
        invocation = invocation
            .maybe_opt("show_output", options.show_output)
            .maybe_opt("show_error", options.show_error)
            .maybe_opt("align", options.align.as_deref())
            .maybe_opt("timeout", options.timeout_secs.map(|secs| format!("{secs}s")));
    }

    let mut args = build_args(&invocation);
    add_style_args(&mut args, "spinner", &options.spinner_style);
    add_style_args(&mut args, "title", &options.title_style);
    args
}

/// Marker path unique per host process and call.
///
/// The sequence number keeps concurrent calls within one process from
/// colliding even under a coarse clock.
fn marker_path() -> PathBuf {
    static CALL_SEQ: AtomicU64 = AtomicU64::new(0);

    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or(0);
    let seq = CALL_SEQ.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("gum_spin_done_{}_{stamp}_{seq}", std::process::id()))
}

/// Exclusive owner of one indicator child and its marker file.
///
/// Spans exactly one callable-mode call. Teardown writes the marker, joins
/// the child, and removes the marker; the `Drop` fallback keeps that
/// guarantee when the closure panics.
#[derive(Debug)]
struct SpinnerSession {
    marker: PathBuf,
    child: Option<Child>,
}

impl SpinnerSession {
    fn finish(mut self) -> Result<()> {
        self.teardown()
    }

    fn teardown(&mut self) -> Result<()> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };

        let signalled = fs::write(&self.marker, b"");
        if signalled.is_err() {
            // Without the marker the poll loop never ends; stop it directly
            // so the wait below cannot hang.
            let _ = child.kill();
        }

        let waited = child.wait();
        tracing::debug!(marker = %self.marker.display(), "spinner joined");

        // Removed even when the wait failed
        let _ = fs::remove_file(&self.marker);

        signalled?;
        waited?;
        Ok(())
    }
}

impl Drop for SpinnerSession {
    fn drop(&mut self) {
        let _ = self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spin_args_default_title() {
        let args = spin_args(&SpinOptions::new(), false);
        assert_eq!(args, vec!["spin", "--title=Loading..."]);
    }

    #[test]
    fn spin_args_full_carries_passthroughs() {
        let options = SpinOptions::new()
            .title("Installing...")
            .spinner("dot")
            .show_output(true)
            .align("left")
            .timeout_secs(5);
        assert_eq!(
            spin_args(&options, true),
            vec![
                "spin",
                "--title=Installing...",
                "--spinner=dot",
                "--show-output",
                "--align=left",
                "--timeout=5s"
            ]
        );
    }

    #[test]
    fn spin_args_callable_mode_drops_passthroughs() {
        let options = SpinOptions::new().spinner("moon").show_output(true).align("right");
        assert_eq!(
            spin_args(&options, false),
            vec!["spin", "--title=Loading...", "--spinner=moon"]
        );
    }

    #[test]
    fn spin_args_style_maps_are_space_separated() {
        let options = SpinOptions::new()
            .spinner_style("foreground", "212")
            .title_style("bold", "true");
        assert_eq!(
            spin_args(&options, false),
            vec![
                "spin",
                "--title=Loading...",
                "--spinner.foreground",
                "212",
                "--title.bold",
                "true"
            ]
        );
    }

    #[test]
    fn command_and_callable_is_a_configuration_error() {
        // A nonexistent executable proves nothing was spawned: a spawn
        // attempt would surface as an IO error instead.
        let runner = Runner::new("/nonexistent/gum-binary");
        let options = SpinOptions::new().command(["true"]);
        let err = spin(&runner, &options, || Ok(())).unwrap_err();
        assert!(matches!(err, GumError::Configuration { .. }));
    }

    #[test]
    fn command_mode_requires_a_command() {
        let runner = Runner::new("/nonexistent/gum-binary");
        let err = spin_command(&runner, &SpinOptions::new()).unwrap_err();
        assert!(matches!(err, GumError::Configuration { .. }));
    }

    #[test]
    fn marker_paths_are_unique_per_call() {
        let first = marker_path();
        let second = marker_path();
        assert_ne!(first, second);
    }
}
