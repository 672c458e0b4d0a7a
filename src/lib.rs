//! gumwrap - typed bindings for driving the gum terminal UI binary.
//!
//! Gum draws interactive pickers, prompts, and formatted output on the
//! terminal; this crate handles the calling contract. It turns typed option
//! lists into gum's flag syntax, wires stdin/stdout/stderr/TTY per invocation
//! kind so a full-screen child can take over the terminal while the host
//! captures its result, and classifies exit codes into success, cancellation,
//! and failure.
//!
//! # Modules
//!
//! - [`args`] - Typed options, invocation builder, argument rendering
//! - [`error`] - Error types and result alias
//! - [`exec`] - Process dispatch strategies and outcome classification
//! - [`interpret`] - Shaping outcomes into scalar/list/boolean results
//! - [`spin`] - Spinner display concurrent with host work
//! - [`tty`] - Controlling terminal acquisition
//!
//! # Example
//!
//! ```no_run
//! use gumwrap::{Invocation, Outcome, Runner};
//!
//! let runner = Runner::default();
//! let invocation = Invocation::new("choose")
//!     .positionals(["red", "green", "blue"])
//!     .opt("header", "Pick a color:");
//! match runner.run(&invocation)? {
//!     Outcome::Success(color) => println!("picked {color}"),
//!     Outcome::Cancelled => println!("never mind"),
//!     Outcome::Failed(diag) => eprintln!("{diag}"),
//! }
//! # Ok::<(), gumwrap::GumError>(())
//! ```
//!
//! Cancellation (Ctrl+C, bare Escape) is an outcome, not an error. When no
//! controlling terminal is available (CI, nested pipes), interactive calls
//! degrade to headless wiring automatically.

pub mod args;
pub mod error;
pub mod exec;
pub mod interpret;
pub mod spin;
pub mod tty;

pub use args::{add_style_args, build_args, Invocation, OptValue};
pub use error::{GumError, Result};
pub use exec::{Outcome, ProcessResult, Runner};
pub use interpret::{interpret, Interpreted, ResultShape};
pub use spin::{spin, spin_command, SpinOptions, SPINNERS};
