//! Gum child process execution.

pub mod dispatcher;
pub mod outcome;

pub use dispatcher::Runner;
pub use outcome::{chomp, Outcome, ProcessResult};
