//! Error types for gumwrap operations.
//!
//! This module defines [`GumError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `GumError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `GumError::Other`) for unexpected errors
//! - User cancellation is *not* an error; it is a first-class outcome
//!   (see [`crate::exec::Outcome::Cancelled`])

use thiserror::Error;

/// Core error type for gumwrap operations.
#[derive(Debug, Error)]
pub enum GumError {
    /// Invalid combination of inputs, detected before any process is spawned.
    #[error("Invalid configuration: {message}")]
    Configuration { message: String },

    /// The gum child exited non-zero (and non-cancelled) with a diagnostic.
    #[error("gum {command} failed: {diagnostic}")]
    Execution { command: String, diagnostic: String },

    /// No controlling terminal is attachable.
    ///
    /// Expected in CI and nested pipes; callers recover by falling back to
    /// the headless strategy. Never shown to the end user.
    #[error("no controlling terminal available")]
    NoControllingTerminal,

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for gumwrap operations.
pub type Result<T> = std::result::Result<T, GumError>;
