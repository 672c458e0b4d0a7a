//! Exit-status classification and output normalization.

/// Raw result of one gum child process.
#[derive(Debug, Clone)]
pub struct ProcessResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Captured standard output.
    pub stdout: String,

    /// Captured standard error. Empty when stderr was wired to the terminal.
    pub stderr: String,
}

/// Classified outcome of one gum child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Exit 0; carries stdout with exactly one trailing line terminator
    /// stripped.
    Success(String),

    /// The user aborted: exit 130 (Ctrl+C), or a non-zero exit with nothing
    /// on stderr (bare Escape). Not an error.
    Cancelled,

    /// Non-zero, non-cancel exit; carries the stderr diagnostic.
    Failed(String),
}

/// Exit code gum uses for user cancellation.
const EXIT_CANCELLED: i32 = 130;

impl ProcessResult {
    /// Classify the exit status and captured streams.
    ///
    /// Exit 130 is cancellation regardless of captured content. A non-zero
    /// exit with an empty diagnostic is also treated as cancellation rather
    /// than failure; gum aborts silently on Escape.
    pub fn classify(self) -> Outcome {
        match self.exit_code {
            Some(0) => Outcome::Success(chomp(&self.stdout).to_string()),
            Some(EXIT_CANCELLED) => Outcome::Cancelled,
            _ if self.stderr.is_empty() => Outcome::Cancelled,
            _ => Outcome::Failed(self.stderr),
        }
    }
}

/// Strip exactly one trailing line terminator (`\r\n` counts as one).
///
/// Gum terminates its result with a single newline; anything beyond that is
/// part of the value and must survive.
pub fn chomp(s: &str) -> &str {
    if let Some(stripped) = s.strip_suffix('\n') {
        stripped.strip_suffix('\r').unwrap_or(stripped)
    } else {
        s.strip_suffix('\r').unwrap_or(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(exit_code: Option<i32>, stdout: &str, stderr: &str) -> ProcessResult {
        ProcessResult {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    #[test]
    fn zero_exit_is_success_with_chomped_stdout() {
        let outcome = result(Some(0), "blue\n", "").classify();
        assert_eq!(outcome, Outcome::Success("blue".into()));
    }

    #[test]
    fn exit_130_is_cancelled_regardless_of_content() {
        let outcome = result(Some(130), "partial output", "some noise").classify();
        assert_eq!(outcome, Outcome::Cancelled);
    }

    #[test]
    fn nonzero_with_diagnostic_is_failed() {
        let outcome = result(Some(1), "", "unknown flag: --bogus\n").classify();
        assert_eq!(outcome, Outcome::Failed("unknown flag: --bogus\n".into()));
    }

    #[test]
    fn nonzero_with_empty_diagnostic_is_cancelled() {
        // Silent abort, e.g. bare Escape
        let outcome = result(Some(1), "", "").classify();
        assert_eq!(outcome, Outcome::Cancelled);
    }

    #[test]
    fn signal_kill_with_diagnostic_is_failed() {
        let outcome = result(None, "", "terminated\n").classify();
        assert_eq!(outcome, Outcome::Failed("terminated\n".into()));
    }

    #[test]
    fn signal_kill_without_diagnostic_is_cancelled() {
        let outcome = result(None, "", "").classify();
        assert_eq!(outcome, Outcome::Cancelled);
    }

    #[test]
    fn chomp_strips_exactly_one_terminator() {
        assert_eq!(chomp("value\n\n"), "value\n");
        assert_eq!(chomp("value\n"), "value");
        assert_eq!(chomp("value"), "value");
        assert_eq!(chomp("value\r\n"), "value");
        assert_eq!(chomp("value\r\n\r\n"), "value\r\n");
        assert_eq!(chomp(""), "");
    }

    #[test]
    fn chomp_keeps_trailing_spaces() {
        // Only the terminator goes, not all trailing whitespace
        assert_eq!(chomp("value  \n"), "value  ");
    }
}
