//! Outcome interpretation.
//!
//! Maps a classified [`Outcome`] to the shape the caller asked for. The
//! scalar-vs-list decision is the caller's request context (selection limit
//! above one, or unlimited mode), never an inspection of the output itself:
//! a single selected line is still a one-element list when a list was
//! requested.

use crate::error::{GumError, Result};
use crate::exec::Outcome;

/// The result shape a caller's request implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultShape {
    /// One textual value (single selection, formatted output).
    Scalar,
    /// Ordered values split on line boundaries (limit > 1, no-limit).
    List,
    /// Yes/no answer (confirm); cancellation reads as "no".
    Boolean,
}

/// A shaped, interpreted result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interpreted {
    Value(String),
    ValueList(Vec<String>),
    Cancelled,
    BooleanOutcome(bool),
}

/// Interpret an outcome under the caller's requested shape.
///
/// `Failed` outcomes become [`GumError::Execution`] carrying the subcommand
/// name and the diagnostic text.
pub fn interpret(subcommand: &str, outcome: Outcome, shape: ResultShape) -> Result<Interpreted> {
    match outcome {
        Outcome::Success(value) => Ok(match shape {
            ResultShape::Scalar => Interpreted::Value(value),
            ResultShape::List => {
                Interpreted::ValueList(value.lines().map(String::from).collect())
            }
            ResultShape::Boolean => Interpreted::BooleanOutcome(true),
        }),
        Outcome::Cancelled => Ok(match shape {
            ResultShape::Boolean => Interpreted::BooleanOutcome(false),
            _ => Interpreted::Cancelled,
        }),
        Outcome::Failed(diagnostic) => Err(GumError::Execution {
            command: subcommand.to_string(),
            diagnostic,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_keeps_value_verbatim() {
        let result = interpret("input", Outcome::Success("hello".into()), ResultShape::Scalar);
        assert_eq!(result.unwrap(), Interpreted::Value("hello".into()));
    }

    #[test]
    fn list_splits_on_line_boundaries() {
        let result = interpret(
            "choose",
            Outcome::Success("red\ngreen\nblue".into()),
            ResultShape::List,
        );
        assert_eq!(
            result.unwrap(),
            Interpreted::ValueList(vec!["red".into(), "green".into(), "blue".into()])
        );
    }

    #[test]
    fn list_shape_wraps_single_value() {
        // Shape comes from the request, not from counting lines
        let result = interpret("choose", Outcome::Success("red".into()), ResultShape::List);
        assert_eq!(result.unwrap(), Interpreted::ValueList(vec!["red".into()]));
    }

    #[test]
    fn boolean_maps_success_and_cancel() {
        let yes = interpret("confirm", Outcome::Success(String::new()), ResultShape::Boolean);
        assert_eq!(yes.unwrap(), Interpreted::BooleanOutcome(true));

        let no = interpret("confirm", Outcome::Cancelled, ResultShape::Boolean);
        assert_eq!(no.unwrap(), Interpreted::BooleanOutcome(false));
    }

    #[test]
    fn cancelled_stays_cancelled_for_value_shapes() {
        let scalar = interpret("input", Outcome::Cancelled, ResultShape::Scalar);
        assert_eq!(scalar.unwrap(), Interpreted::Cancelled);

        let list = interpret("choose", Outcome::Cancelled, ResultShape::List);
        assert_eq!(list.unwrap(), Interpreted::Cancelled);
    }

    #[test]
    fn failed_becomes_execution_error() {
        let err = interpret(
            "filter",
            Outcome::Failed("bad flag\n".into()),
            ResultShape::Scalar,
        )
        .unwrap_err();
        match err {
            GumError::Execution {
                command,
                diagnostic,
            } => {
                assert_eq!(command, "filter");
                assert!(diagnostic.contains("bad flag"));
            }
            other => panic!("expected Execution, got {other}"),
        }
    }
}
