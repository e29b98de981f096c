//! Parse errors for solver-output processing.
//!
//! Every variant carries enough context (offending text, line number) to
//! diagnose a bad capture without re-running the solver. The input is assumed
//! to come from a trusted external tool, so nothing here is recoverable: an
//! error means a corrupted capture, an unexpected tool version, or a bug, and
//! it aborts the enclosing parse call.

use std::fmt;

/// Which way a parenthesis mismatch went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParenMismatch {
    /// A `)` appeared with no matching `(` still open.
    ExtraClosing,
    /// The text ended with at least one `(` still open.
    MissingClosing,
}

/// Errors raised while scanning or parsing solver output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Invalid scanner parameters: the target character conflicts with a
    /// delimiter class the scanner was asked to honor. A programming error,
    /// not a data error.
    Config {
        message: String,
    },
    /// An opened double quote never closed. `snippet` is a bounded window of
    /// text around the offending quote.
    UnterminatedQuote {
        snippet: String,
        line: usize,
    },
    /// Parenthesis nesting did not balance while scanning.
    UnbalancedParens {
        mismatch: ParenMismatch,
        context: String,
        line: usize,
    },
    /// A term with an opening paren does not end in `)`.
    MalformedPredicate {
        term: String,
        line: usize,
    },
    /// The solver status line is neither `SATISFIABLE` nor `UNSATISFIABLE`.
    UnrecognizedStatus {
        line: String,
    },
    /// An `Answer:` header whose tail does not parse as an integer.
    InvalidAnswerIndex {
        header: String,
        line: usize,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Config { message } => {
                write!(f, "invalid scan configuration: {}", message)
            }
            ParseError::UnterminatedQuote { snippet, line } => {
                write!(
                    f,
                    "mismatched quotes: the quote near '{}' never ends [line {}]",
                    snippet, line
                )
            }
            ParseError::UnbalancedParens {
                mismatch: ParenMismatch::ExtraClosing,
                context,
                line,
            } => {
                write!(
                    f,
                    "mismatched parens (extra closing paren) [line {}]; context: {}",
                    line, context
                )
            }
            ParseError::UnbalancedParens {
                mismatch: ParenMismatch::MissingClosing,
                context,
                line,
            } => {
                write!(
                    f,
                    "mismatched parens (missing closing paren) [line {}]; context: {}",
                    line, context
                )
            }
            ParseError::MalformedPredicate { term, line } => {
                write!(
                    f,
                    "malformed predicate '{}': missing closing ')' [line {}]",
                    term, line
                )
            }
            ParseError::UnrecognizedStatus { line } => {
                write!(
                    f,
                    "can't determine the solver status (did the solver fail?); indicator line is: {}",
                    line
                )
            }
            ParseError::InvalidAnswerIndex { header, line } => {
                write!(
                    f,
                    "invalid answer header '{}': expected an integer after 'Answer:' [line {}]",
                    header, line
                )
            }
        }
    }
}

impl std::error::Error for ParseError {}
