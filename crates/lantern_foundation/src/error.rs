//! Error types for the Lantern system.
//!
//! Uses `thiserror` for ergonomic error definition. All error kinds here are
//! recoverable at the top level: the read-process loop reports them and keeps
//! accepting input. Structural mismatches inside unification are booleans,
//! never errors.

use thiserror::Error;

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Lantern operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }

    /// Creates an unbound-name error.
    #[must_use]
    pub fn unbound_name(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnboundName(name.into()))
    }

    /// Creates a malformed-expression error.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedExpression(message.into()))
    }

    /// Creates an application error.
    #[must_use]
    pub fn application(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Application(message.into()))
    }

    /// Creates a file-access error.
    #[must_use]
    pub fn file_access(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::FileAccess {
            path: path.into(),
            message: message.into(),
        })
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(message: impl Into<String>, line: u32, column: u32) -> Self {
        Self::new(ErrorKind::Parse {
            message: message.into(),
            line,
            column,
        })
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Symbol lookup failed in every frame of the environment chain.
    #[error("unknown identifier: {0}")]
    UnboundName(String),

    /// A special form or top-level form violated its required shape.
    #[error("badly formed expression: {0}")]
    MalformedExpression(String),

    /// Attempt to apply a non-procedure, or a native arity/type mismatch.
    #[error("{0}")]
    Application(String),

    /// A load target was missing under both name variants.
    #[error("cannot load {path}: {message}")]
    FileAccess {
        /// The path that was requested.
        path: String,
        /// Description of the underlying failure.
        message: String,
    },

    /// The reader rejected the source text.
    #[error("parse error at {line}:{column}: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Line number (1-indexed).
        line: u32,
        /// Column number (1-indexed).
        column: u32,
    },

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_unbound_name() {
        let err = Error::unbound_name("foo");
        assert!(matches!(err.kind, ErrorKind::UnboundName(_)));
        assert_eq!(format!("{err}"), "unknown identifier: foo");
    }

    #[test]
    fn error_file_access() {
        let err = Error::file_access("facts.logic", "no such file");
        let msg = format!("{err}");
        assert!(msg.contains("facts.logic"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn error_parse_carries_position() {
        let err = Error::parse("unexpected `)`", 3, 7);
        assert_eq!(format!("{err}"), "parse error at 3:7: unexpected `)`");
    }
}
