//! Error types for the turtle script interpreter.

use std::fmt;

use turtlescad_geometry::GeometryError;

use crate::scanner::{ScanError, ScanErrorKind};
use crate::token::Span;

// ---------------------------------------------------------------------------
// Error severity
// ---------------------------------------------------------------------------

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Warning (execution continues).
    Warning,
    /// Error (execution stops).
    Error,
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// An error produced by the scanner or the interpreter.
#[derive(Debug, Clone)]
pub struct InterpreterError {
    /// What went wrong.
    pub kind: ErrorKind,
    /// Human-readable message.
    pub message: String,
    /// Source location, if available.
    pub span: Option<Span>,
    pub severity: Severity,
}

impl InterpreterError {
    /// Create a new error.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            span: None,
            severity: Severity::Error,
        }
    }

    /// Attach a source span.
    #[must_use]
    pub const fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Set severity.
    #[must_use]
    pub const fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl fmt::Display for InterpreterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(span) = self.span {
            write!(f, "[{}..{}] ", span.start, span.end)?;
        }
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for InterpreterError {}

impl From<ScanError> for InterpreterError {
    fn from(err: ScanError) -> Self {
        let kind = match err.kind {
            ScanErrorKind::InvalidCharacter => ErrorKind::InvalidCharacter,
            ScanErrorKind::UnterminatedString => ErrorKind::UnterminatedString,
        };
        Self::new(kind, err.message).with_span(err.span)
    }
}

impl From<GeometryError> for InterpreterError {
    fn from(err: GeometryError) -> Self {
        Self::new(ErrorKind::Geometry, err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Error kinds
// ---------------------------------------------------------------------------

/// Categories of errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    // -- Scan errors --
    InvalidCharacter,
    UnterminatedString,

    // -- Parse errors --
    /// Unexpected token.
    UnexpectedToken,
    /// Missing expected token.
    MissingToken,
    /// Unterminated block or stray `}`.
    UnbalancedDelimiter,

    // -- Type errors --
    /// Wrong type for operation.
    TypeError,
    /// Wrong number of arguments to a call.
    ArityError,

    // -- Runtime errors --
    /// Variable used or assigned before `let`.
    UndefinedVariable,
    /// Call to a name that is not a command or function.
    UnknownCommand,
    /// Division by zero or similar.
    ArithmeticError,
    /// Rejected by the turtle: bad pen attribute or broken stroke path.
    Geometry,
    /// Script ended while a stroke was still being drawn.
    UnfinishedStroke,

    // -- Internal --
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCharacter => write!(f, "invalid character"),
            Self::UnterminatedString => write!(f, "unterminated string"),
            Self::UnexpectedToken => write!(f, "unexpected token"),
            Self::MissingToken => write!(f, "missing token"),
            Self::UnbalancedDelimiter => write!(f, "unbalanced delimiter"),
            Self::TypeError => write!(f, "type error"),
            Self::ArityError => write!(f, "wrong number of arguments"),
            Self::UndefinedVariable => write!(f, "undefined variable"),
            Self::UnknownCommand => write!(f, "unknown command"),
            Self::ArithmeticError => write!(f, "arithmetic error"),
            Self::Geometry => write!(f, "geometry error"),
            Self::UnfinishedStroke => write!(f, "unfinished stroke"),
            Self::Internal => write!(f, "internal error"),
        }
    }
}

/// Convenience type alias for results using [`InterpreterError`].
pub type InterpResult<T> = Result<T, InterpreterError>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = InterpreterError::new(ErrorKind::MissingToken, "expected `;`")
            .with_span(Span::new(10, 11));
        assert_eq!(err.to_string(), "[10..11] expected `;`");
    }

    #[test]
    fn error_without_span() {
        let err = InterpreterError::new(ErrorKind::ArithmeticError, "division by zero");
        let s = err.to_string();
        assert!(!s.contains('['), "should not have span: {s}");
        assert_eq!(err.severity, Severity::Error);
    }

    #[test]
    fn warning_severity() {
        let err = InterpreterError::new(ErrorKind::UnfinishedStroke, "pen still down")
            .with_severity(Severity::Warning);
        assert_eq!(err.severity, Severity::Warning);
        assert_eq!(err.to_string(), "pen still down");
        assert_eq!(err.kind.to_string(), "unfinished stroke");
    }

    #[test]
    fn from_scan_error_keeps_span() {
        let err: InterpreterError = ScanError {
            kind: ScanErrorKind::UnterminatedString,
            message: "unterminated string literal".into(),
            span: Span::new(0, 4),
        }
        .into();
        assert_eq!(err.kind, ErrorKind::UnterminatedString);
        assert_eq!(err.span, Some(Span::new(0, 4)));
    }

    #[test]
    fn from_geometry_error() {
        let err: InterpreterError = GeometryError::InvalidCapFacets(3).into();
        assert_eq!(err.kind, ErrorKind::Geometry);
        assert!(err.message.contains("end_cap_sides"), "{}", err.message);
        assert!(err.span.is_none());
    }
}
