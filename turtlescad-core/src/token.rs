//! Token types for the turtle script scanner.
//!
//! The scanner produces three kinds of tokens:
//! - **Symbolic**: identifiers and punctuation, looked up by name
//! - **Numeric**: floating-point constants (always non-negative; `-` is a
//!   separate token)
//! - **String**: text delimited by `"..."` (no escape sequences)
//!
//! Whether a symbolic token is a keyword, a command, or a variable is decided
//! by the interpreter, not the scanner.

use turtlescad_geometry::types::Scalar;

// ---------------------------------------------------------------------------
// Source location
// ---------------------------------------------------------------------------

/// A byte-offset span in the source input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl Span {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// A zero-length span at the given position.
    #[must_use]
    pub const fn at(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// The smallest span covering both `self` and `other`.
    #[must_use]
    pub const fn to(self, other: Self) -> Self {
        let start = if self.start < other.start {
            self.start
        } else {
            other.start
        };
        let end = if self.end > other.end {
            self.end
        } else {
            other.end
        };
        Self { start, end }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

// ---------------------------------------------------------------------------
// Token
// ---------------------------------------------------------------------------

/// A lexical token produced by the scanner.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// The kind and payload of a token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// An identifier or a single punctuation character.
    Symbolic(String),

    /// A non-negative numeric constant.
    ///
    /// `-3` is the unary minus operator applied to `3`.
    Numeric(Scalar),

    /// A string literal delimited by `"..."`.
    StringLit(String),

    /// End of input.
    Eof,
}

impl TokenKind {
    /// Returns `true` if this is a symbolic token with the given name.
    #[must_use]
    pub fn is_sym(&self, name: &str) -> bool {
        matches!(self, Self::Symbolic(s) if s == name)
    }

    /// Returns the name if this symbolic token is an identifier rather than
    /// punctuation.
    #[must_use]
    pub fn as_ident(&self) -> Option<&str> {
        match self {
            Self::Symbolic(s)
                if s
                    .bytes()
                    .next()
                    .is_some_and(|b| b.is_ascii_alphabetic() || b == b'_') =>
            {
                Some(s.as_str())
            }
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::Eof)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Symbolic(s) => write!(f, "`{s}`"),
            Self::Numeric(v) => write!(f, "number {v}"),
            Self::StringLit(s) => write!(f, "string \"{s}\""),
            Self::Eof => write!(f, "end of input"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_basics() {
        let s = Span::new(10, 20);
        assert_eq!(s.len(), 10);
        assert!(!s.is_empty());
        assert!(Span::at(5).is_empty());
    }

    #[test]
    fn span_join() {
        assert_eq!(Span::new(4, 6).to(Span::new(10, 12)), Span::new(4, 12));
        assert_eq!(Span::new(10, 12).to(Span::new(4, 6)), Span::new(4, 12));
    }

    #[test]
    fn ident_detection() {
        assert_eq!(TokenKind::Symbolic("forward".into()).as_ident(), Some("forward"));
        assert_eq!(TokenKind::Symbolic("_x1".into()).as_ident(), Some("_x1"));
        assert_eq!(TokenKind::Symbolic("(".into()).as_ident(), None);
        assert_eq!(TokenKind::Numeric(1.0).as_ident(), None);
    }

    #[test]
    fn display_for_messages() {
        assert_eq!(TokenKind::Symbolic(";".into()).to_string(), "`;`");
        assert_eq!(TokenKind::Eof.to_string(), "end of input");
    }
}
