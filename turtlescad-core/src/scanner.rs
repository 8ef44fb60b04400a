//! Lexical scanner for turtle scripts.
//!
//! Characters are grouped into classes. Letters start identifiers (which may
//! continue with digits), digits start numbers, and every punctuation
//! character is an isolated single-character token.
//!
//! # Token production rules
//!
//! | Input                  | Token produced                         |
//! |------------------------|----------------------------------------|
//! | `123`, `3.14`, `.5`    | `Numeric(value)`                       |
//! | `"union()"`            | `StringLit("union()")`                 |
//! | `forward`, `x_1`       | `Symbolic("forward")`, `Symbolic("x_1")` |
//! | `( ) { } , ; =`        | `Symbolic("(")`, etc.                  |
//! | `+ - * / %`            | `Symbolic("+")`, etc.                  |
//! | `// comment`           | Skipped to end of line                 |
//! | `#!...` on line 1      | Skipped                                |
//! | end of input           | `Eof`                                  |

use crate::token::{Span, Token, TokenKind};

// ---------------------------------------------------------------------------
// Character classes
// ---------------------------------------------------------------------------

const fn char_class(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => DIGIT,
        b'.' => PERIOD,
        b' ' | b'\t' | b'\r' | b'\n' | 0x0C => SPACE,
        b'/' => SLASH,
        b'"' => STRING_DELIM,
        b'A'..=b'Z' | b'a'..=b'z' | b'_' => LETTER,
        b'(' | b')' | b'{' | b'}' | b',' | b';' | b'=' | b'+' | b'-' | b'*' | b'%' => PUNCT,
        _ => INVALID,
    }
}

const DIGIT: u8 = 0;
const PERIOD: u8 = 1;
const SPACE: u8 = 2;
const SLASH: u8 = 3;
const STRING_DELIM: u8 = 4;
const LETTER: u8 = 5;
const PUNCT: u8 = 6;
const INVALID: u8 = 7;

// ---------------------------------------------------------------------------
// Scanner error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanErrorKind {
    InvalidCharacter,
    UnterminatedString,
}

/// An error encountered during scanning.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("scan error at {}-{}: {}", .span.start, .span.end, .message)]
pub struct ScanError {
    pub kind: ScanErrorKind,
    pub message: String,
    pub span: Span,
}

// ---------------------------------------------------------------------------
// Scanner
// ---------------------------------------------------------------------------

/// Lexical scanner for turtle scripts.
pub struct Scanner<'a> {
    src: &'a [u8],
    pos: usize,
    /// Accumulated errors (non-fatal).
    errors: Vec<ScanError>,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner over the given source string.
    ///
    /// A `#!` interpreter line at the very start is skipped.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        let src = source.as_bytes();
        let pos = if src.starts_with(b"#!") {
            src.iter().position(|&b| b == b'\n').unwrap_or(src.len())
        } else {
            0
        };
        Self {
            src,
            pos,
            errors: Vec::new(),
        }
    }

    /// Scan the next token.
    pub fn next_token(&mut self) -> Token {
        loop {
            self.skip_whitespace_and_comments();

            if self.pos >= self.src.len() {
                return Token {
                    kind: TokenKind::Eof,
                    span: Span::at(self.pos),
                };
            }

            let start = self.pos;
            let c = self.src[self.pos];

            match char_class(c) {
                DIGIT => return self.scan_number(start),
                PERIOD if self.peek_class(1) == Some(DIGIT) => return self.scan_number(start),
                STRING_DELIM => return self.scan_string(start),
                LETTER => return self.scan_ident(start),
                PUNCT | SLASH => {
                    self.pos += 1;
                    return self.symbolic(start);
                }
                _ => {
                    let ch = source_char(self.src, start);
                    self.pos += ch.len_utf8();
                    self.errors.push(ScanError {
                        kind: ScanErrorKind::InvalidCharacter,
                        message: format!("invalid character `{}`", ch.escape_default()),
                        span: Span::new(start, self.pos),
                    });
                }
            }
        }
    }

    /// Scan all remaining tokens (including `Eof`).
    pub fn scan_all(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token();
            let is_eof = tok.kind.is_eof();
            tokens.push(tok);
            if is_eof {
                break;
            }
        }
        tokens
    }

    #[must_use]
    pub fn errors(&self) -> &[ScanError] {
        &self.errors
    }

    /// Drain accumulated scan errors.
    pub fn take_errors(&mut self) -> Vec<ScanError> {
        std::mem::take(&mut self.errors)
    }

    // -- internal helpers --

    fn peek_class(&self, offset: usize) -> Option<u8> {
        self.src.get(self.pos + offset).map(|&b| char_class(b))
    }

    /// Skip whitespace and `//` comments.
    fn skip_whitespace_and_comments(&mut self) {
        while self.pos < self.src.len() {
            let class = char_class(self.src[self.pos]);

            if class == SPACE {
                self.pos += 1;
            } else if class == SLASH && self.peek_class(1) == Some(SLASH) {
                while self.pos < self.src.len() && self.src[self.pos] != b'\n' {
                    self.pos += 1;
                }
            } else {
                break;
            }
        }
    }

    /// Scan a numeric token: digits with an optional fraction, or a fraction
    /// with no integer part.
    fn scan_number(&mut self, start: usize) -> Token {
        while self.peek_class(0) == Some(DIGIT) {
            self.pos += 1;
        }

        if self.peek_class(0) == Some(PERIOD) && self.peek_class(1) == Some(DIGIT) {
            self.pos += 1;
            while self.peek_class(0) == Some(DIGIT) {
                self.pos += 1;
            }
        }

        // Only ASCII digits and at most one '.' were consumed.
        let text = std::str::from_utf8(&self.src[start..self.pos]).unwrap_or("0");
        let value = text.parse::<f64>().unwrap_or(0.0);

        Token {
            kind: TokenKind::Numeric(value),
            span: Span::new(start, self.pos),
        }
    }

    /// Scan a string literal. The opening `"` is at `start`.
    fn scan_string(&mut self, start: usize) -> Token {
        self.pos += 1;

        let content_start = self.pos;
        while self.pos < self.src.len() && self.src[self.pos] != b'"' && self.src[self.pos] != b'\n'
        {
            self.pos += 1;
        }

        let content = &self.src[content_start..self.pos];

        if self.pos < self.src.len() && self.src[self.pos] == b'"' {
            self.pos += 1;
        } else {
            self.errors.push(ScanError {
                kind: ScanErrorKind::UnterminatedString,
                message: "unterminated string literal".into(),
                span: Span::new(start, self.pos),
            });
        }

        Token {
            kind: TokenKind::StringLit(String::from_utf8_lossy(content).into_owned()),
            span: Span::new(start, self.pos),
        }
    }

    /// Scan an identifier: a letter or `_` followed by letters, digits and
    /// underscores.
    fn scan_ident(&mut self, start: usize) -> Token {
        while matches!(self.peek_class(0), Some(LETTER | DIGIT)) {
            self.pos += 1;
        }
        self.symbolic(start)
    }

    fn symbolic(&self, start: usize) -> Token {
        let text = std::str::from_utf8(&self.src[start..self.pos]).unwrap_or("?");
        Token {
            kind: TokenKind::Symbolic(text.to_owned()),
            span: Span::new(start, self.pos),
        }
    }
}

/// The (possibly multi-byte) character starting at `pos`.
fn source_char(src: &[u8], pos: usize) -> char {
    let end = (pos + 4).min(src.len());
    let tail = match std::str::from_utf8(&src[pos..end]) {
        Ok(s) => s,
        Err(e) => std::str::from_utf8(&src[pos..pos + e.valid_up_to()]).unwrap_or(""),
    };
    tail.chars().next().unwrap_or(char::REPLACEMENT_CHARACTER)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
