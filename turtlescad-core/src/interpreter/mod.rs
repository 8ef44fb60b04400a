//! The turtle script interpreter.
//!
//! Scripts are interpreted directly from the token stream: statements are
//! executed as they are parsed, with no intermediate AST. A `repeat` body is
//! executed by rewinding the token cursor to the start of the block.
//!
//! # Expression hierarchy
//!
//! - `scan_primary`: literals, names, calls, parentheses, unary `+`/`-`
//! - `scan_term`: `*`, `/`, `%`
//! - `scan_expression`: `+`, `-`
//!
//! The interpreter never touches turtle state directly; every drawing
//! effect goes through [`TurtleCommands`], and finished outlines are
//! collected into a [`Drawing`].

mod builtins;
mod expr;
pub(crate) mod helpers;
mod statement;

use std::collections::HashMap;

use tracing::debug;
use turtlescad_geometry::drawing::Drawing;
use turtlescad_geometry::turtle::{Turtle, TurtleCommands, TurtleOptions};

use crate::error::{ErrorKind, InterpResult, InterpreterError, Severity};
use crate::scanner::Scanner;
use crate::token::{Span, Token, TokenKind};
use crate::types::Value;

// ---------------------------------------------------------------------------
// Interpreter state
// ---------------------------------------------------------------------------

/// The turtle script interpreter.
pub struct Interpreter {
    /// Turtle receiving drawing commands.
    turtle: Box<dyn TurtleCommands + Send>,
    /// Variables declared with `let`.
    variables: HashMap<String, Value>,
    /// Output polygons and wrapper brackets.
    drawing: Drawing,
    /// Tokens of the script being run (always ends with `Eof`).
    tokens: Vec<Token>,
    /// Index of the current token.
    pos: usize,
    /// Non-fatal diagnostics from all runs so far.
    diagnostics: Vec<InterpreterError>,
}

impl Interpreter {
    /// Create an interpreter driving a fresh [`Turtle`].
    ///
    /// # Errors
    ///
    /// Returns a geometry error if `options` holds an invalid pen width or
    /// cap facet count.
    pub fn new(options: TurtleOptions) -> InterpResult<Self> {
        Ok(Self::with_turtle(Box::new(Turtle::new(options)?)))
    }

    /// Create an interpreter driving the given turtle.
    #[must_use]
    pub fn with_turtle(turtle: Box<dyn TurtleCommands + Send>) -> Self {
        Self {
            turtle,
            variables: HashMap::new(),
            drawing: Drawing::new(),
            tokens: vec![Token {
                kind: TokenKind::Eof,
                span: Span::at(0),
            }],
            pos: 0,
            diagnostics: Vec::new(),
        }
    }

    /// Run a script.
    ///
    /// Turtle state, variables and the drawing carry over between calls.
    ///
    /// # Errors
    ///
    /// Returns the first scan error, or the first error raised while
    /// executing. Execution stops at the first error; polygons finished
    /// before it stay in the drawing. A script that ends with the pen down
    /// succeeds but leaves a warning in [`Self::diagnostics`].
    pub fn run(&mut self, source: &str) -> InterpResult<()> {
        let mut scanner = Scanner::new(source);
        let tokens = scanner.scan_all();
        if let Some(err) = scanner.take_errors().into_iter().next() {
            return Err(err.into());
        }

        self.tokens = tokens;
        self.pos = 0;

        while !self.cur().kind.is_eof() {
            self.do_statement()?;
        }

        if self.turtle.is_pen_down() {
            debug!("script ended with the pen down");
            self.diagnostics.push(
                InterpreterError::new(
                    ErrorKind::UnfinishedStroke,
                    "script ended with the pen down; the unfinished stroke is not drawn",
                )
                .with_severity(Severity::Warning),
            );
        }
        debug!(
            polygons = self.drawing.polygons().count(),
            "script finished"
        );
        Ok(())
    }

    /// The drawing built so far.
    #[must_use]
    pub const fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    /// Consume the interpreter and return its drawing.
    #[must_use]
    pub fn into_drawing(self) -> Drawing {
        self.drawing
    }

    /// Warnings collected while running, oldest first.
    #[must_use]
    pub fn diagnostics(&self) -> &[InterpreterError] {
        &self.diagnostics
    }

    /// The turtle being driven.
    #[must_use]
    pub fn turtle(&self) -> &dyn TurtleCommands {
        &*self.turtle
    }

    /// Look up a variable declared with `let`.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    // -----------------------------------------------------------------------
    // Token cursor
    // -----------------------------------------------------------------------

    fn cur(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn peek(&self) -> &Token {
        &self.tokens[(self.pos + 1).min(self.tokens.len() - 1)]
    }

    /// Move to the next token. Stays on `Eof`.
    fn advance(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn at_sym(&self, name: &str) -> bool {
        self.cur().kind.is_sym(name)
    }

    /// Consume the given punctuation or keyword, returning its span.
    fn expect_sym(&mut self, name: &str) -> InterpResult<Span> {
        if self.at_sym(name) {
            let span = self.cur().span;
            self.advance();
            Ok(span)
        } else {
            let tok = self.cur();
            Err(InterpreterError::new(
                ErrorKind::MissingToken,
                format!("expected `{name}`, found {}", tok.kind),
            )
            .with_span(tok.span))
        }
    }

    /// Consume an identifier, returning its name and span.
    fn expect_ident(&mut self) -> InterpResult<(String, Span)> {
        let tok = self.cur();
        if let Some(name) = tok.kind.as_ident() {
            let result = (name.to_owned(), tok.span);
            self.advance();
            Ok(result)
        } else {
            Err(InterpreterError::new(
                ErrorKind::UnexpectedToken,
                format!("expected a name, found {}", tok.kind),
            )
            .with_span(tok.span))
        }
    }

    /// Index of the `}` closing the `{` at `open`.
    fn find_block_end(&self, open: usize) -> InterpResult<usize> {
        let mut depth = 0usize;
        for (i, tok) in self.tokens.iter().enumerate().skip(open) {
            match &tok.kind {
                TokenKind::Symbolic(s) if s == "{" => depth += 1,
                TokenKind::Symbolic(s) if s == "}" => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(i);
                    }
                }
                TokenKind::Eof => break,
                _ => {}
            }
        }
        Err(InterpreterError::new(
            ErrorKind::UnbalancedDelimiter,
            "unterminated block: missing `}`",
        )
        .with_span(self.tokens[open].span))
    }
}
