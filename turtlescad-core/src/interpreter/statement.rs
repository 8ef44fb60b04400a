//! Statement execution.
//!
//! Handles `let`, assignment, `repeat`, `wrap`, and expression statements
//! (which is how commands like `forward(10);` run).

use tracing::trace;

use super::Interpreter;
use super::helpers::{repeat_count, value_to_string};
use crate::command::{Builtin, constant, is_keyword};
use crate::error::{ErrorKind, InterpResult, InterpreterError};
use crate::token::Span;

impl Interpreter {
    /// Execute one statement, including its terminator.
    pub(super) fn do_statement(&mut self) -> InterpResult<()> {
        let tok = self.cur();

        if tok.kind.is_sym(";") {
            self.advance();
            return Ok(());
        }
        if tok.kind.is_sym("}") {
            return Err(InterpreterError::new(
                ErrorKind::UnbalancedDelimiter,
                "unmatched `}`",
            )
            .with_span(tok.span));
        }

        if self.at_sym("let") {
            return self.do_let();
        }
        if self.at_sym("repeat") {
            return self.do_repeat();
        }
        if self.at_sym("wrap") {
            return self.do_wrap();
        }
        if self.cur().kind.as_ident().is_some() && self.peek().kind.is_sym("=") {
            return self.do_assignment();
        }

        self.scan_expression()?;
        self.finish_statement()
    }

    /// Accept the `;` ending a simple statement.
    ///
    /// The semicolon may be left out before `}` or at end of input.
    fn finish_statement(&mut self) -> InterpResult<()> {
        if self.at_sym(";") {
            self.advance();
            Ok(())
        } else if self.at_sym("}") || self.cur().kind.is_eof() {
            Ok(())
        } else {
            let tok = self.cur();
            Err(InterpreterError::new(
                ErrorKind::MissingToken,
                format!("expected `;`, found {}", tok.kind),
            )
            .with_span(tok.span))
        }
    }

    /// `let name = expr;`
    fn do_let(&mut self) -> InterpResult<()> {
        self.expect_sym("let")?;
        let (name, span) = self.expect_ident()?;
        check_bindable(&name, span)?;
        self.expect_sym("=")?;
        let value = self.scan_expression()?;
        trace!(name = %name, value = %value, "let");
        self.variables.insert(name, value);
        self.finish_statement()
    }

    /// `name = expr;` for a name declared earlier with `let`.
    fn do_assignment(&mut self) -> InterpResult<()> {
        let (name, span) = self.expect_ident()?;
        check_bindable(&name, span)?;
        if !self.variables.contains_key(&name) {
            return Err(InterpreterError::new(
                ErrorKind::UndefinedVariable,
                format!("assignment to undeclared variable `{name}`; declare it with `let`"),
            )
            .with_span(span));
        }
        self.expect_sym("=")?;
        let value = self.scan_expression()?;
        trace!(name = %name, value = %value, "assign");
        self.variables.insert(name, value);
        self.finish_statement()
    }

    /// `repeat (count) { ... }`
    fn do_repeat(&mut self) -> InterpResult<()> {
        let keyword = self.expect_sym("repeat")?;
        self.expect_sym("(")?;
        let value = self.scan_expression()?;
        let close = self.expect_sym(")")?;
        let count = repeat_count(&value).map_err(|e| e.with_span(keyword.to(close)))?;

        let (body_start, body_end) = self.scan_block_bounds()?;
        trace!(count, "repeat");
        for _ in 0..count {
            self.pos = body_start;
            self.run_block(body_end)?;
        }
        self.pos = body_end;
        self.advance();
        Ok(())
    }

    /// `wrap("text") { ... }`
    fn do_wrap(&mut self) -> InterpResult<()> {
        let keyword = self.expect_sym("wrap")?;
        self.expect_sym("(")?;
        let value = self.scan_expression()?;
        let close = self.expect_sym(")")?;
        let wrapper = value_to_string(&value).map_err(|e| e.with_span(keyword.to(close)))?;

        let (body_start, body_end) = self.scan_block_bounds()?;
        trace!(wrapper = %wrapper, "wrap");
        self.drawing.begin_block(wrapper);
        self.pos = body_start;
        self.run_block(body_end)?;
        self.drawing.end_block();
        self.pos = body_end;
        self.advance();
        Ok(())
    }

    /// Expect a `{` at the cursor and locate its `}`.
    ///
    /// Returns the index of the first body token and of the closing brace.
    fn scan_block_bounds(&mut self) -> InterpResult<(usize, usize)> {
        let open = self.pos;
        self.expect_sym("{")?;
        let end = self.find_block_end(open)?;
        Ok((open + 1, end))
    }

    /// Execute statements until the cursor reaches `end`.
    fn run_block(&mut self, end: usize) -> InterpResult<()> {
        while self.pos < end {
            self.do_statement()?;
        }
        Ok(())
    }
}

/// Reject names that `let` and assignment cannot bind.
fn check_bindable(name: &str, span: Span) -> InterpResult<()> {
    let reason = if is_keyword(name) {
        "is a keyword"
    } else if Builtin::lookup(name).is_some() {
        "is a built-in command"
    } else if constant(name).is_some() {
        "is a constant"
    } else {
        return Ok(());
    };
    Err(
        InterpreterError::new(ErrorKind::UnexpectedToken, format!("`{name}` {reason}"))
            .with_span(span),
    )
}
