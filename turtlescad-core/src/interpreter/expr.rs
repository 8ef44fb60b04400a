//! Expression parsing and evaluation.
//!
//! Expressions are evaluated while they are parsed. Each level returns the
//! value it computed and leaves the cursor on the first token it did not
//! consume.

use std::sync::Arc;

use turtlescad_geometry::types::Scalar;

use super::Interpreter;
use super::helpers::check_finite;
use crate::command::{Builtin, constant, is_keyword};
use crate::error::{ErrorKind, InterpResult, InterpreterError};
use crate::token::{Span, TokenKind};
use crate::types::Value;

/// A binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl BinaryOp {
    const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
        }
    }

    #[allow(clippy::float_cmp)]
    fn apply(self, a: Scalar, b: Scalar) -> InterpResult<Scalar> {
        match self {
            Self::Add => Ok(a + b),
            Self::Sub => Ok(a - b),
            Self::Mul => Ok(a * b),
            Self::Div | Self::Rem if b == 0.0 => Err(InterpreterError::new(
                ErrorKind::ArithmeticError,
                "division by zero",
            )),
            Self::Div => Ok(a / b),
            Self::Rem => Ok(a % b),
        }
    }
}

impl Interpreter {
    // -----------------------------------------------------------------------
    // Precedence levels
    // -----------------------------------------------------------------------

    /// Additive level: `term (('+' | '-') term)*`.
    pub(super) fn scan_expression(&mut self) -> InterpResult<Value> {
        let start = self.cur().span;
        let mut lhs = self.scan_term()?;
        loop {
            let op = if self.at_sym("+") {
                BinaryOp::Add
            } else if self.at_sym("-") {
                BinaryOp::Sub
            } else {
                return Ok(lhs);
            };
            self.advance();
            let rhs = self.scan_term()?;
            lhs = self.binary(op, &lhs, &rhs, start)?;
        }
    }

    /// Multiplicative level: `unary (('*' | '/' | '%') unary)*`.
    fn scan_term(&mut self) -> InterpResult<Value> {
        let start = self.cur().span;
        let mut lhs = self.scan_unary()?;
        loop {
            let op = if self.at_sym("*") {
                BinaryOp::Mul
            } else if self.at_sym("/") {
                BinaryOp::Div
            } else if self.at_sym("%") {
                BinaryOp::Rem
            } else {
                return Ok(lhs);
            };
            self.advance();
            let rhs = self.scan_unary()?;
            lhs = self.binary(op, &lhs, &rhs, start)?;
        }
    }

    /// Unary `+`/`-` prefixes.
    fn scan_unary(&mut self) -> InterpResult<Value> {
        if self.at_sym("-") || self.at_sym("+") {
            let negate = self.at_sym("-");
            let span = self.cur().span;
            self.advance();
            let operand = self.scan_unary()?;
            let Value::Numeric(v) = operand else {
                return Err(InterpreterError::new(
                    ErrorKind::TypeError,
                    format!("unary operator needs a numeric operand, got {}", operand.ty()),
                )
                .with_span(span));
            };
            return Ok(Value::Numeric(if negate { -v } else { v }));
        }
        self.scan_primary()
    }

    /// Literals, names, calls and parenthesized expressions.
    fn scan_primary(&mut self) -> InterpResult<Value> {
        let tok = self.cur().clone();
        match &tok.kind {
            TokenKind::Numeric(v) => {
                self.advance();
                check_finite("number", *v)
                    .map(Value::Numeric)
                    .map_err(|e| e.with_span(tok.span))
            }
            TokenKind::StringLit(s) => {
                self.advance();
                Ok(Value::String(Arc::from(s.as_str())))
            }
            TokenKind::Symbolic(s) if s == "(" => {
                self.advance();
                let value = self.scan_expression()?;
                self.expect_sym(")")?;
                Ok(value)
            }
            TokenKind::Symbolic(s) if tok.kind.as_ident().is_some() && !is_keyword(s) => {
                self.advance();
                if self.at_sym("(") {
                    self.scan_call(s, tok.span)
                } else {
                    self.lookup_name(s, tok.span)
                }
            }
            _ => Err(InterpreterError::new(
                ErrorKind::UnexpectedToken,
                format!("expected an expression, found {}", tok.kind),
            )
            .with_span(tok.span)),
        }
    }

    // -----------------------------------------------------------------------
    // Names and calls
    // -----------------------------------------------------------------------

    fn lookup_name(&self, name: &str, span: Span) -> InterpResult<Value> {
        if let Some(value) = self.variables.get(name) {
            return Ok(value.clone());
        }
        if let Some(v) = constant(name) {
            return Ok(Value::Numeric(v));
        }
        let message = if Builtin::lookup(name).is_some() {
            format!("`{name}` is a command; call it as `{name}(...)`")
        } else {
            format!("undefined variable `{name}`")
        };
        Err(InterpreterError::new(ErrorKind::UndefinedVariable, message).with_span(span))
    }

    /// Parse `( args )` after a callable name and invoke it.
    fn scan_call(&mut self, name: &str, name_span: Span) -> InterpResult<Value> {
        let Some(builtin) = Builtin::lookup(name) else {
            return Err(InterpreterError::new(
                ErrorKind::UnknownCommand,
                format!("unknown command `{name}`"),
            )
            .with_span(name_span));
        };

        self.expect_sym("(")?;
        let mut args = Vec::new();
        if !self.at_sym(")") {
            loop {
                args.push(self.scan_expression()?);
                if self.at_sym(",") {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        let close = self.expect_sym(")")?;
        let span = name_span.to(close);

        let arity = builtin.arity();
        if !arity.accepts(args.len()) {
            return Err(InterpreterError::new(
                ErrorKind::ArityError,
                format!("`{name}` expects {arity}, got {}", args.len()),
            )
            .with_span(span));
        }

        self.call_builtin(builtin, name, &args)
            .map_err(|e| if e.span.is_some() { e } else { e.with_span(span) })
    }

    fn binary(&self, op: BinaryOp, lhs: &Value, rhs: &Value, start: Span) -> InterpResult<Value> {
        let span = start.to(self.tokens[self.pos.saturating_sub(1)].span);
        match (lhs, rhs) {
            (Value::Numeric(a), Value::Numeric(b)) => op
                .apply(*a, *b)
                .and_then(|v| check_finite(op.symbol(), v))
                .map(Value::Numeric)
                .map_err(|e| e.with_span(span)),
            _ => Err(InterpreterError::new(
                ErrorKind::TypeError,
                format!(
                    "`{}` needs numeric operands, got {} and {}",
                    op.symbol(),
                    lhs.ty(),
                    rhs.ty()
                ),
            )
            .with_span(span)),
        }
    }
}
