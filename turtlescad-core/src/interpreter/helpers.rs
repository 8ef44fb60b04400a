//! Value extraction and conversion helpers.
//!
//! Free functions used across all interpreter submodules.

use std::sync::Arc;

use turtlescad_geometry::types::Scalar;

use crate::error::{ErrorKind, InterpResult, InterpreterError};
use crate::types::Value;

pub(super) fn value_to_scalar(val: &Value) -> InterpResult<Scalar> {
    val.as_numeric().ok_or_else(|| {
        InterpreterError::new(
            ErrorKind::TypeError,
            format!("Expected numeric, got {}", val.ty()),
        )
    })
}

pub(super) fn value_to_string(val: &Value) -> InterpResult<Arc<str>> {
    match val {
        Value::String(s) => Ok(Arc::clone(s)),
        _ => Err(InterpreterError::new(
            ErrorKind::TypeError,
            format!("Expected string, got {}", val.ty()),
        )),
    }
}

/// Iteration count for `repeat`: the value rounded down, negative counts
/// treated as zero.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is finite and clamped to zero before the cast"
)]
pub(super) fn repeat_count(val: &Value) -> InterpResult<u64> {
    let v = value_to_scalar(val)?;
    if !v.is_finite() {
        return Err(InterpreterError::new(
            ErrorKind::ArithmeticError,
            format!("repeat count must be finite, got {v}"),
        ));
    }
    Ok(v.floor().max(0.0) as u64)
}

/// Integer part of a numeric argument, truncated toward zero.
///
/// Out-of-range values saturate and NaN becomes 0; facet validation then
/// rejects them.
#[expect(
    clippy::cast_possible_truncation,
    reason = "float-to-int casts saturate"
)]
pub(super) fn scalar_to_int(v: Scalar) -> i64 {
    v.trunc() as i64
}

/// Reject NaN and infinities produced by an operator or numeric function.
pub(super) fn check_finite(name: &str, v: Scalar) -> InterpResult<Scalar> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(InterpreterError::new(
            ErrorKind::ArithmeticError,
            format!("`{name}` produced a non-finite result"),
        ))
    }
}
