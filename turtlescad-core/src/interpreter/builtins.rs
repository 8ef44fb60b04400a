//! Built-in command and function dispatch.

use tracing::trace;
use turtlescad_geometry::math::{angle, cosd, sind};
use turtlescad_geometry::turtle::TurnDirection;

use super::Interpreter;
use super::helpers::{check_finite, scalar_to_int, value_to_scalar};
use crate::command::Builtin;
use crate::error::{ErrorKind, InterpResult, InterpreterError};
use crate::types::Value;

impl Interpreter {
    /// Invoke a builtin whose argument count was already checked.
    pub(super) fn call_builtin(
        &mut self,
        builtin: Builtin,
        name: &str,
        args: &[Value],
    ) -> InterpResult<Value> {
        let nums = args
            .iter()
            .map(value_to_scalar)
            .collect::<InterpResult<Vec<_>>>()?;
        if nums.iter().any(|v| !v.is_finite()) {
            return Err(InterpreterError::new(
                ErrorKind::ArithmeticError,
                format!("`{name}` needs finite arguments, got {nums:?}"),
            ));
        }

        if builtin.is_turtle_command() {
            trace!(command = name, args = ?nums, "command");
        }

        let result = match builtin {
            Builtin::PenDown => {
                self.turtle.pen_down();
                return Ok(Value::Vacuous);
            }
            Builtin::PenUp => {
                if let Some(polygon) = self.turtle.pen_up()? {
                    self.drawing.add_polygon(polygon);
                }
                return Ok(Value::Vacuous);
            }
            Builtin::PenSize => match nums.first() {
                None => self.turtle.pen_width(),
                Some(&w) => {
                    self.turtle.set_pen_width(w)?;
                    return Ok(Value::Vacuous);
                }
            },
            Builtin::EndCapSides => match nums.first() {
                None => f64::from(self.turtle.cap_facets()),
                Some(&n) => {
                    self.turtle.set_cap_facets(scalar_to_int(n))?;
                    return Ok(Value::Vacuous);
                }
            },
            Builtin::Forward => {
                self.turtle.forward(nums[0]);
                return Ok(Value::Vacuous);
            }
            Builtin::Left => {
                self.turtle.turn(nums[0], TurnDirection::Left);
                return Ok(Value::Vacuous);
            }
            Builtin::Right => {
                self.turtle.turn(nums[0], TurnDirection::Right);
                return Ok(Value::Vacuous);
            }
            Builtin::SetPos => {
                self.turtle.set_position(nums[0], nums[1]);
                return Ok(Value::Vacuous);
            }
            Builtin::Heading => self.turtle.heading(),

            Builtin::Sqrt => nums[0].sqrt(),
            Builtin::Abs => nums[0].abs(),
            Builtin::Sind => sind(nums[0]),
            Builtin::Cosd => cosd(nums[0]),
            Builtin::Atan2d => angle(nums[1], nums[0]),
            Builtin::Floor => nums[0].floor(),
            Builtin::Min => nums.iter().copied().fold(f64::INFINITY, f64::min),
            Builtin::Max => nums.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        };

        check_finite(name, result).map(Value::Numeric)
    }
}
