//! Runtime values for the turtle script interpreter.
//!
//! Every expression evaluates to a [`Value`]. Scripts only compute with
//! numbers; strings exist to name `wrap` blocks, and commands that return
//! nothing yield [`Value::Vacuous`].

use std::fmt;
use std::sync::Arc;

use turtlescad_geometry::types::Scalar;

/// The type of a [`Value`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    /// No value (result of a drawing command).
    Vacuous,
    Numeric,
    String,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vacuous => write!(f, "vacuous"),
            Self::Numeric => write!(f, "numeric"),
            Self::String => write!(f, "string"),
        }
    }
}

/// A runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Vacuous,
    Numeric(Scalar),
    String(Arc<str>),
}

impl Value {
    #[must_use]
    pub const fn ty(&self) -> Type {
        match self {
            Self::Vacuous => Type::Vacuous,
            Self::Numeric(_) => Type::Numeric,
            Self::String(_) => Type::String,
        }
    }

    #[must_use]
    pub const fn as_numeric(&self) -> Option<Scalar> {
        match self {
            Self::Numeric(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vacuous => write!(f, "vacuous"),
            Self::Numeric(v) => write!(f, "{v}"),
            Self::String(s) => write!(f, "\"{s}\""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_types() {
        assert_eq!(Value::Vacuous.ty(), Type::Vacuous);
        assert_eq!(Value::Numeric(1.5).ty(), Type::Numeric);
        assert_eq!(Value::String("a".into()).ty(), Type::String);
        assert_eq!(Type::Numeric.to_string(), "numeric");
    }

    #[test]
    fn numeric_extraction() {
        assert_eq!(Value::Numeric(2.0).as_numeric(), Some(2.0));
        assert_eq!(Value::String("2".into()).as_numeric(), None);
    }
}
