//! Built-in names of the turtle script language.
//!
//! Every callable name maps to a [`Builtin`]. Several names may map to the
//! same builtin (`pd`, `down` and `pendown` are one command). Keywords that
//! introduce statements are listed separately in [`KEYWORDS`] and can never
//! be used as variable names.

// ---------------------------------------------------------------------------
// Builtins
// ---------------------------------------------------------------------------

/// A callable primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    // -- Turtle commands --
    PenDown,
    PenUp,
    /// `pensize(w)` sets the pen width; `pensize()` returns it.
    PenSize,
    /// `end_cap_sides(n)` sets the cap facet count; `end_cap_sides()` returns it.
    EndCapSides,
    Forward,
    Left,
    Right,
    SetPos,
    Heading,

    // -- Numeric functions (angles in degrees) --
    Sqrt,
    Abs,
    Sind,
    Cosd,
    /// `atan2d(y, x)`.
    Atan2d,
    Floor,
    Min,
    Max,
}

/// Accepted argument counts for a builtin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    /// Zero arguments (query) or one (set).
    Optional,
    AtLeast(usize),
}

impl Arity {
    #[must_use]
    pub const fn accepts(self, n: usize) -> bool {
        match self {
            Self::Exact(k) => n == k,
            Self::Optional => n <= 1,
            Self::AtLeast(k) => n >= k,
        }
    }
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact(1) => write!(f, "1 argument"),
            Self::Exact(k) => write!(f, "{k} arguments"),
            Self::Optional => write!(f, "0 or 1 arguments"),
            Self::AtLeast(k) => write!(f, "at least {k} arguments"),
        }
    }
}

impl Builtin {
    /// Look up a callable name, including aliases.
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        PRIMITIVES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, builtin)| builtin)
    }

    #[must_use]
    pub const fn arity(self) -> Arity {
        match self {
            Self::PenDown | Self::PenUp | Self::Heading => Arity::Exact(0),
            Self::PenSize | Self::EndCapSides => Arity::Optional,
            Self::Forward
            | Self::Left
            | Self::Right
            | Self::Sqrt
            | Self::Abs
            | Self::Sind
            | Self::Cosd
            | Self::Floor => Arity::Exact(1),
            Self::SetPos | Self::Atan2d => Arity::Exact(2),
            Self::Min | Self::Max => Arity::AtLeast(1),
        }
    }

    /// Whether this builtin acts on the turtle rather than computing a number.
    #[must_use]
    pub const fn is_turtle_command(self) -> bool {
        matches!(
            self,
            Self::PenDown
                | Self::PenUp
                | Self::PenSize
                | Self::EndCapSides
                | Self::Forward
                | Self::Left
                | Self::Right
                | Self::SetPos
                | Self::Heading
        )
    }
}

/// All callable names.
pub const PRIMITIVES: &[(&str, Builtin)] = &[
    ("pendown", Builtin::PenDown),
    ("pd", Builtin::PenDown),
    ("down", Builtin::PenDown),
    ("penup", Builtin::PenUp),
    ("pu", Builtin::PenUp),
    ("up", Builtin::PenUp),
    ("pensize", Builtin::PenSize),
    ("width", Builtin::PenSize),
    ("end_cap_sides", Builtin::EndCapSides),
    ("forward", Builtin::Forward),
    ("left", Builtin::Left),
    ("lt", Builtin::Left),
    ("right", Builtin::Right),
    ("rt", Builtin::Right),
    ("setpos", Builtin::SetPos),
    ("setposition", Builtin::SetPos),
    ("heading", Builtin::Heading),
    ("sqrt", Builtin::Sqrt),
    ("abs", Builtin::Abs),
    ("sind", Builtin::Sind),
    ("cosd", Builtin::Cosd),
    ("atan2d", Builtin::Atan2d),
    ("floor", Builtin::Floor),
    ("min", Builtin::Min),
    ("max", Builtin::Max),
];

// ---------------------------------------------------------------------------
// Keywords
// ---------------------------------------------------------------------------

/// Statement keywords.
pub const KEYWORDS: &[&str] = &["let", "repeat", "wrap"];

/// Named numeric constants.
pub const CONSTANTS: &[(&str, f64)] = &[("PI", std::f64::consts::PI)];

#[must_use]
pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

#[must_use]
pub fn constant(name: &str) -> Option<f64> {
    CONSTANTS.iter().find(|(n, _)| *n == name).map(|&(_, v)| v)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
