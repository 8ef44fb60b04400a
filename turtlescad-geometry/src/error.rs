use crate::types::Scalar;

/// Errors returned by turtle and outline operations.
///
/// All of them are fatal for the conversion that raised them.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// End caps need an even facet count of at least 2.
    #[error("invalid end_cap_sides value: {0}")]
    InvalidCapFacets(i64),
    /// Pen widths must be finite and positive.
    #[error("invalid pen width: {0}")]
    InvalidPenWidth(Scalar),
    /// A finished stroke path whose point and heading counts disagree.
    #[error("bad stroke path: points={points} headings={headings}")]
    InconsistentPath { points: usize, headings: usize },
}

/// Convenience alias for results using [`GeometryError`].
pub type GeometryResult<T> = Result<T, GeometryError>;
