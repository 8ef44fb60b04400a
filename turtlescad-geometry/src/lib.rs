//! Geometry core for turtlescad: turtle state tracking and stroke outlining.

pub mod drawing;
pub mod error;
pub mod math;
pub mod outline;
pub mod turtle;
pub mod types;

pub use error::{GeometryError, GeometryResult};
