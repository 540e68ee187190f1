//! Error types for grid construction, access and element-wise operations.

use alloc::vec::Vec;

use thiserror::Error;

use crate::Shape;

/// Error type for grid operations.
///
/// Arithmetic faults of the element type (integer division by zero, overflow, NaN) are not
/// represented here; they behave exactly as the element type's own operators do.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// A binary operation was attempted between grids of different shapes.
    #[error("cannot {op} a grid of shape {left} with a grid of shape {right}")]
    ShapeMismatch {
        /// Name of the rejected operation.
        op: &'static str,
        /// Shape of the receiver.
        left: Shape,
        /// Shape of the operand.
        right: Shape,
    },

    /// A grid was requested with no axes at all.
    #[error("a grid needs at least one axis")]
    NoAxes,

    /// The product of the extents does not fit in a `usize`.
    #[error("the product of extents {extents:?} overflows usize")]
    SizeOverflow { extents: Vec<usize> },

    /// A flat buffer does not have the length implied by its shape.
    #[error("shape {shape} holds {expected} elements but {found} were supplied")]
    LengthMismatch {
        shape: Shape,
        expected: usize,
        found: usize,
    },

    /// A coordinate has a different number of axes than the grid.
    #[error("coordinate has {found} axes but the grid has {expected}")]
    AxisCountMismatch { expected: usize, found: usize },

    /// A coordinate lies outside the extent of one of its axes.
    #[error("coordinate {coord} is out of range for axis {axis} of extent {extent}")]
    CoordinateOutOfRange {
        axis: usize,
        coord: usize,
        extent: usize,
    },
}

/// Result type alias for grid operations.
pub type GridResult<T> = core::result::Result<T, GridError>;
