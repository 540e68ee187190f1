use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use tracing::debug;

use crate::{GridError, GridResult};

/// The ordered extents of a grid, one per axis.
///
/// A shape always has at least one axis and its element count always fits in a `usize`. Extents
/// may be zero, in which case the shape holds no elements. Storage is row-major: the last axis
/// varies fastest.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Shape {
    extents: Vec<usize>,
}

impl Shape {
    /// Validate `extents`: at least one axis, and every row-major stride and the element count
    /// must fit in a `usize`.
    pub fn new(extents: Vec<usize>) -> GridResult<Self> {
        if extents.is_empty() {
            return Err(GridError::NoAxes);
        }
        if checked_product(&extents).is_none() {
            return Err(GridError::SizeOverflow { extents });
        }
        Ok(Self { extents })
    }

    /// Build a shape from a fixed number of extents.
    ///
    /// # Panics
    /// Panics if `N == 0` or if a stride or the product of the extents overflows `usize`.
    pub(crate) fn from_array<const N: usize>(extents: [usize; N]) -> Self {
        assert!(N > 0, "a grid needs at least one axis");
        assert!(
            checked_product(&extents).is_some(),
            "the product of extents {extents:?} overflows usize"
        );
        Self {
            extents: extents.to_vec(),
        }
    }

    #[must_use]
    pub fn extents(&self) -> &[usize] {
        &self.extents
    }

    #[must_use]
    pub fn num_axes(&self) -> usize {
        self.extents.len()
    }

    /// The number of elements a grid of this shape stores.
    #[must_use]
    pub fn num_elements(&self) -> usize {
        self.extents.iter().product()
    }

    /// Row-major strides: the last axis has stride 1, and each earlier axis strides over the
    /// product of all later extents.
    #[must_use]
    pub fn strides(&self) -> Vec<usize> {
        let mut strides = vec![1; self.extents.len()];
        for axis in (0..self.extents.len() - 1).rev() {
            strides[axis] = strides[axis + 1] * self.extents[axis + 1];
        }
        strides
    }

    /// Convert a multi-axis coordinate into a flat, row-major index.
    pub fn flat_index(&self, coords: &[usize]) -> GridResult<usize> {
        if coords.len() != self.extents.len() {
            return Err(GridError::AxisCountMismatch {
                expected: self.extents.len(),
                found: coords.len(),
            });
        }
        let mut index = 0;
        for (axis, (&coord, &extent)) in coords.iter().zip(&self.extents).enumerate() {
            if coord >= extent {
                return Err(GridError::CoordinateOutOfRange {
                    axis,
                    coord,
                    extent,
                });
            }
            index = index * extent + coord;
        }
        Ok(index)
    }

    /// The inverse of [`Shape::flat_index`]. Returns `None` if `index` is past the last element.
    #[must_use]
    pub fn unravel(&self, mut index: usize) -> Option<Vec<usize>> {
        if index >= self.num_elements() {
            return None;
        }
        let mut coords = vec![0; self.extents.len()];
        for (coord, &extent) in coords.iter_mut().zip(&self.extents).rev() {
            *coord = index % extent;
            index /= extent;
        }
        Some(coords)
    }

    /// Check that `other` is identical to `self`, axis for axis.
    pub fn ensure_same(&self, other: &Self, op: &'static str) -> GridResult<()> {
        if self == other {
            return Ok(());
        }
        debug!(op, left = %self, right = %other, "rejected operation on mismatched shapes");
        Err(GridError::ShapeMismatch {
            op,
            left: self.clone(),
            right: other.clone(),
        })
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (axis, extent) in self.extents.iter().enumerate() {
            if axis > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{extent}")?;
        }
        f.write_str("]")
    }
}

/// The product of `extents`, accumulated from the last axis so that every suffix product (each
/// row-major stride) is checked too. A zero extent does not hide an overflow in later axes.
fn checked_product(extents: &[usize]) -> Option<usize> {
    extents
        .iter()
        .rev()
        .try_fold(1usize, |acc, &extent| acc.checked_mul(extent))
}
