use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::ops::{Index, IndexMut};
use core::slice;

use num_traits::AsPrimitive;
use rand::Rng;
use rand::distr::{Distribution, StandardUniform};
use tracing::instrument;

use crate::{Element, GridError, GridResult, Shape};

/// A dense grid stored in row-major form.
///
/// The shape is fixed at construction. Only the values change afterwards, and the number of
/// values is always `shape.num_elements()`.
#[derive(Clone, Debug, PartialEq)]
pub struct NumericGrid<T> {
    shape: Shape,
    values: Vec<T>,
}

impl<T: Element> NumericGrid<T> {
    /// A zero-filled grid with the given extents.
    pub fn new(extents: Vec<usize>) -> GridResult<Self> {
        Ok(Self::zeroed(Shape::new(extents)?))
    }

    /// A zero-filled two-axis grid. Extents are recorded in argument order, so `height` is the
    /// fastest-varying axis.
    ///
    /// # Panics
    /// Panics if the product of the extents, or any row-major stride, overflows `usize`.
    #[must_use]
    pub fn new_2d(width: usize, height: usize) -> Self {
        Self::zeroed(Shape::from_array([width, height]))
    }

    /// A zero-filled three-axis grid with extents `[width, height, depth]`.
    ///
    /// # Panics
    /// Panics if the product of the extents, or any row-major stride, overflows `usize`.
    #[must_use]
    pub fn new_3d(width: usize, height: usize, depth: usize) -> Self {
        Self::zeroed(Shape::from_array([width, height, depth]))
    }

    /// A zero-filled four-axis grid with extents `[width, height, depth, cube]`.
    ///
    /// # Panics
    /// Panics if the product of the extents, or any row-major stride, overflows `usize`.
    #[must_use]
    pub fn new_4d(width: usize, height: usize, depth: usize, cube: usize) -> Self {
        Self::zeroed(Shape::from_array([width, height, depth, cube]))
    }

    #[must_use]
    pub fn zeroed(shape: Shape) -> Self {
        let values = vec![T::default(); shape.num_elements()];
        Self { shape, values }
    }

    /// A grid of the given shape with every slot set to `scalar`.
    #[must_use]
    pub fn filled<R: AsPrimitive<T>>(shape: Shape, scalar: R) -> Self {
        let values = vec![scalar.as_(); shape.num_elements()];
        Self { shape, values }
    }

    /// Wrap an existing row-major buffer.
    pub fn from_vec(extents: Vec<usize>, values: Vec<T>) -> GridResult<Self> {
        let shape = Shape::new(extents)?;
        let expected = shape.num_elements();
        if values.len() != expected {
            return Err(GridError::LengthMismatch {
                shape,
                expected,
                found: values.len(),
            });
        }
        Ok(Self { shape, values })
    }

    /// A grid of uniformly random values with the given extents.
    pub fn rand<R: Rng>(rng: &mut R, extents: Vec<usize>) -> GridResult<Self>
    where
        StandardUniform: Distribution<T>,
    {
        let shape = Shape::new(extents)?;
        let values = rng
            .sample_iter(StandardUniform)
            .take(shape.num_elements())
            .collect();
        Ok(Self { shape, values })
    }

    /// Build a grid with `other`'s shape, converting every element with `as`-cast semantics.
    ///
    /// Floats converted to integers are truncated toward zero and saturate at the target bounds.
    #[must_use]
    #[instrument(level = "trace", skip_all, fields(shape = %other.shape))]
    pub fn cast_from<R: Element + AsPrimitive<T>>(other: &NumericGrid<R>) -> Self {
        Self {
            shape: other.shape.clone(),
            values: other
                .values
                .iter()
                .map(|&v| AsPrimitive::<T>::as_(v))
                .collect(),
        }
    }

    #[must_use]
    pub fn cast<U: Element>(&self) -> NumericGrid<U>
    where
        T: AsPrimitive<U>,
    {
        NumericGrid::cast_from(self)
    }

    /// Apply `f` to every element, keeping the shape.
    pub fn map<U: Element, F: Fn(T) -> U>(&self, f: F) -> NumericGrid<U> {
        NumericGrid {
            shape: self.shape.clone(),
            values: self.values.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Read the element at flat index `index` without a bounds check.
    ///
    /// # Safety
    /// `index` must be less than `self.len()`.
    #[inline]
    #[must_use]
    pub unsafe fn get_unchecked(&self, index: usize) -> T {
        unsafe { *self.values.get_unchecked(index) }
    }

    /// Borrow the slot at flat index `index` mutably, without a bounds check.
    ///
    /// The returned reference is tied to the exclusive borrow of the grid, so it cannot outlive
    /// the grid or observe a wholesale replacement of its values.
    ///
    /// # Safety
    /// `index` must be less than `self.len()`.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        unsafe { self.values.get_unchecked_mut(index) }
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<T> {
        self.values.get(index).copied()
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.values.get_mut(index)
    }

    /// Read the element at a multi-axis coordinate.
    pub fn at(&self, coords: &[usize]) -> GridResult<T> {
        let index = self.shape.flat_index(coords)?;
        Ok(self.values[index])
    }

    pub fn at_mut(&mut self, coords: &[usize]) -> GridResult<&mut T> {
        let index = self.shape.flat_index(coords)?;
        Ok(&mut self.values[index])
    }

    /// Replace every value with a copy of `other`'s values. Both grids must have the same shape.
    pub fn assign(&mut self, other: &Self) -> GridResult<()> {
        self.shape.ensure_same(&other.shape, "assign")?;
        self.values.copy_from_slice(&other.values);
        Ok(())
    }

    /// Overwrite every value with the converted value at the same index of `other`. Both grids
    /// must have the same shape.
    pub fn assign_cast<R: Element + AsPrimitive<T>>(
        &mut self,
        other: &NumericGrid<R>,
    ) -> GridResult<()> {
        self.shape.ensure_same(&other.shape, "assign")?;
        for (dst, &src) in self.values.iter_mut().zip(&other.values) {
            *dst = AsPrimitive::<T>::as_(src);
        }
        Ok(())
    }

    /// Set every slot to `scalar`.
    pub fn fill<R: AsPrimitive<T>>(&mut self, scalar: R) {
        self.values.fill(scalar.as_());
    }
}

impl<T> NumericGrid<T> {
    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// A copy of the extents. Changing the returned vector does not affect the grid.
    #[must_use]
    pub fn dimensions(&self) -> Vec<usize> {
        self.shape.extents().to_vec()
    }

    #[must_use]
    pub fn num_axes(&self) -> usize {
        self.shape.num_axes()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// A copy of the flat, row-major values.
    #[must_use]
    pub fn data(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.values.clone()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    /// The flat values, mutably. The shape cannot change through this view.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.values
    }

    #[must_use]
    pub fn into_values(self) -> Vec<T> {
        self.values
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.values.iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.values.iter_mut()
    }

    /// Runs of elements along the last axis, in storage order.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.values.chunks_exact(self.row_len().max(1))
    }

    fn row_len(&self) -> usize {
        self.shape.extents().last().copied().unwrap_or(0)
    }
}

impl<T> Index<usize> for NumericGrid<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.values[index]
    }
}

impl<T> IndexMut<usize> for NumericGrid<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.values[index]
    }
}

impl<T: Element, R: Element + AsPrimitive<T>> From<&NumericGrid<R>> for NumericGrid<T> {
    fn from(other: &NumericGrid<R>) -> Self {
        Self::cast_from(other)
    }
}

/// One line per run of the last axis, values separated by tabs.
impl<T: fmt::Display> fmt::Display for NumericGrid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for value in row {
                write!(f, "{value}\t")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
