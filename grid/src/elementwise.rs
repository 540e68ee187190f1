//! Element-wise arithmetic between grids, and between grids and scalars.
//!
//! Grid operands may hold a different element type from the receiver. Each operand element is
//! converted to the receiver's element type before the operator is applied, so
//! `receiver[i] = receiver[i] OP (operand[i] as T)`. Grid operands must have exactly the
//! receiver's shape. The check happens before any element is touched, so a rejected operation
//! leaves both grids as they were.
//!
//! Scalar operands are not converted up front. `grid[i] OP scalar` is evaluated in the promoted
//! type of the two (`f64` if either is a float, `i128` otherwise) and the result is narrowed back
//! to the element type, so an integer grid multiplied by `2.5` scales by two and a half.
//!
//! Arithmetic faults follow the element type: integer division by zero panics, float division by
//! zero yields an infinity or NaN.

use core::fmt;

use itertools::Itertools;
use num_traits::AsPrimitive;
use tracing::instrument;

use crate::{Element, GridResult, NumericGrid};

/// The four element-wise binary operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementwiseOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ElementwiseOp {
    pub const ALL: [Self; 4] = [Self::Add, Self::Sub, Self::Mul, Self::Div];

    #[inline]
    pub fn apply<T: Element>(self, lhs: T, rhs: T) -> T {
        match self {
            Self::Add => lhs + rhs,
            Self::Sub => lhs - rhs,
            Self::Mul => lhs * rhs,
            Self::Div => lhs / rhs,
        }
    }

    /// Apply `self` to an element and a scalar of another type in their promoted type, then
    /// narrow the result back to the element type.
    ///
    /// Promoted integer arithmetic wraps, so narrowing matches an `as` cast of the exact result
    /// for every type up to 64 bits.
    #[inline]
    pub fn apply_promoted<T: Element, R: Element>(self, lhs: T, rhs: R) -> T {
        if T::IS_FLOAT || R::IS_FLOAT {
            let lhs = AsPrimitive::<f64>::as_(lhs);
            let rhs = AsPrimitive::<f64>::as_(rhs);
            T::from_f64(self.apply(lhs, rhs))
        } else {
            let lhs = AsPrimitive::<i128>::as_(lhs);
            let rhs = AsPrimitive::<i128>::as_(rhs);
            T::from_i128(match self {
                Self::Add => lhs.wrapping_add(rhs),
                Self::Sub => lhs.wrapping_sub(rhs),
                Self::Mul => lhs.wrapping_mul(rhs),
                Self::Div => lhs.wrapping_div(rhs),
            })
        }
    }

    /// The verb used in error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "subtract",
            Self::Mul => "multiply",
            Self::Div => "divide",
        }
    }
}

impl fmt::Display for ElementwiseOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl<T: Element> NumericGrid<T> {
    /// Apply `op` between every element of `self` and the element at the same index of `other`.
    pub fn try_apply_assign<R: Element + AsPrimitive<T>>(
        &mut self,
        op: ElementwiseOp,
        other: &NumericGrid<R>,
    ) -> GridResult<()> {
        self.shape().ensure_same(other.shape(), op.name())?;
        self.zip_apply(op, other);
        Ok(())
    }

    /// Apply `op` between every element of `self` and `scalar`, in their promoted type.
    #[instrument(level = "trace", skip_all, fields(op = %op, len = self.len()))]
    pub fn apply_scalar_assign<R: Element>(&mut self, op: ElementwiseOp, scalar: R) {
        for value in self.iter_mut() {
            *value = op.apply_promoted(*value, scalar);
        }
    }

    /// Shapes must already have been checked.
    #[instrument(level = "trace", skip_all, fields(op = %op, len = self.len()))]
    fn zip_apply<R: Element + AsPrimitive<T>>(
        &mut self,
        op: ElementwiseOp,
        other: &NumericGrid<R>,
    ) {
        for (lhs, &rhs) in self.iter_mut().zip_eq(other.iter()) {
            *lhs = op.apply(*lhs, AsPrimitive::<T>::as_(rhs));
        }
    }

    /// Add `other` element-wise into `self`.
    pub fn try_add_assign<R: Element + AsPrimitive<T>>(
        &mut self,
        other: &NumericGrid<R>,
    ) -> GridResult<()> {
        self.try_apply_assign(ElementwiseOp::Add, other)
    }

    /// Subtract `other` element-wise from `self`.
    pub fn try_sub_assign<R: Element + AsPrimitive<T>>(
        &mut self,
        other: &NumericGrid<R>,
    ) -> GridResult<()> {
        self.try_apply_assign(ElementwiseOp::Sub, other)
    }

    /// Multiply `self` element-wise by `other`.
    pub fn try_mul_assign<R: Element + AsPrimitive<T>>(
        &mut self,
        other: &NumericGrid<R>,
    ) -> GridResult<()> {
        self.try_apply_assign(ElementwiseOp::Mul, other)
    }

    /// Divide `self` element-wise by `other`.
    pub fn try_div_assign<R: Element + AsPrimitive<T>>(
        &mut self,
        other: &NumericGrid<R>,
    ) -> GridResult<()> {
        self.try_apply_assign(ElementwiseOp::Div, other)
    }

    /// A copy of `self` with `op` applied against `other`. The result keeps `self`'s element
    /// type.
    pub fn try_apply<R: Element + AsPrimitive<T>>(
        &self,
        op: ElementwiseOp,
        other: &NumericGrid<R>,
    ) -> GridResult<Self> {
        self.shape().ensure_same(other.shape(), op.name())?;
        let mut result = self.clone();
        result.zip_apply(op, other);
        Ok(result)
    }

    /// `self + other`, element-wise, as a new grid.
    pub fn try_add<R: Element + AsPrimitive<T>>(
        &self,
        other: &NumericGrid<R>,
    ) -> GridResult<Self> {
        self.try_apply(ElementwiseOp::Add, other)
    }

    /// `self - other`, element-wise, as a new grid.
    pub fn try_sub<R: Element + AsPrimitive<T>>(
        &self,
        other: &NumericGrid<R>,
    ) -> GridResult<Self> {
        self.try_apply(ElementwiseOp::Sub, other)
    }

    /// `self * other`, element-wise, as a new grid.
    pub fn try_mul<R: Element + AsPrimitive<T>>(
        &self,
        other: &NumericGrid<R>,
    ) -> GridResult<Self> {
        self.try_apply(ElementwiseOp::Mul, other)
    }

    /// `self / other`, element-wise, as a new grid.
    pub fn try_div<R: Element + AsPrimitive<T>>(
        &self,
        other: &NumericGrid<R>,
    ) -> GridResult<Self> {
        self.try_apply(ElementwiseOp::Div, other)
    }

    /// Add `scalar` to every element.
    pub fn add_scalar_assign<R: Element>(&mut self, scalar: R) {
        self.apply_scalar_assign(ElementwiseOp::Add, scalar);
    }

    /// Subtract `scalar` from every element.
    pub fn sub_scalar_assign<R: Element>(&mut self, scalar: R) {
        self.apply_scalar_assign(ElementwiseOp::Sub, scalar);
    }

    /// Multiply every element by `scalar`.
    pub fn mul_scalar_assign<R: Element>(&mut self, scalar: R) {
        self.apply_scalar_assign(ElementwiseOp::Mul, scalar);
    }

    /// Divide every element by `scalar`.
    pub fn div_scalar_assign<R: Element>(&mut self, scalar: R) {
        self.apply_scalar_assign(ElementwiseOp::Div, scalar);
    }

    /// A copy of `self` with `op` applied against `scalar`.
    #[must_use]
    pub fn apply_scalar<R: Element>(&self, op: ElementwiseOp, scalar: R) -> Self {
        let mut result = self.clone();
        result.apply_scalar_assign(op, scalar);
        result
    }

    /// A copy of `self` with `scalar` added to every element.
    #[must_use]
    pub fn add_scalar<R: Element>(&self, scalar: R) -> Self {
        self.apply_scalar(ElementwiseOp::Add, scalar)
    }

    /// A copy of `self` with `scalar` subtracted from every element.
    #[must_use]
    pub fn sub_scalar<R: Element>(&self, scalar: R) -> Self {
        self.apply_scalar(ElementwiseOp::Sub, scalar)
    }

    /// A copy of `self` with every element multiplied by `scalar`.
    #[must_use]
    pub fn mul_scalar<R: Element>(&self, scalar: R) -> Self {
        self.apply_scalar(ElementwiseOp::Mul, scalar)
    }

    /// A copy of `self` with every element divided by `scalar`.
    #[must_use]
    pub fn div_scalar<R: Element>(&self, scalar: R) -> Self {
        self.apply_scalar(ElementwiseOp::Div, scalar)
    }

    /// `lhs OP rhs[i]` for every element of `rhs`.
    ///
    /// Builds a grid of `rhs`'s shape filled with `lhs`, then applies `op` in place against `rhs`.
    /// For the non-commutative operators this means `2 - grid` is `2 - grid[i]` and `2 / grid` is
    /// `2 / grid[i]`.
    #[must_use]
    pub fn scalar_apply<L: AsPrimitive<T>>(op: ElementwiseOp, lhs: L, rhs: &Self) -> Self {
        let mut result = Self::filled(rhs.shape().clone(), lhs);
        result.zip_apply(op, rhs);
        result
    }

    /// `lhs + rhs[i]` for every element.
    #[must_use]
    pub fn scalar_add<L: AsPrimitive<T>>(lhs: L, rhs: &Self) -> Self {
        Self::scalar_apply(ElementwiseOp::Add, lhs, rhs)
    }

    /// `lhs - rhs[i]` for every element.
    #[must_use]
    pub fn scalar_sub<L: AsPrimitive<T>>(lhs: L, rhs: &Self) -> Self {
        Self::scalar_apply(ElementwiseOp::Sub, lhs, rhs)
    }

    /// `lhs * rhs[i]` for every element.
    #[must_use]
    pub fn scalar_mul<L: AsPrimitive<T>>(lhs: L, rhs: &Self) -> Self {
        Self::scalar_apply(ElementwiseOp::Mul, lhs, rhs)
    }

    /// `lhs / rhs[i]` for every element.
    #[must_use]
    pub fn scalar_div<L: AsPrimitive<T>>(lhs: L, rhs: &Self) -> Self {
        Self::scalar_apply(ElementwiseOp::Div, lhs, rhs)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use proptest::prelude::*;

    use super::*;
    use crate::GridError;

    fn grid<T: Element>(extents: &[usize], values: Vec<T>) -> NumericGrid<T> {
        NumericGrid::from_vec(extents.to_vec(), values).unwrap()
    }

    #[test]
    fn grid_ops_match_per_element_ops() {
        let a = grid(&[2, 2], vec![8, 6, -4, 9]);
        let b = grid(&[2, 2], vec![2, 3, 2, -3]);
        assert_eq!(a.try_add(&b).unwrap().data(), vec![10, 9, -2, 6]);
        assert_eq!(a.try_sub(&b).unwrap().data(), vec![6, 3, -6, 12]);
        assert_eq!(a.try_mul(&b).unwrap().data(), vec![16, 18, -8, -27]);
        assert_eq!(a.try_div(&b).unwrap().data(), vec![4, 2, -2, -3]);
    }

    #[test]
    fn mixed_types_convert_operand_to_receiver() {
        let mut doubles = grid(&[3, 2], vec![0.0_f64, 2.6, 5.2, 7.8, 10.4, 13.0]);
        let ints: NumericGrid<i32> = doubles.cast();
        doubles.try_mul_assign(&ints).unwrap();
        let expected = [0.0, 2.6 * 2.0, 5.2 * 5.0, 7.8 * 7.0, 10.4 * 10.0, 13.0 * 13.0];
        for (got, want) in doubles.iter().zip(expected) {
            assert!((got - want).abs() < 1e-9);
        }

        let mut ints = grid(&[2], vec![10_i32, 10]);
        let floats = grid(&[2], vec![2.9_f32, -1.5]);
        ints.try_add_assign(&floats).unwrap();
        assert_eq!(ints.data(), vec![12, 9]);
    }

    #[test]
    fn shape_mismatch_leaves_operands_alone() {
        let mut a = grid(&[2, 3], vec![1.0_f64; 6]);
        let b = grid(&[3, 2], vec![2_u8; 6]);
        for op in ElementwiseOp::ALL {
            let err = a.try_apply_assign(op, &b).unwrap_err();
            assert_eq!(
                err,
                GridError::ShapeMismatch {
                    op: op.name(),
                    left: a.shape().clone(),
                    right: b.shape().clone(),
                }
            );
            assert!(a.try_apply(op, &b).is_err());
        }
        assert_eq!(a.data(), vec![1.0; 6]);
        assert_eq!(b.data(), vec![2; 6]);
    }

    #[test]
    fn axis_count_matters_even_with_equal_length() {
        let a = grid(&[6], vec![1; 6]);
        let b = grid(&[6, 1], vec![1; 6]);
        assert!(a.try_add(&b).is_err());
    }

    #[test]
    fn scalar_ops_touch_every_element() {
        let a = grid(&[3], vec![2.0_f64, 4.0, 8.0]);
        assert_eq!(a.add_scalar(1).data(), vec![3.0, 5.0, 9.0]);
        assert_eq!(a.sub_scalar(0.5).data(), vec![1.5, 3.5, 7.5]);
        assert_eq!(a.mul_scalar(3_u8).data(), vec![6.0, 12.0, 24.0]);
        assert_eq!(a.div_scalar(2.0_f32).data(), vec![1.0, 2.0, 4.0]);
    }

    #[test]
    fn scalar_ops_promote_then_narrow() {
        let mut ints = grid(&[2], vec![5_i32, 7]);
        ints.add_scalar_assign(2.9);
        assert_eq!(ints.data(), vec![7, 9]);
        ints.div_scalar_assign(2_u64);
        assert_eq!(ints.data(), vec![3, 4]);

        let ints = grid(&[2], vec![4_i32, 5]);
        assert_eq!(ints.mul_scalar(2.5_f64).data(), vec![10, 12]);
        assert_eq!(ints.div_scalar(0.5_f32).data(), vec![8, 10]);
        assert_eq!(ints.sub_scalar(-0.5).data(), vec![4, 5]);
        assert_eq!(ints.add_scalar(1.5).add_scalar(1.5).data(), vec![6, 7]);

        let wide = grid(&[1], vec![5_i32]);
        assert_eq!(wide.div_scalar(1_i64 << 32).data(), vec![0]);

        let floats = grid(&[2], vec![1.0_f32, 3.0]);
        assert_eq!(
            floats.mul_scalar(3.2_f64).data(),
            vec![3.2_f64 as f32, (3.0_f64 * 3.2) as f32]
        );
    }

    #[test]
    fn scalar_left_puts_scalar_first() {
        let g = grid(&[1, 2], vec![1.0_f64, 2.0]);
        assert_eq!(NumericGrid::scalar_sub(3, &g).data(), vec![2.0, 1.0]);
        assert_eq!(NumericGrid::scalar_div(4.0, &g).data(), vec![4.0, 2.0]);
        assert_eq!(NumericGrid::scalar_add(1, &g).data(), vec![2.0, 3.0]);
        assert_eq!(NumericGrid::scalar_mul(-2, &g).data(), vec![-2.0, -4.0]);
        assert_eq!(NumericGrid::scalar_sub(3, &g).dimensions(), vec![1, 2]);
    }

    #[test]
    fn float_division_by_zero_is_not_intercepted() {
        let a = grid(&[2], vec![1.0_f64, 0.0]);
        let zeros = grid(&[2], vec![0.0_f64, 0.0]);
        let q = a.try_div(&zeros).unwrap();
        assert!(q[0].is_infinite());
        assert!(q[1].is_nan());
    }

    #[test]
    #[should_panic]
    fn integer_division_by_zero_panics() {
        let a = grid(&[1], vec![1_i32]);
        let _ = a.div_scalar(0);
    }

    #[test]
    fn allocating_ops_do_not_touch_receiver() {
        let a = grid(&[2], vec![1_i64, 2]);
        let b = grid(&[2], vec![3_i64, 4]);
        let _ = a.try_add(&b).unwrap();
        let _ = a.mul_scalar(10);
        assert_eq!(a.data(), vec![1, 2]);
    }

    fn shape_and_values() -> impl Strategy<Value = (Vec<usize>, Vec<i32>, Vec<i32>)> {
        prop::collection::vec(1..5_usize, 1..4).prop_flat_map(|extents| {
            let len: usize = extents.iter().product();
            (
                Just(extents),
                prop::collection::vec(-10_000..10_000_i32, len),
                prop::collection::vec(-10_000..10_000_i32, len),
            )
        })
    }

    proptest! {
        #[test]
        fn add_is_per_element((extents, xs, ys) in shape_and_values()) {
            let a = grid(&extents, xs);
            let b = grid(&extents, ys);
            let sum = a.try_add(&b).unwrap();
            prop_assert_eq!(sum.dimensions(), extents);
            for i in 0..a.len() {
                prop_assert_eq!(sum[i], a[i] + b[i]);
            }
        }

        #[test]
        fn scalar_ops_are_per_element((extents, xs, _ys) in shape_and_values(), s in 1..100_i32) {
            let a = grid(&extents, xs);
            for op in ElementwiseOp::ALL {
                let result = a.apply_scalar(op, s);
                for i in 0..a.len() {
                    prop_assert_eq!(result[i], op.apply(a[i], s));
                }
            }
        }

        #[test]
        fn add_then_sub_round_trips_integers((extents, xs, ys) in shape_and_values()) {
            let a = grid(&extents, xs);
            let b = grid(&extents, ys);
            prop_assert_eq!(a.try_add(&b).unwrap().try_sub(&b).unwrap(), a);
        }

        #[test]
        fn add_then_sub_round_trips_floats((extents, xs, ys) in shape_and_values()) {
            let a: NumericGrid<f64> = grid(&extents, xs).cast();
            let b = grid(&extents, ys).map(|v| f64::from(v) / 7.0);
            let back = a.try_add(&b).unwrap().try_sub(&b).unwrap();
            for (x, y) in back.iter().zip(a.iter()) {
                prop_assert!((x - y).abs() <= 1e-9 * y.abs().max(1.0));
            }
        }

        #[test]
        fn new_has_product_length(extents in prop::collection::vec(0..6_usize, 1..5)) {
            let g = NumericGrid::<f32>::new(extents.clone()).unwrap();
            prop_assert_eq!(g.len(), extents.iter().product::<usize>());
            prop_assert_eq!(g.dimensions(), extents);
        }
    }
}
