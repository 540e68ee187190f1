//! Operator sugar for scalar arithmetic.
//!
//! `grid OP scalar` and `scalar OP grid` never fail, so they are exposed through the standard
//! operator traits. A scalar on the right is combined with each element in their promoted type,
//! see [`ElementwiseOp::apply_promoted`]. Grid-to-grid arithmetic can fail on mismatched shapes
//! and is only available through the fallible `try_*` methods.

use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

use num_traits::AsPrimitive;

use crate::{Element, ElementwiseOp, NumericGrid};

macro_rules! grid_scalar_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:expr) => {
        impl<T: Element, R: Element> $assign_trait<R> for NumericGrid<T> {
            #[inline]
            fn $assign_method(&mut self, rhs: R) {
                self.apply_scalar_assign($op, rhs);
            }
        }

        impl<T: Element, R: Element> $trait<R> for NumericGrid<T> {
            type Output = Self;

            #[inline]
            fn $method(mut self, rhs: R) -> Self {
                self.apply_scalar_assign($op, rhs);
                self
            }
        }

        impl<T: Element, R: Element> $trait<R> for &NumericGrid<T> {
            type Output = NumericGrid<T>;

            #[inline]
            fn $method(self, rhs: R) -> NumericGrid<T> {
                self.apply_scalar($op, rhs)
            }
        }
    };
}

grid_scalar_op!(Add, add, AddAssign, add_assign, ElementwiseOp::Add);
grid_scalar_op!(Sub, sub, SubAssign, sub_assign, ElementwiseOp::Sub);
grid_scalar_op!(Mul, mul, MulAssign, mul_assign, ElementwiseOp::Mul);
grid_scalar_op!(Div, div, DivAssign, div_assign, ElementwiseOp::Div);

macro_rules! scalar_grid_op {
    ($scalar:ty, $trait:ident, $method:ident, $op:expr) => {
        impl<T: Element> $trait<NumericGrid<T>> for $scalar
        where
            $scalar: AsPrimitive<T>,
        {
            type Output = NumericGrid<T>;

            #[inline]
            fn $method(self, rhs: NumericGrid<T>) -> NumericGrid<T> {
                NumericGrid::scalar_apply($op, self, &rhs)
            }
        }

        impl<T: Element> $trait<&NumericGrid<T>> for $scalar
        where
            $scalar: AsPrimitive<T>,
        {
            type Output = NumericGrid<T>;

            #[inline]
            fn $method(self, rhs: &NumericGrid<T>) -> NumericGrid<T> {
                NumericGrid::scalar_apply($op, self, rhs)
            }
        }
    };
}

macro_rules! scalar_grid_ops {
    ($($scalar:ty),* $(,)?) => {
        $(
            scalar_grid_op!($scalar, Add, add, ElementwiseOp::Add);
            scalar_grid_op!($scalar, Sub, sub, ElementwiseOp::Sub);
            scalar_grid_op!($scalar, Mul, mul, ElementwiseOp::Mul);
            scalar_grid_op!($scalar, Div, div, ElementwiseOp::Div);
        )*
    };
}

scalar_grid_ops!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64
);
