//! Dense, dimension-tagged numeric grids.
//!
//! A [`NumericGrid`] owns a [`Shape`] (one extent per axis) and a flat, row-major buffer whose
//! length is always the product of the extents. Grids support element-wise arithmetic with other
//! grids of identical shape, possibly of a different element type, and with scalars.
//!
//! The container is not internally synchronized. Share a grid across threads only behind your own
//! lock, or give each thread its own grid.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

use core::fmt::Debug;

use num_traits::NumOps;

pub mod dense;
pub mod elementwise;
pub mod error;
pub mod ops;
pub mod shape;

pub use dense::NumericGrid;
pub use elementwise::ElementwiseOp;
pub use error::{GridError, GridResult};
pub use num_traits::AsPrimitive;
pub use shape::Shape;

/// A value that can be stored in a [`NumericGrid`].
///
/// Implemented for every primitive integer and float type. Conversions between element types go
/// through [`AsPrimitive`], which follows the semantics of an `as` cast.
///
/// Arithmetic that mixes a grid element with a scalar is carried out in a promoted type and then
/// narrowed back: `f64` if either side is a float, `i128` otherwise.
pub trait Element:
    Copy
    + Default
    + PartialEq
    + Debug
    + NumOps
    + AsPrimitive<Self>
    + AsPrimitive<f64>
    + AsPrimitive<i128>
    + 'static
{
    const IS_FLOAT: bool;

    /// Narrow a promoted float result, as `value as Self`.
    fn from_f64(value: f64) -> Self;

    /// Narrow a promoted integer result, as `value as Self`.
    fn from_i128(value: i128) -> Self;
}

macro_rules! element {
    ($is_float:expr => $($t:ty),* $(,)?) => {
        $(
            impl Element for $t {
                const IS_FLOAT: bool = $is_float;

                #[inline]
                fn from_f64(value: f64) -> Self {
                    value as $t
                }

                #[inline]
                fn from_i128(value: i128) -> Self {
                    value as $t
                }
            }
        )*
    };
}

element!(false => u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
element!(true => f32, f64);
