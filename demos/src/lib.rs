//! Helpers shared by the `grid-demo` binary.

use numgrid::{AsPrimitive, Element, NumericGrid};

/// Write `(r * width + c) * step` into every cell, walking rows and columns and converting each
/// coordinate to its flat index by hand. `width` is the extent of the last axis; every earlier
/// axis is folded into the row count.
pub fn fill_ramp<T: Element>(grid: &mut NumericGrid<T>, step: f64)
where
    f64: AsPrimitive<T>,
{
    let width = grid.dimensions().last().copied().unwrap_or(0);
    let height = grid.len().checked_div(width).unwrap_or(0);
    for r in 0..height {
        for c in 0..width {
            let index = r * width + c;
            grid[index] = ((index as f64) * step).as_();
        }
    }
}

/// A titled, row-major rendering of a grid: the title line, then one line per row with each value
/// followed by a tab.
#[must_use]
pub fn render_table<T>(title: &str, grid: &NumericGrid<T>) -> String
where
    T: Element + core::fmt::Display,
{
    format!("{title}:\n{grid}")
}
