//! **gridstar-core** — geometry value types shared by the gridstar crates.
//!
//! A [`Point`] names a grid cell by column (`x`) and row (`y`); a [`Range`]
//! is the half-open rectangle of cells a grid covers.

pub mod geom;

pub use geom::{Point, Range, RangeIter};
