//! Layout calculation for n-up pages
//!
//! This module handles all the geometric calculations for composing a group:
//! - Grid dimensions (how many columns and rows)
//! - Cell geometry (where each cell sits on the output page)
//! - Image placement (aspect-preserving fit, centered in the cell)

mod grid;
mod placement;
mod types;

pub use grid::*;
pub use placement::*;
pub use types::*;
