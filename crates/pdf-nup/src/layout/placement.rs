//! Image placement within cells
//!
//! A source page is scaled uniformly so that it fits inside its cell on both
//! axes, then centered in the cell.

use super::{CellGeometry, Placement};

/// Calculate where a source page of the given native size is drawn in `cell`.
///
/// Returns `None` when either source dimension is not a positive, finite number.
pub fn place_image(
    cell: &CellGeometry,
    source_width: f32,
    source_height: f32,
) -> Option<Placement> {
    if !is_drawable(source_width) || !is_drawable(source_height) {
        return None;
    }

    let scale = fit_scale(
        source_width,
        source_height,
        cell.cell_width,
        cell.cell_height,
    );

    let draw_width = source_width * scale;
    let draw_height = source_height * scale;

    Some(Placement {
        draw_x: cell.x_offset + (cell.cell_width - draw_width) / 2.0,
        draw_y: cell.y_offset + (cell.cell_height - draw_height) / 2.0,
        draw_width,
        draw_height,
        scale,
    })
}

/// Largest uniform scale that keeps the source inside the target
fn fit_scale(src_width: f32, src_height: f32, target_width: f32, target_height: f32) -> f32 {
    let scale_w = target_width / src_width;
    let scale_h = target_height / src_height;
    scale_w.min(scale_h)
}

fn is_drawable(dimension: f32) -> bool {
    dimension.is_finite() && dimension > 0.0
}
