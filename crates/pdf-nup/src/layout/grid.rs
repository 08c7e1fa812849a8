//! Grid layout calculation
//!
//! Maps a cell index to its rectangle on the output page. Cells are numbered
//! left to right, top to bottom; row 0 is the top row even though the PDF
//! coordinate origin is at the bottom-left corner.

use super::CellGeometry;

/// Columns and rows for a supported mini-page count
pub fn grid_dimensions(mini_pages_per_page: usize) -> Option<(usize, usize)> {
    match mini_pages_per_page {
        4 => Some((2, 2)),
        6 => Some((2, 3)),
        _ => None,
    }
}

/// Calculate the bounds of the cell at `cell_index`.
///
/// `cell_index` must be less than `columns * rows`.
///
/// # Arguments
/// * `cell_index` - Position in reading order (0 = top-left)
/// * `columns` - Number of columns in the grid
/// * `rows` - Number of rows in the grid
/// * `page_width` - Output page width in points
/// * `page_height` - Output page height in points
pub fn cell_geometry(
    cell_index: usize,
    columns: usize,
    rows: usize,
    page_width: f32,
    page_height: f32,
) -> CellGeometry {
    debug_assert!(
        cell_index < columns * rows,
        "cell {} is outside a {}x{} grid",
        cell_index,
        columns,
        rows
    );

    let cell_width = page_width / columns as f32;
    let cell_height = page_height / rows as f32;

    let col = cell_index % columns;
    let row = cell_index / columns;

    CellGeometry {
        x_offset: col as f32 * cell_width,
        y_offset: (rows - 1 - row) as f32 * cell_height,
        cell_width,
        cell_height,
    }
}
