//! Layout data types
//!
//! These types sit between the options the caller supplies and the
//! drawing commands written into each output page.

use crate::options::NupOptions;
use crate::types::{NupError, Result};

use super::grid_dimensions;

/// Grid and page geometry for one combine run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Source pages per output page
    pub mini_pages_per_page: usize,
    /// Number of columns in the grid
    pub columns: usize,
    /// Number of rows in the grid
    pub rows: usize,
    /// Output page width in points
    pub page_width: f32,
    /// Output page height in points
    pub page_height: f32,
}

impl LayoutConfig {
    /// Build the layout for `mini_pages_per_page` on a page of the given size.
    pub fn new(mini_pages_per_page: usize, page_width: f32, page_height: f32) -> Result<Self> {
        let (columns, rows) = grid_dimensions(mini_pages_per_page).ok_or_else(|| {
            NupError::Config(format!(
                "Unsupported number of mini-pages per page: {}. Supported values are 4 and 6.",
                mini_pages_per_page
            ))
        })?;

        Ok(Self {
            mini_pages_per_page,
            columns,
            rows,
            page_width,
            page_height,
        })
    }

    /// Build the layout from validated options
    pub fn from_options(options: &NupOptions) -> Result<Self> {
        options.validate()?;
        let (width, height) = options.paper_size.dimensions_pt();
        Self::new(options.mini_pages_per_page, width, height)
    }

    /// Geometry of the cell at `cell_index`
    pub fn cell(&self, cell_index: usize) -> CellGeometry {
        super::cell_geometry(
            cell_index,
            self.columns,
            self.rows,
            self.page_width,
            self.page_height,
        )
    }

    /// Number of output pages needed for `total_pages` source pages
    pub fn group_count(&self, total_pages: usize) -> usize {
        total_pages.div_ceil(self.mini_pages_per_page)
    }

    /// Source page indices covered by `group_index`, clipped to `total_pages`
    pub fn group_pages(&self, group_index: usize, total_pages: usize) -> std::ops::Range<usize> {
        let start = (group_index * self.mini_pages_per_page).min(total_pages);
        let end = (start + self.mini_pages_per_page).min(total_pages);
        start..end
    }
}

/// One cell of the grid in output page coordinates (origin bottom-left)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CellGeometry {
    /// Left edge
    pub x_offset: f32,
    /// Bottom edge
    pub y_offset: f32,
    pub cell_width: f32,
    pub cell_height: f32,
}

impl CellGeometry {
    /// Center x coordinate
    pub fn center_x(&self) -> f32 {
        self.x_offset + self.cell_width / 2.0
    }

    /// Center y coordinate
    pub fn center_y(&self) -> f32 {
        self.y_offset + self.cell_height / 2.0
    }
}

/// Where a scaled source page is drawn inside its cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub draw_x: f32,
    pub draw_y: f32,
    pub draw_width: f32,
    pub draw_height: f32,
    /// Scale applied to the source page's native size
    pub scale: f32,
}

impl Placement {
    /// Center x coordinate
    pub fn center_x(&self) -> f32 {
        self.draw_x + self.draw_width / 2.0
    }

    /// Center y coordinate
    pub fn center_y(&self) -> f32 {
        self.draw_y + self.draw_height / 2.0
    }
}
