//! In-memory [`Surface`] with no display.
//!
//! Mirrors what a real surface would show: a row-major list of cell colors,
//! a slider value and its label.  Touch coordinates resolve against a
//! virtual drawing area of configurable pixel size.

use crate::color::Rgb;
use crate::grid::{cell_at, CellId};
use crate::traits::{Handle, Surface};

/// Pixel size of the virtual drawing area unless told otherwise.
pub const DEFAULT_AREA_PX: f64 = 640.0;

#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    cells: Vec<Option<Rgb>>,
    size: usize,
    slider: i64,
    label: String,
    width: f64,
    height: f64,
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::with_area(DEFAULT_AREA_PX, DEFAULT_AREA_PX)
    }

    /// A surface whose drawing area is `width × height` pixels.
    pub fn with_area(width: f64, height: f64) -> Self {
        Self {
            cells: Vec::new(),
            size: 0,
            slider: 0,
            label: String::new(),
            width,
            height,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn color_at(&self, cell: CellId) -> Option<Rgb> {
        if cell.row >= self.size || cell.col >= self.size {
            return None;
        }
        self.cells[cell.index(self.size)]
    }

    pub fn colored_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn slider_value(&self) -> i64 {
        self.slider
    }

    /// Simulate the user dragging the slider to `value`.
    pub fn set_slider_value(&mut self, value: i64) {
        self.slider = value;
    }

    pub fn size_label(&self) -> &str {
        &self.label
    }
}

impl Surface for HeadlessSurface {
    fn has_handle(&self, _handle: Handle) -> bool {
        true
    }

    fn remove_cells(&mut self) {
        self.cells.clear();
        self.size = 0;
    }

    fn create_cell(&mut self, cell: CellId) {
        self.cells.push(None);
        self.size = self.size.max(cell.row + 1).max(cell.col + 1);
    }

    fn set_cell_color(&mut self, cell: CellId, color: Option<Rgb>) {
        if cell.row < self.size && cell.col < self.size {
            let index = cell.index(self.size);
            self.cells[index] = color;
        }
    }

    fn clear_cells(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = None);
    }

    fn read_slider_value(&self) -> i64 {
        self.slider
    }

    fn write_slider_value(&mut self, value: usize) {
        self.slider = value as i64;
    }

    fn set_size_label(&mut self, text: &str) {
        self.label = text.to_string();
    }

    fn cell_at_point(&self, x: f64, y: f64) -> Option<CellId> {
        cell_at(x, y, self.width, self.height, self.size)
    }
}
