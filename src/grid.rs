//! Square drawing grid.
//!
//! The [`Grid`] owns the cell model: one optional color per cell, stored in
//! row-major order.  Every mutation is mirrored onto a [`Surface`] so the
//! display always matches the model.
//!
//! The grid is always square.  Rebuilding it (on resize) discards every
//! cell and every color; there is no attempt to carry a drawing across
//! sizes.

use crate::color::Rgb;
use crate::state::GridSize;
use crate::traits::Surface;
use log::debug;
use serde::{Deserialize, Serialize};

/// Address of a single cell as `(row, col)`, both 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellId {
    pub row: usize,
    pub col: usize,
}

impl CellId {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row-major index of this cell in a grid of `size` columns.
    pub fn index(self, size: usize) -> usize {
        self.row * size + self.col
    }
}

/// Map a point on a `width × height` surface to the cell beneath it.
///
/// Cells are stretched to fill the surface, so a cell is
/// `width / size` wide and `height / size` tall.  Points on or beyond the
/// right/bottom edge, negative points, and degenerate surfaces map to `None`.
pub fn cell_at(x: f64, y: f64, width: f64, height: f64, size: usize) -> Option<CellId> {
    if size == 0 || width <= 0.0 || height <= 0.0 {
        return None;
    }
    if !(0.0..width).contains(&x) || !(0.0..height).contains(&y) {
        return None;
    }
    let col = ((x / width) * size as f64).floor() as usize;
    let row = ((y / height) * size as f64).floor() as usize;
    // Float rounding can land exactly on `size` for points a hair below the edge.
    Some(CellId::new(row.min(size - 1), col.min(size - 1)))
}

/// The live cell collection.
#[derive(Debug, Clone)]
pub struct Grid {
    size: GridSize,
    /// `size²` entries, row-major.  `None` means the cell is cleared.
    cells: Vec<Option<Rgb>>,
}

impl Grid {
    /// An unbuilt model of `size`; call [`build`](Self::build) to put it
    /// on a surface.
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            cells: vec![None; size.cell_count()],
        }
    }

    //  Accessors

    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Grid dimensions as `(rows, cols)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.size.get(), self.size.get())
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Whether `cell` addresses a cell of the live grid.
    pub fn contains(&self, cell: CellId) -> bool {
        cell.row < self.size.get() && cell.col < self.size.get()
    }

    /// The color of `cell`, or `None` if it is cleared or out of range.
    pub fn color_at(&self, cell: CellId) -> Option<Rgb> {
        if !self.contains(cell) {
            return None;
        }
        self.cells[cell.index(self.size.get())]
    }

    /// Every cell with its color, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (CellId, Option<Rgb>)> + '_ {
        let size = self.size.get();
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, c)| (CellId::new(i / size, i % size), *c))
    }

    /// Number of cells that currently hold a color.
    pub fn colored_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Raw row-major colors.
    pub fn colors(&self) -> &[Option<Rgb>] {
        &self.cells
    }

    //  Mutation

    /// Replace every cell on `surface` with a fresh `size × size` grid.
    ///
    /// All prior cells and their colors are discarded.
    pub fn build<S: Surface + ?Sized>(&mut self, surface: &mut S, size: GridSize) {
        surface.remove_cells();
        self.size = size;
        self.cells = vec![None; size.cell_count()];
        for row in 0..size.get() {
            for col in 0..size.get() {
                surface.create_cell(CellId::new(row, col));
            }
        }
        debug!("built {}x{} grid ({} cells)", size, size, self.cells.len());
    }

    /// Set `cell` to `color`.
    ///
    /// Returns `false` (and leaves everything untouched) when `cell` is not
    /// part of the live grid, e.g. an address held over from before a resize.
    pub fn color_cell<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        cell: CellId,
        color: Option<Rgb>,
    ) -> bool {
        if !self.contains(cell) {
            debug!("ignoring color for stale cell ({}, {})", cell.row, cell.col);
            return false;
        }
        let index = cell.index(self.size.get());
        self.cells[index] = color;
        surface.set_cell_color(cell, color);
        true
    }

    /// Reset every cell to cleared.
    pub fn clear_all<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.cells.iter_mut().for_each(|c| *c = None);
        surface.clear_cells();
    }
}

//  Tests
