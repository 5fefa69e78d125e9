//! The capability interface between the drawing logic and whatever displays
//! it.
//!
//! The [`Grid`](crate::grid::Grid) and the
//! [`Controller`](crate::controller::Controller) only ever talk to a
//! [`Surface`].  A GTK window, an in-memory headless surface, or a test
//! recorder can all sit behind it.

use crate::color::Rgb;
use crate::event::InputEvent;
use crate::grid::CellId;
use std::fmt;

/// Named controls a surface must provide before the controller will start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    /// The node whose children are the grid cells.
    Container,
    ClearButton,
    RandomColorButton,
    DefaultColorButton,
    /// Text showing the current size (`"16 x 16"`).
    SizeLabel,
    SizeSlider,
    Instructions,
}

impl Handle {
    /// Every handle, in the order they are checked at startup.
    pub const ALL: [Handle; 7] = [
        Handle::Container,
        Handle::ClearButton,
        Handle::RandomColorButton,
        Handle::DefaultColorButton,
        Handle::SizeLabel,
        Handle::SizeSlider,
        Handle::Instructions,
    ];
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Handle::Container => "container",
            Handle::ClearButton => "clear button",
            Handle::RandomColorButton => "random color button",
            Handle::DefaultColorButton => "default color button",
            Handle::SizeLabel => "size label",
            Handle::SizeSlider => "size slider",
            Handle::Instructions => "instructions",
        };
        f.write_str(name)
    }
}

/// A display surface that shows grid cells and a handful of controls.
///
/// None of these operations can fail: the surface is local and in-process.
/// Implementations only reflect what they are told; all validation happens
/// in the grid and the controller.
pub trait Surface {
    /// Whether the surface provides `handle`.
    fn has_handle(&self, handle: Handle) -> bool;

    /// Remove every cell from the container.
    fn remove_cells(&mut self);

    /// Append one cell.  Cells arrive in row-major order after
    /// [`remove_cells`](Surface::remove_cells).
    fn create_cell(&mut self, cell: CellId);

    /// Show `color` on `cell`; `None` clears it.
    fn set_cell_color(&mut self, cell: CellId, color: Option<Rgb>);

    /// Clear the color of every cell, keeping the cells themselves.
    fn clear_cells(&mut self);

    /// Current numeric value of the size slider.
    fn read_slider_value(&self) -> i64;

    /// Move the size slider to `value`.
    fn write_slider_value(&mut self, value: usize);

    /// Replace the text next to the size slider.
    fn set_size_label(&mut self, text: &str);

    /// The cell under a surface coordinate, if any.
    ///
    /// Used to resolve touch input, which carries a point rather than a
    /// target cell.
    fn cell_at_point(&self, x: f64, y: f64) -> Option<CellId>;
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn has_handle(&self, handle: Handle) -> bool {
        (**self).has_handle(handle)
    }

    fn remove_cells(&mut self) {
        (**self).remove_cells()
    }

    fn create_cell(&mut self, cell: CellId) {
        (**self).create_cell(cell)
    }

    fn set_cell_color(&mut self, cell: CellId, color: Option<Rgb>) {
        (**self).set_cell_color(cell, color)
    }

    fn clear_cells(&mut self) {
        (**self).clear_cells()
    }

    fn read_slider_value(&self) -> i64 {
        (**self).read_slider_value()
    }

    fn write_slider_value(&mut self, value: usize) {
        (**self).write_slider_value(value)
    }

    fn set_size_label(&mut self, text: &str) {
        (**self).set_size_label(text)
    }

    fn cell_at_point(&self, x: f64, y: f64) -> Option<CellId> {
        (**self).cell_at_point(x, y)
    }
}

//  Event Source

/// A source of [`InputEvent`]s.
///
/// Implementations read from some transport (a file, stdin, an in-memory
/// list) and hand every parsed event to `sink` in arrival order.
///
/// # Contract
///
/// * [`run`](EventSource::run) returns once the source is exhausted or an
///   unrecoverable error occurs.
/// * Each event is passed to `sink` exactly once.
pub trait EventSource {
    /// The error type produced by this source.
    type Error: std::error::Error + Send + 'static;

    /// Forward every event into `sink`.
    fn run(&mut self, sink: &mut dyn FnMut(InputEvent)) -> Result<(), Self::Error>;
}
