//! Application state owned by the [`Controller`](crate::controller::Controller).
//!
//! There is exactly one [`ApplicationState`] per controller.  It is never
//! shared through globals: the controller owns it and hands the relevant
//! fields to the grid on every call.

use crate::color::Rgb;
use std::fmt;

/// Smallest accepted grid dimension.
pub const MIN_SIZE: usize = 1;
/// Largest accepted grid dimension.
pub const MAX_SIZE: usize = 100;
/// Grid dimension used at startup unless the config says otherwise.
pub const DEFAULT_SIZE: usize = 16;

/// A grid dimension validated to lie in `MIN_SIZE..=MAX_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GridSize(usize);

/// A candidate grid size outside the accepted range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SizeError {
    #[error("grid size {0} is outside {min}..={max}", min = MIN_SIZE, max = MAX_SIZE)]
    OutOfRange(i64),
}

impl GridSize {
    /// Validate `candidate`.
    ///
    /// Signed input is accepted so that values straight from a slider or a
    /// replay file (which may be negative) are rejected here rather than
    /// wrapped by a cast.
    pub fn new(candidate: i64) -> Result<Self, SizeError> {
        if candidate < MIN_SIZE as i64 || candidate > MAX_SIZE as i64 {
            return Err(SizeError::OutOfRange(candidate));
        }
        Ok(Self(candidate as usize))
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// Total number of cells in a square grid of this size.
    pub fn cell_count(self) -> usize {
        self.0 * self.0
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self(DEFAULT_SIZE)
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a coloring action turns the current color into a cell color.
///
/// Only [`Mode::Color`] exists.  New variants get their own arm in
/// [`Mode::cell_color`]; call sites do not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Paint the cell with the current color.
    #[default]
    Color,
}

impl Mode {
    /// The color a cell receives when this mode is applied.
    pub fn cell_color(self, current: Rgb) -> Option<Rgb> {
        match self {
            Mode::Color => Some(current),
        }
    }
}

/// Mutable interaction state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationState {
    pub current_color: Rgb,
    pub current_size: GridSize,
    pub current_mode: Mode,
    /// Whether a drag is in progress, so entered cells get colored.
    pub is_pointer_down: bool,
}

impl ApplicationState {
    /// Defaults with a specific starting size.
    pub fn with_size(size: GridSize) -> Self {
        Self {
            current_size: size,
            ..Self::default()
        }
    }
}

impl Default for ApplicationState {
    fn default() -> Self {
        Self {
            current_color: Rgb::BLACK,
            current_size: GridSize::default(),
            current_mode: Mode::Color,
            is_pointer_down: false,
        }
    }
}

/// Text shown next to the size slider, e.g. `"16 x 16"`.
pub fn size_label(size: impl fmt::Display) -> String {
    format!("{} x {}", size, size)
}
