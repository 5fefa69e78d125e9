//! The interaction controller that ties state, grid and surface together.
//!
//! [`Controller`] owns the [`ApplicationState`], the [`Grid`] and the
//! [`Surface`], and reacts to [`InputEvent`]s by updating state and calling
//! into the grid.  It is generic over the surface and the random source, so
//! it runs unchanged against GTK, the headless surface, or a test recorder.

use crate::color::Rgb;
use crate::event::InputEvent;
use crate::grid::{CellId, Grid};
use crate::state::{size_label, ApplicationState, GridSize, SizeError};
use crate::traits::{Handle, Surface};
use log::{debug, error, info, warn};
use rand::Rng;

/// Possible errors from the controller.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    /// The surface lacks a control the controller needs.
    #[error("required surface handle missing: {0}")]
    MissingHandle(Handle),
}

/// Routes input events into state changes and grid calls.
///
/// # Typical usage
///
/// ```ignore
/// let mut controller = Controller::new(HeadlessSurface::new(), rand::thread_rng());
/// controller.start()?;
/// controller.handle(InputEvent::PointerPress { row: 0, col: 0 });
/// ```
pub struct Controller<S: Surface, R: Rng> {
    surface: S,
    rng: R,
    state: ApplicationState,
    grid: Grid,
    started: bool,
}

impl<S: Surface, R: Rng> Controller<S, R> {
    /// Create a controller with default state.  Nothing is drawn until
    /// [`start`](Self::start).
    pub fn new(surface: S, rng: R) -> Self {
        Self::with_initial_size(surface, rng, GridSize::default())
    }

    /// Like [`new`](Self::new) but starting at `size` instead of 16.
    pub fn with_initial_size(surface: S, rng: R, size: GridSize) -> Self {
        Self {
            surface,
            rng,
            state: ApplicationState::with_size(size),
            grid: Grid::new(size),
            started: false,
        }
    }

    //  Accessors

    pub fn state(&self) -> &ApplicationState {
        &self.state
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Whether [`start`](Self::start) completed.
    pub fn is_started(&self) -> bool {
        self.started
    }

    //  Startup

    /// Check the surface and draw the initial grid.
    ///
    /// If any required handle is missing, the error is logged and returned
    /// and the surface is left untouched.
    pub fn start(&mut self) -> Result<(), ControllerError> {
        if let Some(missing) = Handle::ALL
            .iter()
            .copied()
            .find(|h| !self.surface.has_handle(*h))
        {
            error!("surface is missing the {}; not starting", missing);
            return Err(ControllerError::MissingHandle(missing));
        }

        let size = self.state.current_size;
        self.grid.build(&mut self.surface, size);
        self.surface.write_slider_value(size.get());
        self.surface.set_size_label(&size_label(size));
        self.started = true;
        info!("started with a {}x{} grid", size, size);
        Ok(())
    }

    //  Event handling

    /// Process a single [`InputEvent`].
    ///
    /// Events arriving before a successful [`start`](Self::start) are
    /// dropped, since there is no grid to act on.
    pub fn handle(&mut self, event: InputEvent) {
        if !self.started {
            debug!("dropping {:?}: controller not started", event);
            return;
        }
        match event {
            InputEvent::PointerDown => {
                self.state.is_pointer_down = true;
            }
            InputEvent::PointerPress { row, col } => {
                self.state.is_pointer_down = true;
                self.paint(CellId::new(row, col));
            }
            InputEvent::PointerEnter { row, col } => {
                if self.state.is_pointer_down {
                    self.paint(CellId::new(row, col));
                }
            }
            InputEvent::PointerRelease | InputEvent::PointerLeave | InputEvent::TouchEnd => {
                self.state.is_pointer_down = false;
            }
            InputEvent::TouchStart { x, y } => {
                self.state.is_pointer_down = true;
                self.paint_at(x, y);
            }
            InputEvent::TouchMove { x, y } => {
                if self.state.is_pointer_down {
                    self.paint_at(x, y);
                }
            }
            InputEvent::SelectDefaultColor => {
                self.state.current_color = Rgb::BLACK;
                debug!("color set to default");
            }
            InputEvent::SelectRandomColor => {
                self.state.current_color = Rgb::random(&mut self.rng);
                debug!("color set to {}", self.state.current_color);
            }
            InputEvent::SliderMoved => {
                let value = self.surface.read_slider_value();
                self.surface.set_size_label(&size_label(value));
            }
            InputEvent::SliderCommitted => {
                let value = self.surface.read_slider_value();
                if let Err(e) = self.resize(value) {
                    warn!("{}", e);
                }
            }
            InputEvent::Resize { size } => {
                if let Err(e) = self.resize(size) {
                    warn!("{}", e);
                }
            }
            InputEvent::Clear => {
                self.grid.clear_all(&mut self.surface);
                info!("cleared grid");
            }
        }
    }

    /// Rebuild the grid at `candidate` cells per side.
    ///
    /// Out-of-range candidates leave state, grid and surface unchanged.
    pub fn resize(&mut self, candidate: i64) -> Result<(), SizeError> {
        let size = GridSize::new(candidate)?;
        self.state.current_size = size;
        // Only write when it differs, so a resize driven by the slider
        // does not feed back into it.
        if self.surface.read_slider_value() != size.get() as i64 {
            self.surface.write_slider_value(size.get());
        }
        self.surface.set_size_label(&size_label(size));
        self.grid.build(&mut self.surface, size);
        info!("resized grid to {}x{}", size, size);
        Ok(())
    }

    //  Internal

    fn paint(&mut self, cell: CellId) {
        let color = self.state.current_mode.cell_color(self.state.current_color);
        self.grid.color_cell(&mut self.surface, cell, color);
    }

    fn paint_at(&mut self, x: f64, y: f64) {
        match self.surface.cell_at_point(x, y) {
            Some(cell) => self.paint(cell),
            None => debug!("no cell at ({:.1}, {:.1})", x, y),
        }
    }
}

//  Tests
