//! GTK4 front end that runs on the **main thread**.
//!
//! # Widget tree
//!
//! ```text
//! window
//! └ .sketch                      (vertical box)
//!     ├ .controls                (horizontal box)
//!     │   ├ .default-color       (button)
//!     │   ├ .random-color        (button)
//!     │   └ .clear               (button)
//!     ├ .size-row
//!     │   ├ .size-slider         (GtkScale, 1..=100)
//!     │   └ .size-value          (label, "16 x 16")
//!     ├ .canvas                  (GtkDrawingArea, cells painted with cairo)
//!     └ .instructions            (label)
//! ```
//!
//! Cells are not widgets: a 100×100 grid would mean ten thousand of them.
//! The drawing area paints the shared [`CanvasModel`] instead, and the
//! [`GtkSurface`] updates that model and queues a redraw.
//!
//! Every signal handler translates its signal into an [`InputEvent`] and
//! hands it to the shared [`Controller`].

use crate::color::Rgb;
use crate::config::Config;
use crate::controller::Controller;
use crate::event::InputEvent;
use crate::grid::{cell_at, CellId};
use crate::traits::{Handle, Surface};
use gtk4::prelude::*;
use gtk4::{cairo, gdk, glib};
use log::{debug, error, info, warn};
use rand::rngs::ThreadRng;
use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

//  Default CSS

const DEFAULT_CSS: &str = r#"
.sketch {
    padding: 16px;
}

.controls button {
    margin-right: 8px;
}

.size-value {
    min-width: 72px;
}

.canvas {
    border: 1px solid #999;
    background-color: white;
}

.instructions {
    color: #666;
    font-size: small;
}
"#;

/// Separator line color between cells.
const BORDER_RGB: (f64, f64, f64) = (0.867, 0.867, 0.867);

//  Canvas model

/// What the drawing area paints: one optional color per cell, row-major.
#[derive(Debug, Default)]
struct CanvasModel {
    size: usize,
    cells: Vec<Option<Rgb>>,
    border: bool,
}

impl CanvasModel {
    fn paint(&self, cr: &cairo::Context, width: f64, height: f64) -> Result<(), cairo::Error> {
        cr.set_source_rgb(1.0, 1.0, 1.0);
        cr.paint()?;
        if self.size == 0 {
            return Ok(());
        }

        let cw = width / self.size as f64;
        let ch = height / self.size as f64;

        for (i, color) in self.cells.iter().enumerate() {
            let Some(color) = color else { continue };
            let (r, g, b) = color.to_unit();
            let (row, col) = (i / self.size, i % self.size);
            cr.set_source_rgb(r, g, b);
            cr.rectangle(col as f64 * cw, row as f64 * ch, cw, ch);
            cr.fill()?;
        }

        if self.border {
            let (r, g, b) = BORDER_RGB;
            cr.set_source_rgb(r, g, b);
            cr.set_line_width(0.5);
            for i in 1..self.size {
                let x = i as f64 * cw;
                let y = i as f64 * ch;
                cr.move_to(x, 0.0);
                cr.line_to(x, height);
                cr.move_to(0.0, y);
                cr.line_to(width, y);
            }
            cr.stroke()?;
        }
        Ok(())
    }
}

//  Widgets

/// Every widget the window is built from.
#[derive(Clone)]
struct Widgets {
    canvas: gtk4::DrawingArea,
    clear_button: gtk4::Button,
    random_button: gtk4::Button,
    default_button: gtk4::Button,
    size_label: gtk4::Label,
    size_slider: gtk4::Scale,
    instructions: gtk4::Label,
}

impl Widgets {
    fn build(window: &gtk4::Window, canvas_px: i32) -> Self {
        let root = gtk4::Box::new(gtk4::Orientation::Vertical, 12);
        root.add_css_class("sketch");

        let controls = gtk4::Box::new(gtk4::Orientation::Horizontal, 0);
        controls.add_css_class("controls");
        let default_button = gtk4::Button::with_label("Black");
        default_button.add_css_class("default-color");
        let random_button = gtk4::Button::with_label("Random");
        random_button.add_css_class("random-color");
        let clear_button = gtk4::Button::with_label("Clear");
        clear_button.add_css_class("clear");
        controls.append(&default_button);
        controls.append(&random_button);
        controls.append(&clear_button);
        root.append(&controls);

        let size_row = gtk4::Box::new(gtk4::Orientation::Horizontal, 8);
        size_row.add_css_class("size-row");
        let size_slider = gtk4::Scale::with_range(gtk4::Orientation::Horizontal, 1.0, 100.0, 1.0);
        size_slider.add_css_class("size-slider");
        size_slider.set_digits(0);
        size_slider.set_draw_value(false);
        size_slider.set_hexpand(true);
        let size_label = gtk4::Label::new(None);
        size_label.add_css_class("size-value");
        size_row.append(&size_slider);
        size_row.append(&size_label);
        root.append(&size_row);

        let canvas = gtk4::DrawingArea::new();
        canvas.add_css_class("canvas");
        canvas.set_content_width(canvas_px);
        canvas.set_content_height(canvas_px);
        canvas.set_halign(gtk4::Align::Center);
        root.append(&canvas);

        let instructions = gtk4::Label::new(Some(
            "Press and drag over the grid to draw. Move the slider to resize (this clears the drawing).",
        ));
        instructions.add_css_class("instructions");
        instructions.set_wrap(true);
        root.append(&instructions);

        window.set_child(Some(&root));

        Self {
            canvas,
            clear_button,
            random_button,
            default_button,
            size_label,
            size_slider,
            instructions,
        }
    }
}

//  Surface

/// [`Surface`] backed by GTK widgets.
///
/// Handles are optional so a partially built window can still be checked
/// by [`Controller::start`].
pub struct GtkSurface {
    canvas: Option<gtk4::DrawingArea>,
    clear_button: Option<gtk4::Button>,
    random_button: Option<gtk4::Button>,
    default_button: Option<gtk4::Button>,
    size_label: Option<gtk4::Label>,
    size_slider: Option<gtk4::Scale>,
    instructions: Option<gtk4::Label>,
    model: Rc<RefCell<CanvasModel>>,
}

impl GtkSurface {
    fn from_widgets(w: &Widgets, model: Rc<RefCell<CanvasModel>>) -> Self {
        Self {
            canvas: Some(w.canvas.clone()),
            clear_button: Some(w.clear_button.clone()),
            random_button: Some(w.random_button.clone()),
            default_button: Some(w.default_button.clone()),
            size_label: Some(w.size_label.clone()),
            size_slider: Some(w.size_slider.clone()),
            instructions: Some(w.instructions.clone()),
            model,
        }
    }

    fn redraw(&self) {
        if let Some(canvas) = &self.canvas {
            canvas.queue_draw();
        }
    }
}

impl Surface for GtkSurface {
    fn has_handle(&self, handle: Handle) -> bool {
        match handle {
            Handle::Container => self.canvas.is_some(),
            Handle::ClearButton => self.clear_button.is_some(),
            Handle::RandomColorButton => self.random_button.is_some(),
            Handle::DefaultColorButton => self.default_button.is_some(),
            Handle::SizeLabel => self.size_label.is_some(),
            Handle::SizeSlider => self.size_slider.is_some(),
            Handle::Instructions => self.instructions.is_some(),
        }
    }

    fn remove_cells(&mut self) {
        let mut model = self.model.borrow_mut();
        model.cells.clear();
        model.size = 0;
        drop(model);
        self.redraw();
    }

    fn create_cell(&mut self, cell: CellId) {
        let mut model = self.model.borrow_mut();
        model.cells.push(None);
        model.size = model.size.max(cell.row + 1).max(cell.col + 1);
        drop(model);
        self.redraw();
    }

    fn set_cell_color(&mut self, cell: CellId, color: Option<Rgb>) {
        let mut model = self.model.borrow_mut();
        let size = model.size;
        if cell.row < size && cell.col < size {
            model.cells[cell.index(size)] = color;
        }
        drop(model);
        self.redraw();
    }

    fn clear_cells(&mut self) {
        self.model
            .borrow_mut()
            .cells
            .iter_mut()
            .for_each(|c| *c = None);
        self.redraw();
    }

    fn read_slider_value(&self) -> i64 {
        self.size_slider
            .as_ref()
            .map(|s| s.value().round() as i64)
            .unwrap_or_default()
    }

    fn write_slider_value(&mut self, value: usize) {
        if let Some(slider) = &self.size_slider {
            slider.set_value(value as f64);
        }
    }

    fn set_size_label(&mut self, text: &str) {
        if let Some(label) = &self.size_label {
            label.set_text(text);
        }
    }

    fn cell_at_point(&self, x: f64, y: f64) -> Option<CellId> {
        let canvas = self.canvas.as_ref()?;
        cell_at(
            x,
            y,
            canvas.width() as f64,
            canvas.height() as f64,
            self.model.borrow().size,
        )
    }
}

//  Event dispatch

type SharedController = Rc<RefCell<Controller<GtkSurface, ThreadRng>>>;

/// Hand `event` to the controller.
///
/// Signals emitted while the controller is already running (e.g. the
/// slider's `value-changed` fired by the controller itself writing the
/// slider) are dropped instead of re-entering it.
fn dispatch(controller: &SharedController, event: InputEvent) {
    match controller.try_borrow_mut() {
        Ok(mut c) => c.handle(event),
        Err(_) => debug!("controller busy, dropping {:?}", event),
    }
}

fn is_touch(controller: &impl IsA<gtk4::EventController>) -> bool {
    controller
        .current_event_device()
        .is_some_and(|d| d.source() == gdk::InputSource::Touchscreen)
}

fn connect_input(w: &Widgets, controller: &SharedController, model: &Rc<RefCell<CanvasModel>>, debounce_ms: u64) {
    let locate = {
        let canvas = w.canvas.clone();
        let model = model.clone();
        move |x: f64, y: f64| {
            cell_at(
                x,
                y,
                canvas.width() as f64,
                canvas.height() as f64,
                model.borrow().size,
            )
        }
    };
    let locate = Rc::new(locate);

    //  Pointer press / release

    let click = gtk4::GestureClick::new();
    click.set_button(gdk::BUTTON_PRIMARY);
    {
        let controller = controller.clone();
        let locate = locate.clone();
        click.connect_pressed(move |gesture, _n_press, x, y| {
            if is_touch(gesture) {
                return;
            }
            let event = match locate(x, y) {
                Some(cell) => InputEvent::pointer_press(cell),
                None => InputEvent::PointerDown,
            };
            dispatch(&controller, event);
        });
    }
    {
        let controller = controller.clone();
        click.connect_released(move |gesture, _n_press, _x, _y| {
            if !is_touch(gesture) {
                dispatch(&controller, InputEvent::PointerRelease);
            }
        });
    }
    {
        let controller = controller.clone();
        click.connect_cancel(move |_, _| {
            dispatch(&controller, InputEvent::PointerRelease);
        });
    }
    w.canvas.add_controller(click);

    //  Pointer enter (per cell) / leave (surface)

    let motion = gtk4::EventControllerMotion::new();
    let last_cell: Rc<Cell<Option<CellId>>> = Rc::new(Cell::new(None));
    {
        let controller = controller.clone();
        let locate = locate.clone();
        let last_cell = last_cell.clone();
        motion.connect_motion(move |_, x, y| {
            let cell = locate(x, y);
            if cell == last_cell.get() {
                return;
            }
            last_cell.set(cell);
            if let Some(cell) = cell {
                dispatch(&controller, InputEvent::pointer_enter(cell));
            }
        });
    }
    {
        let controller = controller.clone();
        motion.connect_leave(move |_| {
            last_cell.set(None);
            dispatch(&controller, InputEvent::PointerLeave);
        });
    }
    w.canvas.add_controller(motion);

    //  Touch

    let drag = gtk4::GestureDrag::new();
    drag.set_touch_only(true);
    {
        let controller = controller.clone();
        drag.connect_drag_begin(move |_, x, y| {
            dispatch(&controller, InputEvent::TouchStart { x, y });
        });
    }
    {
        let controller = controller.clone();
        drag.connect_drag_update(move |gesture, dx, dy| {
            if let Some((x, y)) = gesture.start_point() {
                dispatch(&controller, InputEvent::TouchMove { x: x + dx, y: y + dy });
            }
        });
    }
    {
        let controller = controller.clone();
        drag.connect_drag_end(move |_, _, _| {
            dispatch(&controller, InputEvent::TouchEnd);
        });
    }
    w.canvas.add_controller(drag);

    //  Buttons

    {
        let controller = controller.clone();
        w.default_button.connect_clicked(move |_| {
            dispatch(&controller, InputEvent::SelectDefaultColor);
        });
    }
    {
        let controller = controller.clone();
        w.random_button.connect_clicked(move |_| {
            dispatch(&controller, InputEvent::SelectRandomColor);
        });
    }
    {
        let controller = controller.clone();
        w.clear_button.connect_clicked(move |_| {
            dispatch(&controller, InputEvent::Clear);
        });
    }

    //  Slider: label follows immediately, resize once it settles

    let generation: Rc<Cell<u64>> = Rc::new(Cell::new(0));
    let controller = controller.clone();
    w.size_slider.connect_value_changed(move |_| {
        dispatch(&controller, InputEvent::SliderMoved);
        if debounce_ms == 0 {
            dispatch(&controller, InputEvent::SliderCommitted);
            return;
        }
        let mine = generation.get().wrapping_add(1);
        generation.set(mine);
        let generation = generation.clone();
        let controller = controller.clone();
        glib::timeout_add_local_once(Duration::from_millis(debounce_ms), move || {
            if generation.get() == mine {
                dispatch(&controller, InputEvent::SliderCommitted);
            }
        });
    });
}

//  Public API

/// Open the window and run the GLib main loop on the **current** (main)
/// thread until the window is closed.
pub fn run_main_loop(config: &Config, css_path: Option<PathBuf>) {
    if let Err(e) = gtk4::init() {
        error!("failed to initialise GTK4: {}", e);
        return;
    }
    info!("GTK4 initialised on main thread");

    load_css(&css_path);

    let window = gtk4::Window::new();
    window.set_title(Some("Etch-a-Sketch"));

    let widgets = Widgets::build(&window, config.window.canvas_px);
    let model = Rc::new(RefCell::new(CanvasModel {
        border: config.canvas.cell_border,
        ..CanvasModel::default()
    }));
    {
        let model = model.clone();
        widgets.canvas.set_draw_func(move |_, cr, width, height| {
            if let Err(e) = model.borrow().paint(cr, width as f64, height as f64) {
                warn!("canvas paint failed: {}", e);
            }
        });
    }

    let surface = GtkSurface::from_widgets(&widgets, model.clone());
    let controller: SharedController = Rc::new(RefCell::new(Controller::with_initial_size(
        surface,
        rand::thread_rng(),
        config.canvas.initial_grid_size(),
    )));

    // Start before wiring signals so the initial slider write is not
    // mistaken for user input.  A failed start leaves the window open in
    // whatever state it reached.
    if let Err(e) = controller.borrow_mut().start() {
        error!("startup failed: {}", e);
    }
    connect_input(&widgets, &controller, &model, config.window.resize_debounce_ms);

    let main_loop = glib::MainLoop::new(None, false);
    {
        let main_loop = main_loop.clone();
        window.connect_close_request(move |_| {
            main_loop.quit();
            glib::Propagation::Proceed
        });
    }

    window.present();
    info!("entering GLib main loop");
    main_loop.run();
    info!("GLib main loop exited");
}

//  CSS loading

fn load_css(css_path: &Option<PathBuf>) {
    let provider = gtk4::CssProvider::new();

    let css_content = match css_path.as_ref().filter(|p| p.exists()) {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(content) => {
                info!("user CSS: {} ({} bytes)", p.display(), content.len());
                content
            }
            Err(e) => {
                warn!("CSS read failed ({}): {}, using built-in", p.display(), e);
                DEFAULT_CSS.to_string()
            }
        },
        None => {
            info!("no user CSS, using built-in default");
            DEFAULT_CSS.to_string()
        }
    };

    #[allow(deprecated)]
    provider.load_from_data(&css_content);

    match gdk::Display::default() {
        Some(display) => {
            gtk4::style_context_add_provider_for_display(
                &display,
                &provider,
                gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
            );
        }
        None => warn!("no GDK display, CSS will not be applied"),
    }
}
