//! **etchsketch**: a square drawing grid whose cells take the current
//! color as the pointer drags over them.
//!
//! The grid is `size × size` cells (`1..=100`, 16 by default).  Resizing
//! rebuilds it from scratch, which discards the drawing.  The current color
//! is either black or a random RGB triple.
//!
//! # Architecture
//!
//! The crate is organised around two core traits:
//!
//! * [`traits::Surface`] abstracts the display (cells, the size slider and
//!   its label) so the drawing logic is not coupled to any toolkit.
//! * [`traits::EventSource`] abstracts where input comes from (a GTK
//!   window, a replay file, a test harness).
//!
//! [`grid::Grid`] owns the cell model and [`controller::Controller`] turns
//! [`event::InputEvent`]s into grid calls.  Concrete surfaces live in
//! [`surface`].

pub mod color;
pub mod config;
pub mod controller;
pub mod event;
pub mod grid;
pub mod replay;
pub mod state;
pub mod surface;
pub mod traits;
