//! [`Surface`](crate::traits::Surface) implementations.
//!
//! [`headless`] keeps everything in memory and backs scripted replays.
//! When the `surface-gtk` feature is enabled, [`gtk::run_main_loop`] opens
//! a GTK4 window and drives the controller from widget signals.

pub mod headless;

#[cfg(feature = "surface-gtk")]
pub mod gtk;
