//! Scripted input: an [`EventSource`] that reads newline-delimited JSON.
//!
//! Each non-blank line is one [`InputEvent`] in the format documented in
//! [`event`](crate::event).  Lines that are not UTF-8 or fail to parse are
//! logged and skipped; an I/O error ends the replay.
//!
//! After a replay the final drawing can be captured as a [`Snapshot`].

use crate::color::Rgb;
use crate::controller::Controller;
use crate::event::InputEvent;
use crate::traits::{EventSource, Surface};
use log::{debug, error, info};
use rand::Rng;
use serde::Serialize;
use std::io::BufRead;

/// Errors produced while reading a replay stream.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// An [`EventSource`] over any buffered reader (a file, stdin, a byte slice).
pub struct ReplaySource<B: BufRead> {
    reader: B,
    skipped: usize,
}

impl<B: BufRead> ReplaySource<B> {
    pub fn new(reader: B) -> Self {
        Self { reader, skipped: 0 }
    }

    /// Number of malformed lines skipped so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<B: BufRead> EventSource for ReplaySource<B> {
    type Error = ReplayError;

    fn run(&mut self, sink: &mut dyn FnMut(InputEvent)) -> Result<(), ReplayError> {
        let mut buf = Vec::new();
        let mut line_no = 0usize;
        loop {
            buf.clear();
            if self.reader.read_until(b'\n', &mut buf)? == 0 {
                return Ok(());
            }
            line_no += 1;
            let text = match std::str::from_utf8(&buf) {
                Ok(text) => text.trim(),
                Err(e) => {
                    self.skipped += 1;
                    error!("line {}: not valid UTF-8 ({})", line_no, e);
                    continue;
                }
            };
            if text.is_empty() {
                continue;
            }
            match serde_json::from_str::<InputEvent>(text) {
                Ok(event) => {
                    debug!("line {}: {:?}", line_no, event);
                    sink(event);
                }
                Err(e) => {
                    self.skipped += 1;
                    error!("line {}: bad event {} ({})", line_no, text, e);
                }
            }
        }
    }
}

/// Feed every event from `source` into `controller`.
///
/// Returns how many events were applied.
pub fn replay_into<E, S, R>(source: &mut E, controller: &mut Controller<S, R>) -> Result<usize, E::Error>
where
    E: EventSource,
    S: Surface,
    R: Rng,
{
    let mut applied = 0usize;
    source.run(&mut |event| {
        controller.handle(event);
        applied += 1;
    })?;
    info!("replayed {} event(s)", applied);
    Ok(applied)
}

/// The visible outcome of a session: grid size, active color, and every
/// cell's color in row-major order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub size: usize,
    pub current_color: Rgb,
    pub cells: Vec<Option<Rgb>>,
}

impl Snapshot {
    pub fn capture<S: Surface, R: Rng>(controller: &Controller<S, R>) -> Self {
        Self {
            size: controller.grid().size().get(),
            current_color: controller.state().current_color,
            cells: controller.grid().colors().to_vec(),
        }
    }
}
