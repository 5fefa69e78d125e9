//! Input events.
//!
//! [`InputEvent`] is the vocabulary every front end speaks: the GTK surface
//! translates widget signals into it, and the replay reader parses it from
//! newline-delimited JSON.
//!
//! # Wire format
//!
//! Events are internally tagged by an `"event"` field in `snake_case`:
//!
//! ```json
//! {"event":"pointer_press","row":5,"col":5}
//! {"event":"pointer_down"}
//! {"event":"touch_move","x":10.0,"y":12.5}
//! {"event":"resize","size":32}
//! {"event":"clear"}
//! ```

use crate::grid::CellId;
use serde::{Deserialize, Serialize};

/// One piece of user input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum InputEvent {
    /// Primary button pressed on the surface but not over any cell.
    PointerDown,
    /// Primary button pressed over a cell.
    PointerPress { row: usize, col: usize },
    /// Pointer moved onto a cell.
    PointerEnter { row: usize, col: usize },
    /// Primary button released anywhere.
    PointerRelease,
    /// Pointer left the drawing surface.
    PointerLeave,
    /// A touch began at a surface coordinate.
    TouchStart { x: f64, y: f64 },
    /// An active touch moved to a surface coordinate.
    TouchMove { x: f64, y: f64 },
    /// The touch ended or was cancelled.
    TouchEnd,
    SelectDefaultColor,
    SelectRandomColor,
    /// The slider is being dragged; only the label follows it.
    SliderMoved,
    /// The slider settled on a value; resize to it.
    SliderCommitted,
    /// Resize to an explicit candidate, validated by the controller.
    Resize { size: i64 },
    Clear,
}

impl InputEvent {
    pub fn pointer_press(cell: CellId) -> Self {
        InputEvent::PointerPress {
            row: cell.row,
            col: cell.col,
        }
    }

    pub fn pointer_enter(cell: CellId) -> Self {
        InputEvent::PointerEnter {
            row: cell.row,
            col: cell.col,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tagged_events() {
        let e: InputEvent =
            serde_json::from_str(r#"{"event":"pointer_press","row":5,"col":7}"#).unwrap();
        assert_eq!(e, InputEvent::PointerPress { row: 5, col: 7 });

        let e: InputEvent = serde_json::from_str(r#"{"event":"clear"}"#).unwrap();
        assert_eq!(e, InputEvent::Clear);

        let e: InputEvent =
            serde_json::from_str(r#"{"event":"touch_move","x":1.5,"y":2}"#).unwrap();
        assert_eq!(e, InputEvent::TouchMove { x: 1.5, y: 2.0 });
    }

    #[test]
    fn pointer_down_has_no_cell() {
        let e: InputEvent = serde_json::from_str(r#"{"event":"pointer_down"}"#).unwrap();
        assert_eq!(e, InputEvent::PointerDown);
    }

    #[test]
    fn negative_resize_candidate_parses() {
        // Range checking belongs to the controller, not the parser.
        let e: InputEvent = serde_json::from_str(r#"{"event":"resize","size":-5}"#).unwrap();
        assert_eq!(e, InputEvent::Resize { size: -5 });
    }

    #[test]
    fn unknown_event_is_an_error() {
        assert!(serde_json::from_str::<InputEvent>(r#"{"event":"erase"}"#).is_err());
        assert!(serde_json::from_str::<InputEvent>(r#"{"row":1}"#).is_err());
    }

    #[test]
    fn constructors_from_cell() {
        let c = CellId::new(3, 4);
        assert_eq!(InputEvent::pointer_press(c), InputEvent::PointerPress { row: 3, col: 4 });
        assert_eq!(InputEvent::pointer_enter(c), InputEvent::PointerEnter { row: 3, col: 4 });
    }
}
