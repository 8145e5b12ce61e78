//! Drag handling for the overlay.
//!
//! The controller turns pointer and touch gestures into absolute overlay
//! positions. It never touches the [`TransformModel`](crate::TransformModel)
//! itself: [`InteractionController::handle`] returns the new position and the
//! caller applies it.
//!
//! Coordinates are whatever space the host reports pointer events in (client
//! pixels in a browser). Only differences between them matter, so the
//! overlay does not jump to the pointer when a drag starts.

use log::debug;

use crate::geometry::Position;

/// A pointer or touch gesture delivered to the editor.
///
/// `PointerDown` and `TouchStart` are only sent when the gesture begins over
/// the overlay. Move, up, and leave events come from the preview container.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    PointerDown(Position),
    PointerMove(Position),
    PointerUp,
    /// The pointer left the preview container.
    PointerLeave,
    /// Touch started; carries every touch currently active.
    TouchStart(Vec<Position>),
    /// Touch moved; carries every touch currently active.
    TouchMove(Vec<Position>),
    TouchEnd,
    TouchCancel,
}

/// Drag state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Dragging with `reference_delta = pointer - position` captured at start.
    Dragging { reference_delta: Position },
}

/// State machine converting gestures into overlay positions.
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    state: DragState,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Handle a gesture.
    ///
    /// `current` is the overlay's position at the time of the event. Returns
    /// the position the overlay should move to, if any.
    pub fn handle(&mut self, gesture: Gesture, current: Position) -> Option<Position> {
        match gesture {
            Gesture::PointerDown(pointer) => {
                self.start(pointer, current);
                None
            }
            Gesture::TouchStart(touches) => {
                // A second finger landing mid-drag keeps the first drag going
                if let [touch] = touches.as_slice() {
                    self.start(*touch, current);
                }
                None
            }
            Gesture::PointerMove(pointer) => self.drag_to(pointer),
            Gesture::TouchMove(touches) => match touches.as_slice() {
                [touch] => self.drag_to(*touch),
                _ => None,
            },
            Gesture::PointerUp
            | Gesture::PointerLeave
            | Gesture::TouchEnd
            | Gesture::TouchCancel => {
                self.cancel();
                None
            }
        }
    }

    /// Return to `Idle` without producing a position.
    pub fn cancel(&mut self) {
        if self.is_dragging() {
            debug!("drag ended");
        }
        self.state = DragState::Idle;
    }

    fn start(&mut self, pointer: Position, current: Position) {
        let reference_delta = pointer - current;
        debug!(
            "drag started, reference delta ({}, {})",
            reference_delta.x, reference_delta.y
        );
        self.state = DragState::Dragging { reference_delta };
    }

    fn drag_to(&self, pointer: Position) -> Option<Position> {
        match self.state {
            DragState::Dragging { reference_delta } => Some(pointer - reference_delta),
            DragState::Idle => None,
        }
    }
}
