// Copyright 2026 the Lectern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input events delivered during a paint pass.
//!
//! The host collects the events of one redraw into an [`InputFrame`]. Controls
//! claim the events that fall inside their rectangle; a claimed event is
//! consumed and no other control sees it. While a field paints, the frame is
//! scoped to the rectangle the host allocated it, so a control clipped away
//! by a fade cannot claim events meant for the next field. Measurement passes
//! always run with an empty frame.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};

/// A pointer or keyboard event.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed and released at `pos`.
    Click {
        /// Pointer position.
        pos: Point,
    },
    /// Primary button held while the pointer is at `pos`.
    Drag {
        /// Pointer position.
        pos: Point,
    },
    /// Text committed into the control at `pos`.
    Type {
        /// Pointer position of the focused control.
        pos: Point,
        /// The committed text.
        text: String,
    },
    /// Secondary button (context menu) activation at `pos`.
    ContextClick {
        /// Pointer position.
        pos: Point,
    },
}

impl InputEvent {
    /// Position the event was delivered at.
    #[must_use]
    pub fn pos(&self) -> Point {
        match self {
            Self::Click { pos }
            | Self::Drag { pos }
            | Self::Type { pos, .. }
            | Self::ContextClick { pos } => *pos,
        }
    }
}

/// The events of one redraw, each consumable once.
#[derive(Clone, Debug, Default)]
pub struct InputFrame {
    events: Vec<Option<InputEvent>>,
    /// Active scopes, each already intersected with the one below it.
    scopes: Vec<Rect>,
}

impl InputFrame {
    /// Creates an empty frame.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a frame holding `events`.
    #[must_use]
    pub fn from_events(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().map(Some).collect(),
            scopes: Vec::new(),
        }
    }

    /// Appends an event.
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(Some(event));
    }

    /// Returns whether every event has been consumed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.iter().all(Option::is_none)
    }

    /// Restricts every take to `rect` until the matching
    /// [`pop_scope`](Self::pop_scope). Scopes nest by intersection.
    pub fn push_scope(&mut self, rect: Rect) {
        let rect = self.scopes.last().map_or(rect, |outer| outer.intersect(rect));
        self.scopes.push(rect);
    }

    /// Removes the innermost scope.
    pub fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    /// Removes and returns the first unconsumed event inside `rect` and the
    /// current scope that `accept` selects.
    pub fn take_in(
        &mut self,
        rect: Rect,
        mut accept: impl FnMut(&InputEvent) -> bool,
    ) -> Option<InputEvent> {
        let rect = self.scopes.last().map_or(rect, |scope| scope.intersect(rect));
        self.events
            .iter_mut()
            .find(|slot| {
                slot.as_ref()
                    .is_some_and(|e| rect.contains(e.pos()) && accept(e))
            })
            .and_then(Option::take)
    }

    /// Consumes a primary click inside `rect`.
    pub fn take_click(&mut self, rect: Rect) -> bool {
        self.take_in(rect, |e| matches!(e, InputEvent::Click { .. }))
            .is_some()
    }

    /// Consumes a secondary click inside `rect`, returning its position.
    pub fn take_context_click(&mut self, rect: Rect) -> Option<Point> {
        self.take_in(rect, |e| matches!(e, InputEvent::ContextClick { .. }))
            .map(|e| e.pos())
    }

    /// Consumes a drag inside `rect`, returning the pointer position.
    pub fn take_drag(&mut self, rect: Rect) -> Option<Point> {
        self.take_in(rect, |e| matches!(e, InputEvent::Drag { .. }))
            .map(|e| e.pos())
    }

    /// Consumes committed text inside `rect`.
    pub fn take_text(&mut self, rect: Rect) -> Option<String> {
        match self.take_in(rect, |e| matches!(e, InputEvent::Type { .. })) {
            Some(InputEvent::Type { text, .. }) => Some(text),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_consumed_once() {
        let mut frame = InputFrame::from_events([InputEvent::Click {
            pos: Point::new(5.0, 5.0),
        }]);
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(frame.take_click(rect));
        assert!(!frame.take_click(rect));
        assert!(frame.is_empty());
    }

    #[test]
    fn events_outside_rect_are_left_alone() {
        let mut frame = InputFrame::from_events([InputEvent::ContextClick {
            pos: Point::new(50.0, 5.0),
        }]);
        assert_eq!(frame.take_context_click(Rect::new(0.0, 0.0, 10.0, 10.0)), None);
        assert_eq!(
            frame.take_context_click(Rect::new(40.0, 0.0, 60.0, 10.0)),
            Some(Point::new(50.0, 5.0))
        );
    }

    #[test]
    fn scopes_clip_control_rects() {
        let mut frame = InputFrame::from_events([InputEvent::Click {
            pos: Point::new(5.0, 15.0),
        }]);
        let control = Rect::new(0.0, 0.0, 10.0, 18.0);

        frame.push_scope(Rect::new(0.0, 0.0, 10.0, 20.0));
        frame.push_scope(Rect::new(0.0, 10.0, 10.0, 30.0));
        frame.push_scope(Rect::new(0.0, 0.0, 10.0, 10.0));
        // Disjoint from the scope below it.
        assert!(!frame.take_click(control));
        frame.pop_scope();
        assert!(frame.take_click(control));
        frame.pop_scope();
        frame.pop_scope();
        assert!(frame.is_empty());
    }

    #[test]
    fn kinds_are_filtered() {
        let mut frame = InputFrame::from_events([
            InputEvent::Drag {
                pos: Point::new(1.0, 1.0),
            },
            InputEvent::Type {
                pos: Point::new(1.0, 1.0),
                text: "hi".into(),
            },
        ]);
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!frame.take_click(rect));
        assert_eq!(frame.take_text(rect).as_deref(), Some("hi"));
        assert_eq!(frame.take_drag(rect), Some(Point::new(1.0, 1.0)));
    }
}
