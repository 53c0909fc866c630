// Copyright 2026 the Lectern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vertical layout cursor shared by all hooks rendering one field.

use kurbo::{Point, Rect};

/// Which half of the two-pass protocol is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pass {
    /// Off-screen execution whose only output is the accumulated height.
    Measure,
    /// Real execution at the host-supplied position, with input dispatch.
    Paint,
}

/// Tracks the paint position and accumulated height of one field render.
///
/// Each hook draws at [`resolve_rect`](Self::resolve_rect) and then reports
/// how much height it used; the composition root feeds that to
/// [`advance`](Self::advance). A height of zero advances nothing, so purely
/// logical decorators contribute no row and no spacing.
#[derive(Clone, Copy, Debug)]
pub struct RenderCursor {
    x: f64,
    width: f64,
    y: f64,
    last_row_height: f64,
    total: f64,
    spacing: f64,
    pass: Pass,
}

impl RenderCursor {
    /// Creates a cursor at `origin`.
    #[must_use]
    pub fn new(origin: Point, width: f64, spacing: f64, pass: Pass) -> Self {
        Self {
            x: origin.x,
            width,
            y: origin.y,
            last_row_height: 0.0,
            total: 0.0,
            spacing,
            pass,
        }
    }

    /// Records a row of `height` and moves past it.
    pub fn advance(&mut self, height: f64) {
        self.last_row_height = height;
        if height > 0.0 {
            self.y += height + self.spacing;
            self.total += height + self.spacing;
        }
    }

    /// Returns the rectangle a row of `height` would occupy at the current
    /// position, without advancing.
    #[must_use]
    pub fn resolve_rect(&self, height: f64) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + height.max(0.0))
    }

    /// Current paint position.
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Current vertical position.
    #[must_use]
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Available width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Height passed to the most recent [`advance`](Self::advance).
    #[must_use]
    pub fn last_row_height(&self) -> f64 {
        self.last_row_height
    }

    /// Total height consumed so far, spacing included.
    #[must_use]
    pub fn consumed(&self) -> f64 {
        self.total
    }

    /// Which pass this cursor belongs to.
    #[must_use]
    pub fn pass(&self) -> Pass {
        self.pass
    }

    /// Returns whether this is the off-screen measurement pass.
    #[must_use]
    pub fn is_measure(&self) -> bool {
        self.pass == Pass::Measure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_height_advances_nothing() {
        let mut cursor = RenderCursor::new(Point::new(0.0, 10.0), 100.0, 2.0, Pass::Paint);
        cursor.advance(0.0);
        assert_eq!(cursor.y(), 10.0);
        assert_eq!(cursor.consumed(), 0.0);
        assert_eq!(cursor.last_row_height(), 0.0);

        cursor.advance(18.0);
        assert_eq!(cursor.y(), 30.0);
        assert_eq!(cursor.consumed(), 20.0);
        assert_eq!(cursor.last_row_height(), 18.0);
    }

    #[test]
    fn resolve_rect_does_not_advance() {
        let cursor = RenderCursor::new(Point::new(5.0, 10.0), 100.0, 2.0, Pass::Measure);
        let rect = cursor.resolve_rect(18.0);
        assert_eq!(rect, Rect::new(5.0, 10.0, 105.0, 28.0));
        assert_eq!(cursor.y(), 10.0);
        assert!(cursor.is_measure());
    }

    #[test]
    fn negative_heights_are_ignored() {
        let mut cursor = RenderCursor::new(Point::ZERO, 100.0, 2.0, Pass::Paint);
        cursor.advance(-4.0);
        assert_eq!(cursor.consumed(), 0.0);
        assert_eq!(cursor.resolve_rect(-4.0).height(), 0.0);
    }
}
