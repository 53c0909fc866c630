// Copyright 2026 the Lectern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Default controls.
//!
//! [`default_control`] is what a field gets when no decorator claims its
//! primary control. The other helpers are building blocks for decorators
//! that draw a control of their own.

use core::str::FromStr;

use kurbo::Rect;

use crate::decorator::FieldCx;
use crate::input::InputFrame;
use crate::paint::Control;
use crate::value::Value;

/// Splits a row into its label and control rectangles.
#[must_use]
pub fn split_row(rect: Rect, label_width: f64) -> (Rect, Rect) {
    let split = (rect.x0 + label_width).min(rect.x1);
    (
        Rect::new(rect.x0, rect.y0, split, rect.y1),
        Rect::new(split, rect.y0, rect.x1, rect.y1),
    )
}

/// Draws the standard control for the field's current value and applies
/// input to it. Returns the height drawn.
///
/// [`Value::Unit`] fields have no control and draw nothing.
pub fn default_control(cx: &mut FieldCx<'_>) -> f64 {
    if cx.value == Value::Unit {
        return 0.0;
    }
    let height = cx.config.row_height;
    let (label_rect, control_rect) = split_row(cx.row_rect(height), cx.config.label_width);
    cx.painter.label(label_rect, cx.label);

    let enabled = cx.enabled;
    match &mut cx.value {
        Value::Unit => {}
        Value::Bool(on) => {
            cx.painter.control(control_rect, Control::Toggle(*on), enabled);
            if enabled && cx.input.take_click(control_rect) {
                *on = !*on;
            }
        }
        Value::Int(v) => {
            cx.painter.control(control_rect, Control::IntField(*v), enabled);
            if enabled && let Some(parsed) = take_parsed::<i64>(cx.input, control_rect) {
                *v = parsed;
            }
        }
        Value::Float(v) => {
            cx.painter.control(control_rect, Control::FloatField(*v), enabled);
            if enabled && let Some(parsed) = take_parsed::<f64>(cx.input, control_rect) {
                *v = parsed;
            }
        }
        Value::Text(text) => {
            cx.painter.control(control_rect, Control::TextField(text), enabled);
            if enabled && let Some(typed) = cx.input.take_text(control_rect) {
                *text = typed;
            }
        }
        Value::Object(obj) => {
            cx.painter.control(control_rect, Control::ObjectField(*obj), enabled);
        }
        Value::Mixed => {
            cx.painter.control(control_rect, Control::MixedValue, enabled);
        }
    }
    height
}

fn take_parsed<T: FromStr>(input: &mut InputFrame, rect: Rect) -> Option<T> {
    input.take_text(rect)?.trim().parse().ok()
}

/// Draws a slider for a numeric value clamped to `min..=max`.
///
/// The stored value is never clamped here: an out-of-range value stays as it
/// is until the user drags the slider. Dragging sets the value from the
/// pointer position, rounding to the nearest integer for integer fields.
/// Returns the height drawn, or `None` if the value is not numeric.
pub fn slider(cx: &mut FieldCx<'_>, min: f64, max: f64) -> Option<f64> {
    let current = cx.value.as_f64()?;
    let height = cx.config.row_height;
    let (label_rect, control_rect) = split_row(cx.row_rect(height), cx.config.label_width);
    cx.painter.label(label_rect, cx.label);
    cx.painter.control(
        control_rect,
        Control::Slider {
            value: current.clamp(min, max),
            min,
            max,
        },
        cx.enabled,
    );
    if cx.enabled
        && let Some(pos) = cx.input.take_drag(control_rect)
    {
        let t = if control_rect.width() > 0.0 {
            ((pos.x - control_rect.x0) / control_rect.width()).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let picked = min + t * (max - min);
        cx.value = match cx.value {
            Value::Int(_) => Value::Int(round_to_int(picked)),
            _ => Value::Float(picked),
        };
    }
    Some(height)
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "slider positions are bounded by the attribute's range"
)]
fn round_to_int(v: f64) -> i64 {
    if v >= 0.0 {
        (v + 0.5) as i64
    } else {
        (v - 0.5) as i64
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::*;
    use crate::input::InputEvent;
    use crate::testing::{RecordingPainter, Scratch};

    #[test]
    fn unit_values_draw_nothing() {
        let mut scratch = Scratch::new();
        let mut painter = RecordingPainter::default();
        let mut input = InputFrame::new();
        let mut cx = scratch.field_cx(Value::Unit, &mut painter, &mut input);
        assert_eq!(default_control(&mut cx), 0.0);
        drop(cx);
        assert!(painter.controls.is_empty());
    }

    #[test]
    fn toggle_flips_on_click() {
        let mut scratch = Scratch::new();
        let mut painter = RecordingPainter::default();
        let mut input = InputFrame::from_events([InputEvent::Click {
            pos: Point::new(200.0, 5.0),
        }]);
        let mut cx = scratch.field_cx(Value::Bool(false), &mut painter, &mut input);
        assert_eq!(default_control(&mut cx), 18.0);
        assert_eq!(cx.value, Value::Bool(true));
    }

    #[test]
    fn disabled_controls_ignore_input() {
        let mut scratch = Scratch::new();
        let mut painter = RecordingPainter::default();
        let mut input = InputFrame::from_events([InputEvent::Type {
            pos: Point::new(200.0, 5.0),
            text: "42".into(),
        }]);
        let mut cx = scratch.field_cx(Value::Int(7), &mut painter, &mut input);
        cx.set_enabled(false);
        default_control(&mut cx);
        assert_eq!(cx.value, Value::Int(7));
        drop(cx);
        assert!(!input.is_empty(), "event must stay unconsumed");
        assert!(!painter.controls[0].2, "drawn disabled");
    }

    #[test]
    fn typed_numbers_are_parsed() {
        let mut scratch = Scratch::new();
        let mut painter = RecordingPainter::default();
        let mut input = InputFrame::from_events([InputEvent::Type {
            pos: Point::new(200.0, 5.0),
            text: " 42 ".into(),
        }]);
        let mut cx = scratch.field_cx(Value::Int(7), &mut painter, &mut input);
        default_control(&mut cx);
        assert_eq!(cx.value, Value::Int(42));
    }

    #[test]
    fn slider_drag_sets_value_from_position() {
        let mut scratch = Scratch::new();
        let mut painter = RecordingPainter::default();
        // Control spans x = 120..320 at the standard label width.
        let mut input = InputFrame::from_events([InputEvent::Drag {
            pos: Point::new(220.0, 5.0),
        }]);
        let mut cx = scratch.field_cx(Value::Int(0), &mut painter, &mut input);
        assert_eq!(slider(&mut cx, 0.0, 100.0), Some(18.0));
        assert_eq!(cx.value, Value::Int(50));
    }

    #[test]
    fn slider_displays_clamped_value_only() {
        let mut scratch = Scratch::new();
        let mut painter = RecordingPainter::default();
        let mut input = InputFrame::new();
        let mut cx = scratch.field_cx(Value::Float(150.0), &mut painter, &mut input);
        slider(&mut cx, 0.0, 100.0);
        assert_eq!(cx.value, Value::Float(150.0));
        drop(cx);
        assert_eq!(
            painter.controls[0].1,
            crate::testing::RecordedControl::Slider {
                value: 100.0,
                min: 0.0,
                max: 100.0
            }
        );
    }

    #[test]
    fn slider_rejects_non_numeric_values() {
        let mut scratch = Scratch::new();
        let mut painter = RecordingPainter::default();
        let mut input = InputFrame::new();
        let mut cx = scratch.field_cx(Value::Text("x".into()), &mut painter, &mut input);
        assert_eq!(slider(&mut cx, 0.0, 1.0), None);
    }

    #[test]
    fn split_row_clamps_label_to_row() {
        let (label, control) = split_row(Rect::new(0.0, 0.0, 80.0, 18.0), 120.0);
        assert_eq!(label.width(), 80.0);
        assert_eq!(control.width(), 0.0);
    }
}
