// Copyright 2026 the Lectern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Numeric range slider.

use alloc::boxed::Box;
use alloc::string::String;

use crate::attribute::{AttrParams, Attribute, AttributeKind};
use crate::controls::{slider, split_row};
use crate::decorator::{Decorator, FieldCx, Hook, MenuCx};
use crate::error::DecoratorError;
use crate::menu::MenuBuilder;
use crate::paint::Control;
use crate::value::Value;

/// Draws numeric values as a slider over `min..=max`.
///
/// The displayed value is clamped; the stored value is left alone until the
/// user edits it. Mixed values claim the control with a placeholder, and
/// non-numeric values fall back to the next claimant or the default control.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
    min: f64,
    max: f64,
}

impl Range {
    /// Creates the decorator.
    ///
    /// # Errors
    ///
    /// Rejects attributes without [`AttrParams::Range`] parameters, and
    /// ranges whose bounds are not finite or whose minimum exceeds the
    /// maximum.
    pub fn new(min: f64, max: f64) -> Result<Self, DecoratorError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(invalid("bounds must be finite"));
        }
        if min > max {
            return Err(invalid("minimum exceeds maximum"));
        }
        Ok(Self { min, max })
    }

    /// Factory for [`AttributeKind::RANGE`].
    ///
    /// # Errors
    ///
    /// See [`Range::new`].
    pub fn create(attribute: &Attribute) -> Result<Box<dyn Decorator>, DecoratorError> {
        match attribute.params {
            AttrParams::Range { min, max } => Ok(Box::new(Self::new(min, max)?)),
            _ => Err(invalid("expected a numeric range")),
        }
    }
}

fn invalid(reason: &str) -> DecoratorError {
    DecoratorError::InvalidParams {
        kind: AttributeKind::RANGE,
        reason: String::from(reason),
    }
}

/// Converts `v` to a value of the same kind as `like`.
#[expect(
    clippy::cast_possible_truncation,
    reason = "range bounds are authored integers for integer fields"
)]
fn numeric_like(like: &Value, v: f64) -> Value {
    match like {
        Value::Int(_) => Value::Int(v as i64),
        _ => Value::Float(v),
    }
}

impl Decorator for Range {
    fn on_gui(&mut self, cx: &mut FieldCx<'_>) -> Result<Hook, DecoratorError> {
        if *cx.value() == Value::Mixed {
            let height = cx.config().row_height;
            let (label_rect, control_rect) =
                split_row(cx.row_rect(height), cx.config().label_width);
            let enabled = cx.is_enabled();
            let label = String::from(cx.label());
            cx.painter().label(label_rect, &label);
            cx.painter()
                .control(control_rect, Control::MixedValue, enabled);
            return Ok(Hook::handled(height));
        }
        Ok(match slider(cx, self.min, self.max) {
            Some(height) => Hook::handled(height),
            None => Hook::PASS,
        })
    }

    fn on_context_menu(&mut self, cx: &MenuCx<'_>, menu: &mut MenuBuilder) {
        let Some(current) = cx.value().as_f64() else {
            return;
        };
        if !cx.is_enabled() {
            menu.add_disabled_item("Reset to minimum");
            menu.add_disabled_item("Clamp to range");
            return;
        }
        let Self { min, max } = *self;
        menu.add_item("Reset to minimum", move |v| *v = numeric_like(v, min));
        if (min..=max).contains(&current) {
            menu.add_disabled_item("Clamp to range");
        } else {
            menu.add_item("Clamp to range", move |v| {
                if let Some(x) = v.as_f64() {
                    *v = numeric_like(v, x.clamp(min, max));
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::field::FieldId;

    fn menu_for(range: &mut Range, value: &Value, enabled: bool) -> Vec<crate::menu::MenuItem> {
        let mut menu = MenuBuilder::new();
        let cx = MenuCx {
            field: FieldId {
                idx: 0,
                generation: 0,
            },
            value,
            enabled,
        };
        range.on_context_menu(&cx, &mut menu);
        menu.into_items()
    }

    #[test]
    fn factory_validates_bounds() {
        assert!(Range::create(&Attribute::range(0.0, 100.0)).is_ok());
        assert!(matches!(
            Range::create(&Attribute::range(10.0, 0.0)),
            Err(DecoratorError::InvalidParams { .. })
        ));
        assert!(Range::create(&Attribute::range(0.0, f64::NAN)).is_err());
        assert!(Range::create(&Attribute::readonly().with_params(AttrParams::None)).is_err());
    }

    #[test]
    fn clamp_entry_only_offered_when_out_of_range() {
        let mut range = Range::new(0.0, 100.0).unwrap();
        let mut items = menu_for(&mut range, &Value::Int(150), true);
        let labels: Vec<_> = items.iter().map(|i| i.label()).collect();
        assert_eq!(labels, ["Reset to minimum", "Clamp to range"]);
        assert!(items[1].is_enabled());

        let mut value = Value::Int(150);
        assert!(items[1].run(&mut value));
        assert_eq!(value, Value::Int(100));
        assert!(items[0].run(&mut value));
        assert_eq!(value, Value::Int(0));

        let items = menu_for(&mut range, &Value::Float(50.0), true);
        assert!(!items[1].is_enabled());
    }

    #[test]
    fn disabled_fields_get_disabled_entries() {
        let mut range = Range::new(0.0, 1.0).unwrap();
        let items = menu_for(&mut range, &Value::Float(2.0), false);
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| !i.is_enabled()));
    }

    #[test]
    fn non_numeric_values_add_nothing() {
        let mut range = Range::new(0.0, 1.0).unwrap();
        assert!(menu_for(&mut range, &Value::Text("x".into()), true).is_empty());
    }
}
