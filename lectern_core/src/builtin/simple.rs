// Copyright 2026 the Lectern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decorators that add a row or a flag around the primary control.

use alloc::boxed::Box;
use alloc::string::String;

use crate::attribute::{AttrParams, Attribute, AttributeKind};
use crate::decorator::{Decorator, FieldCx, Hook};
use crate::error::DecoratorError;
use crate::paint::{Control, MessageLevel};
use crate::value::Value;

/// Disables input for every control of the field.
#[derive(Clone, Copy, Debug, Default)]
pub struct Readonly;

impl Readonly {
    /// Factory for [`AttributeKind::READONLY`].
    ///
    /// # Errors
    ///
    /// Never fails; parameters are ignored.
    pub fn create(_attribute: &Attribute) -> Result<Box<dyn Decorator>, DecoratorError> {
        Ok(Box::new(Self))
    }
}

impl Decorator for Readonly {
    fn on_before_gui(&mut self, cx: &mut FieldCx<'_>) -> Result<Hook, DecoratorError> {
        cx.set_enabled(false);
        Ok(Hook::PASS)
    }
}

/// Draws a section header row above the field.
#[derive(Clone, Debug)]
pub struct Header {
    text: String,
}

impl Header {
    /// Factory for [`AttributeKind::HEADER`].
    ///
    /// # Errors
    ///
    /// Rejects attributes without [`AttrParams::Text`] parameters.
    pub fn create(attribute: &Attribute) -> Result<Box<dyn Decorator>, DecoratorError> {
        match &attribute.params {
            AttrParams::Text(text) => Ok(Box::new(Self { text: text.clone() })),
            _ => Err(DecoratorError::InvalidParams {
                kind: AttributeKind::HEADER,
                reason: "expected header text".into(),
            }),
        }
    }
}

impl Decorator for Header {
    fn on_before_gui(&mut self, cx: &mut FieldCx<'_>) -> Result<Hook, DecoratorError> {
        let height = cx.config().row_height;
        let rect = cx.row_rect(height);
        cx.painter()
            .control(rect, Control::Header(&self.text), true);
        Ok(Hook::consumed(height))
    }
}

/// Inserts vertical space above the field.
#[derive(Clone, Copy, Debug)]
pub struct Space {
    height: f64,
}

impl Space {
    /// Factory for [`AttributeKind::SPACE`].
    ///
    /// # Errors
    ///
    /// Rejects attributes without [`AttrParams::Space`] parameters and
    /// negative or non-finite heights.
    pub fn create(attribute: &Attribute) -> Result<Box<dyn Decorator>, DecoratorError> {
        match attribute.params {
            AttrParams::Space(height) if height.is_finite() && height >= 0.0 => {
                Ok(Box::new(Self { height }))
            }
            _ => Err(DecoratorError::InvalidParams {
                kind: AttributeKind::SPACE,
                reason: "expected a non-negative height".into(),
            }),
        }
    }
}

impl Decorator for Space {
    fn on_before_gui(&mut self, _cx: &mut FieldCx<'_>) -> Result<Hook, DecoratorError> {
        Ok(Hook::consumed(self.height))
    }
}

/// Shows a warning row below an object reference field while it is empty.
#[derive(Clone, Debug)]
pub struct Required {
    message: String,
}

impl Required {
    const DEFAULT_MESSAGE: &'static str = "A reference is required";

    /// Factory for [`AttributeKind::REQUIRED`].
    ///
    /// # Errors
    ///
    /// Never fails. An empty or missing message uses a default text.
    pub fn create(attribute: &Attribute) -> Result<Box<dyn Decorator>, DecoratorError> {
        let message = match &attribute.params {
            AttrParams::Text(text) if !text.is_empty() => text.clone(),
            _ => String::from(Self::DEFAULT_MESSAGE),
        };
        Ok(Box::new(Self { message }))
    }
}

impl Decorator for Required {
    fn on_after_gui(&mut self, cx: &mut FieldCx<'_>) -> Result<f64, DecoratorError> {
        if *cx.value() != Value::Object(None) {
            return Ok(0.0);
        }
        let height = cx.config().row_height;
        let rect = cx.row_rect(height);
        cx.painter().control(
            rect,
            Control::HelpBox {
                text: &self.message,
                level: MessageLevel::Warning,
            },
            true,
        );
        Ok(height)
    }
}
