// Copyright 2026 the Lectern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint boundary between the inspector and the host's drawing surface.
//!
//! The inspector never rasterizes anything itself. Hooks and default controls
//! describe what to draw through the [`Painter`] trait; hosts implement it on
//! top of their own renderer. Measurement passes paint into a
//! [`NullPainter`], which discards everything.

use core::fmt;

use kurbo::Rect;

use crate::value::ObjectRef;

/// An 8-bit-per-channel RGBA color.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Color {
    /// Creates a color from its channels.
    #[must_use]
    pub const fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}{:02x}",
            self.r, self.g, self.b, self.a
        )
    }
}

/// Severity of a help box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageLevel {
    /// Informational.
    Info,
    /// Something is probably misconfigured.
    Warning,
    /// Something is definitely broken.
    Error,
}

/// A control widget to draw.
///
/// Controls borrow their display data; painters that need to keep it (such
/// as a draw list) copy what they need.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Control<'a> {
    /// A horizontal slider.
    Slider {
        /// Displayed value, already clamped to `min..=max`.
        value: f64,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
    /// A checkbox.
    Toggle(bool),
    /// An integer entry field.
    IntField(i64),
    /// A floating-point entry field.
    FloatField(f64),
    /// A single-line text entry.
    TextField(&'a str),
    /// An object reference picker.
    ObjectField(Option<ObjectRef>),
    /// Placeholder shown when multiple selected objects disagree.
    MixedValue,
    /// The header row of a foldout group.
    FoldoutHeader {
        /// Header text.
        label: &'a str,
        /// Whether the group is currently targeted open.
        open: bool,
    },
    /// A bold section header.
    Header(&'a str),
    /// A message box.
    HelpBox {
        /// Message text.
        text: &'a str,
        /// Severity.
        level: MessageLevel,
    },
}

/// A drawing surface supplied by the host.
pub trait Painter {
    /// Fills `rect` with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draws a text label inside `rect`.
    fn label(&mut self, rect: Rect, text: &str);

    /// Draws a control widget inside `rect`. Disabled controls are drawn
    /// greyed out and never react to input.
    fn control(&mut self, rect: Rect, control: Control<'_>, enabled: bool);

    /// Restricts subsequent drawing to `rect` intersected with the current
    /// clip.
    fn push_clip(&mut self, rect: Rect);

    /// Restores the clip that was active before the matching
    /// [`push_clip`](Self::push_clip).
    fn pop_clip(&mut self);
}

/// A [`Painter`] that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPainter;

impl Painter for NullPainter {
    fn fill_rect(&mut self, _rect: Rect, _color: Color) {}

    fn label(&mut self, _rect: Rect, _text: &str) {}

    fn control(&mut self, _rect: Rect, _control: Control<'_>, _enabled: bool) {}

    fn push_clip(&mut self, _rect: Rect) {}

    fn pop_clip(&mut self) {}
}
