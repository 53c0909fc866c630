// Copyright 2026 the Lectern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the redraw loop.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! composition root calls while it builds chains, measures, paints and
//! animates foldout groups. All method bodies default to no-ops, so
//! implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` enables the `Tracer` method bodies (one branch per call).

use kurbo::Rect;

use crate::attribute::{AttributeKind, GroupKey};
use crate::error::{DecoratorError, GroupRole};
use crate::field::FieldId;
use crate::foldout::Link;
use crate::time::HostTime;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// What caused a field's value to change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChangeSource {
    /// A control edited the value during a paint pass.
    Control,
    /// A context-menu action edited the value.
    Menu,
    /// The host reported an undo, redo or reload.
    External,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted after a field's decorator chain was (re)built.
#[derive(Clone, Copy, Debug)]
pub struct ChainBuiltEvent {
    /// The field.
    pub field: FieldId,
    /// Decorators that made it into the chain.
    pub decorators: usize,
    /// Attributes whose decorator was dropped.
    pub dropped: usize,
    /// Registry revision the chain was built against.
    pub revision: u64,
}

/// Emitted when an attribute's decorator could not be created or
/// initialized and was left out of the chain.
#[derive(Clone, Copy, Debug)]
pub struct DecoratorDroppedEvent<'a> {
    /// The field.
    pub field: FieldId,
    /// The attribute's kind.
    pub kind: AttributeKind,
    /// Why it was dropped.
    pub error: &'a DecoratorError,
}

/// Emitted after a field was executed in the measurement pass.
#[derive(Clone, Copy, Debug)]
pub struct FieldMeasuredEvent {
    /// The field.
    pub field: FieldId,
    /// Height the chain consumed.
    pub natural: f64,
    /// Product of the visibility factors of enclosing foldout regions.
    pub factor: f64,
    /// Reported height (`natural × factor`).
    pub height: f64,
}

/// Emitted after a field's paint pass.
#[derive(Clone, Copy, Debug)]
pub struct FieldPaintedEvent {
    /// The field.
    pub field: FieldId,
    /// Host-supplied rectangle.
    pub rect: Rect,
    /// Height the field reported as consumed.
    pub consumed: f64,
    /// Whether the field was skipped because an enclosing region is fully
    /// closed.
    pub skipped: bool,
}

/// Emitted after a changed value was committed to the model.
#[derive(Clone, Copy, Debug)]
pub struct ValueChangedEvent {
    /// The field.
    pub field: FieldId,
    /// What caused the change.
    pub source: ChangeSource,
}

/// Emitted when a foldout Begin or End registers in the group table.
#[derive(Clone, Copy, Debug)]
pub struct GroupLinkedEvent<'a> {
    /// The group.
    pub key: &'a GroupKey,
    /// Which side registered.
    pub role: GroupRole,
    /// How it linked.
    pub link: Link,
}

/// Emitted by a group's End during a paint pass.
#[derive(Clone, Copy, Debug)]
pub struct GroupFadedEvent<'a> {
    /// The group.
    pub key: &'a GroupKey,
    /// Progress used for this frame's layout.
    pub progress: f64,
    /// Progress after advancing toward the target.
    pub next_progress: f64,
    /// Natural height of the region.
    pub target_height: f64,
    /// Height the region occupied this frame.
    pub displayed_height: f64,
}

/// Emitted when a context menu was aggregated for a field.
#[derive(Clone, Copy, Debug)]
pub struct ContextMenuEvent {
    /// The field.
    pub field: FieldId,
    /// Number of entries contributed by the chain.
    pub items: usize,
}

/// Per-redraw summary produced by
/// [`Inspector::redraw`](crate::inspector::Inspector::redraw).
#[derive(Clone, Copy, Debug)]
pub struct RedrawSummary {
    /// Monotonic redraw counter.
    pub redraw_index: u64,
    /// Host time of the redraw.
    pub now: HostTime,
    /// Seconds since the previous redraw.
    pub delta_secs: f64,
    /// Fields measured.
    pub measured: usize,
    /// Fields painted (fields inside closed regions are not counted).
    pub painted: usize,
    /// Sum of all reported heights.
    pub total_height: f64,
    /// Values committed during the paint pass.
    pub value_changes: usize,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the redraw loop.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after a chain was built.
    fn on_chain_built(&mut self, e: &ChainBuiltEvent) {
        _ = e;
    }

    /// Called when a decorator was dropped from its chain.
    fn on_decorator_dropped(&mut self, e: &DecoratorDroppedEvent<'_>) {
        _ = e;
    }

    /// Called after a field was measured.
    fn on_field_measured(&mut self, e: &FieldMeasuredEvent) {
        _ = e;
    }

    /// Called after a field was painted.
    fn on_field_painted(&mut self, e: &FieldPaintedEvent) {
        _ = e;
    }

    /// Called after a value change was committed.
    fn on_value_changed(&mut self, e: &ValueChangedEvent) {
        _ = e;
    }

    /// Called when a group side linked.
    fn on_group_linked(&mut self, e: &GroupLinkedEvent<'_>) {
        _ = e;
    }

    /// Called when a group's End advanced its fade.
    fn on_group_faded(&mut self, e: &GroupFadedEvent<'_>) {
        _ = e;
    }

    /// Called when a context menu was aggregated.
    fn on_context_menu(&mut self, e: &ContextMenuEvent) {
        _ = e;
    }

    /// Called with a per-redraw summary.
    fn on_redraw_summary(&mut self, s: &RedrawSummary) {
        _ = s;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`ChainBuiltEvent`].
    #[inline]
    pub fn chain_built(&mut self, e: &ChainBuiltEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_chain_built(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`DecoratorDroppedEvent`].
    #[inline]
    pub fn decorator_dropped(&mut self, e: &DecoratorDroppedEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_decorator_dropped(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FieldMeasuredEvent`].
    #[inline]
    pub fn field_measured(&mut self, e: &FieldMeasuredEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_field_measured(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FieldPaintedEvent`].
    #[inline]
    pub fn field_painted(&mut self, e: &FieldPaintedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_field_painted(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ValueChangedEvent`].
    #[inline]
    pub fn value_changed(&mut self, e: &ValueChangedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_value_changed(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`GroupLinkedEvent`].
    #[inline]
    pub fn group_linked(&mut self, e: &GroupLinkedEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_group_linked(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`GroupFadedEvent`].
    #[inline]
    pub fn group_faded(&mut self, e: &GroupFadedEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_group_faded(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ContextMenuEvent`].
    #[inline]
    pub fn context_menu(&mut self, e: &ContextMenuEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_context_menu(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RedrawSummary`].
    #[inline]
    pub fn redraw_summary(&mut self, s: &RedrawSummary) {
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.on_redraw_summary(s);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = s;
        }
    }
}
