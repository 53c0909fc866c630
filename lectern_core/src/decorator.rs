// Copyright 2026 the Lectern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The decorator contract.
//!
//! A [`Decorator`] is the runtime half of an [`Attribute`](crate::attribute::Attribute).
//! The composition root builds one per attribute, sorts them into a chain
//! and drives six hooks for every render of the field:
//!
//! | step | hook | loop |
//! |------|------|------|
//! | 1 | [`initialize`](Decorator::initialize) | once per instance |
//! | 2 | [`on_before_gui`](Decorator::on_before_gui) | stops at the first `handled` |
//! | 3 | [`on_gui`](Decorator::on_gui) | stops at the first `handled` |
//! | 4 | [`on_after_gui`](Decorator::on_after_gui) | whole chain |
//! | 5 | [`on_value_changed`](Decorator::on_value_changed) | whole chain, paint pass only |
//! | 6 | [`on_context_menu`](Decorator::on_context_menu) | whole chain, on secondary click |
//!
//! A `handled` result from step 2 suppresses every later step of this render:
//! the remaining before-hooks, all of step 3, the default control and step 4.
//! In step 3 the first decorator returning `handled` owns the primary
//! control; if none does, the default control for the value kind is drawn.
//!
//! Every hook runs in both passes. Hooks must draw and advance the same way
//! in both, since the measurement pass *is* the layout: see
//! [`FieldCx::is_measure`] for the few things that legitimately differ.

use alloc::vec::Vec;
use core::fmt;

use kurbo::Rect;

use crate::attribute::{GroupDecl, GroupKey};
use crate::config::InspectorConfig;
use crate::cursor::{Pass, RenderCursor};
use crate::error::{DecoratorError, GroupRole};
use crate::field::{FieldId, InstanceId, InstanceStore};
use crate::foldout::{ClosedRegion, FoldoutState, GroupTable, Link};
use crate::input::InputFrame;
use crate::menu::MenuBuilder;
use crate::paint::Painter;
use crate::trace::ChangeSource;
use crate::value::{Value, ValueKind};

/// Result of a render hook.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hook {
    /// Suppresses the rest of the step (see the module docs).
    pub handled: bool,
    /// Height drawn by the hook. The cursor advances by this plus row
    /// spacing; zero advances nothing.
    pub height: f64,
}

impl Hook {
    /// Drew nothing, claimed nothing.
    pub const PASS: Self = Self {
        handled: false,
        height: 0.0,
    };

    /// Drew `height` without claiming anything.
    #[must_use]
    pub const fn consumed(height: f64) -> Self {
        Self {
            handled: false,
            height,
        }
    }

    /// Drew `height` and claimed the step.
    #[must_use]
    pub const fn handled(height: f64) -> Self {
        Self {
            handled: true,
            height,
        }
    }
}

/// Role a decorator plays in foldout grouping.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GroupMarker {
    /// Opens the region of this key after the field.
    Begin(GroupKey),
    /// Closes the region of this key before the field.
    End(GroupKey),
}

/// Runtime behavior of one attribute.
///
/// All hooks default to doing nothing, so implementing only the ones you
/// need is fine.
pub trait Decorator {
    /// Called once after the instance is created. Errors drop the decorator
    /// from its chain; the rest of the chain still renders.
    ///
    /// May be called again for the same instance and must then have no
    /// further effect.
    fn initialize(&mut self, cx: &mut InitCx<'_>) -> Result<(), DecoratorError> {
        _ = cx;
        Ok(())
    }

    /// Grouping role, read once after a successful [`initialize`](Self::initialize).
    fn group_marker(&self) -> Option<GroupMarker> {
        None
    }

    /// Runs before the primary control.
    fn on_before_gui(&mut self, cx: &mut FieldCx<'_>) -> Result<Hook, DecoratorError> {
        _ = cx;
        Ok(Hook::PASS)
    }

    /// Offers to draw the primary control.
    fn on_gui(&mut self, cx: &mut FieldCx<'_>) -> Result<Hook, DecoratorError> {
        _ = cx;
        Ok(Hook::PASS)
    }

    /// Runs after the primary control. Returns the height drawn.
    fn on_after_gui(&mut self, cx: &mut FieldCx<'_>) -> Result<f64, DecoratorError> {
        _ = cx;
        Ok(0.0)
    }

    /// Called after a changed value was committed.
    fn on_value_changed(&mut self, cx: &ChangeCx<'_>) -> Result<(), DecoratorError> {
        _ = cx;
        Ok(())
    }

    /// Appends context-menu entries.
    fn on_context_menu(&mut self, cx: &MenuCx<'_>, menu: &mut MenuBuilder) {
        _ = (cx, menu);
    }
}

// ---------------------------------------------------------------------------
// Side effects collected from hooks
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub(crate) struct LinkRecord {
    pub(crate) key: GroupKey,
    pub(crate) role: GroupRole,
    pub(crate) link: Link,
}

#[derive(Clone, Debug)]
pub(crate) struct FadeRecord {
    pub(crate) key: GroupKey,
    pub(crate) progress: f64,
    pub(crate) next_progress: f64,
    pub(crate) target_height: f64,
    pub(crate) displayed_height: f64,
}

/// What the hooks of one render asked the composition root to do.
#[derive(Clone, Debug, Default)]
pub(crate) struct Effects {
    /// The field's own height changed.
    pub(crate) relayout: bool,
    /// Regions whose height changed.
    pub(crate) group_relayout: Vec<GroupKey>,
    pub(crate) links: Vec<LinkRecord>,
    pub(crate) fades: Vec<FadeRecord>,
}

// ---------------------------------------------------------------------------
// InitCx
// ---------------------------------------------------------------------------

/// Context for [`Decorator::initialize`].
pub struct InitCx<'a> {
    pub(crate) field: FieldId,
    pub(crate) instance: InstanceId,
    pub(crate) config: &'a InspectorConfig,
    pub(crate) groups: &'a mut GroupTable,
    pub(crate) instances: &'a InstanceStore,
    pub(crate) links: &'a mut Vec<LinkRecord>,
}

impl fmt::Debug for InitCx<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InitCx")
            .field("field", &self.field)
            .field("instance", &self.instance)
            .finish_non_exhaustive()
    }
}

impl InitCx<'_> {
    /// The field the chain belongs to.
    #[must_use]
    pub fn field(&self) -> FieldId {
        self.field
    }

    /// Handle of the decorator being initialized.
    #[must_use]
    pub fn instance(&self) -> InstanceId {
        self.instance
    }

    /// Inspector configuration.
    #[must_use]
    pub fn config(&self) -> &InspectorConfig {
        self.config
    }

    /// Registers this decorator as the Begin of `decl.key`.
    ///
    /// # Errors
    ///
    /// Returns [`DecoratorError::DuplicateGroup`] if another live Begin
    /// holds the key.
    pub fn link_begin(&mut self, decl: &GroupDecl) -> Result<Link, DecoratorError> {
        let link = self.groups.link_begin(decl, self.instance, self.instances)?;
        self.links.push(LinkRecord {
            key: decl.key.clone(),
            role: GroupRole::Begin,
            link,
        });
        Ok(link)
    }

    /// Registers this decorator as the End of `key`.
    ///
    /// # Errors
    ///
    /// Returns [`DecoratorError::DuplicateGroup`] if another live End holds
    /// the key.
    pub fn link_end(&mut self, key: &GroupKey) -> Result<Link, DecoratorError> {
        let link = self.groups.link_end(key, self.instance, self.instances)?;
        self.links.push(LinkRecord {
            key: key.clone(),
            role: GroupRole::End,
            link,
        });
        Ok(link)
    }
}

// ---------------------------------------------------------------------------
// FieldCx
// ---------------------------------------------------------------------------

/// Context for the render hooks of one field.
///
/// Owns the field's working copy of its value and its [`RenderCursor`];
/// the composition root compares the value before and after the hooks to
/// detect edits, and advances the cursor by each hook's reported height.
pub struct FieldCx<'a> {
    pub(crate) field: FieldId,
    pub(crate) instance: InstanceId,
    pub(crate) label: &'a str,
    pub(crate) kind: ValueKind,
    pub(crate) value: Value,
    pub(crate) cursor: RenderCursor,
    pub(crate) enabled: bool,
    pub(crate) painter: &'a mut dyn Painter,
    pub(crate) input: &'a mut InputFrame,
    pub(crate) groups: &'a mut GroupTable,
    pub(crate) instances: &'a InstanceStore,
    pub(crate) config: &'a InspectorConfig,
    pub(crate) delta_secs: f64,
    pub(crate) closing: &'a [ClosedRegion],
    pub(crate) effects: Effects,
}

impl fmt::Debug for FieldCx<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldCx")
            .field("field", &self.field)
            .field("value", &self.value)
            .field("cursor", &self.cursor)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

impl FieldCx<'_> {
    /// The field being rendered.
    #[must_use]
    pub fn field(&self) -> FieldId {
        self.field
    }

    /// Handle of the decorator whose hook is running.
    #[must_use]
    pub fn instance(&self) -> InstanceId {
        self.instance
    }

    /// Display label of the field.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label
    }

    /// Declared value kind of the field.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Current working value.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Replaces the working value. Committed after the hooks if it differs
    /// from the value the render started with.
    pub fn set_value(&mut self, value: Value) {
        self.value = value;
    }

    /// Which pass is running.
    #[must_use]
    pub fn pass(&self) -> Pass {
        self.cursor.pass()
    }

    /// Returns whether this is the off-screen measurement pass. Input is
    /// always empty there and nothing drawn is visible; hooks must still
    /// report the same heights as in the paint pass.
    #[must_use]
    pub fn is_measure(&self) -> bool {
        self.cursor.is_measure()
    }

    /// The layout cursor.
    #[must_use]
    pub fn cursor(&self) -> &RenderCursor {
        &self.cursor
    }

    /// Rectangle of a row of `height` at the cursor.
    #[must_use]
    pub fn row_rect(&self, height: f64) -> Rect {
        self.cursor.resolve_rect(height)
    }

    /// The drawing surface.
    pub fn painter(&mut self) -> &mut dyn Painter {
        &mut *self.painter
    }

    /// Input events of this redraw.
    pub fn input(&mut self) -> &mut InputFrame {
        &mut *self.input
    }

    /// Whether controls accept input.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables input for the rest of this render.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Inspector configuration.
    #[must_use]
    pub fn config(&self) -> &InspectorConfig {
        self.config
    }

    /// Seconds since the previous redraw.
    #[must_use]
    pub fn delta_secs(&self) -> f64 {
        self.delta_secs
    }

    /// Asks the host to lay this field out again.
    pub fn request_relayout(&mut self) {
        self.effects.relayout = true;
    }

    /// State of a foldout group.
    #[must_use]
    pub fn group(&self, key: &GroupKey) -> Option<&FoldoutState> {
        self.groups.get(key)
    }

    /// Flips the open target of a group and requests relayout of every field
    /// inside it. Returns the new target.
    pub fn toggle_group(&mut self, key: &GroupKey) -> Option<bool> {
        let open = self.groups.toggle(key)?;
        self.effects.group_relayout.push(key.clone());
        Some(open)
    }

    /// Natural height of the region of `key` if this field closes it. Only
    /// available during the paint pass.
    #[must_use]
    pub fn closed_region(&self, key: &GroupKey) -> Option<f64> {
        self.closing
            .iter()
            .find(|r| r.key == *key)
            .map(|r| r.natural)
    }

    /// Records the region height of `key` and advances its fade by this
    /// redraw's delta. Returns the height the region occupied this frame.
    pub fn fade_group(&mut self, key: &GroupKey, target_height: f64) -> Option<f64> {
        let step = if self.delta_secs > 0.0 {
            self.config.fade_speed * self.delta_secs
        } else {
            0.0
        };
        let (progress, next_progress, displayed_height) =
            self.groups.fade(key, target_height, step)?;
        if progress != next_progress {
            self.effects.group_relayout.push(key.clone());
        }
        self.effects.fades.push(FadeRecord {
            key: key.clone(),
            progress,
            next_progress,
            target_height,
            displayed_height,
        });
        Some(displayed_height)
    }

    /// Registers the running decorator as the End of `key`, for Ends that
    /// found no Begin when they were initialized. Call it only where
    /// [`closed_region`](Self::closed_region) reports the region.
    ///
    /// # Errors
    ///
    /// Returns [`DecoratorError::DuplicateGroup`] if another live End holds
    /// the key.
    pub fn link_group_end(&mut self, key: &GroupKey) -> Result<Link, DecoratorError> {
        let link = self.groups.link_end(key, self.instance, self.instances)?;
        if link != Link::Pending {
            self.effects.links.push(LinkRecord {
                key: key.clone(),
                role: GroupRole::End,
                link,
            });
        }
        Ok(link)
    }

    /// Withdraws the running decorator as the End of `key`, for an End the
    /// layout no longer closes a region at.
    pub fn unlink_group_end(&mut self, key: &GroupKey) {
        if self.groups.unlink_end(key, self.instance) {
            self.effects.group_relayout.push(key.clone());
        }
    }
}

// ---------------------------------------------------------------------------
// ChangeCx / MenuCx
// ---------------------------------------------------------------------------

/// Context for [`Decorator::on_value_changed`].
#[derive(Debug)]
pub struct ChangeCx<'a> {
    pub(crate) field: FieldId,
    pub(crate) old: &'a Value,
    pub(crate) new: &'a Value,
    pub(crate) source: ChangeSource,
}

impl ChangeCx<'_> {
    /// The field whose value changed.
    #[must_use]
    pub fn field(&self) -> FieldId {
        self.field
    }

    /// Value before the change.
    #[must_use]
    pub fn old(&self) -> &Value {
        self.old
    }

    /// Committed value.
    #[must_use]
    pub fn new_value(&self) -> &Value {
        self.new
    }

    /// What caused the change.
    #[must_use]
    pub fn source(&self) -> ChangeSource {
        self.source
    }
}

/// Context for [`Decorator::on_context_menu`].
#[derive(Debug)]
pub struct MenuCx<'a> {
    pub(crate) field: FieldId,
    pub(crate) value: &'a Value,
    pub(crate) enabled: bool,
}

impl MenuCx<'_> {
    /// The field the menu was opened on.
    #[must_use]
    pub fn field(&self) -> FieldId {
        self.field
    }

    /// Current value of the field.
    #[must_use]
    pub fn value(&self) -> &Value {
        self.value
    }

    /// Whether the field accepted input in the render that opened the menu.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}
