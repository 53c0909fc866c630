// Copyright 2026 the Lectern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The composition root.
//!
//! An [`Inspector`] owns the fields of one inspected object, builds and
//! caches a decorator chain per field, and runs the two-pass protocol:
//!
//! 1. [`begin_redraw`](Inspector::begin_redraw) starts a redraw cycle. It
//!    computes the frame delta, drains the dirty channels into
//!    [`RedrawChanges`] and garbage-collects the foldout group table.
//! 2. [`query_height`](Inspector::query_height) executes a field's full
//!    routine against an off-screen cursor with a
//!    [`NullPainter`](crate::paint::NullPainter) and no input, and returns
//!    the height it consumed, scaled by the enclosing foldout regions.
//! 3. [`paint`](Inspector::paint) executes the same routine at the host's
//!    rectangle with the real painter and input. Edits are detected by
//!    comparing the value before and after the hooks, committed through the
//!    [`ValueModel`](crate::model::ValueModel) and announced to every
//!    decorator. A secondary click inside the rectangle aggregates a
//!    [`ContextMenu`](crate::menu::ContextMenu) from the chain.
//!
//! [`redraw`](Inspector::redraw) runs all three for every field, stacking
//! them vertically.
//!
//! Chains are built lazily, in declaration order, the first time any field
//! is queried or painted. They are rebuilt when the host recreates the field
//! and when the registry's revision moves.

pub(crate) mod chain;
mod passes;


use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use understory_dirty::{Channel, CycleHandling, DirtyTracker, EagerPolicy};

use crate::attribute::GroupKey;
use crate::config::InspectorConfig;
use crate::dirty;
use crate::field::{FieldDecl, FieldId, FieldStore, InstanceStore};
use crate::foldout::{FoldoutState, GroupLayout, GroupTable};
use crate::menu::ContextMenu;
use crate::registry::DecoratorRegistry;
use crate::time::HostTime;
use crate::trace::{ChangeSource, Tracer, ValueChangedEvent};

/// What changed since the previous redraw, as reported by
/// [`Inspector::begin_redraw`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RedrawChanges {
    /// Monotonic redraw counter, starting at 1.
    pub redraw_index: u64,
    /// Seconds since the previous redraw (0 for the first).
    pub delta_secs: f64,
    /// Fields whose value changed, through a control, a menu action or the
    /// host.
    pub values: Vec<FieldId>,
    /// Fields whose height may have changed.
    pub relayout: Vec<FieldId>,
    /// Fields whose decorator chain was dropped for rebuilding.
    pub rebuilt: Vec<FieldId>,
    /// Foldout groups removed from the table because neither side survived.
    pub removed_groups: Vec<GroupKey>,
}

impl RedrawChanges {
    /// Returns whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
            && self.relayout.is_empty()
            && self.rebuilt.is_empty()
            && self.removed_groups.is_empty()
    }
}

/// Outcome of [`Inspector::paint`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PaintReport {
    /// Height the field occupied: its natural height scaled by enclosing
    /// regions, never more than the rectangle it was given.
    pub consumed: f64,
    /// Unscaled height the chain consumed.
    pub natural: f64,
    /// The field sits in a fully closed region and was not executed.
    pub skipped: bool,
    /// The value changed and was committed.
    pub value_changed: bool,
    /// A context menu is waiting in [`Inspector::take_context_menu`].
    pub menu_opened: bool,
}

/// Outcome of [`Inspector::redraw`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RedrawReport {
    /// Changes drained at the start of the redraw.
    pub changes: RedrawChanges,
    /// Measured height of every field, in declaration order.
    pub rows: Vec<(FieldId, f64)>,
    /// Sum of the measured heights.
    pub total_height: f64,
    /// Fields painted (fields in fully closed regions are skipped).
    pub painted: usize,
    /// Values committed during the paint pass.
    pub value_changes: usize,
}

/// Composes and renders the fields of one inspected object.
#[derive(Debug)]
pub struct Inspector {
    config: InspectorConfig,
    registry: DecoratorRegistry,
    fields: FieldStore,
    instances: InstanceStore,
    groups: GroupTable,
    dirty: DirtyTracker<u32>,

    // -- Region structure --
    layout: GroupLayout,
    layout_dirty: bool,
    /// `LAYOUT` dependency edges installed for the current layout.
    edges: Vec<(u32, u32)>,

    // -- Redraw cycle --
    redraw_index: u64,
    last_redraw: Option<HostTime>,
    delta_secs: f64,
    /// Natural heights recorded by this cycle's paint pass.
    painted_natural: BTreeMap<u32, f64>,
    pending_menu: Option<ContextMenu>,
}

impl Default for Inspector {
    fn default() -> Self {
        Self::new(InspectorConfig::standard())
    }
}

impl Inspector {
    /// Creates an inspector with the built-in decorators.
    #[must_use]
    pub fn new(config: InspectorConfig) -> Self {
        Self::with_registry(config, DecoratorRegistry::builtin())
    }

    /// Creates an inspector with a custom registry.
    #[must_use]
    pub fn with_registry(config: InspectorConfig, registry: DecoratorRegistry) -> Self {
        Self {
            config,
            registry,
            fields: FieldStore::default(),
            instances: InstanceStore::new(),
            groups: GroupTable::new(),
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            layout: GroupLayout::default(),
            layout_dirty: true,
            edges: Vec::new(),
            redraw_index: 0,
            last_redraw: None,
            delta_secs: 0.0,
            painted_natural: BTreeMap::new(),
            pending_menu: None,
        }
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    /// The decorator registry.
    #[must_use]
    pub fn registry(&self) -> &DecoratorRegistry {
        &self.registry
    }

    /// Mutable access to the decorator registry. Chains built before a change
    /// are rebuilt on their next use.
    pub fn registry_mut(&mut self) -> &mut DecoratorRegistry {
        &mut self.registry
    }

    // -- Field lifecycle --

    /// Appends a field. Its chain is built on first use.
    pub fn add_field(&mut self, decl: FieldDecl) -> FieldId {
        let id = self.fields.create(decl);
        self.layout_dirty = true;
        self.dirty.mark(id.idx, dirty::LAYOUT);
        id
    }

    /// Removes a field and destroys its decorators.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn remove_field(&mut self, field: FieldId) {
        if let Some(chain) = self.fields.destroy(field) {
            chain.release(&mut self.instances);
        }
        self.dirty.remove_key(field.idx);
        self.painted_natural.remove(&field.idx);
        self.layout_dirty = true;
        if self.pending_menu.as_ref().is_some_and(|m| m.field == field) {
            self.pending_menu = None;
        }
    }

    /// Destroys the field's decorators so that fresh instances are built on
    /// next use. Foldout state survives through the group table.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn recreate_field(&mut self, field: FieldId) {
        self.fields.validate(field);
        self.drop_chain(field.idx);
        self.dirty.mark(field.idx, dirty::CHAIN);
    }

    /// Replaces the declaration of a field and recreates its decorators.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn set_decl(&mut self, field: FieldId, decl: FieldDecl) {
        self.fields.validate(field);
        self.fields.decl[field.idx as usize] = decl;
        self.recreate_field(field);
    }

    /// Live fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.fields.order.iter().map(|&idx| self.fields.id_at(idx))
    }

    /// Number of live fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.order.len()
    }

    /// Returns whether there are no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.order.is_empty()
    }

    /// Returns whether the handle refers to a live field.
    #[must_use]
    pub fn is_alive(&self, field: FieldId) -> bool {
        self.fields.is_alive(field)
    }

    /// The declaration of a field.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn decl(&self, field: FieldId) -> &FieldDecl {
        self.fields.validate(field);
        &self.fields.decl[field.idx as usize]
    }

    /// Height reported by the field's last measurement.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn measured_height(&self, field: FieldId) -> Option<f64> {
        self.fields.validate(field);
        self.fields.height[field.idx as usize]
    }

    /// Number of decorators in the field's chain, if it has been built.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn chain_len(&self, field: FieldId) -> Option<usize> {
        self.fields.validate(field);
        self.fields.chain[field.idx as usize]
            .as_ref()
            .map(|c| c.entries.len())
    }

    // -- Foldout groups --

    /// The foldout group table.
    #[must_use]
    pub fn groups(&self) -> &GroupTable {
        &self.groups
    }

    /// State of the group with `key`.
    #[must_use]
    pub fn group_state(&self, key: &GroupKey) -> Option<&FoldoutState> {
        self.groups.get(key)
    }

    /// Opens or closes a group programmatically. The fade starts at the next
    /// paint pass. Returns `false` for unknown keys.
    pub fn set_group_open(&mut self, key: &GroupKey, open: bool) -> bool {
        if !self.groups.set_open(key, open) {
            return false;
        }
        self.mark_group_layout(key);
        true
    }

    // -- Redraw cycle --

    /// Number of redraw cycles started so far.
    #[must_use]
    pub fn redraw_index(&self) -> u64 {
        self.redraw_index
    }

    /// Seconds between the two most recent redraws.
    #[must_use]
    pub fn delta_secs(&self) -> f64 {
        self.delta_secs
    }

    /// Starts a redraw cycle at host time `now`.
    pub fn begin_redraw(&mut self, now: HostTime) -> RedrawChanges {
        self.redraw_index += 1;
        self.delta_secs = match self.last_redraw {
            Some(prev) => self
                .config
                .timebase
                .ticks_to_secs(now.saturating_ticks_since(prev)),
            None => 0.0,
        };
        self.last_redraw = Some(now);
        self.painted_natural.clear();

        let values = self.drain(dirty::VALUE, false);
        let relayout = self.drain(dirty::LAYOUT, true);
        let rebuilt = self.drain(dirty::CHAIN, false);
        let removed_groups = self
            .groups
            .collect_garbage(self.redraw_index, &self.instances);

        RedrawChanges {
            redraw_index: self.redraw_index,
            delta_secs: self.delta_secs,
            values,
            relayout,
            rebuilt,
            removed_groups,
        }
    }

    /// Reports that the host changed a field's value behind the inspector's
    /// back (undo, redo, reload). Decorators simply render the new value on
    /// the next pass.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn notify_external_change(&mut self, field: FieldId, tracer: &mut Tracer<'_>) {
        self.fields.validate(field);
        self.dirty.mark(field.idx, dirty::VALUE);
        self.dirty.mark(field.idx, dirty::LAYOUT);
        tracer.value_changed(&ValueChangedEvent {
            field,
            source: ChangeSource::External,
        });
    }

    /// Takes the context menu opened by the last paint pass, if any.
    pub fn take_context_menu(&mut self) -> Option<ContextMenu> {
        self.pending_menu.take()
    }

    // -- Internals --

    fn drain(&mut self, channel: Channel, affected: bool) -> Vec<FieldId> {
        let keys: Vec<u32> = if affected {
            self.dirty
                .drain(channel)
                .affected()
                .deterministic()
                .run()
                .collect()
        } else {
            self.dirty.drain(channel).deterministic().run().collect()
        };
        keys.into_iter()
            .filter(|idx| self.fields.order.contains(idx))
            .map(|idx| self.fields.id_at(idx))
            .collect()
    }

    fn drop_chain(&mut self, idx: u32) {
        if let Some(chain) = self.fields.chain[idx as usize].take() {
            chain.release(&mut self.instances);
            self.layout_dirty = true;
        }
    }

    fn mark_group_layout(&mut self, key: &GroupKey) {
        if let Some(begin) = self.layout.begin_of(key) {
            self.dirty.mark_with(begin, dirty::LAYOUT, &EagerPolicy);
        }
    }
}
