// Copyright 2026 the Lectern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Group registry keyed by stable group keys.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::attribute::{GroupDecl, GroupKey};
use crate::error::{DecoratorError, GroupRole};
use crate::field::{InstanceId, InstanceStore};
use crate::paint::Color;

/// How a Begin or End registered in the [`GroupTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Link {
    /// Paired with a live counterpart.
    Matched,
    /// Replaced a destroyed instance of the same side and took over its
    /// state.
    Reconnected,
    /// No counterpart yet. A pending Begin never closes; a pending End is
    /// inert and not stored.
    Pending,
}

/// Persistent state of one foldout group.
#[derive(Clone, Debug, PartialEq)]
pub struct FoldoutState {
    progress: f64,
    open: bool,
    cached_height: f64,
    displayed_height: f64,
    color: Option<Color>,
    label: String,
}

impl FoldoutState {
    fn new(decl: &GroupDecl) -> Self {
        Self {
            progress: if decl.start_closed { 1.0 } else { 0.0 },
            open: !decl.start_closed,
            cached_height: 0.0,
            displayed_height: 0.0,
            color: decl.color,
            label: decl.label.clone(),
        }
    }

    /// Fade position: `0` fully open, `1` fully closed.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Whether the group is targeted open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The progress value the fade is moving toward.
    #[must_use]
    pub fn target_progress(&self) -> f64 {
        if self.open { 0.0 } else { 1.0 }
    }

    /// Whether the fade has not reached its target yet.
    #[must_use]
    pub fn is_fading(&self) -> bool {
        self.progress != self.target_progress()
    }

    /// Natural height of the region measured by the last paint pass.
    #[must_use]
    pub fn cached_height(&self) -> f64 {
        self.cached_height
    }

    /// Height the region occupied in the last paint pass.
    #[must_use]
    pub fn displayed_height(&self) -> f64 {
        self.displayed_height
    }

    /// Explicit region color, if the Begin declared one.
    #[must_use]
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Header text.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Moves progress toward the target by at most `step`.
    fn advance(&mut self, step: f64) {
        let target = self.target_progress();
        self.progress = if target > self.progress {
            (self.progress + step).min(target)
        } else {
            (self.progress - step).max(target)
        };
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Side {
    instance: Option<InstanceId>,
    /// Redraw index at which the instance was first seen dead.
    dead_since: Option<u64>,
}

impl Side {
    fn live(&self, instances: &InstanceStore) -> Option<InstanceId> {
        self.instance.filter(|id| instances.is_alive(*id))
    }

    fn set(&mut self, instance: InstanceId) {
        self.instance = Some(instance);
        self.dead_since = None;
    }
}

#[derive(Clone, Debug)]
struct GroupEntry {
    begin: Side,
    end: Side,
    state: FoldoutState,
}

/// Registry of foldout groups.
///
/// Holds the persistent [`FoldoutState`] of every group plus weak references
/// to the decorators currently representing its Begin and End.
#[derive(Clone, Debug, Default)]
pub struct GroupTable {
    entries: BTreeMap<GroupKey, GroupEntry>,
}

impl GroupTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `instance` as the Begin of `decl.key`.
    ///
    /// Calling this again for the same instance is a no-op. A destroyed
    /// previous Begin is replaced and its state kept.
    ///
    /// # Errors
    ///
    /// Returns [`DecoratorError::DuplicateGroup`] if another live Begin holds
    /// the key.
    pub fn link_begin(
        &mut self,
        decl: &GroupDecl,
        instance: InstanceId,
        instances: &InstanceStore,
    ) -> Result<Link, DecoratorError> {
        let entry = self
            .entries
            .entry(decl.key.clone())
            .or_insert_with(|| GroupEntry {
                begin: Side::default(),
                end: Side::default(),
                state: FoldoutState::new(decl),
            });
        let previous = entry.begin.instance;
        match entry.begin.live(instances) {
            Some(live) if live != instance => {
                return Err(DecoratorError::DuplicateGroup {
                    key: decl.key.clone(),
                    role: GroupRole::Begin,
                });
            }
            Some(_) => {}
            None => {
                entry.begin.set(instance);
                entry.state.label.clone_from(&decl.label);
                if decl.color.is_some() {
                    entry.state.color = decl.color;
                }
                if previous.is_some() {
                    return Ok(Link::Reconnected);
                }
            }
        }
        Ok(if entry.end.live(instances).is_some() {
            Link::Matched
        } else {
            Link::Pending
        })
    }

    /// Registers `instance` as the End of `key`.
    ///
    /// An End only links to a group whose Begin is live. Without one it is
    /// reported [`Link::Pending`] and nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`DecoratorError::DuplicateGroup`] if another live End holds
    /// the key.
    pub fn link_end(
        &mut self,
        key: &GroupKey,
        instance: InstanceId,
        instances: &InstanceStore,
    ) -> Result<Link, DecoratorError> {
        let Some(entry) = self.entries.get_mut(key) else {
            return Ok(Link::Pending);
        };
        match entry.end.live(instances) {
            Some(live) if live != instance => Err(DecoratorError::DuplicateGroup {
                key: key.clone(),
                role: GroupRole::End,
            }),
            Some(_) => Ok(Link::Matched),
            None if entry.begin.live(instances).is_none() => Ok(Link::Pending),
            None => {
                let previous = entry.end.instance;
                entry.end.set(instance);
                Ok(if previous.is_some() {
                    Link::Reconnected
                } else {
                    Link::Matched
                })
            }
        }
    }

    /// Clears `instance` from the End slot of `key`. Returns whether it held
    /// the slot.
    pub fn unlink_end(&mut self, key: &GroupKey, instance: InstanceId) -> bool {
        match self.entries.get_mut(key) {
            Some(entry) if entry.end.instance == Some(instance) => {
                entry.end = Side::default();
                true
            }
            _ => false,
        }
    }

    /// Returns whether `instance` is the registered End of `key`.
    #[must_use]
    pub fn is_end(&self, key: &GroupKey, instance: InstanceId) -> bool {
        self.entries
            .get(key)
            .is_some_and(|e| e.end.instance == Some(instance))
    }

    /// Returns the state of a group.
    #[must_use]
    pub fn get(&self, key: &GroupKey) -> Option<&FoldoutState> {
        self.entries.get(key).map(|e| &e.state)
    }

    /// Visibility factor of the region of `key`.
    ///
    /// `1 - progress` once an End is registered (even one whose instance has
    /// just died), otherwise `1`: a Begin without an End never closes.
    #[must_use]
    pub fn factor(&self, key: &GroupKey) -> f64 {
        match self.entries.get(key) {
            Some(entry) if entry.end.instance.is_some() => 1.0 - entry.state.progress,
            _ => 1.0,
        }
    }

    /// Whether the region of `key` is visibly fading: an End is registered
    /// and progress has not reached its target.
    #[must_use]
    pub fn is_fading(&self, key: &GroupKey) -> bool {
        self.entries
            .get(key)
            .is_some_and(|e| e.end.instance.is_some() && e.state.is_fading())
    }

    /// Flips the open target of a group, returning the new target.
    pub fn toggle(&mut self, key: &GroupKey) -> Option<bool> {
        let entry = self.entries.get_mut(key)?;
        entry.state.open = !entry.state.open;
        Some(entry.state.open)
    }

    /// Sets the open target of a group. Returns `false` for unknown keys.
    pub fn set_open(&mut self, key: &GroupKey, open: bool) -> bool {
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.state.open = open;
                true
            }
            None => false,
        }
    }

    /// Records the region's natural height and advances the fade by `step`.
    ///
    /// Returns the progress used for this frame, the progress after
    /// advancing, and the displayed height `target × (1 - progress)`.
    pub(crate) fn fade(
        &mut self,
        key: &GroupKey,
        target_height: f64,
        step: f64,
    ) -> Option<(f64, f64, f64)> {
        let state = &mut self.entries.get_mut(key)?.state;
        let progress = state.progress;
        state.cached_height = target_height;
        state.displayed_height = target_height * (1.0 - progress);
        state.advance(step);
        Some((progress, state.progress, state.displayed_height))
    }

    #[cfg(test)]
    pub(crate) fn set_progress(&mut self, key: &GroupKey, progress: f64) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.state.progress = progress;
        }
    }

    /// Clears sides that stayed dead for a full redraw cycle and removes
    /// entries with no side left. Returns the removed keys.
    pub fn collect_garbage(&mut self, redraw: u64, instances: &InstanceStore) -> Vec<GroupKey> {
        for entry in self.entries.values_mut() {
            for side in [&mut entry.begin, &mut entry.end] {
                let Some(id) = side.instance else { continue };
                if instances.is_alive(id) {
                    side.dead_since = None;
                    continue;
                }
                match side.dead_since {
                    None => side.dead_since = Some(redraw),
                    Some(since) if redraw > since => *side = Side::default(),
                    Some(_) => {}
                }
            }
        }
        let removed: Vec<GroupKey> = self
            .entries
            .iter()
            .filter(|(_, e)| e.begin.instance.is_none() && e.end.instance.is_none())
            .map(|(k, _)| k.clone())
            .collect();
        for key in &removed {
            self.entries.remove(key);
        }
        removed
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Group keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &GroupKey> + '_ {
        self.entries.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::Attribute;

    fn decl(key: &str) -> GroupDecl {
        Attribute::begin_group(key, "Stats").group().cloned().unwrap()
    }

    #[test]
    fn end_links_to_live_begin() {
        let mut instances = InstanceStore::new();
        let mut table = GroupTable::new();
        let begin = instances.create();
        let end = instances.create();
        let d = decl("G1");

        assert_eq!(table.link_begin(&d, begin, &instances), Ok(Link::Pending));
        assert_eq!(table.factor(&d.key), 1.0);
        assert_eq!(table.link_end(&d.key, end, &instances), Ok(Link::Matched));
        assert!(table.is_end(&d.key, end));

        table.set_progress(&d.key, 0.25);
        assert_eq!(table.factor(&d.key), 0.75);
    }

    #[test]
    fn unlinked_end_frees_the_slot() {
        let mut instances = InstanceStore::new();
        let mut table = GroupTable::new();
        let d = decl("G1");
        let begin = instances.create();
        let (end, other) = (instances.create(), instances.create());
        table.link_begin(&d, begin, &instances).unwrap();
        table.link_end(&d.key, end, &instances).unwrap();
        table.set_open(&d.key, false);
        assert!(table.is_fading(&d.key));

        assert!(!table.unlink_end(&d.key, other));
        assert!(table.unlink_end(&d.key, end));
        assert!(!table.is_end(&d.key, end));
        assert!(!table.is_fading(&d.key));
        assert_eq!(table.factor(&d.key), 1.0);
        assert_eq!(table.link_end(&d.key, other, &instances), Ok(Link::Matched));
    }

    #[test]
    fn orphan_end_is_not_stored() {
        let mut instances = InstanceStore::new();
        let mut table = GroupTable::new();
        let end = instances.create();
        let key = GroupKey::new("nobody");
        assert_eq!(table.link_end(&key, end, &instances), Ok(Link::Pending));
        assert!(table.is_empty());
    }

    #[test]
    fn duplicate_live_sides_are_rejected() {
        let mut instances = InstanceStore::new();
        let mut table = GroupTable::new();
        let d = decl("G1");
        let (b1, b2) = (instances.create(), instances.create());
        let (e1, e2) = (instances.create(), instances.create());
        table.link_begin(&d, b1, &instances).unwrap();
        table.link_end(&d.key, e1, &instances).unwrap();

        assert_eq!(
            table.link_begin(&d, b2, &instances),
            Err(DecoratorError::DuplicateGroup {
                key: d.key.clone(),
                role: GroupRole::Begin,
            })
        );
        assert!(matches!(
            table.link_end(&d.key, e2, &instances),
            Err(DecoratorError::DuplicateGroup {
                role: GroupRole::End,
                ..
            })
        ));
        // Re-linking the registered instances is idempotent.
        assert_eq!(table.link_begin(&d, b1, &instances), Ok(Link::Matched));
        assert_eq!(table.link_end(&d.key, e1, &instances), Ok(Link::Matched));
    }

    #[test]
    fn recreated_begin_reconnects_and_keeps_progress() {
        let mut instances = InstanceStore::new();
        let mut table = GroupTable::new();
        let d = decl("G1");
        let begin = instances.create();
        let end = instances.create();
        table.link_begin(&d, begin, &instances).unwrap();
        table.link_end(&d.key, end, &instances).unwrap();
        table.set_progress(&d.key, 0.4);

        instances.destroy(begin);
        let again = instances.create();
        assert_eq!(table.link_begin(&d, again, &instances), Ok(Link::Reconnected));
        assert_eq!(table.get(&d.key).map(FoldoutState::progress), Some(0.4));
    }

    #[test]
    fn dead_sides_survive_one_cycle_then_clear() {
        let mut instances = InstanceStore::new();
        let mut table = GroupTable::new();
        let d = decl("G1");
        let begin = instances.create();
        let end = instances.create();
        table.link_begin(&d, begin, &instances).unwrap();
        table.link_end(&d.key, end, &instances).unwrap();

        instances.destroy(end);
        assert!(table.collect_garbage(1, &instances).is_empty());
        // Still registered, so the region keeps its factor.
        table.set_progress(&d.key, 1.0);
        assert_eq!(table.factor(&d.key), 0.0);

        assert!(table.collect_garbage(2, &instances).is_empty());
        // End cleared: a Begin without End never closes.
        assert_eq!(table.factor(&d.key), 1.0);

        instances.destroy(begin);
        table.collect_garbage(3, &instances);
        let removed = table.collect_garbage(4, &instances);
        assert_eq!(removed, [d.key.clone()]);
        assert!(table.is_empty());
    }

    #[test]
    fn fade_reports_displayed_height_before_advancing() {
        let mut instances = InstanceStore::new();
        let mut table = GroupTable::new();
        let d = decl("G1");
        let begin = instances.create();
        table.link_begin(&d, begin, &instances).unwrap();
        table.toggle(&d.key);

        let (before, after, displayed) = table.fade(&d.key, 60.0, 0.25).unwrap();
        assert_eq!((before, after, displayed), (0.0, 0.25, 60.0));
        let (before, after, displayed) = table.fade(&d.key, 60.0, 1.0).unwrap();
        assert_eq!((before, after, displayed), (0.25, 1.0, 45.0));
        let state = table.get(&d.key).unwrap();
        assert!(!state.is_fading());
        assert_eq!(state.cached_height(), 60.0);
    }

    #[test]
    fn start_closed_groups_begin_collapsed() {
        let mut instances = InstanceStore::new();
        let mut table = GroupTable::new();
        let mut d = decl("G1");
        d.start_closed = true;
        table.link_begin(&d, instances.create(), &instances).unwrap();
        let state = table.get(&d.key).unwrap();
        assert_eq!(state.progress(), 1.0);
        assert!(!state.is_open());
    }
}
