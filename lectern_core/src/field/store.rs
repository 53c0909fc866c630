// Copyright 2026 the Lectern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays field storage.

use alloc::vec::Vec;

use super::decl::FieldDecl;
use super::id::FieldId;
use crate::inspector::chain::Chain;

/// Struct-of-arrays storage for all fields of an inspector.
///
/// Removed fields are recycled via a free list, and generation counters
/// prevent stale handle access.
#[derive(Debug, Default)]
pub(crate) struct FieldStore {
    // -- Declarations (set by callers) --
    pub(crate) decl: Vec<FieldDecl>,

    // -- Caches (written by the composition root) --
    pub(crate) chain: Vec<Option<Chain>>,
    /// Unscaled height from the last measurement pass.
    pub(crate) natural: Vec<Option<f64>>,
    /// Reported (region-scaled) height from the last measurement pass.
    pub(crate) height: Vec<Option<f64>>,
    pub(crate) last_width: Vec<Option<f64>>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    /// Live slots in declaration order.
    pub(crate) order: Vec<u32>,
}

impl FieldStore {
    /// Allocates a slot for `decl` and appends it to the declaration order.
    pub(crate) fn create(&mut self, decl: FieldDecl) -> FieldId {
        let idx = if let Some(idx) = self.free_list.pop() {
            let i = idx as usize;
            self.generation[i] += 1;
            self.decl[i] = decl;
            self.chain[i] = None;
            self.natural[i] = None;
            self.height[i] = None;
            self.last_width[i] = None;
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.decl.push(decl);
            self.chain.push(None);
            self.natural.push(None);
            self.height.push(None);
            self.last_width.push(None);
            self.generation.push(0);
            idx
        };
        self.order.push(idx);
        FieldId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Frees the slot of `id`, returning its chain so the caller can destroy
    /// the decorator instances.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub(crate) fn destroy(&mut self, id: FieldId) -> Option<Chain> {
        self.validate(id);
        let i = id.idx as usize;
        self.generation[i] += 1;
        self.decl[i] = FieldDecl::default();
        self.natural[i] = None;
        self.height[i] = None;
        self.last_width[i] = None;
        self.free_list.push(id.idx);
        self.order.retain(|&idx| idx != id.idx);
        self.chain[i].take()
    }

    /// Returns whether the given handle refers to a live field.
    pub(crate) fn is_alive(&self, id: FieldId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    /// Returns the current handle of a live slot.
    pub(crate) fn id_at(&self, idx: u32) -> FieldId {
        FieldId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Panics if `id` is stale.
    pub(crate) fn validate(&self, id: FieldId) {
        assert!(
            self.is_alive(id),
            "stale FieldId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueKind;

    #[test]
    fn create_keeps_declaration_order() {
        let mut store = FieldStore::default();
        let a = store.create(FieldDecl::new("a", ValueKind::Int));
        let b = store.create(FieldDecl::new("b", ValueKind::Int));
        let c = store.create(FieldDecl::new("c", ValueKind::Int));
        assert_eq!(store.order, [a.idx, b.idx, c.idx]);

        store.destroy(b);
        assert_eq!(store.order, [a.idx, c.idx]);
    }

    #[test]
    fn recycled_slot_goes_to_the_end() {
        let mut store = FieldStore::default();
        let a = store.create(FieldDecl::new("a", ValueKind::Int));
        let b = store.create(FieldDecl::new("b", ValueKind::Int));
        store.destroy(a);
        let d = store.create(FieldDecl::new("d", ValueKind::Bool));
        assert_eq!(d.idx, a.idx);
        assert_eq!(store.order, [b.idx, d.idx]);
        assert!(!store.is_alive(a));
        assert!(store.is_alive(d));
        assert_eq!(store.decl[d.idx as usize].name, "d");
    }

    #[test]
    #[should_panic(expected = "stale FieldId")]
    fn stale_handle_panics() {
        let mut store = FieldStore::default();
        let a = store.create(FieldDecl::new("a", ValueKind::Int));
        store.destroy(a);
        store.validate(a);
    }
}
