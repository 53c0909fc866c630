// Copyright 2026 the Lectern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generational slots for decorator instances.

use alloc::vec::Vec;

use super::id::InstanceId;

/// Allocates [`InstanceId`]s and answers liveness queries for them.
///
/// The store holds no decorator data; the decorators themselves live in
/// their field's chain. It only exists so that other registries can refer to
/// a decorator by handle and find out cheaply whether it has been destroyed.
#[derive(Debug, Default)]
pub struct InstanceStore {
    generation: Vec<u32>,
    alive: Vec<bool>,
    free_list: Vec<u32>,
    len: u32,
}

impl InstanceStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a fresh instance handle.
    pub fn create(&mut self) -> InstanceId {
        let idx = if let Some(idx) = self.free_list.pop() {
            self.generation[idx as usize] += 1;
            self.alive[idx as usize] = true;
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.generation.push(0);
            self.alive.push(true);
            idx
        };
        InstanceId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Destroys an instance. Destroying a dead handle is a no-op.
    pub fn destroy(&mut self, id: InstanceId) {
        if !self.is_alive(id) {
            return;
        }
        self.alive[id.idx as usize] = false;
        self.free_list.push(id.idx);
    }

    /// Returns whether the handle refers to a live instance.
    #[must_use]
    pub fn is_alive(&self, id: InstanceId) -> bool {
        id.idx < self.len
            && self.generation[id.idx as usize] == id.generation
            && self.alive[id.idx as usize]
    }

    /// Number of live instances.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.alive.iter().filter(|a| **a).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_destroy() {
        let mut store = InstanceStore::new();
        let id = store.create();
        assert!(store.is_alive(id));
        store.destroy(id);
        assert!(!store.is_alive(id));
        assert_eq!(store.live_count(), 0);
    }

    #[test]
    fn generation_detects_recycled_slots() {
        let mut store = InstanceStore::new();
        let old = store.create();
        store.destroy(old);
        let new = store.create();
        assert_eq!(old.idx, new.idx);
        assert_ne!(old.generation, new.generation);
        assert!(!store.is_alive(old));
        assert!(store.is_alive(new));

        // A stale destroy must not free the new occupant.
        store.destroy(old);
        assert!(store.is_alive(new));
    }
}
