// Copyright 2026 the Lectern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Field and decorator-instance identity types.

use core::fmt;

/// A handle to a field in an [`Inspector`](crate::inspector::Inspector).
///
/// Contains both a slot index and a generation counter so that stale handles
/// can be detected after a field is removed and the slot is reused.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldId {
    /// Slot index into the store's arrays.
    pub(crate) idx: u32,
    /// Generation counter; must match the store's generation for this slot.
    pub(crate) generation: u32,
}

impl FieldId {
    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldId({}@gen{})", self.idx, self.generation)
    }
}

/// A handle to one live decorator instance.
///
/// Instance slots are recycled when chains are dropped, so the generation is
/// what lets registries hold these as weak references: a handle whose
/// generation no longer matches refers to a destroyed decorator.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstanceId {
    pub(crate) idx: u32,
    pub(crate) generation: u32,
}

impl InstanceId {
    /// Placeholder for code running outside any decorator, such as the
    /// default control. Never alive.
    pub(crate) const NONE: Self = Self {
        idx: u32::MAX,
        generation: u32::MAX,
    };

    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InstanceId({}@gen{})", self.idx, self.generation)
    }
}
