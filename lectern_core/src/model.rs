// Copyright 2026 the Lectern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Boundary with the persisted-object model that owns field values.

use alloc::collections::BTreeMap;

use crate::field::FieldId;
use crate::value::Value;

/// Supplies and stores field values.
///
/// The host's object model implements this. Values may change behind the
/// inspector's back (undo, reload); the host reports that through
/// [`Inspector::notify_external_change`](crate::inspector::Inspector::notify_external_change)
/// and decorators simply render whatever [`value`](Self::value) returns next.
pub trait ValueModel {
    /// Returns the current value of `field`.
    fn value(&self, field: FieldId) -> Value;

    /// Commits a new value for `field`.
    fn set_value(&mut self, field: FieldId, value: Value);
}

/// An in-memory [`ValueModel`].
///
/// Fields that were never written read as [`Value::Unit`].
#[derive(Clone, Debug, Default)]
pub struct MemoryModel {
    values: BTreeMap<FieldId, Value>,
    writes: u64,
}

impl MemoryModel {
    /// Creates an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a value without counting it as a commit.
    pub fn insert(&mut self, field: FieldId, value: Value) {
        self.values.insert(field, value);
    }

    /// Number of [`set_value`](ValueModel::set_value) commits so far.
    #[must_use]
    pub fn writes(&self) -> u64 {
        self.writes
    }
}

impl ValueModel for MemoryModel {
    fn value(&self, field: FieldId) -> Value {
        self.values.get(&field).cloned().unwrap_or_default()
    }

    fn set_value(&mut self, field: FieldId, value: Value) {
        self.writes += 1;
        self.values.insert(field, value);
    }
}
