// Copyright 2026 the Lectern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Foldout groups.
//!
//! A foldout group is a region of consecutive fields delimited by a field
//! carrying a `begin_group` attribute and a later field carrying an
//! `end_group` attribute with the same [`GroupKey`](crate::attribute::GroupKey).
//! Clicking the Begin's header row collapses or expands the region with a
//! fade.
//!
//! # Persistence
//!
//! Decorator instances are recreated whenever the host rebuilds a field, but
//! the fade of a group must not restart when that happens. The group's state
//! therefore lives in a [`GroupTable`] keyed by the group key, never inside a
//! decorator. Table entries refer to their Begin and End decorators through
//! weak [`InstanceId`](crate::field::InstanceId)s: a recreated Begin finds the
//! surviving End by key and picks up the old state ([`Link::Reconnected`]).
//! An entry side whose instance stays dead for a full redraw cycle is
//! cleared, and an entry with no side left is removed.
//!
//! # Regions
//!
//! The Begin's field renders above the region and the End's field below it.
//! Each region has a visibility factor, `1 - progress` once an End has
//! registered and `1` before that. The reported height of a field is its
//! natural height multiplied by the factors of every enclosing region, so a
//! collapsing region shrinks smoothly and a fully closed region (factor 0)
//! is skipped by the paint pass. [`GroupLayout`] records which regions
//! enclose which fields; it is derived from the chains' group markers and
//! rebuilt whenever a chain changes.

mod layout;
mod table;

pub(crate) use layout::{ClosedRegion, GroupLayout};
pub use table::{FoldoutState, GroupTable, Link};
