// Copyright 2026 the Lectern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! The inspector uses multi-channel dirty tracking (via [`understory_dirty`])
//! keyed by field slot. Each channel represents an independent category of
//! change.
//!
//! # Propagation semantics
//!
//! - **Propagating**: [`LAYOUT`] uses
//!   [`EagerPolicy`](understory_dirty::EagerPolicy) and has dependency edges
//!   from every field inside a foldout group to the field carrying the
//!   group's Begin. Toggling or fading a group marks the Begin field, which
//!   marks every field whose height depends on it.
//!
//! - **Local-only**: [`VALUE`] and [`CHAIN`] are marked with the default
//!   policy. Only the explicitly marked field appears in the drain output.
//!
//! # Consumption
//!
//! [`Inspector::begin_redraw`](crate::inspector::Inspector::begin_redraw)
//! drains all channels and surfaces the results as
//! [`RedrawChanges`](crate::inspector::RedrawChanges). Chains whose field was
//! marked [`CHAIN`] are dropped there and rebuilt on next use.

use understory_dirty::Channel;

/// The field's value changed, either through a control or behind the
/// inspector's back.
pub const VALUE: Channel = Channel::new(0);

/// The field's height may have changed; hosts should lay out again.
pub const LAYOUT: Channel = Channel::new(1);

/// The field's decorator chain must be rebuilt.
pub const CHAIN: Channel = Channel::new(2);
