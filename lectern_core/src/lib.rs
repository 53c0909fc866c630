// Copyright 2026 the Lectern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute-driven inspector field composition with animated foldout groups.
//!
//! `lectern_core` renders the editable control of a data field by composing an
//! ordered chain of *decorators*, one per attribute attached to the field. It
//! is `no_std` compatible (with `alloc`) and drives everything from host
//! redraw calls; there is no background work.
//!
//! # Architecture
//!
//! Every redraw runs the same routine twice per field:
//!
//! ```text
//!   Host redraw
//!       │
//!       ▼
//!   Inspector::begin_redraw() ──► RedrawChanges
//!       │
//!       ▼
//!   Inspector::query_height()   (measurement pass: off-screen cursor,
//!       │                        NullPainter, no input)
//!       ▼
//!   Inspector::paint()          (paint pass: real rect, real painter,
//!                                input dispatch, value commit, menus)
//! ```
//!
//! Measuring by executing the real routine keeps the first height query
//! consistent with what the paint pass draws, even when a decorator's height
//! depends on the value it renders.
//!
//! **[`attribute`]** — Author-time declarations: kind tag, parameters and
//! priority.
//!
//! **[`decorator`]** — The six-hook [`Decorator`](decorator::Decorator) trait
//! and the contexts passed to each hook.
//!
//! **[`registry`]** — Maps attribute kinds to decorator factories, with
//! explicit registration and link-time discovery.
//!
//! **[`inspector`]** — The composition root. Builds and caches chains, runs
//! the two-pass protocol, detects value changes and aggregates context menus.
//!
//! **[`foldout`]** — The Begin/End grouping protocol: a registry keyed by
//! stable group keys that survives decorator recreation, plus per-pass region
//! bookkeeping and fade animation.
//!
//! **[`cursor`]** — Vertical layout cursor shared by the hooks of one field.
//!
//! **[`dirty`]** — Invalidation channels via `understory_dirty`.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types, with
//! the zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod attribute;
pub mod builtin;
pub mod config;
pub mod controls;
pub mod cursor;
pub mod decorator;
pub mod dirty;
pub mod error;
pub mod field;
pub mod foldout;
pub mod input;
pub mod inspector;
pub mod menu;
pub mod model;
pub mod paint;
pub mod registry;
pub mod time;
pub mod trace;
pub mod value;

#[cfg(test)]
pub(crate) mod testing;

#[doc(hidden)]
pub use inventory as __inventory;
