// Copyright 2026 the Lectern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draw-list painter and damage tracking for lectern.
//!
//! This crate sits between [`lectern_core`]'s paint passes and a host's
//! renderer. It defines:
//!
//! - [`DrawList`] — a [`Painter`](lectern_core::paint::Painter) that records
//!   every draw call together with the clip active at the time
//! - [`DrawItem`] / [`DrawKind`] — one recorded command
//! - [`DamageRegion`] — the area that changed between two recorded frames

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

mod damage;
mod list;

pub use damage::DamageRegion;
pub use list::{ControlItem, DrawItem, DrawKind, DrawList};
