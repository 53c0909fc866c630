// Copyright 2026 the Lectern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Field data model.
//!
//! A *field* is one editable entry of an inspected object. Each field has:
//!
//! - An identity ([`FieldId`]), a generational handle that becomes stale when
//!   the field is removed, so that use-after-remove is caught at the API.
//! - A declaration ([`FieldDecl`]): name, display label, declared value kind
//!   and the ordered attribute list that selects its decorators.
//! - Per-field caches owned by the composition root: the decorator chain, the
//!   last measured height and the width it was last painted at.
//!
//! Fields are stored in struct-of-arrays layout and kept in declaration
//! order, which is also the order a redraw renders them in.
//!
//! Decorator instances get their own handles ([`InstanceId`]) from an
//! [`InstanceStore`]. Those handles are what the foldout group table holds on
//! to, so it can tell a recreated decorator from a live one without owning
//! either.

mod decl;
mod id;
mod instances;
mod store;

pub use decl::FieldDecl;
pub use id::{FieldId, InstanceId};
pub use instances::InstanceStore;
pub(crate) use store::FieldStore;
