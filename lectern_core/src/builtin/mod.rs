// Copyright 2026 the Lectern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Built-in decorators.
//!
//! | kind | decorator | hooks |
//! |------|-----------|-------|
//! | `range` | [`Range`] | slider in `on_gui`, context-menu entries |
//! | `readonly` | [`Readonly`] | disables input in `on_before_gui` |
//! | `header` | [`Header`] | section header row in `on_before_gui` |
//! | `space` | [`Space`] | vertical gap in `on_before_gui` |
//! | `required` | [`Required`] | warning row in `on_after_gui` |
//! | `begin_group` | [`BeginGroup`] | foldout header row, opens a region |
//! | `end_group` | [`EndGroup`] | closes a region, drives its fade |

mod group;
mod range;
mod simple;

pub use group::{BeginGroup, EndGroup};
pub use range::Range;
pub use simple::{Header, Readonly, Required, Space};

use crate::attribute::AttributeKind;
use crate::registry::DecoratorRegistry;

/// Registers every built-in decorator.
pub fn register_all(registry: &mut DecoratorRegistry) {
    registry.register(AttributeKind::RANGE, Range::create);
    registry.register(AttributeKind::READONLY, Readonly::create);
    registry.register(AttributeKind::HEADER, Header::create);
    registry.register(AttributeKind::SPACE, Space::create);
    registry.register(AttributeKind::REQUIRED, Required::create);
    registry.register(AttributeKind::BEGIN_GROUP, BeginGroup::create);
    registry.register(AttributeKind::END_GROUP, EndGroup::create);
}
