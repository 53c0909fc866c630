// Copyright 2026 the Lectern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Context menus aggregated from a field's decorator chain.
//!
//! A secondary click inside a field's rectangle asks every decorator in the
//! chain, in order, to append entries to one [`MenuBuilder`]. The resulting
//! [`ContextMenu`] is handed to the host via
//! [`Inspector::take_context_menu`](crate::inspector::Inspector::take_context_menu);
//! when the user picks an entry the host calls
//! [`Inspector::activate_menu_item`](crate::inspector::Inspector::activate_menu_item),
//! which runs the entry's action against the field's value.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Point;

use crate::field::FieldId;
use crate::value::Value;

/// Action run when a menu entry is chosen. It edits the field's value in
/// place; the inspector commits and notifies if the value changed.
pub type MenuAction = Box<dyn FnMut(&mut Value)>;

/// One context-menu entry.
pub struct MenuItem {
    label: String,
    enabled: bool,
    action: Option<MenuAction>,
}

impl MenuItem {
    /// Entry text.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the entry can be chosen.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled && self.action.is_some()
    }

    pub(crate) fn run(&mut self, value: &mut Value) -> bool {
        match (&mut self.action, self.enabled) {
            (Some(action), true) => {
                action(value);
                true
            }
            _ => false,
        }
    }
}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItem")
            .field("label", &self.label)
            .field("enabled", &self.enabled)
            .field("action", &self.action.is_some())
            .finish()
    }
}

/// Collects entries from the decorators of one field.
#[derive(Debug, Default)]
pub struct MenuBuilder {
    items: Vec<MenuItem>,
}

impl MenuBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry that runs `action` when chosen.
    pub fn add_item(&mut self, label: impl Into<String>, action: impl FnMut(&mut Value) + 'static) {
        self.items.push(MenuItem {
            label: label.into(),
            enabled: true,
            action: Some(Box::new(action)),
        });
    }

    /// Appends a greyed-out entry.
    pub fn add_disabled_item(&mut self, label: impl Into<String>) {
        self.items.push(MenuItem {
            label: label.into(),
            enabled: false,
            action: None,
        });
    }

    /// Number of entries so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns whether no entries were added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn into_items(self) -> Vec<MenuItem> {
        self.items
    }
}

/// A context menu waiting to be shown by the host.
#[derive(Debug)]
pub struct ContextMenu {
    pub(crate) field: FieldId,
    pub(crate) position: Point,
    pub(crate) items: Vec<MenuItem>,
}

impl ContextMenu {
    /// The field whose decorators produced the menu.
    #[must_use]
    pub fn field(&self) -> FieldId {
        self.field
    }

    /// Where the secondary click happened.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    /// The entries, in chain order.
    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Entry labels, in chain order.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.items.iter().map(MenuItem::label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_items_never_run() {
        let mut builder = MenuBuilder::new();
        builder.add_disabled_item("Nothing");
        builder.add_item("Zero", |v| *v = Value::Int(0));
        let mut items = builder.into_items();
        let mut value = Value::Int(7);

        assert!(!items[0].is_enabled());
        assert!(!items[0].run(&mut value));
        assert_eq!(value, Value::Int(7));

        assert!(items[1].run(&mut value));
        assert_eq!(value, Value::Int(0));
    }
}
