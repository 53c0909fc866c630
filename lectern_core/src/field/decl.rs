// Copyright 2026 the Lectern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Field declarations.

use alloc::string::String;
use alloc::vec::Vec;

use crate::attribute::Attribute;
use crate::value::ValueKind;

/// Author-time description of a field.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDecl {
    /// Identifier of the field within its object.
    pub name: String,
    /// Text shown next to the default control.
    pub label: String,
    /// The kind of value the field holds.
    pub kind: ValueKind,
    /// Attributes in declaration order.
    pub attributes: Vec<Attribute>,
}

impl Default for FieldDecl {
    fn default() -> Self {
        Self::new("", ValueKind::Unit)
    }
}

impl FieldDecl {
    /// Creates a declaration whose label is its name.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ValueKind) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            kind,
            attributes: Vec::new(),
        }
    }

    /// A field with no data that exists only to carry decorators, such as
    /// the boundaries of a foldout group.
    #[must_use]
    pub fn marker(name: impl Into<String>) -> Self {
        Self::new(name, ValueKind::Unit)
    }

    /// Sets the display label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Appends an attribute.
    #[must_use]
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }
}
