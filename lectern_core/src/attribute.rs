// Copyright 2026 the Lectern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Author-time field attributes.
//!
//! An [`Attribute`] is an immutable declaration attached to a field: a kind
//! tag that selects the decorator implementing it, kind-specific parameters,
//! and an ordering priority. Attributes are plain configuration; all runtime
//! behavior lives in the decorators built from them.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::paint::Color;
use crate::value::Value;

/// Selects which decorator implements an attribute.
///
/// Kinds are open: any crate can define new ones with [`AttributeKind::new`]
/// and register a factory for them in a
/// [`DecoratorRegistry`](crate::registry::DecoratorRegistry).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttributeKind(&'static str);

impl AttributeKind {
    /// Clamps numeric values to a range and draws them as a slider.
    pub const RANGE: Self = Self("range");
    /// Disables input for the field.
    pub const READONLY: Self = Self("readonly");
    /// Draws a section header above the field.
    pub const HEADER: Self = Self("header");
    /// Inserts vertical space above the field.
    pub const SPACE: Self = Self("space");
    /// Warns below the field while an object reference is empty.
    pub const REQUIRED: Self = Self("required");
    /// Opens a foldout group after the field.
    pub const BEGIN_GROUP: Self = Self("begin_group");
    /// Closes a foldout group before the field.
    pub const END_GROUP: Self = Self("end_group");

    /// Creates a kind tag.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Returns the tag's name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Debug for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AttributeKind({})", self.0)
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Stable identity of a foldout group.
///
/// Assigned once when the group is authored and never regenerated. Begin and
/// End attributes carrying equal keys form a group, and the group's
/// persistent state is stored under this key so it outlives any decorator
/// instance.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey(String);

impl GroupKey {
    /// Creates a key from its textual form.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the textual form of the key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GroupKey({:?})", self.0)
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Declaration of one side of a foldout group.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupDecl {
    /// Key shared by the Begin and End of the group.
    pub key: GroupKey,
    /// Header text (Begin only).
    pub label: String,
    /// Background color while fading. `None` picks from the configured
    /// palette by nesting depth.
    pub color: Option<Color>,
    /// Whether the group starts collapsed the first time it is seen.
    pub start_closed: bool,
}

/// Kind-specific attribute parameters.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum AttrParams {
    /// No parameters.
    #[default]
    None,
    /// An inclusive numeric range.
    Range {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
    /// A text parameter (header text, warning message, ...).
    Text(String),
    /// A vertical extent in layout units.
    Space(f64),
    /// A foldout group side.
    Group(GroupDecl),
    /// Named parameters for third-party kinds.
    Custom(Vec<(String, Value)>),
}

/// An immutable author-time declaration attached to a field.
#[derive(Clone, Debug, PartialEq)]
pub struct Attribute {
    /// Which decorator implements this attribute.
    pub kind: AttributeKind,
    /// Kind-specific parameters.
    pub params: AttrParams,
    /// Ordering priority; lower runs first. Ties keep declaration order.
    pub priority: i32,
}

impl Attribute {
    /// Creates an attribute with no parameters and priority 0.
    #[must_use]
    pub fn new(kind: AttributeKind) -> Self {
        Self {
            kind,
            params: AttrParams::None,
            priority: 0,
        }
    }

    /// Sets the parameters.
    #[must_use]
    pub fn with_params(mut self, params: AttrParams) -> Self {
        self.params = params;
        self
    }

    /// Sets the ordering priority.
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// `Range(min, max)`.
    #[must_use]
    pub fn range(min: f64, max: f64) -> Self {
        Self::new(AttributeKind::RANGE).with_params(AttrParams::Range { min, max })
    }

    /// `Readonly`.
    #[must_use]
    pub fn readonly() -> Self {
        Self::new(AttributeKind::READONLY)
    }

    /// `Header(text)`.
    #[must_use]
    pub fn header(text: impl Into<String>) -> Self {
        Self::new(AttributeKind::HEADER).with_params(AttrParams::Text(text.into()))
    }

    /// `Space(height)`.
    #[must_use]
    pub fn space(height: f64) -> Self {
        Self::new(AttributeKind::SPACE).with_params(AttrParams::Space(height))
    }

    /// `Required(message)`.
    #[must_use]
    pub fn required(message: impl Into<String>) -> Self {
        Self::new(AttributeKind::REQUIRED).with_params(AttrParams::Text(message.into()))
    }

    /// `BeginGroup(key, label)`, open by default.
    #[must_use]
    pub fn begin_group(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(AttributeKind::BEGIN_GROUP).with_params(AttrParams::Group(GroupDecl {
            key: GroupKey::new(key),
            label: label.into(),
            color: None,
            start_closed: false,
        }))
    }

    /// `EndGroup(key)`.
    #[must_use]
    pub fn end_group(key: impl Into<String>) -> Self {
        Self::new(AttributeKind::END_GROUP).with_params(AttrParams::Group(GroupDecl {
            key: GroupKey::new(key),
            label: String::new(),
            color: None,
            start_closed: false,
        }))
    }

    /// Returns the group declaration, if this attribute carries one.
    #[must_use]
    pub fn group(&self) -> Option<&GroupDecl> {
        match &self.params {
            AttrParams::Group(decl) => Some(decl),
            _ => None,
        }
    }

    /// Looks up a named custom parameter.
    #[must_use]
    pub fn custom(&self, name: &str) -> Option<&Value> {
        match &self.params {
            AttrParams::Custom(pairs) => pairs.iter().find(|(n, _)| n == name).map(|(_, v)| v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn group_constructors_share_keys() {
        let begin = Attribute::begin_group("G1", "Stats");
        let end = Attribute::end_group("G1");
        assert_eq!(begin.group().map(|g| &g.key), end.group().map(|g| &g.key));
        assert_eq!(begin.kind, AttributeKind::BEGIN_GROUP);
        assert!(Attribute::readonly().group().is_none());
    }

    #[test]
    fn custom_params_are_looked_up_by_name() {
        let attr = Attribute::new(AttributeKind::new("tint")).with_params(AttrParams::Custom(
            vec![("alpha".into(), Value::Float(0.5))],
        ));
        assert_eq!(attr.custom("alpha"), Some(&Value::Float(0.5)));
        assert_eq!(attr.custom("beta"), None);
    }
}
