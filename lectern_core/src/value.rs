// Copyright 2026 the Lectern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dynamic field values.

use alloc::string::String;
use core::fmt;

/// An opaque reference to a host object (asset, scene object, ...).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectRef(pub u64);

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectRef({})", self.0)
    }
}

/// The value of a field, as read from and written to the
/// [`ValueModel`](crate::model::ValueModel).
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    /// No data. Used by marker fields that only carry decorators, such as
    /// foldout boundaries.
    #[default]
    Unit,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// Text.
    Text(String),
    /// A possibly empty object reference.
    Object(Option<ObjectRef>),
    /// Multiple selected objects hold different values for this field.
    Mixed,
}

impl Value {
    /// Returns the discriminant of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Unit => ValueKind::Unit,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::Text(_) => ValueKind::Text,
            Self::Object(_) => ValueKind::Object,
            Self::Mixed => ValueKind::Mixed,
        }
    }

    /// Returns the value as a number if it is numeric.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Int(v) => Some(v as f64),
            Self::Float(v) => Some(v),
            _ => None,
        }
    }
}

/// The discriminant of a [`Value`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// See [`Value::Unit`].
    Unit,
    /// See [`Value::Bool`].
    Bool,
    /// See [`Value::Int`].
    Int,
    /// See [`Value::Float`].
    Float,
    /// See [`Value::Text`].
    Text,
    /// See [`Value::Object`].
    Object,
    /// See [`Value::Mixed`].
    Mixed,
}

impl ValueKind {
    /// Returns whether values of this kind are numbers.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::Float)
    }

    /// Returns the value a freshly declared field of this kind holds.
    #[must_use]
    pub fn default_value(self) -> Value {
        match self {
            Self::Unit => Value::Unit,
            Self::Bool => Value::Bool(false),
            Self::Int => Value::Int(0),
            Self::Float => Value::Float(0.0),
            Self::Text => Value::Text(String::new()),
            Self::Object => Value::Object(None),
            Self::Mixed => Value::Mixed,
        }
    }
}
