// Copyright 2026 the Lectern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.
//!
//! [`DecoratorError`] is what decorators and their factories return.
//! Failures while *building* a chain are recovered locally: the offending
//! decorator is dropped and reported to the trace sink. Failures from any
//! later hook are wrapped in [`InspectorError`] and returned to the host.

use alloc::string::String;

use thiserror::Error;

use crate::attribute::{AttributeKind, GroupKey};
use crate::field::FieldId;

/// Which side of a foldout group a decorator represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GroupRole {
    /// The decorator that opens the group.
    Begin,
    /// The decorator that closes the group.
    End,
}

/// An error raised by a decorator or its factory.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum DecoratorError {
    /// No factory is registered for the attribute's kind.
    #[error("no decorator registered for attribute kind `{0}`")]
    UnknownKind(AttributeKind),
    /// The attribute's parameters cannot be used by this decorator.
    #[error("`{kind}` rejected its parameters: {reason}")]
    InvalidParams {
        /// Kind of the rejecting decorator.
        kind: AttributeKind,
        /// Human-readable explanation.
        reason: String,
    },
    /// Another live decorator already holds this side of the group.
    #[error("group `{key}` already has a live {role:?}")]
    DuplicateGroup {
        /// The contested group.
        key: GroupKey,
        /// The contested side.
        role: GroupRole,
    },
    /// A hook failed while rendering.
    #[error("{0}")]
    Failed(String),
}

/// An error returned to the host by the inspector.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum InspectorError {
    /// A decorator hook failed while rendering a field.
    #[error("decorator `{kind}` failed on {field:?}: {source}")]
    Hook {
        /// The field being rendered.
        field: FieldId,
        /// Kind of the failing decorator.
        kind: AttributeKind,
        /// The decorator's error.
        source: DecoratorError,
    },
    /// A context-menu index was out of range.
    #[error("menu has {len} items, index {index} is out of range")]
    MenuIndex {
        /// Requested index.
        index: usize,
        /// Number of items.
        len: usize,
    },
}
