// Copyright 2026 the Lectern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute kind to decorator factory mapping.
//!
//! Registration is explicit ([`DecoratorRegistry::register`]) or link-time:
//! any crate can submit a factory with [`submit_decorator!`](crate::submit_decorator)
//! and a host picks up every submission with [`DecoratorRegistry::discover`].
//!
//! Every change bumps the registry's [revision](DecoratorRegistry::revision).
//! Chains remember the revision they were built against and are rebuilt on
//! their next use once it moves.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;

use crate::attribute::{Attribute, AttributeKind};
use crate::decorator::Decorator;
use crate::error::DecoratorError;

/// Creates the decorator for one attribute.
///
/// Factories validate the attribute's parameters; a rejected attribute is
/// dropped from its chain.
pub type DecoratorFactory = fn(&Attribute) -> Result<Box<dyn Decorator>, DecoratorError>;

/// A link-time decorator registration, submitted with
/// [`submit_decorator!`](crate::submit_decorator).
#[derive(Debug)]
pub struct DecoratorReg {
    /// The kind this factory implements.
    pub kind: AttributeKind,
    /// The factory.
    pub factory: DecoratorFactory,
    /// Name of the submitting crate.
    pub source: &'static str,
}

inventory::collect!(DecoratorReg);

/// Submits a decorator factory for link-time discovery.
///
/// ```ignore
/// lectern_core::submit_decorator!(AttributeKind::new("tooltip"), tooltip_factory);
/// ```
#[macro_export]
macro_rules! submit_decorator {
    ($kind:expr, $factory:expr $(,)?) => {
        $crate::__inventory::submit! {
            $crate::registry::DecoratorReg {
                kind: $kind,
                factory: $factory,
                source: env!("CARGO_PKG_NAME"),
            }
        }
    };
}

/// Maps attribute kinds to decorator factories.
#[derive(Clone, Debug, Default)]
pub struct DecoratorRegistry {
    factories: BTreeMap<AttributeKind, DecoratorFactory>,
    revision: u64,
}

impl DecoratorRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in decorators.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        crate::builtin::register_all(&mut registry);
        registry
    }

    /// Registers (or replaces) the factory for `kind`, returning the
    /// previous one.
    pub fn register(
        &mut self,
        kind: AttributeKind,
        factory: DecoratorFactory,
    ) -> Option<DecoratorFactory> {
        self.revision += 1;
        self.factories.insert(kind, factory)
    }

    /// Removes the factory for `kind`.
    pub fn unregister(&mut self, kind: AttributeKind) -> Option<DecoratorFactory> {
        let old = self.factories.remove(&kind)?;
        self.revision += 1;
        Some(old)
    }

    /// Registers every factory submitted with
    /// [`submit_decorator!`](crate::submit_decorator) whose kind is not
    /// registered yet. Returns how many were added.
    pub fn discover(&mut self) -> usize {
        let mut added = 0;
        for reg in inventory::iter::<DecoratorReg> {
            if !self.factories.contains_key(&reg.kind) {
                self.factories.insert(reg.kind, reg.factory);
                added += 1;
            }
        }
        if added > 0 {
            self.revision += 1;
        }
        added
    }

    /// Returns whether a factory is registered for `kind`.
    #[must_use]
    pub fn contains(&self, kind: AttributeKind) -> bool {
        self.factories.contains_key(&kind)
    }

    /// Registered kinds in sorted order.
    pub fn kinds(&self) -> impl Iterator<Item = AttributeKind> + '_ {
        self.factories.keys().copied()
    }

    /// Counter bumped by every change to the registry.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Creates the decorator for `attribute`.
    ///
    /// # Errors
    ///
    /// Returns [`DecoratorError::UnknownKind`] if no factory is registered
    /// for the attribute's kind, or whatever the factory rejects.
    pub fn create(&self, attribute: &Attribute) -> Result<Box<dyn Decorator>, DecoratorError> {
        let factory = self
            .factories
            .get(&attribute.kind)
            .ok_or(DecoratorError::UnknownKind(attribute.kind))?;
        factory(attribute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decorator::Decorator;

    const DISCOVERED: AttributeKind = AttributeKind::new("test_discovered");

    struct Inert;

    impl Decorator for Inert {}

    fn inert(_: &Attribute) -> Result<Box<dyn Decorator>, DecoratorError> {
        Ok(Box::new(Inert))
    }

    crate::submit_decorator!(DISCOVERED, inert);

    #[test]
    fn builtin_covers_the_standard_kinds() {
        let registry = DecoratorRegistry::builtin();
        for kind in [
            AttributeKind::RANGE,
            AttributeKind::READONLY,
            AttributeKind::HEADER,
            AttributeKind::SPACE,
            AttributeKind::REQUIRED,
            AttributeKind::BEGIN_GROUP,
            AttributeKind::END_GROUP,
        ] {
            assert!(registry.contains(kind), "missing builtin {kind}");
        }
    }

    #[test]
    fn unknown_kind_is_an_error() {
        let registry = DecoratorRegistry::new();
        let attr = Attribute::new(AttributeKind::new("nope"));
        assert!(matches!(
            registry.create(&attr),
            Err(DecoratorError::UnknownKind(kind)) if kind.name() == "nope"
        ));
    }

    #[test]
    fn register_bumps_revision() {
        let mut registry = DecoratorRegistry::new();
        let r0 = registry.revision();
        assert!(registry.register(AttributeKind::new("a"), inert).is_none());
        assert!(registry.revision() > r0);
        assert!(registry.register(AttributeKind::new("a"), inert).is_some());
        let r1 = registry.revision();
        assert!(registry.unregister(AttributeKind::new("a")).is_some());
        assert!(registry.revision() > r1);
        assert!(registry.unregister(AttributeKind::new("a")).is_none());
    }

    #[test]
    fn discover_finds_submitted_factories() {
        let mut registry = DecoratorRegistry::new();
        let before = registry.revision();
        assert!(registry.discover() >= 1);
        assert!(registry.contains(DISCOVERED));
        assert!(registry.revision() > before);
        // Already known kinds are not re-added.
        let again = registry.revision();
        assert_eq!(registry.discover(), 0);
        assert_eq!(registry.revision(), again);
    }

    #[test]
    fn explicit_registration_wins_over_discovery() {
        fn other(_: &Attribute) -> Result<Box<dyn Decorator>, DecoratorError> {
            Err(DecoratorError::Failed("explicit".into()))
        }
        let mut registry = DecoratorRegistry::new();
        registry.register(DISCOVERED, other);
        registry.discover();
        assert!(registry.create(&Attribute::new(DISCOVERED)).is_err());
    }
}
