// Copyright 2026 the Lectern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decorator chains.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::attribute::{Attribute, AttributeKind};
use crate::config::InspectorConfig;
use crate::decorator::{Decorator, GroupMarker, InitCx, LinkRecord};
use crate::error::DecoratorError;
use crate::field::{FieldId, InstanceId, InstanceStore};
use crate::foldout::GroupTable;
use crate::registry::DecoratorRegistry;

pub(crate) struct ChainEntry {
    pub(crate) kind: AttributeKind,
    pub(crate) instance: InstanceId,
    pub(crate) marker: Option<GroupMarker>,
    pub(crate) decorator: Box<dyn Decorator>,
}

impl fmt::Debug for ChainEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainEntry")
            .field("kind", &self.kind)
            .field("instance", &self.instance)
            .field("marker", &self.marker)
            .finish_non_exhaustive()
    }
}

/// The ordered decorators of one field.
#[derive(Debug)]
pub(crate) struct Chain {
    /// Registry revision the chain was built against.
    pub(crate) revision: u64,
    pub(crate) entries: Vec<ChainEntry>,
}

/// Everything a chain build produced besides the chain.
#[derive(Debug, Default)]
pub(crate) struct BuildReport {
    pub(crate) dropped: Vec<(AttributeKind, DecoratorError)>,
    pub(crate) links: Vec<LinkRecord>,
}

impl Chain {
    /// Creates and initializes the decorators of `attributes`.
    ///
    /// Attributes are sorted by priority; the sort is stable so ties keep
    /// declaration order. Factory and initialization failures leave the
    /// attribute out and are listed in the report.
    pub(crate) fn build(
        field: FieldId,
        attributes: &[Attribute],
        registry: &DecoratorRegistry,
        instances: &mut InstanceStore,
        groups: &mut GroupTable,
        config: &InspectorConfig,
    ) -> (Self, BuildReport) {
        let mut sorted: Vec<&Attribute> = attributes.iter().collect();
        sorted.sort_by_key(|a| a.priority);

        let mut report = BuildReport::default();
        let mut entries = Vec::with_capacity(sorted.len());
        for attribute in sorted {
            let mut decorator = match registry.create(attribute) {
                Ok(decorator) => decorator,
                Err(err) => {
                    report.dropped.push((attribute.kind, err));
                    continue;
                }
            };
            let instance = instances.create();
            let mut cx = InitCx {
                field,
                instance,
                config,
                groups: &mut *groups,
                instances: &*instances,
                links: &mut report.links,
            };
            match decorator.initialize(&mut cx) {
                Ok(()) => entries.push(ChainEntry {
                    kind: attribute.kind,
                    instance,
                    marker: decorator.group_marker(),
                    decorator,
                }),
                Err(err) => {
                    instances.destroy(instance);
                    report.dropped.push((attribute.kind, err));
                }
            }
        }
        (
            Self {
                revision: registry.revision(),
                entries,
            },
            report,
        )
    }

    /// Destroys the decorator instances of this chain.
    pub(crate) fn release(self, instances: &mut InstanceStore) {
        for entry in self.entries {
            instances.destroy(entry.instance);
        }
    }

    pub(crate) fn markers(&self) -> impl Iterator<Item = &GroupMarker> + '_ {
        self.entries.iter().filter_map(|e| e.marker.as_ref())
    }
}
