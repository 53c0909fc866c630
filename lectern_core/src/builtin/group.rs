// Copyright 2026 the Lectern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Foldout group boundaries.

use alloc::boxed::Box;

use crate::attribute::{Attribute, AttributeKind, GroupDecl, GroupKey};
use crate::decorator::{Decorator, FieldCx, GroupMarker, Hook, InitCx};
use crate::error::DecoratorError;
use crate::foldout::{FoldoutState, Link};
use crate::paint::Control;

fn group_decl(attribute: &Attribute) -> Result<&GroupDecl, DecoratorError> {
    attribute
        .group()
        .ok_or_else(|| DecoratorError::InvalidParams {
            kind: attribute.kind,
            reason: "expected a group declaration".into(),
        })
}

/// Opens a foldout region after its field and draws the clickable header
/// row above the field.
#[derive(Clone, Debug)]
pub struct BeginGroup {
    decl: GroupDecl,
    link: Option<Link>,
}

impl BeginGroup {
    /// Factory for [`AttributeKind::BEGIN_GROUP`].
    ///
    /// # Errors
    ///
    /// Rejects attributes without a group declaration.
    pub fn create(attribute: &Attribute) -> Result<Box<dyn Decorator>, DecoratorError> {
        Ok(Box::new(Self {
            decl: group_decl(attribute)?.clone(),
            link: None,
        }))
    }
}

impl Decorator for BeginGroup {
    fn initialize(&mut self, cx: &mut InitCx<'_>) -> Result<(), DecoratorError> {
        if self.link.is_none() {
            self.link = Some(cx.link_begin(&self.decl)?);
        }
        Ok(())
    }

    fn group_marker(&self) -> Option<GroupMarker> {
        Some(GroupMarker::Begin(self.decl.key.clone()))
    }

    fn on_before_gui(&mut self, cx: &mut FieldCx<'_>) -> Result<Hook, DecoratorError> {
        let height = cx.config().row_height;
        let rect = cx.row_rect(height);
        let open = cx.group(&self.decl.key).is_none_or(FoldoutState::is_open);
        cx.painter().control(
            rect,
            Control::FoldoutHeader {
                label: &self.decl.label,
                open,
            },
            true,
        );
        if cx.input().take_click(rect) {
            cx.toggle_group(&self.decl.key);
        }
        Ok(Hook::consumed(height))
    }
}

/// Closes the innermost open region with its key before its field renders,
/// and drives that region's fade during paint passes.
///
/// Each paint pass checks the registration against the layout: the End holds
/// its group's End slot only while the layout closes a region at its field.
/// An End without a preceding Begin, or on the Begin's own field, is inert:
/// it draws nothing, takes no space and gives up the slot.
#[derive(Clone, Debug)]
pub struct EndGroup {
    key: GroupKey,
    link: Option<Link>,
}

impl EndGroup {
    /// Factory for [`AttributeKind::END_GROUP`].
    ///
    /// # Errors
    ///
    /// Rejects attributes without a group declaration.
    pub fn create(attribute: &Attribute) -> Result<Box<dyn Decorator>, DecoratorError> {
        Ok(Box::new(Self {
            key: group_decl(attribute)?.key.clone(),
            link: None,
        }))
    }
}

impl Decorator for EndGroup {
    fn initialize(&mut self, cx: &mut InitCx<'_>) -> Result<(), DecoratorError> {
        if self.link.is_none_or(|l| l == Link::Pending) {
            self.link = Some(cx.link_end(&self.key)?);
        }
        Ok(())
    }

    fn group_marker(&self) -> Option<GroupMarker> {
        Some(GroupMarker::End(self.key.clone()))
    }

    fn on_before_gui(&mut self, cx: &mut FieldCx<'_>) -> Result<Hook, DecoratorError> {
        if cx.is_measure() {
            return Ok(Hook::PASS);
        }
        let Some(natural) = cx.closed_region(&self.key) else {
            if self.link.take().is_some_and(|l| l != Link::Pending) {
                cx.unlink_group_end(&self.key);
            }
            return Ok(Hook::PASS);
        };
        if self.link.is_none_or(|l| l == Link::Pending) {
            self.link = Some(cx.link_group_end(&self.key)?);
        }
        if self.link != Some(Link::Pending) {
            cx.fade_group(&self.key, natural);
        }
        Ok(Hook::PASS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factories_require_group_params() {
        assert!(BeginGroup::create(&Attribute::begin_group("G", "Group")).is_ok());
        assert!(EndGroup::create(&Attribute::end_group("G")).is_ok());
        assert!(BeginGroup::create(&Attribute::new(AttributeKind::BEGIN_GROUP)).is_err());
        assert!(EndGroup::create(&Attribute::range(0.0, 1.0)).is_err());
    }

    #[test]
    fn markers_carry_the_key() {
        let begin = BeginGroup::create(&Attribute::begin_group("G", "Group")).unwrap();
        let end = EndGroup::create(&Attribute::end_group("G")).unwrap();
        assert_eq!(
            begin.group_marker(),
            Some(GroupMarker::Begin(GroupKey::new("G")))
        );
        assert_eq!(end.group_marker(), Some(GroupMarker::End(GroupKey::new("G"))));
    }
}
