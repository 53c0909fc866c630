// Copyright 2026 the Lectern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Damage tracking between recorded frames.

use alloc::vec::Vec;

use kurbo::Rect;

/// A region of the inspector that needs repainting.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DamageRegion {
    /// Everything needs repainting.
    #[default]
    Full,
    /// A list of rectangles that need repainting, in inspector coordinates.
    Rects(Vec<Rect>),
    /// Nothing changed; the previous frame can be reused.
    None,
}

impl DamageRegion {
    /// Returns `true` if no region needs repainting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Merges another damage region into this one.
    pub fn merge(&mut self, other: &Self) {
        match (&*self, other) {
            (Self::Full, _) | (_, Self::Full) => *self = Self::Full,
            (Self::None, _) => *self = other.clone(),
            (_, Self::None) => {}
            (Self::Rects(a), Self::Rects(b)) => {
                let mut merged = a.clone();
                merged.extend_from_slice(b);
                *self = Self::Rects(merged);
            }
        }
    }

    /// Bounding box of the damage, or `None` for [`Full`](Self::Full) and
    /// [`None`](Self::None).
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Rects(rects) => rects.iter().copied().reduce(|a, b| a.union(b)),
            Self::Full | Self::None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn full_absorbs_everything() {
        let mut damage = DamageRegion::Rects(vec![Rect::new(0.0, 0.0, 1.0, 1.0)]);
        damage.merge(&DamageRegion::Full);
        assert_eq!(damage, DamageRegion::Full);
    }

    #[test]
    fn none_takes_the_other_side() {
        let rects = DamageRegion::Rects(vec![Rect::new(0.0, 0.0, 1.0, 1.0)]);
        let mut damage = DamageRegion::None;
        damage.merge(&rects);
        assert_eq!(damage, rects);
        damage.merge(&DamageRegion::None);
        assert_eq!(damage, rects);
    }

    #[test]
    fn rects_concatenate_and_bound() {
        let mut damage = DamageRegion::Rects(vec![Rect::new(0.0, 0.0, 10.0, 10.0)]);
        damage.merge(&DamageRegion::Rects(vec![Rect::new(0.0, 20.0, 10.0, 30.0)]));
        assert_eq!(damage.bounds(), Some(Rect::new(0.0, 0.0, 10.0, 30.0)));
        assert_eq!(DamageRegion::Full.bounds(), None);
    }
}
