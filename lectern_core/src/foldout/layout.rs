// Copyright 2026 the Lectern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Which foldout regions enclose which fields.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::attribute::GroupKey;
use crate::decorator::GroupMarker;

/// One Begin..End span of fields.
#[derive(Clone, Debug)]
pub(crate) struct Region {
    pub(crate) key: GroupKey,
    /// Slot of the field carrying the Begin.
    pub(crate) begin: u32,
    /// Slot of the field carrying the End, if one closes the region.
    pub(crate) end: Option<u32>,
    /// Number of regions enclosing this one.
    pub(crate) depth: usize,
}

/// A region closed by the field about to render, with its natural height.
#[derive(Clone, Debug)]
pub(crate) struct ClosedRegion {
    pub(crate) key: GroupKey,
    pub(crate) natural: f64,
}

/// Region structure of the fields of one inspector.
///
/// Built from the group markers of every chain in declaration order. Ends
/// close the innermost open region with their key before their field
/// renders; Begins open a region after their field. An End that matches no
/// open region is ignored, and a Begin that is never closed extends to the
/// last field.
#[derive(Clone, Debug, Default)]
pub(crate) struct GroupLayout {
    regions: Vec<Region>,
    /// Fields inside each region, in declaration order.
    members: Vec<Vec<u32>>,
    /// Regions enclosing each field, outermost first.
    enclosing: BTreeMap<u32, Vec<usize>>,
    /// Regions closed by each field.
    closes: BTreeMap<u32, Vec<usize>>,
}

impl GroupLayout {
    pub(crate) fn build(order: &[u32], mut markers: impl FnMut(u32) -> Vec<GroupMarker>) -> Self {
        let mut layout = Self::default();
        let mut stack: Vec<usize> = Vec::new();
        for &idx in order {
            let markers = markers(idx);
            for marker in &markers {
                let GroupMarker::End(key) = marker else {
                    continue;
                };
                if let Some(pos) = stack.iter().rposition(|&r| layout.regions[r].key == *key) {
                    let r = stack[pos];
                    layout.regions[r].end = Some(idx);
                    layout.closes.entry(idx).or_default().push(r);
                    stack.truncate(pos);
                }
            }
            if !stack.is_empty() {
                for &r in &stack {
                    layout.members[r].push(idx);
                }
                layout.enclosing.insert(idx, stack.clone());
            }
            for marker in &markers {
                let GroupMarker::Begin(key) = marker else {
                    continue;
                };
                layout.regions.push(Region {
                    key: key.clone(),
                    begin: idx,
                    end: None,
                    depth: stack.len(),
                });
                layout.members.push(Vec::new());
                stack.push(layout.regions.len() - 1);
            }
        }
        layout
    }

    pub(crate) fn region(&self, r: usize) -> &Region {
        &self.regions[r]
    }

    /// Regions enclosing `idx`, outermost first.
    pub(crate) fn enclosing(&self, idx: u32) -> &[usize] {
        self.enclosing.get(&idx).map_or(&[][..], Vec::as_slice)
    }

    /// Regions whose End is carried by `idx`.
    pub(crate) fn closed_by(&self, idx: u32) -> &[usize] {
        self.closes.get(&idx).map_or(&[][..], Vec::as_slice)
    }

    /// Slot of the field carrying the Begin of `key`.
    pub(crate) fn begin_of(&self, key: &GroupKey) -> Option<u32> {
        self.regions.iter().find(|r| r.key == *key).map(|r| r.begin)
    }

    /// `(member, begin)` pairs: every field depends on the Begin of each
    /// region enclosing it.
    pub(crate) fn edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.regions
            .iter()
            .zip(&self.members)
            .flat_map(|(region, members)| members.iter().map(move |&m| (m, region.begin)))
    }

    /// Natural height of region `r`: the sum of its members' natural heights,
    /// each scaled by the factors of the regions nested between `r` and the
    /// member.
    pub(crate) fn region_natural(
        &self,
        r: usize,
        natural: impl Fn(u32) -> f64,
        factor: impl Fn(&GroupKey) -> f64,
    ) -> f64 {
        self.members[r]
            .iter()
            .map(|&idx| {
                let enclosing = self.enclosing(idx);
                let nested = enclosing
                    .iter()
                    .position(|&e| e == r)
                    .map_or(&[][..], |pos| &enclosing[pos + 1..]);
                let scale: f64 = nested
                    .iter()
                    .map(|&inner| factor(&self.regions[inner].key))
                    .product();
                natural(idx) * scale
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn begin(key: &str) -> GroupMarker {
        GroupMarker::Begin(GroupKey::new(key))
    }

    fn end(key: &str) -> GroupMarker {
        GroupMarker::End(GroupKey::new(key))
    }

    /// 0: Begin(outer) 1: a 2: Begin(inner) 3: b 4: End(inner) 5: c 6: End(outer)
    fn nested() -> GroupLayout {
        GroupLayout::build(&[0, 1, 2, 3, 4, 5, 6], |idx| match idx {
            0 => vec![begin("outer")],
            2 => vec![begin("inner")],
            4 => vec![end("inner")],
            6 => vec![end("outer")],
            _ => vec![],
        })
    }

    #[test]
    fn boundaries_sit_outside_their_region() {
        let layout = nested();
        assert!(layout.enclosing(0).is_empty());
        assert_eq!(layout.enclosing(1), [0]);
        assert_eq!(layout.enclosing(2), [0]);
        assert_eq!(layout.enclosing(3), [0, 1]);
        assert_eq!(layout.enclosing(4), [0]);
        assert!(layout.enclosing(6).is_empty());
        assert_eq!(layout.closed_by(4), [1]);
        assert_eq!(layout.closed_by(6), [0]);
        assert_eq!(layout.region(1).depth, 1);
        assert_eq!(layout.region(0).end, Some(6));
    }

    #[test]
    fn nested_factors_scale_outer_natural() {
        let layout = nested();
        let inner_closed = |key: &GroupKey| if key.as_str() == "inner" { 0.0 } else { 1.0 };
        // Members of outer: 1, 2, 3, 4, 5; field 3 is inside inner.
        assert_eq!(layout.region_natural(0, |_| 20.0, |_| 1.0), 100.0);
        assert_eq!(layout.region_natural(0, |_| 20.0, inner_closed), 80.0);
        // Inner's own natural ignores its own factor.
        assert_eq!(layout.region_natural(1, |_| 20.0, inner_closed), 20.0);
    }

    #[test]
    fn unmatched_markers_are_ignored() {
        let layout = GroupLayout::build(&[0, 1, 2], |idx| match idx {
            0 => vec![end("orphan")],
            1 => vec![begin("open")],
            _ => vec![],
        });
        assert!(layout.closed_by(0).is_empty());
        assert_eq!(layout.enclosing(2), [0]);
        assert_eq!(layout.region(0).end, None);
        assert_eq!(layout.edges().collect::<Vec<_>>(), [(2, 1)]);
    }
}
