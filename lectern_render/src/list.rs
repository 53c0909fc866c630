// Copyright 2026 the Lectern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draw list: an ordered record of the paint calls of one redraw.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::Rect;
use lectern_core::paint::{Color, Control, MessageLevel, Painter};
use lectern_core::value::ObjectRef;

use crate::damage::DamageRegion;

/// Owned copy of a [`Control`].
#[derive(Clone, Debug, PartialEq)]
pub enum ControlItem {
    /// A horizontal slider.
    Slider {
        /// Displayed value.
        value: f64,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
    /// A checkbox.
    Toggle(bool),
    /// An integer entry field.
    IntField(i64),
    /// A floating-point entry field.
    FloatField(f64),
    /// A single-line text entry.
    TextField(String),
    /// An object reference picker.
    ObjectField(Option<ObjectRef>),
    /// Mixed-value placeholder.
    MixedValue,
    /// A foldout header row.
    FoldoutHeader {
        /// Header text.
        label: String,
        /// Whether the group is targeted open.
        open: bool,
    },
    /// A section header.
    Header(String),
    /// A message box.
    HelpBox {
        /// Message text.
        text: String,
        /// Severity.
        level: MessageLevel,
    },
}

impl From<Control<'_>> for ControlItem {
    fn from(control: Control<'_>) -> Self {
        match control {
            Control::Slider { value, min, max } => Self::Slider { value, min, max },
            Control::Toggle(on) => Self::Toggle(on),
            Control::IntField(v) => Self::IntField(v),
            Control::FloatField(v) => Self::FloatField(v),
            Control::TextField(text) => Self::TextField(text.to_string()),
            Control::ObjectField(obj) => Self::ObjectField(obj),
            Control::MixedValue => Self::MixedValue,
            Control::FoldoutHeader { label, open } => Self::FoldoutHeader {
                label: label.to_string(),
                open,
            },
            Control::Header(text) => Self::Header(text.to_string()),
            Control::HelpBox { text, level } => Self::HelpBox {
                text: text.to_string(),
                level,
            },
        }
    }
}

/// What a [`DrawItem`] draws.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawKind {
    /// A solid fill.
    Fill(Color),
    /// A text label.
    Label(String),
    /// A control widget.
    Control {
        /// The widget.
        control: ControlItem,
        /// Whether it was drawn enabled.
        enabled: bool,
    },
}

/// A single recorded draw command.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawItem {
    /// Target rectangle, in inspector coordinates.
    pub rect: Rect,
    /// What to draw.
    pub kind: DrawKind,
    /// Effective clip at the time of the call, if any.
    pub clip: Option<Rect>,
}

impl DrawItem {
    /// Returns the part of the item that is actually visible.
    #[must_use]
    pub fn visible_rect(&self) -> Rect {
        match self.clip {
            Some(clip) => self.rect.intersect(clip),
            None => self.rect,
        }
    }
}

/// A [`Painter`] that records draw calls in order.
///
/// Clips nest: each [`push_clip`](Painter::push_clip) intersects with the
/// enclosing clip. Calls whose rectangle lies entirely outside the current
/// clip are culled and never recorded, which is how fields inside a
/// collapsing foldout region disappear as the region shrinks.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    clips: Vec<Rect>,
    culled: usize,
}

impl DrawList {
    /// Creates an empty draw list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the list for reuse, keeping its allocations.
    pub fn clear(&mut self) {
        self.items.clear();
        self.clips.clear();
        self.culled = 0;
    }

    /// Recorded items in paint order.
    #[must_use]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    /// Number of recorded items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of calls dropped because they fell outside the clip.
    #[must_use]
    pub fn culled(&self) -> usize {
        self.culled
    }

    /// Current clip nesting depth.
    #[must_use]
    pub fn clip_depth(&self) -> usize {
        self.clips.len()
    }

    /// Iterates the recorded labels' text.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.items.iter().filter_map(|item| match &item.kind {
            DrawKind::Label(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Iterates the recorded controls.
    pub fn controls(&self) -> impl Iterator<Item = (&ControlItem, bool)> + '_ {
        self.items.iter().filter_map(|item| match &item.kind {
            DrawKind::Control { control, enabled } => Some((control, *enabled)),
            _ => None,
        })
    }

    /// Union of the visible rectangles of every item, or `None` when empty.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        self.items
            .iter()
            .map(DrawItem::visible_rect)
            .reduce(|a, b| a.union(b))
    }

    /// Compares this frame against `previous` item by item.
    ///
    /// Each item that differs contributes the visible rectangles of both
    /// versions; items present in only one frame contribute their own.
    #[must_use]
    pub fn damage_since(&self, previous: &Self) -> DamageRegion {
        let mut rects = Vec::new();
        let common = self.items.len().min(previous.items.len());
        for (now, before) in self.items[..common].iter().zip(&previous.items[..common]) {
            if now != before {
                rects.push(now.visible_rect());
                rects.push(before.visible_rect());
            }
        }
        rects.extend(self.items[common..].iter().map(DrawItem::visible_rect));
        rects.extend(previous.items[common..].iter().map(DrawItem::visible_rect));
        rects.retain(|r| r.width() > 0.0 && r.height() > 0.0);
        if rects.is_empty() {
            DamageRegion::None
        } else {
            DamageRegion::Rects(rects)
        }
    }

    fn record(&mut self, rect: Rect, kind: DrawKind) {
        let clip = self.clips.last().copied();
        if let Some(clip) = clip {
            let visible = rect.intersect(clip);
            if visible.width() <= 0.0 || visible.height() <= 0.0 {
                self.culled += 1;
                return;
            }
        }
        self.items.push(DrawItem { rect, kind, clip });
    }
}

impl Painter for DrawList {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.record(rect, DrawKind::Fill(color));
    }

    fn label(&mut self, rect: Rect, text: &str) {
        self.record(rect, DrawKind::Label(text.to_string()));
    }

    fn control(&mut self, rect: Rect, control: Control<'_>, enabled: bool) {
        self.record(
            rect,
            DrawKind::Control {
                control: control.into(),
                enabled,
            },
        );
    }

    fn push_clip(&mut self, rect: Rect) {
        let clip = match self.clips.last() {
            Some(outer) => outer.intersect(rect),
            None => rect,
        };
        self.clips.push(clip);
    }

    fn pop_clip(&mut self) {
        self.clips.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgba8(255, 0, 0, 255);

    fn row(y: f64) -> Rect {
        Rect::new(0.0, y, 200.0, y + 18.0)
    }

    #[test]
    fn records_in_paint_order() {
        let mut list = DrawList::new();
        list.fill_rect(row(0.0), RED);
        list.label(row(0.0), "Health");
        list.control(row(0.0), Control::IntField(3), false);

        assert_eq!(list.len(), 3);
        assert_eq!(list.items()[0].kind, DrawKind::Fill(RED));
        assert_eq!(list.labels().collect::<Vec<_>>(), ["Health"]);
        let controls: Vec<_> = list.controls().collect();
        assert_eq!(controls, [(&ControlItem::IntField(3), false)]);
    }

    #[test]
    fn nested_clips_intersect() {
        let mut list = DrawList::new();
        list.push_clip(Rect::new(0.0, 0.0, 200.0, 100.0));
        list.push_clip(Rect::new(0.0, 50.0, 200.0, 300.0));
        list.label(row(60.0), "inner");
        assert_eq!(list.clip_depth(), 2);
        assert_eq!(
            list.items()[0].clip,
            Some(Rect::new(0.0, 50.0, 200.0, 100.0))
        );

        list.pop_clip();
        list.label(row(10.0), "outer");
        assert_eq!(list.items()[1].clip, Some(Rect::new(0.0, 0.0, 200.0, 100.0)));
        list.pop_clip();
        assert_eq!(list.clip_depth(), 0);
    }

    #[test]
    fn items_outside_the_clip_are_culled() {
        let mut list = DrawList::new();
        list.push_clip(Rect::new(0.0, 0.0, 200.0, 12.0));
        list.label(row(0.0), "partly visible");
        list.label(row(20.0), "hidden");
        list.pop_clip();

        assert_eq!(list.labels().collect::<Vec<_>>(), ["partly visible"]);
        assert_eq!(list.culled(), 1);
        assert_eq!(
            list.items()[0].visible_rect(),
            Rect::new(0.0, 0.0, 200.0, 12.0)
        );
    }

    #[test]
    fn unbalanced_pop_is_ignored() {
        let mut list = DrawList::new();
        list.pop_clip();
        list.label(row(0.0), "still drawn");
        assert_eq!(list.len(), 1);
        assert_eq!(list.items()[0].clip, None);
    }

    #[test]
    fn bounds_cover_visible_items() {
        let mut list = DrawList::new();
        assert_eq!(list.bounds(), None);
        list.label(row(0.0), "a");
        list.label(row(40.0), "b");
        assert_eq!(list.bounds(), Some(Rect::new(0.0, 0.0, 200.0, 58.0)));
    }

    #[test]
    fn identical_frames_have_no_damage() {
        let mut a = DrawList::new();
        a.label(row(0.0), "Health");
        let b = a.clone();
        assert!(a.damage_since(&b).is_empty());
    }

    #[test]
    fn changed_and_removed_items_are_damaged() {
        let mut before = DrawList::new();
        before.control(row(0.0), Control::IntField(1), true);
        before.label(row(20.0), "gone");

        let mut now = DrawList::new();
        now.control(row(0.0), Control::IntField(2), true);

        match now.damage_since(&before) {
            DamageRegion::Rects(rects) => {
                assert_eq!(rects, [row(0.0), row(0.0), row(20.0)]);
            }
            other => panic!("expected rects, got {other:?}"),
        }
    }

    #[test]
    fn clear_resets_everything() {
        let mut list = DrawList::new();
        list.push_clip(Rect::new(0.0, 0.0, 1.0, 1.0));
        list.label(row(50.0), "culled");
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.culled(), 0);
        assert_eq!(list.clip_depth(), 0);
    }
}
