// Copyright 2026 the Lectern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as little-endian records. Strings (group keys, attribute kinds,
//! error messages) are stored length-prefixed. [`decode`] reads them back as
//! an iterator of owned [`RecordedEvent`]s.

use kurbo::Rect;
use lectern_core::error::GroupRole;
use lectern_core::field::FieldId;
use lectern_core::foldout::Link;
use lectern_core::time::HostTime;
use lectern_core::trace::{
    ChainBuiltEvent, ChangeSource, ContextMenuEvent, DecoratorDroppedEvent, FieldMeasuredEvent,
    FieldPaintedEvent, GroupFadedEvent, GroupLinkedEvent, RedrawSummary, TraceSink,
    ValueChangedEvent,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_CHAIN_BUILT: u8 = 1;
const TAG_DECORATOR_DROPPED: u8 = 2;
const TAG_FIELD_MEASURED: u8 = 3;
const TAG_FIELD_PAINTED: u8 = 4;
const TAG_VALUE_CHANGED: u8 = 5;
const TAG_GROUP_LINKED: u8 = 6;
const TAG_GROUP_FADED: u8 = 7;
const TAG_CONTEXT_MENU: u8 = 8;
const TAG_REDRAW_SUMMARY: u8 = 9;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "counts capped at u32::MAX for recording"
    )]
    fn write_count(&mut self, n: usize) {
        self.write_u32(n.min(u32::MAX as usize) as u32);
    }

    fn write_str(&mut self, s: &str) {
        self.write_count(s.len());
        self.buf.extend_from_slice(s.as_bytes());
    }

    fn write_field(&mut self, field: FieldId) {
        self.write_u32(field.index());
        self.write_u32(field.generation());
    }

    fn write_rect(&mut self, rect: Rect) {
        self.write_f64(rect.x0);
        self.write_f64(rect.y0);
        self.write_f64(rect.x1);
        self.write_f64(rect.y1);
    }

    fn write_source(&mut self, source: ChangeSource) {
        self.write_u8(match source {
            ChangeSource::Control => 0,
            ChangeSource::Menu => 1,
            ChangeSource::External => 2,
        });
    }

    fn write_role(&mut self, role: GroupRole) {
        self.write_u8(match role {
            GroupRole::Begin => 0,
            GroupRole::End => 1,
        });
    }

    fn write_link(&mut self, link: Link) {
        self.write_u8(match link {
            Link::Matched => 0,
            Link::Reconnected => 1,
            Link::Pending => 2,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_chain_built(&mut self, e: &ChainBuiltEvent) {
        self.write_u8(TAG_CHAIN_BUILT);
        self.write_field(e.field);
        self.write_count(e.decorators);
        self.write_count(e.dropped);
        self.write_u64(e.revision);
    }

    fn on_decorator_dropped(&mut self, e: &DecoratorDroppedEvent<'_>) {
        self.write_u8(TAG_DECORATOR_DROPPED);
        self.write_field(e.field);
        self.write_str(e.kind.name());
        self.write_str(&e.error.to_string());
    }

    fn on_field_measured(&mut self, e: &FieldMeasuredEvent) {
        self.write_u8(TAG_FIELD_MEASURED);
        self.write_field(e.field);
        self.write_f64(e.natural);
        self.write_f64(e.factor);
        self.write_f64(e.height);
    }

    fn on_field_painted(&mut self, e: &FieldPaintedEvent) {
        self.write_u8(TAG_FIELD_PAINTED);
        self.write_field(e.field);
        self.write_rect(e.rect);
        self.write_f64(e.consumed);
        self.write_u8(u8::from(e.skipped));
    }

    fn on_value_changed(&mut self, e: &ValueChangedEvent) {
        self.write_u8(TAG_VALUE_CHANGED);
        self.write_field(e.field);
        self.write_source(e.source);
    }

    fn on_group_linked(&mut self, e: &GroupLinkedEvent<'_>) {
        self.write_u8(TAG_GROUP_LINKED);
        self.write_str(e.key.as_str());
        self.write_role(e.role);
        self.write_link(e.link);
    }

    fn on_group_faded(&mut self, e: &GroupFadedEvent<'_>) {
        self.write_u8(TAG_GROUP_FADED);
        self.write_str(e.key.as_str());
        self.write_f64(e.progress);
        self.write_f64(e.next_progress);
        self.write_f64(e.target_height);
        self.write_f64(e.displayed_height);
    }

    fn on_context_menu(&mut self, e: &ContextMenuEvent) {
        self.write_u8(TAG_CONTEXT_MENU);
        self.write_field(e.field);
        self.write_count(e.items);
    }

    fn on_redraw_summary(&mut self, s: &RedrawSummary) {
        self.write_u8(TAG_REDRAW_SUMMARY);
        self.write_u64(s.redraw_index);
        self.write_u64(s.now.ticks());
        self.write_f64(s.delta_secs);
        self.write_count(s.measured);
        self.write_count(s.painted);
        self.write_f64(s.total_height);
        self.write_count(s.value_changes);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A field handle as recorded: slot index and generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RecordedField {
    /// Slot index.
    pub index: u32,
    /// Generation counter.
    pub generation: u32,
}

impl From<FieldId> for RecordedField {
    fn from(field: FieldId) -> Self {
        Self {
            index: field.index(),
            generation: field.generation(),
        }
    }
}

/// A decoded event from a binary recording.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A [`ChainBuiltEvent`].
    ChainBuilt {
        /// The field.
        field: RecordedField,
        /// Decorators in the chain.
        decorators: u32,
        /// Attributes whose decorator was dropped.
        dropped: u32,
        /// Registry revision.
        revision: u64,
    },
    /// A [`DecoratorDroppedEvent`].
    DecoratorDropped {
        /// The field.
        field: RecordedField,
        /// Attribute kind name.
        kind: String,
        /// Rendered error message.
        error: String,
    },
    /// A [`FieldMeasuredEvent`].
    FieldMeasured {
        /// The field.
        field: RecordedField,
        /// Height the chain consumed.
        natural: f64,
        /// Enclosing visibility factor.
        factor: f64,
        /// Reported height.
        height: f64,
    },
    /// A [`FieldPaintedEvent`].
    FieldPainted {
        /// The field.
        field: RecordedField,
        /// Host-supplied rectangle.
        rect: Rect,
        /// Consumed height.
        consumed: f64,
        /// Whether the field was skipped.
        skipped: bool,
    },
    /// A [`ValueChangedEvent`].
    ValueChanged {
        /// The field.
        field: RecordedField,
        /// What caused the change.
        source: ChangeSource,
    },
    /// A [`GroupLinkedEvent`].
    GroupLinked {
        /// Group key.
        key: String,
        /// Which side registered.
        role: GroupRole,
        /// How it linked.
        link: Link,
    },
    /// A [`GroupFadedEvent`].
    GroupFaded {
        /// Group key.
        key: String,
        /// Progress used for layout.
        progress: f64,
        /// Progress after advancing.
        next_progress: f64,
        /// Natural region height.
        target_height: f64,
        /// Displayed region height.
        displayed_height: f64,
    },
    /// A [`ContextMenuEvent`].
    ContextMenu {
        /// The field.
        field: RecordedField,
        /// Number of entries.
        items: u32,
    },
    /// A [`RedrawSummary`].
    RedrawSummary {
        /// Redraw counter.
        redraw_index: u64,
        /// Host time of the redraw.
        now: HostTime,
        /// Seconds since the previous redraw.
        delta_secs: f64,
        /// Fields measured.
        measured: u32,
        /// Fields painted.
        painted: u32,
        /// Sum of reported heights.
        total_height: f64,
        /// Values committed.
        value_changes: u32,
    },
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
///
/// Iteration stops at the first unknown tag or truncated record.
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take(&mut self, n: usize) -> Option<&[u8]> {
        let end = self.pos.checked_add(n)?;
        let bytes = self.data.get(self.pos..end)?;
        self.pos = end;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take(1).map(|b| b[0])
    }

    fn read_u32(&mut self) -> Option<u32> {
        Some(u32::from_le_bytes(self.take(4)?.try_into().ok()?))
    }

    fn read_u64(&mut self) -> Option<u64> {
        Some(u64::from_le_bytes(self.take(8)?.try_into().ok()?))
    }

    fn read_f64(&mut self) -> Option<f64> {
        self.read_u64().map(f64::from_bits)
    }

    fn read_str(&mut self) -> Option<String> {
        let len = usize::try_from(self.read_u32()?).ok()?;
        String::from_utf8(self.take(len)?.to_vec()).ok()
    }

    fn read_field(&mut self) -> Option<RecordedField> {
        Some(RecordedField {
            index: self.read_u32()?,
            generation: self.read_u32()?,
        })
    }

    fn read_rect(&mut self) -> Option<Rect> {
        Some(Rect::new(
            self.read_f64()?,
            self.read_f64()?,
            self.read_f64()?,
            self.read_f64()?,
        ))
    }

    fn read_source(&mut self) -> Option<ChangeSource> {
        Some(match self.read_u8()? {
            0 => ChangeSource::Control,
            1 => ChangeSource::Menu,
            _ => ChangeSource::External,
        })
    }

    fn read_role(&mut self) -> Option<GroupRole> {
        Some(match self.read_u8()? {
            0 => GroupRole::Begin,
            _ => GroupRole::End,
        })
    }

    fn read_link(&mut self) -> Option<Link> {
        Some(match self.read_u8()? {
            0 => Link::Matched,
            1 => Link::Reconnected,
            _ => Link::Pending,
        })
    }

    fn decode_chain_built(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::ChainBuilt {
            field: self.read_field()?,
            decorators: self.read_u32()?,
            dropped: self.read_u32()?,
            revision: self.read_u64()?,
        })
    }

    fn decode_decorator_dropped(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::DecoratorDropped {
            field: self.read_field()?,
            kind: self.read_str()?,
            error: self.read_str()?,
        })
    }

    fn decode_field_measured(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::FieldMeasured {
            field: self.read_field()?,
            natural: self.read_f64()?,
            factor: self.read_f64()?,
            height: self.read_f64()?,
        })
    }

    fn decode_field_painted(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::FieldPainted {
            field: self.read_field()?,
            rect: self.read_rect()?,
            consumed: self.read_f64()?,
            skipped: self.read_u8()? != 0,
        })
    }

    fn decode_value_changed(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::ValueChanged {
            field: self.read_field()?,
            source: self.read_source()?,
        })
    }

    fn decode_group_linked(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::GroupLinked {
            key: self.read_str()?,
            role: self.read_role()?,
            link: self.read_link()?,
        })
    }

    fn decode_group_faded(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::GroupFaded {
            key: self.read_str()?,
            progress: self.read_f64()?,
            next_progress: self.read_f64()?,
            target_height: self.read_f64()?,
            displayed_height: self.read_f64()?,
        })
    }

    fn decode_context_menu(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::ContextMenu {
            field: self.read_field()?,
            items: self.read_u32()?,
        })
    }

    fn decode_redraw_summary(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::RedrawSummary {
            redraw_index: self.read_u64()?,
            now: HostTime(self.read_u64()?),
            delta_secs: self.read_f64()?,
            measured: self.read_u32()?,
            painted: self.read_u32()?,
            total_height: self.read_f64()?,
            value_changes: self.read_u32()?,
        })
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_CHAIN_BUILT => self.decode_chain_built(),
            TAG_DECORATOR_DROPPED => self.decode_decorator_dropped(),
            TAG_FIELD_MEASURED => self.decode_field_measured(),
            TAG_FIELD_PAINTED => self.decode_field_painted(),
            TAG_VALUE_CHANGED => self.decode_value_changed(),
            TAG_GROUP_LINKED => self.decode_group_linked(),
            TAG_GROUP_FADED => self.decode_group_faded(),
            TAG_CONTEXT_MENU => self.decode_context_menu(),
            TAG_REDRAW_SUMMARY => self.decode_redraw_summary(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use lectern_core::attribute::{Attribute, AttributeKind, GroupKey};
    use lectern_core::config::InspectorConfig;
    use lectern_core::error::DecoratorError;
    use lectern_core::field::FieldDecl;
    use lectern_core::input::InputFrame;
    use lectern_core::inspector::Inspector;
    use lectern_core::model::MemoryModel;
    use lectern_core::paint::NullPainter;
    use lectern_core::trace::Tracer;
    use lectern_core::value::{Value, ValueKind};

    fn some_field() -> FieldId {
        Inspector::new(InspectorConfig::standard()).add_field(FieldDecl::marker("f"))
    }

    #[test]
    fn decorator_dropped_keeps_its_strings() {
        let field = some_field();
        let error = DecoratorError::Failed("bad range".into());
        let mut rec = RecorderSink::new();
        rec.on_decorator_dropped(&DecoratorDroppedEvent {
            field,
            kind: AttributeKind::new("range"),
            error: &error,
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(
            events,
            [RecordedEvent::DecoratorDropped {
                field: field.into(),
                kind: "range".into(),
                error: "bad range".into(),
            }]
        );
    }

    #[test]
    fn group_events_keep_key_and_progress() {
        let key = GroupKey::new("stats");
        let mut rec = RecorderSink::new();
        rec.on_group_linked(&GroupLinkedEvent {
            key: &key,
            role: GroupRole::End,
            link: Link::Reconnected,
        });
        rec.on_group_faded(&GroupFadedEvent {
            key: &key,
            progress: 0.4,
            next_progress: 0.5,
            target_height: 60.0,
            displayed_height: 24.0,
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0],
            RecordedEvent::GroupLinked {
                key: "stats".into(),
                role: GroupRole::End,
                link: Link::Reconnected,
            }
        );
        match &events[1] {
            RecordedEvent::GroupFaded {
                key,
                progress,
                displayed_height,
                ..
            } => {
                assert_eq!(key, "stats");
                assert_eq!(*progress, 0.4);
                assert_eq!(*displayed_height, 24.0);
            }
            other => panic!("expected GroupFaded, got {other:?}"),
        }
    }

    #[test]
    fn recorded_redraw_decodes_in_emission_order() {
        let mut inspector = Inspector::new(InspectorConfig::standard());
        let hp = inspector.add_field(
            FieldDecl::new("hp", ValueKind::Int).with_attribute(Attribute::range(0.0, 100.0)),
        );
        let mut model = MemoryModel::new();
        model.insert(hp, Value::Int(150));

        let mut rec = RecorderSink::new();
        inspector
            .redraw(
                Point::ZERO,
                320.0,
                HostTime(1_000),
                &mut model,
                &mut NullPainter,
                &mut InputFrame::new(),
                &mut Tracer::new(&mut rec),
            )
            .unwrap();

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert!(
            matches!(events[0], RecordedEvent::ChainBuilt { decorators: 1, dropped: 0, .. }),
            "got {events:?}"
        );
        assert!(events.iter().any(|e| matches!(
            e,
            RecordedEvent::FieldPainted { field, skipped: false, .. } if *field == RecordedField::from(hp)
        )));
        match events.last() {
            Some(RecordedEvent::RedrawSummary {
                redraw_index,
                now,
                measured,
                painted,
                ..
            }) => {
                assert_eq!(*redraw_index, 1);
                assert_eq!(*now, HostTime(1_000));
                assert_eq!((*measured, *painted), (1, 1));
            }
            other => panic!("expected RedrawSummary, got {other:?}"),
        }
    }

    #[test]
    fn truncated_record_stops_decoding() {
        let mut rec = RecorderSink::new();
        rec.on_context_menu(&ContextMenuEvent {
            field: some_field(),
            items: 2,
        });
        rec.on_value_changed(&ValueChangedEvent {
            field: some_field(),
            source: ChangeSource::Menu,
        });
        let bytes = rec.into_bytes();

        let events: Vec<_> = decode(&bytes[..bytes.len() - 1]).collect();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], RecordedEvent::ContextMenu { items: 2, .. }));
    }

    #[test]
    fn empty_buffer_decodes_to_nothing() {
        let events: Vec<_> = decode(&[]).collect();
        assert!(events.is_empty());
    }
}
