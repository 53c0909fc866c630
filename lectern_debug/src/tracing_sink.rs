// Copyright 2026 the Lectern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bridge from [`TraceSink`] into the [`tracing`] facade.
//!
//! Events are emitted under the `lectern` target with structured fields.
//! Dropped decorators are warnings; per-field measure and paint events and
//! fade steps are `trace`; everything else is `debug`.

use lectern_core::trace::{
    ChainBuiltEvent, ContextMenuEvent, DecoratorDroppedEvent, FieldMeasuredEvent,
    FieldPaintedEvent, GroupFadedEvent, GroupLinkedEvent, RedrawSummary, TraceSink,
    ValueChangedEvent,
};

/// A [`TraceSink`] that forwards every event to [`tracing`].
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl TracingSink {
    /// Creates the sink.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TraceSink for TracingSink {
    fn on_chain_built(&mut self, e: &ChainBuiltEvent) {
        tracing::debug!(
            target: "lectern",
            field = ?e.field,
            decorators = e.decorators,
            dropped = e.dropped,
            revision = e.revision,
            "chain built"
        );
    }

    fn on_decorator_dropped(&mut self, e: &DecoratorDroppedEvent<'_>) {
        tracing::warn!(
            target: "lectern",
            field = ?e.field,
            kind = %e.kind,
            error = %e.error,
            "decorator dropped from chain"
        );
    }

    fn on_field_measured(&mut self, e: &FieldMeasuredEvent) {
        tracing::trace!(
            target: "lectern",
            field = ?e.field,
            natural = e.natural,
            factor = e.factor,
            height = e.height,
            "field measured"
        );
    }

    fn on_field_painted(&mut self, e: &FieldPaintedEvent) {
        tracing::trace!(
            target: "lectern",
            field = ?e.field,
            y = e.rect.y0,
            consumed = e.consumed,
            skipped = e.skipped,
            "field painted"
        );
    }

    fn on_value_changed(&mut self, e: &ValueChangedEvent) {
        tracing::debug!(
            target: "lectern",
            field = ?e.field,
            source = ?e.source,
            "value changed"
        );
    }

    fn on_group_linked(&mut self, e: &GroupLinkedEvent<'_>) {
        tracing::debug!(
            target: "lectern",
            key = %e.key,
            role = ?e.role,
            link = ?e.link,
            "group linked"
        );
    }

    fn on_group_faded(&mut self, e: &GroupFadedEvent<'_>) {
        tracing::trace!(
            target: "lectern",
            key = %e.key,
            progress = e.progress,
            next_progress = e.next_progress,
            displayed_height = e.displayed_height,
            target_height = e.target_height,
            "group faded"
        );
    }

    fn on_context_menu(&mut self, e: &ContextMenuEvent) {
        tracing::debug!(
            target: "lectern",
            field = ?e.field,
            items = e.items,
            "context menu opened"
        );
    }

    fn on_redraw_summary(&mut self, s: &RedrawSummary) {
        tracing::debug!(
            target: "lectern",
            redraw = s.redraw_index,
            delta_secs = s.delta_secs,
            measured = s.measured,
            painted = s.painted,
            total_height = s.total_height,
            value_changes = s.value_changes,
            "redraw"
        );
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use lectern_core::attribute::AttributeKind;
    use lectern_core::config::InspectorConfig;
    use lectern_core::error::DecoratorError;
    use lectern_core::field::FieldDecl;
    use lectern_core::inspector::Inspector;
    use lectern_core::time::HostTime;
    use tracing::Level;

    use super::*;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn captured(max_level: Level, emit: impl FnOnce(&mut TracingSink)) -> String {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(max_level)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, || emit(&mut TracingSink::new()));
        let bytes = capture.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn dropped_decorators_are_warnings() {
        let field = Inspector::new(InspectorConfig::standard()).add_field(FieldDecl::marker("f"));
        let error = DecoratorError::UnknownKind(AttributeKind::new("tooltip"));
        let output = captured(Level::WARN, |sink| {
            sink.on_decorator_dropped(&DecoratorDroppedEvent {
                field,
                kind: AttributeKind::new("tooltip"),
                error: &error,
            });
        });
        assert!(output.contains("WARN"), "got: {output}");
        assert!(output.contains("decorator dropped from chain"), "got: {output}");
        assert!(output.contains("kind=tooltip"), "got: {output}");
    }

    #[test]
    fn summaries_are_debug_level() {
        let summary = RedrawSummary {
            redraw_index: 7,
            now: HostTime(0),
            delta_secs: 0.0,
            measured: 1,
            painted: 1,
            total_height: 20.0,
            value_changes: 0,
        };
        let hidden = captured(Level::INFO, |sink| sink.on_redraw_summary(&summary));
        assert!(hidden.is_empty(), "got: {hidden}");

        let shown = captured(Level::DEBUG, |sink| sink.on_redraw_summary(&summary));
        assert!(shown.contains("redraw=7"), "got: {shown}");
    }
}
