// Copyright 2026 the Lectern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Redraw
//! timestamps are converted to microseconds using a [`Timebase`].

use std::io::Write;

use lectern_core::time::{HostTime, Timebase};
use lectern_core::trace::{
    ChainBuiltEvent, ContextMenuEvent, DecoratorDroppedEvent, FieldMeasuredEvent,
    FieldPaintedEvent, GroupFadedEvent, GroupLinkedEvent, RedrawSummary, TraceSink,
    ValueChangedEvent,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    timebase: Timebase,
    verbose: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("timebase", &self.timebase)
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr(timebase: Timebase) -> Self {
        Self::with_writer(Box::new(std::io::stderr()), timebase)
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>, timebase: Timebase) -> Self {
        Self::with_writer(writer, timebase)
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    ///
    /// Per-field measure and paint events are suppressed until
    /// [`verbose`](Self::verbose) is enabled; they fire for every field on
    /// every redraw.
    #[must_use]
    pub fn with_writer(writer: W, timebase: Timebase) -> Self {
        Self {
            writer,
            timebase,
            verbose: false,
        }
    }

    /// Also print per-field measure and paint lines.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn host_us(&self, t: HostTime) -> f64 {
        self.timebase.ticks_to_nanos(t.ticks()) as f64 / 1000.0
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_chain_built(&mut self, e: &ChainBuiltEvent) {
        let _ = writeln!(
            self.writer,
            "[chain] field={:?} decorators={} dropped={} revision={}",
            e.field, e.decorators, e.dropped, e.revision,
        );
    }

    fn on_decorator_dropped(&mut self, e: &DecoratorDroppedEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "[dropped] field={:?} kind={} error=\"{}\"",
            e.field, e.kind, e.error,
        );
    }

    fn on_field_measured(&mut self, e: &FieldMeasuredEvent) {
        if !self.verbose {
            return;
        }
        let _ = writeln!(
            self.writer,
            "[measure] field={:?} natural={:.1} factor={:.3} height={:.1}",
            e.field, e.natural, e.factor, e.height,
        );
    }

    fn on_field_painted(&mut self, e: &FieldPaintedEvent) {
        if !self.verbose {
            return;
        }
        let state = if e.skipped { "skipped" } else { "drawn" };
        let _ = writeln!(
            self.writer,
            "[paint] field={:?} y={:.1} consumed={:.1} {state}",
            e.field, e.rect.y0, e.consumed,
        );
    }

    fn on_value_changed(&mut self, e: &ValueChangedEvent) {
        let _ = writeln!(
            self.writer,
            "[value] field={:?} source={:?}",
            e.field, e.source,
        );
    }

    fn on_group_linked(&mut self, e: &GroupLinkedEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "[group:link] key={} role={:?} link={:?}",
            e.key, e.role, e.link,
        );
    }

    fn on_group_faded(&mut self, e: &GroupFadedEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "[group:fade] key={} progress={:.3}->{:.3} height={:.1}/{:.1}",
            e.key, e.progress, e.next_progress, e.displayed_height, e.target_height,
        );
    }

    fn on_context_menu(&mut self, e: &ContextMenuEvent) {
        let _ = writeln!(
            self.writer,
            "[menu] field={:?} items={}",
            e.field, e.items,
        );
    }

    fn on_redraw_summary(&mut self, s: &RedrawSummary) {
        let _ = writeln!(
            self.writer,
            "[summary] redraw={} now={:.1}µs dt={:.4}s measured={} painted={} \
             height={:.1} changes={}",
            s.redraw_index,
            self.host_us(s.now),
            s.delta_secs,
            s.measured,
            s.painted,
            s.total_height,
            s.value_changes,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lectern_core::attribute::GroupKey;
    use lectern_core::config::InspectorConfig;
    use lectern_core::error::GroupRole;
    use lectern_core::field::FieldDecl;
    use lectern_core::foldout::Link;
    use lectern_core::inspector::Inspector;

    fn summary() -> RedrawSummary {
        RedrawSummary {
            redraw_index: 3,
            now: HostTime(2_000_000),
            delta_secs: 0.016,
            measured: 4,
            painted: 2,
            total_height: 80.0,
            value_changes: 1,
        }
    }

    #[test]
    fn pretty_print_summary() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new(), Timebase::NANOS);
        sink.on_redraw_summary(&summary());
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert!(output.starts_with("[summary]"), "got: {output}");
        assert!(output.contains("redraw=3"), "got: {output}");
        assert!(output.contains("now=2000.0µs"), "got: {output}");
    }

    #[test]
    fn group_lines_name_the_key() {
        let key = GroupKey::new("stats");
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new(), Timebase::NANOS);
        sink.on_group_linked(&GroupLinkedEvent {
            key: &key,
            role: GroupRole::Begin,
            link: Link::Pending,
        });
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert!(output.contains("key=stats role=Begin link=Pending"), "got: {output}");
    }

    #[test]
    fn per_field_lines_need_verbose() {
        let field = Inspector::new(InspectorConfig::standard()).add_field(FieldDecl::marker("f"));
        let measured = FieldMeasuredEvent {
            field,
            natural: 20.0,
            factor: 1.0,
            height: 20.0,
        };

        let mut quiet = PrettyPrintSink::with_writer(Vec::<u8>::new(), Timebase::NANOS);
        quiet.on_field_measured(&measured);
        assert!(quiet.into_inner().is_empty());

        let mut loud = PrettyPrintSink::with_writer(Vec::<u8>::new(), Timebase::NANOS).verbose(true);
        loud.on_field_measured(&measured);
        let output = String::from_utf8(loud.into_inner()).unwrap();
        assert!(output.contains("[measure]"), "got: {output}");
        assert!(output.contains("height=20.0"), "got: {output}");
    }
}
