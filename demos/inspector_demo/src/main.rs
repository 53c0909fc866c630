// Copyright 2026 the Lectern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated host redraw loop that exercises the inspector and the
//! diagnostics pipeline.
//!
//! Builds a small character inspector (a header, a clamped read-only health
//! bar, a required weapon slot and a "Stats" foldout group), then runs 60
//! synthetic redraws at 60 Hz into a [`DrawList`]. Along the way it:
//!
//! - clicks the foldout header to collapse the group, and again to reopen it,
//! - opens the context menu on a field inside the group and resets it,
//! - reports an external (undo-style) value change.
//!
//! Trace events go to a [`PrettyPrintSink`](lectern_debug::pretty::PrettyPrintSink)
//! on stdout, to `tracing` (filtered by `RUST_LOG`), and to a
//! [`RecorderSink`](lectern_debug::recorder::RecorderSink) that is exported as
//! a Chrome trace at the end.

use std::fs::File;
use std::io::BufWriter;

use kurbo::Point;
use lectern_core::attribute::Attribute;
use lectern_core::config::InspectorConfig;
use lectern_core::field::{FieldDecl, FieldId};
use lectern_core::input::{InputEvent, InputFrame};
use lectern_core::inspector::{Inspector, RedrawReport};
use lectern_core::model::{MemoryModel, ValueModel};
use lectern_core::time::{HostTime, Timebase};
use lectern_core::trace::{
    ChainBuiltEvent, ContextMenuEvent, DecoratorDroppedEvent, FieldMeasuredEvent,
    FieldPaintedEvent, GroupFadedEvent, GroupLinkedEvent, RedrawSummary, TraceSink, Tracer,
    ValueChangedEvent,
};
use lectern_core::value::{Value, ValueKind};
use lectern_debug::pretty::PrettyPrintSink;
use lectern_debug::recorder::RecorderSink;
use lectern_debug::tracing_sink::TracingSink;
use lectern_render::{DamageRegion, DrawList};
use tracing_subscriber::EnvFilter;

const REDRAW_COUNT: u64 = 60;
/// 16.6ms refresh interval in nanoseconds (≈60 Hz).
const REFRESH_INTERVAL_NS: u64 = 16_666_667;
const WIDTH: f64 = 320.0;

const COLLAPSE_AT: u64 = 10;
const MENU_AT: u64 = 20;
const UNDO_AT: u64 = 30;
const EXPAND_AT: u64 = 40;

/// Forwards every event to all diagnostics sinks.
#[derive(Debug)]
struct Sinks {
    pretty: PrettyPrintSink,
    recorder: RecorderSink,
    tracing: TracingSink,
}

impl TraceSink for Sinks {
    fn on_chain_built(&mut self, e: &ChainBuiltEvent) {
        self.pretty.on_chain_built(e);
        self.recorder.on_chain_built(e);
        self.tracing.on_chain_built(e);
    }

    fn on_decorator_dropped(&mut self, e: &DecoratorDroppedEvent<'_>) {
        self.pretty.on_decorator_dropped(e);
        self.recorder.on_decorator_dropped(e);
        self.tracing.on_decorator_dropped(e);
    }

    fn on_field_measured(&mut self, e: &FieldMeasuredEvent) {
        self.pretty.on_field_measured(e);
        self.recorder.on_field_measured(e);
        self.tracing.on_field_measured(e);
    }

    fn on_field_painted(&mut self, e: &FieldPaintedEvent) {
        self.pretty.on_field_painted(e);
        self.recorder.on_field_painted(e);
        self.tracing.on_field_painted(e);
    }

    fn on_value_changed(&mut self, e: &ValueChangedEvent) {
        self.pretty.on_value_changed(e);
        self.recorder.on_value_changed(e);
        self.tracing.on_value_changed(e);
    }

    fn on_group_linked(&mut self, e: &GroupLinkedEvent<'_>) {
        self.pretty.on_group_linked(e);
        self.recorder.on_group_linked(e);
        self.tracing.on_group_linked(e);
    }

    fn on_group_faded(&mut self, e: &GroupFadedEvent<'_>) {
        self.pretty.on_group_faded(e);
        self.recorder.on_group_faded(e);
        self.tracing.on_group_faded(e);
    }

    fn on_context_menu(&mut self, e: &ContextMenuEvent) {
        self.pretty.on_context_menu(e);
        self.recorder.on_context_menu(e);
        self.tracing.on_context_menu(e);
    }

    fn on_redraw_summary(&mut self, s: &RedrawSummary) {
        self.pretty.on_redraw_summary(s);
        self.recorder.on_redraw_summary(s);
        self.tracing.on_redraw_summary(s);
    }
}

/// Handles to the fields the loop pokes at.
struct Character {
    stats: FieldId,
    mana: FieldId,
    stamina: FieldId,
}

fn build(inspector: &mut Inspector, model: &mut MemoryModel) -> Character {
    let name = inspector.add_field(
        FieldDecl::new("name", ValueKind::Text).with_attribute(Attribute::header("Character")),
    );
    model.insert(name, Value::Text("Warden".into()));

    let health = inspector.add_field(
        FieldDecl::new("health", ValueKind::Int)
            .with_attribute(Attribute::range(0.0, 100.0).with_priority(1))
            .with_attribute(Attribute::readonly().with_priority(2)),
    );
    model.insert(health, Value::Int(150));

    let weapon = inspector.add_field(
        FieldDecl::new("weapon", ValueKind::Object)
            .with_attribute(Attribute::required("Assign a weapon")),
    );
    model.insert(weapon, Value::Object(None));

    let stats = inspector.add_field(
        FieldDecl::marker("stats").with_attribute(Attribute::begin_group("stats", "Stats")),
    );
    let mana = inspector.add_field(
        FieldDecl::new("mana", ValueKind::Int).with_attribute(Attribute::range(0.0, 50.0)),
    );
    model.insert(mana, Value::Int(40));
    let stamina = inspector.add_field(
        FieldDecl::new("stamina", ValueKind::Float).with_attribute(Attribute::space(4.0)),
    );
    model.insert(stamina, Value::Float(7.5));
    inspector.add_field(FieldDecl::marker("stats_end").with_attribute(Attribute::end_group("stats")));

    let alive = inspector.add_field(FieldDecl::new("alive", ValueKind::Bool));
    model.insert(alive, Value::Bool(true));

    Character {
        stats,
        mana,
        stamina,
    }
}

/// Top edge of `field` in the last redraw's layout.
fn row_top(report: &RedrawReport, field: FieldId) -> f64 {
    report
        .rows
        .iter()
        .take_while(|(id, _)| *id != field)
        .map(|(_, height)| height)
        .sum()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,lectern=info")),
        )
        .init();

    let timebase = Timebase::NANOS;

    // -- sinks -------------------------------------------------------------
    let mut sinks = Sinks {
        pretty: PrettyPrintSink::new(Box::new(std::io::stdout()), timebase),
        recorder: RecorderSink::new(),
        tracing: TracingSink::new(),
    };

    // -- inspector ---------------------------------------------------------
    let mut inspector = Inspector::new(InspectorConfig::standard());
    let mut model = MemoryModel::new();
    let character = build(&mut inspector, &mut model);

    let mut list = DrawList::new();
    let mut previous = DrawList::new();
    let mut last_report: Option<RedrawReport> = None;

    // -- simulated loop ----------------------------------------------------
    let mut now_ticks: u64 = 1_000_000_000; // start at 1s

    for redraw in 0..REDRAW_COUNT {
        let mut input = InputFrame::new();
        if let Some(report) = &last_report {
            match redraw {
                COLLAPSE_AT | EXPAND_AT => input.push(InputEvent::Click {
                    pos: Point::new(10.0, row_top(report, character.stats) + 5.0),
                }),
                MENU_AT => input.push(InputEvent::ContextClick {
                    pos: Point::new(10.0, row_top(report, character.mana) + 5.0),
                }),
                _ => {}
            }
        }
        if redraw == UNDO_AT {
            model.set_value(character.stamina, Value::Float(2.0));
            inspector.notify_external_change(character.stamina, &mut Tracer::new(&mut sinks));
        }

        list.clear();
        let report = inspector
            .redraw(
                Point::ZERO,
                WIDTH,
                HostTime(now_ticks),
                &mut model,
                &mut list,
                &mut input,
                &mut Tracer::new(&mut sinks),
            )
            .expect("built-in decorators do not fail");

        if let Some(mut menu) = inspector.take_context_menu() {
            let labels: Vec<&str> = menu.labels().collect();
            tracing::info!(?labels, "context menu");
            let reset_index = menu.labels().position(|l| l == "Reset to minimum");
            if let Some(index) = reset_index {
                let changed = inspector
                    .activate_menu_item(&mut menu, index, &mut model, &mut Tracer::new(&mut sinks))
                    .expect("menu index comes from the menu itself");
                tracing::info!(changed, mana = ?model.value(character.mana), "reset mana");
            }
        }

        match list.damage_since(&previous) {
            DamageRegion::None => {}
            damage => tracing::info!(
                redraw,
                items = list.len(),
                culled = list.culled(),
                bounds = ?damage.bounds(),
                "damaged"
            ),
        }

        std::mem::swap(&mut list, &mut previous);
        last_report = Some(report);

        // Advance time.
        now_ticks += REFRESH_INTERVAL_NS;
    }

    // -- export Chrome trace -----------------------------------------------
    let path = "trace.json";
    let file = File::create(path).expect("failed to create trace.json");
    let mut writer = BufWriter::new(file);
    lectern_debug::chrome::export(sinks.recorder.as_bytes(), timebase, &mut writer)
        .expect("failed to write Chrome trace");

    println!("Wrote {path} ({REDRAW_COUNT} redraws)");
}
