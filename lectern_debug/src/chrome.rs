// Copyright 2026 the Lectern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][spec] JSON to the given writer.
//!
//! Only [`RedrawSummary`](lectern_core::trace::RedrawSummary) carries a host
//! timestamp. Every other event is stamped with the time of the redraw that
//! emitted it, which is the next summary in the recording. Per-field events
//! use the field's slot index as their thread id so each field gets its own
//! track; fade progress and total height are exported as counters.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use lectern_core::time::Timebase;

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
///
/// Timestamps are converted to microseconds using the provided [`Timebase`].
pub fn export(bytes: &[u8], timebase: Timebase, writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();
    let mut pending: Vec<Value> = Vec::new();
    let mut last_ts = 0.0;

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::ChainBuilt {
                field,
                decorators,
                dropped,
                revision,
            } => {
                pending.push(json!({
                    "ph": "i",
                    "name": "ChainBuilt",
                    "cat": "Chain",
                    "pid": 0,
                    "tid": field.index,
                    "s": "t",
                    "args": {
                        "generation": field.generation,
                        "decorators": decorators,
                        "dropped": dropped,
                        "revision": revision,
                    }
                }));
            }
            RecordedEvent::DecoratorDropped { field, kind, error } => {
                pending.push(json!({
                    "ph": "i",
                    "name": "DecoratorDropped",
                    "cat": "Chain",
                    "pid": 0,
                    "tid": field.index,
                    "s": "t",
                    "args": {
                        "kind": kind,
                        "error": error,
                    }
                }));
            }
            RecordedEvent::FieldMeasured {
                field,
                natural,
                factor,
                height,
            } => {
                pending.push(json!({
                    "ph": "i",
                    "name": "Measure",
                    "cat": "Field",
                    "pid": 0,
                    "tid": field.index,
                    "s": "t",
                    "args": {
                        "natural": natural,
                        "factor": factor,
                        "height": height,
                    }
                }));
            }
            RecordedEvent::FieldPainted {
                field,
                rect,
                consumed,
                skipped,
            } => {
                pending.push(json!({
                    "ph": "i",
                    "name": "Paint",
                    "cat": "Field",
                    "pid": 0,
                    "tid": field.index,
                    "s": "t",
                    "args": {
                        "rect": [rect.x0, rect.y0, rect.x1, rect.y1],
                        "consumed": consumed,
                        "skipped": skipped,
                    }
                }));
            }
            RecordedEvent::ValueChanged { field, source } => {
                pending.push(json!({
                    "ph": "i",
                    "name": "ValueChanged",
                    "cat": "Field",
                    "pid": 0,
                    "tid": field.index,
                    "s": "t",
                    "args": {
                        "source": format!("{source:?}"),
                    }
                }));
            }
            RecordedEvent::GroupLinked { key, role, link } => {
                pending.push(json!({
                    "ph": "i",
                    "name": "GroupLinked",
                    "cat": "Foldout",
                    "pid": 0,
                    "tid": 0,
                    "s": "p",
                    "args": {
                        "key": key,
                        "role": format!("{role:?}"),
                        "link": format!("{link:?}"),
                    }
                }));
            }
            RecordedEvent::GroupFaded {
                key,
                progress,
                displayed_height,
                ..
            } => {
                pending.push(json!({
                    "ph": "C",
                    "name": format!("fade:{key}"),
                    "cat": "Foldout",
                    "pid": 0,
                    "args": {
                        "progress": progress,
                        "height": displayed_height,
                    }
                }));
            }
            RecordedEvent::ContextMenu { field, items } => {
                pending.push(json!({
                    "ph": "i",
                    "name": "ContextMenu",
                    "cat": "Field",
                    "pid": 0,
                    "tid": field.index,
                    "s": "t",
                    "args": {
                        "items": items,
                    }
                }));
            }
            RecordedEvent::RedrawSummary {
                redraw_index,
                now,
                delta_secs,
                measured,
                painted,
                total_height,
                value_changes,
            } => {
                let ts = ticks_to_us(now.ticks(), timebase);
                last_ts = ts;
                flush(&mut pending, &mut events, ts);
                events.push(json!({
                    "ph": "i",
                    "name": "Redraw",
                    "cat": "Redraw",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "redraw_index": redraw_index,
                        "delta_ms": delta_secs * 1000.0,
                        "measured": measured,
                        "painted": painted,
                        "value_changes": value_changes,
                    }
                }));
                events.push(json!({
                    "ph": "C",
                    "name": "TotalHeight",
                    "cat": "Redraw",
                    "ts": ts,
                    "pid": 0,
                    "args": { "height": total_height }
                }));
            }
        }
    }
    flush(&mut pending, &mut events, last_ts);

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn flush(pending: &mut Vec<Value>, events: &mut Vec<Value>, ts: f64) {
    for mut event in pending.drain(..) {
        event["ts"] = json!(ts);
        events.push(event);
    }
}

fn ticks_to_us(ticks: u64, timebase: Timebase) -> f64 {
    timebase.ticks_to_nanos(ticks) as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use lectern_core::attribute::GroupKey;
    use lectern_core::time::HostTime;
    use lectern_core::trace::{GroupFadedEvent, RedrawSummary, TraceSink};

    fn summary(redraw_index: u64, now: u64) -> RedrawSummary {
        RedrawSummary {
            redraw_index,
            now: HostTime(now),
            delta_secs: 0.0,
            measured: 0,
            painted: 0,
            total_height: 0.0,
            value_changes: 0,
        }
    }

    #[test]
    fn events_take_the_time_of_their_redraw() {
        let key = GroupKey::new("stats");
        let mut rec = RecorderSink::new();
        rec.on_group_faded(&GroupFadedEvent {
            key: &key,
            progress: 0.5,
            next_progress: 0.6,
            target_height: 40.0,
            displayed_height: 20.0,
        });
        rec.on_redraw_summary(&summary(1, 1_000_000));
        rec.on_redraw_summary(&summary(2, 2_000_000));

        let mut out = Vec::new();
        export(rec.as_bytes(), Timebase::NANOS, &mut out).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&String::from_utf8(out).unwrap()).unwrap();
        assert_eq!(parsed.len(), 5);

        assert_eq!(parsed[0]["ph"], "C");
        assert_eq!(parsed[0]["name"], "fade:stats");
        assert_eq!(parsed[0]["ts"], 1000.0);
        assert_eq!(parsed[0]["args"]["progress"], 0.5);

        assert_eq!(parsed[1]["name"], "Redraw");
        assert_eq!(parsed[1]["args"]["redraw_index"], 1);
        assert_eq!(parsed[2]["name"], "TotalHeight");
        assert_eq!(parsed[3]["ts"], 2000.0);
    }

    #[test]
    fn trailing_events_keep_the_last_time() {
        let key = GroupKey::new("stats");
        let mut rec = RecorderSink::new();
        rec.on_redraw_summary(&summary(1, 5_000));
        rec.on_group_faded(&GroupFadedEvent {
            key: &key,
            progress: 1.0,
            next_progress: 1.0,
            target_height: 40.0,
            displayed_height: 40.0,
        });

        let mut out = Vec::new();
        export(rec.as_bytes(), Timebase::NANOS, &mut out).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&String::from_utf8(out).unwrap()).unwrap();
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[2]["ts"], 5.0);
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], Timebase::NANOS, &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert!(parsed.is_empty());
    }
}
