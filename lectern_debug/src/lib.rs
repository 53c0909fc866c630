// Copyright 2026 the Lectern Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, Chrome trace export and a `tracing` bridge for
//! lectern diagnostics.
//!
//! This crate provides [`TraceSink`](lectern_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`] — human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`] — compact binary recording with
//!   [`recorder::decode`] for playback.
//! - [`chrome::export`] — writes Chrome Trace Event Format JSON from recorded
//!   bytes.
//! - [`tracing_sink::TracingSink`] — forwards events to the [`tracing`]
//!   facade, so they show up in whatever subscriber the host installed.

pub mod chrome;
pub mod pretty;
pub mod recorder;
pub mod tracing_sink;
