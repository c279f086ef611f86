// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing, recording, and Chrome trace export for arbor scene
//! diagnostics.
//!
//! This crate provides [`TraceSink`](arbor_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: compact binary recording into a shared
//!   [`recorder::Recording`], with [`recorder::decode`] for playback.
//! - [`chrome::export`]: writes Chrome Trace Event Format JSON from recorded
//!   bytes.
//! - [`tee::Tee`]: forwards every event to several sinks, since a
//!   [`SceneGraph`](arbor_core::scene::SceneGraph) holds only one.

pub mod chrome;
pub mod pretty;
pub mod recorder;
pub mod tee;
