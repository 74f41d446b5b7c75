// Copyright 2026 the Medley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and JSON export for medley change
//! diagnostics.
//!
//! This crate provides [`ChangeSink`](medley_core::event::ChangeSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettySink`] — human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`] — compact binary recording with
//!   [`recorder::decode`] for playback.
//! - [`json::export`] — writes recorded bytes out as a JSON event array.

pub mod json;
pub mod pretty;
pub mod recorder;
