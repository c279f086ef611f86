// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Retained-mode 2D scene graph: transforms, bounds, and coordinate queries.
//!
//! `arbor_core` keeps a tree of display objects, derives each node's world
//! matrix and world alpha from its ancestors, and computes axis-aligned bounds
//! lazily. It is `no_std` compatible (with `alloc`) and stores nodes in an
//! arena addressed by generational handles.
//!
//! # Architecture
//!
//! ```text
//!   Transform components ──► local matrix ──┐
//!                                           ▼
//!   parent world matrix ────────────► world matrix ──► Bounds
//!                                           │
//!                                           ▼
//!                       SceneGraph::render() ──► DrawBackend
//! ```
//!
//! **[`matrix`]**: 2×3 affine [`Matrix`](matrix::Matrix) with in-place
//! composition, inversion, and decomposition.
//!
//! **[`point`]**: [`ObservablePoint`](point::ObservablePoint), a coordinate
//! pair whose setters report changes.
//!
//! **[`transform`]**: per-node [`Transform`](transform::Transform) with an
//! eager and a cached strategy selected by
//! [`TransformMode`](config::TransformMode).
//!
//! **[`bounds`]**: the [`Bounds`](bounds::Bounds) min/max accumulator.
//!
//! **[`scene`]**: the [`SceneGraph`](scene::SceneGraph) arena, tree
//! operations, update passes, bounds queries, coordinate conversion, and the
//! render walk.
//!
//! **[`backend`]**: the [`DrawBackend`](backend::DrawBackend) trait render
//! backends implement.
//!
//! **[`config`]**: [`SceneConfig`](config::SceneConfig) and its parse errors.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types, with
//! a zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-node
//!   transform update events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod bounds;
pub mod config;
pub mod matrix;
pub mod point;
pub mod scene;
pub mod trace;
pub mod transform;
