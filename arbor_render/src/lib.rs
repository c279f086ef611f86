// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render-plan definitions for arbor.
//!
//! This crate provides the intermediate representation between
//! [`arbor_core`]'s scene walk and backend-specific rendering. It defines:
//!
//! - [`RenderItem`]: a single command in the render plan
//! - [`DrawCommand`]: what an item draws, or which clip/filter bracket it
//!   opens or closes
//! - [`RenderPlan`]: an ordered list of items, filled by implementing
//!   [`DrawBackend`](arbor_core::backend::DrawBackend)

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

mod plan;

pub use plan::{DrawCommand, RenderItem, RenderPlan};
