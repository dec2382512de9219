// SPDX-License-Identifier: GPL-3.0-only

//! Message handler modules
//!
//! Handlers are grouped by functional domain; the dispatcher in
//! `app::update` routes every message to one of them.

pub mod camera;
pub mod permission;
pub mod ui;
