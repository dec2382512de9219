// SPDX-License-Identifier: GPL-3.0-only

//! Backend layer for hardware access
//!
//! # Modules
//!
//! - [`camera`]: camera discovery and preview streaming over PipeWire

pub mod camera;
