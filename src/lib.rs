// SPDX-License-Identifier: GPL-3.0-only

//! RealYou - a front camera mirror for the COSMIC desktop
//!
//! Shows the user their own camera feed, optionally mirrored. The crate is
//! glue over the desktop portal (camera permission), PipeWire/GStreamer
//! (preview frames), and libcosmic (UI).
//!
//! # Architecture
//!
//! - [`app`]: Application model, screens, and message handling
//! - [`backends`]: Camera provider abstraction and the PipeWire backend
//! - [`portal`]: Camera access through the XDG desktop portal
//! - [`config`]: User configuration handling
//! - [`errors`]: Error types

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod i18n;
pub mod portal;

// Re-export commonly used types
pub use app::{AppModel, Message, Orientation, PermissionGate};
pub use config::Config;
