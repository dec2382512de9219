// SPDX-License-Identifier: GPL-3.0-only

//! Camera backend abstraction
//!
//! Trait-based access to the platform camera stack, kept small on purpose:
//! the mirror only ever streams one preview.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │   UI Layer (App)    │
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │    SessionBinder    │  ← front-camera selection, unbind-before-rebind
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │ CameraProvider trait│  ← enumerate devices, open sessions
//! └──────────┬──────────┘
//!            │
//!            ▼
//!       ┌────────┐
//!       │PipeWire│  ← concrete implementation (GStreamer pipeline)
//!       └────────┘
//! ```

pub mod binder;
pub mod pipewire;
pub mod types;

pub use binder::SessionBinder;
pub use types::*;

use std::sync::Arc;

use crate::errors::CameraError;

/// A live preview session delivering frames into a channel.
///
/// Dropping a session releases the device; `stop` does so eagerly.
pub trait CameraSession: Send {
    /// Stop streaming and release the device.
    fn stop(&mut self);
}

/// Access to the platform camera stack.
pub trait CameraProvider: Send + Sync {
    /// Enumerate the currently visible camera devices.
    fn enumerate(&self) -> Result<Vec<CameraDevice>, CameraError>;

    /// Open a preview session on `device`, delivering RGBA frames to `sink`.
    fn open(
        &self,
        device: &CameraDevice,
        sink: FrameSender,
    ) -> Result<Box<dyn CameraSession>, CameraError>;
}

/// The camera provider for this platform (PipeWire through GStreamer).
pub fn platform_provider() -> Arc<dyn CameraProvider> {
    Arc::new(pipewire::PipeWireProvider)
}
