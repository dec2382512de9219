// SPDX-License-Identifier: GPL-3.0-only

//! PipeWire camera provider
//!
//! PipeWire owns device access and format negotiation; this provider only
//! discovers video source nodes and launches GStreamer preview pipelines
//! against them.

mod enumeration;
mod pipeline;

use super::types::{CameraDevice, FrameSender};
use super::{CameraProvider, CameraSession};
use crate::errors::CameraError;

/// The PipeWire-backed camera provider.
pub struct PipeWireProvider;

impl CameraProvider for PipeWireProvider {
    fn enumerate(&self) -> Result<Vec<CameraDevice>, CameraError> {
        enumeration::enumerate_cameras()
    }

    fn open(
        &self,
        device: &CameraDevice,
        sink: FrameSender,
    ) -> Result<Box<dyn CameraSession>, CameraError> {
        let pipeline = pipeline::PreviewPipeline::open(device, sink)?;
        Ok(Box::new(pipeline))
    }
}
