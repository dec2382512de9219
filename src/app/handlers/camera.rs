// SPDX-License-Identifier: GPL-3.0-only

//! Camera session handlers
//!
//! Handles the front-camera acquisition continuation, incoming frames, and
//! the notify-then-stop failure policy.

use std::sync::Arc;

use cosmic::Task;
use cosmic::widget::toaster::Toast;
use tracing::{error, info};

use crate::app::state::{AppModel, CameraPhase, Message};
use crate::backends::camera::types::{CameraDevice, CameraFrame};
use crate::errors::CameraError;
use crate::fl;

impl AppModel {
    /// Continuation of the async front-camera acquisition; like every
    /// message this runs on the UI update loop, so no other thread ever
    /// decides what gets bound.
    pub(crate) fn handle_front_camera_resolved(
        &mut self,
        result: Result<CameraDevice, CameraError>,
    ) -> Task<cosmic::Action<Message>> {
        match result {
            Ok(device) => {
                info!(device = %device.name, location = %device.location, "Front camera resolved");
                self.camera_phase = CameraPhase::Streaming(device);
                Task::none()
            }
            Err(error) => self.fail_camera(error),
        }
    }

    /// Streaming failed after the session was bound.
    pub(crate) fn handle_camera_failed(
        &mut self,
        error: CameraError,
    ) -> Task<cosmic::Action<Message>> {
        self.fail_camera(error)
    }

    /// New frame from the pipeline.
    pub(crate) fn handle_camera_frame(
        &mut self,
        frame: Arc<CameraFrame>,
    ) -> Task<cosmic::Action<Message>> {
        self.current_frame = Some(frame);
        self.refresh_frame_handles();
        Task::none()
    }

    /// Record a fatal camera failure: surface a toast, log it, and leave
    /// the error on screen. The failure is never silently retried.
    fn fail_camera(&mut self, error: CameraError) -> Task<cosmic::Action<Message>> {
        error!(error = %error, "Camera failed");

        // Stop the frame subscription eagerly; the phase change alone would
        // also end it on the next identity check
        self.camera_cancel_flag
            .store(true, std::sync::atomic::Ordering::Release);

        let notice = match &error {
            CameraError::FrontCameraUnavailable => fl!("front-camera-init-failed"),
            _ => fl!("camera-init-failed"),
        };

        self.binder.unbind_all();
        self.current_frame = None;
        self.refresh_frame_handles();
        self.camera_phase = CameraPhase::Failed(error);

        self.toasts
            .push(Toast::new(notice))
            .map(cosmic::Action::App)
    }
}
