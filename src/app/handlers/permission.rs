// SPDX-License-Identifier: GPL-3.0-only

//! Permission gate handlers
//!
//! The portal owns the grant/deny decision; these handlers transport it
//! into the gate and kick off camera acquisition on a grant.

use cosmic::Task;
use tracing::{error, info, warn};

use crate::app::state::{AppModel, CameraPhase, Message, PermissionGate, grant_button_enabled};
use crate::errors::PermissionError;
use crate::portal::{self, PermissionDecision};

impl AppModel {
    /// Record the portal's camera presence probe.
    ///
    /// A missing camera keeps the request screen up with the grant button
    /// inert; asking the portal for access to hardware that does not exist
    /// only produces a doomed dialog.
    pub(crate) fn handle_camera_presence_probed(
        &mut self,
        present: bool,
    ) -> Task<cosmic::Action<Message>> {
        if !present {
            warn!("Portal reports no camera attached");
        }
        self.camera_present = present;
        Task::none()
    }

    /// Ask the portal for camera access.
    pub(crate) fn handle_request_camera_permission(&mut self) -> Task<cosmic::Action<Message>> {
        if !grant_button_enabled(self.camera_present, self.permission_pending) {
            return Task::none();
        }
        self.permission_pending = true;
        info!("Requesting camera access from the portal");

        Task::perform(
            async move { portal::request_camera_access().await },
            |result| cosmic::Action::App(Message::PermissionResolved(result)),
        )
    }

    /// Fold the portal's answer into the gate and, when granted, start
    /// resolving the front camera.
    pub(crate) fn handle_permission_resolved(
        &mut self,
        result: Result<PermissionDecision, PermissionError>,
    ) -> Task<cosmic::Action<Message>> {
        self.permission_pending = false;

        let decision = match result {
            Ok(decision) => decision,
            Err(err) => {
                // Transport failure, not a user choice: no rationale text
                error!(error = %err, "Portal request failed");
                self.permission = PermissionGate::Denied { rationale: false };
                return Task::none();
            }
        };

        self.permission = self.permission.resolve(decision);
        info!(permission = ?self.permission, "Permission gate updated");

        if !self.permission.is_granted() {
            return Task::none();
        }

        self.camera_phase = CameraPhase::Acquiring;
        let binder = self.binder.clone();
        Task::perform(async move { binder.front_camera() }, |result| {
            cosmic::Action::App(Message::FrontCameraResolved(result))
        })
    }
}
