// SPDX-License-Identifier: GPL-3.0-only

//! Session binding with an unbind-before-rebind guarantee.

use std::sync::{Arc, Mutex};

use tracing::info;

use super::types::{CameraDevice, FrameSender};
use super::{CameraProvider, CameraSession};
use crate::errors::CameraError;

struct BinderState {
    active: Option<Box<dyn CameraSession>>,
}

/// Owns the single live camera session.
///
/// Every transition goes through one lock, and a bind always tears down the
/// previous session before opening the next, so at most one binding is
/// active at any point in time.
#[derive(Clone)]
pub struct SessionBinder {
    provider: Arc<dyn CameraProvider>,
    state: Arc<Mutex<BinderState>>,
}

impl SessionBinder {
    pub fn new(provider: Arc<dyn CameraProvider>) -> Self {
        Self {
            provider,
            state: Arc::new(Mutex::new(BinderState { active: None })),
        }
    }

    /// Resolve the device that will serve as the front camera.
    ///
    /// Fails with [`CameraError::FrontCameraUnavailable`] when devices exist
    /// but none of them faces the user; no session is opened in that case.
    pub fn front_camera(&self) -> Result<CameraDevice, CameraError> {
        let devices = self.provider.enumerate()?;
        if devices.is_empty() {
            return Err(CameraError::NoCameraFound);
        }

        devices
            .into_iter()
            .find(|device| device.location.faces_user())
            .ok_or(CameraError::FrontCameraUnavailable)
    }

    /// Bind a preview session to `device`, replacing any active session.
    pub fn bind(&self, device: &CameraDevice, sink: FrameSender) -> Result<(), CameraError> {
        let mut state = self.state.lock().unwrap();

        if let Some(mut previous) = state.active.take() {
            info!("Unbinding previous camera session");
            previous.stop();
        }

        let session = self.provider.open(device, sink)?;
        state.active = Some(session);
        info!(device = %device.name, "Camera session bound");
        Ok(())
    }

    /// Tear down the active session, if any.
    pub fn unbind_all(&self) {
        let mut state = self.state.lock().unwrap();
        if let Some(mut session) = state.active.take() {
            session.stop();
            info!("Camera session unbound");
        }
    }

    /// Whether a session is currently bound.
    pub fn has_active_session(&self) -> bool {
        self.state.lock().unwrap().active.is_some()
    }
}
