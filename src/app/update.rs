// SPDX-License-Identifier: GPL-3.0-only

//! Message update handling
//!
//! The main `update()` function is a dispatcher; the handling code lives in
//! the `handlers` submodules organized by functional domain.
//!
//! # Handler Modules
//!
//! - `handlers::permission`: portal requests and gate transitions
//! - `handlers::camera`: front-camera resolution, frames, failures
//! - `handlers::ui`: navigation, mirror controls, toasts, settings

use crate::app::state::{AppModel, Message};
use cosmic::Task;

impl AppModel {
    /// Main message handler - routes messages to the handler methods.
    pub fn update(&mut self, message: Message) -> Task<cosmic::Action<Message>> {
        match message {
            // ===== UI Navigation =====
            Message::LaunchUrl(url) => self.handle_launch_url(url),
            Message::ToggleContextPage(page) => self.handle_toggle_context_page(page),
            Message::WindowResized(width, height) => self.handle_window_resized(width, height),
            Message::CloseToast(id) => self.handle_close_toast(id),

            // ===== Permission Gate =====
            Message::CameraPresenceProbed(present) => self.handle_camera_presence_probed(present),
            Message::RequestCameraPermission => self.handle_request_camera_permission(),
            Message::PermissionResolved(result) => self.handle_permission_resolved(result),

            // ===== Camera Session =====
            Message::FrontCameraResolved(result) => self.handle_front_camera_resolved(result),
            Message::CameraFrame(frame) => self.handle_camera_frame(frame),
            Message::CameraFailed(error) => self.handle_camera_failed(error),

            // ===== Mirror Controls =====
            Message::ViewSelected(entity) => self.handle_view_selected(entity),
            Message::PreviewTapped => self.handle_preview_tapped(),

            // ===== Settings =====
            Message::UpdateConfig(config) => self.handle_update_config(config),
            Message::SetAppTheme(index) => self.handle_set_app_theme(index),
        }
    }
}
