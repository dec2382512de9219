// SPDX-License-Identifier: GPL-3.0-only

//! Main application view
//!
//! Routes between the permission request screen and the camera screen, and
//! wraps everything in the toaster so failure notices can surface anywhere.

use cosmic::Element;
use cosmic::widget;

use crate::app::state::{AppModel, Message};

impl AppModel {
    /// Build the main application view.
    ///
    /// The camera screen is shown iff the portal granted camera access;
    /// every other permission state keeps the request screen up.
    pub fn view(&self) -> Element<'_, Message> {
        let content: Element<'_, Message> = if self.permission.is_granted() {
            self.build_camera_screen()
        } else {
            self.build_permission_screen()
        };

        widget::toaster(&self.toasts, content)
    }
}
