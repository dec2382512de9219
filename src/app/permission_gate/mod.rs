// SPDX-License-Identifier: GPL-3.0-only

//! Camera permission request screen
//!
//! Shown whenever the portal has not granted camera access. Purely
//! presentational: the grant button emits a message and the portal decides.

use cosmic::Element;
use cosmic::iced::{Alignment, Length};
use cosmic::widget;

use crate::app::state::{AppModel, Message, grant_button_enabled};
use crate::fl;

impl AppModel {
    /// Build the permission request screen.
    ///
    /// The headline switches to the rationale variant after the user
    /// actively dismissed the portal dialog, and reports a missing camera
    /// when the portal's presence probe found none.
    pub fn build_permission_screen(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let headline = if !self.camera_present {
            fl!("no-camera-detected")
        } else if self.permission.shows_rationale() {
            fl!("camera-permission-rationale")
        } else {
            fl!("camera-permission-required")
        };

        let grant_button = if grant_button_enabled(self.camera_present, self.permission_pending) {
            widget::button::suggested(fl!("grant-camera-permission"))
                .on_press(Message::RequestCameraPermission)
        } else {
            // No on_press while the portal dialog is up or no camera exists
            widget::button::suggested(fl!("grant-camera-permission"))
        };

        let content = widget::column()
            .push(
                widget::icon::from_name("camera-web-symbolic")
                    .size(48)
                    .icon(),
            )
            .push(widget::vertical_space().height(spacing.space_m))
            .push(
                widget::text(headline)
                    .size(16)
                    .font(cosmic::font::bold())
                    .center(),
            )
            .push(widget::vertical_space().height(spacing.space_s))
            .push(widget::text(fl!("camera-permission-info")).size(12).center())
            .push(widget::vertical_space().height(spacing.space_l))
            .push(grant_button)
            .align_x(Alignment::Center)
            .max_width(420.0);

        widget::container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(cosmic::iced::alignment::Horizontal::Center)
            .align_y(cosmic::iced::alignment::Vertical::Center)
            .padding(spacing.space_l)
            .into()
    }
}
