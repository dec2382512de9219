// SPDX-License-Identifier: GPL-3.0-only

//! Camera screen layouts
//!
//! The orientation router picks one of two layouts from the window size:
//! portrait shows a single preview with the mirror controls below it,
//! landscape shows the real and mirrored feeds side by side.

mod preview_card;

use cosmic::Element;
use cosmic::iced::{Alignment, Length};
use cosmic::widget;

use crate::app::state::{AppModel, ContextPage, Message, Orientation};
use crate::fl;

impl AppModel {
    /// Build the camera screen for the current orientation.
    pub fn build_camera_screen(&self) -> Element<'_, Message> {
        match self.orientation() {
            Orientation::Portrait => self.build_portrait_layout(),
            Orientation::Landscape => self.build_landscape_layout(),
        }
    }

    /// Single preview above a control row. Double-tapping the preview
    /// toggles mirroring in place; the card never captures twice.
    fn build_portrait_layout(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let preview = widget::mouse_area(self.build_preview_card(self.mirrored, None))
            .on_press(Message::PreviewTapped);

        let about_button = widget::button::icon(widget::icon::from_name("help-about-symbolic"))
            .on_press(Message::ToggleContextPage(ContextPage::About));

        let selector = widget::segmented_button::horizontal(&self.view_selector)
            .button_alignment(Alignment::Center)
            .width(Length::Fill)
            .on_activate(Message::ViewSelected);

        let controls = widget::row()
            .push(about_button)
            .push(widget::horizontal_space().width(spacing.space_xs))
            .push(selector)
            .align_y(Alignment::Center)
            .width(Length::Fill);

        widget::column()
            .push(preview)
            .push(widget::vertical_space().height(spacing.space_xs))
            .push(controls)
            .padding(spacing.space_xs)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Two captioned cards side by side, one real and one mirrored.
    fn build_landscape_layout(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        widget::row()
            .push(self.build_preview_card(false, Some(fl!("real"))))
            .push(widget::horizontal_space().width(spacing.space_xs))
            .push(self.build_preview_card(true, Some(fl!("mirrored"))))
            .padding(spacing.space_xs)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}
