// SPDX-License-Identifier: GPL-3.0-only

//! Outlined preview card

use cosmic::Element;
use cosmic::iced::{Alignment, Background, Border, Length};
use cosmic::widget;

use crate::app::state::{AppModel, CameraPhase, Message};
use crate::fl;

impl AppModel {
    /// Build an outlined card around the live preview.
    ///
    /// `flipped` selects the horizontally mirrored rendering of the current
    /// frame; the flip is applied to the cached handle, so the camera is
    /// never captured twice. `caption` adds a centered label below the feed.
    pub fn build_preview_card(
        &self,
        flipped: bool,
        caption: Option<String>,
    ) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let mut column = widget::column()
            .push(self.preview_content(flipped))
            .align_x(Alignment::Center)
            .width(Length::Fill)
            .height(Length::Fill);

        if let Some(caption) = caption {
            column = column
                .push(widget::vertical_space().height(spacing.space_xxs))
                .push(widget::text(caption).size(14).font(cosmic::font::bold()));
        }

        widget::container(column)
            .padding(spacing.space_xs)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|theme| {
                let cosmic = theme.cosmic();
                // Subtle outline derived from the foreground color, so the
                // card reads in both dark and light mode
                let outline = cosmic::iced::Color {
                    a: 0.3,
                    ..cosmic.on_bg_color().into()
                };
                widget::container::Style {
                    background: Some(Background::Color(cosmic.bg_color().into())),
                    border: Border {
                        color: outline,
                        width: 1.0,
                        radius: cosmic.corner_radii.radius_m.into(),
                    },
                    ..Default::default()
                }
            })
            .into()
    }

    /// The live feed, or a placeholder while no frame can be shown.
    fn preview_content(&self, flipped: bool) -> Element<'_, Message> {
        if let CameraPhase::Failed(_) = self.camera_phase {
            return placeholder(fl!("camera-unavailable"));
        }

        let handle = if flipped {
            self.frame_handle_flipped.as_ref()
        } else {
            self.frame_handle.as_ref()
        };

        match handle {
            Some(handle) => widget::image::Image::new(handle.clone())
                .content_fit(cosmic::iced::ContentFit::Contain)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            None => placeholder(fl!("initializing-camera")),
        }
    }
}

fn placeholder<'a>(label: String) -> Element<'a, Message> {
    widget::container(widget::text(label).size(16))
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(cosmic::iced::alignment::Horizontal::Center)
        .align_y(cosmic::iced::alignment::Vertical::Center)
        .style(|theme| widget::container::Style {
            text_color: Some(theme.cosmic().on_bg_color().into()),
            ..Default::default()
        })
        .into()
}
