// SPDX-License-Identifier: GPL-3.0-only

//! Settings drawer view

use cosmic::Element;
use cosmic::app::context_drawer;
use cosmic::widget;

use crate::app::state::{AppModel, ContextPage, Message};
use crate::config::AppTheme;
use crate::fl;

impl AppModel {
    /// Create the settings view for the context drawer.
    pub fn settings_view(&self) -> context_drawer::ContextDrawer<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let current_theme_index = match self.config.app_theme {
            AppTheme::System => 0,
            AppTheme::Dark => 1,
            AppTheme::Light => 2,
        };

        let theme_dropdown = widget::dropdown(
            &self.theme_dropdown_options,
            Some(current_theme_index),
            Message::SetAppTheme,
        );

        let settings_column: Element<'_, Message> = widget::column()
            .push(
                widget::text(fl!("appearance"))
                    .size(16)
                    .font(cosmic::font::bold()),
            )
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(
                widget::row()
                    .push(widget::text(fl!("theme")))
                    .push(widget::horizontal_space().width(cosmic::iced::Length::Fill))
                    .push(theme_dropdown)
                    .align_y(cosmic::iced::Alignment::Center),
            )
            .push(widget::vertical_space().height(spacing.space_l))
            .push(widget::divider::horizontal::default())
            .push(widget::vertical_space().height(spacing.space_s))
            .push(
                widget::text(format!("Version {}", env!("GIT_VERSION")))
                    .size(12)
                    .class(cosmic::theme::Text::Accent),
            )
            .push(widget::text(fl!("copyright")).size(12))
            .spacing(0)
            .into();

        context_drawer::context_drawer(
            settings_column,
            Message::ToggleContextPage(ContextPage::Settings),
        )
        .title(fl!("settings"))
    }
}
