// SPDX-License-Identifier: GPL-3.0-only

//! UI navigation and settings handlers
//!
//! Handles the context drawer, window resizes, the mirror controls, toast
//! dismissal, and configuration changes.

use cosmic::Task;
use cosmic::cosmic_config::CosmicConfigEntry;
use cosmic::widget::segmented_button;
use cosmic::widget::toaster::ToastId;
use tracing::{error, info};

use crate::app::state::{AppModel, ContextPage, Message, toggle_context};
use crate::config::AppTheme;

impl AppModel {
    // =========================================================================
    // UI Navigation Handlers
    // =========================================================================

    pub(crate) fn handle_launch_url(&self, url: String) -> Task<cosmic::Action<Message>> {
        match open::that_detached(&url) {
            Ok(()) => {}
            Err(err) => {
                error!(url = %url, error = %err, "Failed to open URL");
            }
        }
        Task::none()
    }

    pub(crate) fn handle_toggle_context_page(
        &mut self,
        context_page: ContextPage,
    ) -> Task<cosmic::Action<Message>> {
        let (page, shown) = toggle_context(
            self.context_page,
            self.core.window.show_context,
            context_page,
        );
        self.context_page = page;
        self.core.window.show_context = shown;
        Task::none()
    }

    pub(crate) fn handle_window_resized(
        &mut self,
        width: f32,
        height: f32,
    ) -> Task<cosmic::Action<Message>> {
        let previous = self.orientation();
        self.window_size = (width, height);

        // A layout change can require the other frame handle
        if self.orientation() != previous {
            info!(orientation = ?self.orientation(), "Layout re-routed");
            self.refresh_frame_handles();
        }
        Task::none()
    }

    pub(crate) fn handle_close_toast(&mut self, id: ToastId) -> Task<cosmic::Action<Message>> {
        self.toasts.remove(id);
        Task::none()
    }

    // =========================================================================
    // Mirror Control Handlers
    // =========================================================================

    pub(crate) fn handle_view_selected(
        &mut self,
        entity: segmented_button::Entity,
    ) -> Task<cosmic::Action<Message>> {
        self.view_selector.activate(entity);

        // Position 0 = Real, 1 = Mirrored
        let position = self.view_selector.position(entity).unwrap_or(0);
        self.set_mirrored(position == 1)
    }

    pub(crate) fn handle_preview_tapped(&mut self) -> Task<cosmic::Action<Message>> {
        if !self.tap_tracker.register_tap() {
            return Task::none();
        }

        info!(mirrored = !self.mirrored, "Double tap toggled mirroring");
        self.set_mirrored(!self.mirrored)
    }

    fn set_mirrored(&mut self, mirrored: bool) -> Task<cosmic::Action<Message>> {
        if self.mirrored != mirrored {
            self.mirrored = mirrored;
            self.refresh_frame_handles();
        }

        // Keep the segmented selector in sync with double-tap toggles
        self.view_selector
            .activate_position(if mirrored { 1 } else { 0 });
        Task::none()
    }

    // =========================================================================
    // Settings Handlers
    // =========================================================================

    pub(crate) fn handle_update_config(
        &mut self,
        config: crate::config::Config,
    ) -> Task<cosmic::Action<Message>> {
        info!("UpdateConfig received");
        self.config = config;
        cosmic::command::set_theme(self.config.app_theme.theme())
    }

    pub(crate) fn handle_set_app_theme(&mut self, index: usize) -> Task<cosmic::Action<Message>> {
        let app_theme = match index {
            0 => AppTheme::System,
            1 => AppTheme::Dark,
            2 => AppTheme::Light,
            _ => return Task::none(),
        };

        info!(?app_theme, "Setting application theme");
        self.config.app_theme = app_theme;

        if let Some(handler) = self.config_handler.as_ref()
            && let Err(err) = self.config.write_entry(handler)
        {
            error!(?err, "Failed to save app theme setting");
        }

        cosmic::command::set_theme(app_theme.theme())
    }
}
