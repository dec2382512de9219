// SPDX-License-Identifier: GPL-3.0-only

//! Main application module for RealYou
//!
//! This module contains the application state, message handling, and UI
//! rendering for the mirror application.
//!
//! # Architecture
//!
//! - `state`: Application state types (AppModel, Message, Orientation, etc.)
//! - `permission_gate`: Camera permission request screen
//! - `camera_screen`: Orientation-routed preview layouts and the preview card
//! - `settings`: Settings drawer UI
//! - `view`: Main view routing
//! - `update`: Message dispatch
//! - `handlers`: Message handling grouped by domain

mod camera_screen;
mod handlers;
mod permission_gate;
mod settings;
mod state;
mod update;
mod view;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use cosmic::app::context_drawer;
use cosmic::cosmic_config::{self, CosmicConfigEntry};
use cosmic::iced::Subscription;
use cosmic::widget::{self, about::About, segmented_button, toaster::Toasts};
use tracing::{error, info, warn};

use crate::backends::camera::{SessionBinder, frame_channel, platform_provider};
use crate::config::Config;
use crate::constants::timing;
use crate::errors::CameraError;
use crate::fl;
pub use state::{
    AppModel, CameraPhase, ContextPage, Message, Orientation, PermissionGate, TapTracker,
    grant_button_enabled, toggle_context,
};

const REPOSITORY: &str = "https://github.com/chamathjayasena/RealYou";
const APP_ICON: &[u8] = include_bytes!(
    "../../resources/icons/hicolor/scalable/apps/io.github.chamathjayasena.RealYou.svg"
);

impl cosmic::Application for AppModel {
    /// The async executor that will be used to run your application's commands.
    type Executor = cosmic::executor::Default;

    /// Data that your application receives to its init method.
    type Flags = ();

    /// Messages which the application and its widgets will emit.
    type Message = Message;

    /// Unique identifier in RDNN (reverse domain name notation) format.
    const APP_ID: &'static str = "io.github.chamathjayasena.RealYou";

    fn core(&self) -> &cosmic::Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut cosmic::Core {
        &mut self.core
    }

    /// Initializes the application with any given flags and startup commands.
    fn init(
        core: cosmic::Core,
        _flags: Self::Flags,
    ) -> (Self, cosmic::Task<cosmic::Action<Self::Message>>) {
        // Create the about widget
        let about = About::default()
            .name(fl!("app-title"))
            .icon(widget::icon::from_svg_bytes(APP_ICON))
            .version(env!("GIT_VERSION"))
            .links([(fl!("view-on-github"), REPOSITORY)])
            .license(env!("CARGO_PKG_LICENSE"));

        // Load configuration
        let (config_handler, config) =
            match cosmic_config::Config::new(Self::APP_ID, Config::VERSION) {
                Ok(handler) => {
                    let config = match Config::get_entry(&handler) {
                        Ok(config) => config,
                        Err((errors, config)) => {
                            error!(?errors, "Errors loading config");
                            config
                        }
                    };
                    (Some(handler), config)
                }
                Err(err) => {
                    error!(%err, "Failed to create config handler");
                    (None, Config::default())
                }
            };

        // Initialize GStreamer early (required before any GStreamer calls)
        if let Err(e) = gstreamer::init() {
            error!(error = %e, "Failed to initialize GStreamer");
        }

        // Real first and selected, Mirrored second; positions are what the
        // selection handler maps back onto the mirrored flag
        let view_selector = segmented_button::Model::builder()
            .insert(|entity| entity.text(fl!("real")).activate())
            .insert(|entity| entity.text(fl!("mirrored")))
            .build();

        let theme_dropdown_options = vec![
            fl!("theme-system"),
            fl!("theme-dark"),
            fl!("theme-light"),
        ];

        let app = AppModel {
            core,
            context_page: ContextPage::default(),
            about,
            config,
            config_handler,
            permission: PermissionGate::default(),
            permission_pending: false,
            camera_present: true,
            camera_phase: CameraPhase::default(),
            binder: SessionBinder::new(platform_provider()),
            camera_cancel_flag: Arc::new(AtomicBool::new(false)),
            current_frame: None,
            frame_handle: None,
            frame_handle_flipped: None,
            mirrored: false,
            view_selector,
            tap_tracker: TapTracker::default(),
            window_size: (0.0, 0.0),
            theme_dropdown_options,
            toasts: Toasts::new(Message::CloseToast),
        };

        // Probe presence up front so the request screen can report a missing
        // camera before the user asks the portal for access. A probe failure
        // leaves the button live; the access request surfaces its own error.
        let presence_probe = cosmic::Task::perform(
            async move {
                match crate::portal::is_camera_present().await {
                    Ok(present) => present,
                    Err(err) => {
                        warn!(error = %err, "Camera presence probe failed");
                        true
                    }
                }
            },
            |present| cosmic::Action::App(Message::CameraPresenceProbed(present)),
        );

        let theme = cosmic::command::set_theme(app.config.app_theme.theme());
        (app, cosmic::Task::batch([theme, presence_probe]))
    }

    /// Elements to pack at the end of the header bar.
    fn header_end(&self) -> Vec<cosmic::Element<'_, Self::Message>> {
        vec![
            widget::button::icon(widget::icon::from_name("preferences-system-symbolic"))
                .on_press(Message::ToggleContextPage(ContextPage::Settings))
                .into(),
        ]
    }

    /// Display a context drawer if the context page is requested.
    fn context_drawer(&self) -> Option<context_drawer::ContextDrawer<'_, Self::Message>> {
        if !self.core.window.show_context {
            return None;
        }

        Some(match self.context_page {
            ContextPage::About => context_drawer::about(
                &self.about,
                |url| Message::LaunchUrl(url.to_string()),
                Message::ToggleContextPage(ContextPage::About),
            ),
            ContextPage::Settings => self.settings_view(),
        })
    }

    /// Describes the interface based on the current state of the application model.
    fn view(&self) -> cosmic::Element<'_, Self::Message> {
        self.view()
    }

    /// Register subscriptions for this application.
    fn subscription(&self) -> Subscription<Self::Message> {
        use cosmic::iced::futures::{SinkExt, StreamExt};

        let config_sub = self
            .core()
            .watch_config::<Config>(Self::APP_ID)
            .map(|update| Message::UpdateConfig(update.config));

        // Window resizes drive the orientation router
        let window_sub = cosmic::iced::event::listen_with(|event, _status, _id| match event {
            cosmic::iced::Event::Window(cosmic::iced::window::Event::Resized(size)) => {
                Some(Message::WindowResized(size.width, size.height))
            }
            _ => None,
        });

        // One subscription owns the live pipeline; its identity is the bound
        // device, so it restarts only when a different camera is resolved
        let camera_sub = match &self.camera_phase {
            CameraPhase::Streaming(device) => {
                let device = device.clone();
                let binder = self.binder.clone();
                let cancel_flag = Arc::clone(&self.camera_cancel_flag);

                Subscription::run_with_id(
                    ("camera", device.path.clone()),
                    cosmic::iced::stream::channel(100, move |mut output| async move {
                        info!(device = %device.name, "Camera subscription started");

                        let (sender, mut receiver) = frame_channel();

                        // Bind replaces any previous session before opening
                        // the new one, so two bindings never overlap
                        if let Err(e) = binder.bind(&device, sender) {
                            let _ = output.send(Message::CameraFailed(e)).await;
                            return;
                        }

                        loop {
                            if cancel_flag.load(Ordering::Acquire) {
                                info!("Cancel flag set - camera subscription exiting");
                                break;
                            }

                            if output.is_closed() {
                                info!("Output channel closed - camera subscription exiting");
                                break;
                            }

                            // Wait with a timeout so cancellation is observed
                            // even when no frames arrive
                            match tokio::time::timeout(timing::FRAME_POLL_INTERVAL, receiver.next())
                                .await
                            {
                                Ok(Some(frame)) => {
                                    // Dropping frames here is fine for a live
                                    // preview; only the latest one matters
                                    if let Err(e) =
                                        output.try_send(Message::CameraFrame(Arc::new(frame)))
                                        && e.is_disconnected()
                                    {
                                        info!("Output channel disconnected");
                                        break;
                                    }
                                }
                                Ok(None) => {
                                    let _ = output
                                        .send(Message::CameraFailed(CameraError::Disconnected))
                                        .await;
                                    break;
                                }
                                Err(_) => continue,
                            }
                        }

                        // Let the pipeline release the device before a
                        // replacement subscription binds again
                        tokio::time::sleep(timing::STREAM_CLEANUP_DELAY).await;
                        info!("Camera subscription ended");
                    }),
                )
            }
            _ => Subscription::none(),
        };

        Subscription::batch([config_sub, window_sub, camera_sub])
    }

    /// Handles messages emitted by the application and its widgets.
    fn update(
        &mut self,
        message: Self::Message,
    ) -> cosmic::Task<cosmic::Action<Self::Message>> {
        self.update(message)
    }
}
