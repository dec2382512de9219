// SPDX-License-Identifier: GPL-3.0-only

//! Application state management

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Instant;

use cosmic::widget::toaster::{ToastId, Toasts};
use cosmic::widget::{about::About, image, segmented_button};

use crate::backends::camera::types::{CameraDevice, CameraFrame};
use crate::backends::camera::SessionBinder;
use crate::config::Config;
use crate::constants::ui;
use crate::errors::{CameraError, PermissionError};
use crate::portal::PermissionDecision;

/// Context drawer pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContextPage {
    #[default]
    About,
    Settings,
}

/// Next context drawer state for a toggle request.
///
/// Requesting the page already on display flips its visibility; requesting
/// a different page switches to it and shows the drawer.
pub fn toggle_context(
    current: ContextPage,
    shown: bool,
    requested: ContextPage,
) -> (ContextPage, bool) {
    if current == requested {
        (current, !shown)
    } else {
        (requested, true)
    }
}

/// Camera permission as observed through the desktop portal.
///
/// Denial is a normal state, not an error: the request screen stays up
/// until the portal grants access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionGate {
    /// Not requested yet this session
    #[default]
    Unknown,
    /// Portal granted camera access
    Granted,
    /// Portal denied access; `rationale` marks an active dismissal by the
    /// user, which warrants an explanation on the request screen
    Denied { rationale: bool },
}

impl PermissionGate {
    /// Fold a portal decision into the gate.
    pub fn resolve(self, decision: PermissionDecision) -> Self {
        match decision {
            PermissionDecision::Granted => PermissionGate::Granted,
            PermissionDecision::Dismissed => PermissionGate::Denied { rationale: true },
            PermissionDecision::Refused => PermissionGate::Denied { rationale: false },
        }
    }

    /// Whether the camera screen may be shown.
    pub fn is_granted(self) -> bool {
        matches!(self, PermissionGate::Granted)
    }

    /// Whether the request screen should show the rationale text.
    pub fn shows_rationale(self) -> bool {
        matches!(self, PermissionGate::Denied { rationale: true })
    }
}

/// Whether the request screen's grant button accepts presses.
///
/// The button goes inert while a portal request is in flight and when the
/// portal reports no camera attached to the system.
pub fn grant_button_enabled(camera_present: bool, request_pending: bool) -> bool {
    camera_present && !request_pending
}

/// Window orientation derived from its size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    /// Landscape iff the window is strictly wider than tall; a square
    /// window counts as portrait.
    pub fn of(width: f32, height: f32) -> Self {
        if width > height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

/// Camera progress once permission is granted.
#[derive(Debug, Clone, Default)]
pub enum CameraPhase {
    /// Resolving the provider and front camera
    #[default]
    Acquiring,
    /// Session bound, frames flowing
    Streaming(CameraDevice),
    /// Fatal failure; never silently retried
    Failed(CameraError),
}

/// Double-tap detector for the portrait preview.
#[derive(Debug, Default)]
pub struct TapTracker {
    last_tap: Option<Instant>,
}

impl TapTracker {
    /// Record a tap; true when it completes a double tap.
    ///
    /// A completed double tap resets the tracker so a third tap starts a
    /// fresh sequence instead of firing again.
    pub fn register_tap(&mut self) -> bool {
        let now = Instant::now();
        let double = self
            .last_tap
            .is_some_and(|previous| now.duration_since(previous) <= ui::DOUBLE_TAP_WINDOW);

        self.last_tap = if double { None } else { Some(now) };
        double
    }
}

/// Messages emitted by the application and its widgets.
#[derive(Debug, Clone)]
pub enum Message {
    // ===== UI Navigation =====
    /// Open external URL (repository link)
    LaunchUrl(String),
    /// Toggle context drawer page (About, Settings)
    ToggleContextPage(ContextPage),
    /// Window resized; drives the orientation router
    WindowResized(f32, f32),
    /// Dismiss a toast
    CloseToast(ToastId),

    // ===== Permission Gate =====
    /// Portal reported whether any camera is attached
    CameraPresenceProbed(bool),
    /// Grant button activated on the request screen
    RequestCameraPermission,
    /// Portal answered the access request
    PermissionResolved(Result<PermissionDecision, PermissionError>),

    // ===== Camera Session =====
    /// Front camera resolved (or acquisition failed) after the grant
    FrontCameraResolved(Result<CameraDevice, CameraError>),
    /// New camera frame received from the pipeline
    CameraFrame(Arc<CameraFrame>),
    /// Streaming failed after binding
    CameraFailed(CameraError),

    // ===== Mirror Controls =====
    /// Entry activated in the Real/Mirrored segmented selector
    ViewSelected(segmented_button::Entity),
    /// Preview tapped; double taps toggle mirroring
    PreviewTapped,

    // ===== Settings =====
    /// Configuration changed on disk
    UpdateConfig(Config),
    /// App theme selected from the settings dropdown
    SetAppTheme(usize),
}

/// The application model
pub struct AppModel {
    /// COSMIC application core
    pub core: cosmic::Core,
    /// Which page the context drawer shows
    pub context_page: ContextPage,
    /// About page contents
    pub about: About,
    /// Persisted configuration
    pub config: Config,
    /// Handler for writing configuration changes
    pub config_handler: Option<cosmic::cosmic_config::Config>,
    /// Camera permission as last reported by the portal
    pub permission: PermissionGate,
    /// A portal request is in flight; the grant button is disabled
    pub permission_pending: bool,
    /// Camera presence as probed through the portal at startup
    pub camera_present: bool,
    /// Camera acquisition/streaming phase
    pub camera_phase: CameraPhase,
    /// Owner of the live camera session
    pub binder: SessionBinder,
    /// Cancel flag for the running camera subscription
    pub camera_cancel_flag: Arc<AtomicBool>,
    /// Latest frame from the pipeline
    pub current_frame: Option<Arc<CameraFrame>>,
    /// Cached handle rendering the frame as captured
    pub frame_handle: Option<image::Handle>,
    /// Cached handle rendering the frame horizontally flipped
    pub frame_handle_flipped: Option<image::Handle>,
    /// Mirrored view selected for the portrait preview
    pub mirrored: bool,
    /// Model backing the Real/Mirrored segmented selector
    pub view_selector: segmented_button::SingleSelectModel,
    /// Double-tap detector for the portrait preview
    pub tap_tracker: TapTracker,
    /// Window size feeding the orientation router
    pub window_size: (f32, f32),
    /// Localized entries backing the theme dropdown
    pub theme_dropdown_options: Vec<String>,
    /// Active toast notifications
    pub toasts: Toasts<Message>,
}

impl AppModel {
    /// Current layout orientation.
    pub fn orientation(&self) -> Orientation {
        Orientation::of(self.window_size.0, self.window_size.1)
    }

    /// Rebuild the cached image handles from the latest frame.
    ///
    /// Only the handles the current layout can display are produced; the
    /// flipped copy costs a full-frame pixel walk.
    pub(crate) fn refresh_frame_handles(&mut self) {
        let landscape = self.orientation() == Orientation::Landscape;
        let wants_plain = landscape || !self.mirrored;
        let wants_flipped = landscape || self.mirrored;

        let Some(frame) = self.current_frame.as_ref() else {
            self.frame_handle = None;
            self.frame_handle_flipped = None;
            return;
        };

        let (width, height) = (frame.width, frame.height);
        let plain_bytes = wants_plain.then(|| frame.rgba_bytes());
        let flipped_bytes = wants_flipped.then(|| frame.rgba_bytes_flipped());

        self.frame_handle = plain_bytes.map(|bytes| image::Handle::from_rgba(width, height, bytes));
        self.frame_handle_flipped =
            flipped_bytes.map(|bytes| image::Handle::from_rgba(width, height, bytes));
    }
}
