// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

/// UI constants
pub mod ui {
    use std::time::Duration;

    /// Two preview taps within this window count as a double tap
    pub const DOUBLE_TAP_WINDOW: Duration = Duration::from_millis(300);
}

/// GStreamer pipeline constants
pub mod pipeline {
    /// Maximum buffer queue size (keep small for low latency)
    pub const MAX_BUFFERS: u32 = 2;

    /// Output pixel format for appsink
    /// RGBA uses 4 bytes/pixel and maps directly onto the image widget
    pub const OUTPUT_FORMAT: &str = "RGBA";

    /// Capacity of the frame channel between the appsink callback and the UI
    pub const FRAME_CHANNEL_CAPACITY: usize = 4;
}

/// Timing constants
pub mod timing {
    use std::time::Duration;

    /// State query timeout when validating a freshly launched pipeline;
    /// async transitions are accepted, so this stays short
    pub const STATE_CHANGE_TIMEOUT_MS: u64 = 50;

    /// Pipeline playing state timeout on start
    pub const START_TIMEOUT_SECS: u64 = 5;

    /// Pipeline state change timeout on stop
    pub const STOP_TIMEOUT_SECS: u64 = 2;

    /// Poll interval while waiting for camera frames in the subscription
    pub const FRAME_POLL_INTERVAL: Duration = Duration::from_millis(16);

    /// Grace period for a cancelled stream to release the device
    pub const STREAM_CLEANUP_DELAY: Duration = Duration::from_millis(50);
}
