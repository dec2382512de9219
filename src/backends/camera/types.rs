// SPDX-License-Identifier: GPL-3.0-only

//! Shared types for the camera backend

use std::fmt;
use std::sync::Arc;

use crate::constants::pipeline;

/// Channel end the pipeline pushes decoded frames into.
pub type FrameSender = futures::channel::mpsc::Sender<CameraFrame>;

/// Receiving end consumed by the application subscription.
pub type FrameReceiver = futures::channel::mpsc::Receiver<CameraFrame>;

/// Bounded channel carrying frames from the pipeline into the UI. The small
/// capacity keeps the preview live: a stalled consumer drops frames at the
/// sender instead of building up latency.
pub fn frame_channel() -> (FrameSender, FrameReceiver) {
    futures::channel::mpsc::channel(pipeline::FRAME_CHANNEL_CAPACITY)
}

/// Physical placement of a camera as reported by the device layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraLocation {
    /// User-facing camera
    Front,
    /// World-facing camera
    Back,
    /// External capture device
    External,
    /// No location reported
    #[default]
    Unknown,
}

impl CameraLocation {
    /// Parse the libcamera location property value.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "front" => CameraLocation::Front,
            "back" => CameraLocation::Back,
            "external" => CameraLocation::External,
            _ => CameraLocation::Unknown,
        }
    }

    /// Whether a device at this location can serve as the user-facing
    /// camera. Desktop webcams usually report no location at all and sit
    /// above the screen, so an unknown location qualifies.
    pub fn faces_user(self) -> bool {
        matches!(self, CameraLocation::Front | CameraLocation::Unknown)
    }
}

impl fmt::Display for CameraLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CameraLocation::Front => "front",
            CameraLocation::Back => "back",
            CameraLocation::External => "external",
            CameraLocation::Unknown => "unknown",
        };
        write!(f, "{}", label)
    }
}

/// A camera device visible to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraDevice {
    /// Human-readable device name
    pub name: String,
    /// PipeWire target path (`pipewire-serial-N`, `pipewire-N`, or empty
    /// for automatic selection)
    pub path: String,
    /// Reported physical placement
    pub location: CameraLocation,
}

/// One decoded RGBA frame from the preview pipeline.
#[derive(Clone)]
pub struct CameraFrame {
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Bytes per row as mapped from the pipeline (may exceed `width * 4`)
    pub stride: u32,
    /// RGBA pixel data, `stride * height` bytes
    pub data: Arc<[u8]>,
}

impl CameraFrame {
    /// Tightly packed RGBA bytes suitable for an image handle.
    pub fn rgba_bytes(&self) -> Vec<u8> {
        let row = self.width as usize * 4;
        let stride = self.stride as usize;
        if stride == row {
            return self.data.to_vec();
        }

        let mut out = Vec::with_capacity(row * self.height as usize);
        for chunk in self.data.chunks(stride).take(self.height as usize) {
            if chunk.len() < row {
                break;
            }
            out.extend_from_slice(&chunk[..row]);
        }
        out
    }

    /// Horizontally mirrored, tightly packed RGBA bytes.
    pub fn rgba_bytes_flipped(&self) -> Vec<u8> {
        let row = self.width as usize * 4;
        let stride = self.stride as usize;

        let mut out = Vec::with_capacity(row * self.height as usize);
        for chunk in self.data.chunks(stride).take(self.height as usize) {
            if chunk.len() < row {
                break;
            }
            for pixel in chunk[..row].chunks_exact(4).rev() {
                out.extend_from_slice(pixel);
            }
        }
        out
    }
}

impl fmt::Debug for CameraFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CameraFrame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("stride", &self.stride)
            .field("bytes", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(width: u32, height: u32, stride: u32, data: Vec<u8>) -> CameraFrame {
        CameraFrame {
            width,
            height,
            stride,
            data: Arc::from(data),
        }
    }

    #[test]
    fn flip_reverses_pixels_within_each_row() {
        // Two rows of two pixels: AB / CD
        let data = vec![
            1, 1, 1, 255, 2, 2, 2, 255, // A B
            3, 3, 3, 255, 4, 4, 4, 255, // C D
        ];
        let flipped = frame(2, 2, 8, data).rgba_bytes_flipped();

        assert_eq!(
            flipped,
            vec![
                2, 2, 2, 255, 1, 1, 1, 255, // B A
                4, 4, 4, 255, 3, 3, 3, 255, // D C
            ]
        );
    }

    #[test]
    fn flip_twice_restores_original() {
        let data: Vec<u8> = (0..3 * 1 * 4).map(|i| i as u8).collect();
        let original = frame(3, 1, 12, data.clone());

        let once = original.rgba_bytes_flipped();
        let twice = frame(3, 1, 12, once).rgba_bytes_flipped();

        assert_eq!(twice, data, "horizontal flip must be an involution");
    }

    #[test]
    fn tight_copy_strips_stride_padding() {
        // One pixel per row plus four padding bytes of stride
        let data = vec![
            9, 9, 9, 255, 0, 0, 0, 0, //
            8, 8, 8, 255, 0, 0, 0, 0, //
        ];
        let tight = frame(1, 2, 8, data).rgba_bytes();

        assert_eq!(tight, vec![9, 9, 9, 255, 8, 8, 8, 255]);
    }

    #[test]
    fn frame_channel_delivers_frames_in_order() {
        let (mut sender, mut receiver) = frame_channel();

        sender
            .try_send(frame(1, 1, 4, vec![1, 2, 3, 255]))
            .expect("send into an empty channel");
        sender
            .try_send(frame(1, 1, 4, vec![4, 5, 6, 255]))
            .expect("send within capacity");

        let first = receiver.try_next().unwrap().unwrap();
        let second = receiver.try_next().unwrap().unwrap();
        assert_eq!(first.data.as_ref(), &[1, 2, 3, 255]);
        assert_eq!(second.data.as_ref(), &[4, 5, 6, 255]);
    }

    #[test]
    fn parses_known_locations() {
        assert_eq!(CameraLocation::parse("front"), CameraLocation::Front);
        assert_eq!(CameraLocation::parse("back"), CameraLocation::Back);
        assert_eq!(CameraLocation::parse("external"), CameraLocation::External);
        assert_eq!(CameraLocation::parse(""), CameraLocation::Unknown);
        assert_eq!(CameraLocation::parse("side"), CameraLocation::Unknown);
    }

    #[test]
    fn front_and_unknown_qualify_as_user_facing() {
        assert!(CameraLocation::Front.faces_user());
        assert!(CameraLocation::Unknown.faces_user());
        assert!(!CameraLocation::Back.faces_user());
        assert!(!CameraLocation::External.faces_user());
    }
}
