// SPDX-License-Identifier: GPL-3.0-only

//! GStreamer preview pipeline over pipewiresrc

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use gstreamer::prelude::*;
use gstreamer_app::AppSink;
use gstreamer_video::VideoInfo;
use tracing::{debug, error, info, warn};

use super::super::CameraSession;
use super::super::types::{CameraDevice, CameraFrame, FrameSender};
use crate::constants::{pipeline as pipeline_consts, timing};
use crate::errors::CameraError;

static FRAME_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Live preview pipeline for one PipeWire camera.
///
/// Frames are converted to RGBA in-pipeline and pushed into a bounded
/// channel; when the application falls behind, stale frames are dropped at
/// the sink instead of queueing.
pub struct PreviewPipeline {
    pipeline: gstreamer::Pipeline,
    appsink: AppSink,
}

impl PreviewPipeline {
    /// Launch a preview on `device`, delivering frames to `sink`.
    pub fn open(device: &CameraDevice, sink: FrameSender) -> Result<Self, CameraError> {
        info!(device = %device.name, "Creating preview pipeline");

        gstreamer::init().map_err(|e| CameraError::InitializationFailed(e.to_string()))?;
        gstreamer::ElementFactory::find("pipewiresrc").ok_or_else(|| {
            CameraError::InitializationFailed("pipewiresrc element not available".to_string())
        })?;

        let description = pipeline_description(&device.path);
        let pipeline = launch_to_playing(&description)?;

        let appsink = pipeline
            .by_name("sink")
            .ok_or_else(|| {
                CameraError::InitializationFailed("appsink missing from pipeline".to_string())
            })?
            .dynamic_cast::<AppSink>()
            .map_err(|_| {
                CameraError::InitializationFailed("element `sink` is not an appsink".to_string())
            })?;

        configure_appsink(&appsink);
        attach_frame_callback(&appsink, sink);

        // Give the device a moment to settle; async transitions were already
        // accepted at launch, so a non-Playing state here is only noteworthy
        let (result, state, pending) = pipeline.state(gstreamer::ClockTime::from_seconds(
            timing::START_TIMEOUT_SECS,
        ));
        debug!(?result, ?state, ?pending, "Pipeline state after start");
        if state != gstreamer::State::Playing {
            warn!(?state, "Pipeline is not in PLAYING state yet");
        }

        info!("Preview pipeline running");
        Ok(Self { pipeline, appsink })
    }

    fn teardown(&self) {
        // Clear callbacks first so no new frames are produced while the
        // pipeline shuts down
        self.appsink
            .set_callbacks(gstreamer_app::AppSinkCallbacks::builder().build());

        if let Err(e) = self.pipeline.set_state(gstreamer::State::Null) {
            debug!(error = %e, "Failed to set pipeline to NULL");
            return;
        }

        let (result, state, _) = self.pipeline.state(gstreamer::ClockTime::from_seconds(
            timing::STOP_TIMEOUT_SECS,
        ));
        match result {
            Ok(_) => info!(?state, "Preview pipeline stopped"),
            Err(e) => debug!(error = ?e, ?state, "Pipeline stop had issues"),
        }
    }
}

impl CameraSession for PreviewPipeline {
    fn stop(&mut self) {
        info!("Stopping preview pipeline");
        self.teardown();
    }
}

impl Drop for PreviewPipeline {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Launch description for a preview on the given device path.
///
/// `decodebin` passes raw video through untouched and decodes compressed
/// streams (MJPEG webcams), so one description covers every device.
fn pipeline_description(device_path: &str) -> String {
    format!(
        "pipewiresrc {}do-timestamp=true ! \
         queue max-size-buffers={buffers} leaky=downstream ! \
         decodebin ! \
         videoconvert ! \
         video/x-raw,format={format} ! \
         queue max-size-buffers={buffers} leaky=downstream ! \
         appsink name=sink",
        source_target(device_path),
        buffers = pipeline_consts::MAX_BUFFERS,
        format = pipeline_consts::OUTPUT_FORMAT,
    )
}

/// pipewiresrc property selecting the device, trailing space included.
fn source_target(device_path: &str) -> String {
    if device_path.is_empty() {
        // Empty path = PipeWire auto-selects its default camera
        String::new()
    } else if let Some(serial) = device_path.strip_prefix("pipewire-serial-") {
        format!("target-object={} ", serial)
    } else if let Some(node_id) = device_path.strip_prefix("pipewire-") {
        format!("target-object={} ", node_id)
    } else {
        format!("path={} ", device_path)
    }
}

/// Parse and start a pipeline, surfacing bus errors when it refuses to play.
fn launch_to_playing(description: &str) -> Result<gstreamer::Pipeline, CameraError> {
    debug!(pipeline = %description, "Launching pipeline");

    let element = gstreamer::parse::launch(description)
        .map_err(|e| CameraError::InitializationFailed(e.to_string()))?;
    let pipeline = element
        .dynamic_cast::<gstreamer::Pipeline>()
        .map_err(|_| CameraError::InitializationFailed("not a pipeline".to_string()))?;

    if let Err(e) = pipeline.set_state(gstreamer::State::Playing) {
        let detail = drain_bus_errors(&pipeline).unwrap_or_else(|| e.to_string());
        let _ = pipeline.set_state(gstreamer::State::Null);
        let _ = pipeline.state(gstreamer::ClockTime::from_seconds(
            timing::STOP_TIMEOUT_SECS,
        ));
        return Err(CameraError::InitializationFailed(detail));
    }

    let (result, state, pending) = pipeline.state(gstreamer::ClockTime::from_mseconds(
        timing::STATE_CHANGE_TIMEOUT_MS,
    ));

    let playing = result.is_ok() && state == gstreamer::State::Playing;
    // Accept async transitions for fast startup; frames arrive once the
    // device is ready
    let transitioning = matches!(result, Ok(gstreamer::StateChangeSuccess::Async))
        && pending == gstreamer::State::Playing;

    if playing || transitioning {
        debug!(?state, ?pending, "Pipeline accepted");
        Ok(pipeline)
    } else {
        error!(?state, ?result, ?pending, "Pipeline failed to reach PLAYING");
        let detail = drain_bus_errors(&pipeline)
            .unwrap_or_else(|| format!("pipeline stuck in state {:?}", state));
        let _ = pipeline.set_state(gstreamer::State::Null);
        let _ = pipeline.state(gstreamer::ClockTime::from_seconds(
            timing::STOP_TIMEOUT_SECS,
        ));
        Err(CameraError::InitializationFailed(detail))
    }
}

fn drain_bus_errors(pipeline: &gstreamer::Pipeline) -> Option<String> {
    let bus = pipeline.bus()?;
    let mut details = Vec::new();

    while let Some(message) = bus.pop_filtered(&[gstreamer::MessageType::Error]) {
        if let gstreamer::MessageView::Error(err) = message.view() {
            error!(
                source = ?err.src().map(|s| s.path_string()),
                error = %err.error(),
                debug = ?err.debug(),
                "Pipeline bus error"
            );
            details.push(err.error().to_string());
        }
    }

    if details.is_empty() {
        None
    } else {
        Some(details.join("; "))
    }
}

fn configure_appsink(appsink: &AppSink) {
    appsink.set_property("emit-signals", true);
    appsink.set_property("sync", false); // Disable sync for lowest latency
    appsink.set_property("max-buffers", pipeline_consts::MAX_BUFFERS);
    appsink.set_property("drop", true); // Drop old frames if processing is slow
    appsink.set_property("enable-last-sample", false);
}

fn attach_frame_callback(appsink: &AppSink, sink: FrameSender) {
    let mut sender = sink;

    appsink.set_callbacks(
        gstreamer_app::AppSinkCallbacks::builder()
            .new_sample(move |appsink| {
                let frame_num = FRAME_COUNTER.fetch_add(1, Ordering::Relaxed);

                let sample = appsink.pull_sample().map_err(|e| {
                    if frame_num % 30 == 0 {
                        error!(frame = frame_num, error = ?e, "Failed to pull sample");
                    }
                    gstreamer::FlowError::Eos
                })?;

                let buffer = sample.buffer().ok_or(gstreamer::FlowError::Error)?;

                // Incomplete DMA transfers surface as corrupted buffers;
                // skip them rather than flashing garbage
                if buffer.flags().contains(gstreamer::BufferFlags::CORRUPTED) {
                    if frame_num % 30 == 0 {
                        warn!(frame = frame_num, "Buffer marked as corrupted, skipping");
                    }
                    return Err(gstreamer::FlowError::Error);
                }

                let caps = sample.caps().ok_or(gstreamer::FlowError::Error)?;
                let video_info =
                    VideoInfo::from_caps(caps).map_err(|_| gstreamer::FlowError::Error)?;
                let map = buffer
                    .map_readable()
                    .map_err(|_| gstreamer::FlowError::Error)?;

                let frame = CameraFrame {
                    width: video_info.width(),
                    height: video_info.height(),
                    stride: video_info.stride()[0] as u32,
                    data: Arc::from(map.as_slice()),
                };

                if let Err(e) = sender.try_send(frame) {
                    // Dropping frames here is normal when the UI is busy
                    if frame_num % 30 == 0 {
                        debug!(frame = frame_num, error = ?e, "Frame dropped (channel full)");
                    }
                }

                Ok(gstreamer::FlowSuccess::Ok)
            })
            .build(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_path_lets_pipewire_pick_the_device() {
        assert_eq!(source_target(""), "");
    }

    #[test]
    fn serial_paths_become_target_objects() {
        assert_eq!(source_target("pipewire-serial-2146"), "target-object=2146 ");
        assert_eq!(source_target("pipewire-46"), "target-object=46 ");
    }

    #[test]
    fn other_paths_pass_through_as_path_property() {
        assert_eq!(
            source_target("v4l2:/dev/video0"),
            "path=v4l2:/dev/video0 "
        );
    }

    #[test]
    fn description_converts_to_rgba_before_the_sink() {
        let description = pipeline_description("");
        assert!(description.starts_with("pipewiresrc do-timestamp=true"));
        assert!(description.contains("format=RGBA"));
        assert!(description.ends_with("appsink name=sink"));
    }
}
