// SPDX-License-Identifier: GPL-3.0-only

//! PipeWire camera discovery
//!
//! Video source nodes are read from `pw-cli ls Node`. PipeWire handles all
//! device access and format negotiation internally; discovery only needs a
//! name, a target path, and the reported device location.

use tracing::{debug, info};

use super::super::types::{CameraDevice, CameraLocation};
use crate::errors::CameraError;

/// Enumerate cameras visible through PipeWire.
///
/// When listing is unavailable (no `pw-cli`, or nothing parsed) a single
/// auto-select device with an empty path is returned so PipeWire can pick
/// its default camera.
pub fn enumerate_cameras() -> Result<Vec<CameraDevice>, CameraError> {
    if let Err(e) = gstreamer::init() {
        return Err(CameraError::InitializationFailed(format!(
            "GStreamer init failed: {}",
            e
        )));
    }

    if gstreamer::ElementFactory::find("pipewiresrc").is_none() {
        return Err(CameraError::InitializationFailed(
            "pipewiresrc element not available".to_string(),
        ));
    }

    if let Some(cameras) = list_with_pw_cli() {
        debug!(count = cameras.len(), "Enumerated cameras via pw-cli");
        return Ok(cameras);
    }

    info!("Using PipeWire auto-selection (default camera)");
    Ok(vec![CameraDevice {
        name: "Default Camera (PipeWire)".to_string(),
        path: String::new(), // Empty path = PipeWire auto-selects
        location: CameraLocation::Unknown,
    }])
}

fn list_with_pw_cli() -> Option<Vec<CameraDevice>> {
    let output = std::process::Command::new("pw-cli")
        .args(["ls", "Node"])
        .output()
        .ok()?;

    if !output.status.success() {
        debug!("pw-cli command failed");
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let cameras: Vec<CameraDevice> = parse_video_nodes(&stdout)
        .into_iter()
        .map(|node| node.into_device())
        .collect();

    if cameras.is_empty() { None } else { Some(cameras) }
}

/// Properties of one video source node from `pw-cli ls Node` output.
#[derive(Debug, Default, PartialEq, Eq)]
struct VideoNode {
    id: String,
    serial: Option<String>,
    name: String,
    location: Option<String>,
}

impl VideoNode {
    fn into_device(self) -> CameraDevice {
        // Prefer object.serial for the target-object property, fall back
        // to the node id
        let path = match &self.serial {
            Some(serial) => format!("pipewire-serial-{}", serial),
            None => format!("pipewire-{}", self.id),
        };

        // `pw-cli ls` omits the libcamera properties; query the node when
        // the listing did not carry a location
        let location = match self.location.as_deref() {
            Some(raw) => CameraLocation::parse(raw),
            None => query_node_location(&self.id),
        };

        debug!(id = %self.id, name = %self.name, path = %path, location = %location, "Found video camera");
        CameraDevice {
            name: self.name,
            path,
            location,
        }
    }
}

/// Parse `pw-cli ls Node` output into video source nodes.
fn parse_video_nodes(listing: &str) -> Vec<VideoNode> {
    struct Block {
        id: String,
        serial: Option<String>,
        description: Option<String>,
        nick: Option<String>,
        location: Option<String>,
        is_video_source: bool,
    }

    impl Block {
        fn finish(self) -> Option<VideoNode> {
            if !self.is_video_source {
                return None;
            }
            Some(VideoNode {
                id: self.id,
                serial: self.serial,
                name: self.description.or(self.nick)?,
                location: self.location,
            })
        }
    }

    let mut nodes = Vec::new();
    let mut block: Option<Block> = None;

    for line in listing.lines() {
        let trimmed = line.trim();

        // Node boundary: `id 76, type PipeWire:Interface:Node/3`
        if trimmed.starts_with("id ") && trimmed.contains("type PipeWire:Interface:Node") {
            if let Some(done) = block.take() {
                nodes.extend(done.finish());
            }

            if let Some(rest) = trimmed.strip_prefix("id ")
                && let Some(id) = rest.split(',').next()
            {
                block = Some(Block {
                    id: id.trim().to_string(),
                    serial: None,
                    description: None,
                    nick: None,
                    location: None,
                    is_video_source: false,
                });
            }
            continue;
        }

        let Some(current) = block.as_mut() else {
            continue;
        };

        if trimmed.contains("media.class") && trimmed.contains("\"Video/Source\"") {
            current.is_video_source = true;
        } else if trimmed.contains("object.serial") {
            current.serial = extract_quoted_value(trimmed);
        } else if trimmed.contains("node.description") {
            current.description = extract_quoted_value(trimmed);
        } else if trimmed.contains("node.nick") {
            current.nick = extract_quoted_value(trimmed);
        } else if trimmed.contains("api.libcamera.location") {
            current.location = extract_quoted_value(trimmed);
        }
    }

    if let Some(done) = block.take() {
        nodes.extend(done.finish());
    }

    nodes
}

/// Extract quoted value from a property line (e.g., 'property = "value"' -> "value")
fn extract_quoted_value(line: &str) -> Option<String> {
    let start = line.find('"')?;
    let end = line[start + 1..].find('"')?;
    Some(line[start + 1..start + 1 + end].to_string())
}

/// Query the libcamera location for a node with `pw-cli info`; the listing
/// output does not include the api.libcamera.* properties.
fn query_node_location(node_id: &str) -> CameraLocation {
    let output = match std::process::Command::new("pw-cli")
        .args(["info", node_id])
        .output()
    {
        Ok(output) if output.status.success() => output,
        _ => {
            debug!(node_id, "Failed to query node info for location");
            return CameraLocation::Unknown;
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout);
    for line in stdout.lines() {
        let trimmed = line.trim();
        if trimmed.contains("api.libcamera.location")
            && let Some(value) = extract_quoted_value(trimmed)
        {
            debug!(node_id, location = %value, "Found location from pw-cli info");
            return CameraLocation::parse(&value);
        }
    }

    CameraLocation::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
	id 31, type PipeWire:Interface:Node/3
 		object.serial = "31"
 		factory.id = "10"
 		priority.driver = "8000"
 		node.name = "Dummy-Driver"
	id 46, type PipeWire:Interface:Node/3
 		object.serial = "2146"
 		node.description = "Laptop Webcam Module (V4L2)"
 		node.nick = "Laptop Webcam Module"
 		media.class = "Video/Source"
	id 51, type PipeWire:Interface:Node/3
 		object.serial = "2191"
 		node.description = "Rear Sensor"
 		media.class = "Video/Source"
 		api.libcamera.location = "back"
	id 60, type PipeWire:Interface:Node/3
 		node.nick = "Nicknamed Source"
 		media.class = "Video/Source"
"#;

    #[test]
    fn parses_only_video_source_nodes() {
        let nodes = parse_video_nodes(LISTING);
        assert_eq!(nodes.len(), 3, "driver node must be skipped");
    }

    #[test]
    fn captures_serial_name_and_location() {
        let nodes = parse_video_nodes(LISTING);

        assert_eq!(nodes[0].id, "46");
        assert_eq!(nodes[0].serial.as_deref(), Some("2146"));
        assert_eq!(nodes[0].name, "Laptop Webcam Module (V4L2)");
        assert_eq!(nodes[0].location, None);

        assert_eq!(nodes[1].location.as_deref(), Some("back"));
    }

    #[test]
    fn falls_back_to_node_nick_when_description_missing() {
        let nodes = parse_video_nodes(LISTING);
        assert_eq!(nodes[2].name, "Nicknamed Source");
        assert_eq!(nodes[2].serial, None);
    }

    #[test]
    fn extracts_quoted_property_values() {
        assert_eq!(
            extract_quoted_value("node.description = \"A Camera\""),
            Some("A Camera".to_string())
        );
        assert_eq!(extract_quoted_value("no quotes here"), None);
    }
}
