// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands
//!
//! Provides the `list` subcommand, which prints the cameras the provider
//! can see along with their identity and reported location.

use realyou::backends::camera::{CameraProvider as _, platform_provider};

/// List all available cameras
pub fn list_cameras() -> Result<(), Box<dyn std::error::Error>> {
    let cameras = platform_provider().enumerate()?;

    if cameras.is_empty() {
        println!("No cameras found.");
        return Ok(());
    }

    println!("Available cameras:");
    println!();
    for (index, camera) in cameras.iter().enumerate() {
        println!("  [{}] {}", index, camera.name);
        if !camera.path.is_empty() {
            println!("      Target: {}", camera.path);
        }
        println!("      Location: {}", camera.location);
        println!();
    }

    Ok(())
}
