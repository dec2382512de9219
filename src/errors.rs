// SPDX-License-Identifier: GPL-3.0-only
// Some variants reserved for future unified error handling
#![allow(dead_code)]

//! Error types for the mirror application

use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Clone)]
pub enum AppError {
    /// Camera-related errors
    Camera(CameraError),
    /// Camera permission errors
    Permission(PermissionError),
    /// Configuration errors
    Config(String),
}

/// Camera-specific errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    /// No camera devices found
    NoCameraFound,
    /// No front-facing camera among the detected devices
    FrontCameraUnavailable,
    /// Camera initialization failed
    InitializationFailed(String),
    /// Camera disconnected during streaming
    Disconnected,
}

/// Errors from the desktop portal permission request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionError {
    /// D-Bus transport or call failure
    Transport(String),
    /// Portal response could not be decoded
    MalformedResponse,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Camera(e) => write!(f, "Camera error: {}", e),
            AppError::Permission(e) => write!(f, "Permission error: {}", e),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::NoCameraFound => write!(f, "No camera devices found"),
            CameraError::FrontCameraUnavailable => {
                write!(f, "Front camera is not available")
            }
            CameraError::InitializationFailed(msg) => {
                write!(f, "Camera initialization failed: {}", msg)
            }
            CameraError::Disconnected => write!(f, "Camera disconnected"),
        }
    }
}

impl fmt::Display for PermissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionError::Transport(msg) => write!(f, "Portal request failed: {}", msg),
            PermissionError::MalformedResponse => write!(f, "Malformed portal response"),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for CameraError {}
impl std::error::Error for PermissionError {}

impl From<CameraError> for AppError {
    fn from(e: CameraError) -> Self {
        AppError::Camera(e)
    }
}

impl From<PermissionError> for AppError {
    fn from(e: PermissionError) -> Self {
        AppError::Permission(e)
    }
}

impl From<zbus::Error> for PermissionError {
    fn from(e: zbus::Error) -> Self {
        PermissionError::Transport(e.to_string())
    }
}
