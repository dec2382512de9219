// SPDX-License-Identifier: GPL-3.0-only

//! Camera access through the XDG desktop portal.
//!
//! Talks to `org.freedesktop.portal.Camera` on the session bus with a plain
//! [`zbus::Proxy`]. The grant/deny decision lives entirely with the portal;
//! this module only transports it.

use std::collections::HashMap;

use futures::StreamExt;
use tracing::{debug, info};
use zbus::zvariant::{OwnedObjectPath, OwnedValue, Value};

use crate::errors::PermissionError;

const PORTAL_DESTINATION: &str = "org.freedesktop.portal.Desktop";
const PORTAL_PATH: &str = "/org/freedesktop/portal/desktop";
const CAMERA_INTERFACE: &str = "org.freedesktop.portal.Camera";
const REQUEST_INTERFACE: &str = "org.freedesktop.portal.Request";

/// Outcome of a portal camera access request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionDecision {
    /// Access granted; the camera may be opened.
    Granted,
    /// The user dismissed the portal dialog.
    Dismissed,
    /// The portal refused access for another reason.
    Refused,
}

/// Whether the portal reports any camera attached to the system.
pub async fn is_camera_present() -> Result<bool, PermissionError> {
    let connection = zbus::Connection::session().await?;
    let proxy = camera_proxy(&connection).await?;

    let present: bool = proxy.get_property("IsCameraPresent").await?;
    debug!(present, "Portal camera presence");
    Ok(present)
}

/// Ask the portal for camera access.
///
/// Resolves once the portal's request object emits its `Response` signal. A
/// grant already stored by the portal resolves immediately without showing a
/// dialog. Response codes: 0 granted, 1 dismissed by the user, anything else
/// refused.
pub async fn request_camera_access() -> Result<PermissionDecision, PermissionError> {
    let connection = zbus::Connection::session().await?;
    let proxy = camera_proxy(&connection).await?;

    let token = format!("realyou_{}", uuid::Uuid::new_v4().simple());
    let expected_path = expected_request_path(&connection, &token)?;

    // Subscribe before calling so an instant response cannot be missed
    let request = request_proxy(&connection, expected_path.clone()).await?;
    let mut responses = request.receive_signal("Response").await?;

    let mut options: HashMap<&str, Value> = HashMap::new();
    options.insert("handle_token", Value::from(token.as_str()));

    let handle: OwnedObjectPath = proxy.call("AccessCamera", &(options,)).await?;
    info!(handle = %handle, "Camera access requested");

    // Portals predating version 2 of the request protocol return a handle
    // that differs from the token-derived path; follow the returned one.
    if handle.as_str() != expected_path {
        let request = request_proxy(&connection, handle.to_string()).await?;
        responses = request.receive_signal("Response").await?;
    }

    let message = responses
        .next()
        .await
        .ok_or(PermissionError::MalformedResponse)?;
    let body = message.body();
    let (code, _results): (u32, HashMap<String, OwnedValue>) = body
        .deserialize()
        .map_err(|_| PermissionError::MalformedResponse)?;

    info!(code, "Portal access response");
    Ok(match code {
        0 => PermissionDecision::Granted,
        1 => PermissionDecision::Dismissed,
        _ => PermissionDecision::Refused,
    })
}

async fn camera_proxy(connection: &zbus::Connection) -> Result<zbus::Proxy<'_>, PermissionError> {
    let proxy = zbus::Proxy::new(
        connection,
        PORTAL_DESTINATION,
        PORTAL_PATH,
        CAMERA_INTERFACE,
    )
    .await?;
    Ok(proxy)
}

async fn request_proxy(
    connection: &zbus::Connection,
    path: String,
) -> Result<zbus::Proxy<'_>, PermissionError> {
    let proxy = zbus::Proxy::new(connection, PORTAL_DESTINATION, path, REQUEST_INTERFACE).await?;
    Ok(proxy)
}

/// The request object path the portal derives from our unique name and the
/// handle token: `/org/freedesktop/portal/desktop/request/SENDER/TOKEN`.
fn expected_request_path(
    connection: &zbus::Connection,
    token: &str,
) -> Result<String, PermissionError> {
    let unique = connection
        .unique_name()
        .ok_or_else(|| PermissionError::Transport("connection has no unique name".to_string()))?;
    let sender = unique.as_str().trim_start_matches(':').replace('.', "_");

    Ok(format!(
        "/org/freedesktop/portal/desktop/request/{}/{}",
        sender, token
    ))
}
