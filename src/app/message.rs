// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::gallery::ImageLocator;
use crate::gallery::SessionId;
use crate::ui::notifications;
use crate::ui::viewer::component;
use std::path::PathBuf;
use std::time::Instant;

/// Launch parameters parsed from the command line.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// Override for the UI language (`--lang ru`).
    pub lang: Option<String>,
    /// Positional arguments: a manifest file path, or image URLs/paths to
    /// open directly.
    pub inputs: Vec<String>,
}

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Viewer(component::Message),
    Notification(notifications::NotificationMessage),
    /// Periodic tick driving animations and toast auto-dismiss.
    Tick(Instant),
    /// Trigger the manifest open dialog from the empty state.
    OpenManifestDialog,
    /// Result from the manifest open dialog.
    OpenManifestDialogResult(Option<PathBuf>),
    /// Result from the single-image save dialog.
    SaveDialogResult {
        session_id: SessionId,
        locator: ImageLocator,
        path: Option<PathBuf>,
    },
    /// Result from the batch download directory dialog.
    SaveAllDialogResult {
        session_id: SessionId,
        images: Vec<ImageLocator>,
        title: Option<String>,
        directory: Option<PathBuf>,
    },
}
