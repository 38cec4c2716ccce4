// SPDX-License-Identifier: MPL-2.0
//! Gallery manifests: a small TOML file standing in for the storefront host.
//!
//! The real product constructs a session from a selected catalog entry; on
//! the desktop the same construction is driven by a manifest listing the
//! title and image locators.

use super::session::{GallerySession, ImageLocator};
use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Parsed gallery manifest.
///
/// ```toml
/// title = "Boiler X"
/// images = [
///     "https://img.example/boiler-x-front.jpg",
///     "photos/boiler-x-side.jpg",
/// ]
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GalleryManifest {
    #[serde(default)]
    pub title: Option<String>,
    pub images: Vec<String>,
}

impl GalleryManifest {
    /// Reads and parses a manifest file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| Error::Manifest(e.to_string()))
    }

    /// Builds a manifest directly from raw locator strings (CLI arguments).
    pub fn from_raw_images(images: Vec<String>) -> Self {
        Self {
            title: None,
            images,
        }
    }

    /// Opens a session over the manifest's images.
    /// Fails with [`Error::EmptyImageSet`] when the manifest lists none.
    pub fn into_session(self) -> Result<GallerySession> {
        let images = self
            .images
            .iter()
            .map(|raw| ImageLocator::parse(raw))
            .collect();
        GallerySession::open(images, self.title, None)
    }
}
