// SPDX-License-Identifier: MPL-2.0
//! Gallery session state: the ordered image set and the current position.
//!
//! A `GallerySession` is the single source of truth for what the viewer is
//! showing. It is constructed when the user activates a product's imagery
//! and discarded entirely on close; nothing persists between sessions.

use crate::error::{Error, Result};
use std::fmt;
use std::path::PathBuf;

/// Unique identifier for one gallery session.
///
/// Async completions (image fetches, downloads) carry the id of the session
/// that started them; results whose session is no longer active are dropped
/// instead of mutating dead state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl SessionId {
    /// Creates a new unique session ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Most recent navigation direction, used only to pick enter/exit animation
/// sides. Not part of persistent state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Sign of the horizontal axis an incoming image enters from:
    /// forward navigation enters from the right (+1), backward from the left (-1).
    #[must_use]
    pub fn enter_sign(self) -> f32 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }
}

/// An address that resolves to image byte content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageLocator {
    /// Remote image fetched over HTTP(S).
    Remote(String),
    /// Local image read from disk.
    Local(PathBuf),
}

impl ImageLocator {
    /// Parses a raw string into a locator. Strings with an `http://` or
    /// `https://` scheme become remote locators, everything else a path.
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            ImageLocator::Remote(raw.to_string())
        } else {
            ImageLocator::Local(PathBuf::from(raw))
        }
    }

    /// Returns the lowercase file extension of the locator, if any.
    /// Query strings on remote URLs are stripped first.
    pub fn extension(&self) -> Option<String> {
        let name = match self {
            ImageLocator::Remote(url) => {
                let trimmed = url.split(['?', '#']).next().unwrap_or(url);
                trimmed.rsplit('/').next().unwrap_or(trimmed).to_string()
            }
            ImageLocator::Local(path) => path.file_name()?.to_string_lossy().to_string(),
        };
        let (_, ext) = name.rsplit_once('.')?;
        if ext.is_empty() || ext.contains('/') {
            None
        } else {
            Some(ext.to_ascii_lowercase())
        }
    }
}

impl fmt::Display for ImageLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageLocator::Remote(url) => write!(f, "{url}"),
            ImageLocator::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Ephemeral state of one open gallery viewing instance.
#[derive(Debug, Clone, PartialEq)]
pub struct GallerySession {
    id: SessionId,
    images: Vec<ImageLocator>,
    title: Option<String>,
    current_index: usize,
    direction: Option<Direction>,
    shared_transition_key: Option<String>,
    closed: bool,
    downloading_all: bool,
}

impl GallerySession {
    /// Opens a session over a non-empty image set.
    ///
    /// Opening with zero images is a caller error and is refused.
    pub fn open(
        images: Vec<ImageLocator>,
        title: Option<String>,
        shared_transition_key: Option<String>,
    ) -> Result<Self> {
        if images.is_empty() {
            return Err(Error::EmptyImageSet);
        }
        Ok(Self {
            id: SessionId::new(),
            images,
            title,
            current_index: 0,
            direction: None,
            shared_transition_key,
            closed: false,
            downloading_all: false,
        })
    }

    /// Sets the starting position, e.g. when reopening on a specific thumbnail.
    /// Indices beyond the set wrap modulo its length.
    #[must_use]
    pub fn with_initial_index(mut self, index: usize) -> Self {
        self.current_index = index % self.images.len();
        self
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn shared_transition_key(&self) -> Option<&str> {
        self.shared_transition_key.as_deref()
    }

    pub fn images(&self) -> &[ImageLocator] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// A session is never empty; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// 1-based position of the current image, as shown in the header.
    pub fn current_position(&self) -> usize {
        self.current_index + 1
    }

    pub fn current(&self) -> &ImageLocator {
        &self.images[self.current_index]
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Header counter, e.g. `2 / 5`.
    pub fn page_label(&self) -> String {
        format!("{} / {}", self.current_position(), self.len())
    }

    /// Advances to the next image, wrapping circularly.
    /// With a single image this is a well-defined no-op on the index.
    pub fn next(&mut self) {
        self.current_index = (self.current_index + 1) % self.images.len();
        self.direction = Some(Direction::Forward);
    }

    /// Moves to the previous image, wrapping circularly.
    pub fn previous(&mut self) {
        let len = self.images.len();
        self.current_index = (self.current_index + len - 1) % len;
        self.direction = Some(Direction::Backward);
    }

    /// Marks the session closed. Returns `true` only on the first call so
    /// the host emits exactly one dismissal notification.
    pub fn close(&mut self) -> bool {
        if self.closed {
            return false;
        }
        self.closed = true;
        true
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Claims the batch-download busy flag. Returns `false` when a batch is
    /// already in flight or the session is closed.
    pub fn begin_batch_download(&mut self) -> bool {
        if self.downloading_all || self.closed {
            return false;
        }
        self.downloading_all = true;
        true
    }

    /// Releases the batch-download busy flag.
    pub fn finish_batch_download(&mut self) {
        self.downloading_all = false;
    }

    pub fn is_downloading_all(&self) -> bool {
        self.downloading_all
    }
}
