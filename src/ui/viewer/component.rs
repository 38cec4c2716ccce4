// SPDX-License-Identifier: MPL-2.0
//! Gallery viewer component: orchestrates the session, gestures,
//! transitions and download requests behind a message/effect interface.
//!
//! The component is a pure state machine. It never performs IO itself;
//! fetches and downloads are requested through [`Effect`] values that the
//! application shell turns into tasks.

use crate::gallery::download::BatchOutcome;
use crate::gallery::{
    download, Direction, DragTracker, GallerySession, GestureThresholds, ImageLocator, SessionId,
    SwipeVerdict,
};
use crate::gallery::transition::{SharedElementTransition, Slide, SlideTransition};
use crate::ui::notifications::Notification;
use iced::widget::image::Handle;
use iced::{Point, Rectangle, Vector};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Fallback extension when neither the bytes nor the locator reveal one.
const FALLBACK_EXTENSION: &str = "jpg";

/// Viewer component state.
#[derive(Debug, Default)]
pub struct State {
    session: Option<GallerySession>,
    thresholds: GestureThresholds,
    transition: SlideTransition,
    shared: Option<SharedElementTransition>,
    drag: Option<DragTracker>,
    cursor: Option<Point>,
    handles: HashMap<usize, Handle>,
}

/// Messages for the viewer component.
#[derive(Debug, Clone)]
pub enum Message {
    /// Advance to the next image (arrow button or Right key).
    NavigateNext,
    /// Go back to the previous image (arrow button or Left key).
    NavigatePrevious,
    /// Close the viewer (close button or Escape).
    CloseRequested,
    /// The darkened backdrop around the image was clicked.
    BackdropPressed,
    /// The header bar background was clicked; swallowed so the press does
    /// not fall through to the backdrop.
    HeaderPressed,
    /// Pointer pressed on the image; a drag may follow.
    ImagePressed,
    /// Pointer released over the image.
    ImageReleased,
    /// Pointer released anywhere; ends a drag that left the image bounds.
    PointerReleased,
    /// Pointer moved within the window.
    CursorMoved(Point),
    /// Animation frame with the elapsed time since the previous one.
    Tick(Duration),
    /// An image fetch completed.
    ImageFetched {
        session_id: SessionId,
        index: usize,
        result: Result<Handle, String>,
    },
    /// The user asked to save the image on screen.
    DownloadCurrentRequested,
    /// The user asked to save every image of the session.
    DownloadAllRequested,
    /// A single-image download finished successfully.
    DownloadSaved {
        session_id: SessionId,
        filename: String,
    },
    /// A single-image download failed.
    DownloadFailed {
        session_id: SessionId,
        error_key: &'static str,
    },
    /// The batch download finished, possibly with partial failures.
    BatchDownloadFinished {
        session_id: SessionId,
        outcome: BatchOutcome,
    },
    /// The destination dialog was cancelled before the batch started.
    BatchDownloadCancelled { session_id: SessionId },
}

/// A request to fetch one image's bytes.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub session_id: SessionId,
    pub index: usize,
    pub locator: ImageLocator,
}

/// Effects produced by the viewer for the application shell to execute.
#[derive(Debug, Clone)]
pub enum Effect {
    /// No effect.
    None,
    /// The session ended; the shell should return to its previous screen.
    Closed,
    /// Fetch these images asynchronously.
    FetchImages(Vec<FetchRequest>),
    /// Save the current image, asking the user where to put it.
    DownloadCurrent {
        session_id: SessionId,
        locator: ImageLocator,
        suggested_name: String,
    },
    /// Save every image of the session into a directory of the user's choice.
    DownloadAll {
        session_id: SessionId,
        images: Vec<ImageLocator>,
        title: Option<String>,
    },
    /// Show a toast notification.
    ShowNotification(Notification),
}

impl State {
    #[must_use]
    pub fn new(thresholds: GestureThresholds) -> Self {
        Self {
            thresholds,
            ..Self::default()
        }
    }

    /// Opens a gallery session, replacing any previous one.
    ///
    /// `origin_bounds` is the on-screen rectangle the gallery expands from,
    /// when the host can provide one; it drives the shared-element opening
    /// transition.
    pub fn open(&mut self, session: GallerySession, origin_bounds: Option<Rectangle>) -> Effect {
        self.handles.clear();
        self.drag = None;
        self.transition = SlideTransition::new();
        self.transition.set_centered(session.current_index());
        self.shared = match (session.shared_transition_key(), origin_bounds) {
            (Some(key), Some(from)) => Some(SharedElementTransition::new(key, from)),
            _ => None,
        };

        let requests = self.fetch_requests_around(&session, session.current_index());
        self.session = Some(session);
        if requests.is_empty() {
            Effect::None
        } else {
            Effect::FetchImages(requests)
        }
    }

    /// Handle a viewer message.
    #[allow(clippy::needless_pass_by_value)]
    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            // An active drag owns navigation until its release verdict; an
            // arrow press racing the release must not add a second step.
            Message::NavigateNext | Message::NavigatePrevious if self.drag.is_some() => {
                Effect::None
            }
            Message::NavigateNext => self.navigate(Direction::Forward),
            Message::NavigatePrevious => self.navigate(Direction::Backward),
            Message::CloseRequested | Message::BackdropPressed => self.close(),
            Message::HeaderPressed => Effect::None,
            Message::ImagePressed => {
                if let Some(position) = self.cursor {
                    self.drag = Some(DragTracker::begin(position, Instant::now()));
                }
                Effect::None
            }
            Message::ImageReleased | Message::PointerReleased => self.finish_drag(),
            Message::CursorMoved(position) => {
                self.cursor = Some(position);
                if let Some(drag) = &mut self.drag {
                    drag.update(position, Instant::now());
                }
                Effect::None
            }
            Message::Tick(elapsed) => {
                self.transition.tick(elapsed);
                if let Some(shared) = &mut self.shared {
                    if !shared.tick(elapsed) {
                        self.shared = None;
                    }
                }
                Effect::None
            }
            Message::ImageFetched {
                session_id,
                index,
                result,
            } => self.image_fetched(session_id, index, result),
            Message::DownloadCurrentRequested => self.download_current(),
            Message::DownloadAllRequested => self.download_all(),
            Message::DownloadSaved {
                session_id,
                filename,
            } => {
                if !self.is_current_session(session_id) {
                    return Effect::None;
                }
                Effect::ShowNotification(
                    Notification::success("notification-download-saved")
                        .with_arg("filename", filename),
                )
            }
            Message::DownloadFailed {
                session_id,
                error_key,
            } => {
                if !self.is_current_session(session_id) {
                    return Effect::None;
                }
                Effect::ShowNotification(Notification::error(error_key))
            }
            Message::BatchDownloadFinished {
                session_id,
                outcome,
            } => self.batch_finished(session_id, outcome),
            Message::BatchDownloadCancelled { session_id } => {
                if let Some(session) = &mut self.session {
                    if session.id() == session_id {
                        session.finish_batch_download();
                    }
                }
                Effect::None
            }
        }
    }

    fn navigate(&mut self, direction: Direction) -> Effect {
        let Some(session) = &mut self.session else {
            return Effect::None;
        };
        if session.len() < 2 {
            return Effect::None;
        }

        let from = session.current_index();
        match direction {
            Direction::Forward => session.next(),
            Direction::Backward => session.previous(),
        }
        let to = session.current_index();
        self.transition.begin(Some(from), to, direction);

        let requests = self.fetch_requests_around_current();
        if requests.is_empty() {
            Effect::None
        } else {
            Effect::FetchImages(requests)
        }
    }

    fn close(&mut self) -> Effect {
        let Some(session) = &mut self.session else {
            return Effect::None;
        };
        if !session.close() {
            return Effect::None;
        }
        self.session = None;
        self.drag = None;
        self.shared = None;
        self.handles.clear();
        Effect::Closed
    }

    fn finish_drag(&mut self) -> Effect {
        let Some(tracker) = self.drag.take() else {
            return Effect::None;
        };
        match self.thresholds.evaluate(tracker.release()) {
            SwipeVerdict::PageForward => self.navigate(Direction::Forward),
            SwipeVerdict::PageBackward => self.navigate(Direction::Backward),
            SwipeVerdict::Dismiss => self.close(),
            SwipeVerdict::None => Effect::None,
        }
    }

    fn image_fetched(
        &mut self,
        session_id: SessionId,
        index: usize,
        result: Result<Handle, String>,
    ) -> Effect {
        // Results stamped with a superseded session are discarded.
        if !self.is_current_session(session_id) {
            return Effect::None;
        }
        match result {
            Ok(handle) => {
                self.handles.insert(index, handle);
                Effect::None
            }
            Err(_) => {
                Effect::ShowNotification(Notification::error("notification-image-load-failed"))
            }
        }
    }

    fn download_current(&self) -> Effect {
        let Some(session) = &self.session else {
            return Effect::None;
        };
        if session.is_downloading_all() {
            return Effect::None;
        }
        let locator = session.current().clone();
        let ext = locator
            .extension()
            .unwrap_or_else(|| FALLBACK_EXTENSION.to_string());
        let suggested_name =
            download::download_filename(session.title(), session.current_position(), &ext);
        Effect::DownloadCurrent {
            session_id: session.id(),
            locator,
            suggested_name,
        }
    }

    fn download_all(&mut self) -> Effect {
        let Some(session) = &mut self.session else {
            return Effect::None;
        };
        if !session.begin_batch_download() {
            return Effect::None;
        }
        Effect::DownloadAll {
            session_id: session.id(),
            images: session.images().to_vec(),
            title: session.title().map(str::to_string),
        }
    }

    fn batch_finished(&mut self, session_id: SessionId, outcome: BatchOutcome) -> Effect {
        let Some(session) = &mut self.session else {
            return Effect::None;
        };
        if session.id() != session_id {
            return Effect::None;
        }
        session.finish_batch_download();

        if outcome.is_complete_success() {
            Effect::ShowNotification(
                Notification::success("notification-download-all-done")
                    .with_arg("count", outcome.saved.len().to_string()),
            )
        } else {
            Effect::ShowNotification(
                Notification::warning("notification-download-all-partial")
                    .with_arg("saved", outcome.saved.len().to_string())
                    .with_arg("failed", outcome.failed.len().to_string()),
            )
        }
    }

    fn is_current_session(&self, id: SessionId) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.id() == id && !session.is_closed())
    }

    /// Fetch requests for the current image and its two neighbors.
    fn fetch_requests_around_current(&self) -> Vec<FetchRequest> {
        match &self.session {
            Some(session) => self.fetch_requests_around(session, session.current_index()),
            None => Vec::new(),
        }
    }

    fn fetch_requests_around(&self, session: &GallerySession, center: usize) -> Vec<FetchRequest> {
        let len = session.len();
        let mut indices = vec![center];
        if len > 1 {
            indices.push((center + 1) % len);
            indices.push((center + len - 1) % len);
        }
        indices.dedup();

        indices
            .into_iter()
            .filter(|index| !self.handles.contains_key(index))
            .map(|index| FetchRequest {
                session_id: session.id(),
                index,
                locator: session.images()[index].clone(),
            })
            .collect()
    }

    /// The active session, if the viewer is open.
    #[must_use]
    pub fn session(&self) -> Option<&GallerySession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Fetched handle for an image index, if it has arrived.
    #[must_use]
    pub fn handle_for(&self, index: usize) -> Option<&Handle> {
        self.handles.get(&index)
    }

    /// The slide entering the viewport, if a transition is running.
    #[must_use]
    pub fn incoming_slide(&self) -> Option<&Slide> {
        self.transition.incoming()
    }

    /// The slide leaving the viewport, if a transition is running.
    #[must_use]
    pub fn outgoing_slide(&self) -> Option<&Slide> {
        self.transition.outgoing()
    }

    /// Net offset of an in-flight drag, for rendering the image under the
    /// pointer.
    #[must_use]
    pub fn drag_offset(&self) -> Option<Vector> {
        self.drag.as_ref().map(DragTracker::offset)
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Whether an animation frame subscription is needed.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.transition.is_animating() || self.shared.is_some()
    }

    /// Shared-element rectangle for the current frame, given the image's
    /// final bounds.
    #[must_use]
    pub fn shared_element_bounds(&self, target: Rectangle) -> Option<Rectangle> {
        self.shared.as_ref().map(|shared| shared.interpolated(target))
    }
}
