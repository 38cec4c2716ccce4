// SPDX-License-Identifier: MPL-2.0
//! Core gallery domain: session state, gesture math, transitions, downloads.
//!
//! Everything in this module is a plain state machine with no rendering
//! dependency beyond basic geometry types, so the full navigation and
//! gesture behavior can be driven from unit tests.

pub mod download;
pub mod manifest;
pub mod session;
pub mod swipe;
pub mod transition;

pub use manifest::GalleryManifest;
pub use session::{Direction, GallerySession, ImageLocator, SessionId};
pub use swipe::{swipe_power, DragTracker, GestureThresholds, SwipeVerdict};
