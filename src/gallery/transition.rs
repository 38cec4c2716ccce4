// SPDX-License-Identifier: MPL-2.0
//! Presentational transitions: slide between pages, shared-element open.
//!
//! These state machines are cosmetic only. Navigation updates the session
//! index immediately; a transition merely describes how the view gets from
//! the old frame to the new one, and a new navigation call simply supersedes
//! whatever was still animating. Nothing here ever blocks input.

use super::session::Direction;
use crate::config::{SHARED_TRANSITION_MS, SLIDE_TRANSITION_MS};
use iced::Rectangle;
use std::time::Duration;

/// Phase of one image's slide animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Offset to the side it enters from, moving toward center.
    Entering,
    /// At rest, fully visible.
    Centered,
    /// Moving out toward the opposite side; unmounted when done.
    Exiting,
}

/// One image taking part in a slide transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slide {
    pub image_index: usize,
    pub phase: Phase,
    pub direction: Direction,
    /// Animation progress in `[0, 1]`.
    pub progress: f32,
}

impl Slide {
    /// Horizontal offset of this slide as a fraction of the viewport width.
    /// Positive values are to the right of center.
    #[must_use]
    pub fn offset_fraction(&self) -> f32 {
        match self.phase {
            Phase::Entering => self.direction.enter_sign() * (1.0 - self.progress),
            Phase::Centered => 0.0,
            Phase::Exiting => -self.direction.enter_sign() * self.progress,
        }
    }

    /// Opacity of this slide, fading in while entering and out while exiting.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        match self.phase {
            Phase::Entering => self.progress,
            Phase::Centered => 1.0,
            Phase::Exiting => 1.0 - self.progress,
        }
    }
}

/// Slide transition driver: at most one incoming and one outgoing image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlideTransition {
    incoming: Option<Slide>,
    outgoing: Option<Slide>,
    duration: Option<Duration>,
}

impl SlideTransition {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn duration(&self) -> Duration {
        self.duration
            .unwrap_or(Duration::from_millis(SLIDE_TRANSITION_MS))
    }

    /// Overrides the animation duration (used by tests).
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Starts a page transition. The previous image (if any) starts exiting
    /// from wherever it was; an in-flight incoming image is replaced, which
    /// is what makes rapid repeated navigation interruptible.
    pub fn begin(&mut self, from_index: Option<usize>, to_index: usize, direction: Direction) {
        self.outgoing = from_index.map(|image_index| Slide {
            image_index,
            phase: Phase::Exiting,
            direction,
            progress: 0.0,
        });
        self.incoming = Some(Slide {
            image_index: to_index,
            phase: Phase::Entering,
            direction,
            progress: 0.0,
        });
    }

    /// Shows an image with no animation (session open without shared element).
    pub fn set_centered(&mut self, image_index: usize) {
        self.incoming = Some(Slide {
            image_index,
            phase: Phase::Centered,
            direction: Direction::Forward,
            progress: 1.0,
        });
        self.outgoing = None;
    }

    /// Advances both slides. Entering images settle at `Centered`; exiting
    /// images are unmounted once their progress completes.
    pub fn tick(&mut self, elapsed: Duration) {
        let step = elapsed.as_secs_f32() / self.duration().as_secs_f32();

        if let Some(slide) = &mut self.incoming {
            if slide.phase == Phase::Entering {
                slide.progress = (slide.progress + step).min(1.0);
                if slide.progress >= 1.0 {
                    slide.phase = Phase::Centered;
                }
            }
        }

        if let Some(slide) = &mut self.outgoing {
            slide.progress = (slide.progress + step).min(1.0);
            if slide.progress >= 1.0 {
                self.outgoing = None;
            }
        }
    }

    #[must_use]
    pub fn incoming(&self) -> Option<&Slide> {
        self.incoming.as_ref()
    }

    #[must_use]
    pub fn outgoing(&self) -> Option<&Slide> {
        self.outgoing.as_ref()
    }

    /// Whether any slide still needs animation ticks.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.outgoing.is_some()
            || self
                .incoming
                .is_some_and(|s| s.phase == Phase::Entering)
    }
}

/// One-time shared-element open animation: the trigger thumbnail's frame
/// grows into the full-screen frame. Skipped entirely when the host never
/// provided source geometry; the contract is purely cosmetic.
#[derive(Debug, Clone, PartialEq)]
pub struct SharedElementTransition {
    key: String,
    from: Rectangle,
    progress: f32,
    duration: Duration,
}

impl SharedElementTransition {
    #[must_use]
    pub fn new(key: impl Into<String>, from: Rectangle) -> Self {
        Self {
            key: key.into(),
            from,
            progress: 0.0,
            duration: Duration::from_millis(SHARED_TRANSITION_MS),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Advances the animation; returns `true` while still running.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        self.progress =
            (self.progress + elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0);
        !self.is_done()
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.progress >= 1.0
    }

    /// Linear interpolation between the thumbnail frame and `target`.
    #[must_use]
    pub fn interpolated(&self, target: Rectangle) -> Rectangle {
        let t = self.progress;
        let lerp = |a: f32, b: f32| a + (b - a) * t;
        Rectangle {
            x: lerp(self.from.x, target.x),
            y: lerp(self.from.y, target.y),
            width: lerp(self.from.width, target.width),
            height: lerp(self.from.height, target.height),
        }
    }
}
