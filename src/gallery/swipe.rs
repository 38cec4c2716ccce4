// SPDX-License-Identifier: MPL-2.0
//! Swipe and dismiss gesture recognition.
//!
//! The math here is deliberately renderer-agnostic: a [`DragTracker`]
//! accumulates pointer samples during a press and yields cumulative offset
//! plus instantaneous release velocity, and [`GestureThresholds::evaluate`]
//! turns that release into a verdict. A release pages only when
//! `|offset| x velocity` clears the confidence threshold, so slow small
//! drags never page while a fast flick pages with little visible travel.

use crate::config::{
    DEFAULT_DISMISS_DISTANCE, DEFAULT_DISMISS_VELOCITY, DEFAULT_SWIPE_CONFIDENCE,
    MAX_DISMISS_DISTANCE, MAX_DISMISS_VELOCITY, MAX_SWIPE_CONFIDENCE, MIN_DISMISS_DISTANCE,
    MIN_DISMISS_VELOCITY, MIN_SWIPE_CONFIDENCE,
};
use iced::{Point, Vector};
use std::time::Instant;

/// Swipe power: the quantity gating gesture-triggered paging.
#[must_use]
pub fn swipe_power(offset: f32, velocity: f32) -> f32 {
    offset.abs() * velocity
}

/// Swipe confidence threshold, clamped to the supported range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeConfidence(f32);

impl SwipeConfidence {
    #[must_use]
    pub fn new(value: f32) -> Self {
        Self(value.clamp(MIN_SWIPE_CONFIDENCE, MAX_SWIPE_CONFIDENCE))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for SwipeConfidence {
    fn default() -> Self {
        Self(DEFAULT_SWIPE_CONFIDENCE)
    }
}

/// Downward travel required to dismiss, clamped to the supported range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DismissDistance(f32);

impl DismissDistance {
    #[must_use]
    pub fn new(value: f32) -> Self {
        Self(value.clamp(MIN_DISMISS_DISTANCE, MAX_DISMISS_DISTANCE))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for DismissDistance {
    fn default() -> Self {
        Self(DEFAULT_DISMISS_DISTANCE)
    }
}

/// Downward release velocity required to dismiss, clamped to the supported range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DismissVelocity(f32);

impl DismissVelocity {
    #[must_use]
    pub fn new(value: f32) -> Self {
        Self(value.clamp(MIN_DISMISS_VELOCITY, MAX_DISMISS_VELOCITY))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for DismissVelocity {
    fn default() -> Self {
        Self(DEFAULT_DISMISS_VELOCITY)
    }
}

/// The three tunable gesture thresholds, sourced from `[gestures]` config.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureThresholds {
    pub swipe_confidence: SwipeConfidence,
    pub dismiss_distance: DismissDistance,
    pub dismiss_velocity: DismissVelocity,
}

impl GestureThresholds {
    /// Builds thresholds from the optional config values, clamping each.
    #[must_use]
    pub fn from_config(gestures: &crate::config::GesturesConfig) -> Self {
        Self {
            swipe_confidence: gestures
                .swipe_confidence
                .map_or_else(SwipeConfidence::default, SwipeConfidence::new),
            dismiss_distance: gestures
                .dismiss_distance
                .map_or_else(DismissDistance::default, DismissDistance::new),
            dismiss_velocity: gestures
                .dismiss_velocity
                .map_or_else(DismissVelocity::default, DismissVelocity::new),
        }
    }

    /// Classifies a drag release.
    ///
    /// Horizontal paging wins over dismissal when both would qualify, so a
    /// diagonal flick pages instead of closing.
    #[must_use]
    pub fn evaluate(&self, release: DragRelease) -> SwipeVerdict {
        let power = swipe_power(release.offset.x, release.velocity.x.abs());
        if power > self.swipe_confidence.value() {
            if release.offset.x < 0.0 {
                return SwipeVerdict::PageForward;
            }
            if release.offset.x > 0.0 {
                return SwipeVerdict::PageBackward;
            }
        }

        if release.offset.y > self.dismiss_distance.value()
            && release.velocity.y > self.dismiss_velocity.value()
        {
            return SwipeVerdict::Dismiss;
        }

        SwipeVerdict::None
    }
}

/// Outcome of a drag release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeVerdict {
    /// Page to the next image (content dragged leftwards).
    PageForward,
    /// Page to the previous image (content dragged rightwards).
    PageBackward,
    /// Close the viewer (dragged down hard enough).
    Dismiss,
    /// Below every threshold; leave the viewer unchanged.
    None,
}

/// Cumulative offset and instantaneous velocity of a finished drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragRelease {
    /// Net pointer travel since the press, logical px.
    pub offset: Vector,
    /// Velocity over the last two samples, px/s.
    pub velocity: Vector,
}

/// Accumulates pointer samples between press and release.
///
/// Velocity is measured over the two most recent samples rather than the
/// whole gesture, so a drag that stalls and then flicks still registers the
/// flick.
#[derive(Debug, Clone)]
pub struct DragTracker {
    origin: Point,
    last: (Point, Instant),
    prev: Option<(Point, Instant)>,
}

impl DragTracker {
    /// Starts tracking at the press position.
    #[must_use]
    pub fn begin(position: Point, at: Instant) -> Self {
        Self {
            origin: position,
            last: (position, at),
            prev: None,
        }
    }

    /// Net pointer travel since the press, for rendering the in-flight drag.
    #[must_use]
    pub fn offset(&self) -> Vector {
        self.last.0 - self.origin
    }

    /// Records a pointer movement sample.
    pub fn update(&mut self, position: Point, at: Instant) {
        self.prev = Some(self.last);
        self.last = (position, at);
    }

    /// Finishes the drag, yielding net offset and release velocity.
    #[must_use]
    pub fn release(self) -> DragRelease {
        let offset = self.last.0 - self.origin;
        let velocity = match self.prev {
            Some((prev_pos, prev_at)) => {
                let dt = self.last.1.duration_since(prev_at).as_secs_f32();
                if dt > 0.0 {
                    Vector::new(
                        (self.last.0.x - prev_pos.x) / dt,
                        (self.last.0.y - prev_pos.y) / dt,
                    )
                } else {
                    Vector::new(0.0, 0.0)
                }
            }
            // A press with no movement has no velocity; it is a tap.
            None => Vector::new(0.0, 0.0),
        };
        DragRelease { offset, velocity }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn release(offset: (f32, f32), velocity: (f32, f32)) -> DragRelease {
        DragRelease {
            offset: Vector::new(offset.0, offset.1),
            velocity: Vector::new(velocity.0, velocity.1),
        }
    }

    #[test]
    fn swipe_power_is_offset_times_velocity() {
        assert_eq!(swipe_power(-50.0, 300.0), 15_000.0);
        assert_eq!(swipe_power(10.0, 0.0), 0.0);
    }

    #[test]
    fn fast_leftward_flick_pages_forward() {
        let thresholds = GestureThresholds::default();
        // |120| * 300 = 36000 > 10000
        let verdict = thresholds.evaluate(release((-120.0, 0.0), (-300.0, 0.0)));
        assert_eq!(verdict, SwipeVerdict::PageForward);
    }

    #[test]
    fn fast_rightward_flick_pages_backward() {
        let thresholds = GestureThresholds::default();
        let verdict = thresholds.evaluate(release((120.0, 0.0), (300.0, 0.0)));
        assert_eq!(verdict, SwipeVerdict::PageBackward);
    }

    #[test]
    fn slow_small_drag_does_not_page() {
        let thresholds = GestureThresholds::default();
        // |40| * 100 = 4000 < 10000
        let verdict = thresholds.evaluate(release((-40.0, 0.0), (-100.0, 0.0)));
        assert_eq!(verdict, SwipeVerdict::None);
    }

    #[test]
    fn small_but_fast_flick_pages() {
        let thresholds = GestureThresholds::default();
        // |15| * 900 = 13500 > 10000
        let verdict = thresholds.evaluate(release((-15.0, 0.0), (-900.0, 0.0)));
        assert_eq!(verdict, SwipeVerdict::PageForward);
    }

    #[test]
    fn downward_drag_past_both_thresholds_dismisses() {
        let thresholds = GestureThresholds::default();
        let verdict = thresholds.evaluate(release((0.0, 200.0), (0.0, 400.0)));
        assert_eq!(verdict, SwipeVerdict::Dismiss);
    }

    #[test]
    fn vertical_jiggle_below_distance_does_not_dismiss() {
        let thresholds = GestureThresholds::default();
        let verdict = thresholds.evaluate(release((0.0, 60.0), (0.0, 500.0)));
        assert_eq!(verdict, SwipeVerdict::None);
    }

    #[test]
    fn slow_long_downward_drag_does_not_dismiss() {
        let thresholds = GestureThresholds::default();
        // Far enough, but released gently
        let verdict = thresholds.evaluate(release((0.0, 300.0), (0.0, 50.0)));
        assert_eq!(verdict, SwipeVerdict::None);
    }

    #[test]
    fn upward_drag_never_dismisses() {
        let thresholds = GestureThresholds::default();
        let verdict = thresholds.evaluate(release((0.0, -300.0), (0.0, -900.0)));
        assert_eq!(verdict, SwipeVerdict::None);
    }

    #[test]
    fn paging_wins_over_dismissal_on_diagonal_flick() {
        let thresholds = GestureThresholds::default();
        let verdict = thresholds.evaluate(release((-150.0, 200.0), (-400.0, 400.0)));
        assert_eq!(verdict, SwipeVerdict::PageForward);
    }

    #[test]
    fn thresholds_from_config_clamp_out_of_range_values() {
        let gestures = crate::config::GesturesConfig {
            swipe_confidence: Some(1.0),
            dismiss_distance: Some(10_000.0),
            dismiss_velocity: Some(-5.0),
        };
        let thresholds = GestureThresholds::from_config(&gestures);
        assert_eq!(
            thresholds.swipe_confidence.value(),
            crate::config::MIN_SWIPE_CONFIDENCE
        );
        assert_eq!(
            thresholds.dismiss_distance.value(),
            crate::config::MAX_DISMISS_DISTANCE
        );
        assert_eq!(
            thresholds.dismiss_velocity.value(),
            crate::config::MIN_DISMISS_VELOCITY
        );
    }

    #[test]
    fn tracker_reports_net_offset() {
        let start = Instant::now();
        let mut tracker = DragTracker::begin(Point::new(100.0, 100.0), start);
        tracker.update(Point::new(60.0, 105.0), start + Duration::from_millis(50));
        tracker.update(Point::new(20.0, 110.0), start + Duration::from_millis(100));

        let release = tracker.release();
        assert_eq!(release.offset, Vector::new(-80.0, 10.0));
    }

    #[test]
    fn tracker_velocity_uses_last_two_samples() {
        let start = Instant::now();
        let mut tracker = DragTracker::begin(Point::new(0.0, 0.0), start);
        // Stall for most of the gesture, then flick 40px in 20ms
        tracker.update(Point::new(-10.0, 0.0), start + Duration::from_millis(400));
        tracker.update(Point::new(-50.0, 0.0), start + Duration::from_millis(420));

        let release = tracker.release();
        assert!((release.velocity.x - (-2000.0)).abs() < 1.0);
    }

    #[test]
    fn tap_without_movement_has_zero_velocity() {
        let release = DragTracker::begin(Point::new(5.0, 5.0), Instant::now()).release();
        assert_eq!(release.offset, Vector::new(0.0, 0.0));
        assert_eq!(release.velocity, Vector::new(0.0, 0.0));
    }
}
