// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module is the single source of truth for gesture thresholds and
//! timing defaults. The numeric values mirror the behavior users expect
//! from the original gallery but carry no product meaning on their own,
//! so every one of them can be overridden in `settings.toml`.

// ==========================================================================
// Swipe Defaults
// ==========================================================================

/// Default swipe confidence threshold (|offset| x velocity, px^2/s).
///
/// A release pages the gallery only when the product of horizontal travel
/// and release velocity exceeds this value, so slow small drags never page
/// while a fast flick pages even with little visible travel.
pub const DEFAULT_SWIPE_CONFIDENCE: f32 = 10_000.0;

/// Minimum allowed swipe confidence threshold.
pub const MIN_SWIPE_CONFIDENCE: f32 = 500.0;

/// Maximum allowed swipe confidence threshold.
pub const MAX_SWIPE_CONFIDENCE: f32 = 100_000.0;

// ==========================================================================
// Dismiss Defaults
// ==========================================================================

/// Default downward travel required for drag-to-dismiss (logical px).
pub const DEFAULT_DISMISS_DISTANCE: f32 = 150.0;

/// Minimum allowed dismiss distance.
pub const MIN_DISMISS_DISTANCE: f32 = 40.0;

/// Maximum allowed dismiss distance.
pub const MAX_DISMISS_DISTANCE: f32 = 600.0;

/// Default downward release velocity required for drag-to-dismiss (px/s).
pub const DEFAULT_DISMISS_VELOCITY: f32 = 200.0;

/// Minimum allowed dismiss velocity.
pub const MIN_DISMISS_VELOCITY: f32 = 0.0;

/// Maximum allowed dismiss velocity.
pub const MAX_DISMISS_VELOCITY: f32 = 2_000.0;

// ==========================================================================
// Transition Defaults
// ==========================================================================

/// Duration of the slide enter/exit animation in milliseconds.
pub const SLIDE_TRANSITION_MS: u64 = 220;

/// Duration of the one-time shared-element open animation in milliseconds.
pub const SHARED_TRANSITION_MS: u64 = 280;

/// Interval of the animation/notification tick in milliseconds.
pub const TICK_INTERVAL_MS: u64 = 16;
