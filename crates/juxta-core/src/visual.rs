#![forbid(unsafe_code)]

//! Values the slider writes to its host.
//!
//! A [`VisualFrame`] is a pure function of the displayed position and the
//! dragging flag. Hosts translate it into style writes (clip region, handle
//! transform, label opacity/offset, button scale) and the handle's
//! `aria-valuenow` attribute.

use crate::handle::RippleId;

/// Handle-button scale while a drag session is active.
pub const DRAGGING_BUTTON_SCALE: f64 = 1.2;

/// Opacity and horizontal offset of one text label.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LabelVisual {
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Horizontal offset in pixels.
    pub offset_px: f64,
}

impl LabelVisual {
    /// Before-label visual for a position.
    ///
    /// Hidden below 5, fades in linearly over `[5, 15)`, fully visible above.
    /// Nudged right by `max(0, 15 - position)` pixels.
    #[must_use]
    pub fn before(position: f64) -> Self {
        let opacity = if position < 5.0 {
            0.0
        } else if position < 15.0 {
            (position - 5.0) / 10.0
        } else {
            1.0
        };
        Self {
            opacity,
            offset_px: (15.0 - position).max(0.0),
        }
    }

    /// After-label visual for a position (mirror of [`LabelVisual::before`]).
    ///
    /// Hidden above 95, fades out linearly over `(85, 95]`, fully visible below.
    /// Nudged left by `min(0, 85 - position)` pixels.
    #[must_use]
    pub fn after(position: f64) -> Self {
        let opacity = if position > 95.0 {
            0.0
        } else if position > 85.0 {
            (95.0 - position) / 10.0
        } else {
            1.0
        };
        Self {
            opacity,
            offset_px: (85.0 - position).min(0.0),
        }
    }
}

/// Everything written to the host for one rendering frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualFrame {
    /// Displayed position this frame was computed from.
    pub position: f64,
    /// Percent of the after layer clipped away from the right edge.
    pub after_clip_right: f64,
    /// Horizontal handle offset in percent, relative to the centre.
    pub handle_offset: f64,
    /// Rounded position for `aria-valuenow`.
    pub aria_value_now: u8,
    pub before_label: LabelVisual,
    pub after_label: LabelVisual,
    /// Scale of the handle button.
    pub button_scale: f64,
}

impl VisualFrame {
    /// Compute the frame for a displayed position.
    #[must_use]
    pub fn compute(position: f64, dragging: bool) -> Self {
        Self {
            position,
            after_clip_right: 100.0 - position,
            handle_offset: position - 50.0,
            aria_value_now: aria_value(position),
            before_label: LabelVisual::before(position),
            after_label: LabelVisual::after(position),
            button_scale: if dragging { DRAGGING_BUTTON_SCALE } else { 1.0 },
        }
    }
}

/// Round a position for `aria-valuenow`.
#[must_use]
pub fn aria_value(position: f64) -> u8 {
    // Half-up rounding to match the browser's Math.round.
    (position + 0.5).floor().clamp(0.0, 100.0) as u8
}

/// ARIA attributes established on the handle at mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessibilityAttributes {
    pub role: &'static str,
    pub tab_index: i32,
    pub value_min: u8,
    pub value_max: u8,
    pub value_now: u8,
    pub orientation: &'static str,
    /// Accessible name of the handle.
    pub label: String,
    /// Id of the instructions element, if the container has one.
    pub described_by: Option<String>,
}

impl AccessibilityAttributes {
    /// Slider attributes for a handle at `position`.
    #[must_use]
    pub fn slider(position: f64, label: impl Into<String>, described_by: Option<String>) -> Self {
        Self {
            role: "slider",
            tab_index: 0,
            value_min: 0,
            value_max: 100,
            value_now: aria_value(position),
            orientation: "horizontal",
            label: label.into(),
            described_by,
        }
    }
}

/// Transient click feedback centred on the click point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    pub id: RippleId,
    /// Wrapper-local x in pixels.
    pub x: f64,
    /// Wrapper-local y in pixels.
    pub y: f64,
}
