#![forbid(unsafe_code)]

//! CSS values written by the browser binding.
//!
//! Everything here is plain string formatting so the exact values can be
//! checked without a DOM. Numbers are printed the way JavaScript template
//! strings print them: integers without a fractional part, no negative zero.

use juxta_core::visual::{LabelVisual, Ripple, VisualFrame};

/// `box-shadow` of the focus ring shown after keyboard movement.
pub const FOCUS_RING_SHADOW: &str = "0 0 0 3px rgba(0, 212, 255, 0.5)";

/// Handle `left`; the transform offset is relative to this anchor.
pub const HANDLE_LEFT: &str = "50%";

/// Diameter of a click ripple in pixels.
pub const RIPPLE_SIZE_PX: u32 = 20;

/// Format a number for a CSS value.
#[must_use]
pub fn css_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{value}")
    }
}

/// Handle `transform` for a centred offset in percent.
#[must_use]
pub fn handle_transform(offset: f64) -> String {
    format!("translate3d({}%, -50%, 0)", css_number(offset))
}

/// After-layer `clip-path` hiding `right` percent from the right edge.
#[must_use]
pub fn after_clip(right: f64) -> String {
    format!("inset(0 {}% 0 0)", css_number(right))
}

/// Label `transform`.
#[must_use]
pub fn label_transform(label: &LabelVisual) -> String {
    format!("translateX({}px)", css_number(label.offset_px))
}

/// Handle-button `transform`.
#[must_use]
pub fn button_transform(scale: f64) -> String {
    format!("scale({})", css_number(scale))
}

/// Inline style of a ripple element at its wrapper-local point.
#[must_use]
pub fn ripple_css(ripple: &Ripple, duration_ms: u64) -> String {
    let seconds = duration_ms as f64 / 1_000.0;
    format!(
        "position: absolute; width: {size}px; height: {size}px; border-radius: 50%; \
         background: rgba(0, 212, 255, 0.4); pointer-events: none; \
         transform: translate(-50%, -50%) scale(0); animation: ripple {secs}s ease-out; \
         left: {x}px; top: {y}px;",
        size = RIPPLE_SIZE_PX,
        secs = css_number(seconds),
        x = css_number(ripple.x),
        y = css_number(ripple.y),
    )
}

/// Every style value derived from one [`VisualFrame`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameStyles {
    pub handle_transform: String,
    pub after_clip: String,
    pub before_opacity: String,
    pub before_transform: String,
    pub after_opacity: String,
    pub after_transform: String,
    pub button_transform: String,
    pub aria_value_now: String,
}

impl FrameStyles {
    #[must_use]
    pub fn from_frame(frame: &VisualFrame) -> Self {
        Self {
            handle_transform: handle_transform(frame.handle_offset),
            after_clip: after_clip(frame.after_clip_right),
            before_opacity: css_number(frame.before_label.opacity),
            before_transform: label_transform(&frame.before_label),
            after_opacity: css_number(frame.after_label.opacity),
            after_transform: label_transform(&frame.after_label),
            button_transform: button_transform(frame.button_scale),
            aria_value_now: frame.aria_value_now.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use juxta_core::handle::RippleId;
    use pretty_assertions::assert_eq;

    #[test]
    fn numbers_print_like_javascript() {
        assert_eq!(css_number(50.0), "50");
        assert_eq!(css_number(-0.0), "0");
        assert_eq!(css_number(30.5), "30.5");
        assert_eq!(css_number(-49.0), "-49");
    }

    #[test]
    fn centred_frame() {
        let styles = FrameStyles::from_frame(&VisualFrame::compute(50.0, false));
        assert_eq!(styles.handle_transform, "translate3d(0%, -50%, 0)");
        assert_eq!(styles.after_clip, "inset(0 50% 0 0)");
        assert_eq!(styles.button_transform, "scale(1)");
        assert_eq!(styles.aria_value_now, "50");
    }

    #[test]
    fn extreme_frame() {
        let styles = FrameStyles::from_frame(&VisualFrame::compute(1.0, false));
        assert_eq!(styles.handle_transform, "translate3d(-49%, -50%, 0)");
        assert_eq!(styles.after_clip, "inset(0 99% 0 0)");
        assert_eq!(styles.before_opacity, "0");
        assert_eq!(styles.before_transform, "translateX(14px)");
        assert_eq!(styles.after_opacity, "1");
        assert_eq!(styles.after_transform, "translateX(0px)");
    }

    #[test]
    fn ripple_is_positioned_at_click() {
        let css = ripple_css(
            &Ripple {
                id: RippleId(1),
                x: 120.0,
                y: 45.5,
            },
            600,
        );
        assert!(css.contains("width: 20px; height: 20px;"));
        assert!(css.contains("animation: ripple 0.6s ease-out;"));
        assert!(css.ends_with("left: 120px; top: 45.5px;"));
    }

    #[test]
    fn focus_ring_value() {
        assert_eq!(FOCUS_RING_SHADOW, "0 0 0 3px rgba(0, 212, 255, 0.5)");
    }
}
