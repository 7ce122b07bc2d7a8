#![forbid(unsafe_code)]

//! Structural contract between the slider and its markup.
//!
//! A slider container is any element carrying [`CONTAINER_SELECTOR`]. The
//! binding looks up its parts by class name below the container; the wrapper,
//! handle, and after layer are required, everything else is optional and its
//! absence only disables the corresponding feedback.

/// Selector for slider containers on the page.
pub const CONTAINER_SELECTOR: &str = ".comparison-slider";

/// Class toggled on the handle and wrapper while a drag is in progress.
pub const DRAGGING_CLASS: &str = "dragging";

/// Class given to ripple elements appended to the wrapper.
pub const RIPPLE_CLASS: &str = "slider-ripple";

/// Handle cursor outside a drag.
pub const IDLE_CURSOR: &str = "ew-resize";

/// Handle and body cursor during a drag.
pub const DRAG_CURSOR: &str = "grabbing";

/// Media query that turns on reduced motion when no config is supplied.
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Longest delay `setTimeout` honours; larger values fire immediately.
pub const MAX_TIMEOUT_MS: u32 = i32::MAX as u32;

/// Milliseconds to pass to `setTimeout` for `delay`, saturating at
/// [`MAX_TIMEOUT_MS`].
#[must_use]
pub fn timeout_millis(delay: core::time::Duration) -> u32 {
    u32::try_from(delay.as_millis()).map_or(MAX_TIMEOUT_MS, |ms| ms.min(MAX_TIMEOUT_MS))
}

/// A named descendant of the slider container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    Wrapper,
    Handle,
    After,
    BeforeLabel,
    AfterLabel,
    HandleButton,
    Instructions,
}

impl Part {
    /// Every part, required ones first.
    pub const ALL: [Self; 7] = [
        Self::Wrapper,
        Self::Handle,
        Self::After,
        Self::BeforeLabel,
        Self::AfterLabel,
        Self::HandleButton,
        Self::Instructions,
    ];

    /// CSS selector relative to the container.
    #[must_use]
    pub const fn selector(self) -> &'static str {
        match self {
            Self::Wrapper => ".slider-wrapper",
            Self::Handle => ".slider-handle",
            Self::After => ".slider-after",
            Self::BeforeLabel => ".label-before",
            Self::AfterLabel => ".label-after",
            Self::HandleButton => ".handle-button",
            Self::Instructions => ".slider-instructions",
        }
    }

    /// Whether a container without this part is rejected.
    #[must_use]
    pub const fn is_required(self) -> bool {
        matches!(self, Self::Wrapper | Self::Handle | Self::After)
    }

    /// Human-readable name used in structural-mismatch errors.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wrapper => "wrapper",
            Self::Handle => "handle",
            Self::After => "after layer",
            Self::BeforeLabel => "before label",
            Self::AfterLabel => "after label",
            Self::HandleButton => "handle button",
            Self::Instructions => "instructions",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::time::Duration;

    #[test]
    fn timeouts_saturate_below_the_browser_limit() {
        assert_eq!(timeout_millis(Duration::from_millis(3_000)), 3_000);
        assert_eq!(timeout_millis(Duration::from_millis(2_147_483_647)), MAX_TIMEOUT_MS);
        assert_eq!(timeout_millis(Duration::from_millis(2_147_483_648)), MAX_TIMEOUT_MS);
        assert_eq!(timeout_millis(Duration::from_millis(u64::MAX)), MAX_TIMEOUT_MS);
        assert!(i32::try_from(timeout_millis(Duration::MAX)).is_ok());
    }

    #[test]
    fn required_parts_come_first() {
        let required: Vec<_> = Part::ALL.iter().filter(|p| p.is_required()).collect();
        assert_eq!(required, vec![&Part::Wrapper, &Part::Handle, &Part::After]);
        assert!(Part::ALL[..3].iter().all(|p| p.is_required()));
        assert!(Part::ALL[3..].iter().all(|p| !p.is_required()));
    }

    #[test]
    fn selectors_are_class_selectors() {
        for part in Part::ALL {
            assert!(part.selector().starts_with('.'), "{part:?}");
        }
        assert_eq!(Part::Instructions.selector(), ".slider-instructions");
    }
}
