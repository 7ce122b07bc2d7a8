#![forbid(unsafe_code)]

//! Slider configuration.
//!
//! [`SliderConfig`] is plain data: every constant that shapes the slider's
//! motion and timing lives here with its default. Hosts may deserialize it
//! from JSON (feature `serde`); absent fields take their defaults. A config
//! must pass [`SliderConfig::validate`] before a slider is mounted with it.

use core::fmt;
use core::time::Duration;

use crate::animation::MomentumProfile;
use crate::event::PointerKind;
use crate::geometry::{POSITION_MAX, POSITION_MIN};

/// Default accessible name for the handle.
pub const DEFAULT_ARIA_LABEL: &str =
    "Compare before and after images - Use arrow keys or drag to compare";

/// Default id given to the instructions element.
pub const DEFAULT_INSTRUCTIONS_ID: &str = "slider-instructions";

/// Idle demonstration sweep settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AutoPlayConfig {
    /// Whether the sweep may run at all.
    pub enabled: bool,
    /// Delay between becoming visible and starting the sweep.
    pub arm_delay_ms: u64,
    /// Interval between sweep steps.
    pub tick_interval_ms: u64,
    /// Position change per sweep step.
    pub step: f64,
    /// Position at which the sweep turns backward.
    pub upper_turn: f64,
    /// Position at which the sweep turns forward.
    pub lower_turn: f64,
    /// Visible fraction of the container required to arm.
    pub visibility_threshold: f64,
}

impl Default for AutoPlayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            arm_delay_ms: 3_000,
            tick_interval_ms: 50,
            step: 0.5,
            upper_turn: 90.0,
            lower_turn: 10.0,
            visibility_threshold: 0.5,
        }
    }
}

impl AutoPlayConfig {
    /// Arm delay as a [`Duration`].
    #[must_use]
    pub const fn arm_delay(&self) -> Duration {
        Duration::from_millis(self.arm_delay_ms)
    }

    /// Tick interval as a [`Duration`].
    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Tunable constants for one comparison slider.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SliderConfig {
    /// Position held before the entry animation runs.
    pub initial_position: f64,
    /// Fraction of the remaining distance covered per smooth frame.
    pub smoothing_factor: f64,
    /// Distance at which a smooth approach snaps onto its target.
    pub settle_epsilon: f64,
    pub mouse_momentum: MomentumProfile,
    pub touch_momentum: MomentumProfile,
    /// Arrow-key step.
    pub key_step: f64,
    /// Arrow-key step with Shift held.
    pub key_fine_step: f64,
    /// Settle delay before the entry animation.
    pub entry_delay_ms: u64,
    /// Target of the entry animation.
    pub entry_target: f64,
    pub auto_play: AutoPlayConfig,
    /// Quiet period after the last resize before re-anchoring.
    pub resize_debounce_ms: u64,
    /// Duration of the keyboard focus-ring highlight.
    pub focus_ring_ms: u64,
    /// Lifetime of a click ripple.
    pub ripple_ms: u64,
    /// Suppress momentum, smooth approaches, and the idle sweep.
    pub reduced_motion: bool,
    /// Accessible name for the handle.
    pub aria_label: String,
    /// Id assigned to the instructions element when present.
    pub instructions_id: String,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            initial_position: 50.0,
            smoothing_factor: 0.15,
            settle_epsilon: 0.1,
            mouse_momentum: MomentumProfile::MOUSE,
            touch_momentum: MomentumProfile::TOUCH,
            key_step: 5.0,
            key_fine_step: 1.0,
            entry_delay_ms: 500,
            entry_target: 50.0,
            auto_play: AutoPlayConfig::default(),
            resize_debounce_ms: 100,
            focus_ring_ms: 200,
            ripple_ms: 600,
            reduced_motion: false,
            aria_label: DEFAULT_ARIA_LABEL.to_string(),
            instructions_id: DEFAULT_INSTRUCTIONS_ID.to_string(),
        }
    }
}

impl SliderConfig {
    /// Set reduced motion (builder pattern).
    #[must_use]
    pub fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.reduced_motion = reduced;
        self
    }

    /// Set the auto-play settings (builder pattern).
    #[must_use]
    pub fn with_auto_play(mut self, auto_play: AutoPlayConfig) -> Self {
        self.auto_play = auto_play;
        self
    }

    /// Disable the idle sweep (builder pattern).
    #[must_use]
    pub fn without_auto_play(mut self) -> Self {
        self.auto_play.enabled = false;
        self
    }

    /// Set the handle's accessible name (builder pattern).
    #[must_use]
    pub fn with_aria_label(mut self, label: impl Into<String>) -> Self {
        self.aria_label = label.into();
        self
    }

    /// Momentum profile for a pointer kind.
    #[must_use]
    pub const fn momentum(&self, kind: PointerKind) -> MomentumProfile {
        match kind {
            PointerKind::Mouse => self.mouse_momentum,
            PointerKind::Touch => self.touch_momentum,
        }
    }

    #[must_use]
    pub const fn entry_delay(&self) -> Duration {
        Duration::from_millis(self.entry_delay_ms)
    }

    #[must_use]
    pub const fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    #[must_use]
    pub const fn focus_ring(&self) -> Duration {
        Duration::from_millis(self.focus_ring_ms)
    }

    #[must_use]
    pub const fn ripple(&self) -> Duration {
        Duration::from_millis(self.ripple_ms)
    }

    /// Check every field for a usable value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("initial_position", self.initial_position),
            ("smoothing_factor", self.smoothing_factor),
            ("settle_epsilon", self.settle_epsilon),
            ("mouse_momentum.threshold", self.mouse_momentum.threshold),
            ("mouse_momentum.multiplier", self.mouse_momentum.multiplier),
            ("touch_momentum.threshold", self.touch_momentum.threshold),
            ("touch_momentum.multiplier", self.touch_momentum.multiplier),
            ("key_step", self.key_step),
            ("key_fine_step", self.key_fine_step),
            ("entry_target", self.entry_target),
            ("auto_play.step", self.auto_play.step),
            ("auto_play.upper_turn", self.auto_play.upper_turn),
            ("auto_play.lower_turn", self.auto_play.lower_turn),
            (
                "auto_play.visibility_threshold",
                self.auto_play.visibility_threshold,
            ),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field });
            }
        }

        if self.smoothing_factor <= 0.0 || self.smoothing_factor > 1.0 {
            return Err(ConfigError::OutOfRange {
                field: "smoothing_factor",
                value: self.smoothing_factor,
            });
        }
        if self.settle_epsilon <= 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "settle_epsilon",
                value: self.settle_epsilon,
            });
        }
        for (field, value) in [
            ("mouse_momentum.threshold", self.mouse_momentum.threshold),
            ("touch_momentum.threshold", self.touch_momentum.threshold),
            ("key_step", self.key_step),
            ("key_fine_step", self.key_fine_step),
            ("auto_play.step", self.auto_play.step),
        ] {
            if value < 0.0 {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }

        let ap = &self.auto_play;
        for (field, value) in [
            ("auto_play.lower_turn", ap.lower_turn),
            ("auto_play.upper_turn", ap.upper_turn),
        ] {
            if !(POSITION_MIN..=POSITION_MAX).contains(&value) {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }
        if ap.lower_turn >= ap.upper_turn {
            return Err(ConfigError::TurnPointsOutOfOrder {
                lower: ap.lower_turn,
                upper: ap.upper_turn,
            });
        }
        if ap.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval {
                field: "auto_play.tick_interval_ms",
            });
        }
        if !(0.0..=1.0).contains(&ap.visibility_threshold) {
            return Err(ConfigError::OutOfRange {
                field: "auto_play.visibility_threshold",
                value: ap.visibility_threshold,
            });
        }
        Ok(())
    }
}

/// Reason a [`SliderConfig`] was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A numeric field is NaN or infinite.
    NotFinite { field: &'static str },
    /// A numeric field lies outside its allowed range.
    OutOfRange { field: &'static str, value: f64 },
    /// The sweep's lower turn point is not below its upper turn point.
    TurnPointsOutOfOrder { lower: f64, upper: f64 },
    /// A repeating interval is zero.
    ZeroInterval { field: &'static str },
    /// The host supplied a config that could not be parsed.
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFinite { field } => write!(f, "{field} must be finite"),
            Self::OutOfRange { field, value } => write!(f, "{field} out of range: {value}"),
            Self::TurnPointsOutOfOrder { lower, upper } => {
                write!(f, "sweep turn points out of order: lower {lower} >= upper {upper}")
            }
            Self::ZeroInterval { field } => write!(f, "{field} must be non-zero"),
            Self::Parse(msg) => write!(f, "config parse: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
