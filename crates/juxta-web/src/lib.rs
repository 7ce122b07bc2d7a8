#![forbid(unsafe_code)]

//! Browser binding for the juxta comparison slider.
//!
//! On `wasm32` this crate exports `initComparisonSliders`,
//! `mountComparisonSlider`, and `initLogging` to JavaScript and implements
//! [`juxta_backend::Backend`] on top of the DOM: `requestAnimationFrame` for
//! frames, `setTimeout` for timers, element styles for output. The modules
//! compiled on every target hold the pieces that need no DOM: the markup
//! contract, CSS value formatting, config parsing, and console log routing.
//!
//! # Invariants
//!
//! - One slider per `.comparison-slider` container; one container failing
//!   never prevents the others from mounting.
//! - Every listener, observer, frame, and timer belongs to exactly one slider
//!   and is released when that slider is disposed.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Missing wrapper/handle/after layer | Incomplete markup | Container skipped, logged at debug |
//! | DOM call throws during mount | Detached or foreign element | Container skipped, logged at error |
//! | Config JSON rejected | Parse or validation error | Nothing mounts, error returned to JS |

pub mod contract;
pub mod logging;
pub mod style;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{
    SliderHandle, SliderRegistry, init_comparison_sliders, init_logging, mount_comparison_slider,
};

use juxta_core::config::{ConfigError, SliderConfig};

/// Build the slider config from an optional JSON document.
///
/// Without a document the defaults apply and `reduced_motion` follows the
/// user's motion preference. A document is taken as given; absent fields
/// take their defaults.
pub fn resolve_config(
    json: Option<&str>,
    prefers_reduced_motion: bool,
) -> Result<SliderConfig, ConfigError> {
    let config = match json.map(str::trim).filter(|s| !s.is_empty()) {
        None => SliderConfig::default().with_reduced_motion(prefers_reduced_motion),
        Some(json) => serde_json::from_str::<SliderConfig>(json)
            .map_err(|err| ConfigError::Parse(err.to_string()))?,
    };
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_follows_motion_preference() {
        assert!(resolve_config(None, true).expect("default").reduced_motion);
        assert!(!resolve_config(None, false).expect("default").reduced_motion);
        assert!(resolve_config(Some("  "), true).expect("blank").reduced_motion);
    }

    #[test]
    fn supplied_config_is_taken_as_given() {
        let config = resolve_config(Some(r#"{"key_step": 10}"#), true).expect("parse");
        assert_eq!(config.key_step, 10.0);
        assert!(!config.reduced_motion);
        assert_eq!(config.smoothing_factor, SliderConfig::default().smoothing_factor);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = resolve_config(Some("{not json"), false).expect_err("rejected");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn invalid_values_fail_validation() {
        let err = resolve_config(Some(r#"{"smoothing_factor": 0}"#), false).expect_err("rejected");
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                field: "smoothing_factor",
                ..
            }
        ));
    }
}
