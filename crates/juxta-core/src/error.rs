#![forbid(unsafe_code)]

//! Slider error model.
//!
//! # Design Principles
//!
//! 1. **No panics at runtime**: interaction never fails; invalid positions are
//!    prevented by clamping rather than reported.
//! 2. **Per-instance isolation**: every error variant maps to a [`Recovery`]
//!    that the page initialiser uses to keep other sliders working.
//! 3. **Observability**: errors carry enough context for structured log
//!    fields without depending on a logging crate.

use core::fmt;

use crate::config::ConfigError;

/// Errors raised while binding a slider to its container.
#[derive(Debug, Clone, PartialEq)]
pub enum SliderError {
    /// A required descendant (wrapper, handle, or after layer) is missing.
    StructuralMismatch { missing: &'static str },
    /// Unexpected failure while wiring the slider to its host.
    InitializationFailure(String),
    /// The supplied configuration was rejected.
    InvalidConfig(ConfigError),
}

/// Standard result type for slider APIs.
pub type Result<T> = core::result::Result<T, SliderError>;

/// What the caller should do when an error occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Leave this container inactive and continue with the next one.
    SkipInstance,
    /// Stop initialising; every instance would fail the same way.
    AbortInit,
}

impl SliderError {
    /// Determine the recovery action for this error.
    #[must_use]
    pub fn recovery(&self) -> Recovery {
        match self {
            Self::StructuralMismatch { .. } => Recovery::SkipInstance,
            Self::InitializationFailure(_) => Recovery::SkipInstance,
            Self::InvalidConfig(_) => Recovery::AbortInit,
        }
    }

    /// Error type label for logging.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::StructuralMismatch { .. } => "structural_mismatch",
            Self::InitializationFailure(_) => "initialization_failure",
            Self::InvalidConfig(_) => "invalid_config",
        }
    }

    /// Whether the error is expected on ordinary pages (logged at debug only).
    #[must_use]
    pub fn is_benign(&self) -> bool {
        matches!(self, Self::StructuralMismatch { .. })
    }
}

impl fmt::Display for SliderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StructuralMismatch { missing } => {
                write!(f, "slider container is missing its {missing}")
            }
            Self::InitializationFailure(msg) => write!(f, "slider initialization failed: {msg}"),
            Self::InvalidConfig(err) => write!(f, "invalid slider config: {err}"),
        }
    }
}

impl std::error::Error for SliderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidConfig(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for SliderError {
    fn from(err: ConfigError) -> Self {
        Self::InvalidConfig(err)
    }
}
