#![forbid(unsafe_code)]

//! Core: input events, geometry, animation math, and configuration for the
//! juxta comparison slider.
//!
//! # Role in juxta
//! `juxta-core` holds every platform-independent value the slider consumes or
//! produces. It has no notion of a DOM, a clock, or a scheduler.
//!
//! # Primary responsibilities
//! - **InputEvent**: canonical pointer, touch, keyboard, visibility, and resize input.
//! - **WrapperRect**: the draggable geometry and pointer-to-percent mapping.
//! - **Animation math**: exponential smoothing, velocity tracking, momentum.
//! - **VisualFrame**: the values written to the host on each rendering frame.
//! - **SliderConfig**: tunable constants, validated before mount.
//!
//! # How it fits in the system
//! `juxta-backend` defines the host boundary in terms of these types,
//! `juxta-widget` drives them through the slider state machine, and
//! `juxta-web` maps them onto DOM events and style writes.

pub mod animation;
pub mod config;
pub mod error;
pub mod event;
pub mod geometry;
pub mod handle;
pub mod visual;

pub use config::{AutoPlayConfig, ConfigError, SliderConfig};
pub use error::{Recovery, SliderError};
pub use event::{
    ClickEvent, EventOutcome, InputEvent, InteractionKind, KeyCode, KeyEvent, Modifiers,
    MouseButton, PointerKind,
};
pub use geometry::{POSITION_MAX, POSITION_MIN, WrapperRect, clamp_position};
pub use handle::{FrameHandle, RippleId, TimerHandle, TimerKind};
pub use visual::{AccessibilityAttributes, LabelVisual, Ripple, VisualFrame};
