#![forbid(unsafe_code)]

//! Before/after comparison slider for juxta.
//!
//! The widget is a pure state machine over [`juxta_backend::Backend`]: hosts
//! feed it [`juxta_core::event::InputEvent`]s plus frame and timer callbacks,
//! and it writes [`juxta_core::visual::VisualFrame`]s back. See
//! [`ComparisonSlider`] for the full contract.
//!
//! # Role in juxta
//! `juxta-widget` sits between the platform-free core and the hosts: the
//! browser binding in `juxta-web` and the deterministic driver in
//! `juxta-harness` both drive the same [`ComparisonSlider`].

pub mod autoplay;
pub mod drag;
pub mod keyboard;
pub mod slider;

pub use autoplay::{AutoPlay, AutoPlayPhase, SweepDirection};
pub use keyboard::{KeyAction, key_action};
pub use slider::ComparisonSlider;
