#![forbid(unsafe_code)]

//! Animation math for the comparison slider.
//!
//! - [`smoothing`]: frame-by-frame exponential approach toward a target.
//! - [`momentum`]: pointer velocity tracking and release momentum projection.
//!
//! Both are pure: they hold no timers and schedule nothing. The widget feeds
//! them timestamps from its backend clock and decides when to request the
//! next frame.

pub mod momentum;
pub mod smoothing;

pub use momentum::{MomentumProfile, VelocityTracker};
pub use smoothing::{Step, approach};
