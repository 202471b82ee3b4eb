//! Pano Animation
//!
//! Time-based primitives that drive smooth scrolling.
//!
//! # Features
//!
//! - **Easing**: CSS-compatible curves plus the exponential ease-out used for scrolling
//! - **Damping**: Frame-rate independent lerp toward a moving target
//! - **Tweens**: Fixed-duration eased transitions for programmatic scrolls
//! - **Frame scheduling**: Host frame registration with cancellation

pub mod easing;
pub mod scheduler;
pub mod smoothing;
pub mod tween;

pub use easing::Easing;
pub use scheduler::{FrameClock, FrameLoop, FrameToken, ManualFrameLoop};
pub use smoothing::{damp, lambda_for_lerp, lerp};
pub use tween::Tween;
