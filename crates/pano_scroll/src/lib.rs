//! Pano Scroll
//!
//! Smooth one-dimensional scrolling for gallery views, decoupled from any
//! rendering technology.
//!
//! - [`ScrollCoordinator`]: owns the offset, runs the smoothing loop, publishes
//!   progress every frame and requests visibility recomputes at a bounded rate
//! - [`VisibilitySet`]: which items overlap the viewport plus a preload margin
//! - [`Viewport`]: the host-side handle the coordinator reads and writes

pub mod coordinator;
pub mod input;
pub mod params;
pub mod state;
pub mod trigger;
pub mod viewport;
pub mod visibility;

pub use coordinator::{ScrollCoordinator, ScrollToOptions};
pub use params::ScrollParams;
pub use state::{DriveMode, Lifecycle, MotionState, ScrollEvent, ScrollProgress, ScrollState};
pub use trigger::{VisibilityReason, VisibilityRequest};
pub use viewport::{SimulatedViewport, Viewport};
pub use visibility::{PreloadMargin, VisibilityEntry, VisibilityMap, VisibilitySet};
