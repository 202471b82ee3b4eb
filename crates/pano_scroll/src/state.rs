//! Scroll state and the coordinator's state machines

use pano_core::events::{event_types, EventType};
use pano_core::StateTransitions;

/// One-dimensional scroll position of a viewport
///
/// `offset` always lies in `[0, limit]` and `progress` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    /// Current position along the primary axis (px)
    pub offset: f32,
    /// Largest reachable offset (content extent minus viewport extent)
    pub limit: f32,
    /// `offset / limit`, or 0 when nothing can scroll
    pub progress: f32,
    /// Rate of change of `offset` (px/s)
    pub velocity: f32,
}

impl ScrollState {
    pub fn new(offset: f32, limit: f32) -> Self {
        let mut state = Self::default();
        state.set_limit(limit);
        state.offset = sanitize(offset).clamp(0.0, state.limit);
        state.progress = progress_for(state.offset, state.limit);
        state
    }

    /// Update the scrollable range, pulling the offset back inside it
    pub fn set_limit(&mut self, limit: f32) {
        self.limit = sanitize(limit).max(0.0);
        self.offset = self.offset.clamp(0.0, self.limit);
        self.progress = progress_for(self.offset, self.limit);
    }

    /// Move by `delta` over `dt` seconds. Returns the delta actually applied
    /// after clamping to the scrollable range.
    pub fn apply_delta(&mut self, delta: f32, dt: f32) -> f32 {
        self.move_to(self.offset + sanitize(delta), dt)
    }

    /// Move to an absolute offset over `dt` seconds. Returns the delta applied.
    pub fn move_to(&mut self, offset: f32, dt: f32) -> f32 {
        let next = sanitize(offset).clamp(0.0, self.limit);
        let applied = next - self.offset;
        self.offset = next;
        self.progress = progress_for(self.offset, self.limit);
        self.velocity = if dt > 0.0 { applied / dt } else { 0.0 };
        applied
    }

    pub fn is_at_start(&self) -> bool {
        self.offset <= 0.0
    }

    pub fn is_at_end(&self) -> bool {
        self.offset >= self.limit
    }
}

/// Normalized progress; division is skipped when nothing can scroll
pub fn progress_for(offset: f32, limit: f32) -> f32 {
    if limit <= 0.0 || !limit.is_finite() {
        return 0.0;
    }
    (sanitize(offset) / limit).clamp(0.0, 1.0)
}

#[inline]
fn sanitize(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Raw offset change reported to the coordinator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollEvent {
    pub delta_offset: f32,
    pub limit: f32,
    /// Host timestamp in milliseconds
    pub timestamp_ms: f64,
}

/// Payload for progress subscribers
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollProgress {
    pub offset: f32,
    pub progress: f32,
}

/// How offsets are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriveMode {
    /// Input feeds a target; the frame loop eases the offset toward it
    #[default]
    Smooth,
    /// The host scrolls natively; offsets are read back on every native scroll event
    Native,
}

/// Coordinator lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lifecycle {
    #[default]
    Uninitialized,
    Active,
    /// Terminal; a fresh coordinator is needed per mount
    TornDown,
}

impl StateTransitions for Lifecycle {
    fn on_event(&self, event: EventType) -> Option<Self> {
        use event_types::*;

        match (self, event) {
            (Lifecycle::Uninitialized, MOUNT) => Some(Lifecycle::Active),
            (Lifecycle::Uninitialized, UNMOUNT) => Some(Lifecycle::TornDown),
            (Lifecycle::Active, UNMOUNT) => Some(Lifecycle::TornDown),
            _ => None,
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(self, Lifecycle::TornDown)
    }
}

/// What is currently moving the offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MotionState {
    /// Offset at rest
    #[default]
    Idle,
    /// Following user input (wheel, touch, native scroll)
    Scrolling,
    /// Running a `scroll_to` tween
    Animating,
}

impl MotionState {
    pub fn is_moving(&self) -> bool {
        !matches!(self, MotionState::Idle)
    }
}

impl StateTransitions for MotionState {
    fn on_event(&self, event: EventType) -> Option<Self> {
        use event_types::*;

        match (self, event) {
            // User input interrupts a programmatic scroll
            (
                MotionState::Idle | MotionState::Animating,
                WHEEL | TOUCH_START | TOUCH_MOVE | TOUCH_END | NATIVE_SCROLL,
            ) => Some(MotionState::Scrolling),

            (MotionState::Idle | MotionState::Scrolling, SCROLL_TO) => {
                Some(MotionState::Animating)
            }

            (MotionState::Scrolling | MotionState::Animating, SETTLED) => Some(MotionState::Idle),

            _ => None,
        }
    }
}
