//! Scroll coordinator
//!
//! Owns the scroll offset of one viewport, turns raw input into a smoothed
//! offset on every display frame, and notifies two kinds of subscribers:
//!
//! - **progress**: every update, for progress bars that must move smoothly
//! - **visibility**: rate-limited, for consumers that re-measure item bounds
//!
//! # Example
//!
//! ```rust
//! use pano_animation::ManualFrameLoop;
//! use pano_core::{Axis, InputEvent};
//! use pano_scroll::{ScrollCoordinator, ScrollParams, SimulatedViewport};
//!
//! let viewport = SimulatedViewport::new(800.0, 600.0).with_content(2800.0, 600.0);
//! let mut coordinator = ScrollCoordinator::new(viewport, ManualFrameLoop::new());
//! assert!(coordinator.initialize(Axis::Horizontal, ScrollParams::default()));
//!
//! let _bar = coordinator.subscribe_progress(|p| println!("progress {:.2}", p.progress));
//!
//! coordinator.on_input(InputEvent::wheel(0.0, 120.0, 0.0));
//! for frame in 1..=120 {
//!     coordinator.on_frame(frame as f64 * 16.0);
//! }
//! assert!((coordinator.offset() - 120.0).abs() < 0.01);
//! ```
//!
//! # Drive modes
//!
//! - **Smooth**: input moves a target; `on_frame` damps the offset toward it
//!   and writes the result back to the viewport.
//! - **Native**: used for touch devices on horizontal galleries, where the
//!   smoothing integrator fights the platform. The host scrolls natively and
//!   reports each native scroll event through `on_native_scroll`.
//!
//! Both paths publish through the same subscriber channels.

use pano_animation::{damp, lambda_for_lerp, Easing, FrameClock, FrameLoop, FrameToken, Tween};
use pano_core::events::{event_types, EventType, InputEvent};
use pano_core::{Axis, Channel, StateMachine, Subscription};

use crate::input::{wheel_delta, TouchTracker};
use crate::params::ScrollParams;
use crate::state::{DriveMode, Lifecycle, MotionState, ScrollEvent, ScrollProgress, ScrollState};
use crate::trigger::{VisibilityReason, VisibilityRequest, VisibilityTrigger};
use crate::viewport::Viewport;

/// Remaining distance (px) at which smoothing snaps onto the target
const SNAP_DISTANCE: f32 = 0.5;

/// Native scroll events this far apart (ms) mean the platform stopped scrolling
const NATIVE_SETTLE_MS: f64 = 150.0;

/// Options for [`ScrollCoordinator::scroll_to`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollToOptions {
    /// Seconds; defaults to `ScrollParams::duration`
    pub duration: Option<f32>,
    /// Defaults to `ScrollParams::easing`
    pub easing: Option<Easing>,
    /// Jump without animating
    pub immediate: bool,
}

impl ScrollToOptions {
    pub fn duration(duration: f32) -> Self {
        Self {
            duration: Some(duration),
            ..Default::default()
        }
    }

    pub fn immediate() -> Self {
        Self {
            immediate: true,
            ..Default::default()
        }
    }
}

/// Smooth scroll coordinator for a single viewport
pub struct ScrollCoordinator<V: Viewport, F: FrameLoop> {
    viewport: V,
    frames: F,
    axis: Axis,
    params: ScrollParams,
    mode: DriveMode,
    lifecycle: StateMachine<Lifecycle>,
    motion: StateMachine<MotionState>,
    state: ScrollState,
    /// Where smoothing is heading
    target: f32,
    tween: Option<Tween>,
    touch: TouchTracker,
    frame_clock: FrameClock,
    event_clock: FrameClock,
    last_native_event_ms: Option<f64>,
    /// A scroll event arrived since the last frame
    scroll_event_pending: bool,
    pending_frame: Option<FrameToken>,
    trigger: VisibilityTrigger,
    progress_subscribers: Channel<ScrollProgress>,
    visibility_subscribers: Channel<VisibilityRequest>,
}

impl<V: Viewport, F: FrameLoop> ScrollCoordinator<V, F> {
    /// Take ownership of a viewport. Nothing runs until [`initialize`](Self::initialize).
    pub fn new(viewport: V, frames: F) -> Self {
        let params = ScrollParams::default();
        Self {
            viewport,
            frames,
            axis: Axis::Horizontal,
            params,
            mode: DriveMode::Smooth,
            lifecycle: StateMachine::new(Lifecycle::Uninitialized),
            motion: StateMachine::new(MotionState::Idle),
            state: ScrollState::default(),
            target: 0.0,
            tween: None,
            touch: TouchTracker::new(),
            frame_clock: FrameClock::new(),
            event_clock: FrameClock::new(),
            last_native_event_ms: None,
            scroll_event_pending: false,
            pending_frame: None,
            trigger: VisibilityTrigger::new(
                params.settle_epsilon,
                params.visibility_sample_rate,
                params.sampling_seed,
            ),
            progress_subscribers: Channel::new(),
            visibility_subscribers: Channel::new(),
        }
    }

    /// Start coordinating. Returns false (and does nothing) while the viewport
    /// is not attached; the host retries after mount.
    pub fn initialize(&mut self, axis: Axis, params: ScrollParams) -> bool {
        match self.lifecycle.current_state() {
            Lifecycle::Active => return true,
            Lifecycle::TornDown => {
                tracing::debug!("initialize after teardown ignored");
                return false;
            }
            Lifecycle::Uninitialized => {}
        }

        if !self.viewport.is_attached() {
            tracing::debug!("viewport not attached yet, initialize deferred");
            return false;
        }

        self.axis = axis;
        self.params = params.sanitized();
        self.mode = if self.params.force_native
            || (self.viewport.is_touch_device() && axis.is_horizontal())
        {
            DriveMode::Native
        } else {
            DriveMode::Smooth
        };

        self.state = ScrollState::new(
            self.viewport.scroll_position(axis),
            self.viewport.scroll_limit(axis),
        );
        self.target = self.state.offset;
        self.trigger = VisibilityTrigger::new(
            self.params.settle_epsilon,
            self.params.visibility_sample_rate,
            self.params.sampling_seed,
        );

        self.lifecycle.send(event_types::MOUNT);
        self.pending_frame = Some(self.frames.request());

        tracing::debug!(
            "scroll coordinator active: axis={:?} mode={:?} offset={:.1} limit={:.1}",
            self.axis,
            self.mode,
            self.state.offset,
            self.state.limit
        );
        true
    }

    // =========================================================================
    // Frame loop
    // =========================================================================

    /// Advance one display frame. No-op unless active.
    pub fn on_frame(&mut self, timestamp_ms: f64) {
        if !self.is_active() {
            return;
        }

        // The registration that delivered this frame is spent
        self.pending_frame = None;
        let dt = self.frame_clock.tick(timestamp_ms);
        self.step(dt, timestamp_ms);

        if self.is_active() {
            self.pending_frame = Some(self.frames.request());
        }
    }

    fn step(&mut self, dt: f32, timestamp_ms: f64) {
        if let Some(tween) = self.tween.as_mut() {
            let value = tween.advance(dt);
            let done = tween.is_done();
            if done {
                self.tween = None;
                self.target = value;
            }
            self.drive_to(value, dt, done);
            return;
        }

        match self.mode {
            DriveMode::Smooth => {
                if !self.motion.current_state().is_moving() {
                    return;
                }
                let on_target = (self.target - self.state.offset).abs() < SNAP_DISTANCE;
                if std::mem::take(&mut self.scroll_event_pending) && on_target {
                    // Offsets are still being reported; settle after a quiet frame
                    return;
                }
                if on_target {
                    self.drive_to(self.target, dt, true);
                } else {
                    let lambda = lambda_for_lerp(self.params.lerp);
                    let next = damp(self.state.offset, self.target, lambda, dt);
                    self.drive_to(next, dt, false);
                }
            }
            DriveMode::Native => {
                let quiet = self
                    .last_native_event_ms
                    .map_or(true, |last| timestamp_ms - last > NATIVE_SETTLE_MS);
                if quiet && self.motion.is_in(MotionState::Scrolling) {
                    self.motion.send(event_types::SETTLED);
                    self.last_native_event_ms = None;
                }
            }
        }
    }

    /// Move to `value`, mirror it into the viewport and publish
    fn drive_to(&mut self, value: f32, dt: f32, settle: bool) {
        self.apply_update(value, self.state.limit, dt, settle);
        self.viewport.set_scroll_position(self.axis, self.state.offset);
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Feed raw wheel or touch input (smooth mode only; native mode lets the
    /// platform scroll and reports through [`on_native_scroll`](Self::on_native_scroll)).
    pub fn on_input(&mut self, event: InputEvent) {
        if !self.is_active() || self.mode == DriveMode::Native || !event.is_user_input() {
            return;
        }

        let delta = match event.event_type {
            event_types::WHEEL => {
                let page = self.viewport.client_extent(self.axis);
                wheel_delta(&event.data, self.axis, page) * self.params.wheel_multiplier
            }
            event_types::TOUCH_END => {
                self.touch.track(&event, self.axis)
                    * self.params.touch_multiplier
                    * self.params.touch_inertia_multiplier
            }
            _ => self.touch.track(&event, self.axis) * self.params.touch_multiplier,
        };

        // User input takes over from a programmatic scroll
        if self.tween.take().is_some() {
            self.target = self.state.offset;
        }
        if event.event_type == event_types::TOUCH_START {
            // Finger down catches a running flick
            self.target = self.state.offset;
        }

        self.send_motion(event.event_type);
        self.target = (self.target + delta).clamp(0.0, self.state.limit);

        tracing::trace!(
            "input type={} delta={:.1} target={:.1}",
            event.event_type,
            delta,
            self.target
        );
    }

    /// Apply an offset change. Updates `limit`, clamps, recomputes progress
    /// and velocity, and publishes to subscribers.
    ///
    /// In smooth mode the change starts a motion; the first frame without a
    /// further event brings it to rest and requests the settle recompute.
    pub fn on_scroll_event(&mut self, event: ScrollEvent) {
        if !self.is_active() {
            return;
        }
        if self.mode == DriveMode::Smooth && self.tween.is_none() {
            self.send_motion(event_types::NATIVE_SCROLL);
            self.scroll_event_pending = true;
        }
        let dt = self.event_clock.tick(event.timestamp_ms);
        let next = self.state.offset + event.delta_offset;
        self.apply_update(next, event.limit, dt, false);
        if self.tween.is_none() {
            self.target = self.state.offset;
        }
    }

    /// Native path: read the platform's scroll position after a native scroll event
    pub fn on_native_scroll(&mut self, timestamp_ms: f64) {
        if !self.is_active() || self.mode != DriveMode::Native {
            return;
        }

        let position = self.viewport.scroll_position(self.axis);
        let limit = self.viewport.scroll_limit(self.axis);
        if self.tween.is_none() {
            self.send_motion(event_types::NATIVE_SCROLL);
        }
        self.last_native_event_ms = Some(timestamp_ms);

        self.on_scroll_event(ScrollEvent {
            delta_offset: position - self.state.offset,
            limit,
            timestamp_ms,
        });
    }

    /// Re-measure after the viewport or its content changed size
    pub fn on_resize(&mut self) {
        if !self.is_active() {
            return;
        }

        self.state.set_limit(self.viewport.scroll_limit(self.axis));
        self.target = self.target.clamp(0.0, self.state.limit);
        if let Some(tween) = self.tween.as_mut() {
            let to = tween.to().clamp(0.0, self.state.limit);
            if to != tween.to() {
                let remaining = tween.duration() * (1.0 - tween.progress());
                tween.retarget(to, remaining);
            }
        }

        tracing::debug!("resize: limit={:.1} offset={:.1}", self.state.limit, self.state.offset);
        self.publish_progress();
        self.publish_visibility(VisibilityReason::Resize);
    }

    // =========================================================================
    // Programmatic scrolling
    // =========================================================================

    /// Animate to `target` with the configured easing
    pub fn scroll_to(&mut self, target: f32, options: ScrollToOptions) {
        if !self.is_active() || !target.is_finite() {
            return;
        }
        let target = target.clamp(0.0, self.state.limit);

        if options.immediate {
            self.tween = None;
            self.target = target;
            self.send_motion(event_types::SCROLL_TO);
            self.drive_to(target, self.frame_clock.nominal_dt(), true);
            return;
        }

        let duration = options
            .duration
            .filter(|d| d.is_finite() && *d > 0.0)
            .unwrap_or(self.params.duration);
        let easing = options.easing.unwrap_or(self.params.easing);

        self.tween = Some(Tween::new(self.state.offset, target, duration, easing));
        self.target = target;
        self.send_motion(event_types::SCROLL_TO);

        tracing::debug!(
            "scroll_to {:.1} -> {:.1} over {:.2}s",
            self.state.offset,
            target,
            duration
        );
    }

    // =========================================================================
    // Subscribers
    // =========================================================================

    /// Called with `{offset, progress}` on every update
    pub fn subscribe_progress<C>(&self, callback: C) -> Subscription
    where
        C: FnMut(&ScrollProgress) + 'static,
    {
        self.progress_subscribers.subscribe(callback)
    }

    /// Called when a visibility recompute is due (settle, sampling, native scroll, resize)
    pub fn subscribe_visibility<C>(&self, callback: C) -> Subscription
    where
        C: FnMut(&VisibilityRequest) + 'static,
    {
        self.visibility_subscribers.subscribe(callback)
    }

    // =========================================================================
    // Teardown
    // =========================================================================

    /// Cancel the frame loop and any animation, and release every subscriber.
    /// Idempotent; the coordinator cannot be reinitialized afterwards.
    pub fn teardown(&mut self) {
        if self.lifecycle.is_in(Lifecycle::TornDown) {
            return;
        }

        if let Some(token) = self.pending_frame.take() {
            self.frames.cancel(token);
        }
        self.tween = None;
        self.progress_subscribers.close();
        self.visibility_subscribers.close();
        self.lifecycle.send(event_types::UNMOUNT);

        tracing::debug!("scroll coordinator torn down at offset {:.1}", self.state.offset);
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn apply_update(&mut self, next_offset: f32, limit: f32, dt: f32, settle: bool) {
        self.state.set_limit(limit);
        self.state.move_to(next_offset, dt);
        if settle {
            self.state.velocity = 0.0;
        }

        self.publish_progress();

        let reason = match self.mode {
            DriveMode::Native => Some(VisibilityReason::NativeScroll),
            DriveMode::Smooth if settle => self.trigger.rest(),
            DriveMode::Smooth => self.trigger.evaluate(self.state.velocity),
        };
        if let Some(reason) = reason {
            self.publish_visibility(reason);
        }

        if settle {
            self.motion.send(event_types::SETTLED);
        }
    }

    fn send_motion(&mut self, event: EventType) {
        let was_idle = !self.motion.current_state().is_moving();
        let now = self.motion.send(event);
        if was_idle && now.is_moving() {
            self.trigger.arm();
        }
    }

    fn publish_progress(&self) {
        self.progress_subscribers.emit(&ScrollProgress {
            offset: self.state.offset,
            progress: self.state.progress,
        });
    }

    fn publish_visibility(&self, reason: VisibilityReason) {
        self.visibility_subscribers.emit(&VisibilityRequest {
            offset: self.state.offset,
            velocity: self.state.velocity,
            reason,
        });
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    pub fn offset(&self) -> f32 {
        self.state.offset
    }

    pub fn progress(&self) -> f32 {
        self.state.progress
    }

    pub fn limit(&self) -> f32 {
        self.state.limit
    }

    pub fn velocity(&self) -> f32 {
        self.state.velocity
    }

    /// Offset the smoothing is heading for
    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn params(&self) -> &ScrollParams {
        &self.params
    }

    pub fn mode(&self) -> DriveMode {
        self.mode
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle.current_state()
    }

    pub fn motion(&self) -> MotionState {
        self.motion.current_state()
    }

    pub fn is_active(&self) -> bool {
        self.lifecycle.is_in(Lifecycle::Active)
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending_frame.is_some()
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    pub fn frame_loop(&self) -> &F {
        &self.frames
    }
}

impl<V: Viewport, F: FrameLoop> Drop for ScrollCoordinator<V, F> {
    fn drop(&mut self) {
        self.teardown();
    }
}
