//! Frame scheduling
//!
//! The host owns the display-refresh loop (`requestAnimationFrame` or a
//! windowing event loop). `FrameLoop` is the seam through which animations
//! register for the next frame and cancel that registration again.

use std::cell::RefCell;
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a pending frame registration
    pub struct FrameToken;
}

/// Host animation-frame primitive
pub trait FrameLoop {
    /// Ask the host to deliver one more frame
    fn request(&mut self) -> FrameToken;

    /// Withdraw a pending request. Unknown or already-delivered tokens are ignored.
    fn cancel(&mut self, token: FrameToken);
}

/// A frame loop shared between several animations on one thread
impl<T: FrameLoop> FrameLoop for Rc<RefCell<T>> {
    fn request(&mut self) -> FrameToken {
        self.borrow_mut().request()
    }

    fn cancel(&mut self, token: FrameToken) {
        self.borrow_mut().cancel(token)
    }
}

/// Frame loop driven by hand, for tests and offline simulation
///
/// Requests accumulate until [`ManualFrameLoop::take_pending`] delivers them.
#[derive(Default)]
pub struct ManualFrameLoop {
    pending: SlotMap<FrameToken, ()>,
    requested_total: u64,
    cancelled_total: u64,
}

impl ManualFrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registrations the host still owes a frame
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Deliver every pending registration; returns how many there were
    pub fn take_pending(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        count
    }

    pub fn requested_total(&self) -> u64 {
        self.requested_total
    }

    pub fn cancelled_total(&self) -> u64 {
        self.cancelled_total
    }
}

impl FrameLoop for ManualFrameLoop {
    fn request(&mut self) -> FrameToken {
        self.requested_total += 1;
        self.pending.insert(())
    }

    fn cancel(&mut self, token: FrameToken) {
        if self.pending.remove(token).is_some() {
            self.cancelled_total += 1;
        }
    }
}

/// Converts host frame timestamps into animation time steps
#[derive(Clone, Debug)]
pub struct FrameClock {
    last_timestamp_ms: Option<f64>,
    target_fps: u32,
    max_dt: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_timestamp_ms: None,
            target_fps: 60,
            max_dt: 0.1,
        }
    }

    pub fn set_target_fps(&mut self, fps: u32) {
        self.target_fps = fps.max(1);
    }

    /// Nominal frame duration in seconds
    pub fn nominal_dt(&self) -> f32 {
        1.0 / self.target_fps as f32
    }

    /// Seconds since the previous tick.
    ///
    /// The first tick and timestamps that run backwards yield the nominal frame
    /// duration. Stalls (backgrounded tab, debugger) are capped so a resumed
    /// animation does not jump.
    pub fn tick(&mut self, timestamp_ms: f64) -> f32 {
        let dt = match self.last_timestamp_ms {
            Some(last) if timestamp_ms > last => ((timestamp_ms - last) / 1000.0) as f32,
            _ => self.nominal_dt(),
        };
        self.last_timestamp_ms = Some(timestamp_ms);
        if dt > self.max_dt {
            tracing::trace!("frame stall of {:.0}ms capped", dt * 1000.0);
            return self.max_dt;
        }
        dt
    }

    pub fn last_timestamp_ms(&self) -> Option<f64> {
        self.last_timestamp_ms
    }

    /// Forget the previous timestamp (e.g. after the loop was idle)
    pub fn reset(&mut self) {
        self.last_timestamp_ms = None;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_loop_request_and_cancel() {
        let mut frames = ManualFrameLoop::new();
        let a = frames.request();
        let _b = frames.request();
        assert_eq!(frames.pending_count(), 2);

        frames.cancel(a);
        frames.cancel(a);
        assert_eq!(frames.pending_count(), 1);
        assert_eq!(frames.cancelled_total(), 1);

        assert_eq!(frames.take_pending(), 1);
        assert!(!frames.has_pending());
        assert_eq!(frames.requested_total(), 2);
    }

    #[test]
    fn test_clock_first_tick_is_nominal() {
        let mut clock = FrameClock::new();
        assert!((clock.tick(1000.0) - 1.0 / 60.0).abs() < 1e-6);
        assert!((clock.tick(1008.0) - 0.008).abs() < 1e-6);
    }

    #[test]
    fn test_clock_handles_backwards_and_stalls() {
        let mut clock = FrameClock::new();
        clock.tick(500.0);
        assert!((clock.tick(400.0) - clock.nominal_dt()).abs() < 1e-6);
        assert_eq!(clock.tick(10_000.0), 0.1);
    }
}
