//! Rate limiting for visibility recomputes
//!
//! Measuring every item's bounds each frame is too expensive for galleries of
//! large media, so recomputes are requested only when motion comes to rest,
//! plus a small random sample of updates during continuous motion.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Why a visibility recompute was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityReason {
    /// Motion slowed below the settle threshold and came to rest
    Settled,
    /// Random sample during continuous motion
    Sampled,
    /// Native-scroll path: every scroll event recomputes
    NativeScroll,
    /// Viewport or content was resized
    Resize,
}

/// Payload for visibility subscribers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityRequest {
    pub offset: f32,
    pub velocity: f32,
    pub reason: VisibilityReason,
}

/// Decides on each update whether visibility should be recomputed
pub struct VisibilityTrigger {
    epsilon: f32,
    sample_rate: f32,
    rng: StdRng,
    /// Set once the current motion has produced its settle recompute
    settled: bool,
}

impl VisibilityTrigger {
    pub fn new(epsilon: f32, sample_rate: f32, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            epsilon,
            sample_rate: sample_rate.clamp(0.0, 1.0),
            rng,
            settled: true,
        }
    }

    /// A new motion began; its settle must produce a recompute
    pub fn arm(&mut self) {
        self.settled = false;
    }

    pub fn is_armed(&self) -> bool {
        !self.settled
    }

    /// Evaluate one update while the offset is still moving (velocity in px/s)
    ///
    /// Slow updates never request a recompute here; the settle request is
    /// sent by [`rest`](Self::rest) so it carries the offset motion ends on.
    pub fn evaluate(&mut self, velocity: f32) -> Option<VisibilityReason> {
        if velocity.abs() < self.epsilon {
            return None;
        }

        // Fast motion re-arms so the next slow-down recomputes again
        self.settled = false;
        if self.sample_rate > 0.0 && self.rng.random::<f32>() < self.sample_rate {
            Some(VisibilityReason::Sampled)
        } else {
            None
        }
    }

    /// The offset came to rest. Fires once per motion.
    pub fn rest(&mut self) -> Option<VisibilityReason> {
        if self.settled {
            return None;
        }
        self.settled = true;
        Some(VisibilityReason::Settled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settle_fires_once_per_motion() {
        let mut trigger = VisibilityTrigger::new(6.0, 0.0, Some(1));

        assert_eq!(trigger.rest(), None);

        trigger.arm();
        assert_eq!(trigger.evaluate(500.0), None);
        assert_eq!(trigger.evaluate(3.0), None);
        assert_eq!(trigger.rest(), Some(VisibilityReason::Settled));
        assert_eq!(trigger.rest(), None);

        // Fast motion without an explicit arm still earns a settle
        assert_eq!(trigger.evaluate(-200.0), None);
        assert!(trigger.is_armed());
        assert_eq!(trigger.rest(), Some(VisibilityReason::Settled));
    }

    #[test]
    fn test_slow_updates_wait_for_rest() {
        let mut trigger = VisibilityTrigger::new(6.0, 1.0, Some(3));
        trigger.arm();
        for velocity in [5.9, 2.0, 0.4, 0.0] {
            assert_eq!(trigger.evaluate(velocity), None);
        }
        assert!(trigger.is_armed());
        assert_eq!(trigger.rest(), Some(VisibilityReason::Settled));
    }

    #[test]
    fn test_sampling_rate_is_roughly_respected() {
        let mut trigger = VisibilityTrigger::new(6.0, 0.05, Some(42));
        let sampled = (0..10_000)
            .filter(|_| trigger.evaluate(1000.0) == Some(VisibilityReason::Sampled))
            .count();

        assert!((300..700).contains(&sampled), "sampled {}", sampled);
    }

    #[test]
    fn test_full_rate_samples_every_moving_update() {
        let mut trigger = VisibilityTrigger::new(6.0, 1.0, Some(7));
        for _ in 0..100 {
            assert_eq!(trigger.evaluate(100.0), Some(VisibilityReason::Sampled));
        }
    }
}
