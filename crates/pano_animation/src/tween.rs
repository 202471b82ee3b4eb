//! Fixed-duration eased transitions

use crate::easing::Easing;

/// Shortest duration a tween accepts, in seconds
const MIN_DURATION: f32 = 1e-3;

/// An eased transition from one value to another over a fixed duration
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    /// Duration in seconds
    duration: f32,
    /// Seconds elapsed since start
    elapsed: f32,
    easing: Easing,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: f32, easing: Easing) -> Self {
        let duration = if duration.is_finite() {
            duration.max(MIN_DURATION)
        } else {
            MIN_DURATION
        };
        Self {
            from,
            to,
            duration,
            elapsed: 0.0,
            easing,
        }
    }

    pub fn from(&self) -> f32 {
        self.from
    }

    pub fn to(&self) -> f32 {
        self.to
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Linear progress through the duration, 0.0 to 1.0
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Current eased value. Exactly `to` once done.
    pub fn value(&self) -> f32 {
        if self.is_done() {
            return self.to;
        }
        self.from + (self.to - self.from) * self.easing.apply(self.progress())
    }

    /// Advance by `dt` seconds and return the new value
    pub fn advance(&mut self, dt: f32) -> f32 {
        if dt > 0.0 {
            self.elapsed = (self.elapsed + dt).min(self.duration);
        }
        self.value()
    }

    /// Restart toward a new target from the current value
    pub fn retarget(&mut self, to: f32, duration: f32) {
        *self = Self::new(self.value(), to, duration, self.easing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tween_reaches_target_exactly() {
        let mut tween = Tween::new(0.0, 1000.0, 1.0, Easing::EaseOutExpo);
        let mut frames = 0;
        while !tween.is_done() {
            tween.advance(1.0 / 60.0);
            frames += 1;
        }
        assert_eq!(tween.value(), 1000.0);
        assert!((60..=61).contains(&frames));
    }

    #[test]
    fn test_tween_is_monotonic() {
        let mut tween = Tween::new(500.0, 0.0, 0.5, Easing::EaseInOutCubic);
        let mut prev = tween.value();
        while !tween.is_done() {
            let v = tween.advance(1.0 / 120.0);
            assert!(v <= prev);
            prev = v;
        }
    }

    #[test]
    fn test_invalid_duration_is_clamped() {
        let tween = Tween::new(0.0, 10.0, -2.0, Easing::Linear);
        assert!(tween.duration() > 0.0);

        let tween = Tween::new(0.0, 10.0, f32::NAN, Easing::Linear);
        assert!(tween.duration() > 0.0);
    }

    #[test]
    fn test_retarget_starts_from_current_value() {
        let mut tween = Tween::new(0.0, 100.0, 1.0, Easing::Linear);
        tween.advance(0.5);
        tween.retarget(0.0, 1.0);

        assert_eq!(tween.from(), 50.0);
        assert_eq!(tween.value(), 50.0);
        assert_eq!(tween.progress(), 0.0);
    }
}
