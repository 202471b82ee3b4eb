//! Scroll configuration

use pano_animation::Easing;
use serde::{Deserialize, Serialize};

/// Tuning for a [`ScrollCoordinator`](crate::ScrollCoordinator)
///
/// Values only shape cosmetic motion, so malformed input is clamped to
/// defaults by [`ScrollParams::sanitized`] instead of being rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollParams {
    /// Default `scroll_to` duration in seconds
    pub duration: f32,
    /// Wheel delta scaling
    pub wheel_multiplier: f32,
    /// Touch delta scaling
    pub touch_multiplier: f32,
    /// Flick distance as a multiple of the last touch delta
    pub touch_inertia_multiplier: f32,
    /// Fraction of the remaining distance covered per 60 Hz frame, in (0, 1]
    pub lerp: f32,
    /// Curve for `scroll_to` animations
    pub easing: Easing,
    /// Speed in px/s below which motion counts as settled
    pub settle_epsilon: f32,
    /// Chance per update of a visibility recompute during continuous motion
    pub visibility_sample_rate: f32,
    /// Fixed seed for visibility sampling (deterministic runs)
    pub sampling_seed: Option<u64>,
    /// Always read offsets from the native scroll position
    pub force_native: bool,
}

impl ScrollParams {
    pub const DEFAULT_DURATION: f32 = 1.2;
    pub const DEFAULT_LERP: f32 = 0.1;
    pub const DEFAULT_TOUCH_INERTIA: f32 = 35.0;
    pub const DEFAULT_SETTLE_EPSILON: f32 = 6.0;
    pub const DEFAULT_SAMPLE_RATE: f32 = 0.05;

    /// Copy with every out-of-range value replaced by its default
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        Self {
            duration: positive_or(self.duration, defaults.duration, "duration"),
            wheel_multiplier: positive_or(
                self.wheel_multiplier,
                defaults.wheel_multiplier,
                "wheel_multiplier",
            ),
            touch_multiplier: positive_or(
                self.touch_multiplier,
                defaults.touch_multiplier,
                "touch_multiplier",
            ),
            touch_inertia_multiplier: non_negative_or(
                self.touch_inertia_multiplier,
                defaults.touch_inertia_multiplier,
                "touch_inertia_multiplier",
            ),
            lerp: if self.lerp > 0.0 && self.lerp <= 1.0 {
                self.lerp
            } else {
                tracing::warn!("lerp {} outside (0, 1], using {}", self.lerp, defaults.lerp);
                defaults.lerp
            },
            easing: self.easing,
            settle_epsilon: positive_or(
                self.settle_epsilon,
                defaults.settle_epsilon,
                "settle_epsilon",
            ),
            visibility_sample_rate: if self.visibility_sample_rate.is_nan() {
                tracing::warn!("visibility_sample_rate is NaN, using default");
                defaults.visibility_sample_rate
            } else {
                self.visibility_sample_rate.clamp(0.0, 1.0)
            },
            sampling_seed: self.sampling_seed,
            force_native: self.force_native,
        }
    }

    pub fn with_lerp(mut self, lerp: f32) -> Self {
        self.lerp = lerp;
        self
    }

    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_sample_rate(mut self, rate: f32) -> Self {
        self.visibility_sample_rate = rate;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.sampling_seed = Some(seed);
        self
    }

    pub fn with_force_native(mut self, force: bool) -> Self {
        self.force_native = force;
        self
    }
}

impl Default for ScrollParams {
    fn default() -> Self {
        Self {
            duration: Self::DEFAULT_DURATION,
            wheel_multiplier: 1.0,
            touch_multiplier: 1.0,
            touch_inertia_multiplier: Self::DEFAULT_TOUCH_INERTIA,
            lerp: Self::DEFAULT_LERP,
            easing: Easing::EaseOutExpo,
            settle_epsilon: Self::DEFAULT_SETTLE_EPSILON,
            visibility_sample_rate: Self::DEFAULT_SAMPLE_RATE,
            sampling_seed: None,
            force_native: false,
        }
    }
}

fn positive_or(value: f32, default: f32, name: &str) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        tracing::warn!("{} {} is not positive, using {}", name, value, default);
        default
    }
}

fn non_negative_or(value: f32, default: f32, name: &str) -> f32 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        tracing::warn!("{} {} is negative, using {}", name, value, default);
        default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_survive_sanitizing() {
        let params = ScrollParams::default();
        assert_eq!(params.sanitized(), params);
    }

    #[test]
    fn test_malformed_values_clamp_to_defaults() {
        let params = ScrollParams {
            duration: 0.0,
            wheel_multiplier: -2.0,
            touch_multiplier: f32::NAN,
            touch_inertia_multiplier: -1.0,
            lerp: 1.5,
            settle_epsilon: 0.0,
            visibility_sample_rate: 4.0,
            ..Default::default()
        }
        .sanitized();

        assert_eq!(params.duration, ScrollParams::DEFAULT_DURATION);
        assert_eq!(params.wheel_multiplier, 1.0);
        assert_eq!(params.touch_multiplier, 1.0);
        assert_eq!(params.touch_inertia_multiplier, ScrollParams::DEFAULT_TOUCH_INERTIA);
        assert_eq!(params.lerp, ScrollParams::DEFAULT_LERP);
        assert_eq!(params.settle_epsilon, ScrollParams::DEFAULT_SETTLE_EPSILON);
        assert_eq!(params.visibility_sample_rate, 1.0);
    }

    #[test]
    fn test_zero_inertia_is_kept() {
        let params = ScrollParams {
            touch_inertia_multiplier: 0.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(params.touch_inertia_multiplier, 0.0);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let params: ScrollParams = toml::from_str(
            r#"
            lerp = 0.08
            wheel_multiplier = 1.4
            easing = "smoothstep"
            "#,
        )
        .unwrap();

        assert_eq!(params.lerp, 0.08);
        assert_eq!(params.wheel_multiplier, 1.4);
        assert_eq!(params.easing, Easing::Smoothstep);
        assert_eq!(params.duration, ScrollParams::DEFAULT_DURATION);
        assert_eq!(params.sampling_seed, None);
    }
}
