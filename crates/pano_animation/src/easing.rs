//! Easing curves for scroll animations

use serde::{Deserialize, Serialize};

/// Easing curve mapping linear progress in [0, 1] to eased progress
///
/// Every curve is monotonic and maps 0 to 0 and 1 to 1, so an eased scroll
/// never overshoots its target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseOutCubic,
    EaseInOutCubic,
    EaseOutQuart,
    /// `min(1, 1.001 - 2^(-10t))`, the classic smooth-scroll curve
    #[default]
    EaseOutExpo,
    /// `t²(3 - 2t)`
    Smoothstep,
    /// CSS `cubic-bezier(x1, y1, x2, y2)`
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Apply the easing curve. Input outside [0, 1] is clamped.
    pub fn apply(&self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Easing::Linear => t,
            Easing::EaseInQuad => t * t,
            Easing::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseOutQuart => 1.0 - (1.0 - t).powi(4),
            Easing::EaseOutExpo => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else {
                    (1.001 - 2f32.powf(-10.0 * t)).clamp(0.0, 1.0)
                }
            }
            Easing::Smoothstep => t * t * (3.0 - 2.0 * t),
            Easing::CubicBezier(x1, y1, x2, y2) => {
                CubicBezier::new(*x1, *y1, *x2, *y2).solve(t)
            }
        }
    }
}

/// Cubic bezier with fixed endpoints (0,0) and (1,1), as in CSS.
///
/// Computes in f64 to avoid f32 jitter at high refresh rates.
struct CubicBezier {
    x: Polynomial,
    y: Polynomial,
}

/// `((a·t + b)·t + c)·t` for one coordinate of the curve
struct Polynomial {
    a: f64,
    b: f64,
    c: f64,
}

impl Polynomial {
    fn new(p1: f32, p2: f32) -> Self {
        let (p1, p2) = (p1 as f64, p2 as f64);
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        Self {
            a: 1.0 - c - b,
            b,
            c,
        }
    }

    #[inline]
    fn sample(&self, t: f64) -> f64 {
        ((self.a * t + self.b) * t + self.c) * t
    }

    #[inline]
    fn slope(&self, t: f64) -> f64 {
        (3.0 * self.a * t + 2.0 * self.b) * t + self.c
    }
}

impl CubicBezier {
    const EPSILON: f64 = 1e-7;

    fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        // x control points outside [0, 1] make the curve non-invertible
        Self {
            x: Polynomial::new(x1.clamp(0.0, 1.0), x2.clamp(0.0, 1.0)),
            y: Polynomial::new(y1, y2),
        }
    }

    fn solve(&self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        let param = self.param_for_x(t as f64);
        self.y.sample(param) as f32
    }

    /// Newton-Raphson, with bisection when the slope flattens out
    fn param_for_x(&self, x: f64) -> f64 {
        let mut p = x;
        for _ in 0..8 {
            let err = self.x.sample(p) - x;
            if err.abs() < Self::EPSILON {
                return p;
            }
            let slope = self.x.slope(p);
            if slope.abs() < Self::EPSILON {
                break;
            }
            p -= err / slope;
        }

        let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
        p = x;
        for _ in 0..24 {
            let val = self.x.sample(p);
            if (val - x).abs() < Self::EPSILON {
                break;
            }
            if val < x {
                lo = p;
            } else {
                hi = p;
            }
            p = (lo + hi) * 0.5;
        }
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 10] = [
        Easing::Linear,
        Easing::EaseInQuad,
        Easing::EaseOutQuad,
        Easing::EaseInOutQuad,
        Easing::EaseOutCubic,
        Easing::EaseInOutCubic,
        Easing::EaseOutQuart,
        Easing::EaseOutExpo,
        Easing::Smoothstep,
        Easing::CubicBezier(0.25, 0.1, 0.25, 1.0),
    ];

    #[test]
    fn test_endpoints_are_exact() {
        for easing in ALL {
            assert_eq!(easing.apply(0.0).abs(), 0.0, "{:?} at 0", easing);
            assert_eq!(easing.apply(1.0), 1.0, "{:?} at 1", easing);
        }
    }

    #[test]
    fn test_curves_are_monotonic() {
        for easing in ALL {
            let mut prev = 0.0;
            for i in 0..=100 {
                let v = easing.apply(i as f32 / 100.0);
                assert!(v + 1e-6 >= prev, "{:?} decreased at step {}", easing, i);
                prev = v;
            }
        }
    }

    #[test]
    fn test_out_of_range_input_is_clamped() {
        assert_eq!(Easing::EaseOutExpo.apply(-1.0), 0.0);
        assert_eq!(Easing::EaseOutExpo.apply(3.0), 1.0);
        assert_eq!(Easing::Linear.apply(f32::NAN), 0.0);
    }

    #[test]
    fn test_cubic_bezier_linear_matches_identity() {
        let linear = Easing::CubicBezier(0.0, 0.0, 1.0, 1.0);
        for i in 1..10 {
            let t = i as f32 / 10.0;
            assert!((linear.apply(t) - t).abs() < 1e-4);
        }
    }
}
