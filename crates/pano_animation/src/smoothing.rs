//! Damped interpolation toward a moving target

/// Nominal frame rate the `lerp` smoothing factor is tuned for
pub const REFERENCE_FPS: f32 = 60.0;

/// Linear interpolation between `from` and `to`
#[inline]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Frame-rate independent exponential smoothing.
///
/// Moves `current` toward `target` by `1 - e^(-lambda·dt)` of the remaining
/// distance. With `lambda = lerp · 60` one step at 60 fps covers exactly `lerp`
/// of the distance, so a smoothing factor tuned for 60 Hz behaves the same at
/// 120 Hz. The result never overshoots `target`.
#[inline]
pub fn damp(current: f32, target: f32, lambda: f32, dt: f32) -> f32 {
    if dt <= 0.0 || lambda <= 0.0 {
        return current;
    }
    lerp(current, target, 1.0 - (-lambda * dt).exp())
}

/// Smoothing rate for a per-frame `lerp` factor
#[inline]
pub fn lambda_for_lerp(lerp_factor: f32) -> f32 {
    // 1 - e^(-λ/60) = lerp  =>  λ = -60·ln(1 - lerp)
    if lerp_factor >= 1.0 {
        return f32::INFINITY;
    }
    -REFERENCE_FPS * (1.0 - lerp_factor).ln()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damp_moves_toward_target_without_overshoot() {
        let mut value = 0.0;
        for _ in 0..200 {
            let next = damp(value, 100.0, lambda_for_lerp(0.1), 1.0 / 60.0);
            assert!(next >= value && next <= 100.0);
            value = next;
        }
        assert!((value - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_lerp_factor_is_exact_at_reference_rate() {
        let next = damp(0.0, 100.0, lambda_for_lerp(0.1), 1.0 / REFERENCE_FPS);
        assert!((next - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_frame_rate_independence() {
        let lambda = lambda_for_lerp(0.1);
        let at_60 = damp(0.0, 100.0, lambda, 1.0 / 60.0);

        let mut at_120 = 0.0;
        for _ in 0..2 {
            at_120 = damp(at_120, 100.0, lambda, 1.0 / 120.0);
        }
        assert!((at_60 - at_120).abs() < 1e-3);
    }

    #[test]
    fn test_full_lerp_snaps() {
        assert_eq!(damp(0.0, 50.0, lambda_for_lerp(1.0), 1.0 / 60.0), 50.0);
        assert_eq!(damp(5.0, 50.0, 10.0, 0.0), 5.0);
    }
}
