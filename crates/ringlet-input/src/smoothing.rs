//! Discrete-time exponential smoothing.
//!
//! Each call moves the value a fixed fraction of the way toward its target.
//! The step is not normalized by elapsed time; call it once per rendered
//! frame.

use glam::Vec2;

/// One smoothing step: `current + (target - current) * coefficient`.
///
/// Stable and overshoot-free for coefficients in `(0, 1]`.
#[inline]
#[must_use]
pub fn smooth_toward(current: f32, target: f32, coefficient: f32) -> f32 {
    current + (target - current) * coefficient
}

/// A pair of independently smoothed scalars sharing one coefficient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Smoothed {
    value: Vec2,
    coefficient: f32,
}

impl Smoothed {
    /// Starts at zero with the given per-frame coefficient.
    #[must_use]
    pub fn new(coefficient: f32) -> Self {
        Self {
            value: Vec2::ZERO,
            coefficient,
        }
    }

    /// Advances both components one frame toward `target`.
    pub fn step(&mut self, target: Vec2) {
        self.value.x = smooth_toward(self.value.x, target.x, self.coefficient);
        self.value.y = smooth_toward(self.value.y, target.y, self.coefficient);
    }

    /// Current smoothed value.
    #[must_use]
    pub fn value(&self) -> Vec2 {
        self.value
    }

    /// Per-frame coefficient.
    #[must_use]
    pub fn coefficient(&self) -> f32 {
        self.coefficient
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_step_moves_by_coefficient() {
        assert!((smooth_toward(0.0, 10.0, 0.1) - 1.0).abs() < 1e-6);
        assert!((smooth_toward(5.0, 5.0, 0.07) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_full_coefficient_snaps_to_target() {
        assert_eq!(smooth_toward(-3.0, 8.0, 1.0), 8.0);
    }

    #[test]
    fn test_converges_monotonically_without_overshoot() {
        for &c in &[0.01_f32, 0.07, 0.1, 0.5, 0.9, 1.0] {
            for &target in &[1.0_f32, -4.0, 250.0] {
                let mut s = 0.0_f32;
                let mut prev_gap = (target - s).abs();
                for _ in 0..2000 {
                    s = smooth_toward(s, target, c);
                    let gap = (target - s).abs();
                    assert!(gap <= prev_gap, "gap grew for c={c}, target={target}");
                    assert!(
                        (target >= 0.0 && s <= target) || (target < 0.0 && s >= target),
                        "overshoot for c={c}, target={target}: {s}"
                    );
                    prev_gap = gap;
                }
                assert!((s - target).abs() < 1e-3 * target.abs().max(1.0));
            }
        }
    }

    #[test]
    fn test_smoothed_pair_steps_components_independently() {
        let mut smoothed = Smoothed::new(0.5);
        smoothed.step(Vec2::new(2.0, -4.0));
        assert_eq!(smoothed.value(), Vec2::new(1.0, -2.0));
        smoothed.step(Vec2::new(2.0, 0.0));
        assert_eq!(smoothed.value(), Vec2::new(1.5, -1.0));
    }

    #[test]
    fn test_smoothed_starts_at_zero() {
        let smoothed = Smoothed::new(0.07);
        assert_eq!(smoothed.value(), Vec2::ZERO);
        assert_eq!(smoothed.coefficient(), 0.07);
    }
}
