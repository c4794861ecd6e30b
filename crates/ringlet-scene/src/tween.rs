//! Time-bounded eased interpolation of a scale vector.

use glam::Vec3;

use crate::easing::Easing;

/// Interpolates from `from` to `to` over `duration` seconds.
///
/// A zero duration is clamped to a tiny positive value so the first
/// [`advance`](Self::advance) lands exactly on the target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    from: Vec3,
    to: Vec3,
    duration: f32,
    elapsed: f32,
    easing: Easing,
}

impl Tween {
    pub fn new(from: Vec3, to: Vec3, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration: duration.max(f32::EPSILON),
            elapsed: 0.0,
            easing,
        }
    }

    /// Advance by `dt` seconds and return the new value.
    pub fn advance(&mut self, dt: f32) -> Vec3 {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        self.value()
    }

    pub fn value(&self) -> Vec3 {
        if self.is_finished() {
            return self.to;
        }
        let t = self.easing.apply(self.elapsed / self.duration);
        self.from + (self.to - self.from) * t
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn target(&self) -> Vec3 {
        self.to
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        self.elapsed / self.duration
    }
}
