//! Wall-clock driven starfield pose: slow bulk rotation plus a gentle
//! opacity oscillation.
//!
//! The pose is a pure function of the clock reading. Calling it twice with the
//! same time yields the same pose, so nothing accumulates between frames.

use std::f64::consts::TAU;
use std::time::{SystemTime, UNIX_EPOCH};

/// Phase advance per wall-clock millisecond.
pub const PHASE_PER_MILLI: f64 = 0.0005;
/// Bulk rotation (radians about Y) per unit of phase.
pub const ROTATION_PER_PHASE: f64 = 0.1;
/// Opacity at phase zero and the center of the oscillation.
pub const BASE_OPACITY: f32 = 0.6;
/// Opacity swing either side of [`BASE_OPACITY`].
pub const OPACITY_SWING: f32 = 0.2;
const MIN_OPACITY: f32 = 0.4;
const MAX_OPACITY: f32 = 0.8;

/// Phase `t` for a wall-clock reading in milliseconds.
pub fn phase_from_millis(millis: f64) -> f64 {
    millis * PHASE_PER_MILLI
}

/// Milliseconds since the Unix epoch, or zero if the clock is before it.
pub fn now_millis() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// Per-frame starfield state handed to the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarfieldPose {
    /// Rotation about the world Y axis, in radians within `[0, 2π)`.
    pub rotation_y: f32,
    /// Global star opacity, always within `[0.4, 0.8]`.
    pub opacity: f32,
}

impl StarfieldPose {
    /// Pose at phase `t`.
    ///
    /// Epoch-based phases are large (around 10⁹ ms × 0.0005), so the angle is
    /// reduced modulo 2π in `f64` before narrowing.
    pub fn at_phase(t: f64) -> Self {
        let rotation_y = (t * ROTATION_PER_PHASE).rem_euclid(TAU) as f32;
        let opacity = (f64::from(BASE_OPACITY) + f64::from(OPACITY_SWING) * t.sin()) as f32;
        Self {
            rotation_y,
            opacity: opacity.clamp(MIN_OPACITY, MAX_OPACITY),
        }
    }

    /// Pose for a wall-clock reading in milliseconds.
    pub fn at_millis(millis: f64) -> Self {
        Self::at_phase(phase_from_millis(millis))
    }

    /// Model matrix for the star cloud.
    pub fn model_matrix(&self) -> glam::Mat4 {
        glam::Mat4::from_rotation_y(self.rotation_y)
    }
}

impl Default for StarfieldPose {
    fn default() -> Self {
        Self::at_phase(0.0)
    }
}
