//! Point and ambient lights for the ring shader.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Number of point lights the ring shader evaluates.
pub const MAX_POINT_LIGHTS: usize = 2;

/// Physically based distance falloff: inverse square, windowed to reach
/// zero at `cutoff`. A cutoff of zero disables the window.
pub fn point_light_falloff(distance: f32, cutoff: f32) -> f32 {
    let inverse_square = 1.0 / (distance * distance).max(0.01);
    if cutoff <= 0.0 {
        return inverse_square;
    }
    let ratio = distance / cutoff;
    let window = (1.0 - ratio.powi(4)).clamp(0.0, 1.0);
    inverse_square * window * window
}

/// Per-light GPU data, 48 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct PointLightGpu {
    /// xyz = world position, w = cutoff distance.
    pub position_cutoff: [f32; 4],
    /// xyz = linear RGB color, w = intensity.
    pub color_intensity: [f32; 4],
    pub _padding: [f32; 4],
}

impl PointLightGpu {
    pub fn new(position: Vec3, color: [f32; 3], intensity: f32, cutoff: f32) -> Self {
        Self {
            position_cutoff: position.extend(cutoff).to_array(),
            color_intensity: [color[0], color[1], color[2], intensity],
            _padding: [0.0; 4],
        }
    }
}

/// Light data for one frame, 112 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct LightsUniform {
    pub point_lights: [PointLightGpu; MAX_POINT_LIGHTS],
    /// rgb = ambient color already scaled by intensity, w unused.
    pub ambient: [f32; 4],
}

impl LightsUniform {
    pub fn new(point_lights: [PointLightGpu; MAX_POINT_LIGHTS], ambient: [f32; 3], intensity: f32) -> Self {
        Self {
            point_lights,
            ambient: [
                ambient[0] * intensity,
                ambient[1] * intensity,
                ambient[2] * intensity,
                0.0,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_sizes() {
        assert_eq!(std::mem::size_of::<PointLightGpu>(), 48);
        assert_eq!(std::mem::size_of::<LightsUniform>(), 112);
    }

    #[test]
    fn test_falloff_is_inverse_square_near_light() {
        let f = point_light_falloff(2.0, 120.0);
        assert!((f - 0.25).abs() < 1e-4);
    }

    #[test]
    fn test_falloff_clamps_singularity() {
        assert_eq!(point_light_falloff(0.0, 120.0), 100.0);
        assert_eq!(point_light_falloff(0.05, 120.0), 100.0);
    }

    #[test]
    fn test_falloff_reaches_zero_at_cutoff() {
        assert_eq!(point_light_falloff(120.0, 120.0), 0.0);
        assert_eq!(point_light_falloff(500.0, 120.0), 0.0);
        assert!(point_light_falloff(119.0, 120.0) > 0.0);
    }

    #[test]
    fn test_falloff_decreases_with_distance() {
        let mut last = f32::INFINITY;
        for d in [0.5, 1.0, 5.0, 20.0, 60.0, 110.0] {
            let f = point_light_falloff(d, 120.0);
            assert!(f < last);
            last = f;
        }
    }

    #[test]
    fn test_zero_cutoff_disables_window() {
        assert!((point_light_falloff(1000.0, 0.0) - 1e-6).abs() < 1e-9);
    }

    fn radiance_at(light: &PointLightGpu, distance: f32) -> [f32; 3] {
        let [r, g, b, intensity] = light.color_intensity;
        let scale = intensity * point_light_falloff(distance, light.position_cutoff[3]);
        [r * scale, g * scale, b * scale]
    }

    #[test]
    fn test_radiance_scales_color_by_intensity() {
        let light = PointLightGpu::new(Vec3::new(7.0, 3.0, 3.0), [1.0, 0.5, 0.0], 400.0, 120.0);
        let [r, g, b] = radiance_at(&light, 10.0);
        let expected = 400.0 * point_light_falloff(10.0, 120.0);
        assert!((r - expected).abs() < 1e-4);
        assert!((g - expected * 0.5).abs() < 1e-4);
        assert_eq!(b, 0.0);
    }

    #[test]
    fn test_ambient_premultiplied() {
        let lights = LightsUniform::new([PointLightGpu::zeroed(); 2], [1.0, 1.0, 1.0], 0.35);
        assert_eq!(lights.ambient, [0.35, 0.35, 0.35, 0.0]);
    }
}
