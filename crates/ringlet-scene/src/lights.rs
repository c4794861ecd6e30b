//! The fixed light rig: a white key light, a blue rim light and ambient fill.

use glam::Vec3;
use ringlet_materials::hex_to_linear;
use ringlet_render::{LightsUniform, PointLightGpu};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLightDef {
    pub position: Vec3,
    /// `#rrggbb`, sRGB.
    pub color: &'static str,
    pub intensity: f32,
    /// Distance at which the light's contribution reaches zero.
    pub cutoff: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientLightDef {
    pub color: &'static str,
    pub intensity: f32,
}

pub const FRONT_LIGHT: PointLightDef = PointLightDef {
    position: Vec3::new(7.0, 3.0, 3.0),
    color: "#ffffff",
    intensity: 400.0,
    cutoff: 120.0,
};

pub const RIM_LIGHT: PointLightDef = PointLightDef {
    position: Vec3::new(-7.0, -3.0, -7.0),
    color: "#0066ff",
    intensity: 100.0,
    cutoff: 120.0,
};

pub const AMBIENT_LIGHT: AmbientLightDef = AmbientLightDef {
    color: "#ffffff",
    intensity: 0.35,
};

fn linear(hex: &str) -> [f32; 3] {
    hex_to_linear(hex).unwrap_or([1.0, 1.0, 1.0])
}

impl PointLightDef {
    pub fn to_gpu(&self) -> PointLightGpu {
        PointLightGpu::new(self.position, linear(self.color), self.intensity, self.cutoff)
    }
}

/// GPU light data for the fixed rig.
pub fn light_rig() -> LightsUniform {
    LightsUniform::new(
        [FRONT_LIGHT.to_gpu(), RIM_LIGHT.to_gpu()],
        linear(AMBIENT_LIGHT.color),
        AMBIENT_LIGHT.intensity,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rig_colors_parse() {
        for hex in [FRONT_LIGHT.color, RIM_LIGHT.color, AMBIENT_LIGHT.color] {
            assert!(hex_to_linear(hex).is_ok(), "{hex}");
        }
    }

    #[test]
    fn test_rig_uniform() {
        let rig = light_rig();
        assert_eq!(rig.point_lights[0].position_cutoff, [7.0, 3.0, 3.0, 120.0]);
        assert_eq!(rig.point_lights[0].color_intensity, [1.0, 1.0, 1.0, 400.0]);
        let rim = rig.point_lights[1].color_intensity;
        assert_eq!(rim[0], 0.0);
        assert_eq!(rim[2], 1.0);
        assert_eq!(rim[3], 100.0);
        assert_eq!(rig.ambient, [0.35, 0.35, 0.35, 0.0]);
    }
}
