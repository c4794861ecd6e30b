//! Maps the persisted [`Config`] onto the scene and starfield types.

use glam::Vec2;
use ringlet_config::{Config, EasingCurve};
use ringlet_scene::{Easing, ScaleToggle, SceneTuning};
use ringlet_space::StarfieldGenerator;

pub fn scene_tuning(config: &Config) -> SceneTuning {
    let scene = &config.scene;
    SceneTuning {
        scroll_speed: scene.scroll_speed,
        scroll_smoothing: scene.scroll_smoothing,
        mouse_smoothing: scene.mouse_smoothing,
        gaze_range: Vec2::new(scene.gaze_range.0, scene.gaze_range.1),
        fov_degrees: scene.fov_degrees,
        near: scene.near,
        far: scene.far,
        camera_depth: scene.camera_depth,
        wheel_line_height_px: config.input.wheel_line_height_px,
        toggle: ScaleToggle {
            min_scale: scene.toggle_min_scale,
            max_scale: scene.toggle_max_scale,
            duration: scene.tween_seconds,
            easing: easing(scene.toggle_easing),
        },
    }
}

fn easing(curve: EasingCurve) -> Easing {
    match curve {
        EasingCurve::Linear => Easing::Linear,
        EasingCurve::EaseOut => Easing::EaseOut,
        EasingCurve::BounceOut => Easing::BounceOut,
    }
}

pub fn starfield_generator(config: &Config) -> StarfieldGenerator {
    let scene = &config.scene;
    StarfieldGenerator::new(scene.star_seed, scene.star_count)
        .with_shell(scene.star_inner_radius, scene.star_outer_radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_default_tuning() {
        assert_eq!(scene_tuning(&Config::default()), SceneTuning::default());
    }

    #[test]
    fn test_overrides_flow_through() {
        let mut config = Config::default();
        config.scene.gaze_range = (10.0, 5.0);
        config.scene.tween_seconds = 0.25;
        config.input.wheel_line_height_px = 16.0;
        let tuning = scene_tuning(&config);
        assert_eq!(tuning.gaze_range, Vec2::new(10.0, 5.0));
        assert_eq!(tuning.toggle.duration, 0.25);
        assert_eq!(tuning.wheel_line_height_px, 16.0);
    }

    #[test]
    fn test_configured_easing_reaches_toggle() {
        let mut config = Config::default();
        assert_eq!(scene_tuning(&config).toggle.easing, Easing::BounceOut);
        config.scene.toggle_easing = EasingCurve::Linear;
        assert_eq!(scene_tuning(&config).toggle.easing, Easing::Linear);
        config.scene.toggle_easing = EasingCurve::EaseOut;
        assert_eq!(scene_tuning(&config).toggle.easing, Easing::EaseOut);
    }

    #[test]
    fn test_starfield_uses_configured_count() {
        let mut config = Config::default();
        config.scene.star_count = 17;
        assert_eq!(starfield_generator(&config).star_count(), 17);
    }
}
