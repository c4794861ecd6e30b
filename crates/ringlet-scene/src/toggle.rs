//! Click-driven scale toggle between a small and a large ring size.

use glam::Vec3;
use tracing::debug;

use crate::body::RotatingBody;
use crate::easing::Easing;
use crate::tween::Tween;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleToggle {
    pub min_scale: f32,
    pub max_scale: f32,
    /// Seconds.
    pub duration: f32,
    pub easing: Easing,
}

impl Default for ScaleToggle {
    fn default() -> Self {
        Self {
            min_scale: 0.5,
            max_scale: 3.0,
            duration: 1.0,
            easing: Easing::BounceOut,
        }
    }
}

impl ScaleToggle {
    /// Target uniform scale for a ring whose current x scale is `current`.
    ///
    /// A ring at or above the large size shrinks, anything else grows. A ring
    /// caught mid-bounce below the large size therefore grows again.
    pub fn target_for(&self, current: f32) -> f32 {
        if current >= self.max_scale {
            self.min_scale
        } else {
            self.max_scale
        }
    }

    /// Start a tween on every ring. Each ring decides from its own scale, and
    /// any tween in flight is replaced starting from the current value.
    pub fn apply(&self, bodies: &mut [RotatingBody]) {
        for body in bodies {
            let current = body.scale();
            let target = self.target_for(current.x);
            debug!(body = %body.id(), from = current.x, to = target, "scale toggle");
            body.start_tween(Tween::new(
                current,
                Vec3::splat(target),
                self.duration,
                self.easing,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodyId;

    #[test]
    fn test_target_thresholds() {
        let toggle = ScaleToggle::default();
        assert_eq!(toggle.target_for(3.0), 0.5);
        assert_eq!(toggle.target_for(3.2), 0.5);
        assert_eq!(toggle.target_for(2.99), 3.0);
        assert_eq!(toggle.target_for(0.5), 3.0);
        assert_eq!(toggle.target_for(1.25), 3.0);
    }

    #[test]
    fn test_apply_starts_tween_from_current_scale() {
        let mut bodies: Vec<_> = BodyId::ALL.into_iter().map(RotatingBody::new).collect();
        bodies[0].set_scale(Vec3::splat(3.0));
        ScaleToggle::default().apply(&mut bodies);

        let first = bodies[0].tween().unwrap();
        assert_eq!(first.value(), Vec3::splat(3.0));
        assert_eq!(first.target(), Vec3::splat(0.5));
        for body in &bodies[1..] {
            let tween = body.tween().unwrap();
            assert_eq!(tween.value(), body.scale());
            assert_eq!(tween.target(), Vec3::splat(3.0));
        }
    }

    #[test]
    fn test_retrigger_replaces_tween() {
        let mut bodies = vec![RotatingBody::new(BodyId::Outer)];
        let toggle = ScaleToggle::default();
        toggle.apply(&mut bodies);
        bodies[0].advance_tween(0.3);
        let mid = bodies[0].scale();

        toggle.apply(&mut bodies);
        let tween = bodies[0].tween().unwrap();
        assert_eq!(tween.value(), mid);
        assert_eq!(tween.progress(), 0.0);
    }
}
