//! Easing curves for scale tweens.

/// Maps linear progress in `[0, 1]` to eased progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Fast start, slow end.
    EaseOut,
    /// Reaches the end early, then approaches it with three decaying bounces.
    #[default]
    BounceOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::BounceOut => bounce_out(t),
        }
    }
}

/// Piecewise-parabolic bounce. Reaches 1.0 at `t = 1/2.75`, then bounces at
/// decreasing heights of 0.25, 0.0625 and 0.015625 below 1.0.
fn bounce_out(t: f32) -> f32 {
    const N: f32 = 7.5625;
    const D: f32 = 2.75;

    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let t = t - 1.5 / D;
        N * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        N * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        N * t * t + 0.984375
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 3] = [Easing::Linear, Easing::EaseOut, Easing::BounceOut];

    #[test]
    fn test_all_start_at_zero_end_at_one() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-6, "{easing:?} at t=0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{easing:?} at t=1");
        }
    }

    #[test]
    fn test_input_is_clamped() {
        for easing in ALL {
            assert_eq!(easing.apply(-3.0), easing.apply(0.0));
            assert_eq!(easing.apply(7.0), easing.apply(1.0));
        }
    }

    #[test]
    fn test_bounce_touches_one_at_first_impact() {
        assert!((Easing::BounceOut.apply(1.0 / 2.75) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_bounce_dips_between_impacts() {
        // Apex of the first bounce sits 0.25 below the end value.
        assert!((Easing::BounceOut.apply(1.5 / 2.75) - 0.75).abs() < 1e-5);
        assert!((Easing::BounceOut.apply(2.25 / 2.75) - 0.9375).abs() < 1e-5);
    }

    #[test]
    fn test_bounce_stays_in_unit_range() {
        for i in 0..=1000 {
            let v = Easing::BounceOut.apply(i as f32 / 1000.0);
            assert!((0.0..=1.0 + 1e-5).contains(&v), "bounce({i}) = {v}");
        }
    }

    #[test]
    fn test_ease_out_ends_slow() {
        let t = Easing::EaseOut.apply(0.75);
        assert!((t - 0.9375).abs() < 1e-6);
    }
}
