//! Procedural star backdrop: a fixed cloud of points scattered through a
//! spherical shell around the rings.
//!
//! Points are sampled uniformly in direction (`phi = acos(2u - 1)`) with a
//! uniform radius inside the shell. Generation is deterministic per seed.

use std::f32::consts::TAU;
use std::ops::Range;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// A single star: immutable position and vertex color.
#[derive(Clone, Debug, PartialEq)]
pub struct StarPoint {
    /// World-space position before the bulk rotation is applied.
    pub position: glam::Vec3,
    /// Slightly green-suppressed white, `(b, 0.9 b, b)`.
    pub color: [f32; 3],
}

impl StarPoint {
    /// Brightness factor the color was derived from.
    pub fn brightness(&self) -> f32 {
        self.color[0]
    }
}

/// Generates a deterministic star cloud from a seed.
pub struct StarfieldGenerator {
    seed: u64,
    star_count: u32,
    shell: Range<f32>,
}

impl StarfieldGenerator {
    /// Default shell the stars are scattered through.
    pub const DEFAULT_SHELL: Range<f32> = 200.0..500.0;

    /// Create a generator with the default shell.
    pub fn new(seed: u64, star_count: u32) -> Self {
        Self {
            seed,
            star_count,
            shell: Self::DEFAULT_SHELL,
        }
    }

    /// Override the shell radii. An inverted range is swapped.
    pub fn with_shell(mut self, inner: f32, outer: f32) -> Self {
        self.shell = if inner <= outer {
            inner..outer
        } else {
            outer..inner
        };
        self
    }

    /// Number of stars [`generate`](Self::generate) produces.
    pub fn star_count(&self) -> u32 {
        self.star_count
    }

    /// Generate the cloud. Identical seeds give identical clouds.
    pub fn generate(&self) -> Vec<StarPoint> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut stars = Vec::with_capacity(self.star_count as usize);
        let span = self.shell.end - self.shell.start;

        for _ in 0..self.star_count {
            // Draw order is part of the seed contract: radius, theta, phi, brightness.
            let radius = self.shell.start + rng.random::<f32>() * span;
            let theta = rng.random::<f32>() * TAU;
            let phi = (2.0 * rng.random::<f32>() - 1.0).clamp(-1.0, 1.0).acos();

            let position = glam::Vec3::new(
                radius * phi.sin() * theta.cos(),
                radius * phi.sin() * theta.sin(),
                radius * phi.cos(),
            );

            let b = 0.7 + rng.random::<f32>() * 0.3;
            stars.push(StarPoint {
                position,
                color: [b, b * 0.9, b],
            });
        }

        stars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_count_matches_request() {
        let stars = StarfieldGenerator::new(42, 2000).generate();
        assert_eq!(stars.len(), 2000);
    }

    #[test]
    fn test_zero_stars() {
        assert!(StarfieldGenerator::new(42, 0).generate().is_empty());
    }

    #[test]
    fn test_stars_lie_inside_shell() {
        let stars = StarfieldGenerator::new(7, 5000).generate();
        for (i, star) in stars.iter().enumerate() {
            let r = star.position.length();
            assert!(
                (199.99..=500.01).contains(&r),
                "Star {i} at radius {r} is outside the 200..500 shell"
            );
        }
    }

    #[test]
    fn test_custom_shell_is_respected() {
        let stars = StarfieldGenerator::new(7, 500)
            .with_shell(50.0, 10.0)
            .generate();
        for star in &stars {
            let r = star.position.length();
            assert!((9.99..=50.01).contains(&r), "radius {r} outside 10..50");
        }
    }

    #[test]
    fn test_colors_follow_brightness_ratio() {
        let stars = StarfieldGenerator::new(3, 1000).generate();
        for (i, star) in stars.iter().enumerate() {
            let [r, g, b] = star.color;
            assert!((0.7..=1.0).contains(&r), "Star {i} brightness {r} outside [0.7, 1]");
            assert_eq!(r, b);
            assert!((g - 0.9 * r).abs() < 1e-6);
            assert_eq!(star.brightness(), r);
        }
    }

    #[test]
    fn test_distribution_covers_all_octants() {
        let stars = StarfieldGenerator::new(42, 8000).generate();
        let mut octant_counts = [0u32; 8];

        for star in &stars {
            let d = star.position;
            let octant = ((d.x >= 0.0) as usize)
                | (((d.y >= 0.0) as usize) << 1)
                | (((d.z >= 0.0) as usize) << 2);
            octant_counts[octant] += 1;
        }

        for (i, &count) in octant_counts.iter().enumerate() {
            assert!(
                (600..=1400).contains(&count),
                "Octant {i} has {count} stars, expected roughly 1000"
            );
        }
    }

    #[test]
    fn test_same_seed_produces_same_starfield() {
        let a = StarfieldGenerator::new(0x5EED, 1000).generate();
        let b = StarfieldGenerator::new(0x5EED, 1000).generate();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seed_produces_different_starfield() {
        let a = StarfieldGenerator::new(1, 1000).generate();
        let b = StarfieldGenerator::new(9999, 1000).generate();

        let differences = a
            .iter()
            .zip(b.iter())
            .filter(|(a, b)| (a.position - b.position).length() > 0.01)
            .count();
        assert!(
            differences > 900,
            "Expected nearly all stars to differ between seeds, only {differences}/1000 differed"
        );
    }

    #[test]
    fn test_smaller_count_is_prefix_of_larger() {
        let small = StarfieldGenerator::new(11, 100).generate();
        let large = StarfieldGenerator::new(11, 300).generate();
        assert_eq!(small[..], large[..100]);
    }
}
