//! Procedural torus mesh with tangents for normal mapping.
//!
//! The ring lies in the XY plane around the Z axis. `u` runs around the
//! ring and `v` around the tube. Seam vertices are duplicated so UVs cover
//! the full `[0, 1]` range without wrapping.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3, Vec4};
use ringlet_render::RingVertex;

/// Torus dimensions and tessellation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TorusGeometry {
    /// Distance from the center to the middle of the tube.
    pub radius: f32,
    /// Tube radius.
    pub tube: f32,
    /// Segments around the tube.
    pub radial_segments: u32,
    /// Segments around the ring.
    pub tubular_segments: u32,
}

/// CPU-side mesh ready for upload.
#[derive(Clone, Debug, Default)]
pub struct TorusMesh {
    pub vertices: Vec<RingVertex>,
    pub indices: Vec<u32>,
}

impl TorusGeometry {
    /// Segment counts below 3 are raised to 3 when the mesh is built.
    pub const fn new(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Self {
        Self {
            radius,
            tube,
            radial_segments,
            tubular_segments,
        }
    }

    pub fn vertex_count(&self) -> usize {
        let (radial, tubular) = self.segments();
        ((radial + 1) * (tubular + 1)) as usize
    }

    pub fn index_count(&self) -> usize {
        let (radial, tubular) = self.segments();
        (radial * tubular * 6) as usize
    }

    fn segments(&self) -> (u32, u32) {
        (self.radial_segments.max(3), self.tubular_segments.max(3))
    }

    pub fn build(&self) -> TorusMesh {
        let (radial, tubular) = self.segments();
        let mut vertices = Vec::with_capacity(self.vertex_count());
        let mut indices = Vec::with_capacity(self.index_count());

        for j in 0..=radial {
            let v_frac = j as f32 / radial as f32;
            let v = v_frac * TAU;
            let (sin_v, cos_v) = v.sin_cos();

            for i in 0..=tubular {
                let u_frac = i as f32 / tubular as f32;
                let u = u_frac * TAU;
                let (sin_u, cos_u) = u.sin_cos();

                let ring = self.radius + self.tube * cos_v;
                let position = Vec3::new(ring * cos_u, ring * sin_u, self.tube * sin_v);
                let normal = Vec3::new(cos_v * cos_u, cos_v * sin_u, sin_v);
                // d(position)/du, normalized. The bitangent d/dv equals
                // normal x tangent, so the handedness sign is always +1.
                let tangent = Vec4::new(-sin_u, cos_u, 0.0, 1.0);
                // Image rows are stored top-down, so v is flipped to keep the
                // texture upright with v growing around the tube.
                let uv = Vec2::new(u_frac, 1.0 - v_frac);

                vertices.push(RingVertex::from_parts(position, normal, tangent, uv));
            }
        }

        let row = tubular + 1;
        for j in 1..=radial {
            for i in 1..=tubular {
                let a = row * j + i - 1;
                let b = row * (j - 1) + i - 1;
                let c = row * (j - 1) + i;
                let d = row * j + i;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        TorusMesh { vertices, indices }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> TorusGeometry {
        TorusGeometry::new(2.0, 0.5, 8, 16)
    }

    #[test]
    fn test_counts() {
        let mesh = small().build();
        assert_eq!(mesh.vertices.len(), 9 * 17);
        assert_eq!(mesh.indices.len(), 8 * 16 * 6);
        assert_eq!(mesh.vertices.len(), small().vertex_count());
        assert_eq!(mesh.indices.len(), small().index_count());
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn test_segments_are_clamped() {
        let mesh = TorusGeometry::new(1.0, 0.1, 0, 1).build();
        assert_eq!(mesh.vertices.len(), 16);
        assert_eq!(mesh.indices.len(), 54);
    }

    #[test]
    fn test_vertices_lie_on_tube_surface() {
        let geometry = small();
        for v in geometry.build().vertices {
            let p = Vec3::from(v.position);
            let center = Vec3::new(p.x, p.y, 0.0).normalize() * geometry.radius;
            assert!(((p - center).length() - geometry.tube).abs() < 1e-4);
        }
    }

    #[test]
    fn test_normals_point_away_from_tube_center() {
        let geometry = small();
        for v in geometry.build().vertices {
            let p = Vec3::from(v.position);
            let n = Vec3::from(v.normal);
            let center = Vec3::new(p.x, p.y, 0.0).normalize() * geometry.radius;
            assert!((n.length() - 1.0).abs() < 1e-5);
            assert!(n.dot(p - center) > 0.0);
        }
    }

    #[test]
    fn test_tangent_frame_is_orthonormal_and_right_handed() {
        for v in small().build().vertices {
            let n = Vec3::from(v.normal);
            let t = Vec3::new(v.tangent[0], v.tangent[1], v.tangent[2]);
            assert!(n.dot(t).abs() < 1e-5);
            assert!((t.length() - 1.0).abs() < 1e-5);
            assert_eq!(v.tangent[3], 1.0);
        }
    }

    #[test]
    fn test_triangles_face_outward() {
        let mesh = small().build();
        let geometry = small();
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec3::from(mesh.vertices[i as usize].position));
            let face_normal = (b - a).cross(c - a);
            if face_normal.length() < 1e-6 {
                continue;
            }
            let centroid = (a + b + c) / 3.0;
            let center = Vec3::new(centroid.x, centroid.y, 0.0).normalize() * geometry.radius;
            assert!(face_normal.dot(centroid - center) > 0.0);
        }
    }

    #[test]
    fn test_uv_covers_unit_square() {
        let mesh = small().build();
        let first = mesh.vertices.first().unwrap().uv;
        let last = mesh.vertices.last().unwrap().uv;
        assert_eq!(first, [0.0, 1.0]);
        assert_eq!(last, [1.0, 0.0]);
    }
}
