//! Perspective camera with reverse-Z projection and a target-tracking look-at.

use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Quat, Vec3};

/// Camera data for the ring shader, 80 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    /// xyz = world position, w unused.
    pub position: [f32; 4],
}

/// A perspective camera.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    /// Rotation as a unit quaternion. Identity looks down -Z with +Y up.
    pub rotation: Quat,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Width / height.
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Camera with a vertical field of view in degrees.
    pub fn perspective(fov_y_degrees: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            fov_y: fov_y_degrees.to_radians(),
            aspect_ratio,
            near,
            far,
        }
    }

    /// Orient the camera so its forward axis points at `target`.
    ///
    /// Degenerate inputs keep a valid orientation: when the camera sits on the
    /// target it looks down -Z, and when the view direction is parallel to
    /// `up` the direction is nudged slightly off the up axis.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        // Basis z points from the target back toward the camera.
        let mut z = self.position - target;
        if z.length_squared() == 0.0 {
            z = Vec3::Z;
        }
        z = z.normalize();

        let mut x = up.cross(z);
        if x.length_squared() == 0.0 {
            if up.z.abs() == 1.0 {
                z.x += 0.0001;
            } else {
                z.z += 0.0001;
            }
            z = z.normalize();
            x = up.cross(z);
        }
        let x = x.normalize();
        let y = z.cross(x);

        self.rotation = Quat::from_mat3(&Mat3::from_cols(x, y, z)).normalize();
    }

    /// Inverse of the camera transform.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position).inverse()
    }

    /// Reverse-Z perspective: near maps to 1, far maps to 0.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect_ratio, self.far, self.near)
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// The forward direction vector (-Z in camera space).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Update the aspect ratio; a zero height leaves it unchanged.
    pub fn set_aspect_ratio(&mut self, width: f32, height: f32) {
        if height > 0.0 {
            self.aspect_ratio = width / height;
        }
    }

    pub fn to_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_projection_matrix().to_cols_array_2d(),
            position: self.position.extend(0.0).to_array(),
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::perspective(45.0, 16.0 / 9.0, 0.1, 1000.0)
    }
}
