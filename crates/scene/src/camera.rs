//! Camera systems for viewport rendering.

use glam::{Mat4, Quat, Vec3};

/// Projection type for the camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Projection {
    /// Perspective projection
    Perspective {
        fov_y: f32,
        aspect: f32,
        near: f32,
        far: f32,
    },
    /// Orthographic projection; `size` is the half-height of the view
    /// volume, the half-width follows from the aspect ratio.
    Orthographic {
        size: f32,
        aspect: f32,
        near: f32,
        far: f32,
    },
}

/// A camera rendering into a viewport region.
#[derive(Clone, Debug)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,
    /// Camera rotation
    pub rotation: Quat,
    /// Projection settings
    pub projection: Projection,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            rotation: Quat::IDENTITY,
            projection: Projection::Perspective {
                fov_y: 45.0_f32.to_radians(),
                aspect: 1.0,
                near: 0.1,
                far: 1000.0,
            },
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the perspective projection.
    pub fn set_perspective(&mut self, fov_y: f32, aspect: f32, near: f32, far: f32) {
        self.projection = Projection::Perspective {
            fov_y,
            aspect,
            near,
            far,
        };
    }

    /// Set the orthographic projection.
    pub fn set_orthographic(&mut self, size: f32, aspect: f32, near: f32, far: f32) {
        self.projection = Projection::Orthographic {
            size,
            aspect,
            near,
            far,
        };
    }

    /// Update the aspect ratio, keeping the other projection parameters.
    pub fn set_aspect(&mut self, new_aspect: f32) {
        match &mut self.projection {
            Projection::Perspective { aspect, .. } => *aspect = new_aspect,
            Projection::Orthographic { aspect, .. } => *aspect = new_aspect,
        }
    }

    /// Get the view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        let forward = self.rotation * Vec3::NEG_Z;
        let up = self.rotation * Vec3::Y;
        let target = self.position + forward;
        Mat4::look_at_rh(self.position, target, up)
    }

    /// Get the projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        match self.projection {
            Projection::Perspective {
                fov_y,
                aspect,
                near,
                far,
            } => Mat4::perspective_rh(fov_y, aspect, near, far),
            Projection::Orthographic {
                size,
                aspect,
                near,
                far,
            } => {
                let half_width = size * aspect;
                Mat4::orthographic_rh(-half_width, half_width, -size, size, near, far)
            }
        }
    }

    /// Get the view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Get the forward direction vector.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Get the right direction vector.
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Get the up direction vector.
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Look at a target position.
    pub fn look_at(&mut self, target: Vec3) {
        let offset = target - self.position;
        if offset.length_squared() > 0.0 {
            self.rotation = Quat::from_rotation_arc(Vec3::NEG_Z, offset.normalize());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq_vec3(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPSILON
    }

    #[test]
    fn test_default_faces_negative_z() {
        let camera = Camera::default();
        assert_eq!(camera.forward(), Vec3::NEG_Z);
        assert_eq!(camera.right(), Vec3::X);
        assert_eq!(camera.up(), Vec3::Y);
    }

    #[test]
    fn test_look_at_points_forward_at_target() {
        let mut camera = Camera::new();
        camera.position = Vec3::new(10.0, 0.0, 0.0);
        camera.look_at(Vec3::ZERO);

        assert!(approx_eq_vec3(camera.forward(), Vec3::NEG_X));
    }

    #[test]
    fn test_look_at_straight_down() {
        let mut camera = Camera::new();
        camera.position = Vec3::new(0.0, 10.0, 0.0);
        camera.look_at(Vec3::ZERO);

        assert!(approx_eq_vec3(camera.forward(), Vec3::NEG_Y));
    }

    #[test]
    fn test_set_aspect_updates_either_projection() {
        let mut camera = Camera::new();
        camera.set_aspect(2.0);
        assert!(matches!(
            camera.projection,
            Projection::Perspective { aspect, .. } if aspect == 2.0
        ));

        camera.set_orthographic(5.0, 1.0, 0.1, 100.0);
        camera.set_aspect(0.5);
        assert!(matches!(
            camera.projection,
            Projection::Orthographic { aspect, .. } if aspect == 0.5
        ));
    }

    #[test]
    fn test_orthographic_extents_follow_aspect() {
        let mut camera = Camera::new();
        camera.set_orthographic(2.0, 2.0, 0.1, 10.0);
        let proj = camera.projection_matrix();

        // A point at the right edge of the volume maps to clip x = 1.
        let edge = proj.project_point3(Vec3::new(4.0, 0.0, -1.0));
        assert!((edge.x - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_view_projection_centers_target() {
        let mut camera = Camera::new();
        camera.position = Vec3::new(0.0, 0.0, 5.0);
        camera.look_at(Vec3::ZERO);

        let clip = camera
            .view_projection_matrix()
            .project_point3(Vec3::ZERO);
        assert!(clip.x.abs() < EPSILON);
        assert!(clip.y.abs() < EPSILON);
    }
}
