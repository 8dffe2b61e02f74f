use crate::coords::{Mat4, Vec3};

/// Perspective camera.
///
/// Defaults: 60° vertical field of view, near plane 0.3, far plane 1000,
/// sitting at the origin and looking down -Z.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    target: Vec3,
    up: Vec3,
    fov_y_deg: f32,
    aspect: f32,
    near: f32,
    far: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        let mut cam = Self {
            position: Vec3::zero(),
            target: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::Y,
            fov_y_deg: 60.0,
            aspect: 1.0,
            near: 0.3,
            far: 1000.0,
        };
        cam.set_aspect(aspect);
        cam
    }

    /// Moves the camera, keeping it aimed at the origin.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.target = Vec3::zero();
    }

    /// Non-finite or non-positive ratios (zero-height windows) are ignored.
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Far plane; clamped to stay beyond the near plane.
    pub fn set_far(&mut self, far: f32) {
        self.far = far.max(self.near * 2.0);
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_deg.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_aspect_is_ignored() {
        let mut cam = Camera::new(1.5);
        cam.set_aspect(0.0);
        cam.set_aspect(f32::NAN);
        assert_eq!(cam.aspect(), 1.5);
    }

    #[test]
    fn origin_projects_to_screen_center() {
        let mut cam = Camera::new(16.0 / 9.0);
        cam.set_far(1400.0);
        cam.set_position(Vec3::new(0.0, 0.0, 100.0));

        let p = cam.view_projection().project_point(Vec3::zero());
        assert!(p.x.abs() < 1e-5 && p.y.abs() < 1e-5);
        assert!(p.z > 0.0 && p.z < 1.0);
    }

    #[test]
    fn far_plane_clips_distant_points() {
        let mut cam = Camera::new(1.0);
        cam.set_far(1400.0);
        cam.set_position(Vec3::new(0.0, 0.0, 100.0));
        let beyond = cam.view_projection().project_point(Vec3::new(0.0, 0.0, -1400.0));
        assert!(beyond.z > 1.0);
    }
}
