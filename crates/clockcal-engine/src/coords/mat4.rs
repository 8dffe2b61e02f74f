use core::ops::Mul;

use super::Vec3;

/// Column-major 4×4 matrix.
///
/// `cols[c][r]` is row `r` of column `c`, matching WGSL `mat4x4<f32>` layout so
/// the array can be uploaded as-is.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat4 {
    pub cols: [[f32; 4]; 4],
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Right-handed perspective projection into 0..1 depth.
    ///
    /// `fov_y` is in radians. `near` maps to depth 0, `far` to depth 1.
    pub fn perspective_rh(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        debug_assert!(near > 0.0 && far > near);
        let f = 1.0 / (fov_y * 0.5).tan();
        let range = near - far;
        Mat4 {
            cols: [
                [f / aspect, 0.0, 0.0, 0.0],
                [0.0, f, 0.0, 0.0],
                [0.0, 0.0, far / range, -1.0],
                [0.0, 0.0, near * far / range, 0.0],
            ],
        }
    }

    /// Right-handed view matrix looking from `eye` towards `target`.
    pub fn look_at_rh(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        let f = (target - eye).normalized();
        let s = f.cross(up).normalized();
        let u = s.cross(f);
        Mat4 {
            cols: [
                [s.x, u.x, -f.x, 0.0],
                [s.y, u.y, -f.y, 0.0],
                [s.z, u.z, -f.z, 0.0],
                [-s.dot(eye), -u.dot(eye), f.dot(eye), 1.0],
            ],
        }
    }

    /// Multiplies `(p, 1)` and returns the homogeneous result.
    pub fn transform_point4(&self, p: Vec3) -> [f32; 4] {
        let c = &self.cols;
        let mut out = [0.0f32; 4];
        for (r, o) in out.iter_mut().enumerate() {
            *o = c[0][r] * p.x + c[1][r] * p.y + c[2][r] * p.z + c[3][r];
        }
        out
    }

    /// Transforms `p` and applies the perspective divide.
    pub fn project_point(&self, p: Vec3) -> Vec3 {
        let [x, y, z, w] = self.transform_point4(p);
        if w.abs() <= f32::EPSILON {
            return Vec3::new(x, y, z);
        }
        Vec3::new(x / w, y / w, z / w)
    }

    #[inline]
    pub fn to_cols_array(self) -> [[f32; 4]; 4] {
        self.cols
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Mat4::IDENTITY
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        let mut cols = [[0.0f32; 4]; 4];
        for (c, col) in cols.iter_mut().enumerate() {
            for (r, v) in col.iter_mut().enumerate() {
                *v = (0..4).map(|k| self.cols[k][r] * rhs.cols[c][k]).sum();
            }
        }
        Mat4 { cols }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn identity_is_neutral() {
        let m = Mat4::look_at_rh(Vec3::new(1.0, 2.0, 3.0), Vec3::zero(), Vec3::Y);
        assert_eq!(m * Mat4::IDENTITY, m);
        assert_eq!(Mat4::IDENTITY * m, m);
    }

    #[test]
    fn look_at_moves_target_onto_negative_z() {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 100.0), Vec3::zero(), Vec3::Y);
        assert!(approx(view.project_point(Vec3::zero()), Vec3::new(0.0, 0.0, -100.0)));
    }

    #[test]
    fn perspective_maps_near_and_far_to_unit_depth() {
        let proj = Mat4::perspective_rh(60f32.to_radians(), 1.5, 1.0, 1400.0);
        let near = proj.project_point(Vec3::new(0.0, 0.0, -1.0));
        let far = proj.project_point(Vec3::new(0.0, 0.0, -1400.0));
        assert!(near.z.abs() < 1e-4, "near z = {}", near.z);
        assert!((far.z - 1.0).abs() < 1e-4, "far z = {}", far.z);
    }

    #[test]
    fn aspect_squeezes_x() {
        let proj = Mat4::perspective_rh(90f32.to_radians(), 2.0, 1.0, 10.0);
        let p = proj.project_point(Vec3::new(1.0, 1.0, -1.0));
        assert!((p.x - 0.5).abs() < 1e-4);
        assert!((p.y - 1.0).abs() < 1e-4);
    }
}
