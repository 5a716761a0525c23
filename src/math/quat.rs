//! Unit quaternion for rotations.

use std::ops::Mul;

use approx::{AbsDiffEq, RelativeEq};

use super::mat4::Mat4;
use super::vec3::Vec3;

/// Rotation quaternion `w + xi + yj + zk`.
///
/// Composition follows the Hamilton product: `a * b` rotates by `b` first,
/// then by `a`, matching the right-to-left order of [`Mat4`] products.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quat {
    pub w: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 0.0);

    pub const fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self { w, x, y, z }
    }

    /// Rotation of `angle` radians counter-clockwise around `axis`.
    ///
    /// The axis is normalized; a zero axis yields the identity.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let axis = axis.normalize();
        if axis == Vec3::ZERO {
            return Self::IDENTITY;
        }
        let (s, c) = (angle / 2.0).sin_cos();
        Self::new(c, axis.x * s, axis.y * s, axis.z * s)
    }

    pub fn from_rotation_x(angle: f32) -> Self {
        Self::from_axis_angle(Vec3::X, angle)
    }

    pub fn from_rotation_y(angle: f32) -> Self {
        Self::from_axis_angle(Vec3::Y, angle)
    }

    pub fn from_rotation_z(angle: f32) -> Self {
        Self::from_axis_angle(Vec3::Z, angle)
    }

    /// Rotation that maps the world axes onto the orthonormal basis
    /// `x_axis`, `y_axis`, `z_axis` (the columns of the rotation matrix).
    pub fn from_basis(x_axis: Vec3, y_axis: Vec3, z_axis: Vec3) -> Self {
        let (m00, m10, m20) = (x_axis.x, x_axis.y, x_axis.z);
        let (m01, m11, m21) = (y_axis.x, y_axis.y, y_axis.z);
        let (m02, m12, m22) = (z_axis.x, z_axis.y, z_axis.z);

        // Branch on the largest diagonal term to keep `s` away from zero.
        let trace = m00 + m11 + m22;
        let q = if trace > 0.0 {
            let s = (trace + 1.0).sqrt() * 2.0;
            Self::new(s / 4.0, (m21 - m12) / s, (m02 - m20) / s, (m10 - m01) / s)
        } else if m00 > m11 && m00 > m22 {
            let s = (1.0 + m00 - m11 - m22).sqrt() * 2.0;
            Self::new((m21 - m12) / s, s / 4.0, (m01 + m10) / s, (m02 + m20) / s)
        } else if m11 > m22 {
            let s = (1.0 + m11 - m00 - m22).sqrt() * 2.0;
            Self::new((m02 - m20) / s, (m01 + m10) / s, s / 4.0, (m12 + m21) / s)
        } else {
            let s = (1.0 + m22 - m00 - m11).sqrt() * 2.0;
            Self::new((m10 - m01) / s, (m02 + m20) / s, (m12 + m21) / s, s / 4.0)
        };
        q.normalize()
    }

    #[inline]
    pub fn vector(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn length(&self) -> f32 {
        (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len <= f32::EPSILON {
            return Self::IDENTITY;
        }
        Self::new(self.w / len, self.x / len, self.y / len, self.z / len)
    }

    /// The inverse rotation for unit quaternions.
    pub fn conjugate(&self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    /// Rotates a vector.
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        let u = self.vector();
        let t = u.cross(v) * 2.0;
        v + t * self.w + u.cross(t)
    }

    /// Rotation matrix for column vectors.
    pub fn to_matrix(&self) -> Mat4 {
        let Self { w, x, y, z } = *self;
        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (wx, wy, wz) = (w * x, w * y, w * z);
        Mat4::new([
            [1.0 - 2.0 * (yy + zz), 2.0 * (xy - wz), 2.0 * (xz + wy), 0.0],
            [2.0 * (xy + wz), 1.0 - 2.0 * (xx + zz), 2.0 * (yz - wx), 0.0],
            [2.0 * (xz - wy), 2.0 * (yz + wx), 1.0 - 2.0 * (xx + yy), 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }
}

/// Hamilton product.
impl Mul<Quat> for Quat {
    type Output = Quat;

    fn mul(self, rhs: Quat) -> Self::Output {
        Quat::new(
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        )
    }
}

impl AbsDiffEq for Quat {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.w.abs_diff_eq(&other.w, epsilon)
            && self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl RelativeEq for Quat {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.w.relative_eq(&other.w, epsilon, max_relative)
            && self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn rotate_matches_matrix() {
        let q = Quat::from_axis_angle(Vec3::new(1.0, 2.0, 3.0), 0.8);
        let v = Vec3::new(0.3, -1.0, 2.0);
        assert_relative_eq!(q.rotate(v), q.to_matrix().transform_point(v), epsilon = 1e-5);
    }

    #[test]
    fn quarter_turn_about_z() {
        let q = Quat::from_rotation_z(FRAC_PI_2);
        assert_relative_eq!(q.rotate(Vec3::X), Vec3::Y, epsilon = 1e-6);
        assert_relative_eq!(q.to_matrix(), Mat4::rotation_z(FRAC_PI_2), epsilon = 1e-6);
    }

    #[test]
    fn product_applies_right_operand_first() {
        let a = Quat::from_rotation_z(FRAC_PI_2);
        let b = Quat::from_rotation_x(FRAC_PI_2);
        let v = Vec3::Y;
        assert_relative_eq!((a * b).rotate(v), a.rotate(b.rotate(v)), epsilon = 1e-6);
    }

    #[test]
    fn from_basis_recovers_rotation() {
        let q = Quat::from_axis_angle(Vec3::new(-1.0, 0.5, 2.0), 2.5);
        let r = Quat::from_basis(q.rotate(Vec3::X), q.rotate(Vec3::Y), q.rotate(Vec3::Z));
        let v = Vec3::new(0.2, 0.7, -1.3);
        assert_relative_eq!(r.rotate(v), q.rotate(v), epsilon = 1e-5);
    }

    #[test]
    fn conjugate_undoes_rotation() {
        let q = Quat::from_rotation_y(1.1);
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_relative_eq!(q.conjugate().rotate(q.rotate(v)), v, epsilon = 1e-5);
    }
}
