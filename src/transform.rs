//! Rigid pose for scene nodes and cameras.
//!
//! Provides a [`Transform`] struct with a fluent API for managing an origin
//! and a rotation quaternion.

use crate::math::{Mat4, Quat, Vec3};

/// A rigid 3D transform: rotation about the local origin, then translation.
///
/// Provides a fluent API where mutating methods return `&mut Self` for chaining:
///
/// ```ignore
/// transform
///     .set_origin_xyz(5.0, 2.0, 0.0)
///     .rotate_y(0.1);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform {
    origin: Vec3,
    rotation: Quat,
}

impl Transform {
    pub fn new(origin: Vec3, rotation: Quat) -> Self {
        Self { origin, rotation }
    }

    pub fn from_origin(origin: Vec3) -> Self {
        Self::new(origin, Quat::IDENTITY)
    }

    // ============ Origin ============

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn set_origin(&mut self, origin: Vec3) -> &mut Self {
        self.origin = origin;
        self
    }

    pub fn set_origin_xyz(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.origin = Vec3::new(x, y, z);
        self
    }

    /// Translate by a delta vector in parent space.
    pub fn translate(&mut self, delta: Vec3) -> &mut Self {
        self.origin = self.origin + delta;
        self
    }

    // ============ Rotation ============

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: Quat) -> &mut Self {
        self.rotation = rotation.normalize();
        self
    }

    /// Apply `delta` after the current rotation, about parent-space axes.
    pub fn rotate(&mut self, delta: Quat) -> &mut Self {
        self.rotation = (delta * self.rotation).normalize();
        self
    }

    /// Rotate around the parent X axis.
    pub fn rotate_x(&mut self, angle: f32) -> &mut Self {
        self.rotate(Quat::from_rotation_x(angle))
    }

    /// Rotate around the parent Y axis.
    pub fn rotate_y(&mut self, angle: f32) -> &mut Self {
        self.rotate(Quat::from_rotation_y(angle))
    }

    /// Rotate around the parent Z axis.
    pub fn rotate_z(&mut self, angle: f32) -> &mut Self {
        self.rotate(Quat::from_rotation_z(angle))
    }

    /// Orients the transform so its local -Z axis points at `target`.
    ///
    /// Leaves the rotation unchanged when `target` coincides with the origin
    /// or lies straight along `up`.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) -> &mut Self {
        let forward = (target - self.origin).normalize();
        let right = forward.cross(up).normalize();
        if forward == Vec3::ZERO || right == Vec3::ZERO {
            return self;
        }
        let up = right.cross(forward);
        self.rotation = Quat::from_basis(right, up, -forward);
        self
    }

    // ============ Directions ============

    /// Local -Z in parent space.
    pub fn forward(&self) -> Vec3 {
        self.rotation.rotate(-Vec3::Z)
    }

    pub fn right(&self) -> Vec3 {
        self.rotation.rotate(Vec3::X)
    }

    pub fn up(&self) -> Vec3 {
        self.rotation.rotate(Vec3::Y)
    }

    // ============ Composition ============

    /// Pose of `child` (expressed relative to `self`) in `self`'s parent space.
    ///
    /// `self.compose(child).to_matrix() == self.to_matrix() * child.to_matrix()`.
    /// The rotation is `self * child` because `Quat` uses the Hamilton product
    /// with column vectors, where the right operand is applied first.
    pub fn compose(&self, child: &Transform) -> Transform {
        Transform {
            origin: self.transform_point(child.origin),
            rotation: (self.rotation * child.rotation).normalize(),
        }
    }

    pub fn inverse(&self) -> Transform {
        let rotation = self.rotation.conjugate();
        Transform {
            origin: -rotation.rotate(self.origin),
            rotation,
        }
    }

    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.origin + self.rotation.rotate(p)
    }

    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        self.rotation.rotate(v)
    }

    // ============ Matrix Generation ============

    /// Order: Translation * Rotation (rotation applied first).
    pub fn to_matrix(&self) -> Mat4 {
        let mut m = self.rotation.to_matrix();
        m.set(0, 3, self.origin.x);
        m.set(1, 3, self.origin.y);
        m.set(2, 3, self.origin.z);
        m
    }

    /// Inverse of [`to_matrix`](Self::to_matrix) without a general 4x4 inverse.
    ///
    /// The rotation block is transposed and the translation becomes `-R^T * t`.
    pub fn inverse_matrix(&self) -> Mat4 {
        self.inverse().to_matrix()
    }
}
