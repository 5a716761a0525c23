//! Scene camera.
//!
//! # Coordinate System
//!
//! Uses a **right-handed** coordinate system:
//! - X: positive right
//! - Y: positive up
//! - Z: positive toward the viewer; the camera looks down **-Z**
//!
//! The camera's pose is a [`Transform`]; the view matrix is its inverse.

use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::projection::Projection;
use crate::transform::Transform;

/// A posed camera with a projection.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Camera {
    pub transform: Transform,
    pub projection: Projection,
}

impl Camera {
    pub fn new(transform: Transform, projection: Projection) -> Self {
        Self {
            transform,
            projection,
        }
    }

    /// Creates a camera at `position` looking toward `target` with +Y up.
    pub fn looking_at(position: Vec3, target: Vec3, projection: Projection) -> Self {
        let mut transform = Transform::from_origin(position);
        transform.look_at(target, Vec3::Y);
        Self::new(transform, projection)
    }

    pub fn position(&self) -> Vec3 {
        self.transform.origin()
    }

    pub fn forward(&self) -> Vec3 {
        self.transform.forward()
    }

    /// World→view matrix: the inverse of the camera pose.
    ///
    /// For a camera with rotation R and position P:
    ///   World transform = T(P) * R
    ///   View = R^T * T(-P)
    pub fn world_view(&self) -> Mat4 {
        self.transform.inverse_matrix()
    }

    /// View→clip matrix.
    pub fn view_clip(&self) -> Mat4 {
        self.projection.matrix()
    }
}

// =============================================================================
// Orbit Controller
// =============================================================================

/// Keeps a camera on a sphere around a target, driven by yaw/pitch deltas.
#[derive(Debug, Clone)]
pub struct OrbitController {
    pub target: Vec3,
    pub distance: f32,
    /// Rotation around the world Y axis (radians).
    yaw: f32,
    /// Elevation above the XZ plane (radians).
    pitch: f32,
    pitch_min: f32,
    pitch_max: f32,
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 5.0)
    }
}

impl OrbitController {
    pub fn new(target: Vec3, distance: f32) -> Self {
        Self {
            target,
            distance,
            yaw: 0.0,
            pitch: 0.0,
            pitch_min: -89.0_f32.to_radians(),
            pitch_max: 89.0_f32.to_radians(),
        }
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Rotates around the target. Pitch is clamped short of the poles.
    pub fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw = (self.yaw + yaw_delta).rem_euclid(std::f32::consts::TAU);
        self.pitch = (self.pitch + pitch_delta).clamp(self.pitch_min, self.pitch_max);
    }

    /// Moves toward the target, never closer than `min_distance`.
    pub fn zoom(&mut self, delta: f32, min_distance: f32) {
        self.distance = (self.distance - delta).max(min_distance);
    }

    /// Eye position for the current yaw, pitch and distance.
    ///
    /// Zero yaw and pitch place the eye on the +Z axis.
    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + Vec3::new(sy * cp, sp, cy * cp) * self.distance
    }

    /// Moves `camera` to the orbit position, aimed at the target.
    pub fn apply(&self, camera: &mut Camera) {
        camera.transform.set_origin(self.eye());
        camera.transform.look_at(self.target, Vec3::Y);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_camera_looks_down_negative_z() {
        let camera = Camera::default();
        assert_relative_eq!(camera.forward(), -Vec3::Z, epsilon = 1e-6);
    }

    #[test]
    fn world_view_puts_target_in_front() {
        let camera = Camera::looking_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Projection::default());
        let origin = camera.world_view().transform_point(Vec3::ZERO);
        assert_relative_eq!(origin, Vec3::new(0.0, 0.0, -5.0), epsilon = 1e-5);
    }

    #[test]
    fn orbit_pitch_is_clamped() {
        let mut orbit = OrbitController::default();
        orbit.rotate(0.0, std::f32::consts::PI);
        assert!(orbit.pitch() < std::f32::consts::FRAC_PI_2);
        assert!(orbit.pitch() > 0.0);
    }

    #[test]
    fn orbit_keeps_distance_and_aims_at_target() {
        let mut orbit = OrbitController::new(Vec3::new(1.0, 0.0, 0.0), 4.0);
        orbit.rotate(0.7, 0.3);
        let mut camera = Camera::default();
        orbit.apply(&mut camera);

        let to_target = orbit.target - camera.position();
        assert_relative_eq!(to_target.magnitude(), 4.0, epsilon = 1e-5);
        assert_relative_eq!(camera.forward(), to_target.normalize(), epsilon = 1e-5);
    }
}
