//! Camera projection parameters.
//!
//! The [`Projection`] enum is the single source of truth for the view→clip
//! mapping (field of view or view volume size, aspect ratio, near/far
//! planes). Both variants produce depth `z/w` in `[0, 1]`.

use crate::math::mat4::Mat4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    Perspective {
        /// Vertical field of view in radians.
        fov_y: f32,
        /// Aspect ratio (width / height).
        aspect_ratio: f32,
        z_near: f32,
        z_far: f32,
    },
    Orthographic {
        /// Height of the view volume in view-space units.
        height: f32,
        aspect_ratio: f32,
        z_near: f32,
        z_far: f32,
    },
}

impl Default for Projection {
    fn default() -> Self {
        Self::perspective_degrees(60.0, 1.0, 0.1, 100.0)
    }
}

impl Projection {
    /// Creates a perspective projection.
    ///
    /// # Arguments
    /// * `fov_y` - Vertical field of view in radians
    /// * `aspect_ratio` - Width divided by height
    /// * `z_near` - Near plane distance (must be > 0)
    /// * `z_far` - Far plane distance (must be > z_near)
    pub fn perspective(fov_y: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self::Perspective {
            fov_y,
            aspect_ratio,
            z_near,
            z_far,
        }
    }

    /// Creates a perspective projection from degrees instead of radians.
    pub fn perspective_degrees(fov_y_degrees: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self::perspective(fov_y_degrees.to_radians(), aspect_ratio, z_near, z_far)
    }

    /// Creates an orthographic projection whose view volume is `height`
    /// units tall and `height * aspect_ratio` wide.
    pub fn orthographic(height: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self::Orthographic {
            height,
            aspect_ratio,
            z_near,
            z_far,
        }
    }

    /// Returns the vertical field of view in radians, or `None` for
    /// orthographic projections.
    pub fn fov_y(&self) -> Option<f32> {
        match *self {
            Self::Perspective { fov_y, .. } => Some(fov_y),
            Self::Orthographic { .. } => None,
        }
    }

    /// Returns the horizontal field of view in radians.
    ///
    /// Computed from the vertical FOV and aspect ratio.
    pub fn fov_x(&self) -> Option<f32> {
        self.fov_y()
            .map(|fov_y| 2.0 * (self.aspect_ratio() * (fov_y / 2.0).tan()).atan())
    }

    pub fn aspect_ratio(&self) -> f32 {
        match *self {
            Self::Perspective { aspect_ratio, .. } | Self::Orthographic { aspect_ratio, .. } => {
                aspect_ratio
            }
        }
    }

    pub fn z_near(&self) -> f32 {
        match *self {
            Self::Perspective { z_near, .. } | Self::Orthographic { z_near, .. } => z_near,
        }
    }

    pub fn z_far(&self) -> f32 {
        match *self {
            Self::Perspective { z_far, .. } | Self::Orthographic { z_far, .. } => z_far,
        }
    }

    /// Updates the aspect ratio (typically called on window resize).
    pub fn set_aspect_ratio(&mut self, ratio: f32) {
        match self {
            Self::Perspective { aspect_ratio, .. } | Self::Orthographic { aspect_ratio, .. } => {
                *aspect_ratio = ratio
            }
        }
    }

    /// Generates the right-handed view→clip matrix.
    pub fn matrix(&self) -> Mat4 {
        match *self {
            Self::Perspective {
                fov_y,
                aspect_ratio,
                z_near,
                z_far,
            } => Mat4::perspective(fov_y, aspect_ratio, z_near, z_far),
            Self::Orthographic {
                height,
                aspect_ratio,
                z_near,
                z_far,
            } => Mat4::orthographic(height * aspect_ratio, height, z_near, z_far),
        }
    }
}
