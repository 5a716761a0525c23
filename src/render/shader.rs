//! Programmable shading stages.
//!
//! This module separates the fixed-function rasterizer from the programmable
//! per-vertex and per-pixel computations, the same split GPUs make.
//!
//! # Architecture
//!
//! The shader program handles:
//! - Transforming each triangle corner to clip space ([`ShaderProgram::compute_vertex`])
//! - Packing per-vertex attributes into a payload (`Data`)
//! - Computing the final color of each covered pixel ([`ShaderProgram::compute_color`])
//!
//! The rasterizer handles:
//! - Screen bounds rejection and back-face culling
//! - Scan conversion and depth testing
//! - Blending payloads through an [`Interpolator`]
//!
//! # Barycentric Coordinates
//!
//! Interpolators receive three weights `[λ₀, λ₁, λ₂]` that sum to 1.0 for
//! any point inside the triangle:
//! `attr_at_pixel = λ₀*attr₀ + λ₁*attr₁ + λ₂*attr₂`

use std::ops::{Add, Div, Mul, Sub};

use crate::colors::Color;
use crate::context::Transforms;
use crate::math::{Vec2, Vec3, Vec4};

/// A payload that can be blended linearly.
///
/// Implemented automatically for every `Copy` type with `+`, `-`, `* f32`
/// and `/ f32`: `f32`, the vector types, [`Color`] and [`FragmentInput`]
/// over such a type.
pub trait Varying:
    Copy + Add<Output = Self> + Sub<Output = Self> + Mul<f32, Output = Self> + Div<f32, Output = Self>
{
}

impl<T> Varying for T where
    T: Copy + Add<Output = T> + Sub<Output = T> + Mul<f32, Output = T> + Div<f32, Output = T>
{
}

/// Blends three payloads with barycentric weights.
pub trait Interpolator<T> {
    fn interpolate_bary(&self, p0: &T, p1: &T, p2: &T, weights: [f32; 3]) -> T;
}

/// Weighted sum `w0*p0 + w1*p1 + w2*p2`, valid for any [`Varying`] payload.
#[derive(Clone, Copy, Debug, Default)]
pub struct LinearInterpolator;

impl<T: Varying> Interpolator<T> for LinearInterpolator {
    #[inline]
    fn interpolate_bary(&self, p0: &T, p1: &T, p2: &T, weights: [f32; 3]) -> T {
        *p0 * weights[0] + *p1 * weights[1] + *p2 * weights[2]
    }
}

/// Per-corner attributes fed to the vertex stage, in model space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VertexInput {
    pub position: Vec3,
    pub normal: Vec3,
    pub color: Color,
    pub uv: Vec2,
}

impl VertexInput {
    pub fn new(position: Vec3, normal: Vec3, color: Color, uv: Vec2) -> Self {
        Self {
            position,
            normal,
            color,
            uv,
        }
    }
}

/// Output of the vertex stage: a clip-space position plus shader data.
///
/// The rasterizer blends whole fragment inputs, so `position` arrives at the
/// pixel stage interpolated along with `data`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FragmentInput<T> {
    pub position: Vec4,
    pub data: T,
}

impl<T> FragmentInput<T> {
    pub fn new(position: Vec4, data: T) -> Self {
        Self { position, data }
    }
}

impl<T: Add<Output = T>> Add for FragmentInput<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.position + rhs.position, self.data + rhs.data)
    }
}

impl<T: Sub<Output = T>> Sub for FragmentInput<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.position - rhs.position, self.data - rhs.data)
    }
}

impl<T: Mul<f32, Output = T>> Mul<f32> for FragmentInput<T> {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.position * rhs, self.data * rhs)
    }
}

impl<T: Div<f32, Output = T>> Div<f32> for FragmentInput<T> {
    type Output = Self;

    fn div(self, rhs: f32) -> Self {
        Self::new(self.position / rhs, self.data / rhs)
    }
}

/// Two-stage shading program.
pub trait ShaderProgram {
    /// Payload carried from the vertex stage to the pixel stage.
    type Data: Varying;

    /// Transform one corner to clip space and pack its attributes.
    fn compute_vertex(&self, input: &VertexInput, transforms: &Transforms) -> FragmentInput<Self::Data>;

    /// Color of one covered pixel.
    fn compute_color(&self, input: &FragmentInput<Self::Data>, transforms: &Transforms) -> Color;
}

/// Implements the linear ops [`Varying`] needs for a struct of varying fields.
#[macro_export]
macro_rules! impl_varying {
    ($ty:ident { $($field:ident),+ $(,)? }) => {
        impl ::std::ops::Add for $ty {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                Self { $($field: self.$field + rhs.$field),+ }
            }
        }

        impl ::std::ops::Sub for $ty {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                Self { $($field: self.$field - rhs.$field),+ }
            }
        }

        impl ::std::ops::Mul<f32> for $ty {
            type Output = Self;
            fn mul(self, rhs: f32) -> Self {
                Self { $($field: self.$field * rhs),+ }
            }
        }

        impl ::std::ops::Div<f32> for $ty {
            type Output = Self;
            fn div(self, rhs: f32) -> Self {
                Self { $($field: self.$field / rhs),+ }
            }
        }
    };
}
