//! Scan conversion of triangles and lines.
//!
//! The rasterizer knows nothing about colors or shading. It walks the pixels
//! a primitive covers, computes a depth and a blended payload for each, and
//! hands them to a [`RasterTarget`], which decides what depth test to apply
//! and where the results go.
//!
//! Available primitives:
//! - [`draw_triangle`]: scanline traversal with perspective-correct payloads
//! - [`draw_line`]: Bresenham traversal with linearly blended payloads
//!
//! Both take vertices in *screen* space (clip space multiplied by the
//! clip→screen matrix, before the perspective divide) and reject the whole
//! primitive if any vertex falls outside the screen volume. There is no
//! polygon clipping.

mod line;
mod triangle;

pub use line::draw_line;
pub use triangle::{draw_triangle, signed_area};

use crate::math::Vec2;

/// Destination of rasterized pixels.
///
/// All three hooks live on one object so an implementation can share state
/// between them (a mask, a depth bias, a shader) and so a test-then-write
/// sequence for one pixel stays in one place.
pub trait RasterTarget<T> {
    /// Whether a fragment at `depth` may be written at `(x, y)`.
    fn test_depth(&self, x: i32, y: i32, depth: f32) -> bool;

    /// Record the depth of an accepted fragment.
    fn write_depth(&mut self, x: i32, y: i32, depth: f32);

    /// Store the payload of an accepted fragment.
    fn write_pixel(&mut self, x: i32, y: i32, value: T);
}

/// Signed area (doubled) of the triangle `a, b, p`.
///
/// Computed as the 2D cross product of `(b - a)` and `(p - a)`:
///
/// ```text
/// E(P) = (B.x - A.x) * (P.y - A.y) - (B.y - A.y) * (P.x - A.x)
/// ```
///
/// # Returns
///
/// - Positive: P is to the left of edge AB (counter-clockwise winding, y up)
/// - Negative: P is to the right of edge AB
/// - Zero: P lies exactly on the edge AB
#[inline]
pub(crate) fn edge_function(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b - a).cross(p - a)
}
