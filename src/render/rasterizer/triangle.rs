//! Scanline triangle rasterization with perspective-correct payloads.
//!
//! # Algorithm Overview
//!
//! 1. **Project** the three screen-space vertices (divide by W) and reject
//!    the triangle if any of them leaves the screen volume
//! 2. **Cull** back faces and degenerate triangles by their signed area
//! 3. **Sort** the vertices by Y and walk the rows between the lowest and the
//!    highest vertex
//! 4. For each row, find the span between the **long edge** (lowest to
//!    highest vertex) and the **short edge** active on that row
//! 5. For each pixel in the span, compute barycentric weights with edge
//!    functions and drop pixels with a negative weight
//!
//! ```text
//!            v2 (hi)
//!            /|
//!   upper   / |
//!   short  /  |  long edge
//!   edge  /   |
//!     v1 (mid)|
//!         \   |
//!   lower  \  |
//!   short   \ |
//!   edge     \|
//!            v0 (lo)
//! ```
//!
//! # Perspective Correction
//!
//! Screen-space weights are not linear in view space once a perspective
//! projection is involved. Dividing each weight by its vertex's clip W and
//! renormalizing gives weights that are:
//!
//! ```text
//! λ'ᵢ = (λᵢ / Wᵢ) / Σ (λⱼ / Wⱼ)
//! ```
//!
//! Payloads are blended with the corrected weights. Depth is blended with
//! the plain screen-space weights, since `z/w` is itself linear in screen
//! space.

use super::{edge_function, RasterTarget};
use crate::math::{Bounds3, Vec2, Vec4};
use crate::render::shader::Interpolator;

/// Signed area (doubled) of a screen-space triangle after the perspective
/// divide. Positive for counter-clockwise (front-facing) triangles.
#[inline]
pub fn signed_area(screen: &[Vec4; 3]) -> f32 {
    let [p0, p1, p2] = screen.map(|v| v.div_w().xy());
    (p0 - p1).cross(p0 - p2)
}

/// Horizontal extent of edge `a -> b` on row `y`.
///
/// A horizontal edge covers its whole length on its row.
#[inline]
fn edge_span(a: Vec2, b: Vec2, y: f32) -> (f32, f32) {
    let dy = b.y - a.y;
    if dy.abs() < f32::EPSILON {
        (a.x.min(b.x), a.x.max(b.x))
    } else {
        let x = a.x + (b.x - a.x) * (y - a.y) / dy;
        (x, x)
    }
}

/// Rasterizes one triangle into `target`.
///
/// # Arguments
///
/// * `screen` - Vertex positions in screen space, before the divide by W
/// * `data` - Per-vertex payloads, in the same order as `screen`
/// * `interpolator` - Blends payloads with perspective-corrected weights
/// * `bounds` - Screen volume; a vertex outside it rejects the triangle
/// * `target` - Receives depth tests and writes
///
/// # Returns
///
/// The number of pixels that passed the depth test.
pub fn draw_triangle<T, I, R>(
    screen: [Vec4; 3],
    data: [T; 3],
    interpolator: &I,
    bounds: &Bounds3,
    target: &mut R,
) -> usize
where
    I: Interpolator<T> + ?Sized,
    R: RasterTarget<T> + ?Sized,
{
    let projected = screen.map(Vec4::div_w);
    if !projected.iter().all(|&p| bounds.contains(p)) {
        return 0;
    }

    let xy = projected.map(|p| p.xy());
    let area = (xy[0] - xy[1]).cross(xy[0] - xy[2]);
    // Back-facing or degenerate
    if area < f32::EPSILON {
        return 0;
    }

    let mut order = [0usize, 1, 2];
    order.sort_by(|&a, &b| xy[a].y.total_cmp(&xy[b].y));
    let [lo, mid, hi] = order.map(|i| xy[i]);

    let depths = projected.map(|p| p.z);
    let inv_w = screen.map(|v| 1.0 / v.w);

    let mut written = 0;
    for y in lo.y.ceil() as i32..=hi.y.floor() as i32 {
        let row = y as f32;

        let long = edge_span(lo, hi, row);
        let short = if row < mid.y {
            edge_span(lo, mid, row)
        } else {
            edge_span(mid, hi, row)
        };
        let x_start = long.0.min(short.0).ceil() as i32;
        let x_end = long.1.max(short.1).floor() as i32;

        for x in x_start..=x_end {
            let p = Vec2::new(x as f32, row);
            let weights = [
                edge_function(xy[1], xy[2], p) / area,
                edge_function(xy[2], xy[0], p) / area,
                edge_function(xy[0], xy[1], p) / area,
            ];
            if weights.iter().any(|&w| w < 0.0) {
                continue;
            }

            let depth = weights[0] * depths[0] + weights[1] * depths[1] + weights[2] * depths[2];
            if !target.test_depth(x, y, depth) {
                continue;
            }
            target.write_depth(x, y, depth);

            let corrected = [
                weights[0] * inv_w[0],
                weights[1] * inv_w[1],
                weights[2] * inv_w[2],
            ];
            let sum = corrected[0] + corrected[1] + corrected[2];
            let corrected = corrected.map(|w| w / sum);

            let value = interpolator.interpolate_bary(&data[0], &data[1], &data[2], corrected);
            target.write_pixel(x, y, value);
            written += 1;
        }
    }

    written
}
