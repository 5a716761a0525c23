//! Bresenham line rasterization.
//!
//! Lines are classified as *gentle* (|dx| >= |dy|) or *steep*. Steep lines
//! are walked with the axes swapped so the loop always advances one pixel
//! per step along the dominant axis, with an integer error accumulator
//! deciding when to step the minor axis.
//!
//! Depth and payload are blended linearly by the step fraction in screen
//! space; unlike triangles, lines are not perspective corrected.

use super::RasterTarget;
use crate::math::{Bounds3, Vec4};
use crate::render::shader::Interpolator;

/// Rasterizes a line segment into `target`.
///
/// # Arguments
///
/// * `screen` - Endpoint positions in screen space, before the divide by W
/// * `data` - Per-endpoint payloads
/// * `interpolator` - Blends the payloads; called with weights `[1 - t, t, 0]`
/// * `bounds` - Screen volume; an endpoint outside it rejects the line
/// * `target` - Receives depth tests and writes
///
/// # Returns
///
/// The number of pixels that passed the depth test. A zero-length line
/// covers exactly one pixel.
pub fn draw_line<T, I, R>(
    screen: [Vec4; 2],
    data: [T; 2],
    interpolator: &I,
    bounds: &Bounds3,
    target: &mut R,
) -> usize
where
    I: Interpolator<T> + ?Sized,
    R: RasterTarget<T> + ?Sized,
{
    let [a, b] = screen.map(Vec4::div_w);
    if !bounds.contains(a) || !bounds.contains(b) {
        return 0;
    }
    let [mut d0, mut d1] = data;

    // Classify on the rounded endpoints the walk actually visits.
    let mut p0 = (a.x.round() as i32, a.y.round() as i32, a.z);
    let mut p1 = (b.x.round() as i32, b.y.round() as i32, b.z);
    let steep = (p1.0 - p0.0).abs() < (p1.1 - p0.1).abs();
    if steep {
        p0 = (p0.1, p0.0, p0.2);
        p1 = (p1.1, p1.0, p1.2);
    }
    if p0.0 > p1.0 {
        std::mem::swap(&mut p0, &mut p1);
        std::mem::swap(&mut d0, &mut d1);
    }

    let (x0, y0, z0) = p0;
    let (x1, y1, z1) = p1;
    let width = x1 - x0;
    let height = y1 - y0;
    let y_step = if height > 0 { 1 } else { -1 };

    let derror2 = height.abs() * 2;
    let mut error2 = 0;
    let mut y = y0;
    let mut written = 0;

    for x in x0..=x1 {
        let t = if width == 0 {
            0.0
        } else {
            (x - x0) as f32 / width as f32
        };
        let depth = z0 + (z1 - z0) * t;
        let (px, py) = if steep { (y, x) } else { (x, y) };

        if target.test_depth(px, py, depth) {
            target.write_depth(px, py, depth);
            let value = interpolator.interpolate_bary(&d0, &d1, &d1, [1.0 - t, t, 0.0]);
            target.write_pixel(px, py, value);
            written += 1;
        }

        error2 += derror2;
        if error2 > width {
            y += y_step;
            error2 -= width * 2;
        }
    }

    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;
    use crate::render::shader::LinearInterpolator;
    use approx::assert_relative_eq;

    /// Accepts everything and records pixels with their depth.
    #[derive(Default)]
    struct Recorder {
        pixels: Vec<(i32, i32, f32, f32)>,
        last_depth: f32,
    }

    impl RasterTarget<f32> for Recorder {
        fn test_depth(&self, _x: i32, _y: i32, _depth: f32) -> bool {
            true
        }

        fn write_depth(&mut self, _x: i32, _y: i32, depth: f32) {
            self.last_depth = depth;
        }

        fn write_pixel(&mut self, x: i32, y: i32, value: f32) {
            self.pixels.push((x, y, self.last_depth, value));
        }
    }

    fn bounds() -> Bounds3 {
        Bounds3::new(Vec3::ZERO, Vec3::new(32.0, 32.0, 1.0))
    }

    fn draw(a: Vec4, b: Vec4) -> Recorder {
        let mut target = Recorder::default();
        draw_line([a, b], [0.0, 1.0], &LinearInterpolator, &bounds(), &mut target);
        target
    }

    #[test]
    fn gentle_line_covers_one_pixel_per_column() {
        let target = draw(Vec4::new(2.0, 2.0, 0.5, 1.0), Vec4::new(12.0, 6.0, 0.5, 1.0));
        assert_eq!(target.pixels.len(), 11);
        let xs: Vec<i32> = target.pixels.iter().map(|p| p.0).collect();
        assert_eq!(xs, (2..=12).collect::<Vec<_>>());
        assert_eq!((target.pixels[0].0, target.pixels[0].1), (2, 2));
        assert_eq!((target.pixels[10].0, target.pixels[10].1), (12, 6));
    }

    #[test]
    fn steep_line_covers_one_pixel_per_row() {
        let target = draw(Vec4::new(5.0, 20.0, 0.5, 1.0), Vec4::new(3.0, 4.0, 0.5, 1.0));
        assert_eq!(target.pixels.len(), 17);
        let mut ys: Vec<i32> = target.pixels.iter().map(|p| p.1).collect();
        ys.sort_unstable();
        assert_eq!(ys, (4..=20).collect::<Vec<_>>());
    }

    #[test]
    fn depth_and_payload_follow_endpoints_after_reordering() {
        // Right-to-left input: endpoints get swapped together with payloads.
        let target = draw(Vec4::new(10.0, 3.0, 0.8, 1.0), Vec4::new(2.0, 3.0, 0.4, 1.0));
        let first = target.pixels.first().unwrap();
        let last = target.pixels.last().unwrap();

        assert_eq!(first.0, 2);
        assert_relative_eq!(first.2, 0.4);
        assert_relative_eq!(first.3, 1.0);
        assert_eq!(last.0, 10);
        assert_relative_eq!(last.2, 0.8, epsilon = 1e-6);
        assert_relative_eq!(last.3, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn near_diagonal_line_reaches_rounded_endpoints() {
        // Gentle before rounding, steep after: (3, 2) -> (4, 4).
        let target = draw(Vec4::new(2.5, 2.45, 0.5, 1.0), Vec4::new(4.4, 4.3, 0.5, 1.0));
        let pixels: Vec<(i32, i32)> = target.pixels.iter().map(|p| (p.0, p.1)).collect();
        assert_eq!(pixels, vec![(3, 2), (3, 3), (4, 4)]);
    }

    #[test]
    fn zero_length_line_draws_single_pixel() {
        let p = Vec4::new(7.2, 7.4, 0.5, 1.0);
        let target = draw(p, p);
        assert_eq!(target.pixels.len(), 1);
        assert_eq!((target.pixels[0].0, target.pixels[0].1), (7, 7));
    }

    #[test]
    fn endpoint_outside_screen_rejects_line() {
        let target = draw(Vec4::new(2.0, 2.0, 0.5, 1.0), Vec4::new(40.0, 2.0, 0.5, 1.0));
        assert!(target.pixels.is_empty());
    }
}
