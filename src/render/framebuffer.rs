//! Frame buffer view for 2D pixel access.
//!
//! Provides a borrowed view into the color and depth buffers of a
//! [`RenderingContext`](crate::context::RenderingContext) with signed,
//! silently bounds-checked access. The depth buffer enables hidden surface
//! removal via the z-buffer algorithm.

use crate::buffer::Buffer;
use crate::colors::Color;
use crate::render::rasterizer::RasterTarget;

/// A view into color and depth buffers.
///
/// This is a borrowed view, not an owning type - it's meant to be created
/// temporarily when renderers need to write pixels while also reading the
/// context's transforms.
///
/// # Depth Buffer
///
/// The depth buffer stores screen-space `z/w` in `[0, 1]` for each pixel.
/// Smaller values are closer to the camera; a cleared buffer holds 1.0 (the
/// far plane). The depth test passes when `depth <= stored`.
pub struct FrameBuffer<'a> {
    color_buffer: &'a mut Buffer<Color>,
    depth_buffer: &'a mut Buffer<f32>,
}

impl<'a> FrameBuffer<'a> {
    /// Create a new FrameBuffer view.
    ///
    /// # Panics
    /// Panics if the two buffers differ in size.
    pub fn new(color_buffer: &'a mut Buffer<Color>, depth_buffer: &'a mut Buffer<f32>) -> Self {
        assert_eq!(
            (color_buffer.width(), color_buffer.height()),
            (depth_buffer.width(), depth_buffer.height()),
            "Color and depth buffer sizes differ"
        );
        Self {
            color_buffer,
            depth_buffer,
        }
    }

    pub fn width(&self) -> usize {
        self.color_buffer.width()
    }

    pub fn height(&self) -> usize {
        self.color_buffer.height()
    }

    /// Depth test against the stored value. Off-buffer pixels fail.
    #[inline]
    pub fn test_depth(&self, x: i32, y: i32, depth: f32) -> bool {
        self.depth_buffer
            .try_get(x, y)
            .is_some_and(|stored| depth <= stored)
    }

    #[inline]
    pub fn write_depth(&mut self, x: i32, y: i32, depth: f32) {
        self.depth_buffer.try_set(x, y, depth);
    }

    /// Set a pixel without depth testing (for overlays, contours, etc.)
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        self.color_buffer.try_set(x, y, color);
    }

    /// Get the stored depth at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_depth(&self, x: i32, y: i32) -> Option<f32> {
        self.depth_buffer.try_get(x, y)
    }
}

/// Plain flat-color drawing: the payload is the final color.
impl RasterTarget<Color> for FrameBuffer<'_> {
    #[inline]
    fn test_depth(&self, x: i32, y: i32, depth: f32) -> bool {
        FrameBuffer::test_depth(self, x, y, depth)
    }

    #[inline]
    fn write_depth(&mut self, x: i32, y: i32, depth: f32) {
        FrameBuffer::write_depth(self, x, y, depth)
    }

    #[inline]
    fn write_pixel(&mut self, x: i32, y: i32, value: Color) {
        self.set_pixel(x, y, value)
    }
}
