//! Per-frame rendering state: transform chain and render targets.
//!
//! # Transform Chain
//!
//! ```text
//! model ──model_world──▶ world ──world_view──▶ view ──view_clip──▶ clip ──clip_screen──▶ screen
//! ```
//!
//! [`Transforms`] keeps the four stage matrices plus the composites shaders
//! and renderers need. The model matrix changes for every node drawn while
//! the view and projection change at most once per frame, so
//! [`Transforms::set_model_world`] only recomposes the model-dependent
//! products.

use crate::buffer::Buffer;
use crate::colors::Color;
use crate::math::{Bounds3, Mat4, Vec3};
use crate::render::framebuffer::FrameBuffer;

/// Cached transform chain. All composites use column vectors, so
/// `model_clip = view_clip * world_view * model_world`.
#[derive(Debug, Clone, PartialEq)]
pub struct Transforms {
    model_world: Mat4,
    world_view: Mat4,
    view_clip: Mat4,
    clip_screen: Mat4,

    world_clip: Mat4,
    model_view: Mat4,
    model_clip: Mat4,
    model_screen: Mat4,
}

impl Transforms {
    /// Identity model, view and projection for a `width` x `height` target.
    pub fn new(width: usize, height: usize) -> Self {
        let mut transforms = Self {
            model_world: Mat4::identity(),
            world_view: Mat4::identity(),
            view_clip: Mat4::identity(),
            clip_screen: Mat4::clip_screen(width, height),
            world_clip: Mat4::identity(),
            model_view: Mat4::identity(),
            model_clip: Mat4::identity(),
            model_screen: Mat4::identity(),
        };
        transforms.recompose_view();
        transforms
    }

    pub fn model_world(&self) -> &Mat4 {
        &self.model_world
    }

    pub fn world_view(&self) -> &Mat4 {
        &self.world_view
    }

    pub fn view_clip(&self) -> &Mat4 {
        &self.view_clip
    }

    pub fn clip_screen(&self) -> &Mat4 {
        &self.clip_screen
    }

    pub fn world_clip(&self) -> &Mat4 {
        &self.world_clip
    }

    pub fn model_view(&self) -> &Mat4 {
        &self.model_view
    }

    pub fn model_clip(&self) -> &Mat4 {
        &self.model_clip
    }

    pub fn model_screen(&self) -> &Mat4 {
        &self.model_screen
    }

    /// Distance in front of the camera for a screen depth `z/w`, found by
    /// inverting the depth and W rows of `view_clip`.
    ///
    /// Perspective depth crowds towards 1 away from the near plane; this
    /// value stays proportional to distance.
    pub fn view_distance(&self, depth: f32) -> f32 {
        let m = &self.view_clip;
        let denom = depth * m.get(3, 2) - m.get(2, 2);
        if denom.abs() < f32::EPSILON {
            return depth;
        }
        ((m.get(2, 3) - depth * m.get(3, 3)) / denom).abs()
    }

    pub fn set_model_world(&mut self, model_world: Mat4) {
        self.model_world = model_world;
        self.recompose_model();
    }

    pub fn set_world_view(&mut self, world_view: Mat4) {
        self.world_view = world_view;
        self.recompose_view();
    }

    pub fn set_view_clip(&mut self, view_clip: Mat4) {
        self.view_clip = view_clip;
        self.recompose_view();
    }

    pub fn set_clip_screen(&mut self, clip_screen: Mat4) {
        self.clip_screen = clip_screen;
        self.recompose_model();
    }

    fn recompose_view(&mut self) {
        self.world_clip = self.view_clip * self.world_view;
        self.recompose_model();
    }

    fn recompose_model(&mut self) {
        self.model_view = self.world_view * self.model_world;
        self.model_clip = self.world_clip * self.model_world;
        self.model_screen = self.clip_screen * self.model_clip;
    }
}

/// Owns the frame's color and depth buffers and the transform chain.
#[derive(Debug, Clone)]
pub struct RenderingContext {
    color_buffer: Buffer<Color>,
    depth_buffer: Buffer<f32>,
    transforms: Transforms,
}

impl RenderingContext {
    /// Context with a black background and depth cleared to the far plane.
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_clear_values(width, height, Color::BLACK, 1.0)
    }

    pub fn with_clear_values(width: usize, height: usize, background: Color, clear_depth: f32) -> Self {
        Self {
            color_buffer: Buffer::new(width, height, background),
            depth_buffer: Buffer::new(width, height, clear_depth),
            transforms: Transforms::new(width, height),
        }
    }

    pub fn width(&self) -> usize {
        self.color_buffer.width()
    }

    pub fn height(&self) -> usize {
        self.color_buffer.height()
    }

    pub fn color_buffer(&self) -> &Buffer<Color> {
        &self.color_buffer
    }

    pub fn color_buffer_mut(&mut self) -> &mut Buffer<Color> {
        &mut self.color_buffer
    }

    pub fn depth_buffer(&self) -> &Buffer<f32> {
        &self.depth_buffer
    }

    pub fn depth_buffer_mut(&mut self) -> &mut Buffer<f32> {
        &mut self.depth_buffer
    }

    pub fn transforms(&self) -> &Transforms {
        &self.transforms
    }

    pub fn set_model_world(&mut self, model_world: Mat4) {
        self.transforms.set_model_world(model_world);
    }

    pub fn set_world_view(&mut self, world_view: Mat4) {
        self.transforms.set_world_view(world_view);
    }

    pub fn set_view_clip(&mut self, view_clip: Mat4) {
        self.transforms.set_view_clip(view_clip);
    }

    /// The screen volume primitives must stay strictly inside:
    /// `0 < x < width`, `0 < y < height`, `0 < z < 1`.
    pub fn screen_bounds(&self) -> Bounds3 {
        Bounds3::new(
            Vec3::ZERO,
            Vec3::new(self.width() as f32, self.height() as f32, 1.0),
        )
    }

    /// Borrow the transforms and a writable view of the buffers at once.
    pub fn split(&mut self) -> (&Transforms, FrameBuffer<'_>) {
        (
            &self.transforms,
            FrameBuffer::new(&mut self.color_buffer, &mut self.depth_buffer),
        )
    }

    pub fn clear(&mut self) {
        self.color_buffer.clear();
        self.depth_buffer.clear();
    }

    /// Reallocate both buffers and refit the clip→screen mapping.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.color_buffer = Buffer::new(width, height, self.color_buffer.default_value());
        self.depth_buffer = Buffer::new(width, height, self.depth_buffer.default_value());
        self.transforms.set_clip_screen(Mat4::clip_screen(width, height));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec4;
    use approx::assert_relative_eq;

    #[test]
    fn composites_follow_stage_matrices() {
        let mut transforms = Transforms::new(64, 32);
        let model = Mat4::translation(1.0, 2.0, 3.0);
        let view = Mat4::rotation_y(0.4);
        let proj = Mat4::perspective(1.0, 2.0, 0.1, 50.0);

        transforms.set_view_clip(proj);
        transforms.set_world_view(view);
        transforms.set_model_world(model);

        assert_relative_eq!(*transforms.world_clip(), proj * view);
        assert_relative_eq!(*transforms.model_view(), view * model);
        assert_relative_eq!(*transforms.model_clip(), proj * view * model);
        assert_relative_eq!(
            *transforms.model_screen(),
            Mat4::clip_screen(64, 32) * proj * view * model
        );
    }

    #[test]
    fn view_distance_inverts_projected_depth() {
        let mut transforms = Transforms::new(8, 8);
        for proj in [
            Mat4::perspective(1.0, 1.0, 0.1, 100.0),
            Mat4::orthographic(4.0, 4.0, 1.0, 10.0),
        ] {
            transforms.set_view_clip(proj);
            for distance in [1.0, 5.0, 8.0] {
                let clip = proj * Vec4::point(0.0, 0.0, -distance);
                let depth = clip.z / clip.w;
                assert_relative_eq!(transforms.view_distance(depth), distance, epsilon = 1e-3);
            }
        }

        // Identity projection keeps depth as is.
        transforms.set_view_clip(Mat4::identity());
        assert_relative_eq!(transforms.view_distance(0.4), 0.4);
    }

    #[test]
    fn model_change_keeps_view_chain() {
        let mut transforms = Transforms::new(8, 8);
        transforms.set_world_view(Mat4::translation(0.0, 0.0, -5.0));
        let world_clip = *transforms.world_clip();
        transforms.set_model_world(Mat4::scaling(2.0, 2.0, 2.0));
        assert_eq!(*transforms.world_clip(), world_clip);
    }

    #[test]
    fn resize_refits_screen_mapping() {
        let mut ctx = RenderingContext::with_clear_values(4, 4, Color::BLUE, 1.0);
        ctx.resize(10, 6);
        assert_eq!((ctx.width(), ctx.height()), (10, 6));
        assert_eq!(ctx.color_buffer().get(9, 5), Color::BLUE);
        assert_eq!(*ctx.transforms().clip_screen(), Mat4::clip_screen(10, 6));
        assert_eq!(ctx.screen_bounds().max, Vec3::new(10.0, 6.0, 1.0));
    }
}
