//! Built-in shader programs.
//!
//! - [`UnlitShader`]: texture × vertex color × tint, no lighting
//! - [`LitShader`]: Phong ambient + diffuse + specular with diffuse and
//!   specular maps and one directional light in view space
//! - [`ToonShader`]: the lit model with its light intensity quantized
//!   through a ramp texture

use crate::buffer::Buffer;
use crate::colors::Color;
use crate::context::Transforms;
use crate::math::{Vec2, Vec3, Vec4};
use crate::render::shader::{FragmentInput, ShaderProgram, VertexInput};

/// Attributes blended for [`UnlitShader`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnlitVarying {
    pub color: Color,
    pub uv: Vec2,
}

crate::impl_varying!(UnlitVarying { color, uv });

#[derive(Clone, Debug)]
pub struct UnlitShader {
    pub texture: Buffer<Color>,
    pub tint: Color,
}

impl UnlitShader {
    pub fn new(texture: Buffer<Color>) -> Self {
        Self {
            texture,
            tint: Color::WHITE,
        }
    }

    /// Untextured shader painting `color` everywhere.
    pub fn solid(color: Color) -> Self {
        Self {
            texture: Buffer::single(Color::WHITE),
            tint: color,
        }
    }
}

impl Default for UnlitShader {
    fn default() -> Self {
        Self::solid(Color::WHITE)
    }
}

impl ShaderProgram for UnlitShader {
    type Data = UnlitVarying;

    fn compute_vertex(&self, input: &VertexInput, transforms: &Transforms) -> FragmentInput<UnlitVarying> {
        FragmentInput::new(
            *transforms.model_clip() * Vec4::from(input.position),
            UnlitVarying {
                color: input.color,
                uv: input.uv,
            },
        )
    }

    fn compute_color(&self, input: &FragmentInput<UnlitVarying>, _transforms: &Transforms) -> Color {
        let texel = self.texture.sample(input.data.uv.x, input.data.uv.y);
        texel.modulate(input.data.color).modulate(self.tint)
    }
}

/// Attributes blended for [`LitShader`] and [`ToonShader`]. Normal and
/// position are in view space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LitVarying {
    pub normal: Vec3,
    pub view_position: Vec3,
    pub uv: Vec2,
    pub color: Color,
}

crate::impl_varying!(LitVarying {
    normal,
    view_position,
    uv,
    color
});

/// Phong shading with a single directional light.
///
/// The light direction is the direction the light travels, expressed in
/// view space, so a light of `(0, 0, -1)` shines along the camera's view
/// direction.
#[derive(Clone, Debug)]
pub struct LitShader {
    pub diffuse_map: Buffer<Color>,
    pub specular_map: Buffer<f32>,
    pub ambient: Color,
    pub light_color: Color,
    pub light_direction: Vec3,
    pub shininess: f32,
}

impl Default for LitShader {
    fn default() -> Self {
        Self {
            diffuse_map: Buffer::single(Color::WHITE),
            specular_map: Buffer::single(1.0),
            ambient: Color::gray(0.1),
            light_color: Color::WHITE,
            light_direction: Vec3::new(0.0, 0.0, -1.0),
            shininess: 32.0,
        }
    }
}

impl LitShader {
    pub fn new(diffuse_map: Buffer<Color>, specular_map: Buffer<f32>) -> Self {
        Self {
            diffuse_map,
            specular_map,
            ..Default::default()
        }
    }

    /// Diffuse and specular factors, both in `[0, 1]`, for a view-space
    /// surface point. No specular highlight is produced on the unlit side.
    pub fn light_terms(&self, normal: Vec3, view_position: Vec3) -> (f32, f32) {
        let n = normal.normalize();
        let l = self.light_direction.normalize();

        let diffuse = (-l).dot(n).max(0.0);
        if diffuse <= 0.0 {
            return (0.0, 0.0);
        }

        let reflected = l.reflect(n);
        let to_eye = (-view_position).normalize();
        let specular = to_eye.dot(reflected).max(0.0).powf(self.shininess);
        (diffuse, specular)
    }

    fn vertex(&self, input: &VertexInput, transforms: &Transforms) -> FragmentInput<LitVarying> {
        let model_view = transforms.model_view();
        FragmentInput::new(
            *transforms.model_clip() * Vec4::from(input.position),
            LitVarying {
                normal: model_view.transform_vector(input.normal),
                view_position: model_view.transform_point(input.position),
                uv: input.uv,
                color: input.color,
            },
        )
    }
}

impl ShaderProgram for LitShader {
    type Data = LitVarying;

    fn compute_vertex(&self, input: &VertexInput, transforms: &Transforms) -> FragmentInput<LitVarying> {
        self.vertex(input, transforms)
    }

    fn compute_color(&self, input: &FragmentInput<LitVarying>, _transforms: &Transforms) -> Color {
        let data = &input.data;
        let (diffuse, specular) = self.light_terms(data.normal, data.view_position);

        let albedo = self.diffuse_map.sample(data.uv.x, data.uv.y);
        let shine = self.specular_map.sample(data.uv.x, data.uv.y);

        let light = self.ambient + self.light_color * diffuse + self.light_color * (specular * shine);
        let lit = light.modulate(albedo).modulate(data.color).clamp();
        Color { a: 1.0, ..lit }
    }
}

/// Cel shading: the lit intensity picks a color from `ramp` (sampled along U).
#[derive(Clone, Debug)]
pub struct ToonShader {
    pub lit: LitShader,
    pub ramp: Buffer<Color>,
}

impl ToonShader {
    pub fn new(lit: LitShader, ramp: Buffer<Color>) -> Self {
        Self { lit, ramp }
    }

    /// Ramp of `levels` evenly spaced gray bands, darkest first.
    pub fn banded(lit: LitShader, levels: usize) -> Self {
        let levels = levels.max(1);
        let mut ramp = Buffer::new(levels, 1, Color::WHITE);
        for i in 0..levels {
            ramp.set(i, 0, Color::gray((i + 1) as f32 / levels as f32));
        }
        Self::new(lit, ramp)
    }

    /// Combined light intensity in `[0, 1]` before quantization.
    pub fn intensity(&self, data: &LitVarying) -> f32 {
        let (diffuse, specular) = self.lit.light_terms(data.normal, data.view_position);
        let shine = self.lit.specular_map.sample(data.uv.x, data.uv.y);
        (diffuse + specular * shine).clamp(0.0, 1.0)
    }
}

impl ShaderProgram for ToonShader {
    type Data = LitVarying;

    fn compute_vertex(&self, input: &VertexInput, transforms: &Transforms) -> FragmentInput<LitVarying> {
        self.lit.vertex(input, transforms)
    }

    fn compute_color(&self, input: &FragmentInput<LitVarying>, _transforms: &Transforms) -> Color {
        let data = &input.data;
        let band = self.ramp.sample(self.intensity(data), 0.5);
        let albedo = self.lit.diffuse_map.sample(data.uv.x, data.uv.y);

        let toon = (self.lit.ambient + band).modulate(albedo).modulate(data.color).clamp();
        Color { a: 1.0, ..toon }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn input(normal: Vec3) -> VertexInput {
        VertexInput::new(Vec3::new(0.0, 0.0, -5.0), normal, Color::WHITE, Vec2::ZERO)
    }

    #[test]
    fn unlit_multiplies_texture_vertex_color_and_tint() {
        let shader = UnlitShader {
            texture: Buffer::single(Color::rgb(0.5, 1.0, 1.0)),
            tint: Color::rgb(1.0, 0.5, 1.0),
        };
        let transforms = Transforms::new(4, 4);
        let mut vertex = input(Vec3::Z);
        vertex.color = Color::rgb(1.0, 1.0, 0.5);

        let fragment = shader.compute_vertex(&vertex, &transforms);
        assert_relative_eq!(fragment.position, Vec4::new(0.0, 0.0, -5.0, 1.0));
        assert_relative_eq!(
            shader.compute_color(&fragment, &transforms),
            Color::rgb(0.5, 0.5, 0.5)
        );
    }

    #[test]
    fn lit_terms_follow_light_angle() {
        let shader = LitShader::default();
        let (diffuse, specular) = shader.light_terms(Vec3::Z, Vec3::new(0.0, 0.0, -5.0));
        assert_relative_eq!(diffuse, 1.0);
        // Reflection points straight back at the eye.
        assert_relative_eq!(specular, 1.0, epsilon = 1e-5);

        let (diffuse, specular) = shader.light_terms(-Vec3::Z, Vec3::new(0.0, 0.0, -5.0));
        assert_eq!((diffuse, specular), (0.0, 0.0));

        let tilted = Vec3::new(1.0, 0.0, 1.0).normalize();
        let (diffuse, _) = shader.light_terms(tilted, Vec3::new(0.0, 0.0, -5.0));
        assert_relative_eq!(diffuse, std::f32::consts::FRAC_1_SQRT_2, epsilon = 1e-5);
    }

    #[test]
    fn lit_color_is_clamped_and_opaque() {
        let shader = LitShader::default();
        let transforms = Transforms::new(4, 4);
        let fragment = shader.compute_vertex(&input(Vec3::Z), &transforms);
        let color = shader.compute_color(&fragment, &transforms);
        assert_relative_eq!(color, Color::WHITE);

        let fragment = shader.compute_vertex(&input(-Vec3::Z), &transforms);
        let color = shader.compute_color(&fragment, &transforms);
        assert_relative_eq!(color, Color::gray(0.1));
    }

    #[test]
    fn toon_quantizes_intensity() {
        let mut lit = LitShader::default();
        lit.specular_map = Buffer::single(0.0);
        lit.ambient = Color::BLACK;
        let shader = ToonShader::banded(lit, 4);
        let transforms = Transforms::new(4, 4);

        // Diffuse of 0.6 falls into the third of four bands.
        let normal = Vec3::new(0.8, 0.0, 0.6);
        let fragment = shader.compute_vertex(&input(normal), &transforms);
        assert_relative_eq!(shader.intensity(&fragment.data), 0.6, epsilon = 1e-5);
        assert_relative_eq!(
            shader.compute_color(&fragment, &transforms),
            Color::gray(0.75)
        );
    }
}
