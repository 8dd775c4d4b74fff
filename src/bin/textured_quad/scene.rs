//! The single scene the demo draws: one textured quad with a pulsing tint.

use anyhow::Context as _;
use bytemuck::{Pod, Zeroable};
use gl_quad::{
    Context, IndexBuffer, Renderer, Shader, Texture, VertexArray, VertexBuffer, VertexLayout,
};
use image::{DynamicImage, Rgba, RgbaImage};

use crate::config::DemoConfig;

/// A quad vertex: clip-space position and texture coordinate.
#[derive(Copy, Clone, Pod, Zeroable)]
#[repr(C)]
struct Vertex {
    position: [f32; 2],
    tex_coord: [f32; 2],
}

const QUAD: [Vertex; 4] = [
    Vertex {
        position: [-0.5, -0.5],
        tex_coord: [0.0, 0.0],
    },
    Vertex {
        position: [0.5, -0.5],
        tex_coord: [1.0, 0.0],
    },
    Vertex {
        position: [0.5, 0.5],
        tex_coord: [1.0, 1.0],
    },
    Vertex {
        position: [-0.5, 0.5],
        tex_coord: [0.0, 1.0],
    },
];

const INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// Layout matching [`Vertex`]: location 0 = position, location 1 = tex coord.
fn vertex_layout() -> VertexLayout {
    let mut layout = VertexLayout::new();
    layout.push::<f32>(2).push::<f32>(2);
    layout
}

/// A value bouncing between 0 and 1 in fixed steps.
#[derive(Debug, Clone, Copy)]
struct ColorCycle {
    value: f32,
    step: f32,
}

impl ColorCycle {
    const STEP: f32 = 0.05;

    fn new() -> Self {
        Self {
            value: 0.0,
            step: Self::STEP,
        }
    }

    /// Current value, then advance.
    fn next(&mut self) -> f32 {
        let current = self.value;
        if self.value > 1.0 {
            self.step = -Self::STEP;
        } else if self.value < 0.0 {
            self.step = Self::STEP;
        }
        self.value += self.step;
        current
    }
}

/// 64x64 two-tone checkerboard used when no texture file is given.
fn checkerboard() -> DynamicImage {
    const CELL: u32 = 8;
    DynamicImage::ImageRgba8(RgbaImage::from_fn(64, 64, |x, y| {
        if (x / CELL + y / CELL).is_multiple_of(2) {
            Rgba([255, 255, 255, 255])
        } else {
            Rgba([96, 96, 96, 255])
        }
    }))
}

/// GL resources for the quad, plus the animation state.
///
/// Field order is drop order; all of it must go before the GL context does.
pub struct Scene {
    renderer: Renderer,
    shader: Shader,
    texture: Texture,
    vertex_array: VertexArray,
    index_buffer: IndexBuffer,
    // Referenced by `vertex_array`.
    _vertex_buffer: VertexBuffer,
    red: ColorCycle,
}

impl Scene {
    /// Upload the quad and build the shader and texture.
    pub fn new(ctx: &Context, config: &DemoConfig) -> anyhow::Result<Self> {
        let vertex_buffer = VertexBuffer::new(ctx, &QUAD)?;
        let mut vertex_array = VertexArray::new(ctx)?;
        vertex_array.add_buffer(&vertex_buffer, &vertex_layout())?;
        let index_buffer = IndexBuffer::new(ctx, &INDICES)?;

        let mut shader = Shader::from_file(ctx, &config.shader)
            .with_context(|| format!("failed to build shader {}", config.shader.display()))?;

        let texture = match &config.texture {
            Some(path) => Texture::from_file(ctx, path)?,
            None => Texture::from_image(ctx, &checkerboard())?,
        };
        texture.bind(0);
        shader.set_uniform_1i("u_Texture", 0)?;

        let renderer = Renderer::new(ctx);
        renderer.set_blending(true);

        vertex_array.unbind();
        shader.unbind();
        vertex_buffer.unbind();
        index_buffer.unbind();

        Ok(Self {
            renderer,
            shader,
            texture,
            vertex_array,
            index_buffer,
            _vertex_buffer: vertex_buffer,
            red: ColorCycle::new(),
        })
    }

    /// Draw one frame.
    pub fn frame(&mut self) -> gl_quad::Result<()> {
        self.renderer.clear();

        let red = self.red.next();
        self.texture.bind(0);
        self.shader.set_uniform_4f("u_Color", red, 0.3, 0.8, 1.0)?;
        self.renderer
            .draw(&self.vertex_array, &self.index_buffer, &self.shader);
        Ok(())
    }

    /// Match the viewport to a new surface size.
    pub fn resize(&self, width: u32, height: u32) {
        self.renderer.set_viewport(width, height);
    }
}
