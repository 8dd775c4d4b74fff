//! Per-frame clear and draw orchestration.

use crate::api::GlApi;
use crate::buffer::IndexBuffer;
use crate::context::{gl_call, Context};
use crate::shader::Shader;
use crate::vertex_array::VertexArray;

/// Issues clears and indexed draws.
///
/// Holds nothing but the context; every [`draw`](Self::draw) re-binds the
/// resources it uses, so the outcome never depends on what was bound before.
///
/// # Example
///
/// ```no_run
/// # use gl_quad::{Context, IndexBuffer, Renderer, Shader, VertexArray};
/// # fn frame(ctx: &Context, va: &VertexArray, ib: &IndexBuffer, shader: &mut Shader, red: f32)
/// #     -> gl_quad::Result<()> {
/// let renderer = Renderer::new(ctx);
/// renderer.clear();
/// shader.set_uniform_4f("u_Color", red, 0.3, 0.8, 1.0)?;
/// renderer.draw(va, ib, shader);
/// # Ok(())
/// # }
/// ```
pub struct Renderer<G: GlApi = glow::Context> {
    ctx: Context<G>,
}

impl<G: GlApi> Renderer<G> {
    /// Create a renderer for `ctx`.
    #[must_use]
    pub fn new(ctx: &Context<G>) -> Self {
        Self { ctx: ctx.clone() }
    }

    /// Clear the color buffer.
    pub fn clear(&self) {
        gl_call!(self.ctx, clear(glow::COLOR_BUFFER_BIT));
    }

    /// Set the color [`clear`](Self::clear) fills with.
    pub fn set_clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32) {
        gl_call!(self.ctx, clear_color(red, green, blue, alpha));
    }

    /// Set the viewport to `width` x `height` pixels from the origin.
    pub fn set_viewport(&self, width: u32, height: u32) {
        let width = i32::try_from(width).unwrap_or(i32::MAX);
        let height = i32::try_from(height).unwrap_or(i32::MAX);
        gl_call!(self.ctx, viewport(0, 0, width, height));
    }

    /// Toggle straight-alpha blending (`SRC_ALPHA`, `ONE_MINUS_SRC_ALPHA`).
    pub fn set_blending(&self, enabled: bool) {
        if enabled {
            gl_call!(self.ctx, enable(glow::BLEND));
            gl_call!(
                self.ctx,
                blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA)
            );
        } else {
            gl_call!(self.ctx, disable(glow::BLEND));
        }
    }

    /// Draw `index_buffer.count()` indices as a triangle list.
    ///
    /// The shader is bound first so that uniform uploads issued after the
    /// draw still land on it.
    pub fn draw(
        &self,
        vertex_array: &VertexArray<G>,
        index_buffer: &IndexBuffer<G>,
        shader: &Shader<G>,
    ) {
        shader.bind();
        vertex_array.bind();
        index_buffer.bind();
        gl_call!(
            self.ctx,
            draw_elements(glow::TRIANGLES, index_buffer.count(), glow::UNSIGNED_INT, 0)
        );
    }
}
