//! Write-once GPU buffers.
//!
//! Both buffer kinds upload their contents once, at construction, with
//! `STATIC_DRAW` usage. There is no update path. Dropping a buffer deletes the
//! GL object; buffers are move-only, so that happens exactly once.

use bytemuck::Pod;

use crate::api::GlApi;
use crate::context::{gl_call, Context};
use crate::error::{gl_size, Error, Result};

/// One GL buffer object bound to a fixed target.
struct RawBuffer<G: GlApi> {
    ctx: Context<G>,
    handle: G::Buffer,
    target: u32,
    size: usize,
}

impl<G: GlApi> RawBuffer<G> {
    fn new(ctx: &Context<G>, target: u32, data: &[u8]) -> Result<Self> {
        let handle = gl_call!(ctx, create_buffer()).map_err(|message| Error::Create {
            kind: "buffer",
            message,
        })?;
        // Owned from here on, so an early return still deletes it.
        let buffer = Self {
            ctx: ctx.clone(),
            handle,
            target,
            size: data.len(),
        };
        buffer.bind();
        gl_call!(ctx, buffer_data_u8_slice(target, data, glow::STATIC_DRAW));
        Ok(buffer)
    }

    fn bind(&self) {
        gl_call!(self.ctx, bind_buffer(self.target, Some(self.handle)));
    }

    fn unbind(&self) {
        gl_call!(self.ctx, bind_buffer(self.target, None));
    }
}

impl<G: GlApi> Drop for RawBuffer<G> {
    fn drop(&mut self) {
        gl_call!(self.ctx, delete_buffer(self.handle));
    }
}

/// Vertex data in an `ARRAY_BUFFER`.
pub struct VertexBuffer<G: GlApi = glow::Context> {
    raw: RawBuffer<G>,
}

impl<G: GlApi> VertexBuffer<G> {
    /// Allocate a buffer and upload `data` into it.
    ///
    /// An empty slice is accepted; drawing from it is the caller's bug and is
    /// left to the driver's error check.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Create`] if the driver hands out no buffer name.
    pub fn new<T: Pod>(ctx: &Context<G>, data: &[T]) -> Result<Self> {
        let raw = RawBuffer::new(ctx, glow::ARRAY_BUFFER, bytemuck::cast_slice(data))?;
        Ok(Self { raw })
    }

    /// Make this the current `ARRAY_BUFFER`.
    pub fn bind(&self) {
        self.raw.bind();
    }

    /// Clear the `ARRAY_BUFFER` binding.
    pub fn unbind(&self) {
        self.raw.unbind();
    }

    /// Size of the uploaded data in bytes.
    pub fn size(&self) -> usize {
        self.raw.size
    }

    /// The GL buffer name.
    pub fn handle(&self) -> G::Buffer {
        self.raw.handle
    }
}

/// `u32` indices in an `ELEMENT_ARRAY_BUFFER`.
pub struct IndexBuffer<G: GlApi = glow::Context> {
    raw: RawBuffer<G>,
    count: i32,
}

impl<G: GlApi> IndexBuffer<G> {
    /// Allocate a buffer and upload `indices` into it.
    ///
    /// The element count used by draw calls is `indices.len()`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SizeOverflow`] if there are more than `i32::MAX`
    /// indices, or [`Error::Create`] if the driver hands out no buffer name.
    pub fn new(ctx: &Context<G>, indices: &[u32]) -> Result<Self> {
        let count = gl_size("index count", indices.len())?;
        let raw = RawBuffer::new(
            ctx,
            glow::ELEMENT_ARRAY_BUFFER,
            bytemuck::cast_slice(indices),
        )?;
        Ok(Self { raw, count })
    }

    /// Make this the current `ELEMENT_ARRAY_BUFFER`.
    pub fn bind(&self) {
        self.raw.bind();
    }

    /// Clear the `ELEMENT_ARRAY_BUFFER` binding.
    pub fn unbind(&self) {
        self.raw.unbind();
    }

    /// Number of indices, as passed to `glDrawElements`.
    pub fn count(&self) -> i32 {
        self.count
    }

    /// Size of the uploaded data in bytes.
    pub fn size(&self) -> usize {
        self.raw.size
    }

    /// The GL buffer name.
    pub fn handle(&self) -> G::Buffer {
        self.raw.handle
    }
}
