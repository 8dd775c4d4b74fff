//! Vertex array objects.

use crate::api::GlApi;
use crate::buffer::VertexBuffer;
use crate::context::{gl_call, Context};
use crate::error::{gl_size, Error, Result};
use crate::layout::VertexLayout;

/// A GL vertex array object.
///
/// [`add_buffer`](Self::add_buffer) registers attribute pointers for a vertex
/// buffer. Attribute locations are handed out sequentially from 0 in layout
/// push order, continuing across successive buffers. They are not checked
/// against the shader's declared locations: a shader expecting `position` at
/// location 1 while the layout pushes it first reads the wrong data, silently.
///
/// The array keeps the names of the buffers it references but does not own
/// them.
pub struct VertexArray<G: GlApi = glow::Context> {
    ctx: Context<G>,
    handle: G::VertexArray,
    bindings: Vec<(G::Buffer, VertexLayout)>,
    next_attribute: u32,
}

impl<G: GlApi> VertexArray<G> {
    /// Create an empty vertex array.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Create`] if the driver hands out no name.
    pub fn new(ctx: &Context<G>) -> Result<Self> {
        let handle = gl_call!(ctx, create_vertex_array()).map_err(|message| Error::Create {
            kind: "vertex array",
            message,
        })?;
        Ok(Self {
            ctx: ctx.clone(),
            handle,
            bindings: Vec::new(),
            next_attribute: 0,
        })
    }

    /// Attach `buffer` using `layout`.
    ///
    /// Binds the array and the buffer, then enables and points one attribute
    /// per layout element. The buffer's contents must have been written with
    /// `layout.stride()` bytes per vertex.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SizeOverflow`] if the stride or an element width does
    /// not fit in `i32`.
    pub fn add_buffer(&mut self, buffer: &VertexBuffer<G>, layout: &VertexLayout) -> Result<()> {
        self.bind();
        buffer.bind();

        let stride = gl_size("vertex stride", layout.stride() as usize)?;
        for (element, offset) in layout.offsets() {
            let index = self.next_attribute;
            let count = gl_size("component count", element.count as usize)?;
            let offset = gl_size("attribute offset", offset as usize)?;

            gl_call!(self.ctx, enable_vertex_attrib_array(index));
            gl_call!(
                self.ctx,
                vertex_attrib_pointer_f32(
                    index,
                    count,
                    element.ty.gl_type(),
                    element.normalized,
                    stride,
                    offset
                )
            );
            self.next_attribute += 1;
        }

        log::debug!(
            "vertex array {:?}: buffer {:?} bound with {} attribute(s), stride {}",
            self.handle,
            buffer.handle(),
            layout.elements().len(),
            stride,
        );
        self.bindings.push((buffer.handle(), layout.clone()));
        Ok(())
    }

    /// Make this the current vertex array.
    pub fn bind(&self) {
        gl_call!(self.ctx, bind_vertex_array(Some(self.handle)));
    }

    /// Clear the vertex array binding.
    pub fn unbind(&self) {
        gl_call!(self.ctx, bind_vertex_array(None));
    }

    /// Number of attribute locations registered so far.
    pub fn attribute_count(&self) -> u32 {
        self.next_attribute
    }

    /// Buffers attached so far, with the layout each was attached with.
    pub fn bindings(&self) -> &[(G::Buffer, VertexLayout)] {
        &self.bindings
    }

    /// The GL vertex array name.
    pub fn handle(&self) -> G::VertexArray {
        self.handle
    }
}

impl<G: GlApi> Drop for VertexArray<G> {
    fn drop(&mut self) {
        gl_call!(self.ctx, delete_vertex_array(self.handle));
    }
}
