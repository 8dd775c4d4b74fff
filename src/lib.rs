//! Owned OpenGL resources over [glow].
//!
//! OpenGL is a global state machine: objects are integer names, and most calls
//! act on whatever was bound last. This crate wraps the handful of objects a
//! textured-quad renderer needs into owned Rust values:
//!
//! - [`VertexBuffer`] and [`IndexBuffer`]: write-once buffer objects.
//! - [`VertexLayout`] and [`VertexArray`]: attribute descriptions and the
//!   vertex array object they are registered on.
//! - [`Shader`]: a program linked from a combined `#shader vertex` /
//!   `#shader fragment` source file, with cached uniform locations.
//! - [`Texture`]: an RGBA8 image decoded with the [image] crate.
//! - [`Renderer`]: clear and indexed draw.
//!
//! Each wrapper deletes its GL object on drop, is move-only, and re-binds
//! itself before any call that depends on binding state.
//!
//! # Error checking
//!
//! Every GL call goes through the owning [`Context`], which clears stale error
//! flags before the call and reads `glGetError` after it. In debug builds a
//! raised flag panics with the call text and source location; in release
//! builds it is logged. See [`CheckMode`].
//!
//! Recoverable failures (unreadable files, shader compile and link errors,
//! missing uniforms) are returned as [`Error`].
//!
//! # Safety
//!
//! Creating a [`Context`] is `unsafe`: the caller promises that the GL context
//! is current on this thread for as long as the `Context` or anything created
//! from it is alive. Everything after that is safe to call.
//!
//! [glow]: https://docs.rs/glow
//! [image]: https://docs.rs/image

mod api;
mod buffer;
mod context;
mod error;
mod layout;
mod renderer;
mod shader;
mod texture;
mod vertex_array;

#[cfg(test)]
mod testing;

pub use api::GlApi;
pub use buffer::{IndexBuffer, VertexBuffer};
pub use context::{CheckMode, Context};
pub use error::{error_name, Error, GlError, Result};
pub use layout::{AttribType, LayoutType, VertexLayout, VertexLayoutElement};
pub use renderer::Renderer;
pub use shader::{Shader, ShaderSource, ShaderStage};
pub use texture::Texture;
pub use vertex_array::VertexArray;
