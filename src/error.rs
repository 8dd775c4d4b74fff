//! Error types.
//!
//! Driver-reported GL errors are not part of [`Error`]: they indicate a bug in
//! the calling code and are handled by the [`Context`](crate::Context) check
//! mode instead (see [`GlError`]).

use std::path::PathBuf;

use thiserror::Error;

use crate::shader::ShaderStage;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures that can occur while creating or using GPU resources.
#[derive(Error, Debug)]
pub enum Error {
    /// The driver refused to allocate an object name.
    #[error("failed to create {kind}: {message}")]
    Create {
        /// Kind of object that was requested (e.g. `"buffer"`).
        kind: &'static str,
        /// Message reported by the driver binding.
        message: String,
    },

    /// A source file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A combined shader source had no section for the given stage.
    #[error("shader source has no {0} section")]
    MissingStage(ShaderStage),

    /// A shader stage failed to compile.
    #[error("failed to compile {stage} shader: {log}")]
    Compile {
        /// Stage that failed.
        stage: ShaderStage,
        /// Compiler diagnostic text.
        log: String,
    },

    /// The program failed to link.
    #[error("failed to link program: {0}")]
    Link(String),

    /// The program has no active uniform with this name.
    #[error("uniform `{0}` not found in program")]
    UniformNotFound(String),

    /// An image file could not be decoded.
    #[error("failed to decode image {}: {source}", .path.display())]
    Image {
        /// File that was being decoded.
        path: PathBuf,
        /// Underlying decoder error.
        source: image::ImageError,
    },

    /// A decoded image has no pixels.
    #[error("image has no pixel data")]
    EmptyImage,

    /// A count or dimension does not fit the `i32` the GL API takes.
    #[error("{what} of {value} exceeds i32::MAX")]
    SizeOverflow {
        /// What was being converted.
        what: &'static str,
        /// Offending value.
        value: usize,
    },
}

/// Convert a host-side size to the `i32` GL entry points expect.
pub(crate) fn gl_size(what: &'static str, value: usize) -> Result<i32> {
    i32::try_from(value).map_err(|_| Error::SizeOverflow { what, value })
}

/// A GL error flag raised by a checked call.
///
/// Displays in the same shape the error check prints:
/// `[OpenGL Error] (0x0502 INVALID_OPERATION): <call> <file>:<line>`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("[OpenGL Error] ({code:#06x} {}): {call} {file}:{line}", error_name(*.code))]
pub struct GlError {
    /// Raw value returned by `glGetError`.
    pub code: u32,
    /// Text of the call that raised the flag.
    pub call: String,
    /// Source file of the call site.
    pub file: &'static str,
    /// Source line of the call site.
    pub line: u32,
}

/// Symbolic name of a `glGetError` code.
#[must_use]
pub fn error_name(code: u32) -> &'static str {
    match code {
        glow::NO_ERROR => "NO_ERROR",
        glow::INVALID_ENUM => "INVALID_ENUM",
        glow::INVALID_VALUE => "INVALID_VALUE",
        glow::INVALID_OPERATION => "INVALID_OPERATION",
        glow::STACK_OVERFLOW => "STACK_OVERFLOW",
        glow::STACK_UNDERFLOW => "STACK_UNDERFLOW",
        glow::OUT_OF_MEMORY => "OUT_OF_MEMORY",
        glow::INVALID_FRAMEBUFFER_OPERATION => "INVALID_FRAMEBUFFER_OPERATION",
        _ => "UNKNOWN",
    }
}
