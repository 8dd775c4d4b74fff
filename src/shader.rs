//! Shader programs built from a single combined source file.
//!
//! A combined source holds both stages, each introduced by a marker line:
//!
//! ```text
//! #shader vertex
//! #version 330 core
//! ...
//! #shader fragment
//! #version 330 core
//! ...
//! ```
//!
//! Lines after a marker belong to that stage until the next marker or the end
//! of the file.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::api::GlApi;
use crate::context::{gl_call, Context};
use crate::error::{Error, Result};

/// Token that introduces a stage marker line.
const MARKER: &str = "#shader";

/// One programmable pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader.
    Vertex,
    /// Fragment shader.
    Fragment,
}

impl ShaderStage {
    /// The GL shader type enum.
    #[must_use]
    pub const fn gl_type(self) -> u32 {
        match self {
            Self::Vertex => glow::VERTEX_SHADER,
            Self::Fragment => glow::FRAGMENT_SHADER,
        }
    }

    /// The word used in marker lines.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-stage source text split out of a combined file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderSource {
    /// Vertex stage source, one `\n`-terminated line per input line.
    pub vertex: String,
    /// Fragment stage source, one `\n`-terminated line per input line.
    pub fragment: String,
}

impl ShaderSource {
    /// Split combined source text into its stages.
    ///
    /// Marker lines are dropped. Lines before the first marker belong to no
    /// stage and are dropped too. A marker naming neither stage leaves the
    /// current stage unchanged.
    ///
    /// ```
    /// use gl_quad::ShaderSource;
    ///
    /// let source = ShaderSource::parse("#shader vertex\nA\n#shader fragment\nB\n");
    /// assert_eq!(source.vertex, "A\n");
    /// assert_eq!(source.fragment, "B\n");
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut source = Self::default();
        let mut current = None;

        for (number, line) in text.lines().enumerate() {
            if line.contains(MARKER) {
                if line.contains(ShaderStage::Vertex.name()) {
                    current = Some(ShaderStage::Vertex);
                } else if line.contains(ShaderStage::Fragment.name()) {
                    current = Some(ShaderStage::Fragment);
                } else {
                    log::warn!("line {}: unknown shader stage marker `{line}`", number + 1);
                }
                continue;
            }

            match current {
                Some(stage) => {
                    let buf = source.stage_mut(stage);
                    buf.push_str(line);
                    buf.push('\n');
                }
                None if !line.trim().is_empty() => {
                    log::debug!("line {}: ignoring text before the first stage marker", number + 1);
                }
                None => {}
            }
        }

        source
    }

    /// Read and split a combined source file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    /// Source text of one stage.
    #[must_use]
    pub fn stage(&self, stage: ShaderStage) -> &str {
        match stage {
            ShaderStage::Vertex => &self.vertex,
            ShaderStage::Fragment => &self.fragment,
        }
    }

    fn stage_mut(&mut self, stage: ShaderStage) -> &mut String {
        match stage {
            ShaderStage::Vertex => &mut self.vertex,
            ShaderStage::Fragment => &mut self.fragment,
        }
    }
}

/// A linked GL program.
///
/// Uniform locations are looked up on first use and cached for the life of
/// the program, including names that turned out not to exist. Every setter
/// binds the program first, so a value never lands on whichever program
/// happened to be current.
pub struct Shader<G: GlApi = glow::Context> {
    ctx: Context<G>,
    program: G::Program,
    path: Option<PathBuf>,
    uniforms: HashMap<String, Option<G::UniformLocation>>,
}

impl<G: GlApi> Shader<G> {
    /// Load, compile and link a combined source file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, and otherwise the
    /// same errors as [`from_source`](Self::from_source).
    pub fn from_file(ctx: &Context<G>, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = ShaderSource::from_file(path)?;
        let mut shader = Self::from_source(ctx, &source).inspect_err(|err| {
            log::error!("{}: {err}", path.display());
        })?;
        shader.path = Some(path.to_owned());
        log::info!("loaded shader {}", path.display());
        Ok(shader)
    }

    /// Compile both stages of `source` and link them.
    ///
    /// Compiler and linker diagnostics are logged at `error` level before the
    /// failed objects are deleted. No GL object outlives a failure.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingStage`] for an empty stage,
    /// [`Error::Compile`] or [`Error::Link`] with the driver's diagnostic
    /// text, or [`Error::Create`] if the driver hands out no name.
    pub fn from_source(ctx: &Context<G>, source: &ShaderSource) -> Result<Self> {
        for stage in [ShaderStage::Vertex, ShaderStage::Fragment] {
            if source.stage(stage).trim().is_empty() {
                return Err(Error::MissingStage(stage));
            }
        }

        let program = gl_call!(ctx, create_program()).map_err(|message| Error::Create {
            kind: "program",
            message,
        })?;

        match link_program(ctx, program, source) {
            Ok(()) => Ok(Self {
                ctx: ctx.clone(),
                program,
                path: None,
                uniforms: HashMap::new(),
            }),
            Err(err) => {
                gl_call!(ctx, delete_program(program));
                Err(err)
            }
        }
    }

    /// Make this the current program.
    pub fn bind(&self) {
        gl_call!(self.ctx, use_program(Some(self.program)));
    }

    /// Clear the current program.
    pub fn unbind(&self) {
        gl_call!(self.ctx, use_program(None));
    }

    /// The file this program was loaded from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The GL program name.
    pub fn program(&self) -> G::Program {
        self.program
    }

    /// Location of the active uniform `name`, or `None` if the program has
    /// none by that name. Only the first lookup of a name reaches the driver.
    pub fn uniform_location(&mut self, name: &str) -> Option<G::UniformLocation> {
        if let Some(cached) = self.uniforms.get(name) {
            return cached.clone();
        }

        let location = gl_call!(self.ctx, get_uniform_location(self.program, name));
        if location.is_none() {
            log::warn!("uniform `{name}` not found in program {:?}", self.program);
        }
        self.uniforms.insert(name.to_owned(), location.clone());
        location
    }

    /// Set an `int` (or sampler) uniform.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UniformNotFound`] if the program has no such uniform.
    pub fn set_uniform_1i(&mut self, name: &str, x: i32) -> Result<()> {
        let location = self.bound_location(name)?;
        gl_call!(self.ctx, uniform_1_i32(Some(&location), x));
        Ok(())
    }

    /// Set a `float` uniform.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UniformNotFound`] if the program has no such uniform.
    pub fn set_uniform_1f(&mut self, name: &str, x: f32) -> Result<()> {
        let location = self.bound_location(name)?;
        gl_call!(self.ctx, uniform_1_f32(Some(&location), x));
        Ok(())
    }

    /// Set a `vec2` uniform.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UniformNotFound`] if the program has no such uniform.
    pub fn set_uniform_2f(&mut self, name: &str, x: f32, y: f32) -> Result<()> {
        let location = self.bound_location(name)?;
        gl_call!(self.ctx, uniform_2_f32(Some(&location), x, y));
        Ok(())
    }

    /// Set a `vec3` uniform.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UniformNotFound`] if the program has no such uniform.
    pub fn set_uniform_3f(&mut self, name: &str, x: f32, y: f32, z: f32) -> Result<()> {
        let location = self.bound_location(name)?;
        gl_call!(self.ctx, uniform_3_f32(Some(&location), x, y, z));
        Ok(())
    }

    /// Set a `vec4` uniform.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UniformNotFound`] if the program has no such uniform.
    pub fn set_uniform_4f(&mut self, name: &str, x: f32, y: f32, z: f32, w: f32) -> Result<()> {
        let location = self.bound_location(name)?;
        gl_call!(self.ctx, uniform_4_f32(Some(&location), x, y, z, w));
        Ok(())
    }

    /// Set a `mat4` uniform from 16 column-major floats.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UniformNotFound`] if the program has no such uniform.
    pub fn set_uniform_mat4(&mut self, name: &str, matrix: &[f32; 16]) -> Result<()> {
        let location = self.bound_location(name)?;
        gl_call!(
            self.ctx,
            uniform_matrix_4_f32_slice(Some(&location), false, matrix)
        );
        Ok(())
    }

    /// Resolve `name` and bind the program, ready for an upload.
    fn bound_location(&mut self, name: &str) -> Result<G::UniformLocation> {
        let location = self
            .uniform_location(name)
            .ok_or_else(|| Error::UniformNotFound(name.to_owned()))?;
        self.bind();
        Ok(location)
    }
}

impl<G: GlApi> Drop for Shader<G> {
    fn drop(&mut self) {
        gl_call!(self.ctx, delete_program(self.program));
    }
}

/// Compile both stages into `program`, link it and validate it.
///
/// A program that links but fails validation is still usable; the validation
/// log is reported at `warn`. Stage objects are deleted before returning, on
/// success and on failure.
fn link_program<G: GlApi>(
    ctx: &Context<G>,
    program: G::Program,
    source: &ShaderSource,
) -> Result<()> {
    let vs = compile_stage(ctx, ShaderStage::Vertex, &source.vertex)?;
    let fs = match compile_stage(ctx, ShaderStage::Fragment, &source.fragment) {
        Ok(fs) => fs,
        Err(err) => {
            gl_call!(ctx, delete_shader(vs));
            return Err(err);
        }
    };

    gl_call!(ctx, attach_shader(program, vs));
    gl_call!(ctx, attach_shader(program, fs));
    gl_call!(ctx, link_program(program));

    let linked = gl_call!(ctx, get_program_link_status(program));
    let result = if linked {
        gl_call!(ctx, validate_program(program));
        if !gl_call!(ctx, get_program_validate_status(program)) {
            let log = gl_call!(ctx, get_program_info_log(program));
            log::warn!("program failed validation:\n{log}");
        }
        Ok(())
    } else {
        let log = gl_call!(ctx, get_program_info_log(program));
        log::error!("failed to link program:\n{log}");
        Err(Error::Link(log))
    };

    // Stage objects are only needed until the link.
    for stage in [vs, fs] {
        gl_call!(ctx, detach_shader(program, stage));
        gl_call!(ctx, delete_shader(stage));
    }
    result
}

/// Compile one stage, returning its object name.
///
/// On failure the compiler log is logged and the stage object deleted.
fn compile_stage<G: GlApi>(
    ctx: &Context<G>,
    stage: ShaderStage,
    source: &str,
) -> Result<G::Shader> {
    let shader =
        gl_call!(ctx, create_shader(stage.gl_type())).map_err(|message| Error::Create {
            kind: "shader",
            message,
        })?;
    gl_call!(ctx, shader_source(shader, source));
    gl_call!(ctx, compile_shader(shader));

    if gl_call!(ctx, get_shader_compile_status(shader)) {
        return Ok(shader);
    }

    let log = gl_call!(ctx, get_shader_info_log(shader));
    log::error!("failed to compile {stage} shader:\n{log}");
    gl_call!(ctx, delete_shader(shader));
    Err(Error::Compile { stage, log })
}
