//! A recording stand-in for the GL driver, used by the unit tests.
//!
//! Object names are plain integers. Besides recording calls it models just
//! enough driver behaviour for the wrappers' contracts to be observable:
//! shader compilation fails on a `#error` directive, linked programs expose the
//! uniforms declared in their sources, validation can be made to fail, texture
//! units past a fixed limit raise `INVALID_ENUM`, and drawing from an empty
//! element buffer raises `INVALID_OPERATION`.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};

use crate::api::GlApi;

/// `GL_CONTEXT_LOST`.
const CONTEXT_LOST: u32 = 0x0507;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BufferUpload {
    pub target: u32,
    pub buffer: u32,
    pub data: Vec<u8>,
    pub usage: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AttribPointer {
    pub index: u32,
    pub size: i32,
    pub data_type: u32,
    pub normalized: bool,
    pub stride: i32,
    pub offset: i32,
    pub buffer: Option<u32>,
    pub vertex_array: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Draw {
    pub mode: u32,
    pub count: i32,
    pub element_type: u32,
    pub program: Option<u32>,
    pub vertex_array: Option<u32>,
    pub element_buffer: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct UniformUpload {
    pub program: Option<u32>,
    pub location: u32,
    pub values: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TexUpload {
    pub texture: Option<u32>,
    pub internal_format: i32,
    pub width: i32,
    pub height: i32,
    pub format: u32,
    pub pixels: Vec<u8>,
}

/// `GL_MAX_COMBINED_TEXTURE_IMAGE_UNITS` of the fake driver.
const MAX_TEXTURE_UNITS: u32 = 80;

#[derive(Default)]
struct ShaderState {
    stage: u32,
    source: String,
    compiled: bool,
}

#[derive(Default)]
struct ProgramState {
    attached: Vec<u32>,
    linked: bool,
    validated: bool,
    log: String,
    uniforms: Vec<String>,
}

#[derive(Default)]
pub(crate) struct RecordingGl {
    next_name: Cell<u32>,
    calls: RefCell<Vec<&'static str>>,
    errors: RefCell<VecDeque<u32>>,
    fail_on: Cell<Option<(&'static str, u32)>>,
    context_lost: Cell<bool>,
    invalid_programs: Cell<bool>,
    error_reads: Cell<usize>,

    buffer_sizes: RefCell<HashMap<u32, usize>>,
    bound_buffers: RefCell<HashMap<u32, u32>>,
    bound_vertex_array: Cell<Option<u32>>,
    uploads: RefCell<Vec<BufferUpload>>,
    attrib_pointers: RefCell<Vec<AttribPointer>>,
    enabled_attribs: RefCell<Vec<u32>>,

    shaders: RefCell<HashMap<u32, ShaderState>>,
    programs: RefCell<HashMap<u32, ProgramState>>,
    current_program: Cell<Option<u32>>,
    uniform_uploads: RefCell<Vec<UniformUpload>>,

    active_unit: Cell<u32>,
    bound_textures: RefCell<HashMap<u32, u32>>,
    tex_params: RefCell<Vec<(u32, i32)>>,
    tex_uploads: RefCell<Vec<TexUpload>>,

    draws: RefCell<Vec<Draw>>,
    deleted: RefCell<Vec<(&'static str, u32)>>,
}

impl RecordingGl {
    pub const VERSION: &'static str = "3.3.0 Recording";

    /// Number of recorded calls to `method`.
    pub fn count(&self, method: &str) -> usize {
        self.calls.borrow().iter().filter(|c| **c == method).count()
    }

    /// All recorded method names in call order (`get_error` excluded).
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    /// Queue an error flag as if an earlier call had raised it.
    pub fn raise(&self, code: u32) {
        self.errors.borrow_mut().push_back(code);
    }

    /// Raise `code` the next time `method` is called.
    pub fn fail_next(&self, method: &'static str, code: u32) {
        self.fail_on.set(Some((method, code)));
    }

    /// Make `get_error` report `GL_CONTEXT_LOST` forever.
    pub fn set_context_lost(&self, lost: bool) {
        self.context_lost.set(lost);
    }

    /// Make every later `validate_program` fail.
    pub fn set_programs_invalid(&self, invalid: bool) {
        self.invalid_programs.set(invalid);
    }

    pub fn error_reads(&self) -> usize {
        self.error_reads.get()
    }

    pub fn uploads(&self) -> Vec<BufferUpload> {
        self.uploads.borrow().clone()
    }

    pub fn attrib_pointers(&self) -> Vec<AttribPointer> {
        self.attrib_pointers.borrow().clone()
    }

    pub fn enabled_attribs(&self) -> Vec<u32> {
        self.enabled_attribs.borrow().clone()
    }

    pub fn uniform_uploads(&self) -> Vec<UniformUpload> {
        self.uniform_uploads.borrow().clone()
    }

    pub fn tex_params(&self) -> Vec<(u32, i32)> {
        self.tex_params.borrow().clone()
    }

    pub fn tex_uploads(&self) -> Vec<TexUpload> {
        self.tex_uploads.borrow().clone()
    }

    pub fn draws(&self) -> Vec<Draw> {
        self.draws.borrow().clone()
    }

    /// Names passed to `delete_<kind>`, e.g. `deleted("buffer")`.
    pub fn deleted(&self, kind: &str) -> Vec<u32> {
        self.deleted
            .borrow()
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, name)| *name)
            .collect()
    }

    pub fn bound_buffer(&self, target: u32) -> Option<u32> {
        self.bound_buffers.borrow().get(&target).copied()
    }

    pub fn bound_vertex_array(&self) -> Option<u32> {
        self.bound_vertex_array.get()
    }

    pub fn current_program(&self) -> Option<u32> {
        self.current_program.get()
    }

    pub fn active_unit(&self) -> u32 {
        self.active_unit.get()
    }

    pub fn bound_texture(&self, unit: u32) -> Option<u32> {
        self.bound_textures.borrow().get(&unit).copied()
    }

    pub fn program_is_linked(&self, program: u32) -> bool {
        self.programs
            .borrow()
            .get(&program)
            .is_some_and(|p| p.linked)
    }

    pub fn shader_exists(&self, shader: u32) -> bool {
        self.shaders.borrow().contains_key(&shader)
    }

    fn record(&self, method: &'static str) {
        self.calls.borrow_mut().push(method);
        if let Some((target, code)) = self.fail_on.get() {
            if target == method {
                self.fail_on.set(None);
                self.raise(code);
            }
        }
    }

    fn name(&self) -> u32 {
        let next = self.next_name.get() + 1;
        self.next_name.set(next);
        next
    }

    fn record_uniform(&self, location: Option<&u32>, values: Vec<f32>) {
        let Some(&location) = location else { return };
        self.uniform_uploads.borrow_mut().push(UniformUpload {
            program: self.current_program.get(),
            location,
            values,
        });
    }
}

/// Uniform names declared in GLSL source, in declaration order.
fn declared_uniforms(source: &str) -> impl Iterator<Item = String> + '_ {
    source.lines().filter_map(|line| {
        let rest = line.trim().strip_prefix("uniform ")?;
        let name = rest.trim_end_matches(';').split_whitespace().last()?;
        Some(name.split('[').next().unwrap_or(name).to_owned())
    })
}

#[allow(clippy::cast_precision_loss)]
impl GlApi for RecordingGl {
    type Buffer = u32;
    type VertexArray = u32;
    type Program = u32;
    type Shader = u32;
    type Texture = u32;
    type UniformLocation = u32;

    unsafe fn get_error(&self) -> u32 {
        self.error_reads.set(self.error_reads.get() + 1);
        if self.context_lost.get() {
            return CONTEXT_LOST;
        }
        self.errors.borrow_mut().pop_front().unwrap_or(glow::NO_ERROR)
    }

    unsafe fn get_parameter_string(&self, parameter: u32) -> String {
        self.record("get_parameter_string");
        if parameter == glow::VERSION {
            Self::VERSION.to_owned()
        } else {
            String::new()
        }
    }

    unsafe fn create_buffer(&self) -> Result<u32, String> {
        self.record("create_buffer");
        let name = self.name();
        self.buffer_sizes.borrow_mut().insert(name, 0);
        Ok(name)
    }

    unsafe fn bind_buffer(&self, target: u32, buffer: Option<u32>) {
        self.record("bind_buffer");
        let mut bound = self.bound_buffers.borrow_mut();
        match buffer {
            Some(name) => bound.insert(target, name),
            None => bound.remove(&target),
        };
    }

    unsafe fn buffer_data_u8_slice(&self, target: u32, data: &[u8], usage: u32) {
        self.record("buffer_data_u8_slice");
        let Some(buffer) = self.bound_buffer(target) else {
            self.raise(glow::INVALID_OPERATION);
            return;
        };
        self.buffer_sizes.borrow_mut().insert(buffer, data.len());
        self.uploads.borrow_mut().push(BufferUpload {
            target,
            buffer,
            data: data.to_vec(),
            usage,
        });
    }

    unsafe fn delete_buffer(&self, buffer: u32) {
        self.record("delete_buffer");
        self.deleted.borrow_mut().push(("buffer", buffer));
        self.buffer_sizes.borrow_mut().remove(&buffer);
        self.bound_buffers.borrow_mut().retain(|_, b| *b != buffer);
    }

    unsafe fn create_vertex_array(&self) -> Result<u32, String> {
        self.record("create_vertex_array");
        Ok(self.name())
    }

    unsafe fn bind_vertex_array(&self, vertex_array: Option<u32>) {
        self.record("bind_vertex_array");
        self.bound_vertex_array.set(vertex_array);
    }

    unsafe fn delete_vertex_array(&self, vertex_array: u32) {
        self.record("delete_vertex_array");
        self.deleted.borrow_mut().push(("vertex_array", vertex_array));
        if self.bound_vertex_array.get() == Some(vertex_array) {
            self.bound_vertex_array.set(None);
        }
    }

    unsafe fn enable_vertex_attrib_array(&self, index: u32) {
        self.record("enable_vertex_attrib_array");
        self.enabled_attribs.borrow_mut().push(index);
    }

    unsafe fn vertex_attrib_pointer_f32(
        &self,
        index: u32,
        size: i32,
        data_type: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) {
        self.record("vertex_attrib_pointer_f32");
        self.attrib_pointers.borrow_mut().push(AttribPointer {
            index,
            size,
            data_type,
            normalized,
            stride,
            offset,
            buffer: self.bound_buffer(glow::ARRAY_BUFFER),
            vertex_array: self.bound_vertex_array.get(),
        });
    }

    unsafe fn create_shader(&self, shader_type: u32) -> Result<u32, String> {
        self.record("create_shader");
        let name = self.name();
        self.shaders.borrow_mut().insert(
            name,
            ShaderState {
                stage: shader_type,
                ..ShaderState::default()
            },
        );
        Ok(name)
    }

    unsafe fn shader_source(&self, shader: u32, source: &str) {
        self.record("shader_source");
        if let Some(state) = self.shaders.borrow_mut().get_mut(&shader) {
            source.clone_into(&mut state.source);
        }
    }

    unsafe fn compile_shader(&self, shader: u32) {
        self.record("compile_shader");
        if let Some(state) = self.shaders.borrow_mut().get_mut(&shader) {
            state.compiled = !state.source.contains("#error");
        }
    }

    unsafe fn get_shader_compile_status(&self, shader: u32) -> bool {
        self.record("get_shader_compile_status");
        self.shaders
            .borrow()
            .get(&shader)
            .is_some_and(|s| s.compiled)
    }

    unsafe fn get_shader_info_log(&self, shader: u32) -> String {
        self.record("get_shader_info_log");
        match self.shaders.borrow().get(&shader) {
            Some(state) if !state.compiled => "0:1(1): error: #error directive".to_owned(),
            _ => String::new(),
        }
    }

    unsafe fn delete_shader(&self, shader: u32) {
        self.record("delete_shader");
        self.deleted.borrow_mut().push(("shader", shader));
        self.shaders.borrow_mut().remove(&shader);
    }

    unsafe fn create_program(&self) -> Result<u32, String> {
        self.record("create_program");
        let name = self.name();
        self.programs
            .borrow_mut()
            .insert(name, ProgramState::default());
        Ok(name)
    }

    unsafe fn attach_shader(&self, program: u32, shader: u32) {
        self.record("attach_shader");
        if let Some(state) = self.programs.borrow_mut().get_mut(&program) {
            state.attached.push(shader);
        }
    }

    unsafe fn detach_shader(&self, program: u32, shader: u32) {
        self.record("detach_shader");
        if let Some(state) = self.programs.borrow_mut().get_mut(&program) {
            state.attached.retain(|s| *s != shader);
        }
    }

    unsafe fn link_program(&self, program: u32) {
        self.record("link_program");
        let shaders = self.shaders.borrow();
        let mut programs = self.programs.borrow_mut();
        let Some(state) = programs.get_mut(&program) else {
            return;
        };

        let stages: Vec<&ShaderState> = state
            .attached
            .iter()
            .filter_map(|s| shaders.get(s))
            .collect();
        let has = |stage| stages.iter().any(|s| s.stage == stage && s.compiled);

        state.linked = has(glow::VERTEX_SHADER) && has(glow::FRAGMENT_SHADER);
        if state.linked {
            state.log.clear();
            state.uniforms.clear();
            for name in stages.iter().flat_map(|s| declared_uniforms(&s.source)) {
                if !state.uniforms.contains(&name) {
                    state.uniforms.push(name);
                }
            }
        } else {
            "error: program lacks a compiled vertex and fragment stage".clone_into(&mut state.log);
        }
    }

    unsafe fn get_program_link_status(&self, program: u32) -> bool {
        self.record("get_program_link_status");
        self.program_is_linked(program)
    }

    unsafe fn validate_program(&self, program: u32) {
        self.record("validate_program");
        if let Some(state) = self.programs.borrow_mut().get_mut(&program) {
            state.validated = state.linked && !self.invalid_programs.get();
            if !state.validated {
                "error: program cannot execute in the current state".clone_into(&mut state.log);
            }
        }
    }

    unsafe fn get_program_validate_status(&self, program: u32) -> bool {
        self.record("get_program_validate_status");
        self.programs
            .borrow()
            .get(&program)
            .is_some_and(|p| p.validated)
    }

    unsafe fn get_program_info_log(&self, program: u32) -> String {
        self.record("get_program_info_log");
        self.programs
            .borrow()
            .get(&program)
            .map(|p| p.log.clone())
            .unwrap_or_default()
    }

    unsafe fn use_program(&self, program: Option<u32>) {
        self.record("use_program");
        self.current_program.set(program);
    }

    unsafe fn delete_program(&self, program: u32) {
        self.record("delete_program");
        self.deleted.borrow_mut().push(("program", program));
        self.programs.borrow_mut().remove(&program);
    }

    unsafe fn get_uniform_location(&self, program: u32, name: &str) -> Option<u32> {
        self.record("get_uniform_location");
        let programs = self.programs.borrow();
        let state = programs.get(&program).filter(|p| p.linked)?;
        let index = state.uniforms.iter().position(|u| u == name)?;
        u32::try_from(index).ok()
    }

    unsafe fn uniform_1_i32(&self, location: Option<&u32>, x: i32) {
        self.record("uniform_1_i32");
        self.record_uniform(location, vec![x as f32]);
    }

    unsafe fn uniform_1_f32(&self, location: Option<&u32>, x: f32) {
        self.record("uniform_1_f32");
        self.record_uniform(location, vec![x]);
    }

    unsafe fn uniform_2_f32(&self, location: Option<&u32>, x: f32, y: f32) {
        self.record("uniform_2_f32");
        self.record_uniform(location, vec![x, y]);
    }

    unsafe fn uniform_3_f32(&self, location: Option<&u32>, x: f32, y: f32, z: f32) {
        self.record("uniform_3_f32");
        self.record_uniform(location, vec![x, y, z]);
    }

    unsafe fn uniform_4_f32(&self, location: Option<&u32>, x: f32, y: f32, z: f32, w: f32) {
        self.record("uniform_4_f32");
        self.record_uniform(location, vec![x, y, z, w]);
    }

    unsafe fn uniform_matrix_4_f32_slice(
        &self,
        location: Option<&u32>,
        _transpose: bool,
        v: &[f32],
    ) {
        self.record("uniform_matrix_4_f32_slice");
        if v.len() != 16 {
            self.raise(glow::INVALID_VALUE);
        }
        self.record_uniform(location, v.to_vec());
    }

    unsafe fn create_texture(&self) -> Result<u32, String> {
        self.record("create_texture");
        Ok(self.name())
    }

    unsafe fn active_texture(&self, unit: u32) {
        self.record("active_texture");
        if !(glow::TEXTURE0..glow::TEXTURE0 + MAX_TEXTURE_UNITS).contains(&unit) {
            self.raise(glow::INVALID_ENUM);
            return;
        }
        self.active_unit.set(unit - glow::TEXTURE0);
    }

    unsafe fn bind_texture(&self, _target: u32, texture: Option<u32>) {
        self.record("bind_texture");
        let unit = self.active_unit.get();
        let mut bound = self.bound_textures.borrow_mut();
        match texture {
            Some(name) => bound.insert(unit, name),
            None => bound.remove(&unit),
        };
    }

    unsafe fn tex_parameter_i32(&self, _target: u32, parameter: u32, value: i32) {
        self.record("tex_parameter_i32");
        self.tex_params.borrow_mut().push((parameter, value));
    }

    unsafe fn tex_image_2d(
        &self,
        _target: u32,
        _level: i32,
        internal_format: i32,
        width: i32,
        height: i32,
        _border: i32,
        format: u32,
        _ty: u32,
        pixels: Option<&[u8]>,
    ) {
        self.record("tex_image_2d");
        self.tex_uploads.borrow_mut().push(TexUpload {
            texture: self.bound_texture(self.active_unit.get()),
            internal_format,
            width,
            height,
            format,
            pixels: pixels.map(<[u8]>::to_vec).unwrap_or_default(),
        });
    }

    unsafe fn delete_texture(&self, texture: u32) {
        self.record("delete_texture");
        self.deleted.borrow_mut().push(("texture", texture));
    }

    unsafe fn clear_color(&self, _red: f32, _green: f32, _blue: f32, _alpha: f32) {
        self.record("clear_color");
    }

    unsafe fn clear(&self, _mask: u32) {
        self.record("clear");
    }

    unsafe fn viewport(&self, _x: i32, _y: i32, width: i32, height: i32) {
        self.record("viewport");
        if width < 0 || height < 0 {
            self.raise(glow::INVALID_VALUE);
        }
    }

    unsafe fn enable(&self, _parameter: u32) {
        self.record("enable");
    }

    unsafe fn disable(&self, _parameter: u32) {
        self.record("disable");
    }

    unsafe fn blend_func(&self, _src: u32, _dst: u32) {
        self.record("blend_func");
    }

    unsafe fn draw_elements(&self, mode: u32, count: i32, element_type: u32, _offset: i32) {
        self.record("draw_elements");
        let element_buffer = self.bound_buffer(glow::ELEMENT_ARRAY_BUFFER);
        self.draws.borrow_mut().push(Draw {
            mode,
            count,
            element_type,
            program: self.current_program.get(),
            vertex_array: self.bound_vertex_array.get(),
            element_buffer,
        });

        let empty = element_buffer
            .and_then(|b| self.buffer_sizes.borrow().get(&b).copied())
            .is_none_or(|size| size == 0);
        if self.bound_vertex_array.get().is_none() || empty {
            self.raise(glow::INVALID_OPERATION);
        }
    }
}
