use std::num::NonZeroU32;

use glow::HasContext;

use crate::shader::ShaderKind;

use super::{ActiveVariable, GlApi};

/// [`GlApi`] backed by a loaded `glow` context.
///
/// Context creation and making it current belong to the windowing layer;
/// this type only issues calls against a context that is already current.
pub struct GlContext {
    gl: glow::Context,
}

impl GlContext {
    pub fn new(gl: glow::Context) -> Self {
        Self { gl }
    }

    /// Loads GL entry points through a platform loader (e.g. `glutin`'s
    /// `get_proc_address`).
    ///
    /// # Safety
    /// The loader must return valid function pointers for the context that
    /// is current on this thread.
    pub unsafe fn from_loader_function<F>(loader: F) -> Self
    where
        F: FnMut(&str) -> *const std::os::raw::c_void,
    {
        Self {
            gl: unsafe { glow::Context::from_loader_function(loader) },
        }
    }

    /// Raw `glow` access for the render loop (buffers, draw calls).
    pub fn raw(&self) -> &glow::Context {
        &self.gl
    }

    /// Enables synchronous debug output and forwards driver messages to `log`.
    pub fn enable_debug_output(&mut self) {
        unsafe {
            self.gl.enable(glow::DEBUG_OUTPUT);
            self.gl.enable(glow::DEBUG_OUTPUT_SYNCHRONOUS);
            self.gl.debug_message_callback(|source, kind, id, severity, message| {
                super::info::log_debug_message(source, kind, id, severity, message);
            });
        }
        log::debug!("GL debug output enabled");
    }
}

fn shader(id: u32) -> Option<glow::NativeShader> {
    NonZeroU32::new(id).map(glow::NativeShader)
}

fn program(id: u32) -> Option<glow::NativeProgram> {
    NonZeroU32::new(id).map(glow::NativeProgram)
}

fn location(id: u32) -> glow::NativeUniformLocation {
    glow::NativeUniformLocation(id)
}

fn stage_enum(kind: ShaderKind) -> u32 {
    match kind {
        ShaderKind::Vertex => glow::VERTEX_SHADER,
        ShaderKind::Fragment => glow::FRAGMENT_SHADER,
        ShaderKind::Geometry => glow::GEOMETRY_SHADER,
    }
}

// All `unsafe` blocks below rely on the context being current; ids of 0 are
// filtered out before reaching the driver.
impl GlApi for GlContext {
    fn create_shader(&self, kind: ShaderKind) -> u32 {
        match unsafe { self.gl.create_shader(stage_enum(kind)) } {
            Ok(s) => s.0.get(),
            Err(e) => {
                log::debug!("glCreateShader({kind}) failed: {e}");
                0
            }
        }
    }

    fn delete_shader(&self, id: u32) {
        if let Some(s) = shader(id) {
            unsafe { self.gl.delete_shader(s) };
        }
    }

    fn shader_source(&self, id: u32, source: &str) {
        if let Some(s) = shader(id) {
            unsafe { self.gl.shader_source(s, source) };
        }
    }

    fn compile_shader(&self, id: u32) -> bool {
        let Some(s) = shader(id) else { return false };
        unsafe {
            self.gl.compile_shader(s);
            self.gl.get_shader_compile_status(s)
        }
    }

    fn shader_info_log(&self, id: u32) -> String {
        shader(id)
            .map(|s| unsafe { self.gl.get_shader_info_log(s) })
            .unwrap_or_default()
    }

    fn create_program(&self) -> u32 {
        match unsafe { self.gl.create_program() } {
            Ok(p) => p.0.get(),
            Err(e) => {
                log::debug!("glCreateProgram failed: {e}");
                0
            }
        }
    }

    fn delete_program(&self, id: u32) {
        if let Some(p) = program(id) {
            unsafe { self.gl.delete_program(p) };
        }
    }

    fn attach_shader(&self, program_id: u32, shader_id: u32) {
        if let (Some(p), Some(s)) = (program(program_id), shader(shader_id)) {
            unsafe { self.gl.attach_shader(p, s) };
        }
    }

    fn detach_shader(&self, program_id: u32, shader_id: u32) {
        if let (Some(p), Some(s)) = (program(program_id), shader(shader_id)) {
            unsafe { self.gl.detach_shader(p, s) };
        }
    }

    fn bind_attrib_location(&self, id: u32, index: u32, name: &str) {
        if let Some(p) = program(id) {
            unsafe { self.gl.bind_attrib_location(p, index, name) };
        }
    }

    fn bind_frag_data_location(&self, id: u32, index: u32, name: &str) {
        if let Some(p) = program(id) {
            unsafe { self.gl.bind_frag_data_location(p, index, name) };
        }
    }

    fn link_program(&self, id: u32) -> bool {
        let Some(p) = program(id) else { return false };
        unsafe {
            self.gl.link_program(p);
            self.gl.get_program_link_status(p)
        }
    }

    fn program_info_log(&self, id: u32) -> String {
        program(id)
            .map(|p| unsafe { self.gl.get_program_info_log(p) })
            .unwrap_or_default()
    }

    fn use_program(&self, id: u32) {
        unsafe { self.gl.use_program(program(id)) };
    }

    fn uniform_location(&self, id: u32, name: &str) -> Option<u32> {
        let p = program(id)?;
        unsafe { self.gl.get_uniform_location(p, name) }.map(|loc| loc.0)
    }

    fn attrib_location(&self, id: u32, name: &str) -> Option<u32> {
        let p = program(id)?;
        unsafe { self.gl.get_attrib_location(p, name) }
    }

    fn active_attributes(&self, id: u32) -> Vec<ActiveVariable> {
        let Some(p) = program(id) else { return Vec::new() };
        unsafe {
            (0..self.gl.get_active_attributes(p))
                .filter_map(|i| self.gl.get_active_attribute(p, i))
                .map(|a| ActiveVariable {
                    name: a.name,
                    size: a.size,
                    gl_type: a.atype,
                })
                .collect()
        }
    }

    fn active_uniforms(&self, id: u32) -> Vec<ActiveVariable> {
        let Some(p) = program(id) else { return Vec::new() };
        unsafe {
            (0..self.gl.get_active_uniforms(p))
                .filter_map(|i| self.gl.get_active_uniform(p, i))
                .map(|u| ActiveVariable {
                    name: u.name,
                    size: u.size,
                    gl_type: u.utype,
                })
                .collect()
        }
    }

    fn uniform_matrix4(&self, loc: u32, columns: &[f32; 16]) {
        unsafe {
            self.gl
                .uniform_matrix_4_f32_slice(Some(&location(loc)), false, columns)
        };
    }

    fn uniform_matrix3(&self, loc: u32, columns: &[f32; 9]) {
        unsafe {
            self.gl
                .uniform_matrix_3_f32_slice(Some(&location(loc)), false, columns)
        };
    }

    fn uniform_vec3(&self, loc: u32, [x, y, z]: [f32; 3]) {
        unsafe { self.gl.uniform_3_f32(Some(&location(loc)), x, y, z) };
    }

    fn uniform_vec4(&self, loc: u32, [x, y, z, w]: [f32; 4]) {
        unsafe { self.gl.uniform_4_f32(Some(&location(loc)), x, y, z, w) };
    }

    fn uniform_int(&self, loc: u32, value: i32) {
        unsafe { self.gl.uniform_1_i32(Some(&location(loc)), value) };
    }

    fn uniform_float(&self, loc: u32, value: f32) {
        unsafe { self.gl.uniform_1_f32(Some(&location(loc)), value) };
    }

    fn parameter_i32(&self, parameter: u32) -> i32 {
        unsafe { self.gl.get_parameter_i32(parameter) }
    }

    fn parameter_string(&self, parameter: u32) -> String {
        unsafe { self.gl.get_parameter_string(parameter) }
    }

    fn error(&self) -> u32 {
        unsafe { self.gl.get_error() }
    }
}
