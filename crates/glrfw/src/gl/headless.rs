//! In-memory [`GlApi`] used by the unit tests.
//!
//! Objects live in hash maps. Compilation fails for sources containing
//! `#error`, and linking collects `uniform` declarations from the attached
//! sources so location lookups behave like a real driver.

use std::cell::{Ref, RefCell};
use std::collections::HashMap;

use crate::shader::ShaderKind;

use super::{ActiveVariable, GlApi};

#[derive(Debug)]
pub(crate) struct FakeShader {
    pub kind: ShaderKind,
    pub source: String,
    pub compiled: bool,
}

#[derive(Debug, Default)]
pub(crate) struct FakeProgram {
    pub attached: Vec<u32>,
    pub attrib_bindings: Vec<(u32, String)>,
    pub frag_bindings: Vec<(u32, String)>,
    pub linked: bool,
    pub attributes: Vec<(u32, String)>,
    pub uniforms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum UniformWrite {
    Matrix4(Vec<f32>),
    Matrix3(Vec<f32>),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    Int(i32),
    Float(f32),
}

#[derive(Debug, Default)]
pub(crate) struct GlState {
    next_id: u32,
    pub shaders: HashMap<u32, FakeShader>,
    pub programs: HashMap<u32, FakeProgram>,
    pub deleted_shaders: Vec<u32>,
    pub deleted_programs: Vec<u32>,
    pub current_program: u32,
    /// `(program, location, value)` in call order.
    pub uniform_writes: Vec<(u32, u32, UniformWrite)>,
    pub location_queries: usize,
    errors: Vec<u32>,
    fail_allocation: bool,
    fail_link: bool,
}

impl GlState {
    fn allocate(&mut self) -> u32 {
        if self.fail_allocation {
            return 0;
        }
        self.next_id += 1;
        self.next_id
    }

    fn write(&mut self, location: u32, value: UniformWrite) {
        let program = self.current_program;
        self.uniform_writes.push((program, location, value));
    }
}

#[derive(Debug, Default)]
pub(crate) struct HeadlessGl {
    state: RefCell<GlState>,
}

impl HeadlessGl {
    pub fn state(&self) -> Ref<'_, GlState> {
        self.state.borrow()
    }

    pub fn fail_allocation(&self, fail: bool) {
        self.state.borrow_mut().fail_allocation = fail;
    }

    pub fn fail_link(&self, fail: bool) {
        self.state.borrow_mut().fail_link = fail;
    }

    pub fn raise_error(&self, code: u32) {
        self.state.borrow_mut().errors.push(code);
    }
}

/// Name declared by a `<qualifier> <type> <name>;` line, if it starts with `qualifier`.
fn declared_name(line: &str, qualifier: &str) -> Option<String> {
    let rest = line.trim().strip_prefix(qualifier)?;
    let name = rest.split_whitespace().last()?.trim_end_matches(';');
    (!name.is_empty()).then(|| name.to_owned())
}

impl GlApi for HeadlessGl {
    fn create_shader(&self, kind: ShaderKind) -> u32 {
        let mut state = self.state.borrow_mut();
        let id = state.allocate();
        if id != 0 {
            state.shaders.insert(
                id,
                FakeShader {
                    kind,
                    source: String::new(),
                    compiled: false,
                },
            );
        }
        id
    }

    fn delete_shader(&self, shader: u32) {
        let mut state = self.state.borrow_mut();
        state.shaders.remove(&shader);
        state.deleted_shaders.push(shader);
    }

    fn shader_source(&self, shader: u32, source: &str) {
        if let Some(s) = self.state.borrow_mut().shaders.get_mut(&shader) {
            s.source = source.to_owned();
        }
    }

    fn compile_shader(&self, shader: u32) -> bool {
        let mut state = self.state.borrow_mut();
        let Some(s) = state.shaders.get_mut(&shader) else { return false };
        s.compiled = !s.source.contains("#error");
        s.compiled
    }

    fn shader_info_log(&self, shader: u32) -> String {
        match self.state.borrow().shaders.get(&shader) {
            Some(s) if !s.compiled => "0:1(1): error: #error directive".to_owned(),
            _ => String::new(),
        }
    }

    fn create_program(&self) -> u32 {
        let mut state = self.state.borrow_mut();
        let id = state.allocate();
        if id != 0 {
            state.programs.insert(id, FakeProgram::default());
        }
        id
    }

    fn delete_program(&self, program: u32) {
        let mut state = self.state.borrow_mut();
        state.programs.remove(&program);
        state.deleted_programs.push(program);
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        if let Some(p) = self.state.borrow_mut().programs.get_mut(&program) {
            p.attached.push(shader);
        }
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        if let Some(p) = self.state.borrow_mut().programs.get_mut(&program) {
            p.attached.retain(|&s| s != shader);
        }
    }

    fn bind_attrib_location(&self, program: u32, index: u32, name: &str) {
        if let Some(p) = self.state.borrow_mut().programs.get_mut(&program) {
            p.attrib_bindings.push((index, name.to_owned()));
        }
    }

    fn bind_frag_data_location(&self, program: u32, index: u32, name: &str) {
        if let Some(p) = self.state.borrow_mut().programs.get_mut(&program) {
            p.frag_bindings.push((index, name.to_owned()));
        }
    }

    fn link_program(&self, program: u32) -> bool {
        let mut state = self.state.borrow_mut();
        let fail_link = state.fail_link;
        let GlState { shaders, programs, .. } = &mut *state;
        let Some(p) = programs.get_mut(&program) else { return false };
        if fail_link || p.attached.is_empty() {
            p.linked = false;
            return false;
        }

        let mut uniforms = Vec::new();
        let mut inputs = Vec::new();
        for s in p.attached.iter().filter_map(|id| shaders.get(id)) {
            for line in s.source.lines() {
                if let Some(name) = declared_name(line, "uniform ") {
                    if !uniforms.contains(&name) {
                        uniforms.push(name);
                    }
                }
                if s.kind == ShaderKind::Vertex {
                    inputs.extend(declared_name(line, "in "));
                }
            }
        }

        let mut next_free = 0;
        p.attributes = inputs
            .into_iter()
            .map(|name| {
                let bound = p.attrib_bindings.iter().find(|(_, n)| *n == name);
                let index = match bound {
                    Some((index, _)) => *index,
                    None => {
                        next_free += 1;
                        next_free - 1
                    }
                };
                (index, name)
            })
            .collect();
        p.uniforms = uniforms;
        p.linked = true;
        true
    }

    fn program_info_log(&self, program: u32) -> String {
        match self.state.borrow().programs.get(&program) {
            Some(p) if !p.linked => "error: linking failed".to_owned(),
            _ => String::new(),
        }
    }

    fn use_program(&self, program: u32) {
        self.state.borrow_mut().current_program = program;
    }

    fn uniform_location(&self, program: u32, name: &str) -> Option<u32> {
        let mut state = self.state.borrow_mut();
        state.location_queries += 1;
        let p = state.programs.get(&program)?;
        p.uniforms.iter().position(|u| u == name).map(|i| i as u32)
    }

    fn attrib_location(&self, program: u32, name: &str) -> Option<u32> {
        let state = self.state.borrow();
        let p = state.programs.get(&program)?;
        p.attributes.iter().find(|(_, n)| n == name).map(|(i, _)| *i)
    }

    fn active_attributes(&self, program: u32) -> Vec<ActiveVariable> {
        let state = self.state.borrow();
        let Some(p) = state.programs.get(&program) else { return Vec::new() };
        p.attributes
            .iter()
            .map(|(_, name)| ActiveVariable {
                name: name.clone(),
                size: 1,
                gl_type: glow::FLOAT_VEC3,
            })
            .collect()
    }

    fn active_uniforms(&self, program: u32) -> Vec<ActiveVariable> {
        let state = self.state.borrow();
        let Some(p) = state.programs.get(&program) else { return Vec::new() };
        p.uniforms
            .iter()
            .map(|name| ActiveVariable {
                name: name.clone(),
                size: 1,
                gl_type: glow::FLOAT_MAT4,
            })
            .collect()
    }

    fn uniform_matrix4(&self, location: u32, columns: &[f32; 16]) {
        let write = UniformWrite::Matrix4(columns.to_vec());
        self.state.borrow_mut().write(location, write);
    }

    fn uniform_matrix3(&self, location: u32, columns: &[f32; 9]) {
        let write = UniformWrite::Matrix3(columns.to_vec());
        self.state.borrow_mut().write(location, write);
    }

    fn uniform_vec3(&self, location: u32, value: [f32; 3]) {
        self.state.borrow_mut().write(location, UniformWrite::Vec3(value));
    }

    fn uniform_vec4(&self, location: u32, value: [f32; 4]) {
        self.state.borrow_mut().write(location, UniformWrite::Vec4(value));
    }

    fn uniform_int(&self, location: u32, value: i32) {
        self.state.borrow_mut().write(location, UniformWrite::Int(value));
    }

    fn uniform_float(&self, location: u32, value: f32) {
        self.state.borrow_mut().write(location, UniformWrite::Float(value));
    }

    fn parameter_i32(&self, parameter: u32) -> i32 {
        match parameter {
            glow::MAJOR_VERSION => 4,
            glow::MINOR_VERSION => 5,
            _ => 0,
        }
    }

    fn parameter_string(&self, parameter: u32) -> String {
        match parameter {
            glow::VERSION => "4.5 headless",
            glow::SHADING_LANGUAGE_VERSION => "4.50",
            glow::RENDERER => "headless",
            glow::VENDOR => "glrfw",
            _ => "",
        }
        .to_owned()
    }

    fn error(&self) -> u32 {
        let mut state = self.state.borrow_mut();
        if state.errors.is_empty() {
            glow::NO_ERROR
        } else {
            state.errors.remove(0)
        }
    }
}
