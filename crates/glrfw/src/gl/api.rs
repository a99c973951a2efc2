use crate::shader::ShaderKind;

/// An active attribute or uniform reported by a linked program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveVariable {
    pub name: String,
    /// Array length; 1 for scalars.
    pub size: i32,
    /// GL type enum (e.g. `FLOAT_VEC3`).
    pub gl_type: u32,
}

/// The slice of the OpenGL API the shader and program wrappers drive.
///
/// Objects are named by raw ids, with 0 meaning "no object", the same
/// convention the C API uses. Every method assumes the owning context is
/// current on the calling thread.
pub trait GlApi {
    /// Returns 0 when the driver could not allocate a shader object.
    fn create_shader(&self, kind: ShaderKind) -> u32;
    fn delete_shader(&self, shader: u32);
    fn shader_source(&self, shader: u32, source: &str);
    /// Compiles and returns the compile status.
    fn compile_shader(&self, shader: u32) -> bool;
    fn shader_info_log(&self, shader: u32) -> String;

    /// Returns 0 when the driver could not allocate a program object.
    fn create_program(&self) -> u32;
    fn delete_program(&self, program: u32);
    fn attach_shader(&self, program: u32, shader: u32);
    fn detach_shader(&self, program: u32, shader: u32);
    fn bind_attrib_location(&self, program: u32, index: u32, name: &str);
    fn bind_frag_data_location(&self, program: u32, index: u32, name: &str);
    /// Links and returns the link status.
    fn link_program(&self, program: u32) -> bool;
    fn program_info_log(&self, program: u32) -> String;
    /// Makes `program` current; 0 unbinds.
    fn use_program(&self, program: u32);

    fn uniform_location(&self, program: u32, name: &str) -> Option<u32>;
    fn attrib_location(&self, program: u32, name: &str) -> Option<u32>;
    fn active_attributes(&self, program: u32) -> Vec<ActiveVariable>;
    fn active_uniforms(&self, program: u32) -> Vec<ActiveVariable>;

    // Uniform writes target the currently bound program.
    fn uniform_matrix4(&self, location: u32, columns: &[f32; 16]);
    fn uniform_matrix3(&self, location: u32, columns: &[f32; 9]);
    fn uniform_vec3(&self, location: u32, value: [f32; 3]);
    fn uniform_vec4(&self, location: u32, value: [f32; 4]);
    fn uniform_int(&self, location: u32, value: i32);
    fn uniform_float(&self, location: u32, value: f32);

    fn parameter_i32(&self, parameter: u32) -> i32;
    fn parameter_string(&self, parameter: u32) -> String;
    /// Pops the oldest pending error flag (`NO_ERROR` when clear).
    fn error(&self) -> u32;
}
