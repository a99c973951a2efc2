use glam::{Mat3, Mat4, Vec3, Vec4};

use crate::gl::GlApi;

/// A value that can be written to a uniform.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum UniformValue {
    Mat4(Mat4),
    Mat3(Mat3),
    Vec3(Vec3),
    Vec4(Vec4),
    Int(i32),
    Float(f32),
    /// Written as the integer 0 or 1.
    Bool(bool),
}

impl UniformValue {
    /// Issues the type-appropriate write for `location` on the bound program.
    pub(crate) fn write<G: GlApi + ?Sized>(&self, gl: &G, location: u32) {
        match *self {
            UniformValue::Mat4(m) => gl.uniform_matrix4(location, &m.to_cols_array()),
            UniformValue::Mat3(m) => gl.uniform_matrix3(location, &m.to_cols_array()),
            UniformValue::Vec3(v) => gl.uniform_vec3(location, v.to_array()),
            UniformValue::Vec4(v) => gl.uniform_vec4(location, v.to_array()),
            UniformValue::Int(i) => gl.uniform_int(location, i),
            UniformValue::Float(x) => gl.uniform_float(location, x),
            UniformValue::Bool(b) => gl.uniform_int(location, i32::from(b)),
        }
    }
}

impl From<Mat4> for UniformValue {
    fn from(m: Mat4) -> Self {
        UniformValue::Mat4(m)
    }
}

impl From<Mat3> for UniformValue {
    fn from(m: Mat3) -> Self {
        UniformValue::Mat3(m)
    }
}

impl From<Vec3> for UniformValue {
    fn from(v: Vec3) -> Self {
        UniformValue::Vec3(v)
    }
}

impl From<Vec4> for UniformValue {
    fn from(v: Vec4) -> Self {
        UniformValue::Vec4(v)
    }
}

impl From<i32> for UniformValue {
    fn from(i: i32) -> Self {
        UniformValue::Int(i)
    }
}

impl From<f32> for UniformValue {
    fn from(x: f32) -> Self {
        UniformValue::Float(x)
    }
}

impl From<bool> for UniformValue {
    fn from(b: bool) -> Self {
        UniformValue::Bool(b)
    }
}
