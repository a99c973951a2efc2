//! glrfw: OpenGL shader/program wrappers and an indexed STL mesh builder.
//!
//! This crate owns the pieces a render loop hands off to:
//! - [`shader`]: shader units and programs with explicit lifecycle checks
//! - [`mesh`]: vertex deduplication, adjacency and normal averaging, plus
//!   the binary STL reader that feeds it
//! - [`gl`]: the OpenGL seam, owned native handles and context queries
//!
//! Window creation, buffers and draw calls stay with the caller; every GL
//! call here assumes a current context.

pub mod error;
pub mod gl;
pub mod logging;
pub mod mesh;
pub mod shader;

pub use error::{Error, ErrorKind, Result};
pub use gl::{GlApi, GlContext};
pub use mesh::{parse_stl, Mesh, MeshBuilder, StlOptions};
pub use shader::{Program, Shader, ShaderKind, UniformValue};
