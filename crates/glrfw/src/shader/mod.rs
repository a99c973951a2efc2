//! Shader units and programs.
//!
//! A [`Shader`] walks `Uninitialized → Created → SourceSet → Compiled` and
//! never goes back. A [`Program`] takes ownership of compiled shaders, one per
//! stage, and is linked exactly once; after linking only uniform access and
//! binding remain.

mod program;
mod uniform;
mod unit;

use std::fmt;

pub use program::Program;
pub use uniform::UniformValue;
pub use unit::{Shader, ShaderState};

/// Pipeline stage a shader compiles for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum ShaderKind {
    Vertex,
    Fragment,
    Geometry,
}

impl ShaderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ShaderKind::Vertex => "vertex",
            ShaderKind::Fragment => "fragment",
            ShaderKind::Geometry => "geometry",
        }
    }
}

impl fmt::Display for ShaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
