//! OpenGL access layer.
//!
//! This module is responsible for:
//! - the [`GlApi`] seam the shader and program wrappers call through
//! - owning native object ids ([`Handle`]) and releasing them exactly once
//! - the `glow`-backed [`GlContext`] and context queries ([`info`])

mod api;
mod context;
mod handle;
pub mod info;

#[cfg(test)]
pub(crate) mod headless;

pub use api::{ActiveVariable, GlApi};
pub use context::GlContext;
pub use handle::{Handle, ProgramDeleter, Release, ShaderDeleter};
pub use info::GlInfo;
