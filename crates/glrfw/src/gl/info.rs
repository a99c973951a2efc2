//! Context queries: version strings, error flags, debug messages.

use std::fmt;

use super::GlApi;

/// Identification strings of the current context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlInfo {
    pub version: (i32, i32),
    pub version_string: String,
    pub glsl_version: String,
    pub renderer: String,
    pub vendor: String,
}

impl GlInfo {
    pub fn query<G: GlApi + ?Sized>(gl: &G) -> Self {
        Self {
            version: gl_version(gl),
            version_string: gl.parameter_string(glow::VERSION),
            glsl_version: gl.parameter_string(glow::SHADING_LANGUAGE_VERSION),
            renderer: gl.parameter_string(glow::RENDERER),
            vendor: gl.parameter_string(glow::VENDOR),
        }
    }
}

impl fmt::Display for GlInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "OpenGL {}.{} ({})", self.version.0, self.version.1, self.version_string)?;
        writeln!(f, "GLSL     {}", self.glsl_version)?;
        writeln!(f, "Renderer {}", self.renderer)?;
        write!(f, "Vendor   {}", self.vendor)
    }
}

/// `(major, minor)` of the current context.
pub fn gl_version<G: GlApi + ?Sized>(gl: &G) -> (i32, i32) {
    (
        gl.parameter_i32(glow::MAJOR_VERSION),
        gl.parameter_i32(glow::MINOR_VERSION),
    )
}

/// Symbolic name of a `glGetError` code.
pub fn error_string(code: u32) -> &'static str {
    match code {
        glow::NO_ERROR => "GL_NO_ERROR",
        glow::INVALID_ENUM => "GL_INVALID_ENUM",
        glow::INVALID_VALUE => "GL_INVALID_VALUE",
        glow::INVALID_OPERATION => "GL_INVALID_OPERATION",
        glow::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        glow::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        glow::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        glow::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        _ => "GL_UNKNOWN_ERROR",
    }
}

/// Pops one pending error flag and names it; `None` when no error is pending.
pub fn check_error<G: GlApi + ?Sized>(gl: &G) -> Option<&'static str> {
    match gl.error() {
        glow::NO_ERROR => None,
        code => Some(error_string(code)),
    }
}

fn debug_source(source: u32) -> &'static str {
    match source {
        glow::DEBUG_SOURCE_API => "api",
        glow::DEBUG_SOURCE_WINDOW_SYSTEM => "window-system",
        glow::DEBUG_SOURCE_SHADER_COMPILER => "shader-compiler",
        glow::DEBUG_SOURCE_THIRD_PARTY => "third-party",
        glow::DEBUG_SOURCE_APPLICATION => "application",
        _ => "other",
    }
}

fn debug_type(kind: u32) -> &'static str {
    match kind {
        glow::DEBUG_TYPE_ERROR => "error",
        glow::DEBUG_TYPE_DEPRECATED_BEHAVIOR => "deprecated",
        glow::DEBUG_TYPE_UNDEFINED_BEHAVIOR => "undefined",
        glow::DEBUG_TYPE_PORTABILITY => "portability",
        glow::DEBUG_TYPE_PERFORMANCE => "performance",
        glow::DEBUG_TYPE_MARKER => "marker",
        _ => "other",
    }
}

fn debug_level(severity: u32) -> log::Level {
    match severity {
        glow::DEBUG_SEVERITY_HIGH => log::Level::Error,
        glow::DEBUG_SEVERITY_MEDIUM => log::Level::Warn,
        glow::DEBUG_SEVERITY_LOW => log::Level::Info,
        _ => log::Level::Debug,
    }
}

pub(crate) fn log_debug_message(source: u32, kind: u32, id: u32, severity: u32, message: &str) {
    log::log!(
        target: "glrfw::gl",
        debug_level(severity),
        "[{}][{}] {id}: {message}",
        debug_source(source),
        debug_type(kind)
    );
}
