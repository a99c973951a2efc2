use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{ensure, error, ErrorKind, Result};
use crate::gl::{GlApi, GlContext, Handle, ShaderDeleter};

use super::ShaderKind;

/// Position of a [`Shader`] in its lifecycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderState {
    /// No native object yet.
    Uninitialized,
    /// Native object allocated, no source.
    Created,
    /// Source attached, not compiled.
    SourceSet,
    /// Compiled; immutable from here on.
    Compiled,
}

/// One compilable pipeline stage.
///
/// Owns its native shader object and deletes it on drop. Once compiled, the
/// source and kind are frozen and the shader can be moved into a
/// [`Program`](super::Program).
pub struct Shader<'gl, G: GlApi + ?Sized = GlContext> {
    gl: &'gl G,
    kind: ShaderKind,
    source: String,
    path: Option<PathBuf>,
    compiled: bool,
    handle: Handle<ShaderDeleter<'gl, G>>,
}

impl<'gl, G: GlApi + ?Sized> Shader<'gl, G> {
    /// A shader without a native object; call [`create`](Self::create) next.
    pub fn empty(gl: &'gl G, kind: ShaderKind) -> Self {
        Self {
            gl,
            kind,
            source: String::new(),
            path: None,
            compiled: false,
            handle: Handle::null(ShaderDeleter(gl)),
        }
    }

    /// Allocates the native object immediately.
    pub fn new(gl: &'gl G, kind: ShaderKind) -> Result<Self> {
        let mut shader = Self::empty(gl, kind);
        shader.create()?;
        Ok(shader)
    }

    /// Allocates, attaches `source` and compiles.
    pub fn from_source(gl: &'gl G, kind: ShaderKind, source: impl Into<String>) -> Result<Self> {
        let mut shader = Self::new(gl, kind)?;
        shader.set_source(source)?;
        shader.compile()?;
        Ok(shader)
    }

    /// Allocates, reads `path` and compiles.
    pub fn from_file(gl: &'gl G, kind: ShaderKind, path: impl AsRef<Path>) -> Result<Self> {
        let mut shader = Self::new(gl, kind)?;
        shader.load_source(path)?;
        shader.compile()?;
        Ok(shader)
    }

    /// Allocates the native object for the current kind.
    pub fn create(&mut self) -> Result<()> {
        ensure!(
            self.handle.is_null(),
            ErrorKind::AlreadyCreated,
            "{} shader {} already exists",
            self.kind,
            self.handle.get()
        );
        let id = self.gl.create_shader(self.kind);
        ensure!(id != 0, ErrorKind::CreationFailed, "could not create {} shader", self.kind);
        self.handle.reset(id);
        log::debug!("created {} shader {id}", self.kind);
        Ok(())
    }

    pub fn set_source(&mut self, source: impl Into<String>) -> Result<()> {
        ensure!(
            !self.compiled,
            ErrorKind::AlreadyCompiled,
            "{} shader {} is compiled; its source is frozen",
            self.kind,
            self.handle.get()
        );
        ensure!(
            !self.handle.is_null(),
            ErrorKind::NotCreated,
            "{} shader has no native object",
            self.kind
        );
        self.source = source.into();
        Ok(())
    }

    /// Reads `path` and makes its contents the source.
    pub fn load_source(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            error!(ErrorKind::FileNotFound, "cannot read shader source {}", path.display()).with_io(e)
        })?;
        self.set_source(source)?;
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    /// Changes the stage. A created shader gets a fresh native object of the new kind.
    pub fn set_kind(&mut self, kind: ShaderKind) -> Result<()> {
        ensure!(
            !self.compiled,
            ErrorKind::AlreadyCompiled,
            "{} shader {} is compiled; its kind is frozen",
            self.kind,
            self.handle.get()
        );
        if kind == self.kind {
            return Ok(());
        }
        if !self.handle.is_null() {
            let id = self.gl.create_shader(kind);
            ensure!(id != 0, ErrorKind::CreationFailed, "could not create {kind} shader");
            self.handle.reset(id);
            log::debug!("recreated shader as {kind} shader {id}");
        }
        self.kind = kind;
        Ok(())
    }

    /// Compiles the attached source. A failed compile leaves the shader as it was.
    pub fn compile(&mut self) -> Result<()> {
        ensure!(
            !self.compiled,
            ErrorKind::AlreadyCompiled,
            "{} shader {} is already compiled",
            self.kind,
            self.handle.get()
        );
        ensure!(
            !self.handle.is_null(),
            ErrorKind::NotCreated,
            "{} shader has no native object",
            self.kind
        );
        ensure!(
            !self.source.is_empty(),
            ErrorKind::NoSource,
            "{} shader {} has no source",
            self.kind,
            self.handle.get()
        );

        let id = self.handle.get();
        self.gl.shader_source(id, &self.source);
        if !self.gl.compile_shader(id) {
            let diagnostic = self.gl.shader_info_log(id);
            log::error!("{} failed to compile:\n{diagnostic}", self.describe());
            return Err(
                error!(ErrorKind::CompileFailed, "{} failed to compile", self.describe())
                    .with_diagnostic(diagnostic),
            );
        }

        self.compiled = true;
        log::debug!("compiled {}", self.describe());
        Ok(())
    }

    pub fn kind(&self) -> ShaderKind {
        self.kind
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// File the source was read from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Native id; 0 before [`create`](Self::create).
    pub fn id(&self) -> u32 {
        self.handle.get()
    }

    pub fn is_created(&self) -> bool {
        !self.handle.is_null()
    }

    pub fn is_compiled(&self) -> bool {
        self.compiled
    }

    pub fn state(&self) -> ShaderState {
        if self.compiled {
            ShaderState::Compiled
        } else if self.handle.is_null() {
            ShaderState::Uninitialized
        } else if self.source.is_empty() {
            ShaderState::Created
        } else {
            ShaderState::SourceSet
        }
    }

    fn describe(&self) -> String {
        match &self.path {
            Some(path) => format!("{} shader {} ({})", self.kind, self.handle.get(), path.display()),
            None => format!("{} shader {}", self.kind, self.handle.get()),
        }
    }
}

impl<G: GlApi + ?Sized> fmt::Debug for Shader<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shader")
            .field("kind", &self.kind)
            .field("id", &self.handle.get())
            .field("state", &self.state())
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
