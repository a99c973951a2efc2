use std::collections::{BTreeMap, HashMap};
use std::fmt::{self, Write as _};

use crate::error::{ensure, error, ErrorKind, Result};
use crate::gl::{ActiveVariable, GlApi, GlContext, Handle, ProgramDeleter};

use super::{Shader, ShaderKind, UniformValue};

/// A linkable pipeline object owning up to one compiled shader per stage.
///
/// Stage attachment and attribute / fragment-output bindings are only
/// accepted before [`link`](Self::link). Linking happens once; afterwards
/// the program can be bound and its uniforms written.
pub struct Program<'gl, G: GlApi + ?Sized = GlContext> {
    gl: &'gl G,
    handle: Handle<ProgramDeleter<'gl, G>>,
    shaders: BTreeMap<ShaderKind, Shader<'gl, G>>,
    uniform_locations: HashMap<String, u32>,
    linked: bool,
}

impl<'gl, G: GlApi + ?Sized> Program<'gl, G> {
    /// Allocates an empty program object.
    pub fn new(gl: &'gl G) -> Result<Self> {
        let handle = Handle::acquire(gl.create_program(), ProgramDeleter(gl))?;
        log::debug!("created program {}", handle.get());
        Ok(Self {
            gl,
            handle,
            shaders: BTreeMap::new(),
            uniform_locations: HashMap::new(),
            linked: false,
        })
    }

    /// Allocates a program and attaches each shader to its stage slot.
    pub fn with_shaders<I>(gl: &'gl G, shaders: I) -> Result<Self>
    where
        I: IntoIterator<Item = Shader<'gl, G>>,
    {
        let mut program = Self::new(gl)?;
        for shader in shaders {
            program.attach(shader)?;
        }
        Ok(program)
    }

    /// Attaches a compiled shader to the slot of its kind.
    ///
    /// A shader already occupying that slot is detached and released.
    pub fn attach(&mut self, shader: Shader<'gl, G>) -> Result<()> {
        ensure!(
            !self.linked,
            ErrorKind::AlreadyLinked,
            "program {} is linked; stages are fixed",
            self.id()
        );
        ensure!(
            shader.is_compiled(),
            ErrorKind::NotCompiled,
            "{} shader {} must be compiled before attaching",
            shader.kind(),
            shader.id()
        );

        let id = self.id();
        let kind = shader.kind();
        self.gl.attach_shader(id, shader.id());
        if let Some(previous) = self.shaders.insert(kind, shader) {
            self.gl.detach_shader(id, previous.id());
            log::debug!("program {id}: replaced {kind} shader {}", previous.id());
        }
        Ok(())
    }

    /// Binds vertex attribute `name` to `index`; effective at link time.
    pub fn set_attribute_location(&mut self, index: u32, name: &str) -> Result<()> {
        ensure!(
            !self.linked,
            ErrorKind::AlreadyLinked,
            "attribute `{name}` must be bound before program {} links",
            self.id()
        );
        self.gl.bind_attrib_location(self.id(), index, name);
        Ok(())
    }

    /// Binds fragment output `name` to color number `index`; effective at link time.
    pub fn set_frag_output_location(&mut self, index: u32, name: &str) -> Result<()> {
        ensure!(
            !self.linked,
            ErrorKind::AlreadyLinked,
            "fragment output `{name}` must be bound before program {} links",
            self.id()
        );
        self.gl.bind_frag_data_location(self.id(), index, name);
        Ok(())
    }

    pub fn link(&mut self) -> Result<()> {
        let id = self.id();
        ensure!(!self.linked, ErrorKind::AlreadyLinked, "program {id} is already linked");
        ensure!(
            !self.shaders.is_empty(),
            ErrorKind::LinkFailed,
            "program {id} has no attached shaders"
        );

        if !self.gl.link_program(id) {
            let diagnostic = self.gl.program_info_log(id);
            log::error!("program {id} failed to link:\n{diagnostic}");
            return Err(
                error!(ErrorKind::LinkFailed, "program {id} failed to link").with_diagnostic(diagnostic),
            );
        }

        self.linked = true;
        log::debug!(
            "linked program {id} ({})",
            self.shaders.keys().map(|k| k.as_str()).collect::<Vec<_>>().join(", ")
        );
        Ok(())
    }

    /// Makes this program the active pipeline object.
    pub fn bind(&self) -> Result<()> {
        ensure!(self.linked, ErrorKind::NotLinked, "program {} is not linked", self.id());
        self.gl.use_program(self.id());
        Ok(())
    }

    pub fn unbind(&self) -> Result<()> {
        ensure!(self.linked, ErrorKind::NotLinked, "program {} is not linked", self.id());
        self.gl.use_program(0);
        Ok(())
    }

    /// Location of uniform `name`, resolved once and cached.
    pub fn uniform_location(&mut self, name: &str) -> Result<u32> {
        let id = self.id();
        ensure!(self.linked, ErrorKind::NotLinked, "program {id} is not linked");
        if let Some(&location) = self.uniform_locations.get(name) {
            return Ok(location);
        }

        let location = self.gl.uniform_location(id, name).ok_or_else(|| {
            error!(ErrorKind::UniformNotFound, "program {id} has no active uniform `{name}`")
        })?;
        log::trace!("program {id}: uniform `{name}` at location {location}");
        self.uniform_locations.insert(name.to_owned(), location);
        Ok(location)
    }

    /// Writes `value` to uniform `name` of the currently bound program.
    pub fn set_uniform(&mut self, name: &str, value: impl Into<UniformValue>) -> Result<()> {
        let location = self.uniform_location(name)?;
        let value: UniformValue = value.into();
        value.write(self.gl, location);
        Ok(())
    }

    /// Table of active vertex attributes and their locations.
    pub fn attributes(&self) -> Result<String> {
        let id = self.id();
        ensure!(self.linked, ErrorKind::NotLinked, "program {id} is not linked");
        let rows = self
            .gl
            .active_attributes(id)
            .into_iter()
            .map(|a| (self.gl.attrib_location(id, &a.name), a));
        Ok(format_table("Attributes", rows))
    }

    /// Table of active uniforms and their locations.
    pub fn uniforms(&self) -> Result<String> {
        let id = self.id();
        ensure!(self.linked, ErrorKind::NotLinked, "program {id} is not linked");
        let rows = self
            .gl
            .active_uniforms(id)
            .into_iter()
            .map(|u| (self.gl.uniform_location(id, &u.name), u));
        Ok(format_table("Uniforms", rows))
    }

    pub fn is_linked(&self) -> bool {
        self.linked
    }

    pub fn id(&self) -> u32 {
        self.handle.get()
    }

    /// Shader attached to the `kind` slot.
    pub fn shader(&self, kind: ShaderKind) -> Option<&Shader<'gl, G>> {
        self.shaders.get(&kind)
    }
}

fn format_table(title: &str, rows: impl Iterator<Item = (Option<u32>, ActiveVariable)>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title}:");
    let _ = writeln!(out, " Location | Name");
    let _ = writeln!(out, "----------+---------------------");
    for (location, var) in rows {
        let location = location.map_or_else(|| "-".to_owned(), |l| l.to_string());
        match var.size {
            1 => {
                let _ = writeln!(out, " {location:>8} | {}", var.name);
            }
            n => {
                let _ = writeln!(out, " {location:>8} | {} [{n}]", var.name);
            }
        }
    }
    out
}

impl<G: GlApi + ?Sized> fmt::Debug for Program<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Program")
            .field("id", &self.handle.get())
            .field("linked", &self.linked)
            .field("shaders", &self.shaders)
            .finish_non_exhaustive()
    }
}
