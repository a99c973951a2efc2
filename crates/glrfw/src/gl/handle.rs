use std::fmt;

use crate::error::{ensure, ErrorKind, Result};

use super::GlApi;

/// Frees one native object id.
pub trait Release {
    fn release(&mut self, id: u32);
}

/// Sole owner of a native object id.
///
/// The id is released exactly once: on drop, on [`reset`](Self::reset), or
/// through [`release`](Self::release). The null id (0) is never released.
/// Assigning over a handle drops the old value, which releases its id first.
pub struct Handle<R: Release> {
    id: u32,
    releaser: R,
}

impl<R: Release> Handle<R> {
    /// A handle that owns nothing yet.
    pub fn null(releaser: R) -> Self {
        Self { id: 0, releaser }
    }

    /// Takes ownership of `id` as returned by a driver allocation.
    pub fn acquire(id: u32, releaser: R) -> Result<Self> {
        ensure!(id != 0, ErrorKind::CreationFailed, "allocator returned the null id");
        Ok(Self { id, releaser })
    }

    pub fn get(&self) -> u32 {
        self.id
    }

    pub fn is_null(&self) -> bool {
        self.id == 0
    }

    /// Releases the current id (if any) and takes ownership of `id`.
    pub fn reset(&mut self, id: u32) {
        if self.id != 0 && self.id != id {
            self.releaser.release(self.id);
        }
        self.id = id;
    }

    pub fn release(&mut self) {
        self.reset(0);
    }

    /// Gives up ownership without releasing.
    pub fn into_raw(mut self) -> u32 {
        std::mem::take(&mut self.id)
    }
}

impl<R: Release> Drop for Handle<R> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<R: Release> fmt::Debug for Handle<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handle").field(&self.id).finish()
    }
}

/// Releases shader objects through `G`.
pub struct ShaderDeleter<'gl, G: GlApi + ?Sized>(pub &'gl G);

impl<G: GlApi + ?Sized> Release for ShaderDeleter<'_, G> {
    fn release(&mut self, id: u32) {
        log::debug!("deleting shader {id}");
        self.0.delete_shader(id);
    }
}

/// Releases program objects through `G`.
pub struct ProgramDeleter<'gl, G: GlApi + ?Sized>(pub &'gl G);

impl<G: GlApi + ?Sized> Release for ProgramDeleter<'_, G> {
    fn release(&mut self, id: u32) {
        log::debug!("deleting program {id}");
        self.0.delete_program(id);
    }
}
