//! Binary STL decoding.
//!
//! Layout: an 80-byte header, a little-endian `u32` triangle count, then one
//! 50-byte record per triangle: a stored normal (ignored, recomputed from
//! winding), three `3 × f32` vertices and a 2-byte attribute word (ignored).

use std::path::Path;

use glam::Vec3;

use crate::error::{ensure, error, ErrorKind, Result};

use super::{Mesh, MeshBuilder};

pub const STL_HEADER_LEN: usize = 80;
pub const STL_RECORD_LEN: usize = 50;

const COUNT_LEN: usize = 4;
const PREAMBLE_LEN: usize = STL_HEADER_LEN + COUNT_LEN;
const VERTEX_OFFSETS: [usize; 3] = [12, 24, 36];

/// Decoder options.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct StlOptions {
    /// Recenter the mesh on the mean vertex position.
    pub centralize: bool,
}

/// Reads and decodes the binary STL file at `path`.
pub fn parse_stl(path: impl AsRef<Path>) -> Result<Mesh> {
    parse_stl_with(path, StlOptions::default())
}

pub fn parse_stl_with(path: impl AsRef<Path>, options: StlOptions) -> Result<Mesh> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| {
        error!(ErrorKind::FileNotFound, "cannot read mesh file {}", path.display()).with_io(e)
    })?;
    log::debug!("read {} bytes from {}", bytes.len(), path.display());
    decode_stl(&bytes, options)
}

/// Decodes an in-memory binary STL image.
///
/// The declared triangle count must be backed by complete records;
/// anything shorter fails with `TruncatedFile`. Bytes past the last record
/// are ignored.
pub fn decode_stl(bytes: &[u8], options: StlOptions) -> Result<Mesh> {
    ensure!(
        bytes.len() >= PREAMBLE_LEN,
        ErrorKind::TruncatedFile,
        "{} bytes cannot hold the {PREAMBLE_LEN}-byte STL preamble",
        bytes.len()
    );

    let mut count = [0u8; COUNT_LEN];
    count.copy_from_slice(&bytes[STL_HEADER_LEN..PREAMBLE_LEN]);
    let declared = u32::from_le_bytes(count) as usize;

    let body = &bytes[PREAMBLE_LEN..];
    let present = body.len() / STL_RECORD_LEN;
    ensure!(
        present >= declared,
        ErrorKind::TruncatedFile,
        "header declares {declared} triangles but only {present} complete records follow"
    );
    let trailing = body.len() - declared * STL_RECORD_LEN;
    if trailing > 0 {
        log::warn!("ignoring {trailing} bytes after the last STL record");
    }

    let mut builder = MeshBuilder::with_capacity(declared);
    for record in body.chunks_exact(STL_RECORD_LEN).take(declared) {
        let [a, b, c] = VERTEX_OFFSETS.map(|offset| read_vec3(record, offset));
        builder.add_triangle(a, b, c);
    }
    if options.centralize {
        builder.centralize();
    }
    log::debug!(
        "decoded {declared} triangles into {} unique vertices",
        builder.vertex_count()
    );
    builder.calculate_normals()
}

fn read_vec3(record: &[u8], offset: usize) -> Vec3 {
    let f = |i: usize| {
        let start = offset + i * 4;
        let mut raw = [0u8; 4];
        raw.copy_from_slice(&record[start..start + 4]);
        f32::from_le_bytes(raw)
    };
    Vec3::new(f(0), f(1), f(2))
}
