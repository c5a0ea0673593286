use log::debug;
use thiserror::Error;

use crate::core::mask::AttributeMask;
use crate::core::shared::{ConfigType, FaceList, SourceAttributes};
use super::interner::{self, DedupStrategy, VertexInterner};
use super::MeshRecord;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pub dedup: DedupStrategy,
    /// Converts positions and normals to the target axes (x mirrored, y and z swapped).
    pub remap_axes: bool,
    /// Stores `1 - v` for texture coordinates.
    pub flip_v: bool,
}

impl ConfigType for Config {
    fn default() -> Self {
        Self {
            dedup: DedupStrategy::Exact,
            remap_axes: true,
            flip_v: true,
        }
    }
}

/// Builds a single-indexed mesh from separately indexed source streams.
///
/// Every face corner is interned in face order; the index buffer receives one
/// entry per corner, so `index_count` equals the number of corners of `faces`.
pub fn normalize(source: &SourceAttributes, faces: &FaceList, mask: AttributeMask, cfg: &Config) -> Result<MeshRecord, Err> {
    let num_corners = faces.num_corners();
    if num_corners != faces.keys.len() {
        return Err(Err::FaceListLength { corners: num_corners, keys: faces.keys.len() });
    }

    let mut interner = VertexInterner::new(source, mask, cfg, num_corners)?;
    let mut indices = Vec::with_capacity(num_corners);
    for face in faces.faces() {
        for &key in face {
            indices.push(interner.intern(key)?);
        }
    }

    let vertex_count = interner.vertex_count();
    let vertices = interner.into_vertices();
    debug!(
        "normalized {} faces: {} corners into {} vertices, mask {:?}",
        faces.num_faces(),
        num_corners,
        vertex_count,
        mask
    );

    Ok(MeshRecord::new(mask, vertices, indices)?)
}

#[remain::sorted]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Err {
    #[error("The face list declares {corners} corners but holds {keys} index keys.")]
    FaceListLength { corners: usize, keys: usize },

    #[error("Vertex interning failed: {0}")]
    Interner(#[from] interner::Err),

    #[error("The normalized mesh is inconsistent: {0}")]
    Mesh(#[from] super::Err),
}

impl Err {
    /// Whether the error is a face referencing data outside its attribute array.
    pub fn is_index_out_of_range(&self) -> bool {
        matches!(self, Err::Interner(interner::Err::IndexOutOfRange { .. }))
    }
}
