pub mod interner;
pub mod normalizer;

use thiserror::Error;

use super::mask::AttributeMask;

/// Size in bytes of the binary header: mask, vertex count and index count.
pub const HEADER_SIZE: usize = 1 + 4 + 4;

/// A single-indexed triangle mesh with an interleaved vertex buffer.
/// The record layout of every vertex is fixed by `mask`; see [AttributeMask].
///
/// A `MeshRecord` is only ever observed fully built: the constructor checks that
/// the vertex buffer holds a whole number of records and that every index
/// refers to one of them.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshRecord {
    mask: AttributeMask,
    vertex_count: u32,
    vertices: Vec<f32>,
    indices: Vec<u32>,
}

impl MeshRecord {
    pub fn new(mask: AttributeMask, vertices: Vec<f32>, indices: Vec<u32>) -> Result<Self, Err> {
        let components = mask.components_per_vertex();
        if vertices.len() % components != 0 {
            return Err(Err::VertexBufferLength { len: vertices.len(), components });
        }
        let vertex_count = vertices.len() / components;
        let vertex_count = u32::try_from(vertex_count)
            .map_err(|_| Err::CountOverflow(vertex_count))?;
        if u32::try_from(indices.len()).is_err() {
            return Err(Err::CountOverflow(indices.len()));
        }
        if let Some((position, &index)) = indices.iter()
            .enumerate()
            .find(|(_, &i)| i >= vertex_count)
        {
            return Err(Err::IndexOutOfBounds { position, index, vertex_count });
        }

        Ok(Self { mask, vertex_count, vertices, indices })
    }

    /// A mesh without vertices or indices.
    pub fn empty(mask: AttributeMask) -> Self {
        Self { mask, vertex_count: 0, vertices: Vec::new(), indices: Vec::new() }
    }

    pub fn mask(&self) -> AttributeMask {
        self.mask
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn index_count(&self) -> u32 {
        // Checked in the constructor.
        self.indices.len() as u32
    }

    pub fn components_per_vertex(&self) -> usize {
        self.mask.components_per_vertex()
    }

    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// The record of the vertex `idx`, or `None` if it is out of range.
    pub fn vertex(&self, idx: u32) -> Option<&[f32]> {
        let n = self.components_per_vertex();
        let start = (idx as usize).checked_mul(n)?;
        self.vertices.get(start..start.checked_add(n)?)
    }

    /// Iterates over the index buffer three indices at a time.
    /// A trailing partial triangle is not yielded.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Length in bytes of the binary encoding of this mesh.
    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE
            + self.vertices.len() * std::mem::size_of::<f32>()
            + self.indices.len() * std::mem::size_of::<u32>()
    }
}

#[remain::sorted]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Err {
    #[error("A count of {0} does not fit in 32 bits.")]
    CountOverflow(usize),

    #[error("Index {index} at position {position} is out of bounds for {vertex_count} vertices.")]
    IndexOutOfBounds { position: usize, index: u32, vertex_count: u32 },

    #[error("The vertex buffer has {len} floats, which is not a multiple of the record size {components}.")]
    VertexBufferLength { len: usize, components: usize },
}
