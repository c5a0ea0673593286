pub mod header;
pub mod text;

use log::debug;

use crate::core::bit_coder::{ByteReader, SliceReader};
use crate::core::mesh::{self, MeshRecord};

pub use text::{decode_text, TextDecoder};

/// Decodes a mesh from the binary format.
///
/// The header is validated against the length of `data` before anything is
/// allocated: the declared counts must account for every byte, no more and no less.
pub fn decode(data: &[u8]) -> Result<MeshRecord, Err> {
    let mut reader = SliceReader::new(data);

    // Decode header
    let header = header::decode_header(&mut reader)?;

    let expected = header.total_len();
    if expected != data.len() as u64 {
        return Err(Err::SizeMismatch { expected, actual: data.len() });
    }

    // Both blocks are now known to fit in `data`, so the lengths fit in usize.
    let num_floats = header.vertex_bytes() as usize / std::mem::size_of::<f32>();
    let mut vertices = Vec::with_capacity(num_floats);
    for _ in 0..num_floats {
        vertices.push(reader.read_f32()?);
    }

    let mut indices = Vec::with_capacity(header.index_count as usize);
    for _ in 0..header.index_count {
        indices.push(reader.read_u32()?);
    }

    debug!(
        "decoded {} vertices and {} indices, mask {:?}",
        header.vertex_count,
        header.index_count,
        header.mask
    );

    Ok(MeshRecord::new(header.mask, vertices, indices)?)
}


#[remain::sorted]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Err {
    #[error("Header decoding error: {0}")]
    HeaderError(#[from] header::Err),
    #[error("Decoded mesh is invalid: {0}")]
    InvalidMesh(#[from] mesh::Err),
    #[error("Unexpected end of data: {0}")]
    NotEnoughData(#[from] crate::core::bit_coder::ReaderErr),
    #[error("File size doesn't match the header: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: u64, actual: usize },
}
