pub(crate) mod header;
pub mod text;

use log::debug;

use crate::core::bit_coder::ByteWriter;
use crate::core::mesh::MeshRecord;

pub use text::{encode_text, encode_text_to_string};

/// Encodes the mesh into the binary format:
/// the mask byte, the vertex and index counts as little-endian `u32`,
/// the interleaved vertex floats and the `u32` indices, without padding.
pub fn encode<W>(mesh: &MeshRecord, writer: &mut W)
    where W: ByteWriter
{
    header::encode_header(writer, mesh);

    for &value in mesh.vertices() {
        writer.write_f32(value);
    }

    for &index in mesh.indices() {
        writer.write_u32(index);
    }
}

/// Encodes the mesh into a freshly allocated buffer of exactly
/// [MeshRecord::encoded_len] bytes.
pub fn encode_to_vec(mesh: &MeshRecord) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(mesh.encoded_len());
    encode(mesh, &mut buffer);
    debug!(
        "encoded {} vertices and {} indices into {} bytes",
        mesh.vertex_count(),
        mesh.index_count(),
        buffer.len()
    );
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mask::AttributeMask;

    #[test]
    fn layout_is_exact() {
        let mesh = MeshRecord::new(
            AttributeMask::NONE,
            vec![-1.0, 3.0, 2.0],
            vec![0, 0, 0],
        ).unwrap();
        let buffer = encode_to_vec(&mesh);
        assert_eq!(buffer.len(), 9 + 3 * 4 + 3 * 4);
        assert_eq!(buffer.len(), mesh.encoded_len());
        assert_eq!(&buffer[..9], &[0, 1, 0, 0, 0, 3, 0, 0, 0]);
        assert_eq!(&buffer[9..13], &(-1.0f32).to_le_bytes());
        assert_eq!(&buffer[13..17], &3.0f32.to_le_bytes());
        assert_eq!(&buffer[17..21], &2.0f32.to_le_bytes());
        assert_eq!(&buffer[21..], &[0; 12]);
    }

    #[test]
    fn encode_appends_to_writer() {
        let mesh = MeshRecord::new(
            AttributeMask::HAS_TEXCOORD,
            vec![0.0, 1.0, 2.0, 0.5, 0.25],
            vec![0, 0, 0],
        ).unwrap();
        // appends after existing content
        let mut streamed = vec![0xEE];
        encode(&mesh, &mut streamed);
        assert_eq!(streamed[0], 0xEE);
        assert_eq!(&streamed[1..], &encode_to_vec(&mesh)[..]);
    }

    #[test]
    fn empty_mesh_is_header_only() {
        let buffer = encode_to_vec(&MeshRecord::empty(AttributeMask::HAS_TEXCOORD));
        assert_eq!(buffer, vec![0b100, 0, 0, 0, 0, 0, 0, 0, 0]);
    }
}
