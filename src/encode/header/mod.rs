use crate::core::bit_coder::ByteWriter;
use crate::core::mesh::MeshRecord;
use crate::shared::header::Header;

pub fn encode_header<W>(writer: &mut W, mesh: &MeshRecord)
where
    W: ByteWriter,
{
    Header::of(mesh).write_to(writer);
}
