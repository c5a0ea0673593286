pub mod header {
    use crate::core::bit_coder::{ByteReader, ByteWriter, ReaderErr};
    use crate::core::mask::AttributeMask;
    use crate::core::mesh::{MeshRecord, HEADER_SIZE};

    /// The fixed nine-byte prefix of the binary format.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) struct Header {
        pub mask: AttributeMask,
        pub vertex_count: u32,
        pub index_count: u32,
    }

    impl Header {
        pub fn of(mesh: &MeshRecord) -> Self {
            Self {
                mask: mesh.mask(),
                vertex_count: mesh.vertex_count(),
                index_count: mesh.index_count(),
            }
        }

        /// Length of the vertex block in bytes.
        pub fn vertex_bytes(&self) -> u64 {
            self.vertex_count as u64 * self.mask.record_size() as u64
        }

        /// Length of the index block in bytes.
        pub fn index_bytes(&self) -> u64 {
            self.index_count as u64 * std::mem::size_of::<u32>() as u64
        }

        /// Total length of a file carrying this header. Computed in 64 bits,
        /// so a corrupted header cannot overflow it.
        pub fn total_len(&self) -> u64 {
            HEADER_SIZE as u64 + self.vertex_bytes() + self.index_bytes()
        }

        #[inline]
        pub fn read_from<R>(reader: &mut R) -> Result<Self, ReaderErr>
            where R: ByteReader
        {
            let mask = AttributeMask::from_bits(reader.read_u8()?);
            let vertex_count = reader.read_u32()?;
            let index_count = reader.read_u32()?;
            Ok(Self { mask, vertex_count, index_count })
        }

        #[inline]
        pub fn write_to<W>(&self, writer: &mut W)
            where W: ByteWriter
        {
            writer.write_u8(self.mask.bits());
            writer.write_u32(self.vertex_count);
            writer.write_u32(self.index_count);
        }
    }
}
