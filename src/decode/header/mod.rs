use crate::core::bit_coder::{ByteReader, ReaderErr};
use crate::shared::header::Header;


#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Err {
    #[error("Not enough data: {0}")]
    NotEnoughData(#[from] ReaderErr),
    #[error("The attribute mask {0:#010b} has unknown bits set")]
    UnknownMaskBits(u8),
}

pub(crate) fn decode_header<R>(reader: &mut R) -> Result<Header, Err>
where
    R: ByteReader,
{
    let header = Header::read_from(reader)?;

    if header.mask.unknown_bits() != 0 {
        return Err(Err::UnknownMaskBits(header.mask.bits()));
    }

    Ok(header)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::bit_coder::SliceReader;
    use crate::core::mask::AttributeMask;

    #[test]
    fn reads_counts() {
        let data = [0b100, 4, 0, 0, 0, 6, 0, 0, 0];
        let header = decode_header(&mut SliceReader::new(&data)).unwrap();
        assert_eq!(header.mask, AttributeMask::HAS_TEXCOORD);
        assert_eq!(header.vertex_count, 4);
        assert_eq!(header.index_count, 6);
        assert_eq!(header.total_len(), 9 + 4 * 20 + 6 * 4);
    }

    #[test]
    fn short_header() {
        let data = [0, 1, 0, 0];
        assert_eq!(
            decode_header(&mut SliceReader::new(&data)),
            Err(Err::NotEnoughData(ReaderErr::NotEnoughData))
        );
    }

    #[test]
    fn unknown_mask_bits() {
        let data = [0b1000_0001, 0, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(
            decode_header(&mut SliceReader::new(&data)),
            Err(Err::UnknownMaskBits(0b1000_0001))
        );
    }

    #[test]
    fn corrupted_counts_do_not_overflow() {
        let data = [0b111, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF];
        let header = decode_header(&mut SliceReader::new(&data)).unwrap();
        assert_eq!(header.total_len(), 9 + u32::MAX as u64 * 44 + u32::MAX as u64 * 4);
    }
}
