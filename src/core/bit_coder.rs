/// Sink for little-endian fixed-width fields.
pub trait ByteWriter: Sized {
    fn write_u8(&mut self, value: u8);
    fn write_u16(&mut self, value: u16) {
        self.write_u8(value as u8);
        self.write_u8((value >> 8) as u8);
    }
    fn write_u32(&mut self, value: u32) {
        self.write_u16(value as u16);
        self.write_u16((value >> 16) as u16);
    }
    fn write_f32(&mut self, value: f32) {
        self.write_u32(value.to_bits());
    }
}

impl ByteWriter for Vec<u8> {
    fn write_u8(&mut self, value: u8) {
        self.push(value);
    }

    fn write_u16(&mut self, value: u16) {
        self.extend_from_slice(&value.to_le_bytes());
    }

    fn write_u32(&mut self, value: u32) {
        self.extend_from_slice(&value.to_le_bytes());
    }

    fn write_f32(&mut self, value: f32) {
        self.extend_from_slice(&value.to_le_bytes());
    }
}

/// Source of little-endian fixed-width fields. Every read is bounds checked.
pub trait ByteReader {
    fn read_u8(&mut self) -> Result<u8, ReaderErr>;
    fn read_u16(&mut self) -> Result<u16, ReaderErr> {
        let out = [
            self.read_u8()?,
            self.read_u8()?
        ];
        Ok(u16::from_le_bytes(out))
    }
    fn read_u32(&mut self) -> Result<u32, ReaderErr> {
        let out = [
            self.read_u8()?,
            self.read_u8()?,
            self.read_u8()?,
            self.read_u8()?
        ];
        Ok(u32::from_le_bytes(out))
    }
    fn read_f32(&mut self) -> Result<f32, ReaderErr> {
        Ok(f32::from_bits(self.read_u32()?))
    }
}

/// A cursor over a borrowed byte slice.
#[derive(Debug, Clone)]
pub struct SliceReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], ReaderErr> {
        let end = self.pos.checked_add(N).ok_or(ReaderErr::NotEnoughData)?;
        let bytes = self.data.get(self.pos..end).ok_or(ReaderErr::NotEnoughData)?;
        let mut out = [0; N];
        out.copy_from_slice(bytes);
        self.pos = end;
        Ok(out)
    }
}

impl ByteReader for SliceReader<'_> {
    fn read_u8(&mut self) -> Result<u8, ReaderErr> {
        Ok(self.take::<1>()?[0])
    }

    fn read_u16(&mut self) -> Result<u16, ReaderErr> {
        Ok(u16::from_le_bytes(self.take()?))
    }

    fn read_u32(&mut self) -> Result<u32, ReaderErr> {
        Ok(u32::from_le_bytes(self.take()?))
    }

    fn read_f32(&mut self) -> Result<f32, ReaderErr> {
        Ok(f32::from_le_bytes(self.take()?))
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderErr {
    #[error("Not enough data to read")]
    NotEnoughData,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn little_endian_fields() {
        let mut buffer = Vec::new();
        buffer.write_u8(0xAB);
        buffer.write_u32(0x0403_0201);
        buffer.write_f32(1.0);
        assert_eq!(buffer, vec![0xAB, 1, 2, 3, 4, 0x00, 0x00, 0x80, 0x3F]);

        let mut reader = SliceReader::new(&buffer);
        assert_eq!(reader.read_u8().unwrap(), 0xAB);
        assert_eq!(reader.read_u32().unwrap(), 0x0403_0201);
        assert_eq!(reader.read_f32().unwrap(), 1.0);
        assert_eq!(reader.read_u8(), Err(ReaderErr::NotEnoughData));
    }

    #[test]
    fn short_read_does_not_advance() {
        let data = [1u8, 2, 3];
        let mut reader = SliceReader::new(&data);
        assert_eq!(reader.read_u32(), Err(ReaderErr::NotEnoughData));
        assert_eq!(reader.read_u16().unwrap(), 0x0201);
        assert_eq!(reader.read_u8().unwrap(), 3);
        assert_eq!(reader.read_u8(), Err(ReaderErr::NotEnoughData));
    }
}
