//! In-memory record reader.

use byteorder::{ByteOrder, LittleEndian};
use glam::Vec4;

use super::PrimitiveReader;
use crate::core::{FileConfig, FloatWidth, StdFloat};
use crate::util::{Error, Result};

/// Little-endian cursor over a single record's bytes.
///
/// The slice handed in is the record extent; nothing past its end is
/// visible. A read that does not fit fails with `TruncatedRecord` and
/// leaves the cursor where it was.
#[derive(Clone, Debug)]
pub struct DatagramIterator<'a> {
    data: &'a [u8],
    pos: usize,
    config: FileConfig,
}

impl<'a> DatagramIterator<'a> {
    /// Reader over `data` with 32-bit std-floats.
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_config(data, FileConfig::default())
    }

    /// Reader over `data` with an explicit file config.
    pub fn with_config(data: &'a [u8], config: FileConfig) -> Self {
        Self { data, pos: 0, config }
    }

    /// Bytes not yet consumed.
    #[inline]
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// True when every byte has been consumed.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.data.len()
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let available = self.data.len() - self.pos;
        if len > available {
            return Err(Error::TruncatedRecord {
                offset: self.pos,
                needed: len,
                available,
            });
        }
        let out = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(out)
    }

    /// Read a u16 length and check it against the remaining extent
    /// before anything is consumed.
    fn take_prefixed16(&mut self) -> Result<&'a [u8]> {
        let start = self.pos;
        let len = self.get_u16()? as usize;
        self.take_declared(start, len)
    }

    /// Same as [`take_prefixed16`](Self::take_prefixed16) with a u32 length.
    fn take_prefixed32(&mut self) -> Result<&'a [u8]> {
        let start = self.pos;
        let len = self.get_u32()? as usize;
        self.take_declared(start, len)
    }

    /// Take `len` bytes announced by the prefix at `start`, rewinding to
    /// `start` when they are not there.
    fn take_declared(&mut self, start: usize, len: usize) -> Result<&'a [u8]> {
        let available = self.data.len() - self.pos;
        if len > available {
            self.pos = start;
            return Err(Error::MalformedLength {
                offset: start,
                declared: len,
                available,
            });
        }
        self.take(len)
    }
}

impl PrimitiveReader for DatagramIterator<'_> {
    fn config(&self) -> FileConfig {
        self.config
    }

    #[inline]
    fn tell(&self) -> usize {
        self.pos
    }

    #[inline]
    fn remaining_size(&self) -> usize {
        self.data.len() - self.pos
    }

    fn get_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn get_bool(&mut self) -> Result<bool> {
        Ok(self.get_u8()? != 0)
    }

    fn get_i16(&mut self) -> Result<i16> {
        Ok(LittleEndian::read_i16(self.take(2)?))
    }

    fn get_u16(&mut self) -> Result<u16> {
        Ok(LittleEndian::read_u16(self.take(2)?))
    }

    fn get_i32(&mut self) -> Result<i32> {
        Ok(LittleEndian::read_i32(self.take(4)?))
    }

    fn get_u32(&mut self) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.take(4)?))
    }

    fn get_string(&mut self) -> Result<String> {
        let bytes = self.take_prefixed16()?;
        Ok(String::from_utf8(bytes.to_vec())?)
    }

    fn get_stdfloat(&mut self) -> Result<StdFloat> {
        let bytes = self.take(self.config.float_width.size())?;
        Ok(match self.config.float_width {
            FloatWidth::F32 => StdFloat::F32(LittleEndian::read_f32(bytes)),
            FloatWidth::F64 => StdFloat::F64(LittleEndian::read_f64(bytes)),
        })
    }

    fn get_vec4(&mut self) -> Result<Vec4> {
        let bytes = self.take(16)?;
        let mut v = [0f32; 4];
        LittleEndian::read_f32_into(bytes, &mut v);
        Ok(Vec4::from_array(v))
    }

    fn extract_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        Ok(self.take(len)?.to_vec())
    }

    fn get_blob32(&mut self) -> Result<Vec<u8>> {
        Ok(self.take_prefixed32()?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_width() {
        let data = [0x01, 0xfe, 0xff, 0x78, 0x56, 0x34, 0x12, 0x00];
        let mut di = DatagramIterator::new(&data);
        assert_eq!(di.get_u8().unwrap(), 1);
        assert_eq!(di.get_i16().unwrap(), -2);
        assert_eq!(di.get_u32().unwrap(), 0x1234_5678);
        assert!(!di.get_bool().unwrap());
        assert!(di.is_at_end());
    }

    #[test]
    fn test_truncated_leaves_cursor() {
        let data = [0x01, 0x02];
        let mut di = DatagramIterator::new(&data);
        di.get_u8().unwrap();
        let err = di.get_u32().unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedRecord { offset: 1, needed: 4, available: 1 }
        ));
        assert_eq!(di.tell(), 1);
        assert_eq!(di.get_u8().unwrap(), 2);
    }

    #[test]
    fn test_string() {
        let data = [3, 0, b'a', b'b', b'c', 9];
        let mut di = DatagramIterator::new(&data);
        assert_eq!(di.get_string().unwrap(), "abc");
        assert_eq!(di.remaining(), &[9]);

        let short = [1];
        let mut di = DatagramIterator::new(&short);
        assert!(matches!(di.get_string(), Err(Error::TruncatedRecord { .. })));
        assert_eq!(di.tell(), 0);
    }

    #[test]
    fn test_string_malformed_length() {
        let data = [50, 0, b'a', b'b', b'c'];
        let mut di = DatagramIterator::new(&data);
        let err = di.get_string().unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedLength { offset: 0, declared: 50, available: 3 }
        ));
        assert_eq!(di.tell(), 0);
    }

    #[test]
    fn test_bool_nonzero() {
        let data = [0, 1, 2, 0xff];
        let mut di = DatagramIterator::new(&data);
        let flags: Vec<bool> = (0..4).map(|_| di.get_bool().unwrap()).collect();
        assert_eq!(flags, [false, true, true, true]);
    }

    #[test]
    fn test_invalid_utf8() {
        let data = [1, 0, 0xff];
        let mut di = DatagramIterator::new(&data);
        assert!(matches!(di.get_string(), Err(Error::Utf8(_))));
    }

    #[test]
    fn test_stdfloat_width() {
        let data = 1.5f32.to_le_bytes();
        let mut di = DatagramIterator::new(&data);
        assert_eq!(di.get_stdfloat().unwrap(), StdFloat::F32(1.5));

        let data = (-0.25f64).to_le_bytes();
        let cfg = FileConfig::new().with_float_width(FloatWidth::F64);
        let mut di = DatagramIterator::with_config(&data, cfg);
        let value = di.get_stdfloat().unwrap();
        assert_eq!(value.width(), FloatWidth::F64);
        assert_eq!(value, -0.25);
        assert_eq!(di.remaining_size(), 0);
    }

    #[test]
    fn test_vec4() {
        let mut data = Vec::new();
        for v in [0.0f32, 0.5, 1.0, -1.0] {
            data.extend_from_slice(&v.to_le_bytes());
        }
        let mut di = DatagramIterator::new(&data);
        assert_eq!(di.get_vec4().unwrap(), Vec4::new(0.0, 0.5, 1.0, -1.0));
    }

    #[test]
    fn test_blob_malformed_length() {
        let mut data = 10u32.to_le_bytes().to_vec();
        data.extend_from_slice(&[1, 2, 3]);
        let mut di = DatagramIterator::new(&data);
        let err = di.get_blob32().unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedLength { offset: 0, declared: 10, available: 3 }
        ));
        assert_eq!(di.tell(), 0);
    }

    #[test]
    fn test_blob() {
        let mut data = 2u32.to_le_bytes().to_vec();
        data.extend_from_slice(&[7, 8, 9]);
        let mut di = DatagramIterator::new(&data);
        assert_eq!(di.get_blob32().unwrap(), vec![7, 8]);
        assert_eq!(di.extract_bytes(di.remaining_size()).unwrap(), vec![9]);
    }
}
