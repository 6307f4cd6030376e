//! Record writer.

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};
use glam::Vec4;

use super::PrimitiveWriter;
use crate::core::{FileConfig, FloatWidth, StdFloat};
use crate::util::{Error, Result};

/// Little-endian writer appending one record to any [`Write`] sink.
///
/// Sink failures surface as [`Error::Io`].
#[derive(Debug)]
pub struct DatagramWriter<W: Write> {
    sink: W,
    pos: usize,
    config: FileConfig,
}

/// Writer collecting a record in memory.
pub type Datagram = DatagramWriter<Vec<u8>>;

impl Datagram {
    /// Empty in-memory record with 32-bit std-floats.
    pub fn new() -> Self {
        Self::with_config(FileConfig::default())
    }

    /// Empty in-memory record with an explicit file config.
    pub fn with_config(config: FileConfig) -> Self {
        DatagramWriter::from_sink(Vec::new(), config)
    }

    /// Bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.sink
    }
}

impl Default for Datagram {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> DatagramWriter<W> {
    /// Wrap an arbitrary sink.
    pub fn from_sink(sink: W, config: FileConfig) -> Self {
        Self { sink, pos: 0, config }
    }

    /// Number of bytes written.
    #[inline]
    pub fn len(&self) -> usize {
        self.pos
    }

    /// True if nothing was written yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos == 0
    }

    /// Flush and return the sink.
    pub fn into_inner(mut self) -> Result<W> {
        self.sink.flush()?;
        Ok(self.sink)
    }
}

impl<W: Write> PrimitiveWriter for DatagramWriter<W> {
    fn config(&self) -> FileConfig {
        self.config
    }

    fn add_u8(&mut self, value: u8) -> Result<()> {
        self.sink.write_u8(value)?;
        self.pos += 1;
        Ok(())
    }

    /// Always 0 or 1.
    fn add_bool(&mut self, value: bool) -> Result<()> {
        self.add_u8(value as u8)
    }

    fn add_i16(&mut self, value: i16) -> Result<()> {
        self.sink.write_i16::<LittleEndian>(value)?;
        self.pos += 2;
        Ok(())
    }

    fn add_u16(&mut self, value: u16) -> Result<()> {
        self.sink.write_u16::<LittleEndian>(value)?;
        self.pos += 2;
        Ok(())
    }

    fn add_i32(&mut self, value: i32) -> Result<()> {
        self.sink.write_i32::<LittleEndian>(value)?;
        self.pos += 4;
        Ok(())
    }

    fn add_u32(&mut self, value: u32) -> Result<()> {
        self.sink.write_u32::<LittleEndian>(value)?;
        self.pos += 4;
        Ok(())
    }

    fn add_string(&mut self, value: &str) -> Result<()> {
        let len = u16::try_from(value.len()).map_err(|_| Error::StringTooLong(value.len()))?;
        self.add_u16(len)?;
        self.append_data(value.as_bytes())
    }

    fn add_stdfloat(&mut self, value: StdFloat) -> Result<()> {
        let width = self.config.float_width;
        if value.width() != width {
            tracing::trace!(from = ?value.width(), to = ?width, "converting std-float width");
        }
        match width {
            FloatWidth::F32 => self.sink.write_f32::<LittleEndian>(value.to_f32())?,
            FloatWidth::F64 => self.sink.write_f64::<LittleEndian>(value.get())?,
        }
        self.pos += width.size();
        Ok(())
    }

    fn add_vec4(&mut self, value: Vec4) -> Result<()> {
        for c in value.to_array() {
            self.sink.write_f32::<LittleEndian>(c)?;
        }
        self.pos += 16;
        Ok(())
    }

    fn append_data(&mut self, data: &[u8]) -> Result<()> {
        self.sink.write_all(data)?;
        self.pos += data.len();
        Ok(())
    }

    fn add_blob32(&mut self, data: &[u8]) -> Result<()> {
        let len = u32::try_from(data.len()).map_err(|_| Error::BlobTooLong(data.len()))?;
        self.add_u32(len)?;
        self.append_data(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bam::{DatagramIterator, PrimitiveReader};

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_layout() {
        let mut dg = Datagram::new();
        dg.add_u8(7).unwrap();
        dg.add_i16(-2).unwrap();
        dg.add_string("ab").unwrap();
        dg.add_blob32(&[1, 2]).unwrap();
        assert_eq!(
            dg.as_bytes(),
            &[7, 0xfe, 0xff, 2, 0, b'a', b'b', 2, 0, 0, 0, 1, 2]
        );
        assert_eq!(dg.len(), 13);
    }

    #[test]
    fn test_stdfloat_narrowing() {
        let mut dg = Datagram::new();
        dg.add_stdfloat(StdFloat::F64(-1000.0)).unwrap();
        assert_eq!(dg.as_bytes(), &(-1000.0f32).to_le_bytes());

        let cfg = FileConfig::new().with_float_width(FloatWidth::F64);
        let mut dg = Datagram::with_config(cfg);
        dg.add_stdfloat(StdFloat::from(0.1)).unwrap();
        dg.add_stdfloat(StdFloat::F32(0.5)).unwrap();
        assert_eq!(dg.len(), 16);
        let bytes = dg.into_inner().unwrap();
        let mut di = DatagramIterator::with_config(&bytes, cfg);
        assert_eq!(di.get_stdfloat().unwrap(), 0.1);
        assert_eq!(di.get_stdfloat().unwrap(), 0.5);
    }

    #[test]
    fn test_stdfloat_nan_bits() {
        let data = [0x01, 0x00, 0x80, 0x7f];
        let mut di = DatagramIterator::new(&data);
        let value = di.get_stdfloat().unwrap();

        let mut dg = Datagram::new();
        dg.add_stdfloat(value).unwrap();
        assert_eq!(dg.as_bytes(), &data);
    }

    #[test]
    fn test_bool_bytes() {
        let mut dg = Datagram::new();
        dg.add_bool(true).unwrap();
        dg.add_bool(false).unwrap();
        assert_eq!(dg.as_bytes(), &[1, 0]);
    }

    #[test]
    fn test_string_too_long() {
        let mut dg = Datagram::new();
        let long = "x".repeat(u16::MAX as usize + 1);
        assert!(matches!(dg.add_string(&long), Err(Error::StringTooLong(_))));
        assert!(dg.is_empty());
    }

    #[test]
    fn test_sink_error() {
        let mut dg = DatagramWriter::from_sink(FailingSink, FileConfig::default());
        assert!(matches!(dg.add_u32(1), Err(Error::Io(_))));
    }
}
