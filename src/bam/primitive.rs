//! Primitive read/write contracts used by record codecs.
//!
//! Record codecs only talk to these traits, so any byte source that can
//! honor them (an in-memory record extent, a file-backed stream, a test
//! fake) can drive a codec. Both traits are object-safe; the object
//! factory passes them around as `&mut dyn`.

use glam::Vec4;

use crate::core::{FileConfig, StdFloat};
use crate::util::Result;

/// Forward-only reader over one record's byte extent.
pub trait PrimitiveReader {
    /// Config (std-float width) this reader was created with.
    fn config(&self) -> FileConfig;

    /// Current offset from the start of the record.
    fn tell(&self) -> usize;

    /// Bytes left in the record.
    fn remaining_size(&self) -> usize;

    fn get_u8(&mut self) -> Result<u8>;

    /// One byte; any nonzero value reads as `true`, so a flag byte other
    /// than 0 or 1 comes back as 1 when re-encoded.
    fn get_bool(&mut self) -> Result<bool>;

    fn get_i16(&mut self) -> Result<i16>;
    fn get_u16(&mut self) -> Result<u16>;
    fn get_i32(&mut self) -> Result<i32>;
    fn get_u32(&mut self) -> Result<u32>;

    /// String with a u16 length prefix.
    ///
    /// A prefix larger than the rest of the record is a
    /// [`MalformedLength`](crate::util::Error::MalformedLength) error.
    fn get_string(&mut self) -> Result<String>;

    /// Float whose width comes from [`FileConfig::float_width`].
    fn get_stdfloat(&mut self) -> Result<StdFloat>;

    /// Four f32 components, always single precision.
    fn get_vec4(&mut self) -> Result<Vec4>;

    /// Take exactly `len` raw bytes.
    fn extract_bytes(&mut self, len: usize) -> Result<Vec<u8>>;

    /// u32 length prefix followed by that many bytes.
    ///
    /// A prefix larger than the rest of the record is a
    /// [`MalformedLength`](crate::util::Error::MalformedLength) error.
    fn get_blob32(&mut self) -> Result<Vec<u8>>;
}

/// Append-only writer producing one record.
pub trait PrimitiveWriter {
    /// Config (std-float width) this writer was created with.
    fn config(&self) -> FileConfig;

    fn add_u8(&mut self, value: u8) -> Result<()>;
    fn add_bool(&mut self, value: bool) -> Result<()>;
    fn add_i16(&mut self, value: i16) -> Result<()>;
    fn add_u16(&mut self, value: u16) -> Result<()>;
    fn add_i32(&mut self, value: i32) -> Result<()>;
    fn add_u32(&mut self, value: u32) -> Result<()>;

    /// String with a u16 length prefix.
    fn add_string(&mut self, value: &str) -> Result<()>;

    /// Float at the configured std-float width; same-width values are
    /// written bit for bit.
    fn add_stdfloat(&mut self, value: StdFloat) -> Result<()>;

    fn add_vec4(&mut self, value: Vec4) -> Result<()>;

    /// Raw bytes, no prefix.
    fn append_data(&mut self, data: &[u8]) -> Result<()>;

    /// u32 length prefix followed by the bytes.
    fn add_blob32(&mut self, data: &[u8]) -> Result<()>;
}
