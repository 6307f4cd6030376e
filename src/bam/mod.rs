//! Low-level BAM datagram primitives.
//!
//! A BAM file stores each object as a length-bounded datagram. Inside a
//! datagram, values are little-endian:
//!
//! ```text
//! u8 / bool          1 byte
//! i16 / u16          2 bytes
//! i32 / u32          4 bytes
//! string             u16 length + UTF-8 bytes
//! std-float          4 or 8 bytes, per file
//! vec4               4 x f32
//! blob32             u32 length + bytes
//! ```
//!
//! The container framing (object table, pointers) is handled elsewhere;
//! this module only reads and writes the inside of one record.

mod primitive;
mod reader;
mod writer;

pub use primitive::*;
pub use reader::*;
pub use writer::*;
