//! # bamtex
//!
//! Version-aware codec for the `Texture` object of Panda3D BAM files.
//!
//! The BAM format changed the texture record across many minor versions,
//! often by inserting fields in the middle of it. This crate decodes a
//! texture record written by any of those versions and re-encodes it for
//! any other, byte-exact when the versions match.
//!
//! ## Modules
//!
//! - [`util`] - Errors and color helpers
//! - [`core`] - Versions, file config, object traits and the type registry
//! - [`bam`] - Low-level datagram reader / writer
//! - [`texture`] - Texture record, field presence table and codec
//!
//! ## Example
//!
//! ```ignore
//! use bamtex::prelude::*;
//!
//! let version = BamVersion::new(6, 45);
//! let mut di = DatagramIterator::new(&record_bytes);
//! let mut tex = TextureRecord::decode(&mut di, version)?;
//!
//! tex.set_field_text("minfilter", "Mipmap Trilinear")?;
//!
//! let mut dg = Datagram::new();
//! tex.encode(BamVersion::new(6, 36), &mut dg)?;
//! ```

pub mod util;
pub mod core;
pub mod bam;
pub mod texture;

// Re-export commonly used types
pub use util::{Error, Result};
pub use core::{BamVersion, FileConfig, FloatWidth, StdFloat};
pub use texture::TextureRecord;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::util::{Error, Result};
    pub use crate::core::{BamObject, BamObjectType, BamVersion, FileConfig, FloatWidth, ObjectFactory, StdFloat};
    pub use crate::bam::{Datagram, DatagramIterator, DatagramWriter, PrimitiveReader, PrimitiveWriter};
    pub use crate::texture::*;
}
