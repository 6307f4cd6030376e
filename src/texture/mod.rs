//! Texture record schema.
//!
//! Decode and encode for the BAM `Texture` object:
//! - [`TextureRecord`] - The decoded record
//! - [`presence`] - Which fields exist in which BAM version
//! - [`fields`] - Editable field descriptors and name-based access
//! - [`batch`] - Order-preserving parallel decode / encode

mod enums;
mod record;
mod codec;
pub mod presence;
pub mod fields;
pub mod batch;

pub use enums::*;
pub use record::*;
pub use codec::TEXTURE_TYPE_NAME;
pub use presence::{present, GatedField, FIELD_GATES};
pub use fields::{descriptor, FieldDescriptor, FieldKind, FieldValue, FIELD_DESCRIPTORS};
pub use batch::{decode_records, encode_records};
