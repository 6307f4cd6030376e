//! Object traits shared by every record codec.
//!
//! These traits define the interface between a container walker (which
//! owns the object table) and the per-type record codecs.

use std::any::Any;
use std::fmt::Debug;

use crate::bam::{PrimitiveReader, PrimitiveWriter};
use crate::core::BamVersion;
use crate::util::Result;

/// A decoded BAM object that can be written back out.
///
/// Object-safe, so a container can hold a heterogeneous object table.
pub trait BamObject: Debug + Send + Sync {
    /// Stable type tag this object is registered under.
    fn type_name(&self) -> &'static str;

    /// Append this object's record bytes, laid out for `version`.
    fn write(&self, version: BamVersion, dg: &mut dyn PrimitiveWriter) -> Result<()>;

    /// Downcasting support.
    fn as_any(&self) -> &dyn Any;

    /// Mutable downcasting support.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// A concrete object type that the factory can construct.
pub trait BamObjectType: BamObject + Sized + 'static {
    /// Type tag used in the container's type index.
    const TYPE_NAME: &'static str;

    /// Decode one record laid out for `version`.
    fn read(src: &mut dyn PrimitiveReader, version: BamVersion) -> Result<Self>;
}

impl dyn BamObject {
    /// Downcast to a concrete object type.
    pub fn downcast_ref<T: BamObjectType>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Mutable downcast to a concrete object type.
    pub fn downcast_mut<T: BamObjectType>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}
