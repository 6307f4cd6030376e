//! Type-tag registry used to construct objects while walking a container.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use parking_lot::RwLock;

use super::{BamObject, BamObjectType, BamVersion};
use crate::bam::PrimitiveReader;
use crate::util::{Error, Result};

/// Constructor stored per type tag.
pub type ObjectConstructor =
    fn(&mut dyn PrimitiveReader, BamVersion) -> Result<Box<dyn BamObject>>;

fn construct<T: BamObjectType>(
    src: &mut dyn PrimitiveReader,
    version: BamVersion,
) -> Result<Box<dyn BamObject>> {
    Ok(Box::new(T::read(src, version)?))
}

/// Maps type tags to record decoders.
#[derive(Default)]
pub struct ObjectFactory {
    constructors: BTreeMap<&'static str, ObjectConstructor>,
}

impl ObjectFactory {
    /// Empty factory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory with every codec this crate ships.
    pub fn with_builtin() -> Self {
        let mut factory = Self::new();
        factory.register::<crate::texture::TextureRecord>();
        factory
    }

    /// Register `T` under its [`BamObjectType::TYPE_NAME`].
    /// Re-registering a tag replaces the previous constructor.
    pub fn register<T: BamObjectType>(&mut self) {
        self.register_fn(T::TYPE_NAME, construct::<T>);
    }

    /// Register a constructor under an explicit tag.
    pub fn register_fn(&mut self, type_name: &'static str, ctor: ObjectConstructor) {
        if self.constructors.insert(type_name, ctor).is_some() {
            tracing::debug!(type_name, "replaced registered constructor");
        }
    }

    /// Check whether a tag has a constructor.
    pub fn is_registered(&self, type_name: &str) -> bool {
        self.constructors.contains_key(type_name)
    }

    /// Registered tags, sorted.
    pub fn type_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.constructors.keys().copied()
    }

    /// Decode one record of type `type_name`.
    pub fn make(
        &self,
        type_name: &str,
        src: &mut dyn PrimitiveReader,
        version: BamVersion,
    ) -> Result<Box<dyn BamObject>> {
        let ctor = self
            .constructors
            .get(type_name)
            .ok_or_else(|| Error::UnknownType(type_name.to_string()))?;
        ctor(src, version)
    }

    /// Process-wide factory, built on first use with the builtin codecs.
    pub fn global() -> &'static RwLock<ObjectFactory> {
        static GLOBAL: OnceLock<RwLock<ObjectFactory>> = OnceLock::new();
        GLOBAL.get_or_init(|| RwLock::new(ObjectFactory::with_builtin()))
    }
}

impl std::fmt::Debug for ObjectFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.constructors.keys()).finish()
    }
}
