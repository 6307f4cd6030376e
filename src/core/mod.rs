//! Core layer - versions, configuration and the object registry.
//!
//! This module provides:
//! - [`BamVersion`] - Ordered `major.minor` format version
//! - [`FileConfig`] - Per-file settings (std-float width)
//! - [`StdFloat`] - Std-float value that remembers its width
//! - [`BamObject`] / [`BamObjectType`] - Traits every record codec implements
//! - [`ObjectFactory`] - Type-tag registry for constructing objects

mod version;
mod config;
mod traits;
mod factory;

pub use version::BamVersion;
pub use config::{FileConfig, FloatWidth, StdFloat, STDFLOAT_DOUBLE_ENV};
pub use traits::{BamObject, BamObjectType};
pub use factory::{ObjectConstructor, ObjectFactory};
