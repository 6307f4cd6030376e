//! Utility types and functions for bamtex.
//!
//! - [`Error`] / [`Result`] - Error handling
//! - Hex color parsing for editable colors
//! - Math type re-exports from glam

mod error;
mod color;

pub use error::*;
pub use color::*;

pub use glam::Vec4;
