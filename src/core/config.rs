//! Container-wide codec configuration.

/// Width of "std-float" values, fixed once per BAM file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FloatWidth {
    /// 32-bit floats (the common case).
    #[default]
    F32,
    /// 64-bit floats, for files written with `stdfloat_double`.
    F64,
}

impl FloatWidth {
    /// Size in bytes of one std-float.
    #[inline]
    pub const fn size(self) -> usize {
        match self {
            FloatWidth::F32 => 4,
            FloatWidth::F64 => 8,
        }
    }
}

/// One std-float value, tagged with the width it was read at.
///
/// Values read from a 32-bit file keep their exact `f32` bits, so writing
/// them back at the same width reproduces the input bytes (NaN payloads
/// included). Values crossing widths are widened or narrowed on write.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "f64", into = "f64"))]
pub enum StdFloat {
    F32(f32),
    F64(f64),
}

impl StdFloat {
    /// Value as `f64`.
    #[inline]
    pub fn get(self) -> f64 {
        match self {
            StdFloat::F32(v) => v as f64,
            StdFloat::F64(v) => v,
        }
    }

    /// Value as `f32`; exact for values read at 32 bits.
    #[inline]
    pub fn to_f32(self) -> f32 {
        match self {
            StdFloat::F32(v) => v,
            StdFloat::F64(v) => v as f32,
        }
    }

    /// Width this value was read at (or built with).
    pub fn width(self) -> FloatWidth {
        match self {
            StdFloat::F32(_) => FloatWidth::F32,
            StdFloat::F64(_) => FloatWidth::F64,
        }
    }
}

impl Default for StdFloat {
    fn default() -> Self {
        StdFloat::F64(0.0)
    }
}

impl From<f64> for StdFloat {
    fn from(v: f64) -> Self {
        StdFloat::F64(v)
    }
}

impl From<f32> for StdFloat {
    fn from(v: f32) -> Self {
        StdFloat::F32(v)
    }
}

impl From<StdFloat> for f64 {
    fn from(v: StdFloat) -> Self {
        v.get()
    }
}

/// Compares values, not widths.
impl PartialEq for StdFloat {
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}

impl PartialEq<f64> for StdFloat {
    fn eq(&self, other: &f64) -> bool {
        self.get() == *other
    }
}

/// Environment variable that switches std-floats to 64-bit.
pub const STDFLOAT_DOUBLE_ENV: &str = "BAMTEX_STDFLOAT_DOUBLE";

/// Settings shared by every reader and writer of one file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileConfig {
    pub float_width: FloatWidth,
}

impl FileConfig {
    /// Config with 32-bit std-floats.
    pub const fn new() -> Self {
        Self { float_width: FloatWidth::F32 }
    }

    /// Set the std-float width.
    pub const fn with_float_width(mut self, float_width: FloatWidth) -> Self {
        self.float_width = float_width;
        self
    }

    /// Config from the environment (`BAMTEX_STDFLOAT_DOUBLE=1` selects f64).
    pub fn from_env() -> Self {
        let double = std::env::var(STDFLOAT_DOUBLE_ENV)
            .map(|v| matches!(v.trim(), "1" | "true" | "yes" | "on"))
            .unwrap_or(false);
        let width = if double { FloatWidth::F64 } else { FloatWidth::F32 };
        Self::new().with_float_width(width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(FileConfig::default().float_width, FloatWidth::F32);
        assert_eq!(FileConfig::new(), FileConfig::default());
        assert_eq!(FloatWidth::F64.size(), 8);
    }

    #[test]
    fn test_stdfloat_value() {
        let narrow = StdFloat::F32(0.5);
        assert_eq!(narrow.width(), FloatWidth::F32);
        assert_eq!(narrow.width().size(), 4);
        assert_eq!(narrow, StdFloat::from(0.5f64));
        assert_eq!(narrow, 0.5);
        assert_eq!(StdFloat::F64(0.1).to_f32(), 0.1f32);
        assert_eq!(StdFloat::default(), 0.0);
        assert_eq!(f64::from(StdFloat::F32(-2.0)), -2.0);
    }

    #[test]
    fn test_stdfloat_keeps_f32_bits() {
        let snan = f32::from_bits(0x7f80_0001);
        assert_eq!(StdFloat::F32(snan).to_f32().to_bits(), 0x7f80_0001);
    }

    #[test]
    fn test_builder() {
        let cfg = FileConfig::new().with_float_width(FloatWidth::F64);
        assert_eq!(cfg.float_width, FloatWidth::F64);
    }
}
