//! Field presence table for texture records.
//!
//! Each optional field carries the BAM version that introduced it and the
//! value a record takes when the stream is older than that. Decoder and
//! encoder both gate through [`present`], so they cannot disagree about
//! which bytes exist for a given version.

use crate::core::{BamVersion, StdFloat};

use super::{AutoTextureScale, CompressionMode, QualityLevel};

/// Record fields whose presence depends on the file version.
///
/// Declared in stream order; the discriminant indexes [`FIELD_GATES`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GatedField {
    PrimaryFileNumChannels,
    AlphaFileChannel,
    HasReadMipmaps,
    MinLod,
    MaxLod,
    LodBias,
    Compression,
    QualityLevel,
    AutoTextureScale,
    OrigFileXSize,
    OrigFileYSize,
    HasSimpleRamImage,
    HasClearColor,
}

/// Value substituted when a gated field is absent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GateDefault {
    U8(u8),
    U32(u32),
    Bool(bool),
    Float(f64),
    /// No value at all; the record stores "not present".
    Absent,
}

/// One row of the presence table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldGate {
    pub field: GatedField,
    pub name: &'static str,
    pub since: BamVersion,
    pub default: GateDefault,
}

const fn row(field: GatedField, name: &'static str, since: (u16, u16), default: GateDefault) -> FieldGate {
    FieldGate {
        field,
        name,
        since: BamVersion::new(since.0, since.1),
        default,
    }
}

/// Presence table, in stream order.
pub static FIELD_GATES: [FieldGate; 13] = [
    row(GatedField::PrimaryFileNumChannels, "primary_file_num_channels", (4, 2), GateDefault::U8(0)),
    row(GatedField::AlphaFileChannel, "alpha_file_channel", (4, 3), GateDefault::U8(0)),
    row(GatedField::HasReadMipmaps, "has_read_mipmaps", (6, 32), GateDefault::Bool(false)),
    row(GatedField::MinLod, "min_lod", (6, 36), GateDefault::Float(-1000.0)),
    row(GatedField::MaxLod, "max_lod", (6, 36), GateDefault::Float(1000.0)),
    row(GatedField::LodBias, "lod_bias", (6, 36), GateDefault::Float(0.0)),
    row(GatedField::Compression, "compression", (6, 1), GateDefault::U8(CompressionMode::DEFAULT.code())),
    row(GatedField::QualityLevel, "quality_level", (6, 16), GateDefault::U8(QualityLevel::UNSPECIFIED.code())),
    row(GatedField::AutoTextureScale, "auto_texture_scale", (6, 28), GateDefault::U8(AutoTextureScale::UNSPECIFIED.code())),
    row(GatedField::OrigFileXSize, "orig_file_x_size", (6, 18), GateDefault::U32(0)),
    row(GatedField::OrigFileYSize, "orig_file_y_size", (6, 18), GateDefault::U32(0)),
    row(GatedField::HasSimpleRamImage, "has_simple_ram_image", (6, 18), GateDefault::Bool(false)),
    row(GatedField::HasClearColor, "has_clear_color", (6, 45), GateDefault::Absent),
];

impl GatedField {
    /// All gated fields in stream order.
    pub const ALL: [GatedField; 13] = [
        GatedField::PrimaryFileNumChannels,
        GatedField::AlphaFileChannel,
        GatedField::HasReadMipmaps,
        GatedField::MinLod,
        GatedField::MaxLod,
        GatedField::LodBias,
        GatedField::Compression,
        GatedField::QualityLevel,
        GatedField::AutoTextureScale,
        GatedField::OrigFileXSize,
        GatedField::OrigFileYSize,
        GatedField::HasSimpleRamImage,
        GatedField::HasClearColor,
    ];

    /// Table row for this field.
    #[inline]
    pub fn gate(self) -> &'static FieldGate {
        &FIELD_GATES[self as usize]
    }

    /// Field name as used by editors.
    #[inline]
    pub fn name(self) -> &'static str {
        self.gate().name
    }

    /// Version that introduced this field.
    #[inline]
    pub fn since(self) -> BamVersion {
        self.gate().since
    }

    /// Look up a gated field by name.
    pub fn from_name(name: &str) -> Option<Self> {
        FIELD_GATES.iter().find(|g| g.name == name).map(|g| g.field)
    }
}

/// True if `field` exists in records laid out for `version`.
#[inline]
pub fn present(field: GatedField, version: BamVersion) -> bool {
    version.at_least(field.since())
}

/// Fields that `version` cannot represent.
pub fn absent_fields(version: BamVersion) -> impl Iterator<Item = GatedField> {
    GatedField::ALL.into_iter().filter(move |f| !present(*f, version))
}

/// Types a [`GateDefault`] can be converted into.
pub trait GateValue: Sized {
    fn from_gate_default(default: GateDefault) -> Option<Self>;
}

impl GateValue for u8 {
    fn from_gate_default(default: GateDefault) -> Option<Self> {
        match default {
            GateDefault::U8(v) => Some(v),
            _ => None,
        }
    }
}

impl GateValue for u32 {
    fn from_gate_default(default: GateDefault) -> Option<Self> {
        match default {
            GateDefault::U32(v) => Some(v),
            _ => None,
        }
    }
}

impl GateValue for bool {
    fn from_gate_default(default: GateDefault) -> Option<Self> {
        match default {
            GateDefault::Bool(v) => Some(v),
            _ => None,
        }
    }
}

impl GateValue for f64 {
    fn from_gate_default(default: GateDefault) -> Option<Self> {
        match default {
            GateDefault::Float(v) => Some(v),
            _ => None,
        }
    }
}

impl GateValue for StdFloat {
    fn from_gate_default(default: GateDefault) -> Option<Self> {
        f64::from_gate_default(default).map(StdFloat::from)
    }
}

macro_rules! gate_value_for_code {
    ($($ty:ty),*) => {
        $(impl GateValue for $ty {
            fn from_gate_default(default: GateDefault) -> Option<Self> {
                u8::from_gate_default(default).map(<$ty>::from)
            }
        })*
    };
}

gate_value_for_code!(CompressionMode, QualityLevel, AutoTextureScale);

/// Absent-case value of `field`.
///
/// Falls back to `T::default()` if the table row holds another type; the
/// table tests keep every row consistent with its record field.
pub fn default_of<T: GateValue + Default>(field: GatedField) -> T {
    T::from_gate_default(field.gate().default).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_matches_enum() {
        for (i, field) in GatedField::ALL.iter().enumerate() {
            assert_eq!(FIELD_GATES[i].field, *field);
            assert_eq!(field.gate().field, *field);
        }
    }

    #[test]
    fn test_default_types() {
        let u8_fields = [GatedField::PrimaryFileNumChannels, GatedField::AlphaFileChannel];
        for f in u8_fields {
            assert!(u8::from_gate_default(f.gate().default).is_some(), "{:?}", f);
        }
        for f in [GatedField::MinLod, GatedField::MaxLod, GatedField::LodBias] {
            assert!(f64::from_gate_default(f.gate().default).is_some(), "{:?}", f);
        }
        for f in [GatedField::HasReadMipmaps, GatedField::HasSimpleRamImage] {
            assert!(bool::from_gate_default(f.gate().default).is_some(), "{:?}", f);
        }
        for f in [GatedField::OrigFileXSize, GatedField::OrigFileYSize] {
            assert!(u32::from_gate_default(f.gate().default).is_some(), "{:?}", f);
        }
        let d = |f: GatedField| f.gate().default;
        assert!(CompressionMode::from_gate_default(d(GatedField::Compression)).is_some());
        assert!(QualityLevel::from_gate_default(d(GatedField::QualityLevel)).is_some());
        assert!(AutoTextureScale::from_gate_default(d(GatedField::AutoTextureScale)).is_some());
        assert_eq!(d(GatedField::HasClearColor), GateDefault::Absent);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(default_of::<f64>(GatedField::MinLod), -1000.0);
        assert_eq!(default_of::<f64>(GatedField::MaxLod), 1000.0);
        assert_eq!(default_of::<f64>(GatedField::LodBias), 0.0);
        assert_eq!(default_of::<StdFloat>(GatedField::MinLod), -1000.0);
        assert_eq!(
            default_of::<AutoTextureScale>(GatedField::AutoTextureScale),
            AutoTextureScale::UNSPECIFIED
        );
        assert!(!default_of::<bool>(GatedField::HasReadMipmaps));
    }

    #[test]
    fn test_present() {
        let v = BamVersion::new;
        assert!(!present(GatedField::PrimaryFileNumChannels, v(4, 1)));
        assert!(present(GatedField::PrimaryFileNumChannels, v(4, 2)));
        assert!(present(GatedField::AlphaFileChannel, v(5, 0)));
        assert!(!present(GatedField::HasClearColor, v(6, 44)));
        assert!(present(GatedField::HasClearColor, v(6, 45)));
        assert!(present(GatedField::Compression, v(7, 0)));
    }

    #[test]
    fn test_absent_fields() {
        assert_eq!(absent_fields(BamVersion::new(6, 45)).count(), 0);
        assert_eq!(absent_fields(BamVersion::new(4, 0)).count(), GatedField::ALL.len());
        let missing: Vec<_> = absent_fields(BamVersion::new(6, 30)).collect();
        assert_eq!(
            missing,
            vec![
                GatedField::HasReadMipmaps,
                GatedField::MinLod,
                GatedField::MaxLod,
                GatedField::LodBias,
                GatedField::HasClearColor
            ]
        );
    }

    #[test]
    fn test_from_name() {
        assert_eq!(GatedField::from_name("lod_bias"), Some(GatedField::LodBias));
        assert_eq!(GatedField::from_name("name"), None);
    }

    #[test]
    fn test_ram_image_group_gate() {
        let group = [
            GatedField::OrigFileXSize,
            GatedField::OrigFileYSize,
            GatedField::HasSimpleRamImage,
        ];
        for f in group {
            assert!(!present(f, BamVersion::new(6, 17)), "{:?}", f);
            assert!(present(f, BamVersion::new(6, 18)), "{:?}", f);
        }
        assert!(absent_fields(BamVersion::new(6, 10)).any(|f| f == GatedField::HasSimpleRamImage));
    }
}
