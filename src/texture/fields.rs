//! Editable field descriptors and name-based access.
//!
//! Editors list texture fields in groups, disable the ones the open file's
//! version cannot store, and parse user text into typed values. Field
//! names are only used here; the codec itself works on struct fields.

use std::fmt;

use glam::Vec4;

use crate::core::{BamVersion, StdFloat};
use crate::util::{parse_hex_argb, to_hex_argb, Error, Result};

use super::presence::{present, GatedField};
use super::{
    AutoTextureScale, CompressionMode, EnumKind, FilterType, QualityLevel, SimpleRamImage,
    TextureFormat, TextureRecord, TextureType, UsageHint, WrapMode,
};

/// Value type of an editable field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    String,
    U8,
    Bool,
    I16,
    U32,
    I32,
    Float,
    Color,
    Blob,
    Enum(EnumKind),
}

/// One editable field.
#[derive(Clone, Copy, Debug)]
pub struct FieldDescriptor {
    pub group: &'static str,
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    /// Version gate, if the field is version-dependent.
    pub gate: Option<GatedField>,
}

impl FieldDescriptor {
    /// Whether files of `version` can store this field.
    pub fn editable_in(&self, version: BamVersion) -> bool {
        self.gate.map_or(true, |g| present(g, version))
    }

    /// Version that introduced the field, if gated.
    pub fn since(&self) -> Option<BamVersion> {
        self.gate.map(GatedField::since)
    }
}

const fn field(
    group: &'static str,
    name: &'static str,
    label: &'static str,
    kind: FieldKind,
    gate: Option<GatedField>,
) -> FieldDescriptor {
    FieldDescriptor { group, name, label, kind, gate }
}

pub const GROUP_GENERAL: &str = "General";
pub const GROUP_UV: &str = "Texture UV";
pub const GROUP_LOD: &str = "LOD";
pub const GROUP_MISC: &str = "Miscellaneous";
pub const GROUP_RAM_IMAGE: &str = "Simple RAM Image";

/// Editable fields, grouped for display.
pub static FIELD_DESCRIPTORS: &[FieldDescriptor] = &[
    field(GROUP_GENERAL, "name", "Texture name", FieldKind::String, None),
    field(GROUP_GENERAL, "filename", "Color filename", FieldKind::String, None),
    field(GROUP_GENERAL, "alpha_filename", "Alpha filename", FieldKind::String, None),
    field(GROUP_GENERAL, "primary_file_num_channels", "Color channels", FieldKind::U8, Some(GatedField::PrimaryFileNumChannels)),
    field(GROUP_GENERAL, "alpha_file_channel", "Alpha file channel", FieldKind::U8, Some(GatedField::AlphaFileChannel)),
    field(GROUP_GENERAL, "texture_type", "Texture type", FieldKind::Enum(EnumKind::TextureType), None),
    field(GROUP_GENERAL, "tex_format", "Texture format", FieldKind::Enum(EnumKind::TextureFormat), None),
    field(GROUP_GENERAL, "num_components", "Number of components", FieldKind::U8, None),
    field(GROUP_GENERAL, "has_rawdata", "Raw data available", FieldKind::Bool, None),
    field(GROUP_GENERAL, "has_read_mipmaps", "Mipmaps read", FieldKind::Bool, Some(GatedField::HasReadMipmaps)),
    field(GROUP_UV, "wrap_u", "Wrap U", FieldKind::Enum(EnumKind::WrapMode), None),
    field(GROUP_UV, "wrap_v", "Wrap V", FieldKind::Enum(EnumKind::WrapMode), None),
    field(GROUP_UV, "wrap_w", "Wrap W", FieldKind::Enum(EnumKind::WrapMode), None),
    field(GROUP_UV, "minfilter", "Minfilter", FieldKind::Enum(EnumKind::FilterType), None),
    field(GROUP_UV, "magfilter", "Magfilter", FieldKind::Enum(EnumKind::FilterType), None),
    field(GROUP_UV, "anisotropic_degree", "Anisotropic degree", FieldKind::I16, None),
    field(GROUP_UV, "border_color", "Border color", FieldKind::Color, None),
    field(GROUP_LOD, "min_lod", "Min LOD", FieldKind::Float, Some(GatedField::MinLod)),
    field(GROUP_LOD, "max_lod", "Max LOD", FieldKind::Float, Some(GatedField::MaxLod)),
    field(GROUP_LOD, "lod_bias", "LOD bias", FieldKind::Float, Some(GatedField::LodBias)),
    field(GROUP_MISC, "compression", "Compression", FieldKind::Enum(EnumKind::CompressionMode), Some(GatedField::Compression)),
    field(GROUP_MISC, "quality_level", "Quality level", FieldKind::Enum(EnumKind::QualityLevel), Some(GatedField::QualityLevel)),
    field(GROUP_MISC, "usage_hint", "Usage hint", FieldKind::Enum(EnumKind::UsageHint), None),
    field(GROUP_MISC, "auto_texture_scale", "Auto texture scale", FieldKind::Enum(EnumKind::AutoTextureScale), Some(GatedField::AutoTextureScale)),
    field(GROUP_MISC, "orig_file_x_size", "Original file's X size", FieldKind::U32, Some(GatedField::OrigFileXSize)),
    field(GROUP_MISC, "orig_file_y_size", "Original file's Y size", FieldKind::U32, Some(GatedField::OrigFileYSize)),
    field(GROUP_RAM_IMAGE, "has_simple_ram_image", "Enabled", FieldKind::Bool, Some(GatedField::HasSimpleRamImage)),
    field(GROUP_RAM_IMAGE, "simple_x_size", "X size", FieldKind::U32, Some(GatedField::HasSimpleRamImage)),
    field(GROUP_RAM_IMAGE, "simple_y_size", "Y size", FieldKind::U32, Some(GatedField::HasSimpleRamImage)),
    field(GROUP_RAM_IMAGE, "simple_image_date_generated", "Date generated", FieldKind::I32, Some(GatedField::HasSimpleRamImage)),
    field(GROUP_RAM_IMAGE, "simple_ram_image", "Image data", FieldKind::Blob, Some(GatedField::HasSimpleRamImage)),
    field(GROUP_RAM_IMAGE, "has_clear_color", "Clear color enabled", FieldKind::Bool, Some(GatedField::HasClearColor)),
    field(GROUP_RAM_IMAGE, "clear_color", "Clear color", FieldKind::Color, Some(GatedField::HasClearColor)),
];

/// Group names in display order.
pub const FIELD_GROUPS: [&str; 5] = [GROUP_GENERAL, GROUP_UV, GROUP_LOD, GROUP_MISC, GROUP_RAM_IMAGE];

/// Look up a descriptor by field name.
pub fn descriptor(name: &str) -> Option<&'static FieldDescriptor> {
    FIELD_DESCRIPTORS.iter().find(|d| d.name == name)
}

/// Descriptors of one group, in display order.
pub fn group_fields(group: &str) -> impl Iterator<Item = &'static FieldDescriptor> + '_ {
    FIELD_DESCRIPTORS.iter().filter(move |d| d.group == group)
}

/// A typed field value.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Str(String),
    U8(u8),
    Bool(bool),
    I16(i16),
    U32(u32),
    I32(i32),
    Float(f64),
    Color(Vec4),
    Blob(Vec<u8>),
    Enum { kind: EnumKind, code: u8 },
    /// Field belongs to a group that is switched off.
    Absent,
}

impl FieldValue {
    /// Parse user text for a field of the given kind.
    ///
    /// Integers are range-checked against their stored width. Enum fields
    /// take a label or any numeric code.
    pub fn parse(name: &str, kind: FieldKind, text: &str) -> Result<Self> {
        let t = text.trim();
        let bad = |reason: String| Error::invalid_value(name, reason);
        let int = |min: i64, max: i64| -> Result<i64> {
            let v: i64 = t.parse().map_err(|_| bad(format!("'{}' is not an integer", t)))?;
            if v < min || v > max {
                return Err(bad(format!("{} is out of bounds [{}, {}]", v, min, max)));
            }
            Ok(v)
        };

        let value = match kind {
            FieldKind::String => FieldValue::Str(text.to_string()),
            FieldKind::U8 => FieldValue::U8(int(0, u8::MAX as i64)? as u8),
            FieldKind::I16 => FieldValue::I16(int(i16::MIN as i64, i16::MAX as i64)? as i16),
            FieldKind::U32 => FieldValue::U32(int(0, u32::MAX as i64)? as u32),
            FieldKind::I32 => FieldValue::I32(int(i32::MIN as i64, i32::MAX as i64)? as i32),
            FieldKind::Float => FieldValue::Float(
                t.parse::<f64>()
                    .map_err(|_| bad(format!("'{}' is not a number", t)))?,
            ),
            FieldKind::Bool => match t.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" | "enabled" => FieldValue::Bool(true),
                "0" | "false" | "no" | "off" | "disabled" => FieldValue::Bool(false),
                _ => return Err(bad(format!("'{}' is not a boolean", t))),
            },
            FieldKind::Color => FieldValue::Color(
                parse_hex_argb(t).ok_or_else(|| bad(format!("'{}' is not #AARRGGBB", t)))?,
            ),
            FieldKind::Enum(kind) => {
                let code = match t.parse::<u8>() {
                    Ok(code) => code,
                    Err(_) => kind
                        .code_of(t)
                        .ok_or_else(|| bad(format!("unknown label '{}'", t)))?,
                };
                FieldValue::Enum { kind, code }
            }
            FieldKind::Blob => return Err(bad("binary data cannot be set from text".into())),
        };
        Ok(value)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Str(s) => write!(f, "{:?}", s),
            FieldValue::U8(v) => write!(f, "{}", v),
            FieldValue::Bool(v) => f.write_str(if *v { "Enabled" } else { "Disabled" }),
            FieldValue::I16(v) => write!(f, "{}", v),
            FieldValue::U32(v) => write!(f, "{}", v),
            FieldValue::I32(v) => write!(f, "{}", v),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Color(c) => f.write_str(&to_hex_argb(*c)),
            FieldValue::Blob(b) => write!(f, "<{} bytes>", b.len()),
            FieldValue::Enum { kind, code } => match kind.label(*code) {
                Some(label) => write!(f, "{} ({})", label, code),
                None => write!(f, "Unknown ({})", code),
            },
            FieldValue::Absent => f.write_str("-"),
        }
    }
}

fn mismatch(name: &str, value: &FieldValue) -> Error {
    Error::invalid_value(name, format!("unexpected value {:?}", value))
}

impl TextureRecord {
    /// Current value of a field by name.
    pub fn field(&self, name: &str) -> Result<FieldValue> {
        use FieldValue as V;
        let s = &self.sampler;
        let img = self.simple_ram_image.as_ref();
        let en = |kind, code| V::Enum { kind, code };

        let value = match name {
            "name" => V::Str(self.name.clone()),
            "filename" => V::Str(self.filename.clone()),
            "alpha_filename" => V::Str(self.alpha_filename.clone()),
            "primary_file_num_channels" => V::U8(self.primary_file_num_channels),
            "alpha_file_channel" => V::U8(self.alpha_file_channel),
            "texture_type" => en(EnumKind::TextureType, self.texture_type.code()),
            "tex_format" => en(EnumKind::TextureFormat, self.tex_format.code()),
            "num_components" => V::U8(self.num_components),
            "has_rawdata" => V::Bool(self.has_rawdata),
            "has_read_mipmaps" => V::Bool(self.has_read_mipmaps),
            "wrap_u" => en(EnumKind::WrapMode, s.wrap_u.code()),
            "wrap_v" => en(EnumKind::WrapMode, s.wrap_v.code()),
            "wrap_w" => en(EnumKind::WrapMode, s.wrap_w.code()),
            "minfilter" => en(EnumKind::FilterType, s.minfilter.code()),
            "magfilter" => en(EnumKind::FilterType, s.magfilter.code()),
            "anisotropic_degree" => V::I16(s.anisotropic_degree),
            "border_color" => V::Color(s.border_color),
            "min_lod" => V::Float(s.min_lod.get()),
            "max_lod" => V::Float(s.max_lod.get()),
            "lod_bias" => V::Float(s.lod_bias.get()),
            "compression" => en(EnumKind::CompressionMode, self.compression.code()),
            "quality_level" => en(EnumKind::QualityLevel, self.quality_level.code()),
            "usage_hint" => en(EnumKind::UsageHint, self.usage_hint.code()),
            "auto_texture_scale" => en(EnumKind::AutoTextureScale, self.auto_texture_scale.code()),
            "orig_file_x_size" => V::U32(self.orig_file_x_size),
            "orig_file_y_size" => V::U32(self.orig_file_y_size),
            "has_simple_ram_image" => V::Bool(img.is_some()),
            "simple_x_size" => img.map_or(V::Absent, |i| V::U32(i.x_size)),
            "simple_y_size" => img.map_or(V::Absent, |i| V::U32(i.y_size)),
            "simple_image_date_generated" => img.map_or(V::Absent, |i| V::I32(i.date_generated)),
            "simple_ram_image" => img.map_or(V::Absent, |i| V::Blob(i.image.clone())),
            "has_clear_color" => V::Bool(self.clear_color.is_some()),
            "clear_color" => self.clear_color.map_or(V::Absent, V::Color),
            _ => return Err(Error::UnknownField(name.to_string())),
        };
        Ok(value)
    }

    /// Set a field by name.
    ///
    /// Setting a member of the simple RAM image or clear color group turns
    /// that group on; setting its flag to false drops the group.
    pub fn set_field(&mut self, name: &str, value: FieldValue) -> Result<()> {
        use FieldValue as V;
        let desc = descriptor(name).ok_or_else(|| Error::UnknownField(name.to_string()))?;

        if let (FieldKind::Enum(expected), V::Enum { kind, .. }) = (desc.kind, &value) {
            if expected != *kind {
                return Err(mismatch(name, &value));
            }
        }

        let s = &mut self.sampler;
        match (name, value) {
            ("name", V::Str(v)) => self.name = v,
            ("filename", V::Str(v)) => self.filename = v,
            ("alpha_filename", V::Str(v)) => self.alpha_filename = v,
            ("primary_file_num_channels", V::U8(v)) => self.primary_file_num_channels = v,
            ("alpha_file_channel", V::U8(v)) => self.alpha_file_channel = v,
            ("texture_type", V::Enum { code, .. }) => self.texture_type = TextureType(code),
            ("tex_format", V::Enum { code, .. }) => self.tex_format = TextureFormat(code),
            ("num_components", V::U8(v)) => self.num_components = v,
            ("has_rawdata", V::Bool(v)) => self.has_rawdata = v,
            ("has_read_mipmaps", V::Bool(v)) => self.has_read_mipmaps = v,
            ("wrap_u", V::Enum { code, .. }) => s.wrap_u = WrapMode(code),
            ("wrap_v", V::Enum { code, .. }) => s.wrap_v = WrapMode(code),
            ("wrap_w", V::Enum { code, .. }) => s.wrap_w = WrapMode(code),
            ("minfilter", V::Enum { code, .. }) => s.minfilter = FilterType(code),
            ("magfilter", V::Enum { code, .. }) => s.magfilter = FilterType(code),
            ("anisotropic_degree", V::I16(v)) => s.anisotropic_degree = v,
            ("border_color", V::Color(v)) => s.border_color = v,
            ("min_lod", V::Float(v)) => s.min_lod = StdFloat::from(v),
            ("max_lod", V::Float(v)) => s.max_lod = StdFloat::from(v),
            ("lod_bias", V::Float(v)) => s.lod_bias = StdFloat::from(v),
            ("compression", V::Enum { code, .. }) => self.compression = CompressionMode(code),
            ("quality_level", V::Enum { code, .. }) => self.quality_level = QualityLevel(code),
            ("usage_hint", V::Enum { code, .. }) => self.usage_hint = UsageHint(code),
            ("auto_texture_scale", V::Enum { code, .. }) => {
                self.auto_texture_scale = AutoTextureScale(code)
            }
            ("orig_file_x_size", V::U32(v)) => self.orig_file_x_size = v,
            ("orig_file_y_size", V::U32(v)) => self.orig_file_y_size = v,
            ("has_simple_ram_image", V::Bool(on)) => {
                if !on {
                    self.simple_ram_image = None;
                } else if self.simple_ram_image.is_none() {
                    self.simple_ram_image = Some(SimpleRamImage::default());
                }
            }
            ("simple_x_size", V::U32(v)) => self.ram_image_mut().x_size = v,
            ("simple_y_size", V::U32(v)) => self.ram_image_mut().y_size = v,
            ("simple_image_date_generated", V::I32(v)) => self.ram_image_mut().date_generated = v,
            ("simple_ram_image", V::Blob(v)) => self.ram_image_mut().image = v,
            ("has_clear_color", V::Bool(on)) => {
                if !on {
                    self.clear_color = None;
                } else if self.clear_color.is_none() {
                    self.clear_color = Some(Vec4::ZERO);
                }
            }
            ("clear_color", V::Color(v)) => self.clear_color = Some(v),
            (name, value) => return Err(mismatch(name, &value)),
        }
        Ok(())
    }

    /// Parse `text` for the named field and set it.
    pub fn set_field_text(&mut self, name: &str, text: &str) -> Result<()> {
        let desc = descriptor(name).ok_or_else(|| Error::UnknownField(name.to_string()))?;
        let value = FieldValue::parse(name, desc.kind, text)?;
        self.set_field(name, value)
    }

    fn ram_image_mut(&mut self) -> &mut SimpleRamImage {
        self.simple_ram_image.get_or_insert_with(SimpleRamImage::default)
    }
}
