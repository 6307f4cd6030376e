//! In-memory texture record.

use glam::Vec4;

use crate::core::{BamVersion, StdFloat};

use super::presence::{default_of, present, GatedField};
use super::{
    AutoTextureScale, CompressionMode, FilterType, QualityLevel, TextureFormat, TextureType,
    UsageHint, WrapMode,
};

/// Default sampler settings stored with the texture.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SamplerState {
    pub wrap_u: WrapMode,
    pub wrap_v: WrapMode,
    pub wrap_w: WrapMode,
    pub minfilter: FilterType,
    pub magfilter: FilterType,
    pub anisotropic_degree: i16,
    pub border_color: Vec4,
    /// Std-float; stored since 6.36.
    pub min_lod: StdFloat,
    /// Std-float; stored since 6.36.
    pub max_lod: StdFloat,
    /// Std-float; stored since 6.36.
    pub lod_bias: StdFloat,
}

impl Default for SamplerState {
    fn default() -> Self {
        Self {
            wrap_u: WrapMode::default(),
            wrap_v: WrapMode::default(),
            wrap_w: WrapMode::default(),
            minfilter: FilterType::default(),
            magfilter: FilterType::default(),
            anisotropic_degree: 1,
            border_color: Vec4::new(0.0, 0.0, 0.0, 1.0),
            min_lod: default_of(GatedField::MinLod),
            max_lod: default_of(GatedField::MaxLod),
            lod_bias: default_of(GatedField::LodBias),
        }
    }
}

/// Small preview image embedded in the record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimpleRamImage {
    pub x_size: u32,
    pub y_size: u32,
    pub date_generated: i32,
    /// Pixel bytes, stored with a u32 length prefix.
    pub image: Vec<u8>,
}

/// One decoded `Texture` object.
///
/// Fields a given file version cannot hold are kept at their absent-case
/// defaults (see [`presence`](super::presence)). The trailing `payload`
/// (raw pixel data and anything newer than this codec) is carried
/// verbatim and never interpreted.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextureRecord {
    pub name: String,
    pub filename: String,
    pub alpha_filename: String,
    pub primary_file_num_channels: u8,
    pub alpha_file_channel: u8,
    pub has_rawdata: bool,
    pub texture_type: TextureType,
    pub has_read_mipmaps: bool,
    pub sampler: SamplerState,
    pub compression: CompressionMode,
    pub quality_level: QualityLevel,
    pub tex_format: TextureFormat,
    pub num_components: u8,
    /// Only stored when `texture_type` is a buffer texture.
    pub usage_hint: UsageHint,
    pub auto_texture_scale: AutoTextureScale,
    pub orig_file_x_size: u32,
    pub orig_file_y_size: u32,
    /// `Some` exactly when the `has_simple_ram_image` flag is set.
    pub simple_ram_image: Option<SimpleRamImage>,
    /// `None` when the flag is clear or the version predates it.
    pub clear_color: Option<Vec4>,
    /// Opaque trailing bytes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub payload: Vec<u8>,
}

impl Default for TextureRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            filename: String::new(),
            alpha_filename: String::new(),
            primary_file_num_channels: default_of(GatedField::PrimaryFileNumChannels),
            alpha_file_channel: default_of(GatedField::AlphaFileChannel),
            has_rawdata: false,
            texture_type: TextureType::default(),
            has_read_mipmaps: default_of(GatedField::HasReadMipmaps),
            sampler: SamplerState::default(),
            compression: default_of(GatedField::Compression),
            quality_level: default_of(GatedField::QualityLevel),
            tex_format: TextureFormat::default(),
            num_components: 4,
            usage_hint: UsageHint::default(),
            auto_texture_scale: default_of(GatedField::AutoTextureScale),
            orig_file_x_size: default_of(GatedField::OrigFileXSize),
            orig_file_y_size: default_of(GatedField::OrigFileYSize),
            simple_ram_image: None,
            clear_color: None,
            payload: Vec::new(),
        }
    }
}

impl TextureRecord {
    /// New record with the given name and absent-case defaults elsewhere.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// True for buffer textures, the only type that stores a usage hint.
    #[inline]
    pub fn is_buffer_texture(&self) -> bool {
        self.texture_type == TextureType::BUFFER_TEXTURE
    }

    #[inline]
    pub fn has_simple_ram_image(&self) -> bool {
        self.simple_ram_image.is_some()
    }

    #[inline]
    pub fn has_clear_color(&self) -> bool {
        self.clear_color.is_some()
    }

    /// Label shown in listings: filename, else name.
    pub fn display_name(&self) -> &str {
        if self.filename.is_empty() {
            &self.name
        } else {
            &self.filename
        }
    }

    /// Copy of this record as it would decode after a round trip through
    /// `version`: fields the version cannot store reset to their defaults,
    /// and a non-buffer texture's usage hint reset to unspecified.
    pub fn defaulted_for(&self, version: BamVersion) -> Self {
        let mut out = self.clone();
        let absent = |f: GatedField| !present(f, version);

        if absent(GatedField::PrimaryFileNumChannels) {
            out.primary_file_num_channels = default_of(GatedField::PrimaryFileNumChannels);
        }
        if absent(GatedField::AlphaFileChannel) {
            out.alpha_file_channel = default_of(GatedField::AlphaFileChannel);
        }
        if absent(GatedField::HasReadMipmaps) {
            out.has_read_mipmaps = default_of(GatedField::HasReadMipmaps);
        }
        if absent(GatedField::MinLod) {
            out.sampler.min_lod = default_of(GatedField::MinLod);
        }
        if absent(GatedField::MaxLod) {
            out.sampler.max_lod = default_of(GatedField::MaxLod);
        }
        if absent(GatedField::LodBias) {
            out.sampler.lod_bias = default_of(GatedField::LodBias);
        }
        if absent(GatedField::Compression) {
            out.compression = default_of(GatedField::Compression);
        }
        if absent(GatedField::QualityLevel) {
            out.quality_level = default_of(GatedField::QualityLevel);
        }
        if !out.is_buffer_texture() {
            out.usage_hint = UsageHint::default();
        }
        if absent(GatedField::AutoTextureScale) {
            out.auto_texture_scale = default_of(GatedField::AutoTextureScale);
        }
        if absent(GatedField::OrigFileXSize) {
            out.orig_file_x_size = default_of(GatedField::OrigFileXSize);
        }
        if absent(GatedField::OrigFileYSize) {
            out.orig_file_y_size = default_of(GatedField::OrigFileYSize);
        }
        if absent(GatedField::HasSimpleRamImage) {
            out.simple_ram_image = None;
        }
        if absent(GatedField::HasClearColor) {
            out.clear_color = None;
        }
        out
    }
}
