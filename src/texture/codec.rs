//! Version-gated decode / encode for texture records.
//!
//! Field order never changes between versions; a gate only removes a
//! field from the stream. Layout, in order:
//!
//! ```text
//! name, filename, alpha_filename         string
//! primary_file_num_channels              u8        >= 4.2
//! alpha_file_channel                     u8        >= 4.3
//! has_rawdata                            bool
//! texture_type                           u8
//! has_read_mipmaps                       bool      >= 6.32
//! wrap_u, wrap_v, wrap_w                 u8
//! minfilter, magfilter                   u8
//! anisotropic_degree                     i16
//! border_color                           vec4
//! min_lod, max_lod, lod_bias             stdfloat  >= 6.36
//! compression                            u8        >= 6.1
//! quality_level                          u8        >= 6.16
//! tex_format, num_components             u8
//! usage_hint                             u8        buffer textures only
//! auto_texture_scale                     u8        >= 6.28
//! orig_file_x_size, orig_file_y_size     u32       >= 6.18
//! has_simple_ram_image                   bool      >= 6.18
//!   simple_x_size, simple_y_size         u32       if flag
//!   simple_image_date_generated          i32       if flag
//!   simple_ram_image                     blob32    if flag
//! has_clear_color                        bool      >= 6.45
//!   clear_color                          vec4      if flag
//! payload                                rest of record
//! ```

use std::any::Any;

use crate::bam::{PrimitiveReader, PrimitiveWriter};
use crate::core::{BamObject, BamObjectType, BamVersion};
use crate::util::Result;

use super::presence::{default_of, present, GateValue, GatedField};
use super::{
    AutoTextureScale, CompressionMode, FilterType, QualityLevel, SamplerState, SimpleRamImage,
    TextureFormat, TextureRecord, TextureType, UsageHint, WrapMode,
};

/// Type tag the texture codec is registered under.
pub const TEXTURE_TYPE_NAME: &str = "Texture";

/// Read a gated field, or produce its default without consuming bytes.
fn read_gated<R, T>(
    src: &mut R,
    version: BamVersion,
    field: GatedField,
    read: impl FnOnce(&mut R) -> Result<T>,
) -> Result<T>
where
    R: PrimitiveReader + ?Sized,
    T: GateValue + Default,
{
    if present(field, version) {
        read(src)
    } else {
        Ok(default_of(field))
    }
}

impl TextureRecord {
    /// Decode one record laid out for `version`.
    ///
    /// `src` must be bounded to this record: everything left after the
    /// modeled fields becomes the opaque payload.
    pub fn decode<R: PrimitiveReader + ?Sized>(src: &mut R, version: BamVersion) -> Result<Self> {
        let name = src.get_string()?;
        let filename = src.get_string()?;
        let alpha_filename = src.get_string()?;

        let primary_file_num_channels =
            read_gated(src, version, GatedField::PrimaryFileNumChannels, |s| s.get_u8())?;
        let alpha_file_channel =
            read_gated(src, version, GatedField::AlphaFileChannel, |s| s.get_u8())?;

        let has_rawdata = src.get_bool()?;
        let texture_type = TextureType(src.get_u8()?);

        let has_read_mipmaps =
            read_gated(src, version, GatedField::HasReadMipmaps, |s| s.get_bool())?;

        let sampler = Self::decode_sampler(src, version)?;

        let compression = read_gated(src, version, GatedField::Compression, |s| {
            s.get_u8().map(CompressionMode)
        })?;
        let quality_level = read_gated(src, version, GatedField::QualityLevel, |s| {
            s.get_u8().map(QualityLevel)
        })?;

        let tex_format = TextureFormat(src.get_u8()?);
        let num_components = src.get_u8()?;

        // Gated on the decoded type, not on the version.
        let usage_hint = if texture_type == TextureType::BUFFER_TEXTURE {
            UsageHint(src.get_u8()?)
        } else {
            UsageHint::default()
        };

        let auto_texture_scale = read_gated(src, version, GatedField::AutoTextureScale, |s| {
            s.get_u8().map(AutoTextureScale)
        })?;

        let orig_file_x_size =
            read_gated(src, version, GatedField::OrigFileXSize, |s| s.get_u32())?;
        let orig_file_y_size =
            read_gated(src, version, GatedField::OrigFileYSize, |s| s.get_u32())?;

        let has_simple_ram_image =
            read_gated(src, version, GatedField::HasSimpleRamImage, |s| s.get_bool())?;
        let simple_ram_image = if has_simple_ram_image {
            Some(SimpleRamImage {
                x_size: src.get_u32()?,
                y_size: src.get_u32()?,
                date_generated: src.get_i32()?,
                image: src.get_blob32()?,
            })
        } else {
            None
        };

        let clear_color = if present(GatedField::HasClearColor, version) && src.get_bool()? {
            Some(src.get_vec4()?)
        } else {
            None
        };

        let remaining = src.remaining_size();
        let payload = src.extract_bytes(remaining)?;

        tracing::debug!(
            name = %name,
            %version,
            texture_type = %texture_type,
            payload_len = payload.len(),
            "decoded texture record"
        );

        Ok(Self {
            name,
            filename,
            alpha_filename,
            primary_file_num_channels,
            alpha_file_channel,
            has_rawdata,
            texture_type,
            has_read_mipmaps,
            sampler,
            compression,
            quality_level,
            tex_format,
            num_components,
            usage_hint,
            auto_texture_scale,
            orig_file_x_size,
            orig_file_y_size,
            simple_ram_image,
            clear_color,
            payload,
        })
    }

    fn decode_sampler<R: PrimitiveReader + ?Sized>(
        src: &mut R,
        version: BamVersion,
    ) -> Result<SamplerState> {
        let wrap_u = WrapMode(src.get_u8()?);
        let wrap_v = WrapMode(src.get_u8()?);
        let wrap_w = WrapMode(src.get_u8()?);
        let minfilter = FilterType(src.get_u8()?);
        let magfilter = FilterType(src.get_u8()?);
        let anisotropic_degree = src.get_i16()?;
        let border_color = src.get_vec4()?;

        let min_lod = read_gated(src, version, GatedField::MinLod, |s| s.get_stdfloat())?;
        let max_lod = read_gated(src, version, GatedField::MaxLod, |s| s.get_stdfloat())?;
        let lod_bias = read_gated(src, version, GatedField::LodBias, |s| s.get_stdfloat())?;

        Ok(SamplerState {
            wrap_u,
            wrap_v,
            wrap_w,
            minfilter,
            magfilter,
            anisotropic_degree,
            border_color,
            min_lod,
            max_lod,
            lod_bias,
        })
    }

    /// Encode this record laid out for `version`.
    ///
    /// Fields `version` cannot hold are dropped; fields it can hold are
    /// written from the current values, whatever version the record was
    /// decoded from.
    pub fn encode<W: PrimitiveWriter + ?Sized>(&self, version: BamVersion, dg: &mut W) -> Result<()> {
        let has = |field| present(field, version);

        dg.add_string(&self.name)?;
        dg.add_string(&self.filename)?;
        dg.add_string(&self.alpha_filename)?;

        if has(GatedField::PrimaryFileNumChannels) {
            dg.add_u8(self.primary_file_num_channels)?;
        }
        if has(GatedField::AlphaFileChannel) {
            dg.add_u8(self.alpha_file_channel)?;
        }

        dg.add_bool(self.has_rawdata)?;
        dg.add_u8(self.texture_type.code())?;

        if has(GatedField::HasReadMipmaps) {
            dg.add_bool(self.has_read_mipmaps)?;
        }

        self.encode_sampler(version, dg)?;

        if has(GatedField::Compression) {
            dg.add_u8(self.compression.code())?;
        }
        if has(GatedField::QualityLevel) {
            dg.add_u8(self.quality_level.code())?;
        }

        dg.add_u8(self.tex_format.code())?;
        dg.add_u8(self.num_components)?;

        if self.is_buffer_texture() {
            dg.add_u8(self.usage_hint.code())?;
        }

        if has(GatedField::AutoTextureScale) {
            dg.add_u8(self.auto_texture_scale.code())?;
        }
        if has(GatedField::OrigFileXSize) {
            dg.add_u32(self.orig_file_x_size)?;
        }
        if has(GatedField::OrigFileYSize) {
            dg.add_u32(self.orig_file_y_size)?;
        }

        if has(GatedField::HasSimpleRamImage) {
            dg.add_bool(self.simple_ram_image.is_some())?;
            if let Some(img) = &self.simple_ram_image {
                dg.add_u32(img.x_size)?;
                dg.add_u32(img.y_size)?;
                dg.add_i32(img.date_generated)?;
                dg.add_blob32(&img.image)?;
            }
        }

        if has(GatedField::HasClearColor) {
            dg.add_bool(self.clear_color.is_some())?;
            if let Some(color) = self.clear_color {
                dg.add_vec4(color)?;
            }
        }

        dg.append_data(&self.payload)?;

        tracing::trace!(name = %self.name, %version, "encoded texture record");
        Ok(())
    }

    fn encode_sampler<W: PrimitiveWriter + ?Sized>(&self, version: BamVersion, dg: &mut W) -> Result<()> {
        let s = &self.sampler;
        dg.add_u8(s.wrap_u.code())?;
        dg.add_u8(s.wrap_v.code())?;
        dg.add_u8(s.wrap_w.code())?;
        dg.add_u8(s.minfilter.code())?;
        dg.add_u8(s.magfilter.code())?;
        dg.add_i16(s.anisotropic_degree)?;
        dg.add_vec4(s.border_color)?;

        if present(GatedField::MinLod, version) {
            dg.add_stdfloat(s.min_lod)?;
        }
        if present(GatedField::MaxLod, version) {
            dg.add_stdfloat(s.max_lod)?;
        }
        if present(GatedField::LodBias, version) {
            dg.add_stdfloat(s.lod_bias)?;
        }
        Ok(())
    }
}

impl BamObject for TextureRecord {
    fn type_name(&self) -> &'static str {
        TEXTURE_TYPE_NAME
    }

    fn write(&self, version: BamVersion, dg: &mut dyn PrimitiveWriter) -> Result<()> {
        self.encode(version, dg)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl BamObjectType for TextureRecord {
    const TYPE_NAME: &'static str = TEXTURE_TYPE_NAME;

    fn read(src: &mut dyn PrimitiveReader, version: BamVersion) -> Result<Self> {
        Self::decode(src, version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bam::{Datagram, DatagramIterator};
    use crate::core::{FileConfig, FloatWidth, StdFloat};
    use crate::util::Error;
    use glam::Vec4;

    const V4_0: BamVersion = BamVersion::new(4, 0);
    const V6_40: BamVersion = BamVersion::new(6, 40);
    const V6_45: BamVersion = BamVersion::new(6, 45);

    fn sample_record() -> TextureRecord {
        let mut tex = TextureRecord::new("brick");
        tex.filename = "maps/brick.png".into();
        tex.alpha_filename = "maps/brick_a.png".into();
        tex.primary_file_num_channels = 3;
        tex.alpha_file_channel = 1;
        tex.has_rawdata = true;
        tex.texture_type = TextureType::TEXTURE_3D;
        tex.has_read_mipmaps = true;
        tex.sampler.wrap_u = WrapMode::CLAMP;
        tex.sampler.wrap_v = WrapMode::MIRROR;
        tex.sampler.minfilter = FilterType::MIPMAP_TRILINEAR;
        tex.sampler.magfilter = FilterType::LINEAR;
        tex.sampler.anisotropic_degree = 8;
        tex.sampler.border_color = Vec4::new(0.25, 0.5, 0.75, 1.0);
        tex.sampler.min_lod = StdFloat::from(-4.0);
        tex.sampler.max_lod = StdFloat::from(12.0);
        tex.sampler.lod_bias = StdFloat::from(0.5);
        tex.compression = CompressionMode::DXT5;
        tex.quality_level = QualityLevel::BEST;
        tex.tex_format = TextureFormat::SRGB_ALPHA;
        tex.auto_texture_scale = AutoTextureScale::PAD;
        tex.orig_file_x_size = 512;
        tex.orig_file_y_size = 256;
        tex.simple_ram_image = Some(SimpleRamImage {
            x_size: 4,
            y_size: 4,
            date_generated: 1_600_000_000,
            image: (0..64).collect(),
        });
        tex.payload = vec![0xde, 0xad, 0xbe, 0xef];
        tex
    }

    fn encode(tex: &TextureRecord, version: BamVersion) -> Vec<u8> {
        let mut dg = Datagram::new();
        tex.encode(version, &mut dg).unwrap();
        dg.into_inner().unwrap()
    }

    fn decode(bytes: &[u8], version: BamVersion) -> TextureRecord {
        let mut di = DatagramIterator::new(bytes);
        TextureRecord::decode(&mut di, version).unwrap()
    }

    #[test]
    fn test_roundtrip_across_versions() {
        let tex = sample_record();
        for (major, minor) in [(4, 0), (4, 2), (4, 3), (6, 1), (6, 16), (6, 18), (6, 28), (6, 32), (6, 36), (6, 44), (6, 45)] {
            let version = BamVersion::new(major, minor);
            let expected = tex.defaulted_for(version);
            let bytes = encode(&expected, version);
            assert_eq!(decode(&bytes, version), expected, "version {}", version);
        }
    }

    #[test]
    fn test_clear_color_roundtrip() {
        let mut tex = sample_record();
        tex.clear_color = Some(Vec4::new(1.0, 0.0, 0.0, 0.5));
        let bytes = encode(&tex, V6_45);
        assert_eq!(decode(&bytes, V6_45), tex);

        tex.clear_color = None;
        let bytes = encode(&tex, V6_45);
        assert_eq!(decode(&bytes, V6_45).clear_color, None);
    }

    #[test]
    fn test_clear_color_absent_below_threshold() {
        let mut tex = sample_record();
        tex.clear_color = Some(Vec4::ONE);
        let at_44 = encode(&tex, BamVersion::new(6, 44));
        let mut without = tex.clone();
        without.clear_color = None;
        let at_45 = encode(&without, V6_45);
        // Flag byte only exists from 6.45.
        assert_eq!(at_45.len(), at_44.len() + 1);
        assert_eq!(decode(&at_44, BamVersion::new(6, 44)).clear_color, None);
    }

    #[test]
    fn test_gate_consumes_field_bytes() {
        // Same bytes, read as 4.2 and 4.3: alpha_file_channel appears at 4.3.
        let mut tex = TextureRecord::new("a");
        tex.alpha_file_channel = 7;
        tex.payload.clear();
        let bytes = encode(&tex, BamVersion::new(4, 3));

        let newer = decode(&bytes, BamVersion::new(4, 3));
        assert_eq!(newer.alpha_file_channel, 7);
        assert!(newer.payload.is_empty());

        let older = decode(&bytes, BamVersion::new(4, 2));
        assert_eq!(older.alpha_file_channel, 0);
        // One fewer modeled byte, so one more byte lands in the payload.
        assert_eq!(older.payload.len(), 1);
    }

    #[test]
    fn test_usage_hint_depends_on_type() {
        let mut tex = TextureRecord::new("buf");
        tex.usage_hint = UsageHint::DYNAMIC;

        tex.texture_type = TextureType::TEXTURE_2D;
        let plain = encode(&tex, V4_0);
        tex.texture_type = TextureType::BUFFER_TEXTURE;
        let buffer = encode(&tex, V4_0);
        assert_eq!(buffer.len(), plain.len() + 1);

        let decoded = decode(&buffer, V4_0);
        assert_eq!(decoded.usage_hint, UsageHint::DYNAMIC);
        assert!(decoded.payload.is_empty());

        let buffer_new = encode(&tex, V6_45);
        assert_eq!(decode(&buffer_new, V6_45).usage_hint, UsageHint::DYNAMIC);
    }

    #[test]
    fn test_unknown_enum_codes_roundtrip() {
        let mut tex = TextureRecord::new("future");
        tex.texture_type = TextureType(99);
        tex.tex_format = TextureFormat(250);
        tex.sampler.wrap_w = WrapMode(17);
        tex.compression = CompressionMode(200);
        tex.auto_texture_scale = AutoTextureScale(77);
        let bytes = encode(&tex, V6_45);
        let decoded = decode(&bytes, V6_45);
        assert_eq!(decoded, tex);
        assert_eq!(encode(&decoded, V6_45), bytes);
    }

    #[test]
    fn test_payload_fidelity() {
        let mut tex = sample_record();
        tex.payload = (0..5000u32).map(|i| (i * 31 % 251) as u8).collect();
        let bytes = encode(&tex, V6_45);
        assert_eq!(&bytes[bytes.len() - 5000..], tex.payload.as_slice());
        assert_eq!(decode(&bytes, V6_45), tex);

        tex.payload.clear();
        let bytes = encode(&tex, V6_45);
        assert_eq!(decode(&bytes, V6_45), tex);
    }

    #[test]
    fn test_downgrade_drops_fields() {
        let tex = sample_record();
        let decoded = decode(&encode(&tex, V6_40), V6_40);
        assert!(decoded.has_simple_ram_image());

        let old = encode(&decoded, V4_0);
        // strings, has_rawdata, texture_type, 5 sampler bytes, i16, vec4,
        // tex_format, num_components, payload
        let strings = 2 + 5 + 2 + 14 + 2 + 16;
        let expected_len = strings + 1 + 1 + 5 + 2 + 16 + 1 + 1 + tex.payload.len();
        assert_eq!(old.len(), expected_len);

        let back = decode(&old, V4_0);
        assert_eq!(back.name, "brick");
        assert_eq!(back.filename, "maps/brick.png");
        assert_eq!(back.sampler.wrap_u, WrapMode::CLAMP);
        assert_eq!(back.sampler.magfilter, FilterType::LINEAR);
        assert_eq!(back.sampler.border_color, tex.sampler.border_color);
        assert_eq!(back.payload, tex.payload);
        assert_eq!(back.alpha_file_channel, 0);
        assert!(!back.has_read_mipmaps);
        assert_eq!(back.compression, CompressionMode::DEFAULT);
        assert_eq!(back.quality_level, QualityLevel::UNSPECIFIED);
        assert_eq!(back.auto_texture_scale, AutoTextureScale::UNSPECIFIED);
        assert!(back.simple_ram_image.is_none());
        assert!(back.clear_color.is_none());
    }

    #[test]
    fn test_upgrade_writes_current_values() {
        let tex = sample_record().defaulted_for(V4_0);
        let bytes = encode(&tex, V6_45);
        let decoded = decode(&bytes, V6_45);
        assert_eq!(decoded.sampler.min_lod, -1000.0);
        assert_eq!(decoded.auto_texture_scale, AutoTextureScale::UNSPECIFIED);
        assert_eq!(decoded, tex);
    }

    #[test]
    fn test_truncated_record() {
        let bytes = encode(&sample_record(), V6_45);
        let cut = &bytes[..20];
        let mut di = DatagramIterator::new(cut);
        let err = TextureRecord::decode(&mut di, V6_45).unwrap_err();
        assert!(matches!(err, Error::TruncatedRecord { .. }));
    }

    #[test]
    fn test_malformed_ram_image_length() {
        let mut tex = sample_record();
        tex.payload.clear();
        tex.clear_color = None;
        let mut bytes = encode(&tex, V6_40);
        // Blob prefix sits right before the 64 image bytes at the end.
        let prefix_at = bytes.len() - 64 - 4;
        bytes[prefix_at..prefix_at + 4].copy_from_slice(&1000u32.to_le_bytes());
        let mut di = DatagramIterator::new(&bytes);
        let err = TextureRecord::decode(&mut di, V6_40).unwrap_err();
        assert!(matches!(err, Error::MalformedLength { declared: 1000, available: 64, .. }));
    }

    #[test]
    fn test_overlong_name_prefix() {
        let data = [50, 0, b'a', b'b', b'c'];
        let mut di = DatagramIterator::new(&data);
        let err = TextureRecord::decode(&mut di, V6_45).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedLength { offset: 0, declared: 50, available: 3 }
        ));
    }

    #[test]
    fn test_overlong_filename_prefix() {
        let mut bytes = encode(&sample_record(), V6_45);
        // name "brick" takes 2 + 5 bytes; filename prefix follows.
        bytes[7..9].copy_from_slice(&u16::MAX.to_le_bytes());
        let mut di = DatagramIterator::new(&bytes);
        let err = TextureRecord::decode(&mut di, V6_45).unwrap_err();
        assert!(matches!(err, Error::MalformedLength { offset: 7, declared: 65535, .. }));
        assert_eq!(di.tell(), 7);
    }

    #[test]
    fn test_signaling_nan_lod_is_byte_exact() {
        let tex = sample_record();
        let mut bytes = encode(&tex, V6_45);
        // min_lod sits right after the border color; find it by value.
        let min_lod = (-4.0f32).to_le_bytes();
        let at = bytes
            .windows(4)
            .position(|w| w == min_lod)
            .unwrap();
        bytes[at..at + 4].copy_from_slice(&[0x01, 0x00, 0x80, 0x7f]);

        let decoded = decode(&bytes, V6_45);
        assert_eq!(decoded.sampler.min_lod.to_f32().to_bits(), 0x7f80_0001);
        assert_eq!(encode(&decoded, V6_45), bytes);
    }

    #[test]
    fn test_flag_bytes_normalize() {
        let tex = sample_record();
        let mut bytes = encode(&tex, V6_45);
        // has_rawdata follows the three strings and two channel bytes.
        let at = 2 + 5 + 2 + 14 + 2 + 16 + 2;
        assert_eq!(bytes[at], 1);
        bytes[at] = 2;

        let decoded = decode(&bytes, V6_45);
        assert!(decoded.has_rawdata);
        let again = encode(&decoded, V6_45);
        assert_eq!(again[at], 1);
        assert_eq!(again.len(), bytes.len());
    }

    #[test]
    fn test_stdfloat_double() {
        let cfg = FileConfig::new().with_float_width(FloatWidth::F64);
        let mut tex = sample_record();
        tex.sampler.lod_bias = StdFloat::from(0.1);
        let mut dg = Datagram::with_config(cfg);
        tex.encode(V6_45, &mut dg).unwrap();
        let bytes = dg.into_inner().unwrap();
        assert_eq!(bytes.len(), encode(&tex, V6_45).len() + 12);

        let mut di = DatagramIterator::with_config(&bytes, cfg);
        assert_eq!(TextureRecord::decode(&mut di, V6_45).unwrap(), tex);
    }

    #[test]
    fn test_trait_object_path() {
        let tex = sample_record();
        let mut dg = Datagram::new();
        BamObject::write(&tex, V6_45, &mut dg).unwrap();
        let bytes = dg.into_inner().unwrap();
        let mut di = DatagramIterator::new(&bytes);
        let decoded = <TextureRecord as BamObjectType>::read(&mut di, V6_45).unwrap();
        assert_eq!(decoded, tex);
    }
}
