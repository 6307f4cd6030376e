//! Raw-code enums stored in texture records.
//!
//! Every enum field in a record is a single byte. Files written by newer
//! tools may carry codes this crate has never seen, so each enum is a
//! newtype over the raw `u8` with named constants for the known codes.
//! Any code round-trips; only the display label can be missing.
//!
//! Known codes are dense: the code of a variant is its index in the
//! label table.

use std::fmt;

macro_rules! raw_code_enum {
    (
        $(#[$meta:meta])*
        $name:ident, default = $default:ident {
            $($konst:ident = $code:literal => $label:literal,)*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub u8);

        impl $name {
            $(pub const $konst: Self = Self($code);)*

            /// Display labels indexed by code.
            pub const LABELS: &'static [&'static str] = &[$($label),*];

            /// Raw byte code.
            #[inline]
            pub const fn code(self) -> u8 {
                self.0
            }

            /// Label for a known code.
            pub fn label(self) -> Option<&'static str> {
                Self::LABELS.get(self.0 as usize).copied()
            }

            /// True if the code has a known label.
            #[inline]
            pub fn is_known(self) -> bool {
                (self.0 as usize) < Self::LABELS.len()
            }

            /// Number of historically known codes.
            #[inline]
            pub const fn known_count() -> usize {
                Self::LABELS.len()
            }

            /// Look up a code by label, ignoring case.
            pub fn from_label(label: &str) -> Option<Self> {
                Self::LABELS
                    .iter()
                    .position(|l| l.eq_ignore_ascii_case(label.trim()))
                    .map(|i| Self(i as u8))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl From<u8> for $name {
            fn from(code: u8) -> Self {
                Self(code)
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> u8 {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self.label() {
                    Some(label) => f.write_str(label),
                    None => write!(f, "Unknown({})", self.0),
                }
            }
        }
    };
}

raw_code_enum! {
    /// Texture dimensionality.
    TextureType, default = TEXTURE_2D {
        TEXTURE_1D = 0 => "1D Texture",
        TEXTURE_2D = 1 => "2D Texture",
        TEXTURE_3D = 2 => "3D Texture",
        TEXTURE_2D_ARRAY = 3 => "2D Texture Array",
        CUBE_MAP = 4 => "Cube Map",
        BUFFER_TEXTURE = 5 => "Buffer Texture",
        CUBE_MAP_ARRAY = 6 => "Cube Map Array",
        TEXTURE_1D_ARRAY = 7 => "1D Texture Array",
    }
}

raw_code_enum! {
    /// Pixel format of the texture image.
    TextureFormat, default = RGBA {
        UNKNOWN = 0 => "Unknown",
        DEPTH_STENCIL = 1 => "Depth Stencil",
        COLOR_INDEX = 2 => "Color Index",
        RED = 3 => "Red",
        GREEN = 4 => "Green",
        BLUE = 5 => "Blue",
        ALPHA = 6 => "Alpha",
        RGB = 7 => "RGB",
        RGB5 = 8 => "RGB 5-bit",
        RGB8 = 9 => "RGB 8-bit",
        RGB12 = 10 => "RGB 12-bit",
        RGB332 = 11 => "RGB 332",
        RGBA = 12 => "RGBA",
        RGBM = 13 => "RGBM",
        RGBA4 = 14 => "RGBA 4-bit",
        RGBA5 = 15 => "RGBA 5-bit",
        RGBA8 = 16 => "RGBA 8-bit",
        RGBA12 = 17 => "RGBA 12-bit",
        LUMINANCE = 18 => "Luminance",
        LUMINANCE_ALPHA = 19 => "Luminance Alpha",
        LUMINANCE_ALPHAMASK = 20 => "Luminance Alpha Mask",
        RGBA16 = 21 => "RGBA 16-bit",
        RGBA32 = 22 => "RGBA 32-bit",
        DEPTH_COMPONENT = 23 => "Depth Component",
        DEPTH_COMPONENT16 = 24 => "Depth Component 16-bit",
        DEPTH_COMPONENT24 = 25 => "Depth Component 24-bit",
        DEPTH_COMPONENT32 = 26 => "Depth Component 32-bit",
        R16 = 27 => "R 16-bit",
        RG16 = 28 => "RG 16-bit",
        RGB16 = 29 => "RGB 16-bit",
        SRGB = 30 => "SRGB",
        SRGB_ALPHA = 31 => "SRGB Alpha",
        SLUMINANCE = 32 => "S Luminance",
        SLUMINANCE_ALPHA = 33 => "S Luminance Alpha",
        R32I = 34 => "R32I",
        R32 = 35 => "R 32-bit",
        RG32 = 36 => "RG 32-bit",
        RGB32 = 37 => "RGB 32-bit",
        R8I = 38 => "R8I",
        RG8I = 39 => "RG8I",
        RGB8I = 40 => "RGB8I",
        RGBA8I = 41 => "RGBA8I",
        R11_G11_B10 = 42 => "R11/G11/B10",
        RGB9_E5 = 43 => "RGB9 E5",
        RGB10_A2 = 44 => "RGB10 A2",
        RG = 45 => "RG",
        R16I = 46 => "R16I",
    }
}

raw_code_enum! {
    /// GPU buffer usage hint; only stored for buffer textures.
    UsageHint, default = UNSPECIFIED {
        CLIENT = 0 => "Client",
        STREAM = 1 => "Stream",
        DYNAMIC = 2 => "Dynamic",
        STATIC = 3 => "Static",
        UNSPECIFIED = 4 => "Unspecified",
    }
}

raw_code_enum! {
    /// Sampler wrap mode per texture axis.
    WrapMode, default = REPEAT {
        UNSPECIFIED = 0 => "Unspecified",
        CLAMP = 1 => "Clamp",
        REPEAT = 2 => "Repeat",
        MIRROR = 3 => "Mirror",
        MIRROR_ONCE = 4 => "Mirror Once",
        BORDER_COLOR = 5 => "Border Color",
    }
}

raw_code_enum! {
    /// Minification / magnification filter.
    FilterType, default = UNSPECIFIED {
        UNSPECIFIED = 0 => "Unspecified",
        NEAREST = 1 => "Nearest",
        LINEAR = 2 => "Linear",
        MIPMAP_POINT = 3 => "Mipmap Point",
        MIPMAP_LINEAR = 4 => "Mipmap Linear",
        MIPMAP_BILINEAR = 5 => "Mipmap Bilinear",
        MIPMAP_TRILINEAR = 6 => "Mipmap Trilinear",
    }
}

raw_code_enum! {
    /// Requested on-card compression.
    CompressionMode, default = DEFAULT {
        DEFAULT = 0 => "Default",
        OFF = 1 => "Off",
        ON = 2 => "On",
        FXT1 = 3 => "FXT1",
        DXT1 = 4 => "DXT1",
        DXT2 = 5 => "DXT2",
        DXT3 = 6 => "DXT3",
        DXT4 = 7 => "DXT4",
        DXT5 = 8 => "DXT5",
    }
}

raw_code_enum! {
    /// Rendering quality hint.
    QualityLevel, default = UNSPECIFIED {
        UNSPECIFIED = 0 => "Unspecified",
        DEFAULT = 1 => "Default",
        FASTEST = 2 => "Fastest",
        NORMAL = 3 => "Normal",
        BEST = 4 => "Best",
    }
}

raw_code_enum! {
    /// Power-of-two rescaling policy.
    AutoTextureScale, default = UNSPECIFIED {
        NONE = 0 => "None",
        DOWN = 1 => "Down",
        UP = 2 => "Up",
        PAD = 3 => "Pad",
        UNSPECIFIED = 4 => "Unspecified",
    }
}

/// Which label table an enum field uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnumKind {
    TextureType,
    TextureFormat,
    UsageHint,
    WrapMode,
    FilterType,
    CompressionMode,
    QualityLevel,
    AutoTextureScale,
}

impl EnumKind {
    /// Label table for this enum.
    pub fn labels(self) -> &'static [&'static str] {
        match self {
            EnumKind::TextureType => TextureType::LABELS,
            EnumKind::TextureFormat => TextureFormat::LABELS,
            EnumKind::UsageHint => UsageHint::LABELS,
            EnumKind::WrapMode => WrapMode::LABELS,
            EnumKind::FilterType => FilterType::LABELS,
            EnumKind::CompressionMode => CompressionMode::LABELS,
            EnumKind::QualityLevel => QualityLevel::LABELS,
            EnumKind::AutoTextureScale => AutoTextureScale::LABELS,
        }
    }

    /// Label for `code`, if known.
    pub fn label(self, code: u8) -> Option<&'static str> {
        self.labels().get(code as usize).copied()
    }

    /// Code for a label, ignoring case.
    pub fn code_of(self, label: &str) -> Option<u8> {
        self.labels()
            .iter()
            .position(|l| l.eq_ignore_ascii_case(label.trim()))
            .map(|i| i as u8)
    }
}
