//! BAM format version.

use std::fmt;
use std::str::FromStr;

use crate::util::{Error, Result};

/// A BAM file format version, `major.minor`.
///
/// Versions order lexicographically: `(6, 9) < (6, 10) < (7, 0)`.
/// Every field gate in a record is a comparison against one of these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BamVersion {
    pub major: u16,
    pub minor: u16,
}

impl BamVersion {
    /// Create a version from its parts.
    #[inline]
    pub const fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }

    /// True when `self >= other`, usable in const context.
    #[inline]
    pub const fn at_least(self, other: BamVersion) -> bool {
        self.major > other.major || (self.major == other.major && self.minor >= other.minor)
    }
}

impl From<(u16, u16)> for BamVersion {
    fn from((major, minor): (u16, u16)) -> Self {
        Self::new(major, minor)
    }
}

impl fmt::Display for BamVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for BamVersion {
    type Err = Error;

    /// Parse `"6.45"` or `"6,45"`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (major, minor) = s
            .split_once(['.', ','])
            .ok_or_else(|| Error::InvalidVersion(s.to_string()))?;

        let part = |p: &str| {
            p.trim()
                .parse::<u16>()
                .map_err(|_| Error::InvalidVersion(s.to_string()))
        };
        Ok(Self::new(part(major)?, part(minor)?))
    }
}
