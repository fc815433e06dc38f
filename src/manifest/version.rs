use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::manifest::ManifestError;

/// A `major.minor.patch` extension version
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl FromStr for Version {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ManifestError::InvalidVersion(s.to_string());
        let mut parts = s.trim().split('.');
        let mut next = || -> Result<u32, ManifestError> {
            parts
                .next()
                .and_then(|p| p.parse::<u32>().ok())
                .ok_or_else(invalid)
        };
        let version = Version::new(next()?, next()?, next()?);
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(version)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Version constraint of a manifest dependency: `""` accepts anything,
/// `"8.4.0"` sets a minimum, `"8.4.0-8.4.99"` bounds both ends inclusively.
/// A `0.0.0` bound on either side means that side is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VersionRange {
    pub min: Option<Version>,
    pub max: Option<Version>,
}

impl VersionRange {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn contains(&self, version: &Version) -> bool {
        self.min.map_or(true, |min| *version >= min)
            && self.max.map_or(true, |max| *version <= max)
    }
}

fn bound(s: &str) -> Result<Option<Version>, ManifestError> {
    let version: Version = s.parse()?;
    Ok((version != Version::new(0, 0, 0)).then_some(version))
}

impl FromStr for VersionRange {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::any());
        }
        let range = match s.split_once('-') {
            None => Self {
                min: bound(s)?,
                max: None,
            },
            Some((min, max)) => Self {
                min: bound(min)?,
                max: bound(max)?,
            },
        };
        if let (Some(min), Some(max)) = (range.min, range.max) {
            if min > max {
                return Err(ManifestError::InvertedRange(s.to_string()));
            }
        }
        Ok(range)
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (None, None) => Ok(()),
            (Some(min), None) => write!(f, "{}", min),
            (Some(min), Some(max)) => write!(f, "{}-{}", min, max),
            (None, Some(max)) => write!(f, "0.0.0-{}", max),
        }
    }
}

impl<'de> Deserialize<'de> for VersionRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
