use crate::domain::prerelease::PreRelease;
use crate::error::{ReleaseError, Result};
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;

/// Accepted tag shape: optional `v`, dotted release numbers, optional
/// pre-release marker with optional number.
const TAG_PATTERN: &str =
    r"(?i)^v?(\d+(?:\.\d+)*)(?:[-_.]?((?:alpha|beta|preview|pre|rc|a|b|c)(?:[-_.]?\d+)?))?$";

/// Semantic version representation
///
/// Equality follows precedence: `1.2.3-rc` equals `1.2.3-rc.0`, and the
/// `c` and `rc` spellings are the same marker.
#[derive(Debug, Clone, Copy)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub micro: u32,
    pub pre: Option<PreRelease>,
}

impl Version {
    /// Create a new release version
    pub fn new(major: u32, minor: u32, micro: u32) -> Self {
        Version {
            major,
            minor,
            micro,
            pre: None,
        }
    }

    /// Attach a pre-release marker
    pub fn with_pre(mut self, pre: PreRelease) -> Self {
        self.pre = Some(pre);
        self
    }

    /// Parse version from a tag string (e.g., "v1.8.5-rc.03")
    ///
    /// Missing release components default to 0 and components past the
    /// third are ignored, so "v1.2" is 1.2.0 and "0.0.1.2.3" is 0.0.1.
    pub fn parse(tag: &str) -> Result<Self> {
        let re = Regex::new(TAG_PATTERN).map_err(|e| ReleaseError::version(e.to_string()))?;
        let captures = re.captures(tag.trim()).ok_or_else(|| {
            ReleaseError::version(format!("Invalid version format: '{}'", tag))
        })?;

        let release = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
        let mut components = [0u32; 3];
        for (slot, part) in components.iter_mut().zip(release.split('.')) {
            *slot = part.parse::<u32>().map_err(|_| {
                ReleaseError::version(format!("Invalid version component '{}' in '{}'", part, tag))
            })?;
        }

        let pre = captures
            .get(2)
            .map(|m| PreRelease::parse(m.as_str()))
            .transpose()?;

        Ok(Version {
            major: components[0],
            minor: components[1],
            micro: components[2],
            pre,
        })
    }

    /// Whether this version carries a pre-release marker
    pub fn is_prerelease(&self) -> bool {
        self.pre.is_some()
    }

    /// Release version the next candidate builds on
    ///
    /// A release moves to the next micro version; a pre-release keeps its
    /// numbers since that release has not shipped yet.
    pub fn candidate_base(&self) -> Result<Self> {
        if self.is_prerelease() {
            return Ok(Version::new(self.major, self.minor, self.micro));
        }

        let micro = self.micro.checked_add(1).ok_or_else(|| {
            ReleaseError::version(format!("Micro version overflow in {}", self))
        })?;
        Ok(Version::new(self.major, self.minor, micro))
    }

    /// Tag name for this version, e.g. "v1.2.3-rc.01"
    pub fn tag(&self) -> String {
        format!("v{}", self)
    }

    /// Equivalent `semver` version, used for precedence
    pub fn to_semver(&self) -> semver::Version {
        let mut version =
            semver::Version::new(self.major.into(), self.minor.into(), self.micro.into());
        if let Some(pre) = &self.pre {
            let identifier = format!("{}.{}", pre.identifier, pre.number());
            version.pre = semver::Prerelease::new(&identifier).unwrap_or(semver::Prerelease::EMPTY);
        }
        version
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_semver().cmp(&other.to_semver())
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.micro)?;
        if let Some(pre) = &self.pre {
            write!(f, "-{}", pre)?;
        }
        Ok(())
    }
}
