//! Pre-release markers for version tags
//!
//! Tags carry markers in several spellings (`-rc.03`, `rc3`, `-beta.1`,
//! `.preview2`). They are normalized to three kinds: alpha, beta and release
//! candidate, with an optional iteration number.

use crate::error::{ReleaseError, Result};
use std::fmt;
use std::str::FromStr;

/// Pre-release identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PreReleaseType {
    /// Alpha pre-release
    Alpha,
    /// Beta pre-release
    Beta,
    /// Release candidate
    ReleaseCandidate,
}

impl PreReleaseType {
    /// Parse a pre-release type from a marker string
    ///
    /// Accepts (case-insensitive): "a", "alpha", "b", "beta", "c", "rc",
    /// "pre" and "preview".
    pub fn parse(s: &str) -> Result<Self> {
        s.parse()
    }
}

impl FromStr for PreReleaseType {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "alpha" | "a" => Ok(PreReleaseType::Alpha),
            "beta" | "b" => Ok(PreReleaseType::Beta),
            "rc" | "c" | "pre" | "preview" => Ok(PreReleaseType::ReleaseCandidate),
            _ => Err(ReleaseError::version(format!(
                "Invalid pre-release identifier: '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for PreReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreReleaseType::Alpha => write!(f, "alpha"),
            PreReleaseType::Beta => write!(f, "beta"),
            PreReleaseType::ReleaseCandidate => write!(f, "rc"),
        }
    }
}

/// Pre-release marker with optional iteration number
///
/// # Examples
/// - "rc.03" -> PreRelease { identifier: ReleaseCandidate, iteration: Some(3) }
/// - "beta" -> PreRelease { identifier: Beta, iteration: None }
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreRelease {
    /// The pre-release identifier
    pub identifier: PreReleaseType,
    /// Iteration number; a bare marker has none and counts as 0
    pub iteration: Option<u32>,
}

impl PreRelease {
    /// Create a new pre-release marker
    pub fn new(identifier: PreReleaseType, iteration: Option<u32>) -> Self {
        PreRelease {
            identifier,
            iteration,
        }
    }

    /// First release candidate of a cycle, `rc.01`
    pub fn first_candidate() -> Self {
        PreRelease::new(PreReleaseType::ReleaseCandidate, Some(1))
    }

    /// Parse a pre-release marker such as "rc.2", "rc03" or "beta"
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(ReleaseError::version("Empty pre-release identifier"));
        }

        let split = s
            .find(|c: char| c.is_ascii_digit() || matches!(c, '.' | '-' | '_'))
            .unwrap_or(s.len());
        let (marker, rest) = s.split_at(split);

        let identifier = PreReleaseType::parse(marker)?;

        let digits = rest.trim_start_matches(['.', '-', '_']);
        let iteration = if digits.is_empty() {
            None
        } else {
            Some(digits.parse::<u32>().map_err(|_| {
                ReleaseError::version(format!("Invalid iteration number: '{}'", digits))
            })?)
        };

        Ok(PreRelease {
            identifier,
            iteration,
        })
    }

    /// The iteration number, treating a bare marker as 0
    pub fn number(&self) -> u32 {
        self.iteration.unwrap_or(0)
    }

    /// Next release candidate after this marker
    ///
    /// The identifier always becomes `rc`, whatever it was before; the
    /// iteration goes up by one.
    pub fn next_candidate(&self) -> Result<Self> {
        let next = self.number().checked_add(1).ok_or_else(|| {
            ReleaseError::version(format!("Pre-release counter overflow after {}", self))
        })?;

        Ok(PreRelease::new(PreReleaseType::ReleaseCandidate, Some(next)))
    }
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier)?;
        if let Some(iter) = self.iteration {
            write!(f, ".{:02}", iter)?;
        }
        Ok(())
    }
}
