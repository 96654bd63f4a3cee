//! Semantic version tags of the form `{prefix}{major}.{minor}.{patch}`.
use std::fmt;

use crate::error::{ReleaseNotesError, Result};

/// Plain `major.minor.patch` version parsed from a release tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SemVer {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl SemVer {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parses a tag after stripping `prefix`.
    ///
    /// Anything other than three dot-separated non-negative integers is
    /// rejected, including pre-release and build metadata suffixes and
    /// tags that do not start with `prefix`.
    pub fn parse(tag: &str, prefix: &str) -> Result<Self> {
        let invalid = || ReleaseNotesError::InvalidVersion(tag.to_string());

        let stripped = tag.strip_prefix(prefix).ok_or_else(invalid)?;
        let version = semver::Version::parse(stripped).map_err(|_| invalid())?;

        if !version.pre.is_empty() || !version.build.is_empty() {
            return Err(invalid());
        }

        Ok(Self::new(version.major, version.minor, version.patch))
    }

    /// Increments patch, leaving major and minor untouched.
    ///
    /// Fails with `InvalidVersion` when patch is already `u64::MAX`.
    pub fn bump_patch(self) -> Result<Self> {
        let patch = self
            .patch
            .checked_add(1)
            .ok_or_else(|| ReleaseNotesError::InvalidVersion(self.to_string()))?;

        Ok(Self { patch, ..self })
    }

    /// Formats as a release tag.
    pub fn to_tag(self, prefix: &str) -> String {
        format!("{prefix}{self}")
    }
}

impl fmt::Display for SemVer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
