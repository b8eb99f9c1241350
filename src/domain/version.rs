use crate::error::{AutotagError, Result};
use semver::{BuildMetadata, Prerelease};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Semantic version with an arbitrary number of numeric segments.
///
/// Parsed versions always carry at least three segments (`1` becomes `1.0.0`).
/// Build metadata is ignored by ordering and equality; a pre-release label
/// sorts before the same numeric segments without one.
#[derive(Debug, Clone)]
pub struct SemanticVersion {
    segments: Vec<u64>,
    pre_release: Prerelease,
    build_metadata: BuildMetadata,
}

impl SemanticVersion {
    /// Create a plain `major.minor.patch` version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemanticVersion {
            segments: vec![major, minor, patch],
            pre_release: Prerelease::EMPTY,
            build_metadata: BuildMetadata::EMPTY,
        }
    }

    /// Parse version from a tag string, tolerating a leading `v` (e.g., "v1.2.3" -> 1.2.3)
    pub fn from_tag(tag: &str) -> Result<Self> {
        Self::parse(tag.strip_prefix('v').unwrap_or(tag))
    }

    /// Parse a bare version string such as `1.2.3`, `1.2`, `1.2.3.4-rc.1` or `1.0.0+build.5`
    pub fn parse(s: &str) -> Result<Self> {
        let (rest, build) = match s.split_once('+') {
            Some((rest, build)) => (rest, Some(build)),
            None => (s, None),
        };
        let (core, pre) = match rest.split_once('-') {
            Some((core, pre)) => (core, Some(pre)),
            None => (rest, None),
        };

        let mut segments = core
            .split('.')
            .map(|segment| parse_segment(segment, s))
            .collect::<Result<Vec<u64>>>()?;
        if segments.len() < 3 {
            segments.resize(3, 0);
        }

        let pre_release = match pre {
            Some(pre) => parse_label(pre, s, Prerelease::new)?,
            None => Prerelease::EMPTY,
        };
        let build_metadata = match build {
            Some(build) => parse_label(build, s, BuildMetadata::new)?,
            None => BuildMetadata::EMPTY,
        };

        Ok(SemanticVersion {
            segments,
            pre_release,
            build_metadata,
        })
    }

    pub fn segments(&self) -> &[u64] {
        &self.segments
    }

    pub fn major(&self) -> u64 {
        self.segment(0)
    }

    pub fn minor(&self) -> u64 {
        self.segment(1)
    }

    pub fn patch(&self) -> u64 {
        self.segment(2)
    }

    /// Pre-release label without the leading `-`; empty when absent
    pub fn pre_release(&self) -> &str {
        self.pre_release.as_str()
    }

    /// Build metadata without the leading `+`; empty when absent
    pub fn build_metadata(&self) -> &str {
        self.build_metadata.as_str()
    }

    pub fn is_pre_release(&self) -> bool {
        !self.pre_release.is_empty()
    }

    fn segment(&self, index: usize) -> u64 {
        self.segments.get(index).copied().unwrap_or(0)
    }

    /// Bump version according to bump type.
    ///
    /// - **Major**: `major + 1`, minor and patch reset, extra segments dropped
    /// - **Minor**: `minor + 1`, patch reset, extra segments kept
    /// - **Patch**: `patch + 1`, extra segments kept
    ///
    /// Pre-release and build metadata never survive a bump.
    pub fn bump(&self, bump_type: VersionBump) -> Self {
        let mut segments = match bump_type {
            VersionBump::Major => vec![self.major() + 1, 0, 0],
            VersionBump::Minor => vec![self.major(), self.minor() + 1, 0],
            VersionBump::Patch => vec![self.major(), self.minor(), self.patch() + 1],
        };
        if bump_type != VersionBump::Major {
            segments.extend(self.segments.iter().skip(3));
        }

        SemanticVersion {
            segments,
            pre_release: Prerelease::EMPTY,
            build_metadata: BuildMetadata::EMPTY,
        }
    }

    /// Attach a pre-release label and re-validate the resulting version
    pub fn with_pre_release(&self, label: &str) -> Result<Self> {
        if self.is_pre_release() {
            return Err(AutotagError::config(format!(
                "Version {} already has pre-release '{}'",
                self, self.pre_release
            )));
        }

        let mut composed = Self::parse(&format!("{}-{}", self.core(), label))?;
        composed.build_metadata = self.build_metadata.clone();
        Ok(composed)
    }

    /// Attach build metadata and re-validate the resulting version
    pub fn with_build_metadata(&self, metadata: &str) -> Result<Self> {
        if !self.build_metadata.is_empty() {
            return Err(AutotagError::config(format!(
                "Version {} already has build metadata '{}'",
                self, self.build_metadata
            )));
        }

        Self::parse(&format!("{}+{}", self, metadata))
    }

    fn core(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }
}

fn parse_segment(segment: &str, input: &str) -> Result<u64> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AutotagError::parse(format!(
            "'{}' is not a version: expected numeric segments, found '{}'",
            input, segment
        )));
    }
    segment.parse::<u64>().map_err(|_| {
        AutotagError::parse(format!(
            "'{}' is not a version: segment '{}' is too large",
            input, segment
        ))
    })
}

// `semver` accepts an empty label, but `1.2.3-` and `1.2.3+` are not versions.
fn parse_label<T>(
    label: &str,
    input: &str,
    parse: fn(&str) -> std::result::Result<T, semver::Error>,
) -> Result<T> {
    if label.is_empty() {
        return Err(AutotagError::parse(format!(
            "'{}' is not a version: empty label",
            input
        )));
    }
    parse(label).map_err(|e| AutotagError::parse(format!("'{}' is not a version: {}", input, e)))
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        (0..len)
            .map(|i| self.segment(i).cmp(&other.segment(i)))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or_else(|| self.pre_release.cmp(&other.pre_release))
    }
}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SemanticVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SemanticVersion {}

impl FromStr for SemanticVersion {
    type Err = AutotagError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.core())?;
        if !self.pre_release.is_empty() {
            write!(f, "-{}", self.pre_release)?;
        }
        if !self.build_metadata.is_empty() {
            write!(f, "+{}", self.build_metadata)?;
        }
        Ok(())
    }
}

/// Version bump type decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    Major,
    Minor,
    Patch,
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionBump::Major => write!(f, "major"),
            VersionBump::Minor => write!(f, "minor"),
            VersionBump::Patch => write!(f, "patch"),
        }
    }
}
