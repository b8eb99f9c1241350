//! Pre-release and build-metadata composition for semantic versions
//!
//! Identifier rules follow semver.org: https://semver.org/#spec-item-9 and
//! https://semver.org/#spec-item-10

use crate::domain::SemanticVersion;
use crate::error::{AutotagError, Result};
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// Source of the current time used for timestamp suffixes
pub type Clock = fn() -> DateTime<Utc>;

const DATETIME_LAYOUT: &str = "%Y%m%d%H%M%S";

/// How a pre-release timestamp suffix is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampLayout {
    /// UNIX epoch seconds, e.g. `1546300800`
    Epoch,
    /// UTC date and time, e.g. `20190101000000`
    Datetime,
}

impl TimestampLayout {
    pub fn render(&self, now: DateTime<Utc>) -> String {
        match self {
            TimestampLayout::Epoch => now.timestamp().to_string(),
            TimestampLayout::Datetime => now.format(DATETIME_LAYOUT).to_string(),
        }
    }
}

impl FromStr for TimestampLayout {
    type Err = AutotagError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "epoch" => Ok(TimestampLayout::Epoch),
            "datetime" => Ok(TimestampLayout::Datetime),
            other => Err(AutotagError::config(format!(
                "Invalid pre-release timestamp '{}': expected 'epoch' or 'datetime'",
                other
            ))),
        }
    }
}

impl fmt::Display for TimestampLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampLayout::Epoch => write!(f, "epoch"),
            TimestampLayout::Datetime => write!(f, "datetime"),
        }
    }
}

/// Validate a pre-release name: dot-separated, non-empty, alphanumeric or
/// hyphen identifiers, numeric identifiers without leading zeros.
pub fn validate_pre_release_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(AutotagError::config("Pre-release name must not be empty"));
    }
    semver::Prerelease::new(name)
        .map(|_| ())
        .map_err(|e| AutotagError::config(format!("Invalid pre-release name '{}': {}", name, e)))
}

/// Validate build metadata: dot-separated, non-empty, alphanumeric or
/// hyphen identifiers.
pub fn validate_build_metadata(metadata: &str) -> Result<()> {
    if metadata.is_empty() {
        return Err(AutotagError::config("Build metadata must not be empty"));
    }
    semver::BuildMetadata::new(metadata)
        .map(|_| ())
        .map_err(|e| {
            AutotagError::config(format!("Invalid build metadata '{}': {}", metadata, e))
        })
}

/// Appends the configured pre-release label and build metadata to a version
#[derive(Debug, Clone)]
pub struct PreReleaseComposer {
    name: Option<String>,
    timestamp: Option<TimestampLayout>,
    build_metadata: Option<String>,
    clock: Clock,
}

impl PreReleaseComposer {
    /// Create a composer after validating the name and metadata identifiers
    pub fn new(
        name: Option<String>,
        timestamp: Option<TimestampLayout>,
        build_metadata: Option<String>,
    ) -> Result<Self> {
        if let Some(name) = &name {
            validate_pre_release_name(name)?;
        }
        if let Some(metadata) = &build_metadata {
            validate_build_metadata(metadata)?;
        }

        Ok(PreReleaseComposer {
            name,
            timestamp,
            build_metadata,
            clock: Utc::now,
        })
    }

    /// Replace the clock, e.g. with a fixed instant in tests
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// The pre-release label that would be applied now, if any
    pub fn label(&self) -> Option<String> {
        let stamp = self.timestamp.map(|layout| layout.render((self.clock)()));
        match (&self.name, stamp) {
            (Some(name), Some(stamp)) => Some(format!("{}.{}", name, stamp)),
            (Some(name), None) => Some(name.clone()),
            (None, Some(stamp)) => Some(stamp),
            (None, None) => None,
        }
    }

    pub fn compose(&self, version: &SemanticVersion) -> Result<SemanticVersion> {
        let mut composed = match self.label() {
            Some(label) => version.with_pre_release(&label)?,
            None => version.clone(),
        };
        if let Some(metadata) = &self.build_metadata {
            composed = composed.with_build_metadata(metadata)?;
        }
        Ok(composed)
    }
}

impl Default for PreReleaseComposer {
    fn default() -> Self {
        PreReleaseComposer {
            name: None,
            timestamp: None,
            build_metadata: None,
            clock: Utc::now,
        }
    }
}
