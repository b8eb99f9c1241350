use crate::boundary::BoundaryWarning;
use crate::domain::SemanticVersion;

/// How version tags are named: an optional `<subdir>/` scope and an optional
/// literal `v` in front of the version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagNaming {
    pub prefix: bool,
    pub subdirectory: Option<String>,
}

impl TagNaming {
    /// Create a tag naming scheme; surrounding slashes on the subdirectory are ignored
    pub fn new(prefix: bool, subdirectory: Option<String>) -> Self {
        let subdirectory = subdirectory
            .map(|dir| dir.trim_matches('/').to_string())
            .filter(|dir| !dir.is_empty());
        TagNaming {
            prefix,
            subdirectory,
        }
    }

    /// Strip the subdirectory scope from a tag name.
    ///
    /// Returns `None` when the tag lives outside the configured scope.
    pub fn version_part<'a>(&self, tag: &'a str) -> Option<&'a str> {
        match &self.subdirectory {
            Some(dir) => tag.strip_prefix(dir.as_str())?.strip_prefix('/'),
            None => Some(tag),
        }
    }

    /// Parse the version carried by a tag name.
    ///
    /// Both `v`-prefixed and bare versions are accepted regardless of
    /// [`TagNaming::prefix`]; the prefix only affects [`TagNaming::format`].
    pub fn parse(&self, tag: &str) -> Result<SemanticVersion, BoundaryWarning> {
        let part = self
            .version_part(tag)
            .ok_or_else(|| BoundaryWarning::OutOfScopeTag {
                tag: tag.to_string(),
                scope: self.subdirectory.clone().unwrap_or_default(),
            })?;

        SemanticVersion::from_tag(part).map_err(|e| BoundaryWarning::UnparsableTag {
            tag: tag.to_string(),
            reason: e.to_string(),
        })
    }

    /// Format a version as a tag name.
    /// Example: subdirectory="sub", prefix=true, version="1.2.3" -> "sub/v1.2.3"
    pub fn format(&self, version: &SemanticVersion) -> String {
        let v = if self.prefix { "v" } else { "" };
        match &self.subdirectory {
            Some(dir) => format!("{}/{}{}", dir, v, version),
            None => format!("{}{}", v, version),
        }
    }
}

impl Default for TagNaming {
    fn default() -> Self {
        TagNaming::new(true, None)
    }
}
