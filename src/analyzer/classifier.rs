use crate::domain::{ConventionalGrammar, VersionBump};
use crate::error::{AutotagError, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// Policy used to read bump decisions out of commit messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheme {
    /// `[major]`/`#major`, `[minor]`/`#minor`, `[patch]`/`#patch` markers
    #[default]
    Autotag,
    /// Conventional Commits headers and `BREAKING CHANGE:` footers
    Conventional,
}

impl Scheme {
    /// Build the classifier implementing this scheme
    pub fn classifier(self) -> Result<Box<dyn CommitClassifier>> {
        Ok(match self {
            Scheme::Autotag => Box::new(AutotagClassifier::new()?),
            Scheme::Conventional => Box::new(ConventionalClassifier::new()?),
        })
    }
}

impl FromStr for Scheme {
    type Err = AutotagError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" | "autotag" => Ok(Scheme::Autotag),
            "conventional" => Ok(Scheme::Conventional),
            other => Err(AutotagError::config(format!(
                "Unknown versioning scheme '{}': expected 'autotag' or 'conventional'",
                other
            ))),
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Autotag => write!(f, "autotag"),
            Scheme::Conventional => write!(f, "conventional"),
        }
    }
}

/// Maps one commit message to a bump decision; `None` means no decision
pub trait CommitClassifier {
    fn classify(&self, message: &str) -> Option<VersionBump>;
}

/// Marker-based scheme. When several markers appear, major beats minor beats patch.
pub struct AutotagClassifier {
    markers: Vec<(Regex, VersionBump)>,
}

impl AutotagClassifier {
    pub fn new() -> Result<Self> {
        let marker = |name: &str, bump: VersionBump| -> Result<(Regex, VersionBump)> {
            let re = Regex::new(&format!(r"(?i)\[{0}\]|#{0}", name)).map_err(|e| {
                AutotagError::config(format!("Invalid {} marker pattern: {}", name, e))
            })?;
            Ok((re, bump))
        };

        Ok(AutotagClassifier {
            markers: vec![
                marker("major", VersionBump::Major)?,
                marker("minor", VersionBump::Minor)?,
                marker("patch", VersionBump::Patch)?,
            ],
        })
    }
}

impl CommitClassifier for AutotagClassifier {
    fn classify(&self, message: &str) -> Option<VersionBump> {
        self.markers
            .iter()
            .find(|(re, _)| re.is_match(message))
            .map(|(_, bump)| *bump)
    }
}

/// Conventional Commits scheme.
///
/// Only breaking changes and `feat` produce a decision; `fix` and every other
/// type are left to the resolver's patch fallback.
pub struct ConventionalClassifier {
    grammar: ConventionalGrammar,
}

impl ConventionalClassifier {
    pub fn new() -> Result<Self> {
        Ok(ConventionalClassifier {
            grammar: ConventionalGrammar::new()?,
        })
    }
}

impl CommitClassifier for ConventionalClassifier {
    fn classify(&self, message: &str) -> Option<VersionBump> {
        if self.grammar.has_breaking_footer(message) {
            return Some(VersionBump::Major);
        }

        let parsed = self.grammar.parse(message)?;
        if parsed.breaking_marker {
            Some(VersionBump::Major)
        } else if parsed.r#type.eq_ignore_ascii_case("feat") {
            Some(VersionBump::Minor)
        } else {
            None
        }
    }
}
