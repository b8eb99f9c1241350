use crate::error::{AutotagError, Result};
use regex::Regex;

/// Parsed representation of a conventional commit header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommit {
    pub r#type: String,
    pub scope: Option<String>,
    pub description: String,
    /// `!` right before the colon, e.g. `feat(api)!: ...`
    pub breaking_marker: bool,
}

/// Compiled Conventional Commits grammar.
///
/// Supports formats:
/// - type(scope)!: description
/// - type(scope): description
/// - type!: description
/// - type: description
#[derive(Debug, Clone)]
pub struct ConventionalGrammar {
    header: Regex,
    breaking_footer: Regex,
}

impl ConventionalGrammar {
    pub fn new() -> Result<Self> {
        let header = Regex::new(
            r"^(?P<type>\w+)(?:\((?P<scope>[^()\r\n]*)\))?(?P<bang>!)?:\s*(?P<description>.*)$",
        )
        .map_err(|e| AutotagError::config(format!("Invalid header pattern: {}", e)))?;
        let breaking_footer = Regex::new(r"(?m)^BREAKING[ -]CHANGE:")
            .map_err(|e| AutotagError::config(format!("Invalid footer pattern: {}", e)))?;

        Ok(ConventionalGrammar {
            header,
            breaking_footer,
        })
    }

    /// Parse the first line of a commit message; `None` for non-conforming headers
    pub fn parse(&self, message: &str) -> Option<ParsedCommit> {
        let first_line = message.lines().next()?.trim_end();
        let captures = self.header.captures(first_line)?;

        Some(ParsedCommit {
            r#type: captures["type"].to_string(),
            scope: captures.name("scope").map(|m| m.as_str().to_string()),
            description: captures["description"].to_string(),
            breaking_marker: captures.name("bang").is_some(),
        })
    }

    /// Whether the body or footer (everything after the header) has a
    /// `BREAKING CHANGE:` line
    pub fn has_breaking_footer(&self, message: &str) -> bool {
        match message.split_once('\n') {
            Some((_, body)) => self.breaking_footer.is_match(body),
            None => false,
        }
    }
}
