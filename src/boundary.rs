use std::fmt;

/// Non-fatal conditions met while reading tags and history.
/// They are logged and the run continues.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No commits between the baseline tag and the branch tip
    NoNewCommits {
        baseline_tag: String,
        branch_tip: String,
    },
    /// Tag exists but cannot be parsed as a semantic version
    UnparsableTag { tag: String, reason: String },
    /// Tag exists but lives outside the configured subdirectory scope
    OutOfScopeTag { tag: String, scope: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoNewCommits {
                baseline_tag,
                branch_tip,
            } => {
                let short_hash = if branch_tip.len() > 7 {
                    &branch_tip[..7]
                } else {
                    branch_tip.as_str()
                };
                write!(
                    f,
                    "No new commits since tag '{}' (branch tip: {})",
                    baseline_tag, short_hash
                )
            }
            BoundaryWarning::UnparsableTag { tag, reason } => {
                write!(f, "Skipping non-version tag '{}': {}", tag, reason)
            }
            BoundaryWarning::OutOfScopeTag { tag, scope } => {
                write!(f, "Skipping tag '{}' outside scope '{}/'", tag, scope)
            }
        }
    }
}
