//! Workflow orchestration: pick the branch, select the baseline tag, resolve
//! the next version and write it as a tag.

use crate::analyzer::{TagCatalog, TagEntry, VersionResolver};
use crate::config::AutotagConfig;
use crate::domain::{SemanticVersion, TagNaming};
use crate::error::{AutotagError, Result};
use crate::git::Repository;
use git2::Oid;

/// Branches tried, in order, when none is configured
pub const DEFAULT_BRANCHES: [&str; 2] = ["main", "master"];

/// The next version of one repository, computed once and ready to be tagged
pub struct Autotag<R: Repository> {
    repo: R,
    naming: TagNaming,
    branch: String,
    branch_tip: Oid,
    baseline: TagEntry,
    new_version: SemanticVersion,
}

impl<R: Repository> Autotag<R> {
    /// Resolve the next version of `repo`.
    ///
    /// Nothing is written; call [`Autotag::auto_tag`] to create the tag.
    pub fn new(repo: R, config: AutotagConfig) -> Result<Self> {
        let resolver = VersionResolver::new(config.scheme.classifier()?);

        let branch = resolve_branch(&repo, config.branch.as_deref())?;
        let branch_tip = repo.branch_tip(&branch)?;
        log::info!("Using branch '{}' at {}", branch, branch_tip);

        let catalog = TagCatalog::load(&repo, &config.naming)?;
        let baseline = catalog.baseline()?.clone();
        log::info!(
            "Current latest version is {} (tag '{}')",
            baseline.version,
            baseline.name
        );

        let bumped = resolver.resolve(&repo, &baseline, branch_tip)?;
        let new_version = config.composer.compose(&bumped)?;
        log::info!("Next version is {}", new_version);

        Ok(Autotag {
            repo,
            naming: config.naming,
            branch,
            branch_tip,
            baseline,
            new_version,
        })
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    /// Commit the new tag will point to
    pub fn branch_tip(&self) -> Oid {
        self.branch_tip
    }

    /// The stable tag the new version was computed from
    pub fn baseline(&self) -> &TagEntry {
        &self.baseline
    }

    /// The computed next version, without tag prefix or scope
    pub fn latest_version(&self) -> &SemanticVersion {
        &self.new_version
    }

    /// Tag name for the computed version, e.g. `sub/v1.2.3`
    pub fn tag_name(&self) -> String {
        self.naming.format(&self.new_version)
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Write the computed version as a tag at the branch tip
    pub fn auto_tag(&self) -> Result<String> {
        let tag_name = self.tag_name();
        log::info!("Writing tag {}", tag_name);
        self.repo.create_tag(&tag_name, self.branch_tip)?;
        Ok(tag_name)
    }
}

/// Pick the configured branch, or the first of [`DEFAULT_BRANCHES`] that exists
pub fn resolve_branch<R: Repository + ?Sized>(
    repo: &R,
    configured: Option<&str>,
) -> Result<String> {
    if let Some(branch) = configured {
        return Ok(branch.to_string());
    }

    for candidate in DEFAULT_BRANCHES {
        if repo.branch_exists(candidate)? {
            return Ok(candidate.to_string());
        }
    }

    Err(AutotagError::config(format!(
        "No branch specified and none of the default branches ({}) exist",
        DEFAULT_BRANCHES.join(", ")
    )))
}
