use crate::error::{AutotagError, Result};
use crate::git::CommitInfo;
use git2::{BranchType, ErrorCode, Oid, Repository as Git2Repo, Sort};
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Git2Repo::discover(path).map_err(|e| {
            AutotagError::config(format!(
                "Not a git repository: '{}': {}",
                path.display(),
                e.message()
            ))
        })?;
        log::debug!("Opened repository at {}", repo.path().display());

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }
}

impl super::Repository for Git2Repository {
    fn list_tags(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;

        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }

    fn resolve_tag(&self, tag_name: &str) -> Result<Oid> {
        let reference = self
            .repo
            .find_reference(&format!("refs/tags/{}", tag_name))
            .map_err(|e| {
                AutotagError::tag(format!("Cannot find tag '{}': {}", tag_name, e.message()))
            })?;

        let commit = reference.peel_to_commit().map_err(|e| {
            AutotagError::tag(format!(
                "Cannot read commit for tag '{}': {}",
                tag_name,
                e.message()
            ))
        })?;

        Ok(commit.id())
    }

    fn branch_exists(&self, branch_name: &str) -> Result<bool> {
        match self.repo.find_branch(branch_name, BranchType::Local) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn branch_tip(&self, branch_name: &str) -> Result<Oid> {
        let branch = self
            .repo
            .find_branch(branch_name, BranchType::Local)
            .map_err(|e| {
                AutotagError::branch(format!(
                    "Cannot find branch '{}': {}",
                    branch_name,
                    e.message()
                ))
            })?;

        let commit = branch.get().peel_to_commit().map_err(|e| {
            AutotagError::branch(format!(
                "Branch '{}' has no commit: {}",
                branch_name,
                e.message()
            ))
        })?;

        Ok(commit.id())
    }

    fn commits_in_range(&self, from: Oid, to: Oid) -> Result<Vec<CommitInfo>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(to)?;
        revwalk.hide(from)?;

        let mut commits = Vec::new();
        for oid in revwalk {
            let oid = oid?;
            let commit = self.repo.find_commit(oid).map_err(|e| {
                AutotagError::commit(format!("Cannot read commit {}: {}", oid, e.message()))
            })?;
            let message = commit.message().ok_or_else(|| {
                AutotagError::commit(format!("Commit {} has a message that is not UTF-8", oid))
            })?;

            commits.push(CommitInfo {
                id: oid,
                message: message.to_string(),
            });
        }

        Ok(commits)
    }

    fn create_tag(&self, name: &str, oid: Oid) -> Result<()> {
        let object = self.repo.find_object(oid, None).map_err(|e| {
            AutotagError::tag(format!("Cannot find object {}: {}", oid, e.message()))
        })?;

        self.repo.tag_lightweight(name, &object, false).map_err(|e| {
            AutotagError::tag(format!("Cannot create tag '{}': {}", name, e.message()))
        })?;

        Ok(())
    }
}
