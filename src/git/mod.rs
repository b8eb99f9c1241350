//! Git operations abstraction layer
//!
//! The resolution engine talks to git only through the [Repository] trait.
//! The concrete implementations are:
//!
//! - [repository::Git2Repository]: a real implementation using the `git2` crate
//! - [mock::MockRepository]: an in-memory linear history for testing
//!
//! ```rust
//! # use git_autotag::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> git_autotag::Result<()> {
//! let tip = repo.branch_tip("main")?;
//! for tag in repo.list_tags()? {
//!     let commit = repo.resolve_tag(&tag)?;
//!     let since = repo.commits_in_range(commit, tip)?;
//!     println!("{}: {} commits since", tag, since.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use git2::Oid;

/// A commit as seen by the engine: identity and message text only
#[derive(Debug, Clone, PartialEq)]
pub struct CommitInfo {
    pub id: Oid,
    pub message: String,
}

/// Repository access needed to compute and write the next version tag
pub trait Repository {
    /// Names of all tags in the repository
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Commit a tag points to, peeling annotated tags.
    ///
    /// Errors here mean the repository is inconsistent; they are never a
    /// reason to skip the tag.
    fn resolve_tag(&self, tag_name: &str) -> Result<Oid>;

    /// Whether a local branch with this name exists
    fn branch_exists(&self, branch_name: &str) -> Result<bool>;

    /// Commit at the tip of a local branch
    fn branch_tip(&self, branch_name: &str) -> Result<Oid>;

    /// Commits reachable from `to` (inclusive) but not from `from` (exclusive),
    /// newest first.
    ///
    /// A commit whose message cannot be decoded is an error.
    fn commits_in_range(&self, from: Oid, to: Oid) -> Result<Vec<CommitInfo>>;

    /// Create a lightweight tag pointing at `oid`; fails if the name is taken
    fn create_tag(&self, name: &str, oid: Oid) -> Result<()>;
}
