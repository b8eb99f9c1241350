use crate::error::{AutotagError, Result};
use crate::git::{CommitInfo, Repository};
use git2::Oid;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Mock repository for testing without actual git operations.
///
/// History is a single linear chain of commits, oldest first.
pub struct MockRepository {
    history: Vec<CommitInfo>,
    unreadable: HashSet<Oid>,
    branch_heads: HashMap<String, Oid>,
    tags: RefCell<BTreeMap<String, Oid>>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            history: Vec::new(),
            unreadable: HashSet::new(),
            branch_heads: HashMap::new(),
            tags: RefCell::new(BTreeMap::new()),
        }
    }

    /// Append a commit to the history and return its id
    pub fn add_commit(&mut self, message: impl Into<String>) -> Result<Oid> {
        let mut bytes = [0u8; 20];
        bytes[..8].copy_from_slice(&(self.history.len() as u64 + 1).to_be_bytes());
        let id = Oid::from_bytes(&bytes)?;

        self.history.push(CommitInfo {
            id,
            message: message.into(),
        });
        Ok(id)
    }

    /// Append a commit whose message cannot be decoded
    pub fn add_unreadable_commit(&mut self) -> Result<Oid> {
        let id = self.add_commit("")?;
        self.unreadable.insert(id);
        Ok(id)
    }

    /// Add a tag pointing to an OID
    pub fn add_tag(&mut self, name: impl Into<String>, oid: Oid) {
        self.tags.borrow_mut().insert(name.into(), oid);
    }

    /// Set a branch head
    pub fn set_branch_head(&mut self, branch: impl Into<String>, oid: Oid) {
        self.branch_heads.insert(branch.into(), oid);
    }

    /// Tags currently present, including ones created through [`Repository::create_tag`]
    pub fn tags(&self) -> BTreeMap<String, Oid> {
        self.tags.borrow().clone()
    }

    fn position(&self, oid: Oid) -> Option<usize> {
        self.history.iter().position(|c| c.id == oid)
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self.tags.borrow().keys().cloned().collect())
    }

    fn resolve_tag(&self, tag_name: &str) -> Result<Oid> {
        let oid = self
            .tags
            .borrow()
            .get(tag_name)
            .copied()
            .ok_or_else(|| AutotagError::tag(format!("Cannot find tag '{}'", tag_name)))?;

        match self.position(oid) {
            Some(_) => Ok(oid),
            None => Err(AutotagError::tag(format!(
                "Tag '{}' points to missing commit {}",
                tag_name, oid
            ))),
        }
    }

    fn branch_exists(&self, branch_name: &str) -> Result<bool> {
        Ok(self.branch_heads.contains_key(branch_name))
    }

    fn branch_tip(&self, branch_name: &str) -> Result<Oid> {
        self.branch_heads
            .get(branch_name)
            .copied()
            .ok_or_else(|| AutotagError::branch(format!("Branch not found: {}", branch_name)))
    }

    fn commits_in_range(&self, from: Oid, to: Oid) -> Result<Vec<CommitInfo>> {
        let end = self
            .position(to)
            .ok_or_else(|| AutotagError::commit(format!("Unknown commit {}", to)))?;
        let start = match self.position(from) {
            Some(index) if index <= end => index + 1,
            Some(_) => end + 1,
            None => 0,
        };

        self.history[start..=end]
            .iter()
            .rev()
            .map(|commit| {
                if self.unreadable.contains(&commit.id) {
                    Err(AutotagError::commit(format!(
                        "Commit {} has a message that is not UTF-8",
                        commit.id
                    )))
                } else {
                    Ok(commit.clone())
                }
            })
            .collect()
    }

    fn create_tag(&self, name: &str, oid: Oid) -> Result<()> {
        let mut tags = self.tags.borrow_mut();
        if tags.contains_key(name) {
            return Err(AutotagError::tag(format!(
                "Cannot create tag '{}': already exists",
                name
            )));
        }
        tags.insert(name.to_string(), oid);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_repository_branch_head() {
        let mut repo = MockRepository::new();
        let oid = repo.add_commit("test commit").unwrap();

        repo.set_branch_head("main", oid);

        assert_eq!(repo.branch_tip("main").unwrap(), oid);
        assert!(repo.branch_exists("main").unwrap());
        assert!(!repo.branch_exists("master").unwrap());
        assert!(repo.branch_tip("master").is_err());
    }

    #[test]
    fn test_mock_repository_tags() {
        let mut repo = MockRepository::new();
        let first = repo.add_commit("first").unwrap();
        let second = repo.add_commit("second").unwrap();

        repo.add_tag("v1.0.0", first);
        repo.add_tag("v2.0.0", second);

        assert_eq!(repo.resolve_tag("v1.0.0").unwrap(), first);
        assert!(repo.resolve_tag("v3.0.0").is_err());
        assert_eq!(repo.list_tags().unwrap(), vec!["v1.0.0", "v2.0.0"]);
    }

    #[test]
    fn test_mock_repository_dangling_tag() {
        let mut repo = MockRepository::new();
        repo.add_tag("v1.0.0", Oid::zero());
        assert!(repo.resolve_tag("v1.0.0").is_err());
    }

    #[test]
    fn test_mock_repository_range_is_newest_first() {
        let mut repo = MockRepository::new();
        let base = repo.add_commit("base").unwrap();
        repo.add_commit("one").unwrap();
        let tip = repo.add_commit("two").unwrap();

        let messages: Vec<String> = repo
            .commits_in_range(base, tip)
            .unwrap()
            .into_iter()
            .map(|c| c.message)
            .collect();
        assert_eq!(messages, vec!["two", "one"]);
        assert!(repo.commits_in_range(tip, tip).unwrap().is_empty());
    }

    #[test]
    fn test_mock_repository_unreadable_commit() {
        let mut repo = MockRepository::new();
        let base = repo.add_commit("base").unwrap();
        repo.add_unreadable_commit().unwrap();
        let tip = repo.add_commit("tip").unwrap();

        assert!(matches!(
            repo.commits_in_range(base, tip),
            Err(AutotagError::Commit(_))
        ));
    }

    #[test]
    fn test_mock_repository_create_tag() {
        let mut repo = MockRepository::new();
        let oid = repo.add_commit("first").unwrap();

        repo.create_tag("v1.0.1", oid).unwrap();
        assert_eq!(repo.tags().get("v1.0.1"), Some(&oid));
        assert!(repo.create_tag("v1.0.1", oid).is_err());
    }

    #[test]
    fn test_mock_repository_default() {
        let repo = MockRepository::default();
        assert!(repo.list_tags().unwrap().is_empty());
    }
}
