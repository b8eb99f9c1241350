use crate::domain::{SemanticVersion, TagNaming};
use crate::error::{AutotagError, Result};
use crate::git::Repository;
use git2::Oid;
use std::collections::BTreeMap;

/// A version tag and the commit it points to
#[derive(Debug, Clone, PartialEq)]
pub struct TagEntry {
    pub name: String,
    pub version: SemanticVersion,
    pub commit: Oid,
}

/// All version tags of a repository (within the configured scope), ordered
/// from the highest version down.
#[derive(Debug, Clone, Default)]
pub struct TagCatalog {
    entries: Vec<TagEntry>,
}

impl TagCatalog {
    /// Read and parse every tag of the repository.
    ///
    /// Tags that are not versions, or are outside the subdirectory scope, are
    /// logged and skipped. A version tag whose commit cannot be resolved is an error.
    pub fn load<R: Repository + ?Sized>(repo: &R, naming: &TagNaming) -> Result<Self> {
        log::debug!("Parsing repository tags");

        let mut entries = Vec::new();
        for name in repo.list_tags()? {
            let version = match naming.parse(&name) {
                Ok(version) => version,
                Err(warning) => {
                    log::info!("{}", warning);
                    continue;
                }
            };

            let commit = repo.resolve_tag(&name)?;
            entries.push(TagEntry {
                name,
                version,
                commit,
            });
        }

        Ok(Self::from_entries(entries))
    }

    /// Build a catalog from already-resolved entries.
    ///
    /// When two tags carry the same version (e.g. `v1.0.0` and `1.0.0`) the
    /// first one wins.
    pub fn from_entries(entries: impl IntoIterator<Item = TagEntry>) -> Self {
        let mut by_version: BTreeMap<SemanticVersion, TagEntry> = BTreeMap::new();
        for entry in entries {
            by_version.entry(entry.version.clone()).or_insert(entry);
        }

        TagCatalog {
            entries: by_version.into_values().rev().collect(),
        }
    }

    /// Entries by descending version precedence
    pub fn entries(&self) -> &[TagEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The highest version without a pre-release label
    pub fn baseline(&self) -> Result<&TagEntry> {
        self.entries
            .iter()
            .find(|entry| !entry.version.is_pre_release())
            .ok_or(AutotagError::NoStableVersion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;

    fn repo_with_tags(tags: &[&str]) -> MockRepository {
        let mut repo = MockRepository::new();
        for tag in tags {
            let oid = repo.add_commit(format!("commit for {}", tag)).unwrap();
            repo.add_tag(*tag, oid);
        }
        repo
    }

    #[test]
    fn test_baseline_picks_highest_stable() {
        let repo = repo_with_tags(&["v0.0.1", "v1.2.0", "v1.10.0", "v1.9.3"]);
        let catalog = TagCatalog::load(&repo, &TagNaming::default()).unwrap();
        assert_eq!(catalog.baseline().unwrap().name, "v1.10.0");
    }

    #[test]
    fn test_baseline_ignores_pre_release() {
        let repo = repo_with_tags(&["v1.0.1", "v1.0.2-pre"]);
        let catalog = TagCatalog::load(&repo, &TagNaming::default()).unwrap();
        assert_eq!(catalog.entries().len(), 2);
        assert_eq!(catalog.entries()[0].name, "v1.0.2-pre");
        assert_eq!(catalog.baseline().unwrap().name, "v1.0.1");
    }

    #[test]
    fn test_non_version_tags_are_skipped() {
        let repo = repo_with_tags(&["v1.0.1", "foo", "", "release-candidate"]);
        let catalog = TagCatalog::load(&repo, &TagNaming::default()).unwrap();
        assert_eq!(catalog.entries().len(), 1);
        assert_eq!(
            catalog.baseline().unwrap().version,
            SemanticVersion::new(1, 0, 1)
        );
    }

    #[test]
    fn test_no_stable_version() {
        let repo = repo_with_tags(&["v1.0.0-rc.1", "foo"]);
        let catalog = TagCatalog::load(&repo, &TagNaming::default()).unwrap();
        assert!(matches!(
            catalog.baseline(),
            Err(AutotagError::NoStableVersion)
        ));

        let empty = TagCatalog::load(&MockRepository::new(), &TagNaming::default()).unwrap();
        assert!(empty.is_empty());
        assert!(empty.baseline().is_err());
    }

    #[test]
    fn test_subdirectory_scope() {
        let repo = repo_with_tags(&["v9.0.0", "sub/v1.2.3", "other/v5.0.0", "sub/v1.0.0"]);
        let naming = TagNaming::new(true, Some("sub".to_string()));
        let catalog = TagCatalog::load(&repo, &naming).unwrap();

        let names: Vec<&str> = catalog.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["sub/v1.2.3", "sub/v1.0.0"]);
        assert_eq!(
            catalog.baseline().unwrap().version,
            SemanticVersion::new(1, 2, 3)
        );
    }

    #[test]
    fn test_unresolvable_version_tag_is_fatal() {
        let mut repo = repo_with_tags(&["v1.0.0"]);
        repo.add_tag("v2.0.0", Oid::zero());
        assert!(TagCatalog::load(&repo, &TagNaming::default()).is_err());
    }

    #[test]
    fn test_duplicate_versions_keep_first() {
        let repo = repo_with_tags(&["1.0.0", "v1.0.0"]);
        let catalog = TagCatalog::load(&repo, &TagNaming::default()).unwrap();
        assert_eq!(catalog.entries().len(), 1);
        assert_eq!(catalog.baseline().unwrap().name, "1.0.0");
    }
}
