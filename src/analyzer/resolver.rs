use crate::analyzer::catalog::TagEntry;
use crate::analyzer::classifier::CommitClassifier;
use crate::boundary::BoundaryWarning;
use crate::domain::{SemanticVersion, VersionBump};
use crate::error::Result;
use crate::git::Repository;
use git2::Oid;

/// Walks the history since the baseline tag and folds commit decisions into
/// the next version
pub struct VersionResolver {
    classifier: Box<dyn CommitClassifier>,
}

impl VersionResolver {
    /// Create a new version resolver
    pub fn new(classifier: Box<dyn CommitClassifier>) -> Self {
        VersionResolver { classifier }
    }

    /// Resolve the next version for the commits after `baseline` up to `tip`
    pub fn resolve<R: Repository + ?Sized>(
        &self,
        repo: &R,
        baseline: &TagEntry,
        tip: Oid,
    ) -> Result<SemanticVersion> {
        log::info!(
            "Checking commits from {} to {} ({})",
            tip,
            baseline.commit,
            baseline.name
        );

        let mut commits = repo.commits_in_range(baseline.commit, tip)?;
        // The access layer hands commits newest first.
        commits.reverse();

        if commits.is_empty() {
            log::warn!(
                "{}",
                BoundaryWarning::NoNewCommits {
                    baseline_tag: baseline.name.clone(),
                    branch_tip: tip.to_string(),
                }
            );
        }
        for commit in &commits {
            log::debug!("Parsing {}: {}", commit.id, commit.message.trim_end());
        }

        Ok(self.fold(
            &baseline.version,
            commits.iter().map(|c| c.message.as_str()),
        ))
    }

    /// Fold commit messages, oldest first, into a version.
    ///
    /// Each decision is applied to `baseline`, not to the previous result,
    /// and only replaces the working version when it is greater, so a later
    /// `[patch]` never undoes an earlier `[minor]`. Without any decision the
    /// baseline gets a patch bump.
    pub fn fold<'a>(
        &self,
        baseline: &SemanticVersion,
        messages: impl IntoIterator<Item = &'a str>,
    ) -> SemanticVersion {
        let mut decided: Option<SemanticVersion> = None;

        for message in messages {
            let Some(bump) = self.classifier.classify(message) else {
                continue;
            };
            let candidate = baseline.bump(bump);
            log::debug!("{} bump to {}", bump, candidate);
            if decided.as_ref().map_or(true, |current| candidate > *current) {
                decided = Some(candidate);
            }
        }

        decided.unwrap_or_else(|| {
            log::debug!("No bump decision found, defaulting to patch");
            baseline.bump(VersionBump::Patch)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::classifier::Scheme;
    use crate::error::AutotagError;
    use crate::git::MockRepository;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn resolver(scheme: Scheme) -> VersionResolver {
        VersionResolver::new(scheme.classifier().unwrap())
    }

    fn base() -> SemanticVersion {
        SemanticVersion::new(1, 0, 0)
    }

    #[test]
    fn test_fold_major_wins_at_the_end() {
        let r = resolver(Scheme::Autotag);
        let version = r.fold(
            &base(),
            ["#patch: a", "[minor]: b", "feat: c", "[major]: d"],
        );
        assert_eq!(version.to_string(), "2.0.0");
    }

    #[test]
    fn test_fold_is_not_cumulative() {
        let r = resolver(Scheme::Autotag);
        let version = r.fold(&base(), ["[minor] one", "[minor] two", "#patch three"]);
        assert_eq!(version.to_string(), "1.1.0");

        let version = r.fold(&base(), ["[minor] one", "[minor] two"]);
        assert_eq!(version.to_string(), "1.1.0");
    }

    #[test]
    fn test_fold_later_smaller_bump_does_not_downgrade() {
        let r = resolver(Scheme::Autotag);
        assert_eq!(r.fold(&base(), ["[minor] b", "[patch] c"]).to_string(), "1.1.0");
        assert_eq!(
            r.fold(&base(), ["[major] a", "[minor] b", "#patch c"]).to_string(),
            "2.0.0"
        );
    }

    #[test]
    fn test_fold_undecided_commits_keep_decision() {
        let r = resolver(Scheme::Autotag);
        let version = r.fold(&base(), ["[minor] one", "plain commit"]);
        assert_eq!(version.to_string(), "1.1.0");
    }

    #[test]
    fn test_fold_fallback_patch() {
        let r = resolver(Scheme::Autotag);
        assert_eq!(r.fold(&base(), Vec::<&str>::new()).to_string(), "1.0.1");
        assert_eq!(r.fold(&base(), ["plain commit"]).to_string(), "1.0.1");
    }

    #[test]
    fn test_fold_conventional() {
        let r = resolver(Scheme::Conventional);
        assert_eq!(r.fold(&base(), ["refactor!: drop support"]).to_string(), "2.0.0");
        assert_eq!(r.fold(&base(), ["fix: typo"]).to_string(), "1.0.1");
        assert_eq!(
            r.fold(&base(), ["feat!: break thing 1", "fix: thing 2"]).to_string(),
            "2.0.0"
        );
        assert_eq!(
            r.fold(&base(), ["feat: thing 1", "feat!: break thing 1", "feat: thing 2"])
                .to_string(),
            "2.0.0"
        );
        assert_eq!(
            r.fold(
                &base(),
                [
                    "feat: thing 1",
                    "feat!: break thing 1",
                    "feat: thing 2",
                    "refactor(runtime)!: drop support for Node 6",
                ]
            )
            .to_string(),
            "2.0.0"
        );
    }

    struct RecordingClassifier(Rc<RefCell<Vec<String>>>);

    impl CommitClassifier for RecordingClassifier {
        fn classify(&self, message: &str) -> Option<VersionBump> {
            self.0.borrow_mut().push(message.to_string());
            None
        }
    }

    #[test]
    fn test_resolve_processes_oldest_first() {
        let mut repo = MockRepository::new();
        repo.add_commit("before the tag").unwrap();
        let tagged = repo.add_commit("initial").unwrap();
        repo.add_commit("first").unwrap();
        repo.add_commit("second").unwrap();
        let tip = repo.add_commit("third").unwrap();

        let baseline = TagEntry {
            name: "v1.0.0".to_string(),
            version: base(),
            commit: tagged,
        };
        let seen = Rc::new(RefCell::new(Vec::new()));
        let resolver = VersionResolver::new(Box::new(RecordingClassifier(seen.clone())));
        let version = resolver.resolve(&repo, &baseline, tip).unwrap();

        assert_eq!(*seen.borrow(), vec!["first", "second", "third"]);
        assert_eq!(version.to_string(), "1.0.1");
    }

    #[test]
    fn test_resolve_keeps_highest_decision() {
        let mut repo = MockRepository::new();
        let tagged = repo.add_commit("initial").unwrap();
        repo.add_commit("[major] breaking").unwrap();
        let tip = repo.add_commit("[minor] later feature").unwrap();

        let baseline = TagEntry {
            name: "v1.0.0".to_string(),
            version: base(),
            commit: tagged,
        };
        let version = resolver(Scheme::Autotag)
            .resolve(&repo, &baseline, tip)
            .unwrap();
        assert_eq!(version.to_string(), "2.0.0");
    }

    #[test]
    fn test_resolve_empty_range() {
        let mut repo = MockRepository::new();
        let tagged = repo.add_commit("[major] already tagged").unwrap();
        let baseline = TagEntry {
            name: "v1.0.0".to_string(),
            version: base(),
            commit: tagged,
        };
        let version = resolver(Scheme::Autotag)
            .resolve(&repo, &baseline, tagged)
            .unwrap();
        assert_eq!(version.to_string(), "1.0.1");
    }

    #[test]
    fn test_resolve_unreadable_commit_is_fatal() {
        let mut repo = MockRepository::new();
        let tagged = repo.add_commit("initial").unwrap();
        repo.add_unreadable_commit().unwrap();
        let tip = repo.add_commit("#minor").unwrap();
        let baseline = TagEntry {
            name: "v1.0.0".to_string(),
            version: base(),
            commit: tagged,
        };

        assert!(matches!(
            resolver(Scheme::Autotag).resolve(&repo, &baseline, tip),
            Err(AutotagError::Commit(_))
        ));
    }
}
