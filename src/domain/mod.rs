//! Domain logic - pure business rules independent of git operations

pub mod commit;
pub mod prerelease;
pub mod tag;
pub mod version;

pub use commit::{ConventionalGrammar, ParsedCommit};
pub use prerelease::{Clock, PreReleaseComposer, TimestampLayout};
pub use tag::TagNaming;
pub use version::{SemanticVersion, VersionBump};
