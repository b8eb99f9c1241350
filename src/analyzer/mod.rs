//! Version resolution: tag catalog, commit classification and history folding

pub mod catalog;
pub mod classifier;
pub mod resolver;

pub use catalog::{TagCatalog, TagEntry};
pub use classifier::{AutotagClassifier, CommitClassifier, ConventionalClassifier, Scheme};
pub use resolver::VersionResolver;
