pub mod analyzer;
pub mod autotag;
pub mod boundary;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod ui;

pub use autotag::Autotag;
pub use error::{AutotagError, Result};
