//! Next-version computation from git tags

pub mod incrementer;

pub use incrementer::{sort_version_tags, VersionIncrementer};
